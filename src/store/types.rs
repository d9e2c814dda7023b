use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Fallback label used wherever a demographic field is missing or blank.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A registered contestant as persisted in `contestants.json`.
///
/// Only `id`, `name` and `phone` are required. Demographic fields are
/// omitted from the JSON when absent so that files written by older tools
/// (which only knew the three required keys) round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: u32,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Contestant {
    /// Create a contestant with only the required fields set
    pub fn new(id: u32, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            gender: None,
            age: None,
            class_name: None,
            school: None,
            province: None,
            city: None,
        }
    }

    /// Key used for this contestant in the score book
    pub fn score_key(&self) -> String {
        self.id.to_string()
    }

    pub fn gender_label(&self) -> &str {
        label_or_unknown(self.gender.as_deref())
    }

    pub fn province_label(&self) -> &str {
        label_or_unknown(self.province.as_deref())
    }

    pub fn class_label(&self) -> &str {
        label_or_unknown(self.class_name.as_deref())
    }
}

/// Older rosters store age as a JSON number, newer ones as text
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|v| match v {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

fn label_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

/// Raw judge scores keyed by contestant id (stringified), as persisted in
/// `scores.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBook {
    entries: BTreeMap<String, Vec<f64>>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw scores recorded for a contestant, if any
    pub fn get(&self, id: u32) -> Option<&[f64]> {
        self.entries.get(&id.to_string()).map(Vec::as_slice)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id.to_string())
    }

    /// Replace the full score list for a contestant.
    /// Returns the previous list, if one existed.
    pub fn set(&mut self, id: u32, scores: Vec<f64>) -> Option<Vec<f64>> {
        self.entries.insert(id.to_string(), scores)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
