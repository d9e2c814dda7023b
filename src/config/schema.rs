use crate::roster::ScoreRules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tool configuration. Every field is optional.
///
/// Example YAML:
/// ```yaml
/// data_dir: /srv/contest/2026
/// judges: 7
/// score_range: { min: 0, max: 10 }
/// podium_colors: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding contestants.json and scores.json
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Number of judge scores per submission (default: 10)
    #[serde(default)]
    pub judges: Option<usize>,

    /// Accepted bounds for a single judge score (default: 0-100)
    #[serde(default)]
    pub score_range: Option<ScoreRange>,

    /// Highlight the top three ranks in color output (default: true)
    #[serde(default)]
    pub podium_colors: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl Config {
    pub fn score_rules(&self) -> ScoreRules {
        let defaults = ScoreRules::default();
        let range = self.score_range.unwrap_or(ScoreRange {
            min: defaults.min,
            max: defaults.max,
        });
        ScoreRules {
            judges: self.judges.unwrap_or(defaults.judges),
            min: range.min,
            max: range.max,
        }
    }

    /// Data directory, falling back to the config directory
    pub fn data_dir(&self) -> PathBuf {
        match self.data_dir.as_deref() {
            Some(dir) => PathBuf::from(dir),
            None => super::get_config_dir(),
        }
    }

    pub fn podium_colors(&self) -> bool {
        self.podium_colors.unwrap_or(true)
    }
}
