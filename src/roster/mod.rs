//! Validated edits to the roster and the score book.
//!
//! Every check runs before anything is mutated, so a rejected edit leaves the
//! collections exactly as they were.

use crate::store::{Contestant, ScoreBook};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("a contestant named '{0}' already exists")]
    DuplicateName(String),
    #[error("phone number '{0}' is already registered")]
    DuplicatePhone(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoreEntryError {
    #[error("no contestant with id {0}")]
    UnknownContestant(u32),
    #[error("expected {expected} judge scores, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("judge {judge} score {value} is outside {min}-{max}")]
    OutOfRange {
        judge: usize,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Details for a contestant who is not registered yet
#[derive(Debug, Clone, Default)]
pub struct NewContestant {
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub class_name: Option<String>,
    pub school: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

/// Rules a score submission must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRules {
    pub judges: usize,
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            judges: 10,
            min: 0.0,
            max: 100.0,
        }
    }
}

/// Register a contestant and return the stored record.
///
/// Name and phone are trimmed and must be non-empty and unused. The new id
/// is one past the roster size (or past the largest id, if a hand-edited
/// file has gaps) so ids stay unique.
pub fn add_contestant(
    roster: &mut Vec<Contestant>,
    new: NewContestant,
) -> Result<Contestant, RosterError> {
    let name = new.name.trim();
    let phone = new.phone.trim();

    if name.is_empty() {
        return Err(RosterError::MissingField("name"));
    }
    if phone.is_empty() {
        return Err(RosterError::MissingField("phone"));
    }
    if roster.iter().any(|c| c.name == name) {
        return Err(RosterError::DuplicateName(name.to_string()));
    }
    if roster.iter().any(|c| c.phone == phone) {
        return Err(RosterError::DuplicatePhone(phone.to_string()));
    }

    let max_id = roster.iter().map(|c| c.id).max().unwrap_or(0);
    let id = (roster.len() as u32).max(max_id) + 1;

    let contestant = Contestant {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        gender: non_blank(new.gender),
        age: non_blank(new.age),
        class_name: non_blank(new.class_name),
        school: non_blank(new.school),
        province: non_blank(new.province),
        city: non_blank(new.city),
    };

    roster.push(contestant.clone());
    Ok(contestant)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Replace a contestant's judge scores with a full new submission.
/// Returns the scores that were replaced, if any.
pub fn record_scores(
    book: &mut ScoreBook,
    roster: &[Contestant],
    id: u32,
    scores: Vec<f64>,
    rules: &ScoreRules,
) -> Result<Option<Vec<f64>>, ScoreEntryError> {
    if !roster.iter().any(|c| c.id == id) {
        return Err(ScoreEntryError::UnknownContestant(id));
    }
    if scores.len() != rules.judges {
        return Err(ScoreEntryError::WrongCount {
            expected: rules.judges,
            actual: scores.len(),
        });
    }
    if let Some((idx, &value)) = scores
        .iter()
        .enumerate()
        .find(|&(_, &s)| !(rules.min..=rules.max).contains(&s))
    {
        return Err(ScoreEntryError::OutOfRange {
            judge: idx + 1,
            value,
            min: rules.min,
            max: rules.max,
        });
    }

    // -0.0 passes the range check but would print as "-0.0"
    let scores = scores.into_iter().map(|s| s + 0.0).collect();
    Ok(book.set(id, scores))
}
