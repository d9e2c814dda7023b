use crate::scoring::{final_score, summarize, ScoreSummary};
use crate::store::{Contestant, ScoreBook};
use std::cmp::Ordering;

/// A contestant joined with their judge scores and computed final score
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub contestant: Contestant,
    pub scores: Vec<f64>,
    pub final_score: f64,
}

impl RankingEntry {
    pub fn id(&self) -> u32 {
        self.contestant.id
    }

    pub fn name(&self) -> &str {
        &self.contestant.name
    }

    /// Highest/lowest/mean alongside the final score. `None` if the
    /// contestant's score list is empty.
    pub fn summary(&self) -> Option<ScoreSummary> {
        summarize(&self.scores)
    }
}

/// Podium titles for the first three positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based position, if it is on the podium
    pub fn for_position(position: usize) -> Option<Medal> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Medal::Gold => "Champion",
            Medal::Silver => "Runner-up",
            Medal::Bronze => "Third place",
        }
    }
}

/// Join the roster with the score book and rank by final score, highest first.
///
/// Contestants without a score entry are left out. Ties keep roster order
/// because the sort is stable and looks at nothing but the final score.
pub fn build_rankings(contestants: &[Contestant], book: &ScoreBook) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = contestants
        .iter()
        .filter_map(|c| {
            book.get(c.id).map(|scores| RankingEntry {
                contestant: c.clone(),
                scores: scores.to_vec(),
                final_score: final_score(scores),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    entries
}
