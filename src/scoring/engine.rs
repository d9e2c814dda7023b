/// Fewest judge scores that can produce a final score.
pub const MIN_GRADEABLE_SCORES: usize = 3;

/// Final score of a contestant: drop one highest and one lowest judge score,
/// then average the rest.
///
/// Returns `0.0` when fewer than [`MIN_GRADEABLE_SCORES`] scores are present.
/// That zero means "not enough data yet" and is not a real result; use
/// [`is_gradeable`] to tell the two apart.
pub fn final_score(scores: &[f64]) -> f64 {
    if !is_gradeable(scores) {
        return 0.0;
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // Exactly one copy of each extreme goes, even with ties at the ends
    let trimmed = &sorted[1..sorted.len() - 1];
    trimmed.iter().sum::<f64>() / trimmed.len() as f64
}

/// Whether the list holds enough scores for [`final_score`] to mean anything
pub fn is_gradeable(scores: &[f64]) -> bool {
    scores.len() >= MIN_GRADEABLE_SCORES
}

/// Headline numbers for one contestant's judge scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub highest: f64,
    pub lowest: f64,
    /// Plain mean over every judge, nothing dropped
    pub mean: f64,
    pub final_score: f64,
}

/// Summarize a score list. `None` for an empty list.
pub fn summarize(scores: &[f64]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }

    let highest = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    Some(ScoreSummary {
        highest,
        lowest,
        mean,
        final_score: final_score(scores),
    })
}
