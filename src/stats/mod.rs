use crate::ranking::RankingEntry;
use crate::scoring::is_gradeable;
use crate::store::{Contestant, ScoreBook};

/// Frequency counts for one demographic field, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    buckets: Vec<(String, usize)>,
}

impl Distribution {
    fn from_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Self {
        let mut dist = Distribution::default();
        for label in labels {
            match dist.buckets.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => dist.buckets.push((label.to_string(), 1)),
            }
        }
        dist
    }

    pub fn buckets(&self) -> &[(String, usize)] {
        &self.buckets
    }

    pub fn get(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_contestants: usize,
    pub scored_contestants: usize,
    pub unscored_contestants: usize,
    /// Average, highest and lowest only count real final scores (above zero)
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub gender_distribution: Distribution,
    pub province_distribution: Distribution,
    pub class_distribution: Distribution,
}

/// Aggregate counts, score extremes and demographic distributions.
///
/// A contestant counts as scored when the score book holds a gradeable list
/// (at least three scores) for them. Everyone else, including contestants
/// whose list is too short to produce a final score, counts as unscored.
/// Such a short list still shows up in the ranking, with a final score of 0.
pub fn build_statistics(
    contestants: &[Contestant],
    book: &ScoreBook,
    rankings: &[RankingEntry],
) -> Statistics {
    let total_contestants = contestants.len();
    let scored_contestants = contestants
        .iter()
        .filter(|c| book.get(c.id).is_some_and(is_gradeable))
        .count();

    let graded: Vec<f64> = rankings
        .iter()
        .map(|e| e.final_score)
        .filter(|&s| s > 0.0)
        .collect();

    let (average_score, highest_score, lowest_score) = if graded.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            graded.iter().sum::<f64>() / graded.len() as f64,
            graded.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            graded.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    Statistics {
        total_contestants,
        scored_contestants,
        unscored_contestants: total_contestants - scored_contestants,
        average_score,
        highest_score,
        lowest_score,
        gender_distribution: Distribution::from_labels(
            contestants.iter().map(Contestant::gender_label),
        ),
        province_distribution: Distribution::from_labels(
            contestants.iter().map(Contestant::province_label),
        ),
        class_distribution: Distribution::from_labels(
            contestants.iter().map(Contestant::class_label),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::build_rankings;
    use crate::store::UNKNOWN_LABEL;

    fn contestant(id: u32, gender: Option<&str>, province: Option<&str>) -> Contestant {
        let mut c = Contestant::new(id, format!("C{}", id), format!("13{}", id));
        c.gender = gender.map(String::from);
        c.province = province.map(String::from);
        c
    }

    fn stats_for(contestants: &[Contestant], book: &ScoreBook) -> Statistics {
        let rankings = build_rankings(contestants, book);
        build_statistics(contestants, book, &rankings)
    }

    #[test]
    fn test_empty_everything() {
        let stats = stats_for(&[], &ScoreBook::new());
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_short_list_excluded_from_extremes_and_counted_unscored() {
        let contestants = vec![Contestant::new(1, "X", "1"), Contestant::new(2, "Y", "2")];
        let mut book = ScoreBook::new();
        book.set(
            1,
            vec![80.0, 85.0, 90.0, 95.0, 70.0, 75.0, 88.0, 92.0, 60.0, 65.0],
        );
        book.set(2, vec![60.0, 62.0]);

        // Y's short list still ranks, but only X counts as scored
        assert_eq!(build_rankings(&contestants, &book).len(), 2);

        let stats = stats_for(&contestants, &book);
        let x_final = 80.625;
        assert_eq!(stats.total_contestants, 2);
        assert_eq!(stats.scored_contestants, 1);
        assert_eq!(stats.unscored_contestants, 1);
        assert!((stats.average_score - x_final).abs() < 1e-9);
        assert!((stats.highest_score - x_final).abs() < 1e-9);
        assert!((stats.lowest_score - x_final).abs() < 1e-9);
    }

    #[test]
    fn test_missing_entries_are_unscored() {
        let contestants = vec![
            Contestant::new(1, "A", "1"),
            Contestant::new(2, "B", "2"),
            Contestant::new(3, "C", "3"),
        ];
        let mut book = ScoreBook::new();
        book.set(1, vec![50.0, 60.0, 70.0]);
        book.set(3, vec![80.0, 90.0, 100.0]);

        let stats = stats_for(&contestants, &book);
        assert_eq!(stats.scored_contestants, 2);
        assert_eq!(stats.unscored_contestants, 1);
        assert_eq!(stats.average_score, 75.0);
        assert_eq!(stats.highest_score, 90.0);
        assert_eq!(stats.lowest_score, 60.0);
    }

    #[test]
    fn test_no_graded_scores_gives_zeros() {
        let contestants = vec![Contestant::new(1, "A", "1")];
        let mut book = ScoreBook::new();
        book.set(1, vec![0.0, 0.0, 0.0]);

        let stats = stats_for(&contestants, &book);
        // Gradeable but every final score is zero
        assert_eq!(stats.scored_contestants, 1);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.highest_score, 0.0);
        assert_eq!(stats.lowest_score, 0.0);
    }

    #[test]
    fn test_distributions_first_seen_order_with_unknown() {
        let contestants = vec![
            contestant(1, Some("female"), Some("Hubei")),
            contestant(2, None, Some("Anhui")),
            contestant(3, Some("male"), Some("Hubei")),
            contestant(4, Some("female"), Some("")),
        ];

        let stats = stats_for(&contestants, &ScoreBook::new());

        let genders: Vec<_> = stats
            .gender_distribution
            .buckets()
            .iter()
            .map(|(l, c)| (l.as_str(), *c))
            .collect();
        assert_eq!(
            genders,
            vec![("female", 2), (UNKNOWN_LABEL, 1), ("male", 1)]
        );

        assert_eq!(stats.province_distribution.get("Hubei"), 2);
        assert_eq!(stats.province_distribution.get(UNKNOWN_LABEL), 1);
        assert_eq!(stats.province_distribution.buckets()[0].0, "Hubei");
        assert_eq!(stats.class_distribution.get(UNKNOWN_LABEL), 4);
    }

    #[test]
    fn test_distributions_sum_to_total() {
        let contestants = vec![
            contestant(1, Some("female"), None),
            contestant(2, Some("male"), Some("Hunan")),
            contestant(3, None, Some("Hunan")),
        ];
        let stats = stats_for(&contestants, &ScoreBook::new());
        assert_eq!(stats.gender_distribution.total(), stats.total_contestants);
        assert_eq!(stats.province_distribution.total(), stats.total_contestants);
        assert_eq!(stats.class_distribution.total(), stats.total_contestants);
    }
}
