use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::ranking::{Medal, RankingEntry};
use crate::scoring::{is_gradeable, summarize, ScoreSummary};
use crate::stats::{Distribution, Statistics};
use crate::store::{Contestant, ScoreBook};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, counting chars rather than bytes
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit a trailing name column into whatever the terminal leaves over
fn fit_name(name: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        Some(_) => truncate_name(name, 20),
        None => name.to_string(),
    }
}

/// One decimal place, as judges read scores
pub fn format_score(score: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0
    format!("{:.1}", score + 0.0)
}

/// Final score for display. A list too short to grade shows "n/a" so the
/// placeholder zero is never mistaken for a real result.
pub fn format_final(scores: &[f64], final_score: f64) -> String {
    if is_gradeable(scores) {
        format_score(final_score)
    } else {
        "n/a".to_string()
    }
}

fn medal_paint(text: &str, medal: Medal) -> String {
    match medal {
        Medal::Gold => text.truecolor(255, 215, 0).bold().to_string(),
        Medal::Silver => text.truecolor(192, 192, 192).bold().to_string(),
        Medal::Bronze => text.truecolor(205, 127, 50).bold().to_string(),
    }
}

/// Roster as a table: ID, phone, gender, province, class, name
pub fn format_roster_table(contestants: &[Contestant], use_colors: bool) -> String {
    if contestants.is_empty() {
        return "No contestants registered.".to_string();
    }

    let header = format!(
        "{:>4}  {:<14}  {:<8}  {:<12}  {:<10}  {}",
        "ID", "Phone", "Gender", "Province", "Class", "Name"
    );
    let fixed_width = 4 + 14 + 8 + 12 + 10 + 2 * 5;

    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    for c in contestants {
        let name = fit_name(&c.name, fixed_width);
        let row = format!(
            "{:>4}  {:<14}  {:<8}  {:<12}  {:<10}  ",
            c.id,
            c.phone,
            c.gender_label(),
            c.province_label(),
            c.class_label()
        );
        if use_colors {
            lines.push(format!("{}{}", row, name.bold()));
        } else {
            lines.push(format!("{}{}", row, name));
        }
    }

    lines.join("\n")
}

/// Highest / lowest / mean / final on one line
pub fn format_score_summary(summary: &ScoreSummary, scores: &[f64]) -> String {
    format!(
        "Highest: {}  Lowest: {}  Mean: {}  Final: {}",
        format_score(summary.highest),
        format_score(summary.lowest),
        format_score(summary.mean),
        format_final(scores, summary.final_score)
    )
}

/// Per-contestant score sheet in roster order. Contestants without scores
/// are listed too, marked as not yet scored.
pub fn format_score_sheet(contestants: &[Contestant], book: &ScoreBook, use_colors: bool) -> String {
    if contestants.is_empty() {
        return "No contestants registered.".to_string();
    }

    let mut blocks = Vec::with_capacity(contestants.len());
    for c in contestants {
        let heading = format!("{} (ID: {})", c.name, c.id);
        let heading = if use_colors {
            heading.bold().to_string()
        } else {
            heading
        };

        let body = match book.get(c.id) {
            Some(scores) => match summarize(scores) {
                Some(summary) => {
                    let judges = scores
                        .iter()
                        .enumerate()
                        .map(|(i, s)| format!("J{}: {}", i + 1, format_score(*s)))
                        .collect::<Vec<_>>()
                        .join("  ");
                    format!("  {}\n  {}", judges, format_score_summary(&summary, scores))
                }
                None => "  No judge scores recorded".to_string(),
            },
            None => {
                let msg = "  Not yet scored";
                if use_colors {
                    msg.yellow().to_string()
                } else {
                    msg.to_string()
                }
            }
        };

        blocks.push(format!("{}\n{}", heading, body));
    }

    blocks.join("\n\n")
}

/// Ranking table: position, final, highest, lowest, ID, phone, name.
/// With colors on and `podium_colors` set, the top three rows are tinted
/// gold, silver and bronze.
pub fn format_ranking_table(
    rankings: &[RankingEntry],
    use_colors: bool,
    podium_colors: bool,
) -> String {
    if rankings.is_empty() {
        return "No rankings yet. Register contestants and record judge scores first.".to_string();
    }

    let header = format!(
        "{:>4}  {:>6}  {:>6}  {:>6}  {:>4}  {:<14}  {}",
        "Rank", "Final", "High", "Low", "ID", "Phone", "Name"
    );
    let fixed_width = 4 + 6 * 3 + 4 + 14 + 2 * 6;

    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    for (idx, entry) in rankings.iter().enumerate() {
        let position = idx + 1;
        let (high, low) = match entry.summary() {
            Some(s) => (format_score(s.highest), format_score(s.lowest)),
            None => ("-".to_string(), "-".to_string()),
        };
        let row = format!(
            "{:>3}.  {:>6}  {:>6}  {:>6}  {:>4}  {:<14}  {}",
            position,
            format_final(&entry.scores, entry.final_score),
            high,
            low,
            entry.id(),
            entry.contestant.phone,
            fit_name(entry.name(), fixed_width)
        );

        let medal = Medal::for_position(position).filter(|_| use_colors && podium_colors);
        lines.push(match medal {
            Some(m) => medal_paint(&row, m),
            None => row,
        });
    }

    lines.join("\n")
}

/// Champion, runner-up and third place, as far as the ranking goes
pub fn format_podium(rankings: &[RankingEntry], use_colors: bool) -> String {
    rankings
        .iter()
        .take(3)
        .enumerate()
        .filter_map(|(idx, entry)| {
            let medal = Medal::for_position(idx + 1)?;
            let line = format!(
                "{:<12} {} ({})",
                format!("{}:", medal.title()),
                entry.name(),
                format_final(&entry.scores, entry.final_score)
            );
            Some(if use_colors { medal_paint(&line, medal) } else { line })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_distribution(title: &str, dist: &Distribution) -> String {
    let mut out = format!("{}:", title);
    for (label, count) in dist.buckets() {
        out.push_str(&format!("\n  {:<16} {}", label, count));
    }
    out
}

pub fn format_statistics(stats: &Statistics, use_colors: bool) -> String {
    let title = |t: &str| {
        if use_colors {
            t.bold().to_string()
        } else {
            t.to_string()
        }
    };

    format!(
        "{}\n  Total contestants: {}\n  Scored: {}\n  Unscored: {}\n  Average final: {}\n  Highest final: {}\n  Lowest final: {}\n\n{}\n\n{}\n\n{}",
        title("Overview"),
        stats.total_contestants,
        stats.scored_contestants,
        stats.unscored_contestants,
        format_score(stats.average_score),
        format_score(stats.highest_score),
        format_score(stats.lowest_score),
        format_distribution(&title("Gender"), &stats.gender_distribution),
        format_distribution(&title("Province"), &stats.province_distribution),
        format_distribution(&title("Class"), &stats.class_distribution),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::build_rankings;
    use crate::stats::build_statistics;

    fn sample_roster() -> Vec<Contestant> {
        let mut bob = Contestant::new(2, "Bob", "13900000002");
        bob.gender = Some("male".to_string());
        vec![
            Contestant::new(1, "Alice", "13900000001"),
            bob,
            Contestant::new(3, "Carol", "13900000003"),
        ]
    }

    fn sample_book() -> ScoreBook {
        let mut book = ScoreBook::new();
        book.set(1, vec![70.0, 80.0, 90.0]);
        book.set(2, vec![85.0, 95.0, 90.0]);
        book
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(80.625), "80.6");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(-0.0), "0.0");
    }

    #[test]
    fn test_format_final_sentinel() {
        assert_eq!(format_final(&[1.0, 2.0], 0.0), "n/a");
        assert_eq!(format_final(&[0.0, 0.0, 0.0], 0.0), "0.0");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("A very long contestant name", 10), "A very ...");
        assert_eq!(truncate_name("王小明同学", 3), "王小明");
    }

    #[test]
    fn test_roster_table_empty() {
        assert_eq!(format_roster_table(&[], false), "No contestants registered.");
    }

    #[test]
    fn test_roster_table_rows() {
        let result = format_roster_table(&sample_roster(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Phone"));
        assert!(lines[1].contains("Alice"));
        assert!(lines[1].contains("unknown"));
        assert!(lines[2].contains("male"));
    }

    #[test]
    fn test_score_sheet_marks_unscored() {
        let result = format_score_sheet(&sample_roster(), &sample_book(), false);
        assert!(result.contains("Alice (ID: 1)"));
        assert!(result.contains("J1: 70.0"));
        assert!(result.contains("Final: 80.0"));
        assert!(result.contains("Carol (ID: 3)\n  Not yet scored"));
    }

    #[test]
    fn test_ranking_table_order_and_positions() {
        let rankings = build_rankings(&sample_roster(), &sample_book());
        let result = format_ranking_table(&rankings, false, true);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  1."));
        assert!(lines[1].contains("Bob"));
        assert!(lines[1].contains("90.0"));
        assert!(lines[2].starts_with("  2."));
        assert!(lines[2].contains("Alice"));
    }

    #[test]
    fn test_ranking_table_empty() {
        assert!(format_ranking_table(&[], false, true).starts_with("No rankings yet"));
    }

    #[test]
    fn test_podium() {
        let rankings = build_rankings(&sample_roster(), &sample_book());
        let result = format_podium(&rankings, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Champion:"));
        assert!(lines[0].contains("Bob (90.0)"));
        assert!(lines[1].starts_with("Runner-up:"));
    }

    #[test]
    fn test_statistics_text() {
        let roster = sample_roster();
        let book = sample_book();
        let rankings = build_rankings(&roster, &book);
        let stats = build_statistics(&roster, &book, &rankings);

        let result = format_statistics(&stats, false);
        assert!(result.contains("Total contestants: 3"));
        assert!(result.contains("Unscored: 1"));
        assert!(result.contains("Highest final: 90.0"));
        assert!(result.contains("Average final: 85.0"));
        assert!(result.contains("Gender:"));
    }
}
