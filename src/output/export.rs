//! Tab-separated reports that open directly in a spreadsheet.
//!
//! Unlike the terminal tables these carry a header row and never colors or
//! truncation.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ranking::RankingEntry;
use crate::scoring::summarize;
use crate::store::{Contestant, ScoreBook};

use super::formatter::{format_final, format_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportKind {
    /// Contestant roster with demographics
    Roster,
    /// One column per judge plus highest/lowest/mean/final
    Scores,
    /// Ranking table with position and score statistics
    Ranking,
}

impl ExportKind {
    fn file_stem(self) -> &'static str {
        match self {
            ExportKind::Roster => "roster",
            ExportKind::Scores => "scores",
            ExportKind::Ranking => "ranking",
        }
    }
}

/// Default export file name, e.g. `ranking-20261019-120000.tsv`
pub fn default_export_path(kind: ExportKind, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}-{}.tsv",
        kind.file_stem(),
        now.format("%Y%m%d-%H%M%S")
    ))
}

/// Tabs or newlines inside a cell would shift the columns
fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn opt_cell(value: Option<&str>) -> String {
    value.map(cell).unwrap_or_default()
}

fn contestant_cells(c: &Contestant) -> Vec<String> {
    vec![
        c.id.to_string(),
        cell(&c.name),
        cell(&c.phone),
        opt_cell(c.gender.as_deref()),
        opt_cell(c.age.as_deref()),
        opt_cell(c.class_name.as_deref()),
        opt_cell(c.school.as_deref()),
        opt_cell(c.province.as_deref()),
        opt_cell(c.city.as_deref()),
    ]
}

const CONTESTANT_COLUMNS: [&str; 9] = [
    "ID", "Name", "Phone", "Gender", "Age", "Class", "School", "Province", "City",
];

fn join_rows(rows: Vec<Vec<String>>) -> String {
    rows.into_iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_roster_tsv(contestants: &[Contestant]) -> String {
    let mut rows = vec![CONTESTANT_COLUMNS.iter().map(|s| s.to_string()).collect()];
    rows.extend(contestants.iter().map(contestant_cells));
    join_rows(rows)
}

/// Score sheet with `judges` score columns. Shorter lists leave trailing
/// cells blank; unscored contestants get an empty row after their name.
pub fn format_score_sheet_tsv(contestants: &[Contestant], book: &ScoreBook, judges: usize) -> String {
    let widest = contestants
        .iter()
        .filter_map(|c| book.get(c.id).map(<[f64]>::len))
        .max()
        .unwrap_or(0)
        .max(judges);

    let mut header = vec!["ID".to_string(), "Name".to_string()];
    header.extend((1..=widest).map(|i| format!("Judge {}", i)));
    header.extend(["Highest", "Lowest", "Mean", "Final"].map(String::from));

    let mut rows = vec![header];
    for c in contestants {
        let mut row = vec![c.id.to_string(), cell(&c.name)];
        let scores = book.get(c.id).unwrap_or(&[]);
        row.extend((0..widest).map(|i| scores.get(i).map(|s| format_score(*s)).unwrap_or_default()));
        match summarize(scores) {
            Some(s) => row.extend([
                format_score(s.highest),
                format_score(s.lowest),
                format_score(s.mean),
                format_final(scores, s.final_score),
            ]),
            None => row.extend(std::iter::repeat(String::new()).take(4)),
        }
        rows.push(row);
    }

    join_rows(rows)
}

pub fn format_ranking_tsv(rankings: &[RankingEntry]) -> String {
    let mut header = vec!["Rank".to_string()];
    header.extend(CONTESTANT_COLUMNS.iter().map(|s| s.to_string()));
    header.extend(["Judges", "Highest", "Lowest", "Mean", "Final"].map(String::from));

    let mut rows = vec![header];
    for (idx, entry) in rankings.iter().enumerate() {
        let mut row = vec![(idx + 1).to_string()];
        row.extend(contestant_cells(&entry.contestant));
        row.push(entry.scores.len().to_string());
        match entry.summary() {
            Some(s) => row.extend([
                format_score(s.highest),
                format_score(s.lowest),
                format_score(s.mean),
            ]),
            None => row.extend(std::iter::repeat(String::new()).take(3)),
        }
        row.push(format_final(&entry.scores, entry.final_score));
        rows.push(row);
    }

    join_rows(rows)
}

/// Write an export atomically, with a trailing newline
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::build_rankings;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn roster() -> Vec<Contestant> {
        let mut alice = Contestant::new(1, "Alice", "138");
        alice.province = Some("Hubei".to_string());
        alice.age = Some("16".to_string());
        vec![alice, Contestant::new(2, "Bob\tB", "139")]
    }

    #[test]
    fn test_default_export_path() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 5).unwrap();
        assert_eq!(
            default_export_path(ExportKind::Ranking, now),
            PathBuf::from("ranking-20261019-120005.tsv")
        );
    }

    #[test]
    fn test_roster_tsv() {
        let result = format_roster_tsv(&roster());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split('\t').count(), 9);
        assert_eq!(lines[1], "1\tAlice\t138\t\t16\t\t\tHubei\t");
        // Embedded tab is flattened, column count unchanged
        assert_eq!(lines[2].split('\t').count(), 9);
        assert!(lines[2].contains("Bob B"));
    }

    #[test]
    fn test_score_sheet_tsv() {
        let mut book = ScoreBook::new();
        book.set(1, vec![50.0, 70.0, 90.0]);

        let result = format_score_sheet_tsv(&roster(), &book, 3);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(
            lines[0],
            "ID\tName\tJudge 1\tJudge 2\tJudge 3\tHighest\tLowest\tMean\tFinal"
        );
        assert_eq!(lines[1], "1\tAlice\t50.0\t70.0\t90.0\t90.0\t50.0\t70.0\t70.0");
        assert_eq!(lines[2], "2\tBob B\t\t\t\t\t\t\t");
    }

    #[test]
    fn test_score_sheet_tsv_widens_for_long_lists() {
        let mut book = ScoreBook::new();
        book.set(1, vec![1.0, 2.0, 3.0, 4.0]);
        let result = format_score_sheet_tsv(&roster(), &book, 3);
        assert!(result.lines().next().unwrap().contains("Judge 4"));
    }

    #[test]
    fn test_ranking_tsv() {
        let mut book = ScoreBook::new();
        book.set(1, vec![50.0, 70.0, 90.0]);
        book.set(2, vec![60.0, 62.0]);
        let rankings = build_rankings(&roster(), &book);

        let result = format_ranking_tsv(&rankings);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Rank\tID\tName"));
        assert!(lines[1].starts_with("1\t1\tAlice"));
        assert!(lines[1].ends_with("\t3\t90.0\t50.0\t70.0\t70.0"));
        assert!(lines[2].ends_with("\t2\t62.0\t60.0\t61.0\tn/a"));
    }

    #[test]
    fn test_write_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.tsv");
        write_export(&path, "a\tb").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\tb\n");
    }
}
