pub mod export;
pub mod formatter;

pub use export::{
    default_export_path, format_ranking_tsv, format_roster_tsv, format_score_sheet_tsv,
    write_export, ExportKind,
};
pub use formatter::{
    format_final, format_podium, format_ranking_table, format_roster_table, format_score,
    format_score_sheet, format_score_summary, format_statistics, should_use_colors,
};
