use clap::{Parser, Subcommand};
use contest_rank::app::{App, AppError};
use contest_rank::output::{self, ExportKind};
use contest_rank::roster::NewContestant;
use contest_rank::scoring::summarize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new contestant
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long = "class")]
        class_name: Option<String>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        province: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// List registered contestants (default if no subcommand)
    List,
    /// Record judge scores for a contestant, replacing any earlier ones
    Score {
        /// Contestant id as shown by `list`
        id: u32,
        /// One score per judge, in judge order
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        scores: Vec<f64>,
    },
    /// Show every contestant's judge scores and final score
    Scores,
    /// Rank scored contestants by final score
    Rank,
    /// Show counts, score extremes and demographic distributions
    Stats,
    /// Write a report as a tab-separated file
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
        /// Output file (defaults to <kind>-<timestamp>.tsv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "contest-rank")]
#[command(about = "Contest scoring and ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/contest-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding contestants.json and scores.json
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "contest_rank=debug"
    } else {
        "contest_rank=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::Roster(_) | AppError::Scores(_) => EXIT_REJECTED,
        AppError::Store(_) | AppError::CorruptStore(_) => EXIT_STORAGE,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::List);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match contest_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    // Validate config at startup
    if let Err(errors) = contest_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let app = App::from_config(config);
    tracing::debug!("data directory: {}", app.repo.data_dir().display());

    let use_colors = output::should_use_colors();

    match command {
        Commands::Add {
            name,
            phone,
            gender,
            age,
            class_name,
            school,
            province,
            city,
        } => {
            let new = NewContestant {
                name,
                phone,
                gender,
                age,
                class_name,
                school,
                province,
                city,
            };
            match app.add_contestant(new) {
                Ok(c) => println!("Added contestant {} (ID: {})", c.name, c.id),
                Err(e) => {
                    eprintln!("Could not add contestant: {}", e);
                    std::process::exit(exit_code(&e));
                }
            }
        }
        Commands::List => {
            println!(
                "{}",
                output::format_roster_table(&app.contestants(), use_colors)
            );
        }
        Commands::Score { id, scores } => match app.record_scores(id, scores) {
            Ok(contestant) => {
                println!("Saved scores for {} (ID: {})", contestant.name, contestant.id);
                let book = app.score_book();
                if let Some(saved) = book.get(id) {
                    if let Some(summary) = summarize(saved) {
                        println!("{}", output::format_score_summary(&summary, saved));
                    }
                }
            }
            Err(e) => {
                eprintln!("Could not save scores: {}", e);
                std::process::exit(exit_code(&e));
            }
        },
        Commands::Scores => {
            println!(
                "{}",
                output::format_score_sheet(&app.contestants(), &app.score_book(), use_colors)
            );
        }
        Commands::Rank => {
            let rankings = app.rankings();
            println!(
                "{}",
                output::format_ranking_table(&rankings, use_colors, app.config.podium_colors())
            );
            if !rankings.is_empty() {
                println!();
                println!("{}", output::format_podium(&rankings, use_colors));
            }
        }
        Commands::Stats => {
            println!("{}", output::format_statistics(&app.statistics(), use_colors));
        }
        Commands::Export { kind, output: path } => {
            let contents = match kind {
                ExportKind::Roster => output::format_roster_tsv(&app.contestants()),
                ExportKind::Scores => output::format_score_sheet_tsv(
                    &app.contestants(),
                    &app.score_book(),
                    app.score_rules().judges,
                ),
                ExportKind::Ranking => output::format_ranking_tsv(&app.rankings()),
            };
            let path =
                path.unwrap_or_else(|| output::default_export_path(kind, chrono::Local::now()));

            if let Err(e) = output::write_export(&path, &contents) {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
            println!("Wrote {}", path.display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
