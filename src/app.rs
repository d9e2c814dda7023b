use crate::config::Config;
use crate::ranking::{build_rankings, RankingEntry};
use crate::roster::{self, NewContestant, RosterError, ScoreEntryError, ScoreRules};
use crate::stats::{build_statistics, Statistics};
use crate::store::{Contestant, Loaded, Repository, ScoreBook, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Scores(#[from] ScoreEntryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Saving now would replace the unreadable file with a near-empty one
    #[error("refusing to overwrite unreadable data: {0}")]
    CorruptStore(StoreError),
}

/// Everything a command needs: configuration and the backing store.
/// Each operation is one full read (and at most one write) of the files.
pub struct App {
    pub config: Config,
    pub repo: Repository,
}

impl App {
    pub fn new(config: Config, repo: Repository) -> Self {
        Self { config, repo }
    }

    /// Build from config alone, storing data under the configured directory
    pub fn from_config(config: Config) -> Self {
        let repo = Repository::new(config.data_dir());
        Self::new(config, repo)
    }

    pub fn score_rules(&self) -> ScoreRules {
        self.config.score_rules()
    }

    pub fn contestants(&self) -> Vec<Contestant> {
        self.repo.load_contestants().into_inner_or_default()
    }

    pub fn score_book(&self) -> ScoreBook {
        self.repo.load_scores().into_inner_or_default()
    }

    /// Register a contestant and persist the roster
    pub fn add_contestant(&self, new: NewContestant) -> Result<Contestant, AppError> {
        let mut contestants = writable(self.repo.load_contestants())?;
        let added = roster::add_contestant(&mut contestants, new)?;
        self.repo.save_contestants(&contestants)?;
        tracing::info!("added contestant {} (id {})", added.name, added.id);
        Ok(added)
    }

    /// Replace a contestant's judge scores and persist the score book.
    /// Returns the contestant the scores belong to.
    pub fn record_scores(&self, id: u32, scores: Vec<f64>) -> Result<Contestant, AppError> {
        let contestants = writable(self.repo.load_contestants())?;
        let mut book = writable(self.repo.load_scores())?;

        let previous = roster::record_scores(&mut book, &contestants, id, scores, &self.score_rules())?;
        self.repo.save_scores(&book)?;

        if previous.is_some() {
            tracing::info!("replaced scores for contestant {}", id);
        } else {
            tracing::info!("recorded scores for contestant {}", id);
        }

        contestants
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(AppError::Scores(ScoreEntryError::UnknownContestant(id)))
    }

    pub fn rankings(&self) -> Vec<RankingEntry> {
        build_rankings(&self.contestants(), &self.score_book())
    }

    pub fn statistics(&self) -> Statistics {
        let contestants = self.contestants();
        let book = self.score_book();
        let rankings = build_rankings(&contestants, &book);
        build_statistics(&contestants, &book, &rankings)
    }
}

/// Data to modify and save back. A corrupt store is an error here rather
/// than an empty start.
fn writable<T: Default>(loaded: Loaded<T>) -> Result<T, AppError> {
    match loaded {
        Loaded::Found(value) => Ok(value),
        Loaded::Absent => Ok(T::default()),
        Loaded::Corrupt(err) => Err(AppError::CorruptStore(err)),
    }
}
