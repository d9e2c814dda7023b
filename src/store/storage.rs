use super::types::{Contestant, ScoreBook};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONTESTANTS_FILE: &str = "contestants.json";
pub const SCORES_FILE: &str = "scores.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of loading a collection.
///
/// A missing file and an unreadable file both mean "no data" to the ranking
/// code, but only the first is normal. Keeping them apart lets callers warn
/// about data loss instead of quietly starting over.
#[derive(Debug)]
pub enum Loaded<T> {
    Found(T),
    Absent,
    Corrupt(StoreError),
}

impl<T: Default> Loaded<T> {
    /// Collapse to the data, treating absent and corrupt stores as empty.
    /// Corrupt stores are logged.
    pub fn into_inner_or_default(self) -> T {
        match self {
            Loaded::Found(value) => value,
            Loaded::Absent => T::default(),
            Loaded::Corrupt(err) => {
                tracing::warn!("{err}; treating as empty");
                T::default()
            }
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Loaded::Corrupt(_))
    }
}

/// File-backed storage for the contestant roster and the score book.
///
/// Each save rewrites the whole collection. There is no locking, so two
/// concurrent read-modify-write cycles lose one of the updates.
#[derive(Debug, Clone)]
pub struct Repository {
    data_dir: PathBuf,
}

impl Repository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn contestants_path(&self) -> PathBuf {
        self.data_dir.join(CONTESTANTS_FILE)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn load_contestants(&self) -> Loaded<Vec<Contestant>> {
        load_json(&self.contestants_path())
    }

    pub fn save_contestants(&self, contestants: &[Contestant]) -> Result<(), StoreError> {
        save_json(&self.contestants_path(), contestants)
    }

    pub fn load_scores(&self) -> Loaded<ScoreBook> {
        load_json(&self.scores_path())
    }

    pub fn save_scores(&self, scores: &ScoreBook) -> Result<(), StoreError> {
        save_json(&self.scores_path(), scores)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Loaded<T> {
    if !path.exists() {
        tracing::debug!("{} not found, starting empty", path.display());
        return Loaded::Absent;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(source) => {
            return Loaded::Corrupt(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => Loaded::Found(value),
        Err(source) => Loaded::Corrupt(StoreError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write a collection as pretty JSON, atomically replacing the old file.
/// The parent directory is created if needed.
fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let mut file = AtomicWriteFile::open(path).map_err(write_err)?;

    serde_json::to_writer_pretty(&mut file, value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    // Dropping without commit discards the temporary file
    file.commit().map_err(write_err)?;

    tracing::debug!("saved {}", path.display());
    Ok(())
}
