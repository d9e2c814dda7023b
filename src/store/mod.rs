pub mod storage;
pub mod types;

pub use storage::{Loaded, Repository, StoreError, CONTESTANTS_FILE, SCORES_FILE};
pub use types::{Contestant, ScoreBook, UNKNOWN_LABEL};
