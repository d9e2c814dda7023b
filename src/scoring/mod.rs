pub mod engine;

pub use engine::{final_score, is_gradeable, summarize, ScoreSummary, MIN_GRADEABLE_SCORES};
