pub mod mood;
pub mod record;

pub use mood::{Mood, classify_query_score, classify_stored_score, normalize_query_score};
pub use record::{EmotionRecord, QueryResultPoint, ScoredPoint, parse_number};
