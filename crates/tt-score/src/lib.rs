// Event debouncing and rally scoring for rallyscore.

pub mod error;
pub mod machine;
pub mod peak;

pub use error::ScoreError;
pub use machine::RallyScorer;
