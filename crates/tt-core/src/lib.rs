// Shared types, configuration, and errors for rallyscore.

pub mod config;
pub mod error;
pub mod types;

pub use config::ScoreConfig;
pub use error::CoreError;
pub use types::{ClassificationSample, Label, Outcome, Winner};
