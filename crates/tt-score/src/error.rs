use thiserror::Error;

/// Errors originating from the scoring module.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// A sample arrived with a timestamp earlier than one already seen.
    /// Accepting it would corrupt every debounce window, so it is rejected.
    #[error("timestamp went backwards: last seen {last_ms} ms, got {got_ms} ms")]
    NonMonotonicTimestamp {
        /// Highest timestamp processed so far.
        last_ms: i64,
        /// Timestamp of the offending sample.
        got_ms: i64,
    },
}
