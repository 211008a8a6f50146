use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// A trace line could not be parsed.
    #[error("trace line {line}: {message}")]
    TraceParse {
        /// 1-based line number in the trace file.
        line: usize,
        /// Parser message for the offending line.
        message: String,
    },
}
