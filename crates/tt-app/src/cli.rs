use std::path::PathBuf;

use clap::Parser;
use tt_core::error::CoreError;

/// rallyscore — table-tennis umpire for classified audio traces.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Trace of classifier verdicts, one JSON object per line. "-" reads stdin.
    #[arg(long)]
    pub trace: PathBuf,

    /// Scoring configuration TOML. Defaults to the built-in tuning.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pace samples by their timestamps instead of replaying flat out.
    #[arg(long, default_value_t = false)]
    pub realtime: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that the referenced files exist.
    ///
    /// # Errors
    /// Returns an error if the trace or config path does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trace.as_os_str() != "-" && !self.trace.exists() {
            return Err(CoreError::FileNotFound {
                path: self.trace.display().to_string(),
            }
            .into());
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(CoreError::FileNotFound {
                    path: config.display().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
