use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tt_core::error::CoreError;
use tt_core::types::ClassificationSample;

/// Read a JSON Lines trace of classifier verdicts.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
/// Returns an error if a line cannot be read or parsed, with its 1-based
/// line number.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<ClassificationSample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading trace line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let sample: ClassificationSample =
            serde_json::from_str(trimmed).map_err(|e| CoreError::TraceParse {
                line: idx + 1,
                message: e.to_string(),
            })?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Load a trace from a file, or from stdin when the path is `-`.
///
/// # Errors
/// Returns an error if the file cannot be opened or the trace is invalid.
pub fn load_trace(path: &Path) -> Result<Vec<ClassificationSample>> {
    if path.as_os_str() == "-" {
        let stdin = std::io::stdin();
        return read_trace(stdin.lock());
    }
    let file =
        File::open(path).with_context(|| format!("cannot open trace {}", path.display()))?;
    read_trace(BufReader::new(file))
}
