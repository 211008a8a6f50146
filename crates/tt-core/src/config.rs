use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for event debouncing and rally scoring.
///
/// Serializable as TOML. Defaults are the values tuned against a 16 kHz
/// classifier with 2048-sample half-overlapping windows; every field can
/// be overridden from a config file.
///
/// # Example
/// ```
/// use tt_core::config::ScoreConfig;
/// let config = ScoreConfig::default();
/// assert_eq!(config.cooldown_ms, 5000);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoreConfig {
    // === Ping debouncing ===
    /// Minimum gap since the last accepted ping before a new candidate
    /// run may open (ms).
    pub ping_debounce_ms: i64,
    /// A candidate ping run longer than this many samples is noise.
    pub ping_run_max: usize,
    /// A ping arriving more than this long after the previous one is an
    /// unrelated hit (ms).
    pub ping_gap_max_ms: i64,
    /// At least one sample of a ping run must clear this confidence.
    pub ping_floor: f32,

    // === Pong debouncing ===
    /// At least one sample of a pong run must clear this confidence.
    pub pong_floor: f32,
    /// A pong is only honored this soon after the last ping once the
    /// rally is underway (ms).
    pub pong_window_ms: i64,

    // === Talk ===
    /// Consecutive talk windows before a talk notice fires.
    pub talk_run_len: u32,

    // === Rally resolution ===
    /// Both sounds silent for this long resolves the rally (ms).
    pub rally_silence_ms: i64,
    /// Two pings closer than this are a same-side double touch (ms).
    pub double_touch_ms: i64,
    /// Pause after a point is awarded; everything is ignored meanwhile (ms).
    pub cooldown_ms: i64,
    /// Synthesize the opening serve when the first event of a rally is a
    /// bounce. The serve's own sound is easily masked by the hall.
    pub infer_opening_serve: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            ping_debounce_ms: 100,
            ping_run_max: 4,
            ping_gap_max_ms: 2000,
            ping_floor: 0.4,
            pong_floor: 0.5,
            pong_window_ms: 1500,
            talk_run_len: 4,
            rally_silence_ms: 2000,
            double_touch_ms: 300,
            cooldown_ms: 5000,
            infer_opening_serve: true,
        }
    }
}

impl ScoreConfig {
    /// Clamp all fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.ping_debounce_ms = self.ping_debounce_ms.max(0);
        self.ping_run_max = self.ping_run_max.max(1);
        self.ping_gap_max_ms = self.ping_gap_max_ms.max(0);
        self.ping_floor = self.ping_floor.clamp(0.0, 1.0);
        self.pong_floor = self.pong_floor.clamp(0.0, 1.0);
        self.pong_window_ms = self.pong_window_ms.max(0);
        self.talk_run_len = self.talk_run_len.max(1);
        self.rally_silence_ms = self.rally_silence_ms.max(0);
        self.double_touch_ms = self.double_touch_ms.max(0);
        self.cooldown_ms = self.cooldown_ms.max(0);
    }
}

/// Optional-field mirror of `ScoreConfig` for partial TOML files.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    scoring: ScoringSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScoringSection {
    ping_debounce_ms: Option<i64>,
    ping_run_max: Option<usize>,
    ping_gap_max_ms: Option<i64>,
    ping_floor: Option<f32>,
    pong_floor: Option<f32>,
    pong_window_ms: Option<i64>,
    talk_run_len: Option<u32>,
    rally_silence_ms: Option<i64>,
    double_touch_ms: Option<i64>,
    cooldown_ms: Option<i64>,
    infer_opening_serve: Option<bool>,
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use tt_core::config::load_score_config;
/// use std::path::Path;
/// let config = load_score_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_score_config(path: &Path) -> Result<ScoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("TOML parse error in {}", path.display()))?;

    let mut config = ScoreConfig::default();
    let s = file.scoring;

    if let Some(v) = s.ping_debounce_ms {
        config.ping_debounce_ms = v;
    }
    if let Some(v) = s.ping_run_max {
        config.ping_run_max = v;
    }
    if let Some(v) = s.ping_gap_max_ms {
        config.ping_gap_max_ms = v;
    }
    if let Some(v) = s.ping_floor {
        config.ping_floor = v;
    }
    if let Some(v) = s.pong_floor {
        config.pong_floor = v;
    }
    if let Some(v) = s.pong_window_ms {
        config.pong_window_ms = v;
    }
    if let Some(v) = s.talk_run_len {
        config.talk_run_len = v;
    }
    if let Some(v) = s.rally_silence_ms {
        config.rally_silence_ms = v;
    }
    if let Some(v) = s.double_touch_ms {
        config.double_touch_ms = v;
    }
    if let Some(v) = s.cooldown_ms {
        config.cooldown_ms = v;
    }
    if let Some(v) = s.infer_opening_serve {
        config.infer_opening_serve = v;
    }

    config.clamp_all();
    log::debug!("scoring config loaded from {}", path.display());
    Ok(config)
}
