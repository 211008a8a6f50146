use std::fmt;

use serde::{Deserialize, Serialize};

/// Sound class reported by the external classifier for one analysis window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Background noise, nothing of interest.
    Silence,
    /// Racket hit (the sharper of the two transients).
    Ping,
    /// Table bounce.
    Pong,
    /// Human speech near the table.
    Talk,
}

impl Label {
    /// Map the classifier's numeric class id to a label.
    ///
    /// The upstream SVM emits float labels: 1.0 silence, 2.0 ping,
    /// 3.0 pong, 4.0 talk. Anything else is an unknown class.
    #[must_use]
    pub fn from_class_id(id: f32) -> Option<Self> {
        match id as i32 {
            1 => Some(Self::Silence),
            2 => Some(Self::Ping),
            3 => Some(Self::Pong),
            4 => Some(Self::Talk),
            _ => None,
        }
    }
}

/// One classifier verdict for one sliding window.
///
/// Produced externally, roughly every half window. `timestamp_ms` must be
/// monotonically non-decreasing within a rally; the scorer rejects
/// regressions instead of corrupting its debounce windows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSample {
    /// Winning sound class for the window.
    pub label: Label,
    /// Fraction of the window's sub-frames that voted for the label [0.0, 1.0].
    pub confidence: f32,
    /// Milliseconds since the start of the recording or the match.
    pub timestamp_ms: i64,
}

/// Side awarded a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Server,
    Opponent,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "Server"),
            Self::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Discrete event emitted by the scorer, intended for a status display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A debounced racket hit. `points` is the running ping:pong stroke
    /// count after this hit.
    PingDetected {
        /// (ping strokes, pong bounces) after this hit.
        points: (u32, u32),
    },
    /// A debounced table bounce.
    PongDetected,
    /// Sustained talking near the table.
    TalkFlagged,
    /// The rally ended and a point was awarded.
    PointScored {
        /// Side that takes the point.
        winner: Winner,
    },
    /// The rally went silent but the stroke counts determine no winner.
    Undetermined,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PingDetected { points: (p, q) } => write!(f, "Ping (points {p}:{q})"),
            Self::PongDetected => write!(f, "Pong"),
            Self::TalkFlagged => write!(f, "Talk"),
            Self::PointScored { winner } => write!(f, "Point for {winner}"),
            Self::Undetermined => write!(f, "Rally could not be determined"),
        }
    }
}
