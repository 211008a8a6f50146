use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tt_core::types::{ClassificationSample, Outcome, Winner};
use tt_score::RallyScorer;

/// Running match score across rallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    /// Points taken by the serving side.
    pub server: u32,
    /// Points taken by the opposing side.
    pub opponent: u32,
}

impl MatchScore {
    /// Record a point award.
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Server => self.server += 1,
            Winner::Opponent => self.opponent += 1,
        }
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Server {} : {} Opponent", self.server, self.opponent)
    }
}

/// Feed the whole trace through the scorer as fast as possible.
///
/// Every committed outcome is printed with the timestamp of the sample
/// that committed it.
///
/// # Errors
/// Returns an error if the trace violates timestamp monotonicity.
pub fn run_batch(
    scorer: &mut RallyScorer,
    samples: &[ClassificationSample],
) -> Result<MatchScore> {
    let mut score = MatchScore::default();
    for sample in samples {
        let outcomes = scorer.process(sample)?;
        report(&mut score, sample.timestamp_ms, &outcomes);
    }
    Ok(score)
}

/// Feed the trace at its own pace, as the live capture would have.
///
/// A pacing thread sleeps to each sample's timestamp and hands it over a
/// channel; the scorer runs on the calling thread. The outcome sequence is
/// identical to [`run_batch`] on the same trace.
///
/// # Errors
/// Returns an error if the pacing thread cannot be spawned or the trace
/// violates timestamp monotonicity.
pub fn run_realtime(
    scorer: &mut RallyScorer,
    samples: Vec<ClassificationSample>,
) -> Result<MatchScore> {
    let (tx, rx) = flume::bounded::<ClassificationSample>(64);
    let origin = samples.first().map_or(0, |s| s.timestamp_ms);

    thread::Builder::new()
        .name("tt-replay".to_string())
        .spawn(move || {
            let start = Instant::now();
            for sample in samples {
                let offset = u64::try_from(sample.timestamp_ms - origin).unwrap_or(0);
                let due = Duration::from_millis(offset);
                let elapsed = start.elapsed();
                if due > elapsed {
                    thread::sleep(due - elapsed);
                }
                if tx.send(sample).is_err() {
                    return;
                }
            }
        })?;

    let mut score = MatchScore::default();
    for sample in rx.iter() {
        let outcomes = scorer.process(&sample)?;
        report(&mut score, sample.timestamp_ms, &outcomes);
    }
    Ok(score)
}

/// Print the committed outcomes and fold point awards into the tally.
fn report(score: &mut MatchScore, timestamp_ms: i64, outcomes: &[Outcome]) {
    for outcome in outcomes {
        println!("{timestamp_ms:>8} ms  {outcome}");
        if let Outcome::PointScored { winner } = outcome {
            score.record(*winner);
            println!("{timestamp_ms:>8} ms  score: {score}");
        }
    }
}
