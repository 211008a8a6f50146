use tt_core::config::ScoreConfig;
use tt_core::types::{ClassificationSample, Label, Outcome, Winner};

use crate::error::ScoreError;
use crate::peak;

/// Debouncing and scoring state machine for one table.
///
/// Consumes one classifier verdict per sliding window and turns the noisy
/// stream into debounced Ping/Pong/Talk events and point awards. A single
/// high-confidence window is never trusted: a run of same-label windows
/// must crest (rise then stop rising) or end on a label change before an
/// event is committed, and the run is still discarded unless one of its
/// confidences cleared the per-sound floor.
///
/// All state lives in this struct; the caller owns it and drives it one
/// sample at a time. Feeding the same sample sequence to two fresh
/// instances yields identical outcome sequences, so recorded traces
/// replay exactly.
///
/// # Example
/// ```
/// use tt_core::config::ScoreConfig;
/// use tt_score::machine::RallyScorer;
/// let scorer = RallyScorer::new(ScoreConfig::default());
/// assert_eq!(scorer.points(), (0, 0));
/// ```
pub struct RallyScorer {
    cfg: ScoreConfig,
    /// Racket hits seen this rally (the serve counts as the first).
    ping_count: u32,
    /// Table bounces seen this rally.
    pong_count: u32,
    /// Timestamp of the last accepted ping. 0 = none this rally.
    last_ping_ms: i64,
    /// Timestamp of the last accepted pong. 0 = none this rally.
    last_pong_ms: i64,
    /// Confidences of the open ping candidate run.
    ping_chances: Vec<f32>,
    /// Confidences of the open pong candidate run.
    pong_chances: Vec<f32>,
    /// Timestamp at which the open pong run started.
    pong_run_start_ms: i64,
    /// Consecutive talk windows.
    talk_run: u32,
    /// Samples are swallowed until this deadline after a point.
    cooldown_until_ms: Option<i64>,
    /// Monotonicity guard over all samples seen.
    last_seen_ms: i64,
}

impl RallyScorer {
    /// Create a scorer with the given tunables.
    #[must_use]
    pub fn new(cfg: ScoreConfig) -> Self {
        Self {
            cfg,
            ping_count: 0,
            pong_count: 0,
            last_ping_ms: 0,
            last_pong_ms: 0,
            ping_chances: Vec::new(),
            pong_chances: Vec::new(),
            pong_run_start_ms: 0,
            talk_run: 0,
            cooldown_until_ms: None,
            last_seen_ms: 0,
        }
    }

    /// Running (ping, pong) stroke counts of the open rally.
    #[must_use]
    pub fn points(&self) -> (u32, u32) {
        (self.ping_count, self.pong_count)
    }

    /// Return to the freshly-constructed state: counters, accumulators,
    /// cooldown, and the monotonicity guard. For umpire intervention or an
    /// explicit new rally; the post-point cooldown clears on its own.
    pub fn reset(&mut self) {
        self.clear_rally();
        self.cooldown_until_ms = None;
        self.last_seen_ms = 0;
    }

    /// Process one classifier verdict.
    ///
    /// Returns the debounced events committed by this sample, in emission
    /// order. Most samples commit nothing. One sample can commit several:
    /// a bounce that opens a rally also synthesizes the masked serve, and
    /// a hit that forfeits the rally carries its point award.
    ///
    /// # Errors
    /// Fails with [`ScoreError::NonMonotonicTimestamp`] when the sample's
    /// timestamp is earlier than one already processed.
    pub fn process(
        &mut self,
        sample: &ClassificationSample,
    ) -> Result<Vec<Outcome>, ScoreError> {
        let now = sample.timestamp_ms;
        if now < self.last_seen_ms {
            return Err(ScoreError::NonMonotonicTimestamp {
                last_ms: self.last_seen_ms,
                got_ms: now,
            });
        }
        self.last_seen_ms = now;

        let mut out = Vec::new();

        // Mandatory pause after a won point.
        if let Some(deadline) = self.cooldown_until_ms {
            if now < deadline {
                return Ok(out);
            }
            self.cooldown_until_ms = None;
        }

        // Both sounds went quiet for long enough: the rally is over, judge
        // it from the stroke counts instead of waiting for another hit.
        if self.last_ping_ms > 0
            && self.last_pong_ms > 0
            && now - self.last_ping_ms > self.cfg.rally_silence_ms
            && now - self.last_pong_ms > self.cfg.rally_silence_ms
        {
            if let Some(winner) = self.stale_rally_winner() {
                self.score_point(winner, now, &mut out);
                return Ok(out);
            }
            log::warn!(
                "{now} ms: rally went silent at {}:{} which determines no winner",
                self.ping_count,
                self.pong_count
            );
            out.push(Outcome::Undetermined);
            // The counts stay as they are; the sample itself still gets a
            // chance to open a new run below.
        }

        // Talk is a plain run-length trigger, independent of scoring.
        if sample.label == Label::Talk {
            self.talk_run += 1;
            if self.talk_run >= self.cfg.talk_run_len {
                self.talk_run = 0;
                log::debug!("{now} ms: talk");
                out.push(Outcome::TalkFlagged);
            }
        } else {
            self.talk_run = 0;
        }

        // Ping windows accumulate only once clear of the last accepted ping.
        if sample.label == Label::Ping && now - self.last_ping_ms > self.cfg.ping_debounce_ms {
            self.ping_chances.push(sample.confidence);
        }

        let pong_closed = self.track_pong_run(sample);

        // PONG: honored only near the serve or shortly after the last hit;
        // a bounce long after the rally's window is an unrelated ball.
        if pong_closed
            && (self.ping_count < 2 || now - self.last_ping_ms < self.cfg.pong_window_ms)
        {
            let real = self
                .pong_chances
                .iter()
                .any(|&c| c > self.cfg.pong_floor);
            if real {
                if self.ping_count == 0 && self.pong_count == 0 && self.cfg.infer_opening_serve {
                    // Opening serve: the hit itself is easily masked, but a
                    // bounce with no rally open implies one happened when
                    // the run started.
                    self.ping_count = 1;
                    self.last_ping_ms = self.pong_run_start_ms;
                    log::debug!(
                        "{now} ms: serve inferred at {} ms",
                        self.pong_run_start_ms
                    );
                    out.push(Outcome::PingDetected { points: (1, 0) });
                }
                self.pong_count += 1;
                self.last_pong_ms = now;
                log::debug!("{now} ms: pong (run started {} ms)", self.pong_run_start_ms);
                out.push(Outcome::PongDetected);
            }
            self.pong_chances.clear();
        }

        // PING: the decision is deferred to the first window after the run,
        // and only a confident non-ping window may close it.
        if sample.label != Label::Ping
            && sample.confidence > self.cfg.ping_floor
            && !self.ping_chances.is_empty()
        {
            let real = self.ping_chances.iter().any(|&c| c > self.cfg.ping_floor);
            let too_long = self.ping_chances.len() > self.cfg.ping_run_max;
            let too_late = now - self.last_ping_ms > self.cfg.ping_gap_max_ms;
            self.ping_chances.clear();
            if !real || too_long || too_late {
                return Ok(out);
            }
            out.push(Outcome::PingDetected {
                points: (self.ping_count + 1, self.pong_count),
            });
            log::debug!(
                "{now} ms: ping (points {}:{})",
                self.ping_count + 1,
                self.pong_count
            );
            // Two touches under 300 ms apart came from the same side, so
            // the point is forfeit no matter how the rally was going. The
            // parity is judged before the increment, which shifts the
            // winner table by one.
            if now - self.last_ping_ms < self.cfg.double_touch_ms
                && self.ping_count > 2
                && self.ping_count != self.pong_count
            {
                let winner = if self.ping_count % 2 == 1 {
                    Winner::Opponent
                } else {
                    Winner::Server
                };
                self.score_point(winner, now, &mut out);
                return Ok(out);
            }
            self.ping_count += 1;
            self.last_ping_ms = now;
            // A second touch by the serving side before the return bounce
            // is an illegal serve.
            if self.ping_count == 2 && self.pong_count != 2 {
                self.score_point(Winner::Opponent, now, &mut out);
                return Ok(out);
            }
            if self.ping_count > 2 && self.ping_count != self.pong_count {
                let winner = if self.ping_count % 2 == 1 {
                    Winner::Server
                } else {
                    Winner::Opponent
                };
                self.score_point(winner, now, &mut out);
                return Ok(out);
            }
        }

        Ok(out)
    }

    /// Track the pong candidate run, returning whether this sample closed it.
    ///
    /// A run closes when a non-pong window arrives, or once it holds more
    /// than two samples and the new confidence rises above the previous
    /// one again (the run had crested and this is a fresh transient). The
    /// peak scan only tells the two cases apart for diagnostics; the close
    /// rule is the trailing-rise test either way.
    fn track_pong_run(&mut self, sample: &ClassificationSample) -> bool {
        if sample.label != Label::Pong {
            return !self.pong_chances.is_empty();
        }
        if self.pong_chances.is_empty() {
            self.pong_run_start_ms = sample.timestamp_ms;
        }
        let mut closed = false;
        if self.pong_chances.len() > 2 {
            if let Some(i) = peak::first_peak(&self.pong_chances) {
                log::trace!(
                    "pong run crested at sample {i} ({} windows so far)",
                    self.pong_chances.len()
                );
            }
            if self.pong_chances[self.pong_chances.len() - 1] < sample.confidence {
                closed = true;
            }
        }
        self.pong_chances.push(sample.confidence);
        closed
    }

    /// Judge a rally that ended by silence from its stroke counts.
    fn stale_rally_winner(&self) -> Option<Winner> {
        // The serve was never legally returned.
        if self.ping_count == 1 && self.pong_count != 2 {
            return Some(Winner::Opponent);
        }
        if self.ping_count > 2 {
            let winner = if self.ping_count % 2 == 1 {
                Winner::Server
            } else {
                Winner::Opponent
            };
            // The equal-count and unequal-count cases resolve identically
            // for a given parity today. They are kept as separate arms
            // pending a ruling on whether equal counts should differ.
            if self.ping_count == self.pong_count {
                return Some(winner);
            }
            return Some(winner);
        }
        None
    }

    /// Award a point, wipe the rally, and arm the post-point pause.
    fn score_point(&mut self, winner: Winner, now: i64, out: &mut Vec<Outcome>) {
        log::info!("{now} ms: point for {winner}");
        out.push(Outcome::PointScored { winner });
        self.clear_rally();
        self.cooldown_until_ms = Some(now + self.cfg.cooldown_ms);
    }

    /// Wipe all per-rally state. Invoked from every resolution branch.
    fn clear_rally(&mut self) {
        self.ping_count = 0;
        self.pong_count = 0;
        self.last_ping_ms = 0;
        self.last_pong_ms = 0;
        self.ping_chances.clear();
        self.pong_chances.clear();
        self.pong_run_start_ms = 0;
        self.talk_run = 0;
    }
}
