/*
Scoring Engine
==============

Grades captured hits against the pattern over a fixed number of loops.

    Idle ──first live step──→ Accumulating { loop } ──last loop done──→ ResultReady
      ▲                                                                    │
      └────────────────────────────── reset ───────────────────────────────┘

Live Steps
----------

The scheduler announces step boundaries up to a lookahead early. A boundary
only becomes *live* once the clock has reached its time; until then it waits
in a queue. The live step is the one a hit is graded against:

    step 3 live          step 4 live
    ├──── window ────┤   ├──── window ────┤
    │ ▲ hit: step 3  │ ▲ │      ▲ hit: step 4
    t3               │ │ t4
                     too late

A hit lands in the current live step if it comes no later than `window`
after that step's time (inclusive). Later hits are dropped. A hit is never
attributed to a step that has not yet started.

Loops are counted from a downbeat. Boundaries that arrive while idle are
skipped until step 0 goes live, so a fresh attempt started mid-bar begins
on the next bar. A loop is complete when the live step moves from the last
step to step 0.
After `loops_to_score` loops the result is computed once and cached, and
every further hit is ignored.

Modes
-----

  Groove   every expected drum must be struck; weight = drums per step
  Timing   any drum counts; weight = 1 per expected step; wider window
*/

mod feedback;
mod result;

use std::{collections::VecDeque, sync::Arc};

use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::config::ScoringTuning;
pub use feedback::{pick as pick_feedback, pool as feedback_pool};
pub use result::{accuracy, stars_for, tally, Records, ScoringResult, StepRecord};

use crate::{
    engine::StepEvent,
    error::ScoringError,
    input::HitEvent,
    sequencing::Pattern,
};

/// Slack for float noise on the window boundary.
const WINDOW_EPSILON: f64 = 1e-9;

/// How strictly drums are matched.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScoringMode {
    /// Drum identity matters.
    #[default]
    Groove,
    /// Only the rhythm matters.
    Timing,
}

impl ScoringMode {
    pub fn window(self, tuning: &ScoringTuning) -> f64 {
        match self {
            ScoringMode::Groove => tuning.groove_window(),
            ScoringMode::Timing => tuning.timing_window(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPhase {
    Idle,
    Accumulating { loop_index: u32 },
    ResultReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFeedback {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No step is live: playback is stopped, paused or not yet started.
    NotPlaying,
    /// The result is already computed.
    Finished,
    /// The hit predates the live step.
    Stale,
    /// Waiting for the first downbeat of the attempt.
    BeforeDownbeat,
}

/// What happened to a hit handed to [`ScoringEngine::record_hit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Recorded { loop_index: u32, step: usize },
    TooLate,
    Ignored(IgnoreReason),
}

pub struct ScoringEngine {
    pattern: Arc<Pattern>,
    mode: ScoringMode,
    tuning: ScoringTuning,

    pending: VecDeque<StepEvent>,
    live: Option<StepEvent>,
    last_step: Option<usize>,
    awaiting_downbeat: bool,
    loops_completed: u32,
    records: Records,
    accepted: Vec<HitEvent>,
    result: Option<ScoringResult>,
    rng: StdRng,
}

impl ScoringEngine {
    pub fn new(pattern: Arc<Pattern>, mode: ScoringMode, tuning: ScoringTuning) -> Self {
        Self::with_rng(pattern, mode, tuning, StdRng::from_entropy())
    }

    /// Deterministic feedback selection.
    pub fn with_seed(pattern: Arc<Pattern>, mode: ScoringMode, tuning: ScoringTuning, seed: u64) -> Self {
        Self::with_rng(pattern, mode, tuning, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pattern: Arc<Pattern>, mode: ScoringMode, tuning: ScoringTuning, rng: StdRng) -> Self {
        Self {
            pattern,
            mode,
            tuning,
            pending: VecDeque::new(),
            live: None,
            last_step: None,
            awaiting_downbeat: false,
            loops_completed: 0,
            records: Records::new(),
            accepted: Vec::new(),
            result: None,
            rng,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn window(&self) -> f64 {
        self.mode.window(&self.tuning)
    }

    pub fn loops_to_score(&self) -> u32 {
        self.tuning.loops_to_score.max(1)
    }

    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    pub fn phase(&self) -> ScoringPhase {
        if self.result.is_some() {
            ScoringPhase::ResultReady
        } else if self.last_step.is_none() {
            ScoringPhase::Idle
        } else {
            ScoringPhase::Accumulating {
                loop_index: self.loops_completed,
            }
        }
    }

    /// Queue a scheduled step boundary. It goes live once the clock passes it.
    pub fn observe_step(&mut self, event: StepEvent) {
        if self.result.is_none() {
            self.pending.push_back(event);
        }
    }

    /// Make every queued boundary at or before `now` live.
    pub fn advance(&mut self, now: f64) {
        while let Some(event) = self.pending.front().copied() {
            if event.time > now || self.result.is_some() {
                break;
            }
            self.pending.pop_front();
            self.enter(event);
        }
    }

    fn enter(&mut self, event: StepEvent) {
        if self.last_step.is_none() && event.step != 0 {
            self.awaiting_downbeat = true;
            self.live = None;
            return;
        }
        self.awaiting_downbeat = false;

        let last = self.pattern.len().saturating_sub(1);
        if self.last_step == Some(last) && event.step == 0 {
            self.loops_completed += 1;
            log::debug!("loop {} complete", self.loops_completed);
            if self.loops_completed >= self.loops_to_score() {
                self.finish();
                return;
            }
        }
        self.live = Some(event);
        self.last_step = Some(event.step);
    }

    fn finish(&mut self) {
        let (total, correct) = tally(&self.pattern, self.mode, &self.records, self.loops_completed);
        let accuracy = accuracy(correct, total);
        let stars = stars_for(accuracy);
        let result = ScoringResult {
            total_expected_hits: total,
            correct_hits: correct,
            accuracy,
            stars,
            feedback: feedback::pick(stars, &mut self.rng).to_string(),
        };
        log::info!(
            "scored {}: {correct}/{total} ({accuracy}%), {stars} stars",
            self.pattern.id()
        );

        self.result = Some(result);
        self.pending.clear();
        self.live = None;
    }

    /// Grade one hit against the step live at its timestamp.
    pub fn record_hit(&mut self, hit: HitEvent) -> HitOutcome {
        self.advance(hit.timestamp);
        if self.result.is_some() {
            return HitOutcome::Ignored(IgnoreReason::Finished);
        }

        let Some(live) = self.live else {
            let reason = if self.awaiting_downbeat {
                IgnoreReason::BeforeDownbeat
            } else {
                IgnoreReason::NotPlaying
            };
            return HitOutcome::Ignored(reason);
        };

        let since = hit.timestamp - live.time;
        if since < 0.0 {
            return HitOutcome::Ignored(IgnoreReason::Stale);
        }
        if since > self.window() + WINDOW_EPSILON {
            return HitOutcome::TooLate;
        }

        let loop_index = self.loops_completed;
        let expected = self.pattern.expected(live.step);
        self.records
            .entry((loop_index, live.step))
            .or_insert_with(|| StepRecord::new(expected))
            .actual
            .insert(hit.drum);
        self.accepted.push(hit);

        HitOutcome::Recorded {
            loop_index,
            step: live.step,
        }
    }

    /// Feedback for a step in the most recently completed loop. `None` when no
    /// loop is complete yet or nothing was struck on that step.
    pub fn step_feedback(&self, step: usize) -> Option<StepFeedback> {
        let loop_index = self.loops_completed.checked_sub(1)?;
        let record = self.records.get(&(loop_index, step))?;
        Some(if record.is_satisfied(self.mode) {
            StepFeedback::Correct
        } else {
            StepFeedback::Incorrect
        })
    }

    /// The cached result, available once every scored loop is complete.
    pub fn result(&self) -> Result<&ScoringResult, ScoringError> {
        self.result.as_ref().ok_or(ScoringError::NotReady {
            completed: self.loops_completed,
            required: self.loops_to_score(),
        })
    }

    /// Forget boundaries that will never sound, e.g. after a stop.
    /// Loop progress is kept.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
        self.live = None;
    }

    /// Start a new attempt. Boundaries already queued are kept; scoring
    /// picks up from the next one on step 0.
    pub fn reset(&mut self) {
        self.live = None;
        self.last_step = None;
        self.awaiting_downbeat = false;
        self.loops_completed = 0;
        self.records.clear();
        self.accepted.clear();
        self.result = None;
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Every recorded hit of the current attempt, in arrival order.
    pub fn accepted_hits(&self) -> &[HitEvent] {
        &self.accepted
    }

    pub fn live_step(&self) -> Option<usize> {
        self.live.map(|event| event.step)
    }
}
