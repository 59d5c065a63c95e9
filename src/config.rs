//! Engine tuning.
//!
//! Every section has working defaults, so a config file only needs to name
//! the values it changes:
//!
//! ```toml
//! [scheduler]
//! lookahead_ms = 120
//!
//! [scoring]
//! groove_window_ms = 300
//!
//! [input.keys]
//! kick = "d"
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::{Error, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub scoring: ScoringTuning,
    pub input: InputConfig,
    pub synth: SynthConfig,
}

#[cfg(feature = "serde")]
impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        toml::from_str(&source)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))
    }
}

/// Lookahead scheduler timing, in milliseconds on the audio clock.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// How far ahead of the clock each poll schedules steps.
    pub lookahead_ms: u64,
    /// How often the host should call `poll`.
    pub poll_interval_ms: u64,
    /// Delay between `start` and the first step.
    pub start_offset_ms: u64,
    /// A next step further than this in the past re-anchors the timeline.
    pub max_catch_up_ms: u64,
    /// Queue depth of each step-event subscription.
    pub subscriber_capacity: usize,
}

impl SchedulerConfig {
    pub fn lookahead(&self) -> f64 {
        ms_to_secs(self.lookahead_ms)
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn start_offset(&self) -> f64 {
        ms_to_secs(self.start_offset_ms)
    }

    pub fn max_catch_up(&self) -> f64 {
        ms_to_secs(self.max_catch_up_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lookahead_ms: 100,
            poll_interval_ms: 25,
            start_offset_ms: 50,
            max_catch_up_ms: 1_000,
            subscriber_capacity: 64,
        }
    }
}

/// Timing windows and loop count for the scoring engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTuning {
    /// Acceptance window after a step boundary for groove-style exercises.
    pub groove_window_ms: u64,
    /// Wider window for pure timing exercises.
    pub timing_window_ms: u64,
    /// Loops of the pattern graded before a result is produced.
    pub loops_to_score: u32,
}

impl ScoringTuning {
    pub fn groove_window(&self) -> f64 {
        ms_to_secs(self.groove_window_ms)
    }

    pub fn timing_window(&self) -> f64 {
        ms_to_secs(self.timing_window_ms)
    }
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            groove_window_ms: 350,
            timing_window_ms: 450,
            loops_to_score: 4,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    /// How long the last-hit indicator stays lit.
    pub feedback_ms: u64,
    /// Whether a press of a key that was never released is a repeat.
    pub track_release: bool,
    pub keys: KeyBindings,
}

impl InputConfig {
    pub fn feedback(&self) -> f64 {
        ms_to_secs(self.feedback_ms)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 150,
            track_release: false,
            keys: KeyBindings::default(),
        }
    }
}

/// Single characters bound to each drum. Matching ignores case.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub kick: String,
    pub snare: String,
    pub hihat: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            kick: "f".to_string(),
            snare: "j".to_string(),
            hihat: " ".to_string(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    /// Depth of each trigger queue into the drum rack.
    pub queue_capacity: usize,
    /// Output gain applied to the summed voices.
    pub master_gain: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            master_gain: 0.8,
        }
    }
}

fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1_000.0
}
