#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Subdivision;

/// Time signature of a bar.
///
/// Patterns are authored in 4/4 only; the type is kept explicit so the step
/// arithmetic reads as musical arithmetic instead of bare constants.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (4 = quarter)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Beats per bar. For 4/4 this is 4 quarter notes.
    pub fn beats_per_bar(&self) -> usize {
        self.numerator as usize
    }

    /// Number of grid steps in one bar at the given subdivision.
    ///
    /// 4/4 in eighths = 4 beats * 2 = 8 steps, in sixteenths = 16 steps.
    pub fn steps_per_bar(&self, subdivision: Subdivision) -> usize {
        self.beats_per_bar() * subdivision.steps_per_beat()
    }

    /// Whether the engine can play this meter.
    pub fn is_supported(&self) -> bool {
        *self == Self::FOUR_FOUR
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}
