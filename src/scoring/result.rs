use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ScoringMode;
use crate::sequencing::{DrumSet, Pattern};

/// What the pattern asked for on one step of one loop, and what was struck
/// inside the timing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    pub expected: DrumSet,
    pub actual: DrumSet,
}

impl StepRecord {
    pub fn new(expected: DrumSet) -> Self {
        Self {
            expected,
            actual: DrumSet::EMPTY,
        }
    }

    /// Whether the struck drums satisfy the step.
    ///
    /// Timing mode accepts any drum on a step that expects something.
    /// Groove mode needs every expected drum; extra drums are fine.
    pub fn is_satisfied(&self, mode: ScoringMode) -> bool {
        match mode {
            ScoringMode::Timing if !self.expected.is_empty() => !self.actual.is_empty(),
            _ => self.actual.is_superset(self.expected),
        }
    }
}

/// Loop/step keyed records of one scoring run.
pub type Records = BTreeMap<(u32, usize), StepRecord>;

/// Final grade of a run. Computed once, then cached.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringResult {
    pub total_expected_hits: u32,
    pub correct_hits: u32,
    /// 0..=100
    pub accuracy: u8,
    /// 0..=3
    pub stars: u8,
    pub feedback: String,
}

/// Integer percentage, rounded half away from zero. Zero when nothing was
/// expected.
pub fn accuracy(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = correct.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

pub fn stars_for(accuracy: u8) -> u8 {
    match accuracy {
        90.. => 3,
        70..=89 => 2,
        50..=69 => 1,
        _ => 0,
    }
}

/// Count `(total_expected, correct)` over `loops` loops of `pattern`.
///
/// Rest steps never count. In timing mode an expected slot counts once; in
/// groove mode it counts once per expected drum and is credited in full only
/// when all of them were struck.
pub fn tally(pattern: &Pattern, mode: ScoringMode, records: &Records, loops: u32) -> (u32, u32) {
    let mut total = 0;
    let mut correct = 0;

    for loop_index in 0..loops {
        for (index, step) in pattern.steps().iter().enumerate() {
            if step.hit.is_empty() {
                continue;
            }

            let weight = match mode {
                ScoringMode::Timing => 1,
                ScoringMode::Groove => step.hit.len() as u32,
            };
            total += weight;

            let satisfied = records
                .get(&(loop_index, index))
                .is_some_and(|record| record.is_satisfied(mode));
            if satisfied {
                correct += weight;
            }
        }
    }

    (total, correct)
}
