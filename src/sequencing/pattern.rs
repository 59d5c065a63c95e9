/*
Pattern Model
=============

A pattern is one bar of drum content laid out on a grid. Timing is implicit
in position: in 4/4 with eighth-note subdivision the bar has 8 steps, and
each step is half a beat long.

    step:   1   2   3   4   5   6   7   8
    count:  1   &   2   &   3   &   4   &
    hihat:  x   x   x   x   x   x   x   x
    snare:  .   .   x   .   .   .   x   .
    kick:   x   .   .   .   x   .   .   .

Steps are numbered from 1 in authored data (that is how drummers count), but
everything at runtime (scheduler, scoring) indexes them from 0. `step(n)` is
the 1-indexed lookup, `expected(i)` the 0-indexed one.

Patterns are validated once, when built, and never mutated afterwards. Invalid
step data is a configuration error: a session cannot start without a valid
pattern.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Drum, DrumSet, TimeSignature};
use crate::{error::PatternError, MAX_BPM, MIN_BPM};

/// How finely a bar is divided into steps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subdivision {
    /// Two steps per beat: "1 & 2 & ..."
    Eighth,
    /// Four steps per beat: "1 e & a 2 e & a ..."
    Sixteenth,
}

impl Subdivision {
    pub fn steps_per_beat(self) -> usize {
        match self {
            Subdivision::Eighth => 2,
            Subdivision::Sixteenth => 4,
        }
    }

    /// Length of one step in seconds.
    ///
    /// One beat lasts `60 / bpm` seconds and is split into `steps_per_beat`
    /// equal steps. At 120 BPM in eighths: 0.5 s / 2 = 0.25 s.
    pub fn step_duration(self, bpm: f64) -> f64 {
        (60.0 / bpm) / self.steps_per_beat() as f64
    }

    /// Whether the 0-indexed step falls on a beat (quarter note).
    pub fn is_on_beat(self, index: usize) -> bool {
        index % self.steps_per_beat() == 0
    }

    /// Spoken counting label for a 0-indexed step.
    pub fn count_label(self, index: usize) -> String {
        let per_beat = self.steps_per_beat();
        let beat = index / per_beat + 1;
        match (self, index % per_beat) {
            (_, 0) => beat.to_string(),
            (Subdivision::Eighth, _) => "&".to_string(),
            (Subdivision::Sixteenth, 1) => "e".to_string(),
            (Subdivision::Sixteenth, 2) => "&".to_string(),
            (Subdivision::Sixteenth, _) => "a".to_string(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One grid position of a pattern.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStep {
    /// 1-indexed position in the bar
    pub step: usize,
    /// Counting label like "1", "&", "e", "a"
    pub count_label: String,
    /// Drums sounding on this step. Empty = rest.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit: DrumSet,
}

/// Unvalidated pattern data, as authored or deserialized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct PatternDef {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub default_tempo_bpm: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_signature: TimeSignature,
    pub subdivision: Subdivision,
    pub steps: Vec<PatternStep>,
}

impl PatternDef {
    /// Build a definition from a grid of drum lists, one entry per step.
    /// Step numbers and counting labels are derived from position.
    pub fn from_grid(
        id: &str,
        name: &str,
        difficulty: Difficulty,
        description: &str,
        default_tempo_bpm: u16,
        subdivision: Subdivision,
        grid: &[&[Drum]],
    ) -> Self {
        let steps = grid
            .iter()
            .enumerate()
            .map(|(index, drums)| PatternStep {
                step: index + 1,
                count_label: subdivision.count_label(index),
                hit: DrumSet::from(*drums),
            })
            .collect();

        Self {
            id: id.to_string(),
            name: name.to_string(),
            difficulty,
            description: description.to_string(),
            default_tempo_bpm,
            time_signature: TimeSignature::FOUR_FOUR,
            subdivision,
            steps,
        }
    }
}

/// A validated, immutable bar of drum content.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PatternDef"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: String,
    name: String,
    difficulty: Difficulty,
    description: String,
    default_tempo_bpm: u16,
    time_signature: TimeSignature,
    subdivision: Subdivision,
    steps: Vec<PatternStep>,
}

impl Pattern {
    /// Validate a definition.
    ///
    /// Checks: non-empty id, 4/4 meter, tempo inside the engine range, step
    /// count matching the subdivision, and step numbers running 1..=N in order.
    pub fn new(def: PatternDef) -> Result<Self, PatternError> {
        if def.id.is_empty() {
            return Err(PatternError::EmptyId);
        }

        if !def.time_signature.is_supported() {
            return Err(PatternError::TimeSignature {
                id: def.id,
                numerator: def.time_signature.numerator,
                denominator: def.time_signature.denominator,
            });
        }

        let bpm = def.default_tempo_bpm as f64;
        if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
            return Err(PatternError::Tempo {
                id: def.id,
                bpm: def.default_tempo_bpm,
                min: MIN_BPM as u16,
                max: MAX_BPM as u16,
            });
        }

        let expected = def.time_signature.steps_per_bar(def.subdivision);
        if def.steps.len() != expected {
            return Err(PatternError::StepCount {
                id: def.id,
                subdivision: def.subdivision,
                expected,
                found: def.steps.len(),
            });
        }

        if let Some((position, step)) = def
            .steps
            .iter()
            .enumerate()
            .find(|(position, step)| step.step != position + 1)
        {
            return Err(PatternError::StepNumber {
                id: def.id.clone(),
                position,
                expected: position + 1,
                found: step.step,
            });
        }

        Ok(Self {
            id: def.id,
            name: def.name,
            difficulty: def.difficulty,
            description: def.description,
            default_tempo_bpm: def.default_tempo_bpm,
            time_signature: def.time_signature,
            subdivision: def.subdivision,
            steps: def.steps,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_tempo_bpm(&self) -> u16 {
        self.default_tempo_bpm
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    /// Number of steps in the bar.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Find the step definition for 1-indexed step `number`.
    pub fn step(&self, number: usize) -> Option<&PatternStep> {
        number
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }

    /// Drums expected on the 0-indexed step. Out-of-range indices are rests.
    pub fn expected(&self, index: usize) -> DrumSet {
        self.steps
            .get(index)
            .map(|step| step.hit)
            .unwrap_or_default()
    }

    /// Step length in seconds at `bpm`.
    pub fn step_duration(&self, bpm: f64) -> f64 {
        self.subdivision.step_duration(bpm)
    }
}

impl TryFrom<PatternDef> for Pattern {
    type Error = PatternError;

    fn try_from(def: PatternDef) -> Result<Self, Self::Error> {
        Pattern::new(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Drum::*;

    fn boots_and_cats() -> PatternDef {
        PatternDef::from_grid(
            "boots-and-cats",
            "Boots and Cats",
            Difficulty::Easy,
            "",
            80,
            Subdivision::Eighth,
            &[
                &[Kick, HiHat],
                &[HiHat],
                &[Snare, HiHat],
                &[HiHat],
                &[Kick, HiHat],
                &[HiHat],
                &[Snare, HiHat],
                &[HiHat],
            ],
        )
    }

    #[test]
    fn step_duration_matches_formula() {
        for bpm in 40..=200 {
            let bpm = bpm as f64;
            assert_eq!(Subdivision::Eighth.step_duration(bpm), (60.0 / bpm) / 2.0);
            assert_eq!(Subdivision::Sixteenth.step_duration(bpm), (60.0 / bpm) / 4.0);
        }
        assert_eq!(Subdivision::Eighth.step_duration(120.0), 0.25);
    }

    #[test]
    fn count_labels() {
        let eighths: Vec<String> = (0..8).map(|i| Subdivision::Eighth.count_label(i)).collect();
        assert_eq!(eighths, ["1", "&", "2", "&", "3", "&", "4", "&"]);

        let sixteenths: Vec<String> = (0..8)
            .map(|i| Subdivision::Sixteenth.count_label(i))
            .collect();
        assert_eq!(sixteenths, ["1", "e", "&", "a", "2", "e", "&", "a"]);
    }

    #[test]
    fn valid_pattern_lookups() {
        let pattern = Pattern::new(boots_and_cats()).expect("valid pattern");

        assert_eq!(pattern.len(), 8);
        assert_eq!(pattern.step(1).map(|s| s.hit), Some([Kick, HiHat].into_iter().collect()));
        assert_eq!(pattern.step(3).map(|s| s.count_label.as_str()), Some("2"));
        assert!(pattern.step(0).is_none());
        assert!(pattern.step(9).is_none());
        assert!(pattern.expected(2).contains(Snare));
        assert!(pattern.expected(42).is_empty());
    }

    #[test]
    fn rejects_wrong_step_count() {
        let mut def = boots_and_cats();
        def.steps.pop();

        let err = Pattern::new(def).unwrap_err();
        assert!(matches!(err, PatternError::StepCount { expected: 8, found: 7, .. }));
    }

    #[test]
    fn rejects_non_contiguous_steps() {
        let mut def = boots_and_cats();
        def.steps[4].step = 7;

        let err = Pattern::new(def).unwrap_err();
        assert!(matches!(
            err,
            PatternError::StepNumber { position: 4, expected: 5, found: 7, .. }
        ));
    }

    #[test]
    fn rejects_unsupported_meter_and_tempo() {
        let mut def = boots_and_cats();
        def.time_signature = TimeSignature::new(3, 4);
        assert!(matches!(
            Pattern::new(def).unwrap_err(),
            PatternError::TimeSignature { .. }
        ));

        let mut def = boots_and_cats();
        def.default_tempo_bpm = 300;
        assert!(matches!(Pattern::new(def).unwrap_err(), PatternError::Tempo { .. }));
    }
}
