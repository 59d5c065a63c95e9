//! Per-exercise progress and the unlock gate.
//!
//! Storage is behind [`ProgressStore`]; only an in-memory store ships here.

use std::{collections::HashMap, time::SystemTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Best results for one exercise.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseProgress {
    pub exercise_id: String,
    /// Best star count ever earned, 0..=3.
    pub stars: u8,
    /// Best accuracy ever reached, 0..=100.
    pub best_accuracy: u8,
    pub attempts: u32,
    pub last_practiced: SystemTime,
}

pub trait ProgressStore {
    fn get(&self, exercise_id: &str) -> Option<&ExerciseProgress>;

    /// Record an attempt. Stars and accuracy only ever go up.
    fn record(&mut self, exercise_id: &str, stars: u8, accuracy: u8, at: SystemTime) -> &ExerciseProgress;

    fn stars(&self, exercise_id: &str) -> u8 {
        self.get(exercise_id).map_or(0, |p| p.stars)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProgress {
    entries: HashMap<String, ExerciseProgress>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of best stars over `exercise_ids`.
    pub fn total_stars<'a>(&self, exercise_ids: impl IntoIterator<Item = &'a str>) -> u32 {
        exercise_ids
            .into_iter()
            .map(|id| self.stars(id) as u32)
            .sum()
    }
}

impl ProgressStore for InMemoryProgress {
    fn get(&self, exercise_id: &str) -> Option<&ExerciseProgress> {
        self.entries.get(exercise_id)
    }

    fn record(&mut self, exercise_id: &str, stars: u8, accuracy: u8, at: SystemTime) -> &ExerciseProgress {
        let entry = self
            .entries
            .entry(exercise_id.to_string())
            .or_insert_with(|| ExerciseProgress {
                exercise_id: exercise_id.to_string(),
                stars: 0,
                best_accuracy: 0,
                attempts: 0,
                last_practiced: at,
            });

        entry.stars = entry.stars.max(stars.min(3));
        entry.best_accuracy = entry.best_accuracy.max(accuracy.min(100));
        entry.attempts += 1;
        entry.last_practiced = at;
        log::debug!(
            "progress {exercise_id}: {} stars, best {}%, {} attempts",
            entry.stars,
            entry.best_accuracy,
            entry.attempts
        );
        entry
    }
}

/// Whether `exercise_id` may be played.
///
/// The first exercise in `ordered_ids` is always open. Every other one opens
/// once its predecessor has at least `min_stars`. Ids not in the list are
/// locked.
pub fn is_unlocked(
    store: &impl ProgressStore,
    exercise_id: &str,
    ordered_ids: &[&str],
    min_stars: u8,
) -> bool {
    match ordered_ids.iter().position(|id| *id == exercise_id) {
        None => false,
        Some(0) => true,
        Some(index) => store.stars(ordered_ids[index - 1]) >= min_stars,
    }
}
