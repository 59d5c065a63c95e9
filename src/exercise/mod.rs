//! Exercises wrap a pattern with a tempo and a goal; levels order them.

use std::sync::{Arc, OnceLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    progress::{self, ProgressStore},
    scoring::ScoringMode,
    sequencing::{Catalog, Pattern},
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    Groove,
    Fill,
    Timing,
    Song,
}

impl ExerciseKind {
    /// Timing exercises grade rhythm only; everything else grades drums too.
    pub fn scoring_mode(self) -> ScoringMode {
        match self {
            ExerciseKind::Timing => ScoringMode::Timing,
            ExerciseKind::Groove | ExerciseKind::Fill | ExerciseKind::Song => ScoringMode::Groove,
        }
    }
}

/// Where an exercise gets its pattern from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// Id in the pattern catalog.
    Catalog(String),
    Inline(Arc<Pattern>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub level: u32,
    pub kind: ExerciseKind,
    pub counting: String,
    pub tempo_bpm: u16,
    pub duration_bars: u32,
    pub source: PatternSource,
}

impl Exercise {
    /// The one pattern this exercise plays. A catalog reference that does
    /// not resolve is an error.
    pub fn resolve_pattern(&self, catalog: &Catalog) -> Result<Arc<Pattern>> {
        match &self.source {
            PatternSource::Inline(pattern) => Ok(Arc::clone(pattern)),
            PatternSource::Catalog(id) => catalog.require(id).cloned().map(Arc::new),
        }
    }

    pub fn scoring_mode(&self) -> ScoringMode {
        self.kind.scoring_mode()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub id: String,
    pub number: u32,
    pub name: String,
    pub description: String,
    /// Exercise ids in teaching order.
    pub exercise_ids: Vec<String>,
    /// Stars an exercise needs before the next one opens.
    pub unlock_stars: u8,
}

impl Level {
    /// Beginners progress more slowly: level 1 asks for two stars.
    pub fn default_unlock_stars(number: u32) -> u8 {
        if number == 1 {
            2
        } else {
            1
        }
    }

    pub fn contains(&self, exercise_id: &str) -> bool {
        self.exercise_ids.iter().any(|id| id == exercise_id)
    }

    pub fn is_unlocked(&self, store: &impl ProgressStore, exercise_id: &str) -> bool {
        let ids: Vec<&str> = self.exercise_ids.iter().map(String::as_str).collect();
        progress::is_unlocked(store, exercise_id, &ids, self.unlock_stars)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
    levels: Vec<Level>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>, levels: Vec<Level>) -> Self {
        Self { exercises, levels }
    }

    pub fn builtin() -> &'static ExerciseCatalog {
        static BUILTIN: OnceLock<ExerciseCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| ExerciseCatalog::new(builtin_exercises(), builtin_levels()))
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Exercise> {
        self.get(id)
            .ok_or_else(|| Error::UnknownExercise(id.to_string()))
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, number: u32) -> Option<&Level> {
        self.levels.iter().find(|l| l.number == number)
    }

    /// The level listing this exercise.
    pub fn level_of(&self, exercise_id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.contains(exercise_id))
    }

    /// Unknown exercises and exercises outside every level are locked.
    pub fn is_unlocked(&self, store: &impl ProgressStore, exercise_id: &str) -> bool {
        self.level_of(exercise_id)
            .is_some_and(|level| level.is_unlocked(store, exercise_id))
    }
}

fn exercise(id: &str, title: &str, kind: ExerciseKind, tempo_bpm: u16, pattern_id: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        title: title.to_string(),
        level: 1,
        kind,
        counting: "1 & 2 & 3 & 4 &".to_string(),
        tempo_bpm,
        duration_bars: 4,
        source: PatternSource::Catalog(pattern_id.to_string()),
    }
}

fn builtin_exercises() -> Vec<Exercise> {
    use ExerciseKind::*;

    vec![
        exercise("level-1-ex-1", "Listen and Feel the Beat", Groove, 70, "simple-quarters"),
        exercise("level-1-ex-2", "Count Along", Timing, 70, "simple-quarters"),
        exercise("level-1-ex-3", "Say 'Boots and Cats'", Groove, 75, "boots-and-cats"),
        exercise("level-1-ex-4", "Play Along: Kick Drum", Groove, 70, "boots-and-cats"),
        exercise("level-1-ex-5", "Play Along: All Together", Groove, 75, "boots-and-cats"),
    ]
}

fn builtin_levels() -> Vec<Level> {
    let exercise_ids = builtin_exercises()
        .into_iter()
        .filter(|e| e.level == 1)
        .map(|e| e.id)
        .collect();

    vec![Level {
        id: "level-1".to_string(),
        number: 1,
        name: "Level 1: Your First Groove".to_string(),
        description: "Build your first rock beat through practice and repetition. Take your time!"
            .to_string(),
        exercise_ids,
        unlock_stars: Level::default_unlock_stars(1),
    }]
}
