//! Snapshot of everything one frame draws, built fresh before each draw.

use backbeat::{
    scoring::{ScoringMode, ScoringResult},
    sequencing::Drum,
    session::{PracticeMode, StepView},
};

pub struct ViewModel {
    pub title: String,
    pub subtitle: String,
    pub bpm: f64,
    pub playing: bool,
    pub mode: PracticeMode,
    pub metronome: bool,
    pub scoring_mode: ScoringMode,
    pub loops_completed: u32,
    pub loops_required: u32,
    pub grid: Vec<StepView>,
    /// Drum flashing after a hit
    pub current_hit: Option<Drum>,
    /// Bound key per drum, in grid order
    pub keys: [(Drum, Option<char>); 3],
    pub result: Option<ScoringResult>,
    pub ladder: Vec<LadderEntry>,
    pub status: Option<String>,
    pub audio: bool,
}

/// One exercise in the level list.
pub struct LadderEntry {
    pub title: String,
    pub stars: u8,
    pub unlocked: bool,
    pub active: bool,
}
