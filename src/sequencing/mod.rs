//! Pattern model: drums, meters, validated bars and the pattern catalog.

pub mod catalog;
pub mod drum;
pub mod pattern;
pub mod time_signature;

pub use catalog::Catalog;
pub use drum::{Drum, DrumSet};
pub use pattern::{Difficulty, Pattern, PatternDef, PatternStep, Subdivision};
pub use time_signature::TimeSignature;
