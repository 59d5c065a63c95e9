pub mod config; // Engine tuning loaded from TOML
pub mod dsp;
pub mod engine; // Audio clock, transport and lookahead scheduling
pub mod error;
pub mod exercise; // Exercises and levels built on patterns
pub mod graph; // Composable audio graph nodes
pub mod input; // Keyboard / button capture
pub mod progress;
pub mod scoring; // Timing-window grading
pub mod sequencing; // Patterns and the pattern catalog
pub mod session;
pub mod synth; // Trigger queue and drum rack
pub mod voices;

pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Slowest tempo the transport accepts.
pub const MIN_BPM: f64 = 40.0;
/// Fastest tempo the transport accepts.
pub const MAX_BPM: f64 = 200.0;
