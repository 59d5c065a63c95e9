//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once built and realtime-safe, so
//! they can live directly inside voice graphs rendered on the audio thread.

/// Percussive peak-to-floor envelope.
pub mod envelope;
/// State-variable filter with low- and high-pass responses.
pub mod filter;
/// Sine, triangle and noise sources.
pub mod oscillator;

pub use envelope::{DecayEnvelope, EnvelopeStage, DECAY_FLOOR};
pub use filter::{FilterType, SVFilter};
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
