//! Error types shared across the engine.

use crate::sequencing::Subdivision;

/// Result alias that carries the crate [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for session setup and transport control.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No pattern with this id exists in the catalog.
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    /// No exercise with this id exists in the catalog.
    #[error("unknown exercise `{0}`")]
    UnknownExercise(String),
    /// Pattern data failed validation.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The audio clock could not be activated.
    #[error(transparent)]
    Audio(#[from] AudioError),
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Malformed step data. Fatal to session startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern `{id}`: {subdivision:?} bars need {expected} steps, found {found}")]
    StepCount {
        id: String,
        subdivision: Subdivision,
        expected: usize,
        found: usize,
    },
    #[error("pattern `{id}`: step at position {position} is numbered {found}, expected {expected}")]
    StepNumber {
        id: String,
        position: usize,
        expected: usize,
        found: usize,
    },
    #[error("pattern `{id}`: only 4/4 is supported, got {numerator}/{denominator}")]
    TimeSignature {
        id: String,
        numerator: u8,
        denominator: u8,
    },
    #[error("pattern `{id}`: default tempo {bpm} BPM is outside {min}-{max}")]
    Tempo { id: String, bpm: u16, min: u16, max: u16 },
    #[error("pattern id must not be empty")]
    EmptyId,
    #[error("duplicate pattern id `{0}`")]
    DuplicateId(String),
}

/// Audio subsystem failures. Recovered locally: logged, never propagated
/// into the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// The clock exists but is not running yet (no output stream attached,
    /// or the stream has not been started).
    #[error("audio clock is suspended")]
    Suspended,
    /// The output device could not be opened or resumed.
    #[error("audio not available: {0}")]
    Unavailable(String),
    /// The trigger queue to the audio thread is full.
    #[error("synth trigger queue is full")]
    QueueFull,
}

/// Scoring state-machine violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring not ready: {completed} of {required} loops completed")]
    NotReady { completed: u32, required: u32 },
}
