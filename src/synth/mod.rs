//! Sound synthesis: control-side trigger handles and the audio-side rack.
//!
//! ```text
//!  control thread                    audio thread
//!  ──────────────                    ────────────
//!  Synthesizer::play ──rtrb queue──→ DrumRack::render ──→ output buffer
//!  Synthesizer::play ──rtrb queue──┘
//! ```
//!
//! Each producer of sounds (pattern playback, live input) owns its own
//! [`Synthesizer`] handle; all of them feed one [`DrumRack`].

pub mod handle;
pub mod message;
pub mod rack;

pub use handle::Synthesizer;
pub use message::SynthMessage;
pub use rack::DrumRack;

use crate::{graph::GraphNode, sequencing::Drum, voices};

/// Something the synthesizer can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Drum(Drum),
    /// Metronome tick; `accent` marks beat 1.
    Click { accent: bool },
}

impl Sound {
    /// Build a fresh voice graph for this sound.
    pub fn voice(self) -> Box<dyn GraphNode> {
        match self {
            Sound::Drum(drum) => voices::drum(drum),
            Sound::Click { accent } => Box::new(voices::click(accent)),
        }
    }
}

impl From<Drum> for Sound {
    fn from(drum: Drum) -> Self {
        Sound::Drum(drum)
    }
}
