use std::fmt;

use crate::graph::GraphNode;

/// Control → audio thread traffic.
///
/// The voice graph is built on the control thread, so the audio thread never
/// allocates to start a sound.
pub enum SynthMessage {
    /// Start `voice` at audio-clock time `at` (seconds).
    Trigger { voice: Box<dyn GraphNode>, at: f64 },
}

impl fmt::Debug for SynthMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthMessage::Trigger { at, .. } => {
                f.debug_struct("Trigger").field("at", at).finish_non_exhaustive()
            }
        }
    }
}
