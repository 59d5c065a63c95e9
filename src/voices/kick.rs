//! Kick drum: a sine whose pitch falls from 150 Hz to 40 Hz in the first
//! 50 ms while the level decays to silence over 300 ms.
//!
//! Raising the start pitch gives more click on the attack. A longer decay
//! moves it toward an 808 boom.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const KICK_LENGTH: f32 = 0.3;

/// Create a kick drum voice.
pub fn kick() -> impl GraphNode {
    OscNode::sine()
        .sweep(150.0, 40.0, 0.05)
        .amplify(EnvNode::decay(1.0, 0.3, KICK_LENGTH))
}
