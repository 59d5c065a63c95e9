//! Metronome click.
//!
//! Two sine partials through one short envelope, like a wood block. The
//! accented click (beat 1 of the bar) is higher and louder.
//!
//! | click  | partials        | peak |
//! | ------ | --------------- | ---- |
//! | accent | 1200 + 1800 Hz  | 0.40 |
//! | normal |  800 + 1200 Hz  | 0.25 |
//!
//! Both decay to 0.01 over 30 ms and stop there.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

pub const CLICK_LENGTH: f32 = 0.03;

/// Create a metronome click voice.
pub fn click(accent: bool) -> impl GraphNode {
    let (low, high, peak) = if accent {
        (1_200.0, 1_800.0, 0.4)
    } else {
        (800.0, 1_200.0, 0.25)
    };

    OscNode::sine()
        .with_frequency(low)
        .layer(OscNode::sine().with_frequency(high))
        .amplify(EnvNode::decay(peak, CLICK_LENGTH, CLICK_LENGTH))
}
