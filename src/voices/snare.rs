//! Snare drum voice.
//!
//! A synthesized snare combining noise for the wire "crack" with a tonal
//! body. Real snares have metal wires stretched across the bottom head that
//! buzz when the drum is struck; high-passed noise stands in for them.
//!
//! # How It Works
//!
//! 1. White noise through a 1 kHz high-pass, gain 1.0 → 0.01 over 150 ms,
//!    cut at 200 ms
//! 2. Triangle at 180 Hz, gain 0.3 → 0.01 over 100 ms, cut at 100 ms
//! 3. Both layers are summed
//!
//! # Variations
//!
//! - More noise = trashy, lo-fi snare
//! - Less noise = more "tom" like

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

pub const SNARE_LENGTH: f32 = 0.2;

/// Create a snare drum voice.
pub fn snare() -> impl GraphNode {
    let rattle = OscNode::noise()
        .through(FilterNode::highpass(1_000.0))
        .amplify(EnvNode::decay(1.0, 0.15, SNARE_LENGTH));

    let body = OscNode::triangle()
        .with_frequency(180.0)
        .amplify(EnvNode::decay(0.3, 0.1, 0.1));

    rattle.layer(body)
}
