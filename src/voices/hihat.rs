//! Closed hi-hat voice.
//!
//! A short burst of high-frequency noise: "tss".
//!
//! # How It Works
//!
//! 1. White noise through a 7 kHz high-pass (only the sizzle is left)
//! 2. Gain 0.5 → 0.01 over 50 ms, holding the floor until the cut at 100 ms

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

pub const HIHAT_LENGTH: f32 = 0.1;

/// Create a closed hi-hat voice.
pub fn hihat() -> impl GraphNode {
    OscNode::noise()
        .through(FilterNode::highpass(7_000.0))
        .amplify(EnvNode::decay(0.5, 0.05, HIHAT_LENGTH))
}
