//! Composable building blocks for constructing drum voices.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics needed
//! for voice design: a strike event and block-based rendering. The
//! `extensions` module adds fluent helpers so voices can be written as a
//! clear, chainable expression.

/// Multiply two signals together (amplitude envelopes).
pub mod amplify;
/// Percussive envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.layer()`).
pub mod extensions;
/// High- and low-pass filter node.
pub mod filter;
/// Sum two voices in parallel.
pub mod layer;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
