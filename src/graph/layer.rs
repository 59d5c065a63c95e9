use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Layering
=================

Layer sums two sources sample by sample:

  [A] ────┬──→ (+) ──→ output
  [B] ────┘

This is how a snare is built: filtered noise (the rattle) plus a triangle
(the body), each with its own envelope and stop time. Unlike a crossfade
there is no balance parameter; each layer carries its own gain in its
envelope peak.

Both sources receive note_on. The layer stays active while either side is
still sounding.

Example usage:
  let snare = rattle.layer(body);
*/

pub struct Layer<A, B> {
    pub top: A,
    pub bottom: B,
    temp_buffer: Vec<f32>,
}

impl<A, B> Layer<A, B> {
    pub fn new(top: A, bottom: B) -> Self {
        Self {
            top,
            bottom,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Layer<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.top.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.bottom.render_block(frames, ctx);

        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o += *b;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.top.note_on(ctx);
        self.bottom.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.top.is_active() || self.bottom.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    #[test]
    fn sums_both_layers() {
        let ctx = RenderCtx::new(48_000.0);
        let mut a = OscNode::sine().with_frequency(800.0);
        let mut b = OscNode::sine().with_frequency(1_200.0);
        let mut layered = OscNode::sine()
            .with_frequency(800.0)
            .layer(OscNode::sine().with_frequency(1_200.0));

        let mut buf_a = vec![0.0f32; 128];
        let mut buf_b = vec![0.0f32; 128];
        let mut buf_sum = vec![0.0f32; 128];
        a.render_block(&mut buf_a, &ctx);
        b.render_block(&mut buf_b, &ctx);
        layered.render_block(&mut buf_sum, &ctx);

        for i in 0..128 {
            assert!((buf_sum[i] - (buf_a[i] + buf_b[i])).abs() < 1e-6);
        }
    }

    #[test]
    fn active_until_longest_layer_ends() {
        let ctx = RenderCtx::new(1_000.0);
        let mut voice = OscNode::sine()
            .amplify(EnvNode::decay(1.0, 0.01, 0.01))
            .layer(OscNode::sine().amplify(EnvNode::decay(1.0, 0.05, 0.05)));
        let mut buffer = vec![0.0f32; 20];

        voice.note_on(&ctx);
        voice.render_block(&mut buffer, &ctx);
        assert!(voice.is_active(), "long layer still sounding");

        voice.render_block(&mut buffer, &ctx);
        voice.render_block(&mut buffer, &ctx);
        assert!(!voice.is_active());
    }
}
