use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, sample by sample.
///
/// With an [`EnvNode`](super::envelope::EnvNode) as modulator this is the
/// amplitude envelope of a voice, and the voice lives exactly as long as the
/// envelope does.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    #[test]
    fn envelope_gates_lifetime() {
        let ctx = RenderCtx::new(1_000.0);
        let mut voice = OscNode::sine()
            .with_frequency(100.0)
            .amplify(EnvNode::decay(1.0, 0.02, 0.03));
        let mut buffer = vec![0.0f32; 64];

        voice.note_on(&ctx);
        assert!(voice.is_active());

        voice.render_block(&mut buffer, &ctx);
        assert!(!voice.is_active());
        assert!(buffer[30..].iter().all(|&s| s == 0.0));
        assert!(buffer[..30].iter().any(|&s| s != 0.0));
    }
}
