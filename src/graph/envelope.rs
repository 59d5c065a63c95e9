use crate::{
    dsp::envelope::DecayEnvelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Graph wrapper around [`DecayEnvelope`]. Renders gain values, so it is
/// normally used as the modulator of an [`Amplify`](super::amplify::Amplify).
pub struct EnvNode {
    env: DecayEnvelope,
}

impl EnvNode {
    /// `peak` → 0.01 over `decay` seconds, silent from `stop` seconds.
    pub fn decay(peak: f32, decay: f32, stop: f32) -> Self {
        Self {
            env: DecayEnvelope::new(peak, decay, stop),
        }
    }

    pub fn level(&self) -> f32 {
        self.env.level()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx.sample_rate);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.env.trigger();
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
