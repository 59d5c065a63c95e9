use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, RenderCtx},
};

/*
State-Variable Filter Node
==========================

Filters shape noise into drum timbres by removing part of its spectrum:

  High-pass (HP): keeps everything ABOVE the cutoff.
    - 1 kHz on noise: the bright "crack" of a snare, without rumble
    - 7 kHz on noise: the thin "tss" of a closed hi-hat

  Low-pass (LP): keeps everything BELOW the cutoff.
    - Darkens a source; handy for taming a harsh layer

Cutoff guide:
  200 Hz    muffled, like through a wall
  1000 Hz   body of a snare starts here
  7000 Hz   only sizzle remains

A filter does not produce sound by itself, it processes whatever is rendered
into the buffer before it. Chain it after a source with `.through()`:

  let hat = OscNode::noise().through(FilterNode::highpass(7_000.0));
*/

pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz()
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
    }
}
