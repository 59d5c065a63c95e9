use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect):

  Through: [Source] ──→ [Effect] ──→ output

1. Render the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

  let hat = OscNode::noise()
      .through(FilterNode::highpass(7_000.0))
      .amplify(EnvNode::decay(0.5, 0.05, 0.1));

An effect only transforms what it is given, so the chain is active for as
long as its source is.
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.filter.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
