use std::collections::VecDeque;

use rtrb::Consumer;

use crate::engine::scheduler::StepEvent;

/// Which step the UI should light.
///
/// Step events arrive up to a lookahead early. The playhead holds them back
/// and only moves once the clock has actually reached a step's time, so the
/// display may trail the sound by one UI frame but never runs ahead of it.
pub struct VisualPlayhead {
    events: Consumer<StepEvent>,
    pending: VecDeque<StepEvent>,
    lit: Option<usize>,
}

impl VisualPlayhead {
    pub fn new(events: Consumer<StepEvent>) -> Self {
        Self {
            events,
            pending: VecDeque::new(),
            lit: None,
        }
    }

    /// Pull new events and advance to the latest step whose time has passed.
    pub fn update(&mut self, now: f64) -> Option<usize> {
        while let Ok(event) = self.events.pop() {
            self.pending.push_back(event);
        }
        while let Some(event) = self.pending.front() {
            if event.time > now {
                break;
            }
            self.lit = Some(event.step);
            self.pending.pop_front();
        }
        self.lit
    }

    pub fn lit(&self) -> Option<usize> {
        self.lit
    }

    /// Forget queued steps and unlight. Used on stop.
    pub fn reset(&mut self) {
        while self.events.pop().is_ok() {}
        self.pending.clear();
        self.lit = None;
    }
}
