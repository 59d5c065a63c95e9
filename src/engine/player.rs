use std::sync::Arc;

use rtrb::Consumer;

use crate::{
    engine::scheduler::StepEvent,
    sequencing::Pattern,
    synth::{Sound, Synthesizer},
};

/// Turns step events into sound: the pattern's drums and, optionally, a
/// metronome click on every beat.
///
/// Muting the pattern leaves the click running, which is how "tap along"
/// practice works: the student hears the pulse and plays the part.
pub struct PatternPlayer {
    events: Consumer<StepEvent>,
    pattern: Arc<Pattern>,
    synth: Synthesizer,
    muted: bool,
    metronome: bool,
}

impl PatternPlayer {
    pub fn new(events: Consumer<StepEvent>, pattern: Arc<Pattern>, synth: Synthesizer) -> Self {
        Self {
            events,
            pattern,
            synth,
            muted: false,
            metronome: false,
        }
    }

    /// Trigger the sounds of every pending step at its scheduled time.
    /// Returns the number of steps handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.pop() {
            if self.metronome && self.pattern.subdivision().is_on_beat(event.step) {
                let accent = event.step == 0;
                self.synth.play(Sound::Click { accent }, Some(event.time));
            }
            if !self.muted {
                for drum in self.pattern.expected(event.step).iter() {
                    self.synth.play(Sound::Drum(drum), Some(event.time));
                }
            }
            handled += 1;
        }
        handled
    }

    /// Throw away pending steps without playing them.
    pub fn flush(&mut self) {
        while self.events.pop().is_ok() {}
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_metronome(&mut self, enabled: bool) {
        self.metronome = enabled;
    }

    pub fn metronome(&self) -> bool {
        self.metronome
    }
}
