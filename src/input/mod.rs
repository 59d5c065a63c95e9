//! Input capture: keys and on-screen buttons become one stream of hits.
//!
//! Every accepted hit does three things at once:
//!
//! 1. plays the drum immediately, so the student hears their own stroke;
//! 2. lights a "last hit" indicator for a short feedback period;
//! 3. queues a [`HitEvent`] stamped with the audio clock for scoring.
//!
//! Holding a key down makes the OS send repeats. Those are not strokes and
//! are dropped here, before they reach the synthesizer or the score.

pub mod keymap;

use std::{collections::VecDeque, sync::Arc};

pub use keymap::Keymap;

use crate::{
    config::InputConfig,
    engine::clock::AudioClock,
    sequencing::{Drum, DrumSet},
    synth::{Sound, Synthesizer},
};

/// What the keyboard reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    /// Auto-repeat while held. Never a hit.
    Repeat,
    Release,
}

/// One captured stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub drum: Drum,
    /// Audio-clock seconds at capture.
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HitFeedback {
    drum: Drum,
    expires: f64,
}

pub struct InputCapture {
    keymap: Keymap,
    synth: Synthesizer,
    clock: Arc<dyn AudioClock>,
    feedback_secs: f64,
    track_release: bool,
    held: DrumSet,
    last_hit: Option<HitFeedback>,
    hits: VecDeque<HitEvent>,
}

impl InputCapture {
    pub fn new(
        keymap: Keymap,
        synth: Synthesizer,
        clock: Arc<dyn AudioClock>,
        config: &InputConfig,
    ) -> Self {
        Self {
            keymap,
            synth,
            clock,
            feedback_secs: config.feedback(),
            track_release: config.track_release,
            held: DrumSet::EMPTY,
            last_hit: None,
            hits: VecDeque::new(),
        }
    }

    /// Enable when the keyboard reports releases; a press of a key that
    /// was never released is then treated as a repeat.
    pub fn set_track_release(&mut self, track: bool) {
        self.track_release = track;
        self.held = DrumSet::EMPTY;
    }

    /// Handle a keyboard event. Returns the hit if one was produced.
    pub fn key(&mut self, key: char, action: KeyAction) -> Option<HitEvent> {
        let drum = self.keymap.drum_for(key)?;
        match action {
            KeyAction::Repeat => None,
            KeyAction::Release => {
                self.held = self.held.iter().filter(|d| *d != drum).collect();
                None
            }
            KeyAction::Press => {
                if self.track_release {
                    if self.held.contains(drum) {
                        return None;
                    }
                    self.held.insert(drum);
                }
                Some(self.hit(drum))
            }
        }
    }

    /// On-screen pad press. Always exactly one hit.
    pub fn button(&mut self, drum: Drum) -> HitEvent {
        self.hit(drum)
    }

    fn hit(&mut self, drum: Drum) -> HitEvent {
        let timestamp = self.clock.now();
        self.synth.play(Sound::Drum(drum), None);

        self.last_hit = Some(HitFeedback {
            drum,
            expires: timestamp + self.feedback_secs,
        });

        let event = HitEvent { drum, timestamp };
        self.hits.push_back(event);
        event
    }

    /// The drum to highlight at `now`, if its feedback period is still open.
    pub fn current_hit(&self, now: f64) -> Option<Drum> {
        self.last_hit
            .filter(|feedback| now < feedback.expires)
            .map(|feedback| feedback.drum)
    }

    /// Hand queued hits to the scorer, oldest first.
    pub fn drain_hits(&mut self) -> impl Iterator<Item = HitEvent> + '_ {
        self.hits.drain(..)
    }

    pub fn pending_hits(&self) -> usize {
        self.hits.len()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::clock::ManualClock, synth::DrumRack};

    fn capture(track_release: bool) -> (Arc<ManualClock>, DrumRack, InputCapture) {
        let clock = Arc::new(ManualClock::new());
        let mut rack = DrumRack::new(48_000.0);
        let synth = rack.connect(clock.clone(), 32);
        let config = InputConfig {
            track_release,
            ..InputConfig::default()
        };
        let input = InputCapture::new(Keymap::default(), synth, clock.clone(), &config);
        (clock, rack, input)
    }

    #[test]
    fn press_produces_timestamped_hit_and_sound() {
        let (clock, mut rack, mut input) = capture(false);
        clock.set(2.5);

        let hit = input.key('F', KeyAction::Press).expect("kick bound to F");
        assert_eq!(hit, HitEvent { drum: Drum::Kick, timestamp: 2.5 });

        let mut out = vec![0.0f32; 64];
        rack.render(&mut out, 120_000);
        assert_eq!(rack.active_voices(), 1);
        assert_eq!(input.drain_hits().collect::<Vec<_>>(), vec![hit]);
        assert_eq!(input.pending_hits(), 0);
    }

    #[test]
    fn repeats_and_unbound_keys_are_ignored() {
        let (_clock, _rack, mut input) = capture(false);

        assert!(input.key('j', KeyAction::Repeat).is_none());
        assert!(input.key('q', KeyAction::Press).is_none());
        assert!(input.key('j', KeyAction::Release).is_none());
        assert_eq!(input.pending_hits(), 0);
    }

    #[test]
    fn held_key_is_not_retriggered_when_tracking_release() {
        let (_clock, _rack, mut input) = capture(true);

        assert!(input.key(' ', KeyAction::Press).is_some());
        assert!(input.key(' ', KeyAction::Press).is_none());
        input.key(' ', KeyAction::Release);
        assert!(input.key(' ', KeyAction::Press).is_some());
        assert_eq!(input.pending_hits(), 2);
    }

    #[test]
    fn button_always_hits() {
        let (_clock, _rack, mut input) = capture(true);

        input.button(Drum::Snare);
        input.button(Drum::Snare);
        assert_eq!(input.pending_hits(), 2);
    }

    #[test]
    fn feedback_clears_after_its_duration() {
        let (clock, _rack, mut input) = capture(false);
        clock.set(1.0);
        input.button(Drum::HiHat);

        assert_eq!(input.current_hit(1.0), Some(Drum::HiHat));
        assert_eq!(input.current_hit(1.149), Some(Drum::HiHat));
        assert_eq!(input.current_hit(1.15), None);

        clock.set(1.1);
        input.button(Drum::Kick);
        assert_eq!(input.current_hit(1.2), Some(Drum::Kick), "newest hit wins");
    }
}
