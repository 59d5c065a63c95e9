use std::sync::Arc;

use rtrb::Producer;

use crate::{
    engine::clock::AudioClock,
    error::AudioError,
    synth::{message::SynthMessage, Sound},
};

/// Control-side handle that triggers sounds on a [`DrumRack`](super::DrumRack).
///
/// Obtained from [`DrumRack::connect`](super::DrumRack::connect).
pub struct Synthesizer {
    tx: Producer<SynthMessage>,
    clock: Arc<dyn AudioClock>,
}

impl Synthesizer {
    pub(crate) fn new(tx: Producer<SynthMessage>, clock: Arc<dyn AudioClock>) -> Self {
        Self { tx, clock }
    }

    /// Play `sound` at audio-clock time `at`, or right now when `None`.
    ///
    /// Never blocks. If the clock is suspended or the queue is full the
    /// failure is logged and the sound is skipped.
    pub fn play(&mut self, sound: Sound, at: Option<f64>) {
        if let Err(err) = self.try_play(sound, at) {
            log::warn!("dropping {sound:?}: {err}");
        }
    }

    /// Like [`play`](Self::play), but reports why a sound could not be queued.
    pub fn try_play(&mut self, sound: Sound, at: Option<f64>) -> Result<(), AudioError> {
        if !self.clock.is_running() {
            return Err(AudioError::Suspended);
        }
        if self.tx.is_full() {
            return Err(AudioError::QueueFull);
        }

        let at = at.unwrap_or_else(|| self.clock.now());
        self.tx
            .push(SynthMessage::Trigger {
                voice: sound.voice(),
                at,
            })
            .map_err(|_| AudioError::QueueFull)
    }

    pub fn clock(&self) -> &Arc<dyn AudioClock> {
        &self.clock
    }
}
