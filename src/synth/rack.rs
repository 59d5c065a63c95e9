/*
Drum Rack
=========

The audio-thread half of the synthesizer. It owns every sounding voice and
mixes them into the output buffer.

Sample-Accurate Starts
----------------------

Triggers arrive early (the scheduler looks up to 100 ms ahead) with an
audio-clock time. The rack converts that time to a frame number and starts
the voice exactly there, even in the middle of a block:

    block:   frame 9600 ............................ frame 10112
    trigger:                   ▼ frame 9820
    output:  0 0 0 0 0 0 0 0 0 ▌voice starts here ~~~~~~~~~~~~~

A voice whose frame lies beyond the current block waits for a later block.
A time that has already passed starts at the beginning of the next block.

Voice Lifetime
--------------

Every trigger carries its own freshly built graph, so there is no voice
stealing: overlapping hits of the same drum simply sum. A voice is dropped
once its graph reports `is_active() == false`.

The voice list never grows past `VOICE_CAPACITY`, so rendering never
allocates. Triggers that arrive while it is full are dropped and counted.
*/

use std::sync::Arc;

use rtrb::{Consumer, RingBuffer};

use crate::{
    engine::clock::AudioClock,
    graph::{GraphNode, RenderCtx},
    synth::{handle::Synthesizer, message::SynthMessage},
    MAX_BLOCK_SIZE,
};

const VOICE_CAPACITY: usize = 64;

struct ScheduledVoice {
    node: Box<dyn GraphNode>,
    start_frame: u64,
    started: bool,
}

pub struct DrumRack {
    ctx: RenderCtx,
    gain: f32,
    inputs: Vec<Consumer<SynthMessage>>,
    voices: Vec<ScheduledVoice>,
    dropped: u64,
    temp_buffer: Vec<f32>,
}

impl DrumRack {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            ctx: RenderCtx::new(sample_rate),
            gain: 1.0,
            inputs: Vec::new(),
            voices: Vec::with_capacity(VOICE_CAPACITY),
            dropped: 0,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.max(0.0);
        self
    }

    /// Open a trigger queue into this rack and return its control handle.
    ///
    /// Connect every handle before moving the rack to the audio thread.
    pub fn connect(&mut self, clock: Arc<dyn AudioClock>, capacity: usize) -> Synthesizer {
        let (tx, rx) = RingBuffer::new(capacity.max(1));
        self.inputs.push(rx);
        Synthesizer::new(tx, clock)
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Voices queued or sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Triggers thrown away because every voice slot was taken.
    pub fn dropped_triggers(&self) -> u64 {
        self.dropped
    }

    /// Mix all voices into `out` (mono). `block_start_frame` is the clock
    /// frame of `out[0]`.
    pub fn render(&mut self, out: &mut [f32], block_start_frame: u64) {
        out.fill(0.0);
        self.drain_inputs();

        let mut frame = block_start_frame;
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk, frame);
            frame += chunk.len() as u64;
        }
    }

    fn drain_inputs(&mut self) {
        let sample_rate = self.ctx.sample_rate as f64;
        for rx in &mut self.inputs {
            while let Ok(SynthMessage::Trigger { voice, at }) = rx.pop() {
                if self.voices.len() >= VOICE_CAPACITY {
                    self.dropped += 1;
                    continue;
                }
                let start_frame = (at * sample_rate).round().max(0.0) as u64;
                self.voices.push(ScheduledVoice {
                    node: voice,
                    start_frame,
                    started: false,
                });
            }
        }
    }

    fn render_chunk(&mut self, out: &mut [f32], block_start: u64) {
        let block_end = block_start + out.len() as u64;

        for voice in &mut self.voices {
            if voice.start_frame >= block_end {
                continue;
            }

            let offset = voice.start_frame.saturating_sub(block_start) as usize;
            if !voice.started {
                voice.node.note_on(&self.ctx);
                voice.started = true;
            }

            let target = &mut out[offset..];
            let frames = &mut self.temp_buffer[..target.len()];
            frames.fill(0.0);
            voice.node.render_block(frames, &self.ctx);

            for (o, v) in target.iter_mut().zip(frames.iter()) {
                *o += *v * self.gain;
            }
        }

        self.voices.retain(|v| !v.started || v.node.is_active());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::clock::ManualClock,
        error::AudioError,
        sequencing::Drum,
        synth::Sound,
    };

    const SAMPLE_RATE: f32 = 48_000.0;

    fn setup() -> (Arc<ManualClock>, DrumRack, Synthesizer) {
        let clock = Arc::new(ManualClock::new());
        let mut rack = DrumRack::new(SAMPLE_RATE);
        let synth = rack.connect(clock.clone(), 16);
        (clock, rack, synth)
    }

    #[test]
    fn voice_starts_on_its_frame() {
        let (_clock, mut rack, mut synth) = setup();
        synth.play(Sound::Drum(Drum::HiHat), Some(0.01));

        let mut out = vec![0.0f32; 1024];
        rack.render(&mut out, 0);

        assert!(out[..480].iter().all(|&s| s == 0.0), "silent before frame 480");
        assert!(out[480..490].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn future_voice_waits_for_its_block() {
        let (_clock, mut rack, mut synth) = setup();
        synth.play(Sound::Drum(Drum::Snare), Some(0.1));

        let mut out = vec![0.0f32; 512];
        rack.render(&mut out, 0);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(rack.active_voices(), 1);

        rack.render(&mut out, 4_608);
        assert!(out[192..].iter().any(|&s| s != 0.0));
        assert!(out[..192].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn past_time_starts_immediately() {
        let (clock, mut rack, mut synth) = setup();
        clock.set(1.0);
        synth.play(Sound::Drum(Drum::HiHat), None);

        let mut out = vec![0.0f32; 256];
        rack.render(&mut out, 96_000);
        assert!(out[..8].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn finished_voices_are_dropped() {
        let (_clock, mut rack, mut synth) = setup();
        synth.play(Sound::Click { accent: true }, Some(0.0));
        synth.play(Sound::Drum(Drum::Kick), Some(0.0));

        let mut out = vec![0.0f32; 4_800];
        let mut frame = 0;
        for _ in 0..4 {
            rack.render(&mut out, frame);
            frame += out.len() as u64;
        }
        assert_eq!(rack.active_voices(), 0);
    }

    #[test]
    fn overlapping_hits_sum() {
        let (_clock, mut single_rack, mut single) = setup();
        let (_clock2, mut double_rack, mut double) = setup();
        single.play(Sound::Click { accent: false }, Some(0.0));
        double.play(Sound::Click { accent: false }, Some(0.0));
        double.play(Sound::Click { accent: false }, Some(0.0));

        let mut a = vec![0.0f32; 256];
        let mut b = vec![0.0f32; 256];
        single_rack.render(&mut a, 0);
        double_rack.render(&mut b, 0);

        for (x, y) in a.iter().zip(&b) {
            assert!((2.0 * x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn several_handles_feed_one_rack() {
        let clock = Arc::new(ManualClock::new());
        let mut rack = DrumRack::new(SAMPLE_RATE);
        let mut first = rack.connect(clock.clone(), 4);
        let mut second = rack.connect(clock.clone(), 4);

        first.play(Sound::Drum(Drum::Kick), Some(0.0));
        second.play(Sound::Drum(Drum::Snare), Some(0.0));
        let mut out = vec![0.0f32; 64];
        rack.render(&mut out, 0);

        assert_eq!(rack.active_voices(), 2);
    }

    #[test]
    fn failures_are_reported_but_play_never_panics() {
        let clock = Arc::new(ManualClock::suspended());
        let mut rack = DrumRack::new(SAMPLE_RATE);
        let mut synth = rack.connect(clock.clone(), 1);

        assert_eq!(
            synth.try_play(Sound::Drum(Drum::Kick), None),
            Err(AudioError::Suspended)
        );
        synth.play(Sound::Drum(Drum::Kick), None);

        clock.resume().unwrap();
        assert!(synth.try_play(Sound::Drum(Drum::Kick), None).is_ok());
        assert_eq!(
            synth.try_play(Sound::Drum(Drum::Kick), None),
            Err(AudioError::QueueFull)
        );

        let mut out = vec![0.0f32; 64];
        rack.render(&mut out, 0);
        assert_eq!(rack.active_voices(), 1);
    }

    #[test]
    fn renders_blocks_longer_than_max_block_size() {
        let (_clock, mut rack, mut synth) = setup();
        synth.play(Sound::Drum(Drum::Kick), Some(0.05));

        let mut out = vec![0.0f32; MAX_BLOCK_SIZE * 3];
        rack.render(&mut out, 0);

        assert!(out[..2_400].iter().all(|&s| s == 0.0));
        assert!(out[2_401..2_500].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn voice_list_is_capped() {
        let clock = Arc::new(ManualClock::new());
        let mut rack = DrumRack::new(SAMPLE_RATE);
        let mut synth = rack.connect(clock, VOICE_CAPACITY + 8);
        for _ in 0..VOICE_CAPACITY + 8 {
            synth.play(Sound::Drum(Drum::Kick), Some(1.0));
        }

        let mut out = vec![0.0f32; 64];
        rack.render(&mut out, 0);
        assert_eq!(rack.active_voices(), VOICE_CAPACITY);
        assert_eq!(rack.dropped_triggers(), 8);
    }
}
