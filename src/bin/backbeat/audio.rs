//! cpal output: the drum rack renders inside the stream callback and the
//! callback's frame count drives the shared audio clock.

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use backbeat::{engine::StreamClock, synth::DrumRack, MAX_BLOCK_SIZE};

pub struct AudioDevice {
    device: cpal::Device,
    config: cpal::StreamConfig,
}

impl AudioDevice {
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        log::info!(
            "output device: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            config.sample_rate().0,
            config.channels()
        );

        Ok(Self {
            device,
            config: config.into(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Move the rack onto the audio thread and start the clock.
    pub fn start(self, mut rack: DrumRack, clock: Arc<StreamClock>) -> Result<cpal::Stream> {
        let channels = self.config.channels as usize;
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let render_clock = Arc::clone(&clock);
        let error_clock = Arc::clone(&clock);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _| {
                    for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                        let frames = chunk.len() / channels;
                        let block = &mut mono[..frames];
                        rack.render(block, render_clock.frames());

                        // Mono to all channels
                        for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(sample);
                        }
                        render_clock.advance(frames as u64);
                    }
                },
                move |err| {
                    log::error!("audio stream error: {err}");
                    error_clock.suspend();
                },
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        clock.attach(self.config.sample_rate.0);
        Ok(stream)
    }
}
