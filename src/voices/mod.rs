//! Pre-built voices for the drum kit and the metronome.
//!
//! Each voice is a ready-to-use node graph. Every call builds a fresh graph,
//! so two overlapping hits of the same drum never share state.
//!
//! # Example
//!
//! ```ignore
//! use backbeat::voices;
//!
//! let kick = voices::kick();
//! let snare = voices::snare();
//! let hihat = voices::hihat();
//! let tick = voices::click(false);
//! ```

mod click;
mod hihat;
mod kick;
mod snare;

pub use click::{click, CLICK_LENGTH};
pub use hihat::{hihat, HIHAT_LENGTH};
pub use kick::{kick, KICK_LENGTH};
pub use snare::{snare, SNARE_LENGTH};

use crate::graph::GraphNode;
use crate::sequencing::Drum;

/// Build the voice graph for `drum`.
pub fn drum(drum: Drum) -> Box<dyn GraphNode> {
    match drum {
        Drum::Kick => Box::new(kick()),
        Drum::Snare => Box::new(snare()),
        Drum::HiHat => Box::new(hihat()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;

    const SAMPLE_RATE: f32 = 48_000.0;

    /// Render until the voice reports inactive; returns the rendered samples.
    fn render_to_end(mut voice: Box<dyn GraphNode>, limit_secs: f32) -> Vec<f32> {
        let ctx = RenderCtx::new(SAMPLE_RATE);
        let mut out = Vec::new();
        let mut block = vec![0.0f32; 256];

        voice.note_on(&ctx);
        while voice.is_active() && (out.len() as f32) < limit_secs * SAMPLE_RATE {
            voice.render_block(&mut block, &ctx);
            out.extend_from_slice(&block);
        }
        assert!(!voice.is_active(), "voice should end within {limit_secs}s");
        out
    }

    fn seconds(samples: &[f32]) -> f32 {
        samples.len() as f32 / SAMPLE_RATE
    }

    fn last_audible(samples: &[f32]) -> f32 {
        samples
            .iter()
            .rposition(|s| *s != 0.0)
            .map(|i| i as f32 / SAMPLE_RATE)
            .unwrap_or(0.0)
    }

    #[test]
    fn voices_stop_at_their_length() {
        let cases: [(Box<dyn GraphNode>, f32); 4] = [
            (drum(Drum::Kick), KICK_LENGTH),
            (drum(Drum::Snare), SNARE_LENGTH),
            (drum(Drum::HiHat), HIHAT_LENGTH),
            (Box::new(click(true)), CLICK_LENGTH),
        ];

        for (voice, length) in cases {
            let samples = render_to_end(voice, 1.0);
            let block = 256.0 / SAMPLE_RATE;
            assert!(seconds(&samples) <= length + 2.0 * block);
            assert!(last_audible(&samples) < length);
            assert!(last_audible(&samples) > length * 0.5);
        }
    }

    #[test]
    fn peaks_stay_within_gain() {
        let peak = |samples: &[f32]| samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));

        let kick = render_to_end(drum(Drum::Kick), 1.0);
        assert!(peak(&kick) <= 1.0 + 1e-6);
        assert!(peak(&kick) > 0.5, "kick body should be loud");

        let normal = render_to_end(Box::new(click(false)), 1.0);
        let accent = render_to_end(Box::new(click(true)), 1.0);
        assert!(peak(&normal) <= 0.5 + 1e-6);
        assert!(peak(&accent) > peak(&normal), "accent is louder");
    }

    #[test]
    fn hihat_has_no_low_end() {
        let samples = render_to_end(drum(Drum::HiHat), 1.0);
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;

        assert!(mean.abs() < 0.01, "high-passed noise is centred on zero");
    }
}
