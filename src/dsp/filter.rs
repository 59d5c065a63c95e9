use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Two-pole state-variable filter (TPT form).

| type      | passes       | rejects      | used by               |
| --------- | ------------ | ------------ | --------------------- |
| high-pass | above cutoff | below cutoff | snare rattle, hi-hat  |
| low-pass  | below cutoff | above cutoff |                       |

Both responses come out of the same two integrators, so the filter computes
them together and picks one.

`q` is the quality factor: 0.707 is maximally flat (Butterworth), higher
values ring at the cutoff.
*/

/// Butterworth Q: flat passband, no resonant peak.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,

    cutoff_hz: f32,
    q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: BUTTERWORTH_Q,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    #[inline]
    fn coefficients(&self, sample_rate: f32) -> (f32, f32) {
        // Keep the cutoff below Nyquist or tan() blows up.
        let cutoff = self.cutoff_hz.clamp(1.0, sample_rate * 0.49);
        let g = (PI * cutoff / sample_rate).tan();
        let k = 1.0 / self.q;
        (g, k)
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let (g, k) = self.coefficients(sample_rate);
        let h = 1.0 / (1.0 + g * (g + k));

        for sample in buffer.iter_mut() {
            let v3 = *sample - self.ic2eq;
            let v1 = h * (self.ic1eq + g * v3);
            let v2 = self.ic2eq + g * v1;

            self.ic1eq = 2.0 * v1 - self.ic1eq;
            self.ic2eq = 2.0 * v2 - self.ic2eq;

            *sample = match self.filter_type {
                FilterType::LowPass => v2,
                FilterType::HighPass => *sample - k * v1 - v2,
            };
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::OscillatorBlock;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(64);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn filtered_sine_peak(filter: &mut SVFilter, freq: f32) -> f32 {
        let mut osc = OscillatorBlock::sine();
        let mut buffer = vec![0.0f32; 1024];
        osc.render(&mut buffer, freq, SAMPLE_RATE);
        filter.render(&mut buffer, SAMPLE_RATE);
        peak_after_transient(&buffer)
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer[511] > 0.99);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer[511].abs() < 0.001);
    }

    #[test]
    fn highpass_attenuates_below_cutoff() {
        let low = filtered_sine_peak(&mut SVFilter::highpass(7_000.0), 500.0);
        let high = filtered_sine_peak(&mut SVFilter::highpass(7_000.0), 11_000.0);

        assert!(low < 0.05, "500 Hz should be mostly removed, got {low}");
        assert!(high > 0.6, "11 kHz should pass, got {high}");
    }

    #[test]
    fn cutoff_is_clamped_below_nyquist() {
        let mut filter = SVFilter::lowpass(100_000.0);
        let mut buffer = vec![0.5; 256];
        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
