use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rodio::Source;

use super::AmbienceParams;
use super::reverb::ReverbTail;

const HIGHPASS_HZ: f32 = 1_000.0;
const SMOOTHING_SECONDS: f32 = 0.1;
const IMPULSE_SECONDS: usize = 2;

/// One-pole parameter ramp so gain changes glide instead of stepping.
pub struct Smoother {
    current: f32,
    coeff: f32,
}

impl Smoother {
    pub fn new(tau_seconds: f32, sample_rate: u32) -> Self {
        let coeff = 1.0 - (-1.0 / (tau_seconds * sample_rate as f32)).exp();
        Self {
            current: 0.0,
            coeff,
        }
    }

    pub fn next(&mut self, target: f32) -> f32 {
        self.current += (target - self.current) * self.coeff;
        self.current
    }

    pub fn value(&self) -> f32 {
        self.current
    }
}

/// One-pole high-pass keeping the noise floor as "air" rather than rumble.
struct HighPass {
    alpha: f32,
    prev_in: f32,
    prev_out: f32,
}

impl HighPass {
    fn new(cutoff_hz: f32, sample_rate: u32) -> Self {
        let rc = 1.0 / (2.0 * std::f32::consts::PI * cutoff_hz);
        let dt = 1.0 / sample_rate as f32;
        Self {
            alpha: rc / (rc + dt),
            prev_in: 0.0,
            prev_out: 0.0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let out = self.alpha * (self.prev_out + input - self.prev_in);
        self.prev_in = input;
        self.prev_out = out;
        out
    }
}

/// Endless mono room-tone: white noise through the high-pass, split into a
/// direct send and a reverb send, each under its own smoothed gain.
pub struct AmbienceSource {
    sample_rate: u32,
    rng: StdRng,
    highpass: HighPass,
    tail: ReverbTail,
    noise_gain: Smoother,
    reverb_gain: Smoother,
    params: Arc<AmbienceParams>,
}

impl AmbienceSource {
    pub fn new(sample_rate: u32, params: Arc<AmbienceParams>) -> Self {
        let mut rng = StdRng::from_os_rng();
        let tail = ReverbTail::new(&mut rng, IMPULSE_SECONDS * sample_rate as usize);

        Self {
            sample_rate,
            rng,
            highpass: HighPass::new(HIGHPASS_HZ, sample_rate),
            tail,
            noise_gain: Smoother::new(SMOOTHING_SECONDS, sample_rate),
            reverb_gain: Smoother::new(SMOOTHING_SECONDS, sample_rate),
            params,
        }
    }
}

impl Iterator for AmbienceSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let white = self.rng.random_range(-1.0f32..=1.0);
        let air = self.highpass.process(white);

        let dry = air * self.noise_gain.next(self.params.noise_gain());
        let wet = self.tail.process(air) * self.reverb_gain.next(self.params.reverb_gain());

        Some((dry + wet).clamp(-1.0, 1.0))
    }
}

impl Source for AmbienceSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> rodio::ChannelCount {
        1
    }

    fn sample_rate(&self) -> rodio::SampleRate {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambience::{SAMPLE_RATE, levels_for};

    #[test]
    fn smoother_converges_without_overshoot() {
        let mut smoother = Smoother::new(0.1, SAMPLE_RATE);
        let target = 0.24;

        let mut last = 0.0;
        // Five time constants settle well within 1 %.
        for _ in 0..(SAMPLE_RATE / 2) {
            let v = smoother.next(target);
            assert!(v >= last && v <= target);
            last = v;
        }
        assert!((last - target).abs() < target * 0.01);
    }

    #[test]
    fn smoother_never_steps_abruptly() {
        let mut smoother = Smoother::new(0.1, SAMPLE_RATE);
        let first = smoother.next(1.0);
        // A full-scale target moves the first sample by far less than 1 %.
        assert!(first < 0.001);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut filter = HighPass::new(HIGHPASS_HZ, SAMPLE_RATE);
        let mut out = 0.0;
        for _ in 0..SAMPLE_RATE {
            out = filter.process(1.0);
        }
        assert!(out.abs() < 1e-3);
    }

    #[test]
    fn source_output_is_bounded_and_quiet_at_zero() {
        let params = Arc::new(AmbienceParams::new(levels_for(0.0)));
        let mut source = AmbienceSource::new(SAMPLE_RATE, params);
        for _ in 0..10_000 {
            let s = source.next().unwrap();
            assert!((-1.0..=1.0).contains(&s));
            // Noise floor only: gain tops out at 0.01 plus the tiny tail.
            assert!(s.abs() < 0.2);
        }
    }

    #[test]
    fn source_reports_an_endless_mono_stream() {
        let params = Arc::new(AmbienceParams::new(levels_for(0.5)));
        let source = AmbienceSource::new(SAMPLE_RATE, params);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), SAMPLE_RATE);
        assert_eq!(source.total_duration(), None);
        assert_eq!(source.current_span_len(), None);
    }
}
