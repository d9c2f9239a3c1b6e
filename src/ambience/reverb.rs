use rand::Rng;

/// Synthetic hall impulse: uniform noise under a squared linear-decay
/// envelope. No recorded impulse assets are involved.
pub fn impulse_response<R: Rng>(rng: &mut R, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let envelope = (1.0 - i as f32 / len as f32).powi(2);
            rng.random_range(-1.0f32..=1.0) * envelope
        })
        .collect()
}

/// Sparse-tap convolution of the input with a synthetic impulse response:
/// a handful of delay taps sampled from the impulse stand in for the full
/// convolution, which is plenty for a decorative tail.
pub struct ReverbTail {
    buffer: Vec<f32>,
    write: usize,
    taps: Vec<(usize, f32)>,
}

const TAP_COUNT: usize = 64;

impl ReverbTail {
    pub fn new<R: Rng>(rng: &mut R, impulse_len: usize) -> Self {
        let impulse = impulse_response(rng, impulse_len);
        let stride = (impulse_len / TAP_COUNT).max(1);
        let taps = (0..TAP_COUNT)
            .map(|k| {
                let delay = (k * stride + 1).min(impulse_len - 1);
                (delay, impulse[delay])
            })
            .collect();

        Self {
            buffer: vec![0.0; impulse_len],
            write: 0,
            taps,
        }
    }

    pub fn max_delay(&self) -> usize {
        self.buffer.len()
    }

    pub fn process(&mut self, sample: f32) -> f32 {
        self.buffer[self.write] = sample;

        let len = self.buffer.len();
        let mut wet = 0.0;
        for &(delay, gain) in &self.taps {
            let idx = (self.write + len - delay) % len;
            wet += self.buffer[idx] * gain;
        }

        self.write = (self.write + 1) % len;
        wet
    }
}
