//! Decorative room-tone fed to the audio output: filtered noise plus a
//! reverb tail convolved from a synthetic impulse response. One `amount`
//! input scales both sends through short smoothing ramps.

pub mod reverb;
pub mod source;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;
use tracing::info;

use source::AmbienceSource;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Error, Debug)]
pub enum AmbienceError {
    #[error("audio output unavailable: {0}")]
    Output(#[from] rodio::StreamError),
}

/// Target send gains for a given amount setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub noise_gain: f32,
    pub reverb_gain: f32,
}

/// Room-tone mapping: the noise floor rises gently with the amount, the
/// reverb send only opens past 0.2.
pub fn levels_for(amount: f32) -> Levels {
    let amount = amount.clamp(0.0, 1.0);
    Levels {
        noise_gain: 0.01 + amount * 0.03,
        reverb_gain: ((amount - 0.2) * 0.3).max(0.0),
    }
}

/// Gain targets shared with the realtime source thread, f32 bit-packed.
#[derive(Debug)]
pub struct AmbienceParams {
    noise_gain: AtomicU32,
    reverb_gain: AtomicU32,
}

impl AmbienceParams {
    pub fn new(levels: Levels) -> Self {
        Self {
            noise_gain: AtomicU32::new(levels.noise_gain.to_bits()),
            reverb_gain: AtomicU32::new(levels.reverb_gain.to_bits()),
        }
    }

    pub fn set(&self, levels: Levels) {
        self.noise_gain
            .store(levels.noise_gain.to_bits(), Ordering::Relaxed);
        self.reverb_gain
            .store(levels.reverb_gain.to_bits(), Ordering::Relaxed);
    }

    pub fn noise_gain(&self) -> f32 {
        f32::from_bits(self.noise_gain.load(Ordering::Relaxed))
    }

    pub fn reverb_gain(&self) -> f32 {
        f32::from_bits(self.reverb_gain.load(Ordering::Relaxed))
    }
}

/// Owns the output stream and the endless ambience source. Constructed
/// lazily on the first knob touch and dropped with the app.
pub struct AmbienceEngine {
    _stream: OutputStream,
    sink: Sink,
    params: Arc<AmbienceParams>,
}

impl AmbienceEngine {
    pub fn start(amount: f32) -> Result<Self, AmbienceError> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());

        let params = Arc::new(AmbienceParams::new(levels_for(amount)));
        sink.append(AmbienceSource::new(SAMPLE_RATE, params.clone()));
        info!("ambience engine started");

        Ok(Self {
            _stream: stream,
            sink,
            params,
        })
    }

    pub fn set_amount(&self, amount: f32) {
        self.params.set(levels_for(amount));
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn resume(&self) {
        self.sink.play();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_at_the_extremes() {
        let silent = levels_for(0.0);
        assert!((silent.noise_gain - 0.01).abs() < 1e-6);
        assert_eq!(silent.reverb_gain, 0.0);

        let full = levels_for(1.0);
        assert!((full.noise_gain - 0.04).abs() < 1e-6);
        assert!((full.reverb_gain - 0.24).abs() < 1e-6);
    }

    #[test]
    fn reverb_send_opens_past_the_threshold() {
        assert_eq!(levels_for(0.2).reverb_gain, 0.0);
        assert!(levels_for(0.21).reverb_gain > 0.0);
    }

    #[test]
    fn out_of_range_amounts_are_clamped() {
        assert_eq!(levels_for(-1.0), levels_for(0.0));
        assert_eq!(levels_for(7.5), levels_for(1.0));
    }

    #[test]
    fn params_round_trip_through_bit_packing() {
        let params = AmbienceParams::new(levels_for(0.5));
        params.set(levels_for(0.9));
        assert!((params.noise_gain() - levels_for(0.9).noise_gain).abs() < 1e-6);
        assert!((params.reverb_gain() - levels_for(0.9).reverb_gain).abs() < 1e-6);
    }
}
