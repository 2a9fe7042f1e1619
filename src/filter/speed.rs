use crate::core::AudioBuffer;
use crate::error::AudioResult;
use crate::filter::Filter;

/// Speed change filter
///
/// Changes playback speed by rescaling the declared sample rate to
/// `round(rate * factor)` while leaving the raw samples untouched. Playing
/// the same samples at a higher rate shortens playback and raises pitch
/// together, like running a tape faster.
pub struct SpeedShift {
    /// Speed multiplier (2.0 = double speed)
    factor: f64,
}

impl SpeedShift {
    /// Create a speed filter with the given multiplier
    pub fn new(factor: f64) -> Self {
        SpeedShift { factor }
    }

    /// Get the speed multiplier
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Compute the output sample rate for a given input rate
    pub fn shifted_rate(&self, sample_rate: u32) -> u32 {
        (sample_rate as f64 * self.factor).round() as u32
    }
}

impl Filter for SpeedShift {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        // A nonsensical factor collapses the rate to zero and is rejected here
        AudioBuffer::new(
            buffer.samples().to_vec(),
            self.shifted_rate(buffer.sample_rate()),
            buffer.channels(),
        )
    }
}
