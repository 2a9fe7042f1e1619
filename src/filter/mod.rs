//! Audio filter implementations

pub mod speed;

pub use speed::SpeedShift;

use crate::core::AudioBuffer;
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Process an audio buffer through this filter
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer>;
}
