//! Audio encoder implementations

pub mod wav;

pub use wav::WavEncoder;

use crate::core::AudioBuffer;
use crate::error::AudioResult;

/// Trait for audio encoders
pub trait Encoder {
    /// Encode an audio buffer to output
    fn encode(&mut self, buffer: &AudioBuffer) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}
