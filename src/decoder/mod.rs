//! Audio decoder implementations

pub mod symphonia;

pub use self::symphonia::SymphoniaDecoder;

use crate::core::AudioBuffer;
use crate::error::AudioResult;
use std::path::Path;

/// Decode a complete audio file into memory
pub fn decode_file<P: AsRef<Path>>(path: P) -> AudioResult<AudioBuffer> {
    SymphoniaDecoder::decode_file(path.as_ref())
}
