use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// One planned segment of a source file, as a half-open millisecond range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    /// Zero-based position of this segment within the file
    pub index: usize,
    /// Start offset in milliseconds (inclusive)
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive)
    pub end_ms: u64,
}

/// Audio segmentation - split audio into time-based chunks
///
/// Produces a plan of [`SegmentSpan`]s covering a duration. Every span except
/// possibly the last has the full segment length; a file no longer than one
/// segment yields a single span.
#[derive(Debug, Clone)]
pub struct Segmenter {
    /// Segment length in milliseconds
    segment_length_ms: u64,
}

impl Segmenter {
    /// Create a new segmenter
    pub fn new(segment_length: Duration) -> AudioResult<Self> {
        let segment_length_ms = segment_length.as_millis().min(u128::from(u64::MAX)) as u64;

        if segment_length_ms == 0 {
            return Err(AudioError::ConfigError(
                "segment length must be at least one millisecond".to_string(),
            ));
        }

        Ok(Segmenter { segment_length_ms })
    }

    /// Get the segment length in milliseconds
    pub fn segment_length_ms(&self) -> u64 {
        self.segment_length_ms
    }

    /// Plan the segments covering `duration_ms` of audio.
    ///
    /// The number of segments is the duration divided by the segment length,
    /// rounded up, with a minimum of one so that even empty audio produces
    /// an output file.
    pub fn plan(&self, duration_ms: u64) -> Vec<SegmentSpan> {
        let length = self.segment_length_ms;
        let count = duration_ms.div_ceil(length).max(1);

        (0..count)
            .map(|i| SegmentSpan {
                index: i as usize,
                start_ms: i * length,
                end_ms: ((i + 1) * length).min(duration_ms),
            })
            .collect()
    }
}
