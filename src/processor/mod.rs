//! Audio processing pipeline implementations

pub mod batch;
pub mod segment;

pub use batch::{BatchConfig, BatchProcessor};
pub use segment::{SegmentSpan, Segmenter};

/// Counters accumulated over one batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    /// Files decoded and exported successfully
    pub files_processed: u64,
    /// Files skipped because they could not be decoded
    pub files_failed: u64,
    /// Total segment files written
    pub segments_written: u64,
}
