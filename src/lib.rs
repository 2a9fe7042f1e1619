#![warn(missing_docs)]

//! # Speedsplit: Batch Audio Speed-Up and Segmentation
//!
//! Walks a directory tree, speeds up every MP3 file found, splits the result
//! into fixed-length segments, and writes them into a mirrored layout under
//! a `processed_audio` directory inside the input root.
//!
//! ## Features
//!
//! - **Decode** - MP3 input (any format Symphonia can probe)
//! - **Speed** - Sample-rate rescaling, pitch and tempo change together
//! - **Segment** - Split audio into fixed-length chunks
//! - **Export** - 32-bit float WAV segments
//! - **CLI** - Interactive prompts or command-line flags
//!
//! ## Quick Start
//!
//! ```ignore
//! use speedsplit::processor::{BatchConfig, BatchProcessor};
//! use std::time::Duration;
//!
//! // Speed up every MP3 under ./music by 2x, in 15 minute segments
//! let config = BatchConfig::new("./music", 2.0, Duration::from_secs(15 * 60))?;
//! let stats = BatchProcessor::new(config).run()?;
//! println!("{} files processed", stats.files_processed);
//! ```

// Declare modules
/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Audio filter implementations
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Audio processing pipelines
pub mod processor;

// Export public types
pub use crate::core::{AudioBuffer, Channels};
pub use error::{AudioError, AudioResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
