//! Core audio types and structures

/// Audio buffer and channel types
pub mod audio;

pub use audio::{AudioBuffer, Channels};
