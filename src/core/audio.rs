use crate::error::{AudioError, AudioResult};

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: usize) -> AudioResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            n => Err(AudioError::UnsupportedFormat(format!(
                "{n} channel audio is not supported"
            ))),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u16 {
        *self as u16
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "mono",
            Channels::Stereo => "stereo",
        }
    }
}

/// Decoded audio held in memory: interleaved samples plus stream parameters.
///
/// One buffer corresponds to one decoded source file (or a slice of one).
/// Samples are interleaved f32 in the `-1.0..=1.0` range.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Audio samples (interleaved for stereo)
    samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 44100, 48000)
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::BufferError(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioBuffer {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get total duration in whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.frames() as u64 * 1000 / self.sample_rate as u64
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Extract the `[start_ms, end_ms)` portion of the buffer as a new buffer.
    ///
    /// Both edges are converted to frame indices with the same truncating
    /// formula, so adjacent slices share a boundary frame and tile the buffer
    /// without gaps or overlaps. The end index is clamped to the buffer
    /// length to guard out-of-range end offsets; frames past the last whole
    /// millisecond belong to no slice and are dropped.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> AudioResult<AudioBuffer> {
        if start_ms > end_ms {
            return Err(AudioError::SegmentationError(format!(
                "slice start {start_ms}ms is after end {end_ms}ms"
            )));
        }

        let start_frame = (start_ms * self.sample_rate as u64 / 1000) as usize;
        let end_frame = ((end_ms * self.sample_rate as u64 / 1000) as usize).min(self.frames());

        if start_frame > self.frames() {
            return Err(AudioError::SegmentationError(format!(
                "slice start {start_ms}ms is beyond the buffer"
            )));
        }

        let width = self.channels.count() as usize;
        let samples = self.samples[start_frame * width..end_frame * width].to_vec();

        AudioBuffer::new(samples, self.sample_rate, self.channels)
    }
}
