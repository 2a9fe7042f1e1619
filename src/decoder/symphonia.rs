use crate::core::{AudioBuffer, Channels};
use crate::error::{AudioError, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

/// Symphonia-based audio decoder
///
/// Decodes an entire file into an [`AudioBuffer`] of interleaved f32 samples.
/// The container and codec are detected by probing the stream contents, with
/// the file extension supplied only as a hint.
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Decode a complete audio file into memory
    pub fn decode_file(path: &Path) -> AudioResult<AudioBuffer> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(format!("{}: {e}", path.display())))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| {
                AudioError::InvalidMetadata(format!("no audio track in {}", path.display()))
            })?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params.sample_rate.ok_or_else(|| {
            AudioError::InvalidMetadata(format!("missing sample rate in {}", path.display()))
        })?;
        let channel_count = codec_params
            .channels
            .ok_or_else(|| {
                AudioError::InvalidMetadata(format!("missing channel info in {}", path.display()))
            })?
            .count();
        let channels = Channels::from_count(channel_count)?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(format!("{}: {e}", path.display())))?;

        debug!(
            "Decoding {}: {} Hz {}",
            path.display(),
            sample_rate,
            channels.name()
        );

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                // End of stream
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(AudioError::DecodeError(format!(
                        "{}: {e}",
                        path.display()
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => append_samples(&decoded, &mut samples),
                // Corrupt packets are skippable, the decoder recovers on the next one
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Skipping corrupt packet in {}: {e}", path.display());
                }
                Err(e) => {
                    return Err(AudioError::DecodeError(format!(
                        "{}: {e}",
                        path.display()
                    )));
                }
            }
        }

        if samples.is_empty() {
            return Err(AudioError::DecodeError(format!(
                "no decodable audio in {}",
                path.display()
            )));
        }

        AudioBuffer::new(samples, sample_rate, channels)
    }
}

/// Convert a decoded packet into interleaved f32 samples and append them
fn append_samples(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => append_interleaved(buf, |s| s, out),
        AudioBufferRef::F64(buf) => append_interleaved(buf, |s| s as f32, out),
        AudioBufferRef::S32(buf) => {
            append_interleaved(buf, |s| s as f32 / i32::MAX as f32, out)
        }
        AudioBufferRef::S16(buf) => {
            append_interleaved(buf, |s| s as f32 / i16::MAX as f32, out)
        }
        AudioBufferRef::S24(buf) => {
            append_interleaved(buf, |s| s.inner() as f32 / 8_388_608.0, out)
        }
        AudioBufferRef::S8(buf) => append_interleaved(buf, |s| s as f32 / i8::MAX as f32, out),
        AudioBufferRef::U32(buf) => append_interleaved(
            buf,
            |s| ((s as f64 - 2_147_483_648.0) / 2_147_483_648.0) as f32,
            out,
        ),
        AudioBufferRef::U16(buf) => {
            append_interleaved(buf, |s| (s as f32 - 32_768.0) / 32_768.0, out)
        }
        AudioBufferRef::U24(buf) => append_interleaved(
            buf,
            |s| (s.inner() as f32 - 8_388_608.0) / 8_388_608.0,
            out,
        ),
        AudioBufferRef::U8(buf) => {
            append_interleaved(buf, |s| (s as f32 - 128.0) / 128.0, out)
        }
    }
}

/// Interleave the planar channels of one decoded buffer into `out`
fn append_interleaved<S: Sample>(
    buf: &symphonia::core::audio::AudioBuffer<S>,
    convert: impl Fn(S) -> f32,
    out: &mut Vec<f32>,
) {
    let frames = buf.frames();
    let channels = buf.spec().channels.count();

    out.reserve(frames * channels);
    for frame in 0..frames {
        for ch in 0..channels {
            out.push(convert(buf.chan(ch)[frame]));
        }
    }
}
