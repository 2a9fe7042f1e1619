//! End-to-end tests for batch processing over a directory tree.
//!
//! Fixtures are PCM WAV streams written under `.mp3` names: file selection
//! goes by extension while the decoder probes the actual contents, so these
//! exercise the real decode and export paths without binary assets.

use speedsplit::processor::{BatchConfig, BatchProcessor};
use std::fs;
use std::path::Path;
use std::time::Duration;

fn write_tone(path: &Path, sample_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for n in 0..frames {
        let t = n as f32 / sample_rate as f32;
        let value = ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 16_000.0) as i16;
        writer.write_sample(value).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_wav(path: &Path) -> (u32, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let rate = reader.spec().sample_rate;
    let samples = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    (rate, samples)
}

fn read_source_as_f32(path: &Path) -> Vec<f32> {
    let mut reader = hound::WavReader::open(path).unwrap();
    reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f32 / i16::MAX as f32)
        .collect()
}

#[test]
fn test_long_file_splits_into_numbered_parts() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tone.mp3");

    // 2.5 seconds at 8 kHz, split into 1 second segments
    write_tone(&source, 8_000, 20_000);

    let config = BatchConfig::new(dir.path(), 1.5, Duration::from_secs(1)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.segments_written, 3);

    let out = dir.path().join("processed_audio");
    let part1 = out.join("speed_1.5x_part001_tone.wav");
    let part2 = out.join("speed_1.5x_part002_tone.wav");
    let part3 = out.join("speed_1.5x_part003_tone.wav");
    assert!(part1.exists());
    assert!(part2.exists());
    assert!(part3.exists());
    assert!(!out.join("speed_1.5x_part004_tone.wav").exists());

    // The declared rate is rescaled but the samples are byte-identical
    // slices of the source
    let input = read_source_as_f32(&source);

    let (rate, samples) = read_wav(&part1);
    assert_eq!(rate, 12_000);
    assert_eq!(samples.len(), 8_000);
    assert_eq!(&samples[..], &input[..8_000]);

    let (rate, samples) = read_wav(&part2);
    assert_eq!(rate, 12_000);
    assert_eq!(&samples[..], &input[8_000..16_000]);

    let (rate, samples) = read_wav(&part3);
    assert_eq!(rate, 12_000);
    assert_eq!(samples.len(), 4_000);
    assert_eq!(&samples[..], &input[16_000..]);
}

#[test]
fn test_short_file_gets_no_part_suffix() {
    let dir = tempfile::tempdir().unwrap();
    write_tone(&dir.path().join("short.mp3"), 8_000, 8_000);

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(15 * 60)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.segments_written, 1);

    let out = dir.path().join("processed_audio");
    let single = out.join("speed_2.0x_short.wav");
    assert!(single.exists());

    let (rate, samples) = read_wav(&single);
    assert_eq!(rate, 16_000);
    assert_eq!(samples.len(), 8_000);
}

#[test]
fn test_long_and_short_files_in_one_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    // 22 seconds and 5 seconds at 8 kHz, split into 15 second segments
    write_tone(&dir.path().join("a.mp3"), 8_000, 176_000);
    write_tone(&dir.path().join("b/c.mp3"), 8_000, 40_000);

    let config = BatchConfig::new(dir.path(), 1.5, Duration::from_secs(15)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.segments_written, 3);

    let out = dir.path().join("processed_audio");

    let (rate, samples) = read_wav(&out.join("speed_1.5x_part001_a.wav"));
    assert_eq!(rate, 12_000);
    assert_eq!(samples.len(), 120_000);

    let (rate, samples) = read_wav(&out.join("speed_1.5x_part002_a.wav"));
    assert_eq!(rate, 12_000);
    assert_eq!(samples.len(), 56_000);

    // The short file in the subfolder fits one segment: no part suffix
    let (rate, samples) = read_wav(&out.join("b/speed_1.5x_c.wav"));
    assert_eq!(rate, 12_000);
    assert_eq!(samples.len(), 40_000);

    assert!(!out.join("speed_1.5x_a.wav").exists());
    assert!(!out.join("b/speed_1.5x_part001_c.wav").exists());
}

#[test]
fn test_tree_layout_is_mirrored() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("albums/live")).unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();
    write_tone(&dir.path().join("albums/live/gig.mp3"), 8_000, 4_000);

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_processed, 1);

    let out = dir.path().join("processed_audio");
    assert!(out.join("albums/live/speed_2.0x_gig.wav").exists());
    // Directories without audio are still mirrored
    assert!(out.join("empty").is_dir());
}

#[test]
fn test_undecodable_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.mp3"), b"not audio at all").unwrap();
    write_tone(&dir.path().join("good.mp3"), 8_000, 4_000);

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.segments_written, 1);

    let out = dir.path().join("processed_audio");
    assert!(out.join("speed_2.0x_good.wav").exists());
    assert!(!out.join("speed_2.0x_broken.wav").exists());
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_tone(&dir.path().join("UPPER.MP3"), 8_000, 4_000);
    write_tone(&dir.path().join("plain.wav"), 8_000, 4_000);
    fs::write(dir.path().join("notes.txt"), b"liner notes").unwrap();

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    // Only the MP3 is picked up, with its stem case preserved
    assert_eq!(stats.files_processed, 1);

    let out = dir.path().join("processed_audio");
    assert!(out.join("speed_2.0x_UPPER.wav").exists());
    assert!(!out.join("speed_2.0x_plain.wav").exists());
    assert!(!out.join("speed_2.0x_notes.wav").exists());
}

#[test]
fn test_second_run_skips_output_root() {
    let dir = tempfile::tempdir().unwrap();
    write_tone(&dir.path().join("tone.mp3"), 8_000, 4_000);

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let first = BatchProcessor::new(config.clone()).run().unwrap();
    let second = BatchProcessor::new(config).run().unwrap();

    assert_eq!(first.files_processed, 1);
    assert_eq!(second.files_processed, 1);

    // The output root is never walked, so no mirror of it appears inside
    // itself and nothing in it is reprocessed
    let out = dir.path().join("processed_audio");
    assert!(!out.join("processed_audio").exists());
    assert!(out.join("speed_2.0x_tone.wav").exists());
}

#[test]
fn test_unrelated_processed_audio_dir_is_traversed() {
    let dir = tempfile::tempdir().unwrap();
    // A directory that shares the output root's name but is not the
    // output root is ordinary input
    fs::create_dir_all(dir.path().join("archive/processed_audio")).unwrap();
    write_tone(
        &dir.path().join("archive/processed_audio/keep.mp3"),
        8_000,
        4_000,
    );

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let stats = BatchProcessor::new(config).run().unwrap();

    assert_eq!(stats.files_processed, 1);

    let out = dir.path().join("processed_audio");
    assert!(
        out.join("archive/processed_audio/speed_2.0x_keep.wav")
            .exists()
    );
}

#[test]
fn test_empty_tree_reports_zero() {
    let dir = tempfile::tempdir().unwrap();

    let config = BatchConfig::new(dir.path(), 2.0, Duration::from_secs(900)).unwrap();
    let processor = BatchProcessor::new(config);
    let stats = processor.run().unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.segments_written, 0);
    // The output root is still created up front
    assert!(processor.config().output_root().is_dir());
}

#[test]
fn test_zero_segment_length_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_tone(&dir.path().join("tone.mp3"), 8_000, 4_000);

    let config = BatchConfig::new(dir.path(), 2.0, Duration::ZERO).unwrap();
    let result = BatchProcessor::new(config).run();

    assert!(result.is_err());
}
