use crate::decoder;
use crate::encoder::{Encoder, WavEncoder};
use crate::error::{AudioError, AudioResult};
use crate::filter::{Filter, SpeedShift};
use crate::processor::BatchStats;
use crate::processor::segment::Segmenter;
use log::{debug, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::{DirEntry, WalkDir};

/// Name of the output directory created under the input root
pub const OUTPUT_DIR_NAME: &str = "processed_audio";

/// Extension given to exported segments
pub const OUTPUT_EXTENSION: &str = "wav";

/// Configuration for a batch processing run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Canonicalized root of the tree to scan
    input_root: PathBuf,
    /// Speed multiplier applied to every file
    speed_factor: f64,
    /// Maximum length of one exported segment
    segment_length: Duration,
}

impl BatchConfig {
    /// Create a validated configuration
    pub fn new<P: AsRef<Path>>(
        input_root: P,
        speed_factor: f64,
        segment_length: Duration,
    ) -> AudioResult<Self> {
        let input_root = input_root.as_ref();

        if !input_root.exists() {
            return Err(AudioError::ConfigError(format!(
                "input folder does not exist: {}",
                input_root.display()
            )));
        }

        if !input_root.is_dir() {
            return Err(AudioError::ConfigError(format!(
                "input path is not a directory: {}",
                input_root.display()
            )));
        }

        let input_root = input_root.canonicalize()?;

        Ok(BatchConfig {
            input_root,
            speed_factor,
            segment_length,
        })
    }

    /// Get the canonicalized input root
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// Get the speed multiplier
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Get the segment length
    pub fn segment_length(&self) -> Duration {
        self.segment_length
    }

    /// Get the output root, a fixed subdirectory of the input root
    pub fn output_root(&self) -> PathBuf {
        self.input_root.join(OUTPUT_DIR_NAME)
    }
}

/// Batch audio processor
///
/// Walks the input tree, speed-shifts and segments every MP3 file found,
/// and writes the results into a mirrored directory layout under the
/// output root. The output root itself is skipped during the walk, so a
/// second run does not reprocess its own products.
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor for the given configuration
    pub fn new(config: BatchConfig) -> Self {
        BatchProcessor { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process the whole input tree
    ///
    /// Files that fail to decode are reported and skipped; filesystem and
    /// encoding errors abort the run.
    pub fn run(&self) -> AudioResult<BatchStats> {
        let segmenter = Segmenter::new(self.config.segment_length)?;

        let output_root = self.config.output_root();
        fs::create_dir_all(&output_root)?;
        let canonical_output = output_root.canonicalize()?;

        let mut stats = BatchStats::default();

        let walker = WalkDir::new(&self.config.input_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_output_root(e, &canonical_output));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            let relative = entry
                .path()
                .strip_prefix(&self.config.input_root)
                .map_err(|_| {
                    AudioError::ProcessingError(format!(
                        "walked path escapes the input root: {}",
                        entry.path().display()
                    ))
                })?;

            if entry.file_type().is_dir() {
                // Mirror every directory, including empty ones
                let mirrored = output_root.join(relative);
                debug!("Mirroring directory {}", mirrored.display());
                fs::create_dir_all(&mirrored)?;
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                warn!(
                    "Skipping file with non-UTF-8 name: {}",
                    entry.path().display()
                );
                continue;
            };

            let Some(stem) = audio_file_stem(name) else {
                continue;
            };

            let target_dir = output_root.join(relative.parent().unwrap_or(Path::new("")));
            self.process_file(entry.path(), stem, &target_dir, &segmenter, &mut stats)?;
        }

        Ok(stats)
    }

    /// Decode one file, then export each speed-shifted segment
    fn process_file(
        &self,
        path: &Path,
        stem: &str,
        target_dir: &Path,
        segmenter: &Segmenter,
        stats: &mut BatchStats,
    ) -> AudioResult<()> {
        println!("\nProcessing: {}", path.display());

        let buffer = match decoder::decode_file(path) {
            Ok(buffer) => buffer,
            Err(e) => {
                println!("Error processing {}: {e}", path.display());
                warn!("Failed to decode {}: {e}", path.display());
                stats.files_failed += 1;
                return Ok(());
            }
        };

        let mut filter = SpeedShift::new(self.config.speed_factor);
        let spans = segmenter.plan(buffer.duration_ms());
        let total = spans.len();

        for span in spans {
            let slice = buffer.slice_ms(span.start_ms, span.end_ms)?;
            let shifted = filter.process(&slice)?;

            let file_name = segment_file_name(self.config.speed_factor, span.index, total, stem);
            let output_path = target_dir.join(file_name);

            let mut encoder =
                WavEncoder::new(&output_path, shifted.sample_rate(), shifted.channels())?;
            encoder.encode(&shifted)?;
            encoder.finalize()?;

            println!("Saved: {}", output_path.display());
            stats.segments_written += 1;
        }

        stats.files_processed += 1;
        Ok(())
    }
}

/// Check whether a walked directory is the output root itself.
///
/// The name comparison is only a fast path; the decision is made on
/// canonical path identity, so an unrelated directory that happens to be
/// named like the output root is still traversed.
fn is_output_root(entry: &DirEntry, canonical_output: &Path) -> bool {
    if !entry.file_type().is_dir() || entry.file_name() != OsStr::new(OUTPUT_DIR_NAME) {
        return false;
    }

    entry
        .path()
        .canonicalize()
        .map(|p| p == canonical_output)
        .unwrap_or(false)
}

/// Match `.mp3` file names case-insensitively, returning the stem.
///
/// A name consisting of the extension alone has no stem and is not
/// selected.
fn audio_file_stem(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    if bytes.len() > 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".mp3") {
        Some(&name[..name.len() - 4])
    } else {
        None
    }
}

/// Format the speed factor the way it appears in output file names.
///
/// Whole factors keep one decimal place, so a factor of 2 labels files
/// `speed_2.0x_...` rather than `speed_2x_...`.
fn speed_label(factor: f64) -> String {
    if factor.fract() == 0.0 {
        format!("{factor:.1}")
    } else {
        format!("{factor}")
    }
}

/// Build the output file name for one segment.
///
/// Files that fit in a single segment get no part number; split files are
/// numbered from `part001`.
fn segment_file_name(factor: f64, index: usize, total: usize, stem: &str) -> String {
    let label = speed_label(factor);
    if total > 1 {
        format!(
            "speed_{label}x_part{:03}_{stem}.{OUTPUT_EXTENSION}",
            index + 1
        )
    } else {
        format!("speed_{label}x_{stem}.{OUTPUT_EXTENSION}")
    }
}
