//! Speedsplit Command Line Interface
//!
//! Batch speed-up and segmentation tool for MP3 files.

use clap::Parser;
use log::info;
use speedsplit::processor::{BatchConfig, BatchProcessor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Segment length used when the prompt is answered with a blank line
const DEFAULT_SEGMENT_MINUTES: u64 = 15;

#[derive(Parser)]
#[command(name = "speedsplit")]
#[command(about = "Batch speed up and segment MP3 files", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder containing MP3 files (prompted for when omitted)
    #[arg(value_name = "FOLDER")]
    input: Option<PathBuf>,

    /// Speed factor (e.g., 2 for double speed; prompted for when omitted)
    #[arg(short, long)]
    speed: Option<f64>,

    /// Segment length in minutes
    #[arg(short = 'l', long, value_name = "MINUTES")]
    segment_length: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Print a prompt and read one trimmed line from stdin
fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("speedsplit {}", speedsplit::VERSION);

    let input = match cli.input {
        Some(path) => path,
        None => PathBuf::from(prompt("Enter the folder path containing MP3 files: ")?),
    };

    let speed = match cli.speed {
        Some(speed) => speed,
        None => {
            prompt("Enter speed factor (e.g., 1.5 for 50% faster, 0.5 for 50% slower): ")?
                .parse::<f64>()?
        }
    };

    let minutes = match cli.segment_length {
        Some(minutes) => minutes,
        None => {
            let answer = prompt("Enter maximum segment length in minutes (default 15): ")?;
            if answer.is_empty() {
                DEFAULT_SEGMENT_MINUTES
            } else {
                answer.parse::<u64>()?
            }
        }
    };

    let config = BatchConfig::new(&input, speed, Duration::from_secs(minutes.saturating_mul(60)))?;
    let stats = BatchProcessor::new(config).run()?;

    println!("\nProcessing complete!");
    println!(
        "{} file(s) processed, {} skipped, {} segment(s) written",
        stats.files_processed, stats.files_failed, stats.segments_written
    );

    Ok(())
}
