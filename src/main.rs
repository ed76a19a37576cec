//! # parity-steg Command Line
//!
//! ## Usage
//!
//! ```bash
//! # hide notes.txt in cover.png, writes encoded_cover.png
//! parity-steg cover.png --encode notes.txt
//!
//! # recover it into notes_out.txt
//! parity-steg encoded_cover.png -o notes_out.txt
//! ```
//!
//! Without `--encode` the tool decodes. Encoding a payload that does not fit
//! exits with status 3.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parity_steg::common::config::StegConfig;
use parity_steg::common::report::{Mode, ReportBuilder};
use parity_steg::processing::steganography::{
    embed_payload, extract_payload, load_grid, save_grid, PixelMode,
};
use parity_steg::StegoError;

/// Exit status when the payload does not fit in the image.
const EXIT_TOO_BIG: i32 = 3;

/// Encode files into images or decode hidden files from images. Without
/// --encode the image is decoded and the payload written to --output.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to encode into / decode from
    image: PathBuf,

    /// Output file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File to encode data from
    #[arg(short, long, value_name = "FILE")]
    encode: Option<PathBuf>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Fail instead of writing output when the image has no end marker
    #[arg(long)]
    strict: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = StegConfig::load(args.config.as_deref())?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()?
    };
    init_logger(level);

    let result = match &args.encode {
        Some(payload_path) => run_encode(&args, &config, payload_path),
        None => run_decode(&args, &config),
    };

    if let Err(err) = result {
        if let Some(StegoError::CapacityExceeded {
            required,
            available,
        }) = err.downcast_ref::<StegoError>()
        {
            // printed whatever the log level
            eprintln!(
                "Data is too big, please use a bigger image! {} bytes > {} bytes",
                required, available
            );
            std::process::exit(EXIT_TOO_BIG);
        }
        return Err(err);
    }

    Ok(())
}

fn run_encode(args: &Args, config: &StegConfig, payload_path: &Path) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.encoded_path(&args.image));
    let report = ReportBuilder::start(Mode::Encode, &args.image, &output);

    let payload = fs::read(payload_path)
        .with_context(|| format!("Failed to read payload {}", payload_path.display()))?;
    let grid = load_grid(&args.image, PixelMode::Convert)
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;
    info!("This image can hold {} bytes", grid.capacity().bytes());

    let encoded = embed_payload(&grid, &payload)?;
    save_grid(&encoded, &output)
        .with_context(|| format!("Failed to save image {}", output.display()))?;
    info!("Wrote {}", output.display());

    if let Some(report_path) = &args.report {
        report
            .finish(&grid, payload.len(), payload.len() * 8, None)
            .export_to_json(report_path)?;
    }

    Ok(())
}

fn run_decode(args: &Args, config: &StegConfig) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| config.decoded_path());
    let report = ReportBuilder::start(Mode::Decode, &args.image, &output);

    let grid = load_grid(&args.image, PixelMode::Strict)
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;
    let extracted = extract_payload(&grid);

    if !extracted.complete {
        let err = StegoError::MalformedEncoding {
            bits_read: extracted.bits_read,
        };
        if args.strict || config.decode.strict {
            return Err(err.into());
        }
        warn!("{}, writing what was recovered anyway", err);
    }

    fs::write(&output, &extracted.payload)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());

    if let Some(report_path) = &args.report {
        report
            .finish(
                &grid,
                extracted.payload.len(),
                extracted.bits_read,
                Some(extracted.complete),
            )
            .export_to_json(report_path)?;
    }

    Ok(())
}
