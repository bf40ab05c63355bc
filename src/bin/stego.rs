//! # Steganography Command-Line Front End
//!
//! Thin wrapper that loads an image, runs the LSB codec on a background
//! worker, shows progress, and saves or prints the result.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- encode --image cover.png --text "meet at noon"
//! cargo run --bin stego -- encode --image cover.png --text-file note.txt --output out.png
//! cargo run --bin stego -- decode --image out.png
//! cargo run --bin stego -- capacity --image cover.png
//! ```
//!
//! Without `--output`, encoded images go to the directory from the config
//! file, then `$LSB_STEGO_OUTPUT_DIR`, then the desktop, then the current
//! directory, as `encoded_image.png`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{info, LevelFilter};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use lsb_stego::common::config::{load_config, StegoConfig};
use lsb_stego::image_io;
use lsb_stego::processing::{self, Framing};
use lsb_stego::worker::{self, Job, JobOutput};

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Payload framing; overrides the config file
    #[arg(long, global = true)]
    framing: Option<Framing>,

    /// Print a JSON report instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide text inside an image
    Encode {
        /// Cover image to hide the text in
        #[arg(short, long)]
        image: PathBuf,

        /// Text to hide
        #[arg(short, long, conflicts_with = "text_file", required_unless_present = "text_file")]
        text: Option<String>,

        /// Read the text to hide from a file
        #[arg(long)]
        text_file: Option<PathBuf>,

        /// Where to write the encoded image (PNG recommended)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover hidden text from an image
    Decode {
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Show how much text an image can hold
    Capacity {
        #[arg(short, long)]
        image: PathBuf,
    },
}

/// Summary of one operation, printed with `--json`.
#[derive(Debug, Serialize)]
struct OperationReport {
    operation: &'static str,
    image: PathBuf,
    framing: Framing,
    width: u32,
    height: u32,
    capacity_bits: usize,
    /// `null` when not even an empty payload fits
    max_payload_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    elapsed_ms: u64,
    finished_at: String,
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

/// Render a single updating progress line on stderr.
fn show_progress(percent: u8) {
    eprint!("\rProgress: {:>3}%", percent);
    if percent == 100 {
        eprintln!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config: StegoConfig = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path))?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()
    };
    init_logger(level);

    let framing = args.framing.unwrap_or(config.codec.framing);
    let started = Instant::now();

    let report = match args.command {
        Command::Encode {
            image,
            text,
            text_file,
            output,
        } => {
            let payload = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => anyhow::bail!("either --text or --text-file is required"),
            };
            let output = output.unwrap_or_else(|| config.output.resolve_path());
            encode(image, payload, output, framing, args.json).await?
        }
        Command::Decode { image } => decode(image, framing, args.json).await?,
        Command::Capacity { image } => capacity(image, framing)?,
    };

    let report = OperationReport {
        elapsed_ms: started.elapsed().as_millis() as u64,
        finished_at: chrono::Local::now().to_rfc3339(),
        ..report
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

async fn encode(
    path: PathBuf,
    payload: String,
    output: PathBuf,
    framing: Framing,
    quiet: bool,
) -> Result<OperationReport> {
    let image = image_io::load(&path)?;
    let mut report = base_report("encode", path, framing, &image);
    report.payload_bytes = Some(payload.len());

    info!("🔒 Hiding {} bytes with {} framing", payload.len(), framing);

    let handle = worker::spawn(Job::Encode { image, payload }, framing);
    let encoded = match handle.wait(|p| if !quiet { show_progress(p) }).await? {
        JobOutput::Encoded(image) => image,
        JobOutput::Decoded(_) => anyhow::bail!("encode job returned decoded text"),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    image_io::save(&encoded, &output)?;
    info!("💾 Encoded image saved to {}", output.display());

    report.output = Some(output);
    Ok(report)
}

async fn decode(path: PathBuf, framing: Framing, quiet: bool) -> Result<OperationReport> {
    let image = image_io::load(&path)?;
    let mut report = base_report("decode", path, framing, &image);

    info!("🔓 Reading hidden text with {} framing", framing);

    let handle = worker::spawn(Job::Decode { image }, framing);
    let text = match handle.wait(|p| if !quiet { show_progress(p) }).await? {
        JobOutput::Decoded(text) => text,
        JobOutput::Encoded(_) => anyhow::bail!("decode job returned an image"),
    };

    report.payload_bytes = Some(text.len());
    report.text = Some(text);
    Ok(report)
}

fn capacity(path: PathBuf, framing: Framing) -> Result<OperationReport> {
    let image = image_io::load(&path)?;
    Ok(base_report("capacity", path, framing, &image))
}

fn base_report(
    operation: &'static str,
    image_path: PathBuf,
    framing: Framing,
    image: &image::RgbaImage,
) -> OperationReport {
    OperationReport {
        operation,
        image: image_path,
        framing,
        width: image.width(),
        height: image.height(),
        capacity_bits: processing::capacity_bits(image),
        max_payload_bytes: processing::max_payload_bytes(image, framing),
        payload_bytes: None,
        output: None,
        text: None,
        elapsed_ms: 0,
        finished_at: String::new(),
    }
}

fn print_report(report: &OperationReport) {
    match report.operation {
        "encode" => {
            if let Some(output) = &report.output {
                println!("Image saved to: {}", output.display());
            }
        }
        "decode" => {
            println!("Decoded text: {}", report.text.as_deref().unwrap_or_default());
        }
        _ => {
            let room = describe_room(report.max_payload_bytes);
            println!(
                "{} ({}x{}): {} bits, {} ({} framing)",
                report.image.display(),
                report.width,
                report.height,
                report.capacity_bits,
                room,
                report.framing
            );
        }
    }
}

/// Human-readable payload room for the capacity report.
fn describe_room(max_payload_bytes: Option<usize>) -> String {
    match max_payload_bytes {
        Some(bytes) => format!("up to {} bytes of text", bytes),
        None => "too small to hold any text".to_string(),
    }
}
