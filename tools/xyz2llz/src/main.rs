//! xyz2llz - ASCII point file to LLZ converter
//!
//! Converts `.xyz` (lon, lat, z) or `.yxz` (lat, lon, z) text files into the
//! LLZ binary point format used as gridding input.
//!
//! # Usage
//!
//! ```bash
//! xyz2llz [-i] [-t] INPUT.xyz OUTPUT[.llz]
//! ```
//!
//! Fields may be separated by commas or whitespace. With `-t` the fourth field
//! is time in decimal seconds from 1970-01-01. Lines starting with `#` are
//! ignored.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use xyz2llz::{
    ConvertOptions, CoordOrder, DecodePolicy, DepthUnits, TOOL_VERSION, convert_file,
    normalize_output_path,
};

#[derive(Parser)]
#[command(name = "xyz2llz")]
#[command(about = "Convert .xyz/.yxz point files to LLZ")]
#[command(version)]
struct Cli {
    /// Invert sign of input Z value
    #[arg(short, long)]
    invert: bool,

    /// Input file has time as the 4th field (decimal seconds from 01/01/1970)
    #[arg(short, long)]
    time: bool,

    /// Stop at the first line that cannot be decoded instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Units of the input depth values, recorded in the LLZ header
    #[arg(long, value_enum, default_value_t = Units::Meters)]
    depth_units: Units,

    /// Input file; .yxz must be lat,lon,z and .xyz must be lon,lat,z
    input: PathBuf,

    /// Output file (.llz is appended if missing)
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Meters,
    Feet,
    Fathoms,
    Cubits,
    Willetts,
}

impl From<Units> for DepthUnits {
    fn from(units: Units) -> Self {
        match units {
            Units::Meters => DepthUnits::Meters,
            Units::Feet => DepthUnits::Feet,
            Units::Fathoms => DepthUnits::Fathoms,
            Units::Cubits => DepthUnits::Cubits,
            Units::Willetts => DepthUnits::Willetts,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("{}", TOOL_VERSION);

    // Extension decides field order; reject before touching any file
    let order = CoordOrder::from_input_path(&cli.input)?;
    let output = normalize_output_path(&cli.output);

    let total_bytes = fs::metadata(&cli.input)
        .with_context(|| format!("Failed to open input: {:?}", cli.input))?
        .len();

    let policy = if cli.strict {
        DecodePolicy::Abort
    } else {
        DecodePolicy::Skip
    };
    let options = ConvertOptions::new(order)
        .with_time(cli.time)
        .with_invert_depth(cli.invert)
        .with_policy(policy)
        .with_depth_units(cli.depth_units.into());

    tracing::info!("File : {:?}", cli.input);

    let mut last_percent = None;
    let summary = convert_file(&cli.input, &output, &options, |progress| {
        let percent = progress.percent(total_bytes);
        if last_percent != Some(percent) {
            last_percent = Some(percent);
            eprint!("{:03}% processed            \r", percent);
            let _ = io::stderr().flush();
        }
    })
    .with_context(|| format!("Failed to convert {:?} -> {:?}", cli.input, output))?;
    eprintln!();

    if summary.lines_rejected > 0 {
        tracing::warn!(
            "{} of {} lines could not be decoded and were skipped",
            summary.lines_rejected,
            summary.lines_read
        );
    }
    tracing::info!(
        "{} LLZ records output to {:?}",
        summary.records_written,
        output
    );

    Ok(())
}
