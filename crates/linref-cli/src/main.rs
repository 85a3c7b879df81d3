//! linref: extract the section of a linear geometry between two addresses.
//!
//! Reads a `LinearGeometry` serialized as JSON, extracts the section
//! between `--start` and `--end`, and prints it as JSON or WKT. An SVG
//! preview with the section drawn over the source can be written
//! alongside.
//!
//! Addresses are written `C:S:F`: component index, segment index, and
//! the fraction along that segment.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin linref -- route.json --start 0:0:0.5 --end 0:1:0.5 --format wkt
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info};

use linref::{LineExtractor, LinearGeometry, LinearLocation, LinearRefError};
use linref_export::{SvgMetadata, SvgStyle, to_svg, to_wkt};

/// Extract a section of a line or multi-line by linear address.
#[derive(Parser)]
#[command(name = "linref", version)]
struct Cli {
    /// Path to the source geometry as JSON.
    geometry_path: PathBuf,

    /// Start address as `component:segment:fraction`.
    #[arg(long, value_parser = parse_location)]
    start: LinearLocation,

    /// End address as `component:segment:fraction`.
    #[arg(long, value_parser = parse_location)]
    end: LinearLocation,

    /// Output format for the extracted section.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write an SVG preview to file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Full SVG style as a JSON string.
    ///
    /// Missing fields take their defaults.
    #[arg(long)]
    style_json: Option<String>,

    /// Slice the coordinates of a single-line geometry directly.
    ///
    /// Fails for multi-line input.
    #[arg(long)]
    line_only: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Serde JSON, same shape as the input.
    Json,
    /// Well-known text.
    Wkt,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid geometry JSON: {0}")]
    Geometry(serde_json::Error),

    #[error("invalid --style-json: {0}")]
    Style(serde_json::Error),

    #[error("failed to serialize section: {0}")]
    Serialize(serde_json::Error),

    #[error("extraction failed: {0}")]
    Extract(#[from] LinearRefError),
}

/// Parse a `C:S:F` address.
fn parse_location(s: &str) -> Result<LinearLocation, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [component, segment, fraction] = parts.as_slice() else {
        return Err(format!("expected component:segment:fraction, got {s:?}"));
    };
    let component = component
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad component index {component:?}: {e}"))?;
    let segment = segment
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad segment index {segment:?}: {e}"))?;
    let fraction = fraction
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad fraction {fraction:?}: {e}"))?;
    if !(0.0..=1.0).contains(&fraction) {
        return Err(format!("fraction {fraction} is outside [0, 1]"));
    }
    Ok(LinearLocation::new(component, segment, fraction))
}

fn format_location(loc: &LinearLocation) -> String {
    format!(
        "{}:{}:{}",
        loc.component_index(),
        loc.segment_index(),
        loc.segment_fraction(),
    )
}

const fn level_for(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level_for(verbose) {
        builder.filter_level(level);
    }
    builder.init();
}

fn read_geometry(path: &Path) -> Result<LinearGeometry, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(CliError::Geometry)
}

fn style_from_cli(cli: &Cli) -> Result<SvgStyle, CliError> {
    cli.style_json.as_deref().map_or_else(
        || Ok(SvgStyle::default()),
        |json| serde_json::from_str(json).map_err(CliError::Style),
    )
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let geometry = read_geometry(&cli.geometry_path)?;
    info!(
        "loaded {} component(s), {} point(s) from {}",
        geometry.num_components(),
        geometry.num_points(),
        cli.geometry_path.display(),
    );

    let extractor = LineExtractor::new(&geometry);
    let section = if cli.line_only {
        LinearGeometry::Line(extractor.extract_line(cli.start, cli.end)?)
    } else {
        extractor.extract(cli.start, cli.end)?
    };
    debug!(
        "section has {} component(s), length {}",
        section.num_components(),
        section.length(),
    );

    let output = match cli.format {
        Format::Json => serde_json::to_string_pretty(&section).map_err(CliError::Serialize)?,
        Format::Wkt => to_wkt(&section),
    };
    println!("{output}");

    if let Some(svg_path) = &cli.svg {
        let style = style_from_cli(cli)?;
        let title = cli
            .geometry_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let description = format!(
            "{} -> {}",
            format_location(&cli.start),
            format_location(&cli.end),
        );
        let metadata = SvgMetadata {
            title: title.as_deref(),
            description: Some(&description),
        };
        let svg = to_svg(&geometry, Some(&section), &metadata, &style);
        std::fs::write(svg_path, svg).map_err(|source| CliError::Write {
            path: svg_path.clone(),
            source,
        })?;
        info!("wrote {}", svg_path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
