// src/main.rs
//! Location Export - convert a dumped fix collection to GeoJSON, GPX or KML

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use location_export::{config::ExportConfig, ExportFormat, Exporter, Wrapper};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    Point,
    Line,
    Polygon,
}

#[derive(Debug, Parser)]
#[command(name = "location-export", version, about = "Convert raw positional fixes into GeoJSON, GPX or KML")]
struct Cli {
    /// Dump file produced by `Exporter::dump`
    dump: PathBuf,

    /// Geometry to export
    #[arg(short, long, value_enum, default_value_t = Shape::Point)]
    shape: Shape,

    /// geojson, gpx or kml (case-insensitive)
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Drop altitude before exporting
    #[arg(long)]
    flatten: bool,

    /// Attach a bounding box
    #[arg(long)]
    bbox: bool,

    /// GeoJSON wrapper: feature, geometry or none
    #[arg(short, long)]
    wrapper: Option<Wrapper>,

    /// GeoJSON: merge points into one MultiPoint
    #[arg(long)]
    multi_point: bool,

    /// GPX: write lines as a route instead of a track
    #[arg(long)]
    route: bool,

    /// KML: placemark name for lines
    #[arg(long)]
    name: Option<String>,

    /// Write compact output
    #[arg(long)]
    compact: bool,

    /// Config file (defaults to ~/.config/location-export/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store the effective format/flatten/bbox/wrapper settings as new defaults
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => ExportConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ExportConfig::load().context("loading config")?,
    };

    // Command line flags override stored defaults
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(wrapper) = cli.wrapper {
        config.wrapper = wrapper;
    }
    config.flatten |= cli.flatten;
    config.bbox |= cli.bbox;
    if cli.compact {
        config.pretty = false;
    }

    if cli.save_config {
        match cli.config {
            Some(ref path) => config
                .save_to(path)
                .with_context(|| format!("saving config to {}", path.display()))?,
            None => config.save().context("saving config")?,
        }
    }

    let dump = std::fs::read_to_string(&cli.dump)
        .with_context(|| format!("reading dump {}", cli.dump.display()))?;
    let exporter = Exporter::load(&dump).context("loading dump")?;

    let mut options = config.to_options();
    options.multi_point = cli.multi_point;
    options.route = cli.route;
    options.name = cli.name;

    tracing::info!(records = exporter.len(), format = %config.format, shape = ?cli.shape, "exporting");

    let export = match cli.shape {
        Shape::Point => exporter.to_point(config.format, &options),
        Shape::Line => exporter.to_line(config.format, &options),
        Shape::Polygon => exporter.to_polygon(config.format, &options),
    }
    .with_context(|| format!("exporting {:?} as {}", cli.shape, config.format.display_name()))?;

    println!("{}", export.to_text(config.pretty)?);

    Ok(())
}
