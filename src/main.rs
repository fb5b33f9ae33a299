use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

use parcelmetrics::config::{FileConfig, OutputFormat};
use parcelmetrics::geometry::simplify_ring;
use parcelmetrics::input::{RingFormat, read_ring_as};
use parcelmetrics::report::write_record;
use parcelmetrics::track::{RingRecorder, simulate_orbit};
use parcelmetrics::{GeoPoint, ParcelRecord};

/// Measure farm parcels: area (ha), perimeter (m) and centroid from a lat/lon ring
///
/// Examples:
///   # Measure a ring stored as lat,lon lines
///   parcelmetrics north-field.txt
///
///   # GeoJSON polygon, JSON output saved for the dashboard
///   parcelmetrics talhao.geojson --name "Talhão 3" --format json -o talhao3.json
///
///   # GeoJSON saved under another extension
///   parcelmetrics export.geo --input-format geojson
///
///   # Smooth GPS jitter before measuring
///   parcelmetrics track.json --simplify 3
///
///   # Fly a simulated drone orbit and measure it
///   parcelmetrics --simulate-drone --lat -15.775 --lon -47.925 --radius 300
#[derive(Parser, Debug)]
#[command(name = "parcelmetrics")]
#[command(version, about, long_about = None)]
struct Args {
    /// Ring file: .json, .geojson, or one "lat,lon" per line
    input: Option<PathBuf>,

    /// Ring file layout: json, geojson or text (defaults to a guess from the extension)
    #[arg(long)]
    input_format: Option<RingFormat>,

    /// Path to config file (optional, auto-searches parcelmetrics.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parcel name stored in the record
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Output format on stdout
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the parcel record as JSON to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Simplification tolerance in meters (0 = off)
    #[arg(long)]
    simplify: Option<f64>,

    /// Record a simulated drone orbit instead of reading a file
    #[arg(long, conflicts_with = "input", requires = "lat")]
    simulate_drone: bool,

    /// Orbit center latitude (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Orbit center longitude (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Orbit radius in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Number of GPS fixes in the orbit
    #[arg(long)]
    fixes: Option<usize>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Command-line flags layered over the config file
#[derive(Debug)]
struct Settings {
    name: String,
    format: OutputFormat,
    input_format: Option<RingFormat>,
    output: Option<PathBuf>,
    simplify: f64,
    radius: f64,
    fixes: usize,
    verbose: bool,
}

impl Settings {
    fn merge(args: &Args, file_config: &FileConfig) -> Self {
        Self {
            name: args.name.clone().unwrap_or_else(|| file_config.name.clone()),
            format: args.format.unwrap_or(file_config.format),
            input_format: args.input_format.or(file_config.input_format),
            output: args.output.clone().or_else(|| file_config.output.clone()),
            simplify: args.simplify.unwrap_or(file_config.simplify_tolerance_m),
            radius: args.radius.unwrap_or(file_config.drone.radius_m),
            fixes: args.fixes.unwrap_or(file_config.drone.fixes),
            verbose: args.verbose || file_config.verbose,
        }
    }

    fn log_level(&self) -> LevelFilter {
        log_level(self.verbose)
    }
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Start from the flag so config discovery is logged, then apply the merged level
    let (filter, log_handle) = reload::Layer::new(log_level(args.verbose));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            FileConfig::from_path(config_path)
                .context(format!("Failed to load config file: {:?}", config_path))?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let settings = Settings::merge(&args, &file_config);
    log_handle
        .modify(|level| *level = settings.log_level())
        .context("Failed to apply log level")?;

    if settings.simplify < 0.0 {
        bail!("--simplify must not be negative");
    }

    if settings.verbose {
        eprintln!("Configuration:");
        eprintln!("  Name: {}", settings.name);
        eprintln!("  Format: {:?}", settings.format);
        if let Some(input_format) = settings.input_format {
            eprintln!("  Input format: {:?}", input_format);
        }
        eprintln!("  Simplify tolerance: {}m", settings.simplify);
        if args.simulate_drone {
            eprintln!(
                "  Drone orbit: {}m radius, {} fixes",
                settings.radius, settings.fixes
            );
        }
        if let Some(ref out) = settings.output {
            eprintln!("  Output: {}", out.display());
        }
        eprintln!();
    }

    let record = if args.simulate_drone {
        let (Some(lat), Some(lon)) = (args.lat, args.lon) else {
            bail!("--simulate-drone requires --lat and --lon");
        };
        if settings.radius <= 0.0 {
            bail!("--radius must be positive");
        }

        let mut recorder =
            RingRecorder::new(settings.name.clone()).with_simplify(settings.simplify);
        for fix in simulate_orbit(GeoPoint::new(lat, lon), settings.radius, settings.fixes) {
            recorder.record(fix).context("Drone reported an invalid fix")?;
        }
        recorder.finish().context("Failed to measure drone track")?
    } else {
        let Some(ref path) = args.input else {
            bail!("Must provide an input ring file, or --simulate-drone with --lat and --lon");
        };

        let ring = read_ring_as(path, settings.input_format)
            .context(format!("Failed to read ring from {:?}", path))?;
        let ring = simplify_ring(&ring, settings.simplify);
        ParcelRecord::new(settings.name.clone(), ring).context("Failed to measure parcel")?
    };

    let mut stdout = std::io::stdout().lock();
    write_record(&mut stdout, &record, settings.format, settings.verbose)
        .context("Failed to print record")?;
    drop(stdout);

    if let Some(ref path) = settings.output {
        let json = record.to_json().context("Failed to serialize record")?;
        std::fs::write(path, json).context(format!("Failed to write record: {:?}", path))?;
        if settings.format == OutputFormat::Text {
            println!();
            println!("Record written to {}", path.display());
        }
    }

    Ok(())
}
