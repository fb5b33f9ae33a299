//! Rendering a measured parcel for the terminal
//!
//! JSON output is the bare record and nothing else, so it can be piped
//! straight into another tool. Diagnostics belong on stderr.

use std::io::Write;

use crate::config::OutputFormat;
use crate::domain::ParcelRecord;
use crate::error::Result;

/// Write `record` to `out` in the requested format
///
/// `verbose` only affects text output, where it adds the vertex list.
pub fn write_record<W: Write>(
    out: &mut W,
    record: &ParcelRecord,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_summary(out, record, verbose),
        OutputFormat::Json => {
            writeln!(out, "{}", record.to_json()?)?;
            Ok(())
        }
    }
}

fn write_summary<W: Write>(out: &mut W, record: &ParcelRecord, verbose: bool) -> Result<()> {
    let centroid = record.centroid;
    let lat_dir = if centroid.lat >= 0.0 { "N" } else { "S" };
    let lon_dir = if centroid.lon >= 0.0 { "E" } else { "W" };

    writeln!(out, "{}", record.name)?;
    writeln!(out, "{}", "=".repeat(record.name.chars().count().max(8)))?;
    writeln!(out, "  Vertices:  {}", record.coordinates.len())?;
    writeln!(out, "  Area:      {:.2} ha", record.area_hectares)?;
    writeln!(out, "  Perimeter: {:.1} m", record.perimeter_meters)?;
    writeln!(
        out,
        "  Centroid:  {:.6}{} / {:.6}{}",
        centroid.lat.abs(),
        lat_dir,
        centroid.lon.abs(),
        lon_dir
    )?;

    if verbose {
        writeln!(out)?;
        writeln!(out, "Vertices:")?;
        for (i, p) in record.coordinates.iter().enumerate() {
            writeln!(out, "  {:>3}: ({:.6}, {:.6})", i, p.lat, p.lon)?;
        }
    }

    Ok(())
}
