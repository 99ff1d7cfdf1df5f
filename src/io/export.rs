//! CSV export for batch estimation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Error;
use crate::types::PowerResult;

/// Column header for CSV batch export.
const HEADER: &str = "timestamp,poa_global_w_m2,cell_temp_c,effective_irradiance_w_m2,\
                      dc_power_w,ac_power_w,error";

/// Exports batch results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per batch entry; failed
/// rows keep their position with the error message in the last column.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Complete batch results, one per input row
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[Result<PowerResult, Error>], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes batch results as CSV to any writer.
///
/// # Arguments
///
/// * `results` - Complete batch results, one per input row
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[Result<PowerResult, Error>], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        match r {
            Ok(row) => {
                wtr.write_record(&[
                    row.timestamp.to_rfc3339(),
                    format!("{:.2}", row.poa_global),
                    format!("{:.2}", row.cell_temperature),
                    format!("{:.2}", row.effective_irradiance),
                    format!("{:.3}", row.dc_power),
                    format!("{:.3}", row.ac_power),
                    String::new(),
                ])?;
            }
            Err(e) => {
                let msg = e.to_string();
                wtr.write_record(&["", "", "", "", "", "", msg.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
