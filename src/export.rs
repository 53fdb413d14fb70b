//! Delimited sample log written at save time.
//!
//! One row per buffered telemetry sample, carrying the save-time
//! distance snapshot of every registered camera alongside the
//! temperature readings, under a header row naming the columns.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use log::info;
use thiserror::Error;

use crate::orchestrator::CameraId;
use crate::telemetry::TempSample;

/// Timestamp format used in log rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write sample log: {0}")]
    Io(#[from] io::Error),
}

/// Timestamped default log file name, e.g. `tracking_log_20260807_141500.csv`.
pub fn default_log_filename(now: DateTime<Local>) -> String {
    format!("tracking_log_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write the sample log to any writer.
///
/// `distances` is the save-time snapshot per camera; every row repeats
/// it, since the running totals are not recorded per sample.
pub fn write_sample_log<W: Write>(
    mut out: W,
    samples: &[TempSample],
    distances: &[(CameraId, f32)],
) -> Result<(), ExportError> {
    write!(out, "Time,Temperature_1,Temperature_2")?;
    for (id, _) in distances {
        write!(out, ",Camera{}_Distance", id.0)?;
    }
    writeln!(out)?;

    for sample in samples {
        write!(
            out,
            "{},{:.2},{:.2}",
            sample.at.format(TIMESTAMP_FORMAT),
            sample.sensor1,
            sample.sensor2
        )?;
        for (_, distance) in distances {
            write!(out, ",{:.2}", distance)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the sample log to a file at `path`.
pub fn save_sample_log<P: AsRef<Path>>(
    path: P,
    samples: &[TempSample],
    distances: &[(CameraId, f32)],
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    write_sample_log(file, samples, distances)?;
    info!("sample log saved to {} ({} rows)", path.display(), samples.len());
    Ok(())
}
