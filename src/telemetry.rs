//! Temperature telemetry buffering and serial line parsing.
//!
//! The serial reader runs on its own thread and hands readings to the
//! UI/reporting layer exclusively through [`TelemetryBuffer`], a bounded
//! history behind a mutex. The tracker subsystem shares no mutable state
//! with telemetry; it only reads the ready-to-track latch.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use thiserror::Error;

/// Default number of samples retained for plotting and export.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Sensor-1 temperature at which tracking is considered worth starting.
pub const DEFAULT_READY_THRESHOLD: f32 = 37.0;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("missing {0} reading in serial line")]
    MissingReading(&'static str),
    #[error("invalid {field} reading: {value:?}")]
    InvalidReading { field: &'static str, value: String },
    #[error("telemetry buffer lock poisoned")]
    LockPoisoned,
}

/// One paired temperature reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempSample {
    pub at: DateTime<Local>,
    pub sensor1: f32,
    pub sensor2: f32,
}

/// Parse one serial telemetry line of the form `"T1:36.52 T2:37.10"`.
///
/// Tokens may appear in any order among other fields; the first `T1:` and
/// `T2:` prefixed tokens are taken.
pub fn parse_line(line: &str) -> Result<(f32, f32), TelemetryError> {
    let t1 = parse_reading(line, "T1")?;
    let t2 = parse_reading(line, "T2")?;
    Ok((t1, t2))
}

fn parse_reading(line: &str, field: &'static str) -> Result<f32, TelemetryError> {
    let token = line
        .split_whitespace()
        .find_map(|part| part.strip_prefix(field)?.strip_prefix(':'))
        .ok_or(TelemetryError::MissingReading(field))?;
    token
        .parse::<f32>()
        .map_err(|_| TelemetryError::InvalidReading {
            field,
            value: token.to_string(),
        })
}

struct BufferInner {
    samples: VecDeque<TempSample>,
    ready: bool,
}

/// Bounded temperature history shared between the serial reader thread
/// and the reporting layer.
///
/// Holds the most recent `capacity` samples. Once a sensor-1 reading
/// reaches the ready threshold, the ready-to-track latch stays set until
/// [`TelemetryBuffer::clear`].
pub struct TelemetryBuffer {
    inner: Mutex<BufferInner>,
    capacity: usize,
    ready_threshold: f32,
}

impl TelemetryBuffer {
    pub fn new(capacity: usize, ready_threshold: f32) -> Self {
        Self {
            inner: Mutex::new(BufferInner {
                samples: VecDeque::with_capacity(capacity),
                ready: false,
            }),
            capacity,
            ready_threshold,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BufferInner>, TelemetryError> {
        self.inner.lock().map_err(|_| TelemetryError::LockPoisoned)
    }

    /// Append a reading, evicting the oldest once at capacity.
    pub fn push(&self, sample: TempSample) -> Result<(), TelemetryError> {
        let mut inner = self.lock()?;
        if inner.samples.len() == self.capacity {
            inner.samples.pop_front();
        }
        if sample.sensor1 >= self.ready_threshold {
            inner.ready = true;
        }
        inner.samples.push_back(sample);
        Ok(())
    }

    /// Most recent reading, if any.
    pub fn latest(&self) -> Result<Option<TempSample>, TelemetryError> {
        Ok(self.lock()?.samples.back().copied())
    }

    /// Copy of the buffered history, oldest first.
    pub fn snapshot(&self) -> Result<Vec<TempSample>, TelemetryError> {
        Ok(self.lock()?.samples.iter().copied().collect())
    }

    /// Whether the ready-to-track latch has been set.
    pub fn ready_to_track(&self) -> Result<bool, TelemetryError> {
        Ok(self.lock()?.ready)
    }

    /// Drop the history and clear the ready latch.
    pub fn clear(&self) -> Result<(), TelemetryError> {
        let mut inner = self.lock()?;
        inner.samples.clear();
        inner.ready = false;
        Ok(())
    }

    pub fn len(&self) -> Result<usize, TelemetryError> {
        Ok(self.lock()?.samples.len())
    }

    pub fn is_empty(&self) -> Result<bool, TelemetryError> {
        Ok(self.lock()?.samples.is_empty())
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE, DEFAULT_READY_THRESHOLD)
    }
}
