//! Monitor configuration: camera set, tracker thresholds, telemetry.
//!
//! Configuration is read from a TOML file named by the `LOCKTRACK_CONFIG`
//! environment variable (compiled defaults apply when unset). Every field
//! is optional in the file; absent fields resolve to the defaults below.

use std::io;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::orchestrator::CameraId;
use crate::tracker::{AccumulationMode, SimilarityParams, TrackerConfig};
use crate::telemetry::{DEFAULT_BUFFER_SIZE, DEFAULT_READY_THRESHOLD};

/// Environment variable naming the config file path.
pub const CONFIG_ENV: &str = "LOCKTRACK_CONFIG";

const DEFAULT_CAMERAS: &[u32] = &[0, 1];
const DEFAULT_FRAME_INTERVAL_MS: u64 = 30;
const DEFAULT_UPDATE_INTERVAL_MS: u64 = 300;
const DEFAULT_DISTANCE_THRESHOLD: f32 = 2.5;

#[derive(Debug, Deserialize, Default)]
struct MonitorConfigFile {
    cameras: Option<Vec<u32>>,
    frame_interval_ms: Option<u64>,
    tracker: Option<TrackerConfigFile>,
    telemetry: Option<TelemetryConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct TrackerConfigFile {
    position_threshold: Option<f32>,
    area_threshold: Option<f32>,
    update_interval_ms: Option<u64>,
    distance_threshold: Option<f32>,
    /// Absent means the lock is never released
    missing_streak_grace: Option<u32>,
    accumulation: Option<AccumulationMode>,
}

#[derive(Debug, Deserialize, Default)]
struct TelemetryConfigFile {
    buffer_size: Option<usize>,
    ready_threshold: Option<f32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Resolved monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Camera feeds to register, in reporting order
    pub cameras: Vec<CameraId>,
    /// Cadence at which the scheduler pulls frames per camera
    pub frame_interval: Duration,
    pub tracker: TrackerConfig,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub buffer_size: usize,
    pub ready_threshold: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::resolve(MonitorConfigFile::default())
    }
}

impl MonitorConfig {
    /// Load configuration from the path named by `LOCKTRACK_CONFIG`, or
    /// compiled defaults when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => {
                info!("{} unset, using default configuration", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: MonitorConfigFile =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let cfg = Self::resolve(file);
        cfg.validate()?;
        info!("configuration loaded from {}", path.display());
        Ok(cfg)
    }

    fn resolve(file: MonitorConfigFile) -> Self {
        let tracker_file = file.tracker.unwrap_or_default();
        let telemetry_file = file.telemetry.unwrap_or_default();

        let cameras = file
            .cameras
            .unwrap_or_else(|| DEFAULT_CAMERAS.to_vec())
            .into_iter()
            .map(CameraId)
            .collect();

        let similarity_defaults = SimilarityParams::default();
        let tracker = TrackerConfig {
            similarity: SimilarityParams {
                position_threshold: tracker_file
                    .position_threshold
                    .unwrap_or(similarity_defaults.position_threshold),
                area_threshold: tracker_file
                    .area_threshold
                    .unwrap_or(similarity_defaults.area_threshold),
            },
            update_interval: Duration::from_millis(
                tracker_file
                    .update_interval_ms
                    .unwrap_or(DEFAULT_UPDATE_INTERVAL_MS),
            ),
            distance_threshold: tracker_file
                .distance_threshold
                .unwrap_or(DEFAULT_DISTANCE_THRESHOLD),
            missing_streak_grace: tracker_file.missing_streak_grace,
            accumulation: tracker_file.accumulation.unwrap_or_default(),
        };

        let telemetry = TelemetrySettings {
            buffer_size: telemetry_file.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE),
            ready_threshold: telemetry_file
                .ready_threshold
                .unwrap_or(DEFAULT_READY_THRESHOLD),
        };

        Self {
            cameras,
            frame_interval: Duration::from_millis(
                file.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS),
            ),
            tracker,
            telemetry,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cameras.is_empty() {
            return Err(ConfigError::Invalid("cameras must not be empty".into()));
        }
        let mut seen = self.cameras.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.cameras.len() {
            return Err(ConfigError::Invalid("duplicate camera id".into()));
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::Invalid("frame_interval_ms must be > 0".into()));
        }
        let similarity = &self.tracker.similarity;
        if similarity.position_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "position_threshold must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&similarity.area_threshold) {
            return Err(ConfigError::Invalid(
                "area_threshold must be within 0..=1".into(),
            ));
        }
        if self.tracker.distance_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "distance_threshold must be >= 0".into(),
            ));
        }
        if self.telemetry.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be > 0".into()));
        }
        Ok(())
    }
}
