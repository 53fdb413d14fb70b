//! Single-target lock-on motion tracking for multi-camera bench monitors.
//!
//! The core is a per-camera state machine that consumes a stream of
//! candidate regions (contour bounding boxes with areas) and produces a
//! stable estimate of one tracked object's position and cumulative
//! displacement, despite noisy, flickering per-frame detections:
//!
//! - While unlocked, the largest candidate wins and becomes the target.
//! - While locked, the first sufficiently similar candidate each frame
//!   re-binds the reference, so the lock follows slow appearance change.
//! - Position updates pass a temporal + spatial double gate before they
//!   are committed and folded into the running distance.
//! - Detection gaps advance a missing streak that can release the lock
//!   for re-acquisition; the last committed overlay stays drawn.
//!
//! [`MultiCameraTracker`] holds one independent tracker per camera feed.
//! The vision front end plugs in behind [`RegionSource`]; temperature
//! telemetry buffering and the delimited sample log live in
//! [`telemetry`] and [`export`].

pub mod config;
pub mod export;
pub mod integration;
pub mod orchestrator;
pub mod telemetry;
pub mod tracker;

pub use config::{ConfigError, MonitorConfig};
pub use integration::{CameraPipeline, IntoRegions, RegionBuilder, RegionSource};
pub use orchestrator::{CameraId, MultiCameraTracker, OrchestratorError};
pub use tracker::{
    AccumulationMode, FrameOutput, LockOnTracker, LockState, Point, Rect, Region, TrackerConfig,
};
