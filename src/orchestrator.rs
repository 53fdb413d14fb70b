//! Multi-camera orchestration: one owned tracker per camera feed.
//!
//! Each camera gets its own [`LockOnTracker`] instance held in an indexed
//! map, so no tracking state is ever shared between feeds. Resetting or
//! updating one camera leaves its siblings untouched.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use thiserror::Error;

use crate::tracker::{FrameOutput, LockOnTracker, Region, TrackerConfig};

/// Identifier of one camera feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(pub u32);

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camera {}", self.0)
    }
}

/// Errors surfaced by the orchestrator. The trackers themselves have no
/// failure modes; only addressing a feed can go wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("unknown {0}")]
    UnknownCamera(CameraId),
    #[error("{0} is already registered")]
    DuplicateCamera(CameraId),
}

/// Holds N independent lock-on trackers, one per registered camera.
#[derive(Default)]
pub struct MultiCameraTracker {
    trackers: HashMap<CameraId, LockOnTracker>,
}

impl MultiCameraTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a camera with its own tracker configuration.
    pub fn add_camera(
        &mut self,
        id: CameraId,
        config: TrackerConfig,
    ) -> Result<(), OrchestratorError> {
        if self.trackers.contains_key(&id) {
            return Err(OrchestratorError::DuplicateCamera(id));
        }
        self.trackers.insert(id, LockOnTracker::new(config));
        Ok(())
    }

    /// Drop a camera and its tracker state.
    pub fn remove_camera(&mut self, id: CameraId) -> Result<(), OrchestratorError> {
        self.trackers
            .remove(&id)
            .map(|_| ())
            .ok_or(OrchestratorError::UnknownCamera(id))
    }

    /// Feed one frame's candidate regions into the addressed camera's
    /// tracker.
    pub fn process_frame(
        &mut self,
        id: CameraId,
        regions: &[Region],
        now: Instant,
    ) -> Result<FrameOutput, OrchestratorError> {
        let tracker = self
            .trackers
            .get_mut(&id)
            .ok_or(OrchestratorError::UnknownCamera(id))?;
        Ok(tracker.process_frame(regions, now))
    }

    /// Reinitialize exactly one camera's tracking state.
    pub fn reset(&mut self, id: CameraId) -> Result<(), OrchestratorError> {
        let tracker = self
            .trackers
            .get_mut(&id)
            .ok_or(OrchestratorError::UnknownCamera(id))?;
        tracker.reset();
        Ok(())
    }

    pub fn cumulative_distance(&self, id: CameraId) -> Result<f32, OrchestratorError> {
        self.trackers
            .get(&id)
            .map(LockOnTracker::cumulative_distance)
            .ok_or(OrchestratorError::UnknownCamera(id))
    }

    /// Save-time snapshot of every camera's running distance, ordered by
    /// camera id for stable reporting columns.
    pub fn distances(&self) -> Vec<(CameraId, f32)> {
        let mut snapshot: Vec<_> = self
            .trackers
            .iter()
            .map(|(&id, tracker)| (id, tracker.cumulative_distance()))
            .collect();
        snapshot.sort_by_key(|&(id, _)| id);
        snapshot
    }

    pub fn tracker(&self, id: CameraId) -> Option<&LockOnTracker> {
        self.trackers.get(&id)
    }

    /// Registered camera ids, ordered.
    pub fn cameras(&self) -> Vec<CameraId> {
        let mut ids: Vec<_> = self.trackers.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}
