//! CameraPipeline for combining region extraction with tracking.

use std::time::Instant;

use crate::tracker::{FrameOutput, LockOnTracker, TrackerConfig};

use super::RegionSource;

/// A combined per-camera pipeline that bundles region extraction with the
/// lock-on tracker.
///
/// This struct provides a convenient way to run end-to-end tracking for
/// one camera feed by combining any `RegionSource` with a `LockOnTracker`.
pub struct CameraPipeline<S: RegionSource> {
    source: S,
    tracker: LockOnTracker,
}

impl<S: RegionSource> CameraPipeline<S> {
    /// Create a new camera pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self {
            source,
            tracker: LockOnTracker::new(config),
        }
    }

    /// Create a new camera pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackerConfig::default())
    }

    /// Process a single frame and return the tracker's overlay output.
    ///
    /// This method runs region extraction on the input frame and then
    /// advances the tracker with the candidate regions.
    ///
    /// # Arguments
    /// * `input` - Raw frame bytes
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    /// * `now` - Frame timestamp, supplied by the scheduling loop
    ///
    /// # Returns
    /// The tracker's `FrameOutput`, or an extraction error.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        now: Instant,
    ) -> Result<FrameOutput, S::Error> {
        let regions = self.source.extract(input, width, height)?;
        Ok(self.tracker.process_frame(&regions, now))
    }

    /// Get a reference to the underlying region source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying region source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &LockOnTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut LockOnTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Rect, Region};

    struct MockExtractor {
        regions: Vec<Region>,
    }

    impl RegionSource for MockExtractor {
        type Error = std::convert::Infallible;

        fn extract(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Region>, Self::Error> {
            Ok(self.regions.clone())
        }
    }

    #[test]
    fn test_camera_pipeline() {
        let source = MockExtractor {
            regions: vec![Region::new(Rect::new(10, 20, 40, 60), 950.0)],
        };

        let mut pipeline = CameraPipeline::with_default_config(source);
        let out = pipeline.process_frame(&[], 640, 480, Instant::now()).unwrap();

        // First frame locks on and commits the first observation
        assert!(out.committed);
        assert!(pipeline.tracker().is_locked());
        assert_eq!(out.overlay_center, Some(Rect::new(10, 20, 40, 60).center()));
    }

    #[test]
    fn test_empty_extraction_is_not_an_error() {
        let source = MockExtractor { regions: vec![] };
        let mut pipeline = CameraPipeline::with_default_config(source);
        let out = pipeline.process_frame(&[], 640, 480, Instant::now()).unwrap();
        assert!(out.overlay_region.is_none());
        assert!(!pipeline.tracker().is_locked());
    }
}
