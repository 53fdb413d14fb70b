//! Main lock-on tracker state machine implementation.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::tracker::distance::{AccumulationMode, DistanceAccumulator};
use crate::tracker::lock_state::LockState;
use crate::tracker::region::{Point, Region};
use crate::tracker::similarity::{SimilarityParams, regions_similar};

/// Configuration for the lock-on tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Thresholds for re-matching the locked target across frames
    pub similarity: SimilarityParams,
    /// Minimum elapsed time between committed position updates
    pub update_interval: Duration,
    /// Minimum centroid displacement for a committed update, in pixels
    pub distance_threshold: f32,
    /// Consecutive unmatched frames tolerated before the lock is
    /// released; `None` holds the lock indefinitely
    pub missing_streak_grace: Option<u32>,
    /// Displacement metric folded into the cumulative total
    pub accumulation: AccumulationMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            similarity: SimilarityParams::default(),
            update_interval: Duration::from_millis(300),
            distance_threshold: 2.5,
            missing_streak_grace: None,
            accumulation: AccumulationMode::default(),
        }
    }
}

/// Per-frame tracker output, consumed by the rendering layer.
///
/// The overlay fields always carry the most recently committed
/// observation, independent of whether this frame produced a new commit:
/// the last known good detection stays drawn through detection gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameOutput {
    /// Region to outline, if any observation has ever been committed
    pub overlay_region: Option<Region>,
    /// Marker position matching `overlay_region`
    pub overlay_center: Option<Point>,
    /// Running displacement total, in pixels
    pub cumulative_distance: f32,
    /// Whether this frame's observation passed the commit gate
    pub committed: bool,
}

/// Single-target tracker holding one object's identity over time.
///
/// One instance per camera feed; each instance is owned exclusively by
/// its camera's processing path and is mutated once per processed frame.
/// The tracker holds no timer of its own: the caller supplies the frame
/// timestamp.
pub struct LockOnTracker {
    config: TrackerConfig,
    state: LockState,
    /// Reference region for similarity matching; present iff locked
    tracked_region: Option<Region>,
    last_committed_region: Option<Region>,
    last_committed_center: Option<Point>,
    /// Committed center immediately prior to `last_committed_center`
    previous_center: Option<Point>,
    last_committed_at: Instant,
    missing_streak: u32,
    accumulator: DistanceAccumulator,
}

impl LockOnTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let accumulator = DistanceAccumulator::new(config.accumulation);
        Self {
            config,
            state: LockState::Unlocked,
            tracked_region: None,
            last_committed_region: None,
            last_committed_center: None,
            previous_center: None,
            last_committed_at: Instant::now(),
            missing_streak: 0,
            accumulator,
        }
    }

    /// Consume one frame's candidate regions and advance the state machine.
    ///
    /// `regions` is the extractor's output in extractor-defined order;
    /// that order decides ties both for initial acquisition (first
    /// largest wins) and for re-matching (first similar wins). `now` is
    /// the frame timestamp and must not run backwards across calls.
    ///
    /// Absence of regions or of a match is normal steady state, never an
    /// error: the overlay sticks to the last committed observation and
    /// the missing streak advances toward lock release.
    pub fn process_frame(&mut self, regions: &[Region], now: Instant) -> FrameOutput {
        let current = self.observe(regions);

        let committed = match current {
            Some(region) => self.try_commit(region, now),
            None => false,
        };

        FrameOutput {
            overlay_region: self.last_committed_region,
            overlay_center: self.last_committed_center,
            cumulative_distance: self.accumulator.total(),
            committed,
        }
    }

    /// Resolve this frame's observation: acquire a new lock or re-match
    /// the held one.
    fn observe(&mut self, regions: &[Region]) -> Option<Region> {
        if regions.is_empty() {
            self.note_miss();
            return None;
        }

        match self.state {
            LockState::Unlocked => {
                // Largest area wins; first max on ties in supplied order
                let target = regions
                    .iter()
                    .copied()
                    .reduce(|best, r| if r.area > best.area { r } else { best })?;
                self.tracked_region = Some(target);
                self.state = LockState::Locked;
                self.missing_streak = 0;
                debug!(
                    "lock acquired at {:?}, area {:.1}",
                    target.centroid(),
                    target.area
                );
                Some(target)
            }
            LockState::Locked => {
                let reference = self.tracked_region?;
                let matched = regions
                    .iter()
                    .find(|candidate| {
                        regions_similar(&reference, candidate, &self.config.similarity)
                    })
                    .copied();
                match matched {
                    Some(region) => {
                        // Re-bind the reference every frame so it drifts
                        // with slow appearance change
                        self.tracked_region = Some(region);
                        self.missing_streak = 0;
                    }
                    None => self.note_miss(),
                }
                matched
            }
        }
    }

    /// Missing-streak bookkeeping for a frame with no usable observation.
    fn note_miss(&mut self) {
        if self.state != LockState::Locked {
            return;
        }
        self.missing_streak += 1;
        if let Some(grace) = self.config.missing_streak_grace {
            if self.missing_streak > grace {
                debug!("lock released after {} unmatched frames", self.missing_streak);
                self.state = LockState::Unlocked;
                self.tracked_region = None;
                self.missing_streak = 0;
            }
        }
    }

    /// Apply the temporal + spatial double gate and commit the
    /// observation if it passes. Returns whether a commit happened.
    fn try_commit(&mut self, region: Region, now: Instant) -> bool {
        let center = region.centroid();
        let accepted = match self.last_committed_center {
            // First-ever observation always commits
            None => true,
            Some(last) => {
                now.duration_since(self.last_committed_at) >= self.config.update_interval
                    && center.distance_to(last) >= self.config.distance_threshold
            }
        };
        if !accepted {
            return false;
        }

        self.previous_center = self.last_committed_center;
        self.last_committed_region = Some(region);
        self.last_committed_center = Some(center);
        self.last_committed_at = now;

        if let Some(previous) = self.previous_center {
            let delta = self.accumulator.accumulate(previous, center);
            trace!(
                "commit at {:?}, step {:.2}px, total {:.2}px",
                center,
                delta,
                self.accumulator.total()
            );
        } else {
            trace!("first commit at {:?}", center);
        }
        true
    }

    /// Restore construction-time state: unlocked, no committed points,
    /// zero distance, zero streak. The commit timestamp is left alone;
    /// the first commit after a reset takes the first-observation path,
    /// so a stale stamp is unobservable.
    pub fn reset(&mut self) {
        self.state = LockState::Unlocked;
        self.tracked_region = None;
        self.last_committed_region = None;
        self.last_committed_center = None;
        self.previous_center = None;
        self.missing_streak = 0;
        self.accumulator.reset();
    }

    #[inline]
    pub fn state(&self) -> LockState {
        self.state
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    #[inline]
    pub fn cumulative_distance(&self) -> f32 {
        self.accumulator.total()
    }

    #[inline]
    pub fn missing_streak(&self) -> u32 {
        self.missing_streak
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::region::Rect;

    fn region(x: i32, y: i32, w: i32, h: i32, area: f32) -> Region {
        Region::new(Rect::new(x, y, w, h), area)
    }

    fn grace_config(grace: u32) -> TrackerConfig {
        TrackerConfig {
            missing_streak_grace: Some(grace),
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn test_acquires_largest_region() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let small = region(0, 0, 5, 5, 10.0);
        let large = region(50, 50, 20, 20, 50.0);

        let out = tracker.process_frame(&[small, large], Instant::now());
        assert!(tracker.is_locked());
        assert!(out.committed);
        assert_eq!(out.overlay_center, Some(large.centroid()));

        // Same frame in the opposite order locks the same target
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let out = tracker.process_frame(&[large, small], Instant::now());
        assert_eq!(out.overlay_center, Some(large.centroid()));
    }

    #[test]
    fn test_first_max_wins_on_area_tie() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let first = region(0, 0, 10, 10, 50.0);
        let second = region(100, 100, 10, 10, 50.0);

        let out = tracker.process_frame(&[first, second], Instant::now());
        assert_eq!(out.overlay_center, Some(first.centroid()));
    }

    #[test]
    fn test_empty_frame_keeps_sticky_overlay() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let target = region(0, 0, 10, 10, 100.0);
        let t0 = Instant::now();

        tracker.process_frame(&[target], t0);
        let out = tracker.process_frame(&[], t0 + Duration::from_millis(30));
        assert!(!out.committed);
        assert_eq!(out.overlay_region, Some(target));
        assert_eq!(out.overlay_center, Some(target.centroid()));
        assert!(tracker.is_locked());
    }

    #[test]
    fn test_rebinds_to_first_similar_candidate() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);

        // Both candidates are similar; the first in supplied order wins
        let near = region(4, 0, 10, 10, 95.0);
        let also_near = region(0, 4, 10, 10, 98.0);
        tracker.process_frame(&[near, also_near], t0 + Duration::from_millis(400));
        let out = tracker.process_frame(&[], t0 + Duration::from_millis(430));
        assert_eq!(out.overlay_region, Some(near));
    }

    #[test]
    fn test_dissimilar_regions_do_not_steal_lock() {
        let mut tracker = LockOnTracker::new(grace_config(8));
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);

        // A large far-away region must not be mistaken for the target
        let intruder = region(300, 300, 40, 40, 900.0);
        let out = tracker.process_frame(&[intruder], t0 + Duration::from_millis(30));
        assert!(!out.committed);
        assert_eq!(tracker.missing_streak(), 1);
        assert!(tracker.is_locked());
    }

    #[test]
    fn test_lock_released_after_grace_exceeded() {
        let mut tracker = LockOnTracker::new(grace_config(2));
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);

        for i in 1..=3u64 {
            tracker.process_frame(&[], t0 + Duration::from_millis(30 * i));
        }
        assert!(!tracker.is_locked());
        assert_eq!(tracker.missing_streak(), 0);

        // Re-acquisition picks the largest region fresh; by now both
        // commit gates pass, so the overlay jumps to the new target
        let newcomer = region(200, 200, 30, 30, 500.0);
        let out = tracker.process_frame(&[newcomer], t0 + Duration::from_millis(500));
        assert!(tracker.is_locked());
        assert_eq!(out.overlay_region, Some(newcomer));
    }

    #[test]
    fn test_never_releases_without_grace() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);

        for i in 1..=50u64 {
            tracker.process_frame(&[], t0 + Duration::from_millis(30 * i));
        }
        assert!(tracker.is_locked());
        assert_eq!(tracker.missing_streak(), 50);
    }

    #[test]
    fn test_commit_gate_requires_both_thresholds() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);

        // 10px offset but only 100ms elapsed: time gate fails
        let moved = region(10, 0, 10, 10, 100.0);
        let out = tracker.process_frame(&[moved], t0 + Duration::from_millis(100));
        assert!(!out.committed);
        assert_eq!(out.overlay_center, Some(Point::new(5, 5)));

        // 1px offset after 400ms: distance gate fails
        let nudged = region(1, 0, 10, 10, 100.0);
        let out = tracker.process_frame(&[nudged], t0 + Duration::from_millis(400));
        assert!(!out.committed);

        // 10px offset after 800ms: both gates pass
        let out = tracker.process_frame(&[moved], t0 + Duration::from_millis(800));
        assert!(out.committed);
        assert_eq!(out.overlay_center, Some(Point::new(15, 5)));
        assert!((out.cumulative_distance - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_first_commit_adds_no_distance() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let out = tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], Instant::now());
        assert!(out.committed);
        assert_eq!(out.cumulative_distance, 0.0);
    }

    #[test]
    fn test_reset_matches_fresh_tracker() {
        let mut tracker = LockOnTracker::new(TrackerConfig::default());
        let t0 = Instant::now();
        tracker.process_frame(&[region(0, 0, 10, 10, 100.0)], t0);
        tracker.process_frame(&[region(30, 0, 10, 10, 100.0)], t0 + Duration::from_millis(400));
        assert!(tracker.cumulative_distance() > 0.0);

        tracker.reset();
        assert!(!tracker.is_locked());
        assert_eq!(tracker.cumulative_distance(), 0.0);
        assert_eq!(tracker.missing_streak(), 0);

        // Next non-empty frame re-runs largest-area acquisition and the
        // first commit bypasses the gates, as on a fresh tracker
        let small = region(0, 0, 5, 5, 10.0);
        let large = region(50, 50, 20, 20, 50.0);
        let out = tracker.process_frame(&[small, large], t0 + Duration::from_millis(410));
        assert!(out.committed);
        assert_eq!(out.overlay_region, Some(large));
        assert_eq!(out.cumulative_distance, 0.0);
    }
}
