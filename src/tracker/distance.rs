//! Cumulative displacement accumulation over committed position updates.

use serde::Deserialize;

use crate::tracker::region::Point;

/// Displacement metric folded into the running total on each commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccumulationMode {
    /// Full planar motion: `sqrt(dx^2 + dy^2)`. Always non-negative, so
    /// the total is monotonically non-decreasing.
    #[default]
    Euclidean,
    /// Unsigned motion along the vertical axis of travel: `|dy|`.
    VerticalAbsolute,
    /// Signed vertical motion: `dy`. The only mode in which the total
    /// can decrease.
    VerticalSigned,
}

/// Folds committed position updates into a running displacement total,
/// in pixels.
#[derive(Debug, Clone, Default)]
pub struct DistanceAccumulator {
    total: f32,
    mode: AccumulationMode,
}

impl DistanceAccumulator {
    pub fn new(mode: AccumulationMode) -> Self {
        Self { total: 0.0, mode }
    }

    /// Fold one committed step into the total and return the delta that
    /// was added.
    pub fn accumulate(&mut self, previous: Point, current: Point) -> f32 {
        let delta = match self.mode {
            AccumulationMode::Euclidean => previous.distance_to(current),
            AccumulationMode::VerticalAbsolute => (current.y - previous.y).abs() as f32,
            AccumulationMode::VerticalSigned => (current.y - previous.y) as f32,
        };
        self.total += delta;
        delta
    }

    /// Running total since construction or the last reset.
    #[inline]
    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_accumulation() {
        let mut acc = DistanceAccumulator::new(AccumulationMode::Euclidean);
        let delta = acc.accumulate(Point::new(0, 0), Point::new(3, 4));
        assert!((delta - 5.0).abs() < 1e-6);
        acc.accumulate(Point::new(3, 4), Point::new(3, 14));
        assert!((acc.total() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_never_decreases() {
        let mut acc = DistanceAccumulator::new(AccumulationMode::Euclidean);
        acc.accumulate(Point::new(10, 10), Point::new(0, 0));
        assert!(acc.total() > 0.0);
    }

    #[test]
    fn test_vertical_absolute() {
        let mut acc = DistanceAccumulator::new(AccumulationMode::VerticalAbsolute);
        // Horizontal motion contributes nothing
        assert_eq!(acc.accumulate(Point::new(0, 5), Point::new(30, 5)), 0.0);
        assert_eq!(acc.accumulate(Point::new(0, 5), Point::new(0, 1)), 4.0);
        assert_eq!(acc.total(), 4.0);
    }

    #[test]
    fn test_vertical_signed_can_decrease() {
        let mut acc = DistanceAccumulator::new(AccumulationMode::VerticalSigned);
        acc.accumulate(Point::new(0, 0), Point::new(0, 10));
        acc.accumulate(Point::new(0, 10), Point::new(0, 4));
        assert_eq!(acc.total(), 4.0);
    }

    #[test]
    fn test_reset() {
        let mut acc = DistanceAccumulator::new(AccumulationMode::Euclidean);
        acc.accumulate(Point::new(0, 0), Point::new(3, 4));
        acc.reset();
        assert_eq!(acc.total(), 0.0);
    }
}
