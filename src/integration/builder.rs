//! Builder for creating Region objects from various input formats.

use crate::tracker::{Rect, Region};

/// Builder for assembling `Region` objects from various geometry formats.
#[derive(Debug, Clone, Default)]
pub struct RegionBuilder {
    bounds: Rect,
    area: Option<f32>,
}

impl RegionBuilder {
    /// Create a new region builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding geometry in TLWH format (top-left x, top-left y, width, height).
    pub fn tlwh(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.bounds = Rect::new(x, y, width, height);
        self
    }

    /// Set bounding geometry in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.bounds = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set the measured region area (e.g. contour area).
    pub fn area(mut self, area: f32) -> Self {
        self.area = Some(area);
        self
    }

    /// Build the final `Region`.
    ///
    /// Falls back to the bounding-box area when no measured area was
    /// supplied.
    pub fn build(self) -> Region {
        let area = self.area.unwrap_or_else(|| self.bounds.bounding_area());
        Region::new(self.bounds, area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_builder() {
        let region = RegionBuilder::new()
            .tlbr(10, 20, 50, 80)
            .area(950.0)
            .build();

        assert_eq!(region.bounds, Rect::new(10, 20, 40, 60));
        assert_eq!(region.area, 950.0);
    }

    #[test]
    fn test_area_defaults_to_bounding_area() {
        let region = RegionBuilder::new().tlwh(0, 0, 10, 10).build();
        assert_eq!(region.area, 100.0);
    }
}
