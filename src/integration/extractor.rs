//! Trait for region extraction front ends.

use crate::tracker::Region;

/// Trait for vision front ends that turn a raw frame into candidate
/// regions.
///
/// Implement this trait to connect any contour/edge-detection pipeline to
/// the lock-on tracker. The order of the returned regions is part of the
/// contract: it decides tie-breaking during acquisition and re-matching.
///
/// # Example
///
/// ```ignore
/// use locktrack_rs::{RegionSource, Region};
///
/// struct MyExtractor {
///     // Your edge detector here
/// }
///
/// impl RegionSource for MyExtractor {
///     type Error = std::io::Error;
///
///     fn extract(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Region>, Self::Error> {
///         // Run contour extraction and return candidate regions
///         Ok(vec![])
///     }
/// }
/// ```
pub trait RegionSource {
    /// Error type for extraction failures (e.g. camera disconnect).
    type Error;

    /// Extract candidate regions from raw frame data.
    ///
    /// # Arguments
    /// * `input` - Raw frame bytes (format depends on implementation)
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    ///
    /// # Returns
    /// Candidate regions in extractor-defined order, or an error.
    fn extract(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Region>, Self::Error>;
}

/// Helper trait for converting extractor-specific outputs to `Region`s.
///
/// Implement this for your front end's native output format to enable
/// easy conversion.
pub trait IntoRegions {
    /// Convert the output into a vector of regions.
    fn into_regions(self) -> Vec<Region>;
}

impl IntoRegions for Vec<Region> {
    fn into_regions(self) -> Vec<Region> {
        self
    }
}
