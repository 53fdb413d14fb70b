//! Region similarity test used to carry a lock across frames.

use crate::tracker::region::Region;

/// Thresholds for deciding whether two regions are the same physical
/// object across consecutive frames.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityParams {
    /// Maximum centroid distance, in pixels
    pub position_threshold: f32,
    /// Maximum tolerated area change, as a fraction of the larger area
    pub area_threshold: f32,
}

impl Default for SimilarityParams {
    fn default() -> Self {
        Self {
            position_threshold: 50.0,
            area_threshold: 0.3,
        }
    }
}

/// Whether `candidate` plausibly represents the same object as `reference`.
///
/// Two checks, both of which must pass: centroid distance strictly below
/// `position_threshold`, and `min(area) / max(area)` strictly above
/// `1 - area_threshold`. The ratio is defined as 0 when both areas are 0,
/// so degenerate regions never match.
///
/// Pure and stateless. When several candidates pass, the caller takes the
/// first match in the supplied iteration order; the extractor's ordering
/// is part of the contract.
pub fn regions_similar(reference: &Region, candidate: &Region, params: &SimilarityParams) -> bool {
    let pos_dist = reference.centroid().distance_to(candidate.centroid());

    let larger = reference.area.max(candidate.area);
    let area_ratio = if larger > 0.0 {
        reference.area.min(candidate.area) / larger
    } else {
        0.0
    };

    pos_dist < params.position_threshold && area_ratio > (1.0 - params.area_threshold)
}
