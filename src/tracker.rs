mod distance;
mod lock_state;
mod lockon;
mod region;
mod similarity;

pub use distance::{AccumulationMode, DistanceAccumulator};
pub use lock_state::LockState;
pub use lockon::{FrameOutput, LockOnTracker, TrackerConfig};
pub use region::{Point, Rect, Region};
pub use similarity::{SimilarityParams, regions_similar};
