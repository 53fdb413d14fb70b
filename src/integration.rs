//! Integration module for connecting vision front ends with the tracker.
//!
//! This module provides traits and utilities for integrating contour or
//! edge-detection front ends with the lock-on tracker.

mod builder;
mod extractor;
mod pipeline;

pub use builder::RegionBuilder;
pub use extractor::{IntoRegions, RegionSource};
pub use pipeline::CameraPipeline;
