//! Spatial partitioning data structures
//!
//! Provides efficient spatial indexing of repulsor positions for
//! radius-bounded proximity queries in D-dimensional space.

mod kd_tree;
mod spatial_query;

pub use kd_tree::KdTree;
pub use spatial_query::{BruteForce, DimensionMismatch, SpatialIndex};
