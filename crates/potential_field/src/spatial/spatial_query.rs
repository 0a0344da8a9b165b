//! Abstract spatial index interface for radius-bounded repulsor queries
//!
//! This abstraction allows swapping different spatial partitioning schemes
//! (k-d tree, grid hashing, brute force for small N) without changing the
//! potential field logic.

use crate::foundation::math::{distance, Point};
use std::fmt;
use thiserror::Error;

/// A coordinate vector's length disagrees with an index's or field's fixed
/// dimensionality
///
/// Raised at the API boundary before any state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
pub struct DimensionMismatch {
    /// Dimensionality the structure was created with
    pub expected: usize,
    /// Length of the offending coordinate vector
    pub actual: usize,
}

impl DimensionMismatch {
    /// Check a coordinate vector against an expected dimensionality
    pub fn check(expected: usize, point: &Point) -> Result<(), Self> {
        if point.len() == expected {
            Ok(())
        } else {
            Err(Self {
                expected,
                actual: point.len(),
            })
        }
    }
}

/// Abstract interface for spatial indexes over D-dimensional points
///
/// Implementations store owned copies of inserted points. The core contract
/// only needs insertion and range retrieval; there is no deletion.
pub trait SpatialIndex: fmt::Debug + Send + Sync {
    /// Dimensionality every stored point must have
    fn dimensions(&self) -> usize;

    /// Insert a point, taking ownership of it
    ///
    /// Rejected with [`DimensionMismatch`] if the point's length does not
    /// match [`Self::dimensions`]; the index is unchanged on error.
    fn insert(&mut self, point: Point) -> Result<(), DimensionMismatch>;

    /// All stored points within `radius` (inclusive) of `query`
    ///
    /// Result order is unspecified. A radius of zero returns exact coordinate
    /// matches only; a negative radius returns nothing.
    fn within_radius(&self, query: &Point, radius: f64) -> Vec<&Point>;

    /// Number of stored points
    fn len(&self) -> usize;

    /// Whether the index holds no points
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Linear-scan spatial index
///
/// No structure at all: every query visits every stored point. Preferable to
/// the k-d tree only for very small point counts, but also serves as the
/// oracle the tree is tested against.
#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    dimensions: usize,
    points: Vec<Point>,
}

impl BruteForce {
    /// Create an empty index fixed to the given dimensionality
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            points: Vec::new(),
        }
    }
}

impl SpatialIndex for BruteForce {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn insert(&mut self, point: Point) -> Result<(), DimensionMismatch> {
        DimensionMismatch::check(self.dimensions, &point)?;
        self.points.push(point);
        Ok(())
    }

    fn within_radius(&self, query: &Point, radius: f64) -> Vec<&Point> {
        self.points
            .iter()
            .filter(|p| distance(p, query) <= radius)
            .collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
