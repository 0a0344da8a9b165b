//! Math utilities and types
//!
//! Provides the coordinate types used throughout the library. Configuration
//! spaces have a dimensionality fixed per field, so coordinates are
//! dynamically sized vectors rather than compile-time sized ones.

pub use nalgebra::DVector;

/// Position in D-dimensional configuration space
pub type Point = DVector<f64>;

/// Gradient (force) vector in D-dimensional configuration space
pub type Vector = DVector<f64>;

/// Build a [`Point`] from a coordinate slice
///
/// Convenience for literals in demos and tests:
/// `point(&[1.0, 0.0])`.
#[must_use]
pub fn point(coords: &[f64]) -> Point {
    Point::from_row_slice(coords)
}

/// Euclidean distance between two coordinates
///
/// Both points must have the same dimensionality.
#[must_use]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a - b).norm()
}
