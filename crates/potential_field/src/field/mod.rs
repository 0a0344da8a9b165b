//! Artificial potential field over D-dimensional configuration space
//!
//! One attractor pulls a mobile point toward the goal while any number of
//! repulsors push it away from obstacles. Energy at a point is the sum of
//! one attraction term and one repulsion term per in-range repulsor; the
//! repulsors live in a spatial index so only nearby obstacles are visited.

mod gradient;

use crate::foundation::math::{distance, Point};
use crate::spatial::{DimensionMismatch, KdTree, SpatialIndex};
use serde::{Deserialize, Serialize};

/// Coefficients and ranges defining a potential field
///
/// Two attraction wells are supported. With `attraction_range: None` the
/// well is purely quadratic, `0.5 * a * d^2`. With `Some(range)` the well is
/// quadratic within `range` and linear beyond it, `range * a * (d - range/2)`,
/// which bounds the attractive pull at large distances. The two pieces meet
/// with matching value and slope at `d = range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Dimensionality of the configuration space; fixed at construction
    pub dimensions: usize,

    /// Attractive stiffness (e.g. 2.0); non-negative
    pub attraction_coeff: f64,

    /// Repulsive stiffness (e.g. 1.5); non-negative
    pub repulsion_coeff: f64,

    /// Radius beyond which a repulsor contributes zero energy (e.g. 0.5);
    /// strictly positive
    pub repulsion_range: f64,

    /// Radius where quadratic attraction goes over into linear attraction
    /// (e.g. 5.0); `None` keeps the well quadratic everywhere
    pub attraction_range: Option<f64>,
}

/// Artificial potential field with one attractor and indexed repulsors
///
/// The attractor defaults to the origin and can be moved at any time;
/// repulsors accumulate monotonically. Repulsors are held behind the
/// [`SpatialIndex`] trait so the indexing strategy can be swapped without
/// touching the energy math; the default is a [`KdTree`].
#[derive(Debug)]
pub struct PotentialField {
    config: FieldConfig,
    attractor: Point,
    repulsors: Box<dyn SpatialIndex>,
}

impl PotentialField {
    /// Create a field with a k-d tree repulsor index
    ///
    /// # Panics
    ///
    /// Panics if `config.dimensions` is zero or `config.repulsion_range` is
    /// not strictly positive.
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        let index = KdTree::new(config.dimensions.max(1));
        Self::with_index(config, Box::new(index))
    }

    /// Create a field over a caller-supplied repulsor index
    ///
    /// # Panics
    ///
    /// Panics if `config.dimensions` is zero, `config.repulsion_range` is not
    /// strictly positive, or the index dimensionality disagrees with the
    /// config.
    #[must_use]
    pub fn with_index(config: FieldConfig, repulsors: Box<dyn SpatialIndex>) -> Self {
        assert!(config.dimensions > 0, "field needs at least one dimension");
        assert!(
            config.repulsion_range > 0.0,
            "repulsion range must be strictly positive"
        );
        assert_eq!(
            repulsors.dimensions(),
            config.dimensions,
            "repulsor index dimensionality must match the field"
        );
        let attractor = Point::zeros(config.dimensions);
        Self {
            config,
            attractor,
            repulsors,
        }
    }

    /// Dimensionality of the configuration space
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Field coefficients and ranges
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current attractor position
    #[must_use]
    pub const fn attractor(&self) -> &Point {
        &self.attractor
    }

    /// Number of repulsors added so far
    #[must_use]
    pub fn repulsor_count(&self) -> usize {
        self.repulsors.len()
    }

    /// Move the attractor
    ///
    /// Rejected with [`DimensionMismatch`] if the position's length does not
    /// match the field; the field is unchanged on error.
    pub fn set_attractor(&mut self, position: Point) -> Result<(), DimensionMismatch> {
        DimensionMismatch::check(self.config.dimensions, &position)?;
        self.attractor = position;
        Ok(())
    }

    /// Add a repulsor to the spatial index
    ///
    /// Repulsors are never deduplicated: inserting the same position twice
    /// doubles its contribution. Rejected with [`DimensionMismatch`] if the
    /// position's length does not match the field.
    pub fn add_repulsor(&mut self, position: Point) -> Result<(), DimensionMismatch> {
        self.repulsors.insert(position)
    }

    /// Potential energy at a point
    ///
    /// Sum of the attraction term and one repulsion term per repulsor within
    /// [`FieldConfig::repulsion_range`]. A query point that coincides exactly
    /// with a repulsor divides by zero and yields a non-finite value; energy
    /// is undefined at an exact collision and callers must treat it as such.
    ///
    /// The point's length must equal the field's dimensionality.
    #[must_use]
    pub fn energy(&self, point: &Point) -> f64 {
        debug_assert_eq!(point.len(), self.config.dimensions);
        self.attraction_energy(point) + self.repulsion_energy(point)
    }

    fn attraction_energy(&self, point: &Point) -> f64 {
        let dist = distance(&self.attractor, point);
        match self.config.attraction_range {
            Some(range) if dist >= range => {
                range * self.config.attraction_coeff * (dist - 0.5 * range)
            }
            _ => 0.5 * self.config.attraction_coeff * dist * dist,
        }
    }

    fn repulsion_energy(&self, point: &Point) -> f64 {
        let range = self.config.repulsion_range;
        self.repulsors
            .within_radius(point, range)
            .into_iter()
            .map(|repulsor| {
                let dist = distance(repulsor, point);
                let gap = 1.0 / dist - 1.0 / range;
                0.5 * self.config.repulsion_coeff * gap * gap
            })
            .sum()
    }
}
