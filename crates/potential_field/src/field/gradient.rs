//! Numerical gradient of the field energy
//!
//! The force at a point is the central finite-difference gradient of the
//! energy, one symmetric probe pair per dimension. No analytic gradient is
//! required anywhere in the library; the closed forms in the energy terms
//! only appear in tests, as the reference the differencing must converge to.

use super::PotentialField;
use crate::foundation::math::{Point, Vector};

impl PotentialField {
    /// Force (energy gradient) at a point
    ///
    /// Central differencing per dimension:
    /// `g[i] = (E(q + step*e_i) - E(q - step*e_i)) / (2*step)`.
    /// The approximation error shrinks as `O(step^2)` in smooth regions.
    ///
    /// Each call performs `2 * dimensions` energy evaluations, each of which
    /// may run a spatial range query; this dominates the cost of path
    /// tracing. `step` must be strictly positive, and the point's length
    /// must equal the field's dimensionality.
    ///
    /// The gradient points toward higher energy; descend by subtracting it.
    #[must_use]
    pub fn force(&self, point: &Point, step: f64) -> Vector {
        debug_assert!(step > 0.0, "finite-difference step must be positive");
        debug_assert_eq!(point.len(), self.dimensions());

        let mut gradient = Vector::zeros(self.dimensions());
        let mut probe = point.clone();
        for i in 0..self.dimensions() {
            probe[i] = point[i] + step;
            let above = self.energy(&probe);
            probe[i] = point[i] - step;
            let below = self.energy(&probe);
            probe[i] = point[i];
            gradient[i] = (above - below) / (2.0 * step);
        }
        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;
    use crate::foundation::math::{distance, point};

    fn test_field() -> PotentialField {
        let mut field = PotentialField::new(FieldConfig {
            dimensions: 2,
            attraction_coeff: 1.0,
            repulsion_coeff: 1.5,
            repulsion_range: 2.0,
            attraction_range: None,
        });
        field.add_repulsor(point(&[2.0, 0.0])).unwrap();
        field
    }

    /// Analytic gradient of the closed-form energy for `test_field`
    fn analytic_force(field: &PotentialField, q: &Point) -> Vector {
        // Attraction: 0.5 * a * |q - c|^2 has gradient a * (q - c).
        let mut g = (q - field.attractor()) * field.config().attraction_coeff;

        // Repulsion: 0.5 * r * (1/d - 1/R)^2 has gradient
        // -r * (1/d - 1/R) / d^2 * (q - p) / d for d < R.
        let repulsor = point(&[2.0, 0.0]);
        let d = distance(q, &repulsor);
        let range = field.config().repulsion_range;
        if d < range {
            let scale = -field.config().repulsion_coeff * (1.0 / d - 1.0 / range) / (d * d * d);
            g += (q - &repulsor) * scale;
        }
        g
    }

    #[test]
    fn test_force_is_zero_at_attractor_without_repulsors() {
        let field = PotentialField::new(FieldConfig {
            dimensions: 2,
            attraction_coeff: 1.0,
            repulsion_coeff: 1.0,
            repulsion_range: 1.0,
            attraction_range: None,
        });
        let g = field.force(&point(&[0.0, 0.0]), 1e-3);
        assert_eq!(g.norm(), 0.0);
    }

    #[test]
    fn test_force_converges_at_second_order() {
        let field = test_field();
        let q = point(&[1.0, 0.3]);
        let exact = analytic_force(&field, &q);

        let coarse = (field.force(&q, 1e-2) - &exact).norm();
        let fine = (field.force(&q, 1e-3) - &exact).norm();

        assert!(coarse > 0.0);
        // Halving-by-ten the step should cut the error by about 100x; allow
        // a factor of two of slack.
        assert!(
            fine < coarse / 50.0,
            "no second-order convergence: coarse {coarse}, fine {fine}"
        );
    }

    #[test]
    fn test_force_points_uphill_away_from_goal() {
        let mut field = PotentialField::new(FieldConfig {
            dimensions: 2,
            attraction_coeff: 1.0,
            repulsion_coeff: 1.0,
            repulsion_range: 1.0,
            attraction_range: None,
        });
        field.set_attractor(point(&[8.0, 8.0])).unwrap();

        // At (1, 0) the gradient points away from the attractor, so the
        // descent direction (its negative) points toward it.
        let g = field.force(&point(&[1.0, 0.0]), 1e-3);
        let toward_goal = point(&[7.0, 8.0]);
        assert!(g.dot(&toward_goal) < 0.0);
    }
}
