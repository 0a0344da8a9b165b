//! Steepest-descent path tracing over a potential field
//!
//! A single step moves a fixed distance against the normalized energy
//! gradient; the tracer repeats steps until the energy trend settles, the
//! gradient vanishes at an equilibrium, or a step limit is hit.

use crate::field::PotentialField;
use crate::foundation::math::Point;
use log::debug;
use thiserror::Error;

/// Gradient norms at or below this are treated as zero
///
/// Exact-zero comparison would be fragile under floating-point noise: a point
/// trapped between an attractor pull and a repulsor push that nearly cancel
/// produces a tiny but nonzero finite-difference gradient whose direction is
/// uninformative.
pub const GRADIENT_TOLERANCE: f64 = 1e-9;

/// The computed force had no usable magnitude during a descent step
///
/// A legitimate terminal condition of path tracing, not a fault: the point
/// sits at a local equilibrium and no direction is informative. The caller
/// decides whether to stop, retry with a different step size, or treat the
/// position as reached.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("gradient underflow: norm {norm:e} at or below tolerance {tolerance:e}")]
pub struct GradientUnderflow {
    /// Euclidean norm of the offending gradient
    pub norm: f64,
    /// Tolerance it was compared against
    pub tolerance: f64,
}

/// Take one normalized gradient-descent step, mutating `point` in place
///
/// Computes the force at `point`, normalizes it, and moves `step` against
/// it: `q[i] -= step * g[i] / |g|`. The gradient points toward higher
/// energy, so subtracting descends. Fails with [`GradientUnderflow`] when
/// the gradient norm is at or below [`GRADIENT_TOLERANCE`], leaving `point`
/// unchanged.
pub fn descend(
    field: &PotentialField,
    point: &mut Point,
    step: f64,
) -> Result<(), GradientUnderflow> {
    let gradient = field.force(point, step);
    let norm = gradient.norm();
    if norm <= GRADIENT_TOLERANCE {
        return Err(GradientUnderflow {
            norm,
            tolerance: GRADIENT_TOLERANCE,
        });
    }
    point.axpy(-step / norm, &gradient, 1.0);
    Ok(())
}

/// Why a traced path stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The smoothed energy trend met the instantaneous energy
    Converged,
    /// A descent step failed with [`GradientUnderflow`]
    Equilibrium,
    /// The step budget ran out before either condition held
    StepLimit,
}

/// A traced descent path: every visited point with its energy
#[derive(Debug, Clone)]
pub struct PathTrace {
    /// Visited positions, starting point first
    pub points: Vec<Point>,
    /// Energy at each visited position
    pub energies: Vec<f64>,
    /// Why tracing stopped
    pub termination: Termination,
}

impl PathTrace {
    /// Last position reached
    #[must_use]
    pub fn final_point(&self) -> &Point {
        self.points.last().expect("a trace holds at least its start")
    }

    /// Energy at the last position
    #[must_use]
    pub fn final_energy(&self) -> f64 {
        *self.energies.last().expect("a trace holds at least its start")
    }

    /// Number of descent steps taken
    #[must_use]
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }
}

/// Descent loop with smoothed-energy convergence detection
///
/// The raw energy reading can dip on a single step without the path having
/// settled, so convergence is judged against an exponentially smoothed trend
/// `z_k = alpha * E_k + (1 - alpha) * z_(k-1)` (with `z_0 = 0`): the loop
/// halts once `|z_k - E_k|` falls below `tolerance`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTracer {
    /// Smoothing factor in `(0, 1]`; smaller values demand a longer settled
    /// stretch before stopping
    pub alpha: f64,
    /// Convergence threshold on the smoothed-vs-instantaneous gap
    pub tolerance: f64,
    /// Hard cap on descent steps
    pub max_steps: usize,
}

impl Default for PathTracer {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            tolerance: 1e-3,
            max_steps: 50_000,
        }
    }
}

impl PathTracer {
    /// Trace a descent path from `start`, taking steps of size `step`
    ///
    /// The returned trace always contains at least the starting point and
    /// its energy.
    #[must_use]
    pub fn trace(&self, field: &PotentialField, start: Point, step: f64) -> PathTrace {
        debug_assert!(self.alpha > 0.0 && self.alpha <= 1.0);

        let mut point = start;
        let mut points = vec![point.clone()];
        let mut energies = vec![field.energy(&point)];
        let mut smoothed = 0.0;
        let mut termination = Termination::StepLimit;

        for _ in 0..self.max_steps {
            if let Err(underflow) = descend(field, &mut point, step) {
                debug!("descent stopped at equilibrium: {underflow}");
                termination = Termination::Equilibrium;
                break;
            }
            let energy = field.energy(&point);
            points.push(point.clone());
            energies.push(energy);

            smoothed = self.alpha * energy + (1.0 - self.alpha) * smoothed;
            if (smoothed - energy).abs() < self.tolerance {
                termination = Termination::Converged;
                break;
            }
        }

        debug!(
            "trace finished after {} steps: {termination:?}, final energy {:e}",
            points.len() - 1,
            energies.last().copied().unwrap_or(f64::NAN),
        );
        PathTrace {
            points,
            energies,
            termination,
        }
    }
}
