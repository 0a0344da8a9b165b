//! # Potential Field
//!
//! Artificial potential field path planning for mobile robots.
//!
//! A field combines one attractive goal point with any number of repulsive
//! obstacle points into a scalar energy function. The negative gradient of
//! that energy points downhill toward the goal and away from obstacles, so a
//! mobile point can reach the goal by repeated normalized gradient descent.
//!
//! ## Features
//!
//! - **K-d tree repulsor index**: radius-bounded range queries keep repulsion
//!   evaluation tractable for large obstacle sets
//! - **Pluggable indexing**: swap the k-d tree for a brute-force scan (or any
//!   other [`SpatialIndex`] implementation) without touching field logic
//! - **Two attraction wells**: pure quadratic, or quadratic-near/linear-far
//!   with bounded pull at large distances
//! - **Path tracing**: normalized descent with smoothed-energy convergence
//!   detection and explicit equilibrium reporting
//! - **Grid and path export**: TSV output consumable by common plotting tools
//!
//! ## Quick Start
//!
//! ```rust
//! use potential_field::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut field = PotentialField::new(FieldConfig {
//!         dimensions: 2,
//!         attraction_coeff: 1.0,
//!         repulsion_coeff: 1.0,
//!         repulsion_range: 1.0,
//!         attraction_range: None,
//!     });
//!     field.set_attractor(point(&[8.0, 8.0]))?;
//!     field.add_repulsor(point(&[4.0, 4.0]))?;
//!
//!     // Descend toward the goal from (1, 0).
//!     let mut q = point(&[1.0, 0.0]);
//!     while field.energy(&q) > 1e-2 {
//!         descend(&field, &mut q, 1e-3)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod export;
pub mod field;
pub mod foundation;
pub mod spatial;
pub mod trace;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ScenarioConfig},
        export::{write_energy_grid, write_force_grid, write_path, GridSpec},
        field::{FieldConfig, PotentialField},
        foundation::math::{distance, point, Point, Vector},
        spatial::{BruteForce, DimensionMismatch, KdTree, SpatialIndex},
        trace::{descend, GradientUnderflow, PathTrace, PathTracer, Termination},
    };
}
