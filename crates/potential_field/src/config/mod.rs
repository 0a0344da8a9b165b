//! Configuration system
//!
//! Scenario files describe a whole planning problem (field coefficients,
//! attractor, repulsors, start point, tracer settings) in TOML or RON, and
//! build ready-to-trace fields.

use crate::field::{FieldConfig, PotentialField};
use crate::foundation::math::Point;
use crate::spatial::DimensionMismatch;
use crate::trace::PathTracer;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Configuration trait
///
/// File format is chosen by extension: `.toml` or `.ron`.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Tracer settings as they appear in scenario files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Energy smoothing factor in `(0, 1]`
    pub alpha: f64,
    /// Convergence threshold on the smoothed-vs-instantaneous energy gap
    pub tolerance: f64,
    /// Hard cap on descent steps
    pub max_steps: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        let tracer = PathTracer::default();
        Self {
            alpha: tracer.alpha,
            tolerance: tracer.tolerance,
            max_steps: tracer.max_steps,
        }
    }
}

/// A complete planning scenario
///
/// The default scenario is the classic two-dimensional demo: attractor at
/// (8, 8), one repulsor at (4, 4), start at (1, 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Dimensionality of the configuration space
    pub dimensions: usize,
    /// Attractive stiffness
    pub attraction_coeff: f64,
    /// Repulsive stiffness
    pub repulsion_coeff: f64,
    /// Radius beyond which repulsors contribute nothing
    pub repulsion_range: f64,
    /// Optional quadratic-to-linear attraction boundary
    pub attraction_range: Option<f64>,
    /// Goal position
    pub attractor: Vec<f64>,
    /// Obstacle positions
    pub repulsors: Vec<Vec<f64>>,
    /// Starting position of the traced path
    pub start: Vec<f64>,
    /// Step size for both differencing and descent
    pub step: f64,
    /// Tracer settings
    pub tracer: TracerConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            dimensions: 2,
            attraction_coeff: 1.0,
            repulsion_coeff: 1.0,
            repulsion_range: 1.0,
            attraction_range: None,
            attractor: vec![8.0, 8.0],
            repulsors: vec![vec![4.0, 4.0]],
            start: vec![1.0, 0.0],
            step: 1e-3,
            tracer: TracerConfig::default(),
        }
    }
}

impl Config for ScenarioConfig {}

impl ScenarioConfig {
    /// Build the configured field, attractor and repulsors included
    ///
    /// # Errors
    ///
    /// Fails with [`DimensionMismatch`] if the attractor or any repulsor has
    /// the wrong number of coordinates.
    pub fn build_field(&self) -> Result<PotentialField, DimensionMismatch> {
        let mut field = PotentialField::new(FieldConfig {
            dimensions: self.dimensions,
            attraction_coeff: self.attraction_coeff,
            repulsion_coeff: self.repulsion_coeff,
            repulsion_range: self.repulsion_range,
            attraction_range: self.attraction_range,
        });
        field.set_attractor(Point::from_vec(self.attractor.clone()))?;
        for repulsor in &self.repulsors {
            field.add_repulsor(Point::from_vec(repulsor.clone()))?;
        }
        Ok(field)
    }

    /// Starting point of the traced path
    #[must_use]
    pub fn start_point(&self) -> Point {
        Point::from_vec(self.start.clone())
    }

    /// Tracer built from the scenario's settings
    #[must_use]
    pub fn tracer(&self) -> PathTracer {
        PathTracer {
            alpha: self.tracer.alpha,
            tolerance: self.tracer.tolerance,
            max_steps: self.tracer.max_steps,
        }
    }
}
