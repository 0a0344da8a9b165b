//! Delimited-text export of energy grids, force grids, and traced paths
//!
//! Output is tab-separated, one row per sample point with a blank line
//! between lattice rows, which is the block format gnuplot's `splot` and
//! most plotting tools consume directly.

use crate::field::PotentialField;
use crate::foundation::math::{point, Point};
use crate::trace::PathTrace;
use std::io::{self, Write};

/// Rectangular two-dimensional sampling lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Lower-left corner of the sampled rectangle
    pub min: [f64; 2],
    /// Upper-right corner of the sampled rectangle
    pub max: [f64; 2],
    /// Samples per axis, at least two
    pub resolution: usize,
}

impl GridSpec {
    /// Sample coordinate `i` of `resolution` along `axis`
    fn coordinate(&self, axis: usize, i: usize) -> f64 {
        let span = self.max[axis] - self.min[axis];
        self.min[axis] + span * (i as f64) / ((self.resolution - 1) as f64)
    }

    fn sample(&self, i: usize, j: usize) -> Point {
        point(&[self.coordinate(0, i), self.coordinate(1, j)])
    }
}

fn check_grid(field: &PotentialField, grid: &GridSpec) -> io::Result<()> {
    if field.dimensions() != 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "grid export samples two-dimensional fields",
        ));
    }
    if grid.resolution < 2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "grid resolution must be at least two",
        ));
    }
    Ok(())
}

/// Write the field's energy over a lattice as `x  y  energy` rows
///
/// One row per sample, a blank line between lattice rows, no trailing blank
/// line.
///
/// # Errors
///
/// Fails with `InvalidInput` before writing anything if the field is not
/// two-dimensional or the resolution is below two; otherwise propagates any
/// write failure from `out`.
pub fn write_energy_grid<W: Write>(
    field: &PotentialField,
    grid: &GridSpec,
    out: &mut W,
) -> io::Result<()> {
    check_grid(field, grid)?;

    for i in 0..grid.resolution {
        if i > 0 {
            writeln!(out)?;
        }
        for j in 0..grid.resolution {
            let q = grid.sample(i, j);
            writeln!(out, "{}\t{}\t{}", q[0], q[1], field.energy(&q))?;
        }
    }
    Ok(())
}

/// Write the field's force over a lattice as `x  y  gx  gy` rows
///
/// Same layout as [`write_energy_grid`]; `step` is the finite-difference
/// step passed to [`PotentialField::force`].
///
/// # Errors
///
/// Fails with `InvalidInput` before writing anything if the field is not
/// two-dimensional or the resolution is below two; otherwise propagates any
/// write failure from `out`.
pub fn write_force_grid<W: Write>(
    field: &PotentialField,
    grid: &GridSpec,
    step: f64,
    out: &mut W,
) -> io::Result<()> {
    check_grid(field, grid)?;

    for i in 0..grid.resolution {
        if i > 0 {
            writeln!(out)?;
        }
        for j in 0..grid.resolution {
            let q = grid.sample(i, j);
            let g = field.force(&q, step);
            writeln!(out, "{}\t{}\t{}\t{}", q[0], q[1], g[0], g[1])?;
        }
    }
    Ok(())
}

/// Write a traced path as `coord...  energy` rows, one per visited point
///
/// Works for any dimensionality; coordinates come first, the energy last.
///
/// # Errors
///
/// Propagates any write failure from `out`.
pub fn write_path<W: Write>(trace: &PathTrace, out: &mut W) -> io::Result<()> {
    for (q, energy) in trace.points.iter().zip(&trace.energies) {
        for coord in q.iter() {
            write!(out, "{coord}\t")?;
        }
        writeln!(out, "{energy}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;
    use crate::trace::PathTracer;
    use approx::assert_relative_eq;

    fn flat_field() -> PotentialField {
        PotentialField::new(FieldConfig {
            dimensions: 2,
            attraction_coeff: 1.0,
            repulsion_coeff: 1.0,
            repulsion_range: 1.0,
            attraction_range: None,
        })
    }

    #[test]
    fn test_energy_grid_layout() {
        let field = flat_field();
        let grid = GridSpec {
            min: [0.0, 0.0],
            max: [1.0, 1.0],
            resolution: 3,
        };
        let mut out = Vec::new();
        write_energy_grid(&field, &grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Three blocks of three rows, separated by single blank lines, no
        // trailing blank line.
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[3].is_empty());
        assert!(lines[7].is_empty());
        assert!(!lines[10].is_empty());
    }

    #[test]
    fn test_energy_grid_values_match_field() {
        let field = flat_field();
        let grid = GridSpec {
            min: [0.0, 0.0],
            max: [2.0, 2.0],
            resolution: 3,
        };
        let mut out = Vec::new();
        write_energy_grid(&field, &grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let last = text.lines().last().unwrap();
        let fields: Vec<f64> = last.split('\t').map(|v| v.parse().unwrap()).collect();
        assert_relative_eq!(fields[0], 2.0);
        assert_relative_eq!(fields[1], 2.0);
        assert_relative_eq!(fields[2], field.energy(&point(&[2.0, 2.0])));
    }

    #[test]
    fn test_degenerate_grid_is_rejected_without_output() {
        let field = flat_field();
        for resolution in [0, 1] {
            let grid = GridSpec {
                min: [0.0, 0.0],
                max: [1.0, 1.0],
                resolution,
            };
            let mut out = Vec::new();
            let err = write_energy_grid(&field, &grid, &mut out).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            let err = write_force_grid(&field, &grid, 1e-3, &mut out).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_force_grid_row_width() {
        let field = flat_field();
        let grid = GridSpec {
            min: [-1.0, -1.0],
            max: [1.0, 1.0],
            resolution: 2,
        };
        let mut out = Vec::new();
        write_force_grid(&field, &grid, 1e-3, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for line in text.lines().filter(|l| !l.is_empty()) {
            assert_eq!(line.split('\t').count(), 4);
        }
    }

    #[test]
    fn test_path_export_one_row_per_point() {
        let mut field = flat_field();
        field.set_attractor(point(&[2.0, 2.0])).unwrap();
        let tracer = PathTracer {
            max_steps: 10,
            ..PathTracer::default()
        };
        let trace = tracer.trace(&field, point(&[0.0, 0.0]), 1e-2);

        let mut out = Vec::new();
        write_path(&trace, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), trace.points.len());
        for line in text.lines() {
            assert_eq!(line.split('\t').count(), 3);
        }
    }
}
