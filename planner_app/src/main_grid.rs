//! Field sampling demo
//!
//! Scatters random repulsors between a start corner and a goal, then samples
//! the field's energy and force over a rectangular lattice and writes both
//! grids as TSV files (`energy.tsv`, `force.tsv`) suitable for gnuplot's
//! `splot`.
//!
//! Usage: `grid_demo [repulsor_count] [seed]`

use log::{error, info};
use potential_field::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

const WORLD_MIN: f64 = 0.0;
const WORLD_MAX: f64 = 10.0;
const GRID_RESOLUTION: usize = 101;
const FORCE_STEP: f64 = 1e-3;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let repulsor_count: usize = args.next().map_or(Ok(25), |v| v.parse())?;
    let seed: u64 = args.next().map_or(Ok(42), |v| v.parse())?;

    let mut field = PotentialField::new(FieldConfig {
        dimensions: 2,
        attraction_coeff: 1.0,
        repulsion_coeff: 1.5,
        repulsion_range: 0.5,
        attraction_range: Some(5.0),
    });
    field.set_attractor(point(&[8.0, 8.0]))?;

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..repulsor_count {
        let x = rng.gen_range(WORLD_MIN..WORLD_MAX);
        let y = rng.gen_range(WORLD_MIN..WORLD_MAX);
        field.add_repulsor(point(&[x, y]))?;
    }
    info!("scattered {repulsor_count} repulsors with seed {seed}");

    let grid = GridSpec {
        min: [WORLD_MIN, WORLD_MIN],
        max: [WORLD_MAX, WORLD_MAX],
        resolution: GRID_RESOLUTION,
    };

    let mut energy_out = BufWriter::new(File::create("energy.tsv")?);
    write_energy_grid(&field, &grid, &mut energy_out)?;
    info!("wrote {GRID_RESOLUTION}x{GRID_RESOLUTION} energy grid to energy.tsv");

    let mut force_out = BufWriter::new(File::create("force.tsv")?);
    write_force_grid(&field, &grid, FORCE_STEP, &mut force_out)?;
    info!("wrote {GRID_RESOLUTION}x{GRID_RESOLUTION} force grid to force.tsv");

    Ok(())
}

fn main() -> ExitCode {
    potential_field::foundation::logging::init();
    if let Err(e) = run() {
        error!("grid demo failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
