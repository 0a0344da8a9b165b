//! Path tracing demo
//!
//! Traces a steepest-descent path through a potential field scenario and
//! writes every visited point with its energy to a TSV file.
//!
//! Usage: `path_demo [scenario.toml] [output.tsv]`
//!
//! Without arguments it runs the classic two-dimensional scenario (attractor
//! at (8, 8), one repulsor at (4, 4), start at (1, 0)) and writes `path.tsv`.

use log::{error, info};
use potential_field::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => ScenarioConfig::load_from_file(Path::new(&path))?,
        None => ScenarioConfig::default(),
    };
    let output = args.next().map_or_else(|| PathBuf::from("path.tsv"), PathBuf::from);

    let field = scenario.build_field()?;
    let start = scenario.start_point();
    info!(
        "tracing from {:?} toward {:?} past {} repulsor(s)",
        start.as_slice(),
        field.attractor().as_slice(),
        field.repulsor_count(),
    );
    info!("initial energy: {:.6}", field.energy(&start));

    let trace = scenario.tracer().trace(&field, start, scenario.step);
    info!(
        "finished after {} steps ({:?}), final energy {:.6}",
        trace.steps(),
        trace.termination,
        trace.final_energy(),
    );

    let mut out = BufWriter::new(File::create(&output)?);
    write_path(&trace, &mut out)?;
    info!("wrote {} rows to {}", trace.points.len(), output.display());
    Ok(())
}

fn main() -> ExitCode {
    potential_field::foundation::logging::init();
    if let Err(e) = run() {
        error!("path demo failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
