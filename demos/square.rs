//! Runs a pursuit scenario and prints a summary.
//!
//! ```text
//! cargo run --example square [scenario.toml]
//! ```

use log::{LevelFilter, error, info};
use purepursuit::{config::SimulationConfig, error::PursuitError, fs::logger, motion::sim::Simulation};

fn main() -> Result<(), PursuitError> {
    if let Err(e) = logger::init_with_file(LevelFilter::Debug, "pursuit.log") {
        eprintln!("Logger init failed: {}", e);
    }

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading scenario from {}", path);
            SimulationConfig::from_file(&path)?
        }
        None => SimulationConfig::default(),
    };

    let mut sim = Simulation::from_config(&config)?;
    let report = sim.run(config.max_steps).map_err(|e| {
        error!("{}", e);
        e
    })?;

    println!("Arrived after {} steps", report.steps);
    println!("Final position: {}", report.state.position);
    println!("Final heading:  {:.2} deg", report.state.heading);
    if let Some(target) = report.target {
        println!("Target:         {}", target);
    }
    for (i, p) in report.trail.iter().enumerate().step_by(50) {
        println!("  step {:>4}: {}", i + 1, p);
    }

    log::logger().flush();
    Ok(())
}
