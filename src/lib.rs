//! # purepursuit
//!
//! A pure pursuit path-following simulation. A virtual robot follows a
//! polyline path by intersecting a lookahead circle with it, picking a
//! target ahead of its heading and stepping towards it.
//!
//! - **Geometry**: points, implicit-form lines, bounded segments and exact
//!   circle–segment intersection.
//! - **Pursuit**: the per-step controller with forward filtering, remembered
//!   fallback target, clamped turning and normalised motion.
//! - **Simulation**: a tick driver that records the trail and stops on arrival.
//! - **Configuration**: TOML scenarios with documented default gains.
//! - **Logging**: a [`log`] backend writing to the console and a file.
//!
//! ## Quick Start
//!
//! ```
//! use purepursuit::{config::SimulationConfig, motion::sim::Simulation};
//!
//! let config = SimulationConfig::default();
//! let mut sim = Simulation::from_config(&config)?;
//! let report = sim.run(config.max_steps)?;
//! println!("arrived at {} after {} steps", report.state.position, report.steps);
//! # Ok::<(), purepursuit::error::PursuitError>(())
//! ```
//!
//! ## Modules
//!
//! - [`motion`]: Geometry, the pursuit controller and the simulation driver.
//! - [`config`]: Control gains and scenario loading.
//! - [`error`]: The crate's error type.
//! - [`fs`]: Logging.

/// Controller gains and TOML scenarios.
pub mod config;

/// Errors raised while building paths, controllers and simulations.
pub mod error;

/// Filesystem utilities module.
///
/// Contains the logger used by the demo and by long simulation runs.
pub mod fs;

/// Path following.
///
/// - **Pursuit**: geometry and the pure pursuit controller.
/// - **Simulation**: the tick driver.
pub mod motion;
