//! Tick driver for a pursuit run.
//!
//! The controller only ever reports its current state; the driver invokes
//! [`PurePursuit::step`] once per tick and keeps the trail of visited
//! positions for whoever wants to draw it.
//!
//! # Example
//!
//! ```
//! use purepursuit::{config::SimulationConfig, motion::sim::Simulation};
//!
//! let config = SimulationConfig::default();
//! let mut sim = Simulation::from_config(&config)?;
//! let report = sim.run(config.max_steps)?;
//! assert!(report.steps < config.max_steps);
//! # Ok::<(), purepursuit::error::PursuitError>(())
//! ```

use log::{error, info, warn};

use crate::{
    config::SimulationConfig,
    error::{PursuitError, Result},
    motion::pursuit::{PurePursuit, RobotState, StepOutcome, geo::Point},
};

/// Summary of a run that reached its target.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    /// Number of ticks taken, including the arriving one.
    pub steps:  usize,
    /// Robot state after the last tick.
    pub state:  RobotState,
    /// The target the robot arrived at.
    pub target: Option<Point>,
    /// Every position visited, one per tick.
    pub trail:  Vec<Point>,
}

/// Drives a [`PurePursuit`] controller and records its trail.
#[derive(Clone, Debug)]
pub struct Simulation {
    controller: PurePursuit,
    trail:      Vec<Point>,
    steps:      usize,
}

impl Simulation {
    /// Wraps `controller` with an empty trail.
    pub fn new(controller: PurePursuit) -> Self {
        Self {
            controller,
            trail: Vec::new(),
            steps: 0,
        }
    }

    /// Builds the path and controller described by `config`.
    ///
    /// Construction errors are logged before being returned.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let controller = config
            .path()
            .and_then(|path| PurePursuit::new(path, config.robot, config.pursuit.clone()))
            .map_err(|e| {
                error!("Could not build simulation: {}", e);
                e
            })?;
        Ok(Self::new(controller))
    }

    pub fn controller(&self) -> &PurePursuit { &self.controller }

    /// Positions visited so far, oldest first.
    pub fn trail(&self) -> &[Point] { &self.trail }

    /// Ticks taken before arrival; ticks after arrival are not counted.
    pub fn steps(&self) -> usize { self.steps }

    /// Runs one tick and records the new position.
    ///
    /// Ticks after arrival are passed through without extending the trail.
    pub fn tick(&mut self) -> StepOutcome {
        let was_arrived = self.controller.is_arrived();
        let outcome = self.controller.step();
        if !was_arrived {
            self.steps += 1;
            self.trail.push(outcome.state.position);
        }
        outcome
    }

    /// Ticks until the controller arrives or `max_steps` ticks have run.
    ///
    /// `max_steps` counts every tick since the simulation was created, and a
    /// simulation that has already arrived reports straight away.
    ///
    /// # Errors
    ///
    /// [`PursuitError::NotConverged`] if the budget runs out first.
    pub fn run(&mut self, max_steps: usize) -> Result<SimulationReport> {
        info!(
            "Starting run from {} on {} segments",
            self.controller.state().position,
            self.controller.path().segments().len()
        );
        while !self.controller.is_arrived() {
            if self.steps >= max_steps {
                warn!("No arrival after {} steps", self.steps);
                return Err(PursuitError::NotConverged { steps: self.steps });
            }
            self.tick();
        }

        info!("Run finished after {} steps", self.steps);
        Ok(SimulationReport {
            steps:  self.steps,
            state:  *self.controller.state(),
            target: self.controller.last_target(),
            trail:  self.trail.clone(),
        })
    }
}
