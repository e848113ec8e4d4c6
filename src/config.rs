//! Controller gains and simulation scenarios.
//!
//! Scenarios are plain TOML:
//!
//! ```toml
//! max_steps = 500
//! waypoints = [{ x = 0.0, y = 0.0 }, { x = 48.0, y = 0.0 }]
//!
//! [robot]
//! position = { x = -8.0, y = 10.0 }
//! heading = 0.0
//! lookahead = 12.0
//!
//! [pursuit]
//! speed = 0.5
//! ```
//!
//! Every field has a default, so a partial file only overrides what it names.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PursuitError, Result},
    motion::pursuit::{
        RobotState,
        geo::{Path, Point},
    },
};

/// Side length of one field tile in the reference scenario.
pub const TILE_SIZE: f64 = 24.0;

/// Default step budget for a simulation run.
pub const DEFAULT_MAX_STEPS: usize = 500;

/// Control gains for [`PurePursuit`](crate::motion::pursuit::PurePursuit).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Manhattan length of one step.
    pub speed:             f64,
    /// Largest heading change per step, in degrees.
    pub max_turn_rate:     f64,
    /// The bearing error is divided by this before clamping.
    pub turn_gain_divisor: f64,
    /// Per-axis distance to the target that counts as arrived.
    pub arrival_tolerance: f64,
    /// Crossings more than this many degrees off the heading are ignored.
    pub forward_cone:      f64,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            speed:             0.5,
            max_turn_rate:     2.0,
            turn_gain_divisor: 4.0,
            arrival_tolerance: 0.1,
            forward_cone:      90.0,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PursuitError::InvalidParameter { name, value })
    }
}

impl PursuitConfig {
    /// Checks every gain is in range.
    ///
    /// # Errors
    ///
    /// [`PursuitError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        positive("speed", self.speed)?;
        positive("max_turn_rate", self.max_turn_rate)?;
        positive("turn_gain_divisor", self.turn_gain_divisor)?;
        positive("arrival_tolerance", self.arrival_tolerance)?;
        positive("forward_cone", self.forward_cone)?;
        if self.forward_cone > 180.0 {
            return Err(PursuitError::InvalidParameter {
                name:  "forward_cone",
                value: self.forward_cone,
            });
        }
        Ok(())
    }
}

/// A complete simulation scenario: path, starting robot and gains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub waypoints: Vec<Point>,
    pub robot:     RobotState,
    pub pursuit:   PursuitConfig,
    pub max_steps: usize,
}

impl Default for SimulationConfig {
    /// Two tiles square, open on the left side, with the robot starting
    /// just outside the first corner.
    fn default() -> Self {
        Self {
            waypoints: vec![
                Point::new(0.0, 0.0),
                Point::new(TILE_SIZE * 2.0, 0.0),
                Point::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0),
                Point::new(0.0, TILE_SIZE * 2.0),
            ],
            robot:     RobotState::default(),
            pursuit:   PursuitConfig::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimulationConfig {
    /// Parses a scenario from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> { Ok(toml::from_str(content)?) }

    /// Reads and parses a scenario file.
    pub fn from_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Builds the validated path for this scenario.
    pub fn path(&self) -> Result<Path> { Path::from_waypoints(self.waypoints.clone()) }
}
