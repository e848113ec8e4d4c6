//! Pure pursuit path following.
//!
//! A virtual robot follows a polyline path by repeatedly intersecting a
//! circle of radius `lookahead`, centered on itself, with the path and
//! steering towards one of the crossings.
//!
//! # Algorithm Overview
//!
//! Each call to [`PurePursuit::step`]:
//!
//! 1. Collects every crossing of the lookahead circle with the path.
//! 2. Annotates each crossing with its bearing from the robot (degrees).
//! 3. Sorts by bearing and keeps only crossings within the forward cone
//!    of the current heading.
//! 4. Falls back to the last chosen target when nothing survives.
//! 5. Turns towards the lowest-bearing target (scaled, clamped) and moves
//!    a Manhattan-normalised step towards it.
//! 6. Reports arrival once the target is within tolerance on both axes.
//!
//! # Example
//!
//! ```
//! use purepursuit::config::PursuitConfig;
//! use purepursuit::motion::pursuit::{PurePursuit, RobotState, geo::{Path, Point}};
//!
//! let path = Path::from_waypoints(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(24.0, 0.0),
//!     Point::new(24.0, 24.0),
//! ])?;
//! let robot = RobotState::new(Point::new(-4.0, 2.0), 0.0, 6.0);
//!
//! let mut pursuit = PurePursuit::new(path, robot, PursuitConfig::default())?;
//! let outcome = pursuit.step();
//! assert!(outcome.target.is_some());
//! # Ok::<(), purepursuit::error::PursuitError>(())
//! ```

/// Candidate collection, filtering and the per-step control laws.
pub mod algorithm;

/// Geometry primitives for path definition.
///
/// Provides `Point`, `Line`, `Segment` and `Path`.
pub mod geo;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::{
    config::{PursuitConfig, TILE_SIZE},
    error::{PursuitError, Result},
};
use geo::{Path, Point};

/// Robot footprint, used for display only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotSize {
    pub width:  f64,
    pub height: f64,
}

impl Default for RobotSize {
    fn default() -> Self {
        Self {
            width:  14.0,
            height: 18.0,
        }
    }
}

/// Physical state of the simulated robot.
///
/// Fields missing from a scenario file take the [`Default`] values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotState {
    /// Current position.
    pub position:  Point,
    /// Current heading in degrees. Not wrapped.
    pub heading:   f64,
    /// Footprint for display.
    pub size:      RobotSize,
    /// Radius of the lookahead circle.
    pub lookahead: f64,
}

impl RobotState {
    /// Creates a robot state with the default footprint.
    pub fn new(position: Point, heading: f64, lookahead: f64) -> Self {
        Self {
            position,
            heading,
            size: RobotSize::default(),
            lookahead,
        }
    }
}

impl Default for RobotState {
    /// The reference robot: just outside the first corner of the square
    /// scenario, facing +x, looking half a tile ahead.
    fn default() -> Self { Self::new(Point::new(-8.0, 10.0), 0.0, TILE_SIZE / 2.0) }
}

/// What one controller step produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Robot state after the step.
    pub state:         RobotState,
    /// The target steered towards this step.
    pub target:        Option<Point>,
    /// All crossings of the lookahead circle with the path, in path order.
    pub intersections: Vec<Point>,
    /// True when no forward crossing existed and the remembered target was used.
    pub fallback:      bool,
    /// True once the robot has reached its target. No further step is needed.
    pub arrived:       bool,
}

/// Pure pursuit controller.
///
/// Owns the path, the robot state and the remembered target for one
/// simulation run. Only [`PurePursuit::step`] mutates it.
#[derive(Clone, Debug)]
pub struct PurePursuit {
    path:              Path,
    state:             RobotState,
    config:            PursuitConfig,
    last_intersection: Point,
    last_target:       Option<Point>,
    arrived:           bool,
}

impl PurePursuit {
    /// Creates a controller for `path` starting from `state`.
    ///
    /// The remembered target starts at the path's first waypoint.
    ///
    /// # Errors
    ///
    /// - [`PursuitError::InvalidRadius`] if the lookahead is negative or not finite.
    /// - [`PursuitError::InvalidParameter`] if `config` fails validation.
    pub fn new(path: Path, state: RobotState, config: PursuitConfig) -> Result<Self> {
        if !state.lookahead.is_finite() || state.lookahead < 0.0 {
            return Err(PursuitError::InvalidRadius {
                radius: state.lookahead,
            });
        }
        config.validate()?;

        Ok(Self {
            last_intersection: path.start(),
            path,
            state,
            config,
            last_target: None,
            arrived: false,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn state(&self) -> &RobotState { &self.state }

    pub fn config(&self) -> &PursuitConfig { &self.config }

    /// The fallback target used when no forward crossing exists.
    pub fn last_intersection(&self) -> Point { self.last_intersection }

    pub fn is_arrived(&self) -> bool { self.arrived }

    /// The target chosen by the most recent step, if any step has run.
    pub fn last_target(&self) -> Option<Point> { self.last_target }

    /// Advances the simulation by one tick.
    ///
    /// Once arrived, further calls leave the state untouched and report
    /// `arrived = true` again.
    pub fn step(&mut self) -> StepOutcome {
        if self.arrived {
            return StepOutcome {
                state:         self.state,
                target:        self.last_target,
                intersections: Vec::new(),
                fallback:      false,
                arrived:       true,
            };
        }

        let position = self.state.position;
        let intersections =
            algorithm::collect_candidates(&self.path, position, self.state.lookahead);
        let annotated = algorithm::annotate(position, &intersections);
        let forward =
            algorithm::forward_filter(&annotated, self.state.heading, self.config.forward_cone);
        let selection = algorithm::select_target(&forward, self.last_intersection, position);
        let target = selection.target;

        if selection.fallback {
            debug!(
                "No forward intersection from {}, falling back to {}",
                position, self.last_intersection
            );
        } else {
            self.last_intersection = target.point;
        }

        let delta = algorithm::heading_delta(
            target.bearing,
            self.state.heading,
            self.config.turn_gain_divisor,
            self.config.max_turn_rate,
        );
        self.state.heading += delta;

        let (step, diff) = algorithm::motion_step(position, target.point, self.config.speed);
        self.state.position = position.add(step);
        trace!(
            "Target {} at {:.2} deg, heading {:.2} ({:+.2}), position {}",
            target.point, target.bearing, self.state.heading, delta, self.state.position
        );

        self.last_target = Some(target.point);
        self.arrived = algorithm::has_arrived(diff, self.config.arrival_tolerance);
        if self.arrived {
            info!("Arrived at {} (target {})", self.state.position, target.point);
        }

        StepOutcome {
            state: self.state,
            target: Some(target.point),
            intersections,
            fallback: selection.fallback,
            arrived: self.arrived,
        }
    }
}
