//! Path following for a simulated robot.
//!
//! # Architecture
//!
//! The controller in [`pursuit`] is step-driven: it owns the robot state and
//! advances it by exactly one tick per call. Pacing, trail recording and the
//! decision to stop belong to the driver in [`sim`].
//!
//! # Example
//!
//! ```
//! use purepursuit::config::PursuitConfig;
//! use purepursuit::motion::{pursuit::{PurePursuit, RobotState, geo::{Path, Point}}, sim::Simulation};
//!
//! let path = Path::from_waypoints(vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0)])?;
//! let robot = RobotState::new(Point::new(0.0, 1.0), 0.0, 8.0);
//! let mut sim = Simulation::new(PurePursuit::new(path, robot, PursuitConfig::default())?);
//! sim.tick();
//! assert_eq!(sim.trail().len(), 1);
//! # Ok::<(), purepursuit::error::PursuitError>(())
//! ```

/// Pure pursuit geometry and controller.
pub mod pursuit;

/// Tick driver and trail recording.
pub mod sim;
