//! Error handling for path construction, controller setup and scenario loading.
//!
//! Every failure the crate can report is known before the first step is taken:
//! the controller itself never errors while stepping.

use thiserror::Error;

use crate::motion::pursuit::geo::Point;

/// Errors raised while building a path, a controller or a simulation.
#[derive(Error, Debug)]
pub enum PursuitError {
    /// A path needs at least two waypoints to have a segment.
    #[error("Path needs at least 2 waypoints, got {count}")]
    TooFewWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },

    /// Two consecutive waypoints coincide, producing a zero-length segment.
    #[error("Waypoints {index} and {} coincide at {point}", .index + 1)]
    DegenerateSegment {
        /// Index of the first of the two coincident waypoints.
        index: usize,
        /// The shared coordinate.
        point: Point,
    },

    /// The lookahead radius is negative or not finite.
    #[error("Invalid lookahead radius: {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// A control parameter is out of its allowed range.
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The simulation exhausted its step budget before arriving.
    #[error("Robot did not arrive within {steps} steps")]
    NotConverged {
        /// Number of steps taken.
        steps: usize,
    },

    /// A scenario file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scenario file is not valid TOML for a [`SimulationConfig`](crate::config::SimulationConfig).
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PursuitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segment_message_names_both_waypoints() {
        let err = PursuitError::DegenerateSegment {
            index: 2,
            point: Point::new(1.0, 4.0),
        };
        assert_eq!(err.to_string(), "Waypoints 2 and 3 coincide at (1, 4)");
    }

    #[test]
    fn invalid_parameter_message() {
        let err = PursuitError::InvalidParameter {
            name:  "speed",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid value for speed: -1");
    }
}
