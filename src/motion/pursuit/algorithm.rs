use super::geo::{Path, Point};

/// An intersection annotated with its bearing from the robot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Where the lookahead circle crosses the path.
    pub point:   Point,
    /// Signed bearing from the robot to `point`, in degrees.
    pub bearing: f64,
}

impl Candidate {
    /// Annotates `point` with its bearing as seen from `origin`.
    pub fn new(origin: Point, point: Point) -> Self {
        Self {
            point,
            bearing: origin.angle_to(point).to_degrees(),
        }
    }
}

/// The outcome of reducing the candidates to one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// The chosen target.
    pub target:   Candidate,
    /// True when no forward candidate existed and the remembered point was used.
    pub fallback: bool,
}

/// Every intersection of the lookahead circle with the path, in path order.
pub fn collect_candidates(path: &Path, center: Point, lookahead: f64) -> Vec<Point> {
    path.circle_intersections(center, lookahead)
}

pub fn annotate(origin: Point, points: &[Point]) -> Vec<Candidate> {
    points.iter().map(|p| Candidate::new(origin, *p)).collect()
}

/// Sorts by ascending bearing and drops candidates outside the forward cone.
///
/// A candidate survives when `|bearing - heading| < cone`. Order among equal
/// bearings is not meaningful.
pub fn forward_filter(candidates: &[Candidate], heading: f64, cone: f64) -> Vec<Candidate> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.bearing.total_cmp(&b.bearing));
    sorted
        .into_iter()
        .filter(|c| (c.bearing - heading).abs() < cone)
        .collect()
}

/// Picks the lowest-bearing forward candidate, or falls back to `remembered`
/// (re-annotated from `origin`) when none survived the filter.
pub fn select_target(forward: &[Candidate], remembered: Point, origin: Point) -> Selection {
    match forward.first() {
        Some(first) => Selection {
            target:   *first,
            fallback: false,
        },
        None => Selection {
            target:   Candidate::new(origin, remembered),
            fallback: true,
        },
    }
}

/// Heading change for one step: the bearing error divided by `gain_divisor`,
/// clamped to `±max_turn_rate` degrees.
pub fn heading_delta(bearing: f64, heading: f64, gain_divisor: f64, max_turn_rate: f64) -> f64 {
    ((bearing - heading) / gain_divisor).clamp(-max_turn_rate, max_turn_rate)
}

/// Displacement for one step towards `target`.
///
/// The difference vector is divided by its Manhattan length (never by less
/// than 1) and scaled by `speed`, so `|move.x| + |move.y| <= speed`.
/// Returns `(move, diff)` where `diff = target - position`.
pub fn motion_step(position: Point, target: Point, speed: f64) -> (Point, Point) {
    let diff = target.subtract(position);
    let denom = (diff.x.abs() + diff.y.abs()).max(1.0);
    let step = diff.divide(Point::splat(denom)).multiply(Point::splat(speed));
    (step, diff)
}

pub fn has_arrived(diff: Point, tolerance: f64) -> bool {
    diff.x.abs() < tolerance && diff.y.abs() < tolerance
}
