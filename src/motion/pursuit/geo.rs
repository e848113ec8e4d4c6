//! Geometry primitives for path definition and intersection calculations.
//!
//! # Types
//!
//! - `Point`: A 2D point (or vector) with component-wise arithmetic.
//! - `Line`: An infinite line in implicit form `a·x + b·y + c = 0`.
//! - `Segment`: A `Line` bounded by the two points that define it.
//! - `Path`: An ordered, validated sequence of segments built from waypoints.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PursuitError, Result};

/// A 2D point in the field coordinate system.
///
/// Used for waypoints, robot positions, intersection points and
/// displacement vectors alike.
///
/// # Example
///
/// ```
/// use purepursuit::motion::pursuit::geo::Point;
///
/// let waypoint = Point::new(24.0, 12.0);
/// assert_eq!(waypoint.add(Point::new(0.0, 0.0)), waypoint);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The x-coordinate.
    pub x: f64,
    /// The y-coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point using `x` and `y` coordinates
    pub const fn new(x: f64, y: f64) -> Self { Point { x, y } }

    /// Create a point with both coordinates set to `v`
    pub const fn splat(v: f64) -> Self { Point { x: v, y: v } }

    /// Component-wise sum
    pub fn add(self, other: Point) -> Point { Point::new(self.x + other.x, self.y + other.y) }

    /// Component-wise difference
    pub fn subtract(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise product
    pub fn multiply(self, other: Point) -> Point {
        Point::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient.
    ///
    /// Dividing by a zero component follows IEEE rules (infinite or NaN),
    /// callers guard before dividing.
    pub fn divide(self, other: Point) -> Point { Point::new(self.x / other.x, self.y / other.y) }

    /// Signed angle in radians, in `(-π, π]`, of the vector from `self` to `other`.
    pub fn angle_to(self, other: Point) -> f64 { (other.y - self.y).atan2(other.x - self.x) }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An infinite line `a·x + b·y + c = 0`.
///
/// Equality is exact coefficient comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Coefficient of `x`.
    pub a: f64,
    /// Coefficient of `y`.
    pub b: f64,
    /// Constant term.
    pub c: f64,
}

impl Line {
    /// Create a line from its coefficients
    pub const fn new(a: f64, b: f64, c: f64) -> Line { Line { a, b, c } }

    /// Create the line through two points.
    ///
    /// Coincident points give `a = b = c = 0`, see [`Line::is_degenerate`].
    pub fn from_points(p1: Point, p2: Point) -> Line {
        let a = p1.y - p2.y;
        let b = p2.x - p1.x;
        let c = -a * p1.x - b * p1.y;
        Line { a, b, c }
    }

    /// `a² + b²`, the squared norm of the line's normal vector.
    pub fn norm_squared(&self) -> f64 { self.a * self.a + self.b * self.b }

    /// True when the line was built from two coincident points and has no direction.
    pub fn is_degenerate(&self) -> bool { self.a == 0.0 && self.b == 0.0 }

    /// Evaluate `a·x + b·y + c` at `point` (zero when the point is on the line).
    pub fn eval(&self, point: Point) -> f64 { self.a * point.x + self.b * point.y + self.c }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x + {}y + {} = 0", self.a, self.b, self.c)
    }
}

/// A line bounded by the two endpoints that define it.
///
/// The coefficients are always those derived from `p1` and `p2`; the fields
/// are private so they cannot drift apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    line: Line,
    p1:   Point,
    p2:   Point,
}

/// Round to two decimal places, absorbing accumulated floating-point error.
///
/// Rounds the product `v * 100` half away from zero, so a value whose scaled
/// product lands on `.5` rounds up in magnitude even when its exact binary
/// value sits just below the tie (`0.015` gives `0.02`).
fn round2(v: f64) -> f64 { (v * 100.0).round() / 100.0 }

impl Segment {
    /// Create a segment from its two endpoints
    pub fn new(p1: Point, p2: Point) -> Segment {
        Segment {
            line: Line::from_points(p1, p2),
            p1,
            p2,
        }
    }

    /// The underlying infinite line
    pub fn line(&self) -> Line { self.line }

    /// The starting point of the segment
    pub fn p1(&self) -> Point { self.p1 }

    /// The ending point of the segment
    pub fn p2(&self) -> Point { self.p2 }

    /// Endpoints as a pair, for display
    pub fn endpoints(&self) -> (Point, Point) { (self.p1, self.p2) }

    /// Checks whether a point already known to lie on the line falls within
    /// the segment's bounding box.
    ///
    /// Coordinates and bounds are compared after rounding to two decimals,
    /// so points up to `0.005` outside the box still count as on the segment.
    pub fn point_on(&self, point: Point) -> bool {
        let (x, y) = (round2(point.x), round2(point.y));
        let in_x = x >= round2(self.p1.x.min(self.p2.x)) && x <= round2(self.p1.x.max(self.p2.x));
        let in_y = y >= round2(self.p1.y.min(self.p2.y)) && y <= round2(self.p1.y.max(self.p2.y));
        in_x && in_y
    }

    /// Finds the points where a circle crosses this segment.
    ///
    /// Returns zero, one (tangent) or two points, all satisfying
    /// [`Segment::point_on`]. The line is re-expressed relative to the circle
    /// center so the closest point to the center is `(-a·c, -b·c) / (a² + b²)`.
    ///
    /// A degenerate segment has no line to intersect and yields no points.
    ///
    /// # Example
    ///
    /// ```
    /// use purepursuit::motion::pursuit::geo::{Point, Segment};
    ///
    /// let seg = Segment::new(Point::new(-10.0, 0.0), Point::new(10.0, 0.0));
    /// let pts = seg.circle_intersection(Point::new(0.0, 0.0), 5.0);
    /// assert_eq!(pts.len(), 2);
    /// ```
    pub fn circle_intersection(&self, center: Point, radius: f64) -> Vec<Point> {
        if self.line.is_degenerate() {
            warn!("Skipping degenerate segment {} for intersection", self);
            return Vec::new();
        }

        let local = Segment::new(self.p1.subtract(center), self.p2.subtract(center));
        let Line { a, b, c } = local.line;
        let norm = local.line.norm_squared();

        let d0 = c.abs() / norm.sqrt();
        if d0 > radius {
            return Vec::new();
        }

        let x0 = (-a * c) / norm;
        let y0 = (-b * c) / norm;

        if d0 == radius {
            let tangent = Point::new(x0, y0).add(center);
            return if self.point_on(tangent) { vec![tangent] } else { Vec::new() };
        }

        let d = (radius * radius - (c * c) / norm).sqrt();
        let mult = ((d * d) / norm).sqrt();

        [Point::new(x0 + b * mult, y0 - a * mult), Point::new(x0 - b * mult, y0 + a * mult)]
            .into_iter()
            .filter(|p| local.point_on(*p))
            .map(|p| p.add(center))
            .collect()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.p1, self.p2)
    }
}

/// A sequence of segments joining consecutive waypoints.
///
/// Built once and never mutated, so it can be shared read-only between
/// controllers.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
    segments:  Vec<Segment>,
}

impl Path {
    /// Build a path from an ordered list of waypoints.
    ///
    /// # Errors
    ///
    /// - [`PursuitError::TooFewWaypoints`] with fewer than two waypoints.
    /// - [`PursuitError::DegenerateSegment`] when two consecutive waypoints coincide.
    pub fn from_waypoints(waypoints: Vec<Point>) -> Result<Path> {
        if waypoints.len() < 2 {
            return Err(PursuitError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let mut segments = Vec::with_capacity(waypoints.len() - 1);
        for (index, pair) in waypoints.windows(2).enumerate() {
            let segment = Segment::new(pair[0], pair[1]);
            if segment.line().is_degenerate() {
                return Err(PursuitError::DegenerateSegment {
                    index,
                    point: pair[0],
                });
            }
            segments.push(segment);
        }

        Ok(Path {
            waypoints,
            segments,
        })
    }

    /// The waypoints the path was built from
    pub fn waypoints(&self) -> &[Point] { &self.waypoints }

    /// The segments in path order
    pub fn segments(&self) -> &[Segment] { &self.segments }

    /// Segment endpoints in path order
    pub fn segment_endpoints(&self) -> Vec<(Point, Point)> {
        self.segments.iter().map(Segment::endpoints).collect()
    }

    /// The first waypoint
    pub fn start(&self) -> Point { self.waypoints[0] }

    /// The last waypoint
    pub fn end(&self) -> Point { self.waypoints[self.waypoints.len() - 1] }

    /// All circle intersections, in segment order and then in the order each
    /// segment reports them.
    pub fn circle_intersections(&self, center: Point, radius: f64) -> Vec<Point> {
        self.segments
            .iter()
            .flat_map(|segment| segment.circle_intersection(center, radius))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
    }

    fn axis_segment() -> Segment { Segment::new(Point::new(-10.0, 0.0), Point::new(10.0, 0.0)) }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(3.0, -4.5);
        assert_eq!(p.add(Point::new(0.0, 0.0)), p);
        assert_eq!(p.subtract(Point::new(1.0, 1.0)), Point::new(2.0, -5.5));
        assert_eq!(p.multiply(Point::splat(2.0)), Point::new(6.0, -9.0));
        assert_eq!(p.divide(Point::new(3.0, 1.5)), Point::new(1.0, -3.0));
    }

    #[test]
    fn point_divide_by_zero_is_not_an_error() {
        let q = Point::new(1.0, 0.0).divide(Point::new(0.0, 0.0));
        assert!(q.x.is_infinite());
        assert!(q.y.is_nan());
    }

    #[test]
    fn angle_to_quadrants() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(o.angle_to(Point::new(1.0, 0.0)), 0.0);
        assert!((o.angle_to(Point::new(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < TOLERANCE);
        assert!((o.angle_to(Point::new(-1.0, 0.0)) - std::f64::consts::PI).abs() < TOLERANCE);
        assert!((o.angle_to(Point::new(0.0, -1.0)) + std::f64::consts::FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(Line::new(1.0, -2.0, 3.0).to_string(), "1x + -2y + 3 = 0");
        assert_eq!(axis_segment().to_string(), "(-10, 0) -> (10, 0)");
    }

    #[test]
    fn line_passes_through_both_points() {
        let pairs = [
            (Point::new(0.0, 0.0), Point::new(48.0, 0.0)),
            (Point::new(-3.2, 7.1), Point::new(5.9, -11.4)),
            (Point::new(48.0, 0.0), Point::new(48.0, 48.0)),
            (Point::new(0.1, 0.2), Point::new(0.3, 0.4)),
        ];
        for (p1, p2) in pairs {
            let line = Line::from_points(p1, p2);
            assert!(!line.is_degenerate());
            assert!(line.eval(p1).abs() < 1e-9, "{} not on {}", p1, line);
            assert!(line.eval(p2).abs() < 1e-9, "{} not on {}", p2, line);
        }
    }

    #[test]
    fn line_from_coincident_points_is_degenerate() {
        let p = Point::new(2.0, 2.0);
        let line = Line::from_points(p, p);
        assert!(line.is_degenerate());
        assert_eq!(line.c, 0.0);
    }

    #[test]
    fn point_on_endpoints_and_midpoint() {
        let seg = Segment::new(Point::new(1.0, 2.0), Point::new(5.0, 10.0));
        assert!(seg.point_on(seg.p1()));
        assert!(seg.point_on(seg.p2()));
        assert!(seg.point_on(Point::new(3.0, 6.0)));
    }

    #[test]
    fn point_on_rejects_collinear_outside() {
        let seg = Segment::new(Point::new(1.0, 2.0), Point::new(5.0, 10.0));
        assert!(!seg.point_on(Point::new(6.0, 12.0)));
        assert!(!seg.point_on(Point::new(0.0, 0.0)));
    }

    #[test]
    fn point_on_rounding_tolerance() {
        let seg = axis_segment();
        assert!(seg.point_on(Point::new(10.004, 0.0)));
        assert!(seg.point_on(Point::new(0.0, -0.004)));
        assert!(!seg.point_on(Point::new(10.006, 0.0)));
        assert!(!seg.point_on(Point::new(-10.02, 0.0)));
    }

    #[test]
    fn round2_ties_round_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.015), 0.02);
        assert_eq!(round2(0.045), 0.05);
        assert_eq!(round2(10.004), 10.0);
    }

    #[test]
    fn point_on_tie_just_outside_bound() {
        // 0.015 scales to exactly 1.5 and rounds to 0.02, past the 0.01 bound.
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(0.01, 0.0));
        assert!(seg.point_on(Point::new(0.014, 0.0)));
        assert!(!seg.point_on(Point::new(0.015, 0.0)));
    }

    #[test]
    fn circle_crosses_segment_twice() {
        let pts = axis_segment().circle_intersection(Point::new(0.0, 0.0), 5.0);
        assert_eq!(pts.len(), 2);
        assert!(pts.contains(&Point::new(-5.0, 0.0)));
        assert!(pts.contains(&Point::new(5.0, 0.0)));
    }

    #[test]
    fn circle_tangent_to_segment() {
        let pts = axis_segment().circle_intersection(Point::new(0.0, 5.0), 5.0);
        assert_eq!(pts, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn circle_too_far_from_segment() {
        let pts = axis_segment().circle_intersection(Point::new(0.0, 10.0), 1.0);
        assert!(pts.is_empty());
    }

    #[test]
    fn circle_crosses_line_beyond_segment() {
        let seg = Segment::new(Point::new(2.0, 0.0), Point::new(10.0, 0.0));
        let pts = seg.circle_intersection(Point::new(0.0, 0.0), 5.0);
        assert_eq!(pts, vec![Point::new(5.0, 0.0)]);
    }

    #[test]
    fn tangent_outside_segment_is_dropped() {
        let seg = Segment::new(Point::new(2.0, 0.0), Point::new(10.0, 0.0));
        assert!(seg.circle_intersection(Point::new(0.0, 5.0), 5.0).is_empty());
    }

    #[test]
    fn circle_crosses_diagonal() {
        let seg = Segment::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));
        let pts = seg.circle_intersection(Point::new(0.0, 0.0), 1.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(pts.len(), 2);
        assert!(close(pts[0], Point::new(h, h)));
        assert!(close(pts[1], Point::new(-h, -h)));
    }

    #[test]
    fn off_origin_center_is_translated_back() {
        let seg = Segment::new(Point::new(48.0, 0.0), Point::new(48.0, 48.0));
        let pts = seg.circle_intersection(Point::new(48.0, 20.0), 12.0);
        assert_eq!(pts.len(), 2);
        assert!(pts.iter().any(|p| close(*p, Point::new(48.0, 32.0))));
        assert!(pts.iter().any(|p| close(*p, Point::new(48.0, 8.0))));
    }

    #[test]
    fn zero_radius_on_segment() {
        let pts = axis_segment().circle_intersection(Point::new(3.0, 0.0), 0.0);
        assert_eq!(pts, vec![Point::new(3.0, 0.0)]);
    }

    #[test]
    fn degenerate_segment_has_no_intersections() {
        let p = Point::new(1.0, 1.0);
        assert!(Segment::new(p, p).circle_intersection(p, 3.0).is_empty());
    }

    #[test]
    fn intersection_is_deterministic() {
        let seg = Segment::new(Point::new(-3.7, 1.3), Point::new(12.9, 8.8));
        let center = Point::new(2.2, 4.1);
        let first = seg.circle_intersection(center, 6.3);
        let second = seg.circle_intersection(center, 6.3);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn path_from_waypoints() {
        let path = Path::from_waypoints(vec![
            Point::new(0.0, 0.0),
            Point::new(48.0, 0.0),
            Point::new(48.0, 48.0),
        ])
        .expect("valid path");
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        assert_eq!(path.end(), Point::new(48.0, 48.0));
        assert_eq!(
            path.segment_endpoints(),
            vec![
                (Point::new(0.0, 0.0), Point::new(48.0, 0.0)),
                (Point::new(48.0, 0.0), Point::new(48.0, 48.0)),
            ]
        );
    }

    #[test]
    fn path_rejects_too_few_waypoints() {
        let err = Path::from_waypoints(vec![Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, PursuitError::TooFewWaypoints { count: 1 }));
    }

    #[test]
    fn path_rejects_coincident_waypoints() {
        let err = Path::from_waypoints(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, PursuitError::DegenerateSegment { index: 1, .. }));
    }

    #[test]
    fn path_intersections_follow_segment_order() {
        let path = Path::from_waypoints(vec![
            Point::new(-1.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])
        .expect("valid path");
        let pts = path.circle_intersections(Point::new(0.0, 0.0), 0.5);
        assert_eq!(pts, vec![Point::new(0.5, 0.0), Point::new(-0.5, 0.0)]);
    }
}
