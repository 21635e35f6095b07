//! Point type and the polyline/polygon helpers shared by every synthesizer.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::rng::TerrainRng;

/// Roughness multiplier applied at each fractal recursion level.
pub const ROUGHNESS_DECAY: f64 = 0.65;

/// Segments shorter than this are treated as zero-length.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// A point in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        (len > DEGENERATE_LENGTH).then(|| self * (1.0 / len))
    }

    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    /// Clamps both coordinates into `[0, world_size]`.
    #[must_use]
    pub fn clamp_to_world(self, world_size: f64) -> Point {
        Point::new(self.x.clamp(0.0, world_size), self.y.clamp(0.0, world_size))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Interpolates `segments + 1` points from `start` to `end`, jittering every
/// interior point by `(rng - 0.5) * jitter` on each axis.
///
/// Endpoints are returned exactly. Consumes `2 * (segments - 1)` draws.
pub fn smoothed_line(
    start: Point,
    end: Point,
    segments: usize,
    jitter: f64,
    rng: &mut TerrainRng,
) -> Vec<Point> {
    let segments = segments.max(1);
    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);

    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let base = start.lerp(end, t);
        let dx = (rng.next_f64() - 0.5) * jitter;
        let dy = (rng.next_f64() - 0.5) * jitter;
        points.push(Point::new(base.x + dx, base.y + dy));
    }

    points.push(end);
    points
}

/// Midpoint displacement: each level inserts a midpoint between every pair of
/// neighbours, pushed along the segment normal by
/// `(rng - 0.5 - seaward_bias * 0.2) * roughness * length`.
///
/// The normal is `(-dy, dx)`, so a positive bias drifts detail toward the
/// right-hand side of the direction of travel. Roughness decays by
/// [`ROUGHNESS_DECAY`] per level. One draw is consumed per segment per level,
/// zero-length segments included (they receive no midpoint).
pub fn fractal_subdivide(
    points: &[Point],
    depth: u32,
    roughness: f64,
    rng: &mut TerrainRng,
    seaward_bias: f64,
) -> Vec<Point> {
    if depth == 0 || points.len() < 2 {
        return points.to_vec();
    }

    let mut refined = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        refined.push(a);

        let roll = rng.next_f64();
        let delta = b - a;
        let length = delta.length();
        if length <= DEGENERATE_LENGTH {
            continue;
        }

        let normal = Point::new(-delta.y, delta.x) * (1.0 / length);
        let offset = (roll - 0.5 - seaward_bias * 0.2) * roughness * length;
        refined.push(a.lerp(b, 0.5) + normal * offset);
    }
    if let Some(&last) = points.last() {
        refined.push(last);
    }

    fractal_subdivide(
        &refined,
        depth - 1,
        roughness * ROUGHNESS_DECAY,
        rng,
        seaward_bias,
    )
}

/// Closest point on `segment_start..segment_end` to `point`.
#[must_use]
pub fn nearest_point_on_segment(point: Point, segment_start: Point, segment_end: Point) -> Point {
    let delta = segment_end - segment_start;
    let len_sq = delta.dot(delta);
    if len_sq <= DEGENERATE_LENGTH * DEGENERATE_LENGTH {
        return segment_start;
    }
    let along = (point - segment_start).dot(delta) / len_sq;
    let t = along.clamp(0.0, 1.0);
    segment_start.lerp(segment_end, t)
}

/// Closest point on a polyline. An empty polyline yields the query point and
/// a single-point polyline yields that point.
#[must_use]
pub fn nearest_point_on_polyline(point: Point, polyline: &[Point]) -> Point {
    match polyline {
        [] => point,
        [only] => *only,
        _ => polyline
            .windows(2)
            .map(|pair| nearest_point_on_segment(point, pair[0], pair[1]))
            .min_by(|a, b| a.distance(point).total_cmp(&b.distance(point)))
            .unwrap_or(point),
    }
}

/// Distance from `point` to the closed boundary of `ring`.
#[must_use]
pub fn distance_to_ring(point: Point, ring: &[Point]) -> f64 {
    let Some(&first) = ring.first() else {
        return f64::INFINITY;
    };
    let mut closed = ring.to_vec();
    closed.push(first);
    nearest_point_on_polyline(point, &closed).distance(point)
}

/// Vertex mean. Not area-weighted; good enough for labelling and for lake
/// centres that are roughly star-shaped.
#[must_use]
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::new(0.0, 0.0), |acc, &p| acc + p);
    sum * (1.0 / n)
}

/// Unsigned shoelace area.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() / 2.0
}
