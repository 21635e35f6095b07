//! River and delta channel synthesis.
//!
//! Rivers run from a lake outlet or a highland point to the sea. When there
//! is a sea, the final point is projected onto its shoreline so the river
//! mouth lies exactly on the ocean polygon boundary.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::geometry::{Point, nearest_point_on_polyline, smoothed_line};
use crate::lakes::Lake;
use crate::ocean::OceanShape;
use crate::rng::TerrainRng;

/// A snapped target closer than this fraction of world size to the source is
/// considered degenerate.
const MIN_RUN: f64 = 0.1;
const RIVER_JITTER: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiverKind {
    River,
    /// The single river crossing a river valley.
    MajorRiver,
    /// Delta stem from the upland edge to the fork.
    MainChannel,
    Distributary,
}

impl RiverKind {
    /// Display width as a fraction of world size.
    #[must_use]
    pub fn width_fraction(self) -> f64 {
        match self {
            RiverKind::River => 0.008,
            RiverKind::MajorRiver => 0.014,
            RiverKind::MainChannel => 0.012,
            RiverKind::Distributary => 0.006,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiverPath {
    pub kind: RiverKind,
    pub polyline: Vec<Point>,
}

impl RiverPath {
    fn river(polyline: Vec<Point>) -> Self {
        Self {
            kind: RiverKind::River,
            polyline,
        }
    }
}

/// Grows one river from `source` toward the sea.
///
/// Draws exactly `3 + 2 * (segments - 1)` values whichever target wins, so
/// the branch taken never shifts later features.
pub fn generate_river(
    source: Point,
    archetype: Archetype,
    world_size: f64,
    rng: &mut TerrainRng,
    ocean: Option<&OceanShape>,
) -> Vec<Point> {
    let heuristic = heuristic_target(source, archetype, world_size, rng, ocean);
    let shoreline = ocean.map(|o| o.shoreline.as_slice());

    let target = shoreline.map_or(heuristic, |coast| {
        let snapped = nearest_point_on_polyline(source, coast);
        if snapped.distance(source) < MIN_RUN * world_size {
            heuristic
        } else {
            snapped
        }
    });

    let segments = rng.int_range(12, 20) as usize;
    let mut path = smoothed_line(source, target, segments, RIVER_JITTER * world_size, rng);
    if let (Some(coast), Some(mouth)) = (shoreline, path.last_mut()) {
        *mouth = nearest_point_on_polyline(*mouth, coast);
    }
    path
}

/// Fallback target. Always draws two values.
fn heuristic_target(
    source: Point,
    archetype: Archetype,
    world_size: f64,
    rng: &mut TerrainRng,
    ocean: Option<&OceanShape>,
) -> Point {
    let w = world_size;
    let a = rng.next_f64();
    let b = rng.next_f64();

    match ocean {
        Some(ocean) if archetype.has_ocean() => {
            let frame = &ocean.frame;
            let (t, s) = frame.to_local(source);
            match &ocean.peninsula {
                // Run along the finger toward the tip.
                Some(pen) => {
                    let reach = pen.length + pen.tip_half_width;
                    let s = (s + (0.25 + 0.15 * b) * w).min(reach);
                    let t = pen.spine_at(s) + (a - 0.5) * 0.1 * w;
                    frame.to_world(t, s).clamp_to_world(w)
                }
                // Head for the sea side of the shoreline band.
                None => {
                    let t = (t + (a - 0.5) * 0.3 * w).clamp(0.0, w);
                    let s = ocean.nominal_depth * (0.3 + 0.4 * b);
                    frame.to_world(t, s)
                }
            }
        }
        _ => {
            let angle = a * TAU;
            let distance = (0.3 + 0.2 * b) * w;
            let offset = Point::new(angle.cos(), angle.sin()) * distance;
            (source + offset).clamp_to_world(w)
        }
    }
}

/// Lake vertex a river leaves from. Draws one value on every path.
fn lake_outlet(lake: &Lake, ocean: Option<&OceanShape>, rng: &mut TerrainRng) -> Point {
    let roll = rng.next_f64();
    if let Some(ocean) = ocean {
        closest_to(&lake.polygon, |p| {
            nearest_point_on_polyline(p, &ocean.shoreline).distance(p)
        })
    } else {
        let count = lake.polygon.len();
        lake.polygon[((roll * count as f64) as usize).min(count - 1)]
    }
}

fn closest_to(points: &[Point], mut cost: impl FnMut(Point) -> f64) -> Point {
    points
        .iter()
        .copied()
        .map(|p| (cost(p), p))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map_or(Point::new(0.0, 0.0), |(_, p)| p)
}

/// Highland spring near the middle of the dry land. Draws two values.
fn highland_source(ocean: &OceanShape, world_size: f64, rng: &mut TerrainRng) -> Point {
    let dx = (rng.next_f64() - 0.5) * 0.2 * world_size;
    let dy = (rng.next_f64() - 0.5) * 0.2 * world_size;
    ocean.clamp_inland(ocean.land_center() + Point::new(dx, dy))
}

/// One river per lake, plus a highland river when a sea exists but no lake
/// feeds it.
pub fn generic_rivers(
    archetype: Archetype,
    world_size: f64,
    ocean: Option<&OceanShape>,
    lakes: &[Lake],
    rng: &mut TerrainRng,
) -> Vec<RiverPath> {
    let mut rivers: Vec<RiverPath> = lakes
        .iter()
        .map(|lake| {
            let source = lake_outlet(lake, ocean, rng);
            let path = generate_river(source, archetype, world_size, rng, ocean);
            RiverPath::river(path)
        })
        .collect();

    let standalone = lakes.is_empty()
        && !matches!(archetype, Archetype::RiverValley | Archetype::Delta);
    if let Some(ocean) = ocean.filter(|_| standalone) {
        let source = highland_source(ocean, world_size, rng);
        let path = generate_river(source, archetype, world_size, rng, Some(ocean));
        rivers.push(RiverPath::river(path));
    }
    rivers
}

/// At most one river, behind a single gate roll.
///
/// The roll is drawn on every path. When it fails nothing else is drawn,
/// so a peninsula that grows a river shifts every later draw relative to
/// one that does not; existing seeds depend on that.
pub fn peninsula_rivers(
    ocean: &OceanShape,
    lakes: &[Lake],
    world_size: f64,
    chance: f64,
    rng: &mut TerrainRng,
) -> Vec<RiverPath> {
    let roll = rng.next_f64();
    if roll >= chance {
        return Vec::new();
    }

    // The lake vertex nearest the base keeps the river off the thin tip.
    let source = if let Some(lake) = lakes.first() {
        closest_to(&lake.polygon, |p| ocean.frame.to_local(p).1)
    } else {
        highland_source(ocean, world_size, rng)
    };
    let path = generate_river(source, Archetype::Peninsula, world_size, rng, Some(ocean));
    vec![RiverPath::river(path)]
}

/// The single river crossing a valley from one edge to the opposite one.
pub fn major_river(world_size: f64, rng: &mut TerrainRng) -> RiverPath {
    let w = world_size;
    let horizontal = rng.next_f64() < 0.5;
    let enter = rng.range(0.3, 0.7) * w;
    let leave = rng.range(0.3, 0.7) * w;
    let (start, end) = if horizontal {
        (Point::new(0.0, enter), Point::new(w, leave))
    } else {
        (Point::new(enter, 0.0), Point::new(leave, w))
    };
    RiverPath {
        kind: RiverKind::MajorRiver,
        polyline: smoothed_line(start, end, 24, 0.06 * w, rng),
    }
}

/// Main stem from the north edge to a fork, then three to five distributaries
/// fanning out to the southern shoreline.
pub fn delta_network(
    ocean: &OceanShape,
    world_size: f64,
    rng: &mut TerrainRng,
) -> Vec<RiverPath> {
    let w = world_size;
    let start = Point::new(rng.range(0.4, 0.6) * w, 0.0);
    let fork = Point::new(rng.range(0.42, 0.58) * w, rng.range(0.45, 0.55) * w);
    let mut network = vec![RiverPath {
        kind: RiverKind::MainChannel,
        polyline: smoothed_line(start, fork, 14, 0.02 * w, rng),
    }];

    let count = rng.int_range(3, 6) as usize;
    let fan = rng.range(0.5, 0.7) * w;
    for j in 0..count {
        let along = (j as f64 + 0.5) / count as f64 - 0.5;
        let wobble = (rng.next_f64() - 0.5) * 0.04 * w;
        let x = (fork.x + along * fan + wobble).clamp(0.05 * w, 0.95 * w);
        let target = nearest_point_on_polyline(Point::new(x, w), &ocean.shoreline);
        let segments = rng.int_range(10, 14) as usize;
        let mut channel = smoothed_line(fork, target, segments, 0.015 * w, rng);
        if let Some(mouth) = channel.last_mut() {
            *mouth = nearest_point_on_polyline(*mouth, &ocean.shoreline);
        }
        network.push(RiverPath {
            kind: RiverKind::Distributary,
            polyline: channel,
        });
    }
    network
}
