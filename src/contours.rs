//! Elevation hint lines.
//!
//! Ten isolines, one per elevation from 10 to 100. They are drawn for the
//! eye only and do not come from a height field.

use std::f64::consts::{PI, TAU};

use crate::archetype::Archetype;
use crate::geometry::{Point, smoothed_line};
use crate::ocean::OceanShape;
use crate::rng::TerrainRng;

pub const ELEVATIONS: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

const SEGMENTS: usize = 10;
const JITTER: f64 = 0.025;

#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub elevation: u32,
    pub polyline: Vec<Point>,
}

/// How the isolines are laid out over the map.
#[derive(Debug, Clone, Copy)]
enum Layout<'a> {
    /// Parallel to the sea edge, climbing inland.
    Coastal(&'a OceanShape),
    /// Chords across rolling ground.
    Rolling,
    /// Shrinking rings around a high point.
    Concentric(Point),
}

fn layout(archetype: Archetype, world_size: f64, ocean: Option<&OceanShape>) -> Layout<'_> {
    let middle = Point::new(0.5 * world_size, 0.5 * world_size);
    match archetype {
        Archetype::WestCoast
        | Archetype::EastCoast
        | Archetype::SouthCoast
        | Archetype::NorthCoast
        | Archetype::BayHarbor
        | Archetype::Delta => ocean.map_or(Layout::Rolling, Layout::Coastal),
        Archetype::RiverValley | Archetype::Inland | Archetype::Lakefront => Layout::Rolling,
        Archetype::Peninsula => Layout::Concentric(ocean.map_or(middle, OceanShape::land_center)),
        Archetype::Island => Layout::Concentric(middle),
    }
}

/// Builds the ten contours. Every elevation draws two jitter values and then
/// `2 * (SEGMENTS - 1)` more for its line, whatever the layout.
pub fn generate_contours(
    archetype: Archetype,
    world_size: f64,
    ocean: Option<&OceanShape>,
    rng: &mut TerrainRng,
) -> Vec<Contour> {
    let w = world_size;
    let layout = layout(archetype, w, ocean);
    let count = ELEVATIONS.len() as f64;

    ELEVATIONS
        .iter()
        .enumerate()
        .map(|(i, &elevation)| {
            let f = (i as f64 + 1.0) / (count + 1.0);
            let a = rng.next_f64();
            let b = rng.next_f64();
            let (start, end) = match layout {
                Layout::Coastal(ocean) => coastal_band(ocean, f, a, b),
                Layout::Rolling => rolling_chord(w, f, a, b),
                Layout::Concentric(center) => concentric_chord(center, w, f, a, b),
            };
            Contour {
                elevation,
                polyline: smoothed_line(start, end, SEGMENTS, JITTER * w, rng),
            }
        })
        .collect()
}

fn coastal_band(ocean: &OceanShape, f: f64, a: f64, b: f64) -> (Point, Point) {
    let frame = &ocean.frame;
    let w = frame.world_size;
    let shore = (ocean.nominal_depth * 1.15).min(0.9 * w);
    let s = shore + f * (w - shore) * 0.9;
    let wobble = |r: f64| (s + (r - 0.5) * 0.04 * w).clamp(0.0, w);
    (frame.to_world(0.0, wobble(a)), frame.to_world(w, wobble(b)))
}

fn rolling_chord(w: f64, f: f64, a: f64, b: f64) -> (Point, Point) {
    let angle = a * PI;
    let along = Point::new(angle.cos(), angle.sin());
    let across = Point::new(-along.y, along.x);
    let offset = (f - 0.5) * 0.8 * w + (b - 0.5) * 0.04 * w;
    let mid = Point::new(0.5 * w, 0.5 * w) + across * offset;
    let half = 0.45 * w;
    (
        (mid - along * half).clamp_to_world(w),
        (mid + along * half).clamp_to_world(w),
    )
}

fn concentric_chord(center: Point, w: f64, f: f64, a: f64, b: f64) -> (Point, Point) {
    let radius = 0.42 * w * (1.0 - 0.85 * f);
    let from = a * TAU;
    let to = from + PI * (0.8 + 0.6 * b);
    let on_ring = |angle: f64| {
        let offset = Point::new(angle.cos(), angle.sin()) * radius;
        (center + offset).clamp_to_world(w)
    };
    (on_ring(from), on_ring(to))
}
