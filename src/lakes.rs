//! Inland lakes: per-archetype counts, placement and irregular rings.

use std::f64::consts::TAU;

use crate::archetype::Archetype;
use crate::geometry::Point;
use crate::ocean::OceanShape;
use crate::rng::TerrainRng;

/// An inland water body before naming.
#[derive(Debug, Clone)]
pub struct Lake {
    pub center: Point,
    pub base_radius: f64,
    /// Closed ring of 10 to 15 points.
    pub polygon: Vec<Point>,
}

/// Per-archetype placement and sizing, as fractions of world size.
#[derive(Debug, Clone, Copy)]
struct LakeProfile {
    /// Land centre used when there is no ocean to derive one from.
    center: (f64, f64),
    /// Maximum distance of a lake centre from the land centre.
    spread: f64,
    base_radius: f64,
}

fn profile(archetype: Archetype) -> LakeProfile {
    match archetype {
        Archetype::Lakefront => LakeProfile {
            center: (0.5, 0.45),
            spread: 0.08,
            base_radius: 0.115,
        },
        Archetype::Peninsula => LakeProfile {
            center: (0.5, 0.5),
            spread: 0.05,
            base_radius: 0.045,
        },
        Archetype::Island => LakeProfile {
            center: (0.5, 0.5),
            spread: 0.18,
            base_radius: 0.06,
        },
        Archetype::Inland => LakeProfile {
            center: (0.5, 0.5),
            spread: 0.28,
            base_radius: 0.075,
        },
        _ => LakeProfile {
            center: (0.5, 0.5),
            spread: 0.22,
            base_radius: 0.07,
        },
    }
}

/// Number of lakes for a run, from seed arithmetic only.
#[must_use]
pub fn lake_count(archetype: Archetype, seed: i64) -> usize {
    let derived = seed.wrapping_mul(7).wrapping_add(31).unsigned_abs();
    let pick = |n: u64| (derived % n) as usize;
    match archetype {
        Archetype::Lakefront => 1,
        Archetype::Island => 1 + pick(2),
        Archetype::Inland => 1 + pick(3),
        Archetype::RiverValley => pick(2),
        // Peninsulas are usually too narrow; one seed in ten gets lakes.
        Archetype::Peninsula => {
            if (derived / 10).is_multiple_of(10) {
                1 + pick(2)
            } else {
                0
            }
        }
        _ => pick(4),
    }
}

/// Places and shapes the lakes for `archetype`.
pub fn generate_lakes(
    archetype: Archetype,
    world_size: f64,
    seed: i64,
    ocean: Option<&OceanShape>,
    rng: &mut TerrainRng,
) -> Vec<Lake> {
    let w = world_size;
    let profile = profile(archetype);
    let land_center = ocean.map_or_else(
        || Point::new(profile.center.0 * w, profile.center.1 * w),
        OceanShape::land_center,
    );
    let base_radius = profile.base_radius * w;

    (0..lake_count(archetype, seed))
        .map(|_| {
            let angle = rng.next_f64() * TAU;
            let distance = rng.next_f64() * profile.spread * w;
            let raw = land_center + Point::new(angle.cos(), angle.sin()) * distance;
            let center = if let Some(ocean) = ocean {
                ocean.clamp_inland(raw)
            } else {
                Point::new(
                    raw.x.clamp(0.15 * w, 0.85 * w),
                    raw.y.clamp(0.15 * w, 0.85 * w),
                )
            };
            Lake {
                center,
                base_radius,
                polygon: lake_ring(center, base_radius, w, rng),
            }
        })
        .collect()
}

fn lake_ring(center: Point, base_radius: f64, world_size: f64, rng: &mut TerrainRng) -> Vec<Point> {
    let count = rng.int_range(10, 16) as usize;
    let phase = rng.next_f64() * TAU;
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = phase + i as f64 * step + (rng.next_f64() - 0.5) * 0.4 * step;
            let radius = base_radius * rng.range(0.7, 1.2);
            let offset = Point::new(angle.cos(), angle.sin()) * radius;
            (center + offset).clamp_to_world(world_size)
        })
        .collect()
}
