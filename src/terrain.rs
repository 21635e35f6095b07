//! Terrain generation entry point and the bundle it returns.
//!
//! Stages run in a fixed order over one random stream: ocean, lakes, the
//! coastline render line, rivers, contours, then beaches. Moving a stage
//! changes the output of every stage after it.

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, trace};
use serde::Serialize;

use crate::archetype::{Archetype, pick_archetype};
use crate::beaches::{LAKE_BEACH_WIDTH, OCEAN_BEACH_WIDTH, lake_beach, ocean_beach};
use crate::config::{GenerationParams, GeographicSetting};
use crate::contours::generate_contours;
use crate::geometry::Point;
use crate::lakes::{Lake, generate_lakes};
use crate::names::{name_lake, name_river};
use crate::ocean::{OceanShape, generate_ocean};
use crate::rivers::{
    RiverKind, RiverPath, delta_network, generic_rivers, major_river, peninsula_rivers,
};
use crate::rng::TerrainRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterKind {
    Ocean,
    Lake,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterFeature {
    pub id: String,
    pub kind: WaterKind,
    pub polygon: Vec<Point>,
    /// Lakes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Display line for the coast, smoother than the ocean polygon edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoastlineFeature {
    pub id: String,
    pub polyline: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiverFeature {
    pub id: String,
    pub polyline: Vec<Point>,
    pub width: f64,
    pub name: String,
    pub kind: RiverKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourLine {
    pub id: String,
    pub elevation: u32,
    pub polyline: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeachFeature {
    pub id: String,
    pub kind: WaterKind,
    pub polygon: Vec<Point>,
    pub width: f64,
}

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainBundle {
    pub archetype: Archetype,
    pub seed: i64,
    pub world_size: f64,
    pub water: Vec<WaterFeature>,
    pub coastlines: Vec<CoastlineFeature>,
    pub rivers: Vec<RiverFeature>,
    pub contours: Vec<ContourLine>,
    pub beaches: Vec<BeachFeature>,
}

impl TerrainBundle {
    #[must_use]
    pub fn ocean(&self) -> Option<&WaterFeature> {
        self.water.iter().find(|w| w.kind == WaterKind::Ocean)
    }

    pub fn lakes(&self) -> impl Iterator<Item = &WaterFeature> {
        self.water.iter().filter(|w| w.kind == WaterKind::Lake)
    }
}

/// Generates terrain with default tuning.
///
/// # Panics
///
/// If `world_size` is not positive and finite.
#[must_use]
pub fn generate(world_size: f64, seed: i64, setting: Option<GeographicSetting>) -> TerrainBundle {
    generate_terrain(&GenerationParams::new(world_size, seed, setting))
}

/// Generates terrain for `params`. The result depends only on `params`.
///
/// # Panics
///
/// If `params.world_size` is not positive and finite; use
/// [`GenerationParams::validate`] first for untrusted input.
#[must_use]
pub fn generate_terrain(params: &GenerationParams) -> TerrainBundle {
    let w = params.world_size;
    assert!(
        w.is_finite() && w > 0.0,
        "world size must be positive and finite, got {w}"
    );
    let _timer = Timed::new("terrain generation");

    let seed = params.seed;
    let archetype = pick_archetype(seed, params.setting);
    let mut rng = TerrainRng::from_seed(seed);
    debug!("seed {seed}: archetype {archetype}, world size {w}");

    let ocean = generate_ocean(archetype, w, &mut rng);
    let lakes = generate_lakes(archetype, w, seed, ocean.as_ref(), &mut rng);
    let coastline = ocean.as_ref().map(|o| o.render_coastline(&mut rng));
    let chance = params.rivers.peninsula_river_chance;
    let river_paths = route_rivers(archetype, w, chance, ocean.as_ref(), &lakes, &mut rng);
    let contour_lines = generate_contours(archetype, w, ocean.as_ref(), &mut rng);

    // Lakes claim their names before rivers do.
    let mut names = UniqueNames::default();
    let water = water_features(ocean.as_ref(), &lakes, seed, &mut names);
    let rivers = name_rivers(river_paths, seed, w, &mut names);
    let beaches = beach_features(ocean.as_ref(), &lakes, w, &mut rng);

    let coastlines: Vec<CoastlineFeature> = coastline
        .into_iter()
        .map(|polyline| CoastlineFeature {
            id: "coastline-0".to_string(),
            polyline,
        })
        .collect();
    let contours: Vec<ContourLine> = contour_lines
        .into_iter()
        .map(|c| ContourLine {
            id: format!("contour-{}", c.elevation),
            elevation: c.elevation,
            polyline: c.polyline,
        })
        .collect();

    debug!(
        "{archetype}: {} water, {} coastlines, {} rivers, {} contours, {} beaches",
        water.len(),
        coastlines.len(),
        rivers.len(),
        contours.len(),
        beaches.len()
    );

    TerrainBundle {
        archetype,
        seed,
        world_size: w,
        water,
        coastlines,
        rivers,
        contours,
        beaches,
    }
}

/// River network for `archetype`; `chance` gates the peninsula river.
fn route_rivers(
    archetype: Archetype,
    w: f64,
    chance: f64,
    ocean: Option<&OceanShape>,
    lakes: &[Lake],
    rng: &mut TerrainRng,
) -> Vec<RiverPath> {
    match archetype {
        Archetype::Peninsula => ocean
            .map(|o| peninsula_rivers(o, lakes, w, chance, rng))
            .unwrap_or_default(),
        Archetype::RiverValley => {
            let major = major_river(w, rng);
            let generic = generic_rivers(archetype, w, ocean, lakes, rng);
            [vec![major], generic].concat()
        }
        Archetype::Delta => {
            let delta = ocean.map(|o| delta_network(o, w, rng)).unwrap_or_default();
            let generic = generic_rivers(archetype, w, ocean, lakes, rng);
            [delta, generic].concat()
        }
        Archetype::WestCoast
        | Archetype::EastCoast
        | Archetype::SouthCoast
        | Archetype::NorthCoast
        | Archetype::Island
        | Archetype::BayHarbor
        | Archetype::Lakefront
        | Archetype::Inland => generic_rivers(archetype, w, ocean, lakes, rng),
    }
}

fn water_features(
    ocean: Option<&OceanShape>,
    lakes: &[Lake],
    seed: i64,
    names: &mut UniqueNames,
) -> Vec<WaterFeature> {
    let mut water = Vec::with_capacity(lakes.len() + 1);
    if let Some(ocean) = ocean {
        water.push(WaterFeature {
            id: "ocean-0".to_string(),
            kind: WaterKind::Ocean,
            polygon: ocean.polygon.clone(),
            name: None,
        });
    }
    for (i, lake) in lakes.iter().enumerate() {
        let name = names.claim(seed.wrapping_add(500 + i as i64), name_lake);
        trace!(
            "lake {i} `{name}` at ({:.1}, {:.1})",
            lake.center.x,
            lake.center.y
        );
        water.push(WaterFeature {
            id: format!("lake-{i}"),
            kind: WaterKind::Lake,
            polygon: lake.polygon.clone(),
            name: Some(name),
        });
    }
    water
}

/// Last stage on the random stream: the ocean beach draws, lake beaches do not.
fn beach_features(
    ocean: Option<&OceanShape>,
    lakes: &[Lake],
    w: f64,
    rng: &mut TerrainRng,
) -> Vec<BeachFeature> {
    let mut beaches = Vec::with_capacity(lakes.len() + 1);
    if let Some(ocean) = ocean {
        beaches.push(BeachFeature {
            id: "beach-ocean".to_string(),
            kind: WaterKind::Ocean,
            polygon: ocean_beach(ocean, w, rng),
            width: OCEAN_BEACH_WIDTH * w,
        });
    }
    for (i, lake) in lakes.iter().enumerate() {
        beaches.push(BeachFeature {
            id: format!("beach-lake-{i}"),
            kind: WaterKind::Lake,
            polygon: lake_beach(lake, w),
            width: LAKE_BEACH_WIDTH * w,
        });
    }
    beaches
}

fn name_rivers(
    paths: Vec<RiverPath>,
    seed: i64,
    world_size: f64,
    names: &mut UniqueNames,
) -> Vec<RiverFeature> {
    let mut plain = 0;
    let mut channels = 0;
    paths
        .into_iter()
        .map(|path| {
            let (id, name_seed) = match path.kind {
                RiverKind::River => {
                    plain += 1;
                    (format!("river-{}", plain - 1), 1000 + plain - 1)
                }
                RiverKind::MajorRiver => ("major-river".to_string(), 1500),
                RiverKind::MainChannel => ("delta-main".to_string(), 2000),
                RiverKind::Distributary => {
                    channels += 1;
                    (format!("delta-channel-{}", channels - 1), 2000 + channels)
                }
            };
            let name = names.claim(seed.wrapping_add(name_seed), name_river);
            trace!("{id} `{name}`: {} points", path.polyline.len());
            RiverFeature {
                id,
                width: path.kind.width_fraction() * world_size,
                name,
                kind: path.kind,
                polyline: path.polyline,
            }
        })
        .collect()
}

/// Hands out names that are unique within one bundle.
#[derive(Default)]
struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    /// Names from `seed`, stepping the seed by 97 until the name is unused.
    fn claim(&mut self, seed: i64, namer: fn(i64) -> String) -> String {
        let mut seed = seed;
        loop {
            let name = namer(seed);
            if self.taken.insert(name.clone()) {
                return name;
            }
            seed = seed.wrapping_add(97);
        }
    }
}

/// Logs the elapsed time at debug level when dropped.
struct Timed {
    name: &'static str,
    start: Instant,
}

impl Timed {
    fn new(name: &'static str) -> Self {
        trace!("{name}...");
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        debug!("{}: {:.3?}", self.name, self.start.elapsed());
    }
}
