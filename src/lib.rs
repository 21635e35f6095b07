pub mod archetype;
pub mod batch;
pub mod beaches;
pub mod config;
pub mod contours;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lakes;
pub mod names;
pub mod ocean;
pub mod render;
pub mod rivers;
pub mod rng;
pub mod terrain;

pub use archetype::{Archetype, pick_archetype};
pub use batch::generate_batch;
pub use config::{GenerationParams, GeographicSetting, RenderSettings, RiverSettings};
pub use error::{Error, Result};
pub use geometry::Point;
pub use rivers::RiverKind;
pub use terrain::{
    BeachFeature, CoastlineFeature, ContourLine, RiverFeature, TerrainBundle, WaterFeature,
    WaterKind, generate, generate_terrain,
};
