//! Geography archetypes and the seed-only archetype pick.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GeographicSetting;
use crate::frame::Edge;

/// Geography template that decides which synthesizer branches run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    WestCoast,
    EastCoast,
    SouthCoast,
    NorthCoast,
    Island,
    Peninsula,
    BayHarbor,
    RiverValley,
    Lakefront,
    Inland,
    Delta,
}

/// Cardinal coasts in the order a `coastal` setting resolves them.
const CARDINAL_COASTS: [Archetype; 4] = [
    Archetype::WestCoast,
    Archetype::EastCoast,
    Archetype::SouthCoast,
    Archetype::NorthCoast,
];

impl Archetype {
    /// All archetypes in unconstrained-pick order.
    pub const ALL: [Archetype; 11] = [
        Archetype::WestCoast,
        Archetype::EastCoast,
        Archetype::SouthCoast,
        Archetype::NorthCoast,
        Archetype::Island,
        Archetype::Peninsula,
        Archetype::BayHarbor,
        Archetype::RiverValley,
        Archetype::Lakefront,
        Archetype::Inland,
        Archetype::Delta,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::WestCoast => "west_coast",
            Archetype::EastCoast => "east_coast",
            Archetype::SouthCoast => "south_coast",
            Archetype::NorthCoast => "north_coast",
            Archetype::Island => "island",
            Archetype::Peninsula => "peninsula",
            Archetype::BayHarbor => "bay_harbor",
            Archetype::RiverValley => "river_valley",
            Archetype::Lakefront => "lakefront",
            Archetype::Inland => "inland",
            Archetype::Delta => "delta",
        }
    }

    /// The world edge the sea occupies for the four cardinal coasts.
    #[must_use]
    pub fn cardinal_edge(self) -> Option<Edge> {
        match self {
            Archetype::WestCoast => Some(Edge::West),
            Archetype::EastCoast => Some(Edge::East),
            Archetype::SouthCoast => Some(Edge::South),
            Archetype::NorthCoast => Some(Edge::North),
            _ => None,
        }
    }

    /// Whether the ocean synthesizer produces a polygon for this archetype.
    #[must_use]
    pub fn has_ocean(self) -> bool {
        !matches!(
            self,
            Archetype::Island | Archetype::RiverValley | Archetype::Lakefront | Archetype::Inland
        )
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the archetype for a run from seed arithmetic alone, so the pick
/// never touches the generation random stream.
#[must_use]
pub fn pick_archetype(seed: i64, setting: Option<GeographicSetting>) -> Archetype {
    let roll = seed.unsigned_abs();
    match setting {
        None => Archetype::ALL[(roll % 11) as usize],
        Some(GeographicSetting::Coastal) => CARDINAL_COASTS[(roll % 4) as usize],
        Some(GeographicSetting::BayHarbor) => Archetype::BayHarbor,
        Some(GeographicSetting::RiverValley) => Archetype::RiverValley,
        Some(GeographicSetting::Lakefront) => Archetype::Lakefront,
        Some(GeographicSetting::Inland) => Archetype::Inland,
        Some(GeographicSetting::Island) => Archetype::Island,
        Some(GeographicSetting::Peninsula) => Archetype::Peninsula,
        Some(GeographicSetting::Delta) => Archetype::Delta,
    }
}
