//! Generation configuration
//!
//! Everything a caller can choose about a terrain run:
//! - the seed and the size of the square world
//! - an optional geographic setting that narrows the archetype pick
//! - river tuning and preview rendering options
//!
//! All structures deserialize from TOML so runs can be reproduced from a file.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Coarse geography requested by the caller.
///
/// `Coastal` is resolved to one of the four cardinal coasts from the seed;
/// every other setting maps to exactly one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicSetting {
    Coastal,
    BayHarbor,
    RiverValley,
    Lakefront,
    Inland,
    Island,
    Peninsula,
    Delta,
}

impl GeographicSetting {
    pub const ALL: [GeographicSetting; 8] = [
        GeographicSetting::Coastal,
        GeographicSetting::BayHarbor,
        GeographicSetting::RiverValley,
        GeographicSetting::Lakefront,
        GeographicSetting::Inland,
        GeographicSetting::Island,
        GeographicSetting::Peninsula,
        GeographicSetting::Delta,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GeographicSetting::Coastal => "coastal",
            GeographicSetting::BayHarbor => "bay_harbor",
            GeographicSetting::RiverValley => "river_valley",
            GeographicSetting::Lakefront => "lakefront",
            GeographicSetting::Inland => "inland",
            GeographicSetting::Island => "island",
            GeographicSetting::Peninsula => "peninsula",
            GeographicSetting::Delta => "delta",
        }
    }
}

impl fmt::Display for GeographicSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeographicSetting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|setting| setting.as_str() == wanted)
            .ok_or_else(|| Error::UnknownSetting(s.to_string()))
    }
}

/// River tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverSettings {
    /// Threshold for the peninsula river roll (`0.0` = never, `1.0` = always).
    /// The roll is drawn regardless of this value.
    #[serde(default = "default_peninsula_river_chance")]
    pub peninsula_river_chance: f64,
}

fn default_peninsula_river_chance() -> f64 {
    0.2
}

impl Default for RiverSettings {
    fn default() -> Self {
        Self {
            peninsula_river_chance: 0.2,
        }
    }
}

/// Preview rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Side of the square preview image in pixels
    #[serde(default = "default_image_size")]
    pub image_size: u32,
}

fn default_image_size() -> u32 {
    1024
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { image_size: 1024 }
    }
}

/// Parameters of one terrain run
///
/// The triple `(seed, world_size, setting)` fully determines the generated
/// geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Any integer; the sign is ignored
    pub seed: i64,

    /// Side of the square world in world units (default 768)
    #[serde(default = "default_world_size")]
    pub world_size: f64,

    /// Requested geography; absent means any of the eleven archetypes
    #[serde(default)]
    pub setting: Option<GeographicSetting>,

    #[serde(default)]
    pub rivers: RiverSettings,

    #[serde(default)]
    pub render: RenderSettings,
}

fn default_world_size() -> f64 {
    768.0
}

impl GenerationParams {
    #[must_use]
    pub fn new(world_size: f64, seed: i64, setting: Option<GeographicSetting>) -> Self {
        Self {
            seed,
            world_size,
            setting,
            ..Self::default()
        }
    }

    /// Loads parameters from a TOML file
    ///
    /// ```toml
    /// seed = 42
    /// world_size = 768.0
    /// setting = "bay_harbor"
    ///
    /// [render]
    /// image_size = 512
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects values the generator treats as programming errors.
    pub fn validate(&self) -> Result<()> {
        if self.world_size.is_finite() && self.world_size > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidWorldSize(self.world_size))
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            world_size: 768.0,
            setting: None,
            rivers: RiverSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_parse_from_snake_case() {
        for setting in GeographicSetting::ALL {
            assert_eq!(
                setting.as_str().parse::<GeographicSetting>().unwrap(),
                setting
            );
        }
        assert_eq!(
            "Bay-Harbor".parse::<GeographicSetting>().unwrap(),
            GeographicSetting::BayHarbor
        );
        assert!(matches!(
            "volcano".parse::<GeographicSetting>(),
            Err(Error::UnknownSetting(_))
        ));
    }

    #[test]
    fn toml_defaults_fill_missing_fields() {
        let params: GenerationParams = toml::from_str("seed = 9").unwrap();
        assert_eq!(params.seed, 9);
        assert_eq!(params.world_size, 768.0);
        assert_eq!(params.setting, None);
        assert_eq!(params.rivers, RiverSettings::default());
        assert_eq!(params.render.image_size, 1024);
    }

    #[test]
    fn toml_full_document() {
        let params: GenerationParams = toml::from_str(
            r#"
            seed = -17
            world_size = 500.0
            setting = "river_valley"

            [rivers]
            peninsula_river_chance = 1.0

            [render]
            image_size = 256
            "#,
        )
        .unwrap();
        assert_eq!(params.seed, -17);
        assert_eq!(params.setting, Some(GeographicSetting::RiverValley));
        assert_eq!(params.rivers.peninsula_river_chance, 1.0);
        assert_eq!(params.render.image_size, 256);
    }

    #[test]
    fn validate_rejects_bad_world_size() {
        assert!(GenerationParams::new(768.0, 1, None).validate().is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GenerationParams::new(bad, 1, None).validate(),
                Err(Error::InvalidWorldSize(_))
            ));
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let path = "/nonexistent/terrain.toml";
        let err = GenerationParams::from_toml_file(path).unwrap_err();
        assert!(err.to_string().contains(path));
    }
}
