#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use thiserror::Error;

use crate::{
    constants::*,
    protocol::{Coord, Rgba},
};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("map size {0} must be at least 1x1")]
    InvalidMapSize(Coord),
    #[error("obstacle percent {0} must be within [0, 1]")]
    InvalidDensity(f32),
    #[error("outline percent {0} must be within [0, 1]")]
    InvalidOutline(f32),
    #[error("tile size {0} must be positive")]
    InvalidTileSize(f32),
    #[error("obstacle height range {min}..{max} must be non-negative and ordered")]
    InvalidHeightRange { min: f32, max: f32 },
    #[error("map size {map_size} exceeds the outer bounding size {max_map_size}")]
    MapExceedsBounds { map_size: Coord, max_map_size: Coord },
}

// ============================================================================
// Map Presets
// ============================================================================

/// One named arena preset. Presets are immutable for the duration of a generation pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct MapConfig {
    pub name: String,
    pub map_size: Coord,
    pub obstacle_percent: f32,
    pub seed: u64,
    pub min_obstacle_height: f32,
    pub max_obstacle_height: f32,
    pub foreground_colour: Rgba,
    pub background_colour: Rgba,
    pub random_colours: bool,
    pub gradient_pattern: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            map_size: Coord::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT),
            obstacle_percent: DEFAULT_OBSTACLE_PERCENT,
            seed: DEFAULT_MAP_SEED,
            min_obstacle_height: DEFAULT_OBSTACLE_HEIGHT,
            max_obstacle_height: DEFAULT_OBSTACLE_HEIGHT,
            foreground_colour: Rgba::BLACK,
            background_colour: Rgba::BLACK,
            random_colours: false,
            gradient_pattern: true,
        }
    }
}

impl MapConfig {
    // Tile that always stays open and roots the reachability check
    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new(self.map_size.x / 2, self.map_size.y / 2)
    }

    // Number of placement attempts for this preset. Single precision, so decimal densities
    // like 0.7 land on the whole count they name.
    #[must_use]
    pub fn target_obstacle_count(&self) -> usize {
        (self.map_size.area() as f32 * self.obstacle_percent).floor() as usize
    }

    pub fn validate(&self, max_map_size: Coord) -> Result<(), ConfigError> {
        if self.map_size.x < 1 || self.map_size.y < 1 {
            return Err(ConfigError::InvalidMapSize(self.map_size));
        }
        if !(0.0..=1.0).contains(&self.obstacle_percent) {
            return Err(ConfigError::InvalidDensity(self.obstacle_percent));
        }
        let (min, max) = (self.min_obstacle_height, self.max_obstacle_height);
        if !(min >= 0.0 && max >= min) {
            return Err(ConfigError::InvalidHeightRange { min, max });
        }
        if self.map_size.x > max_map_size.x || self.map_size.y > max_map_size.y {
            return Err(ConfigError::MapExceedsBounds {
                map_size: self.map_size,
                max_map_size,
            });
        }
        Ok(())
    }
}

// Built-in presets, selected by index
#[must_use]
pub fn default_presets() -> Vec<MapConfig> {
    vec![
        MapConfig {
            name: "Courtyard".to_string(),
            map_size: Coord::new(7, 7),
            obstacle_percent: 0.15,
            seed: 10,
            min_obstacle_height: 0.8,
            max_obstacle_height: 1.5,
            foreground_colour: Rgba::new(0.16, 0.18, 0.24, 1.0),
            background_colour: Rgba::new(0.62, 0.66, 0.74, 1.0),
            ..MapConfig::default()
        },
        MapConfig {
            name: "Maze".to_string(),
            map_size: Coord::new(15, 11),
            obstacle_percent: 0.4,
            seed: 27,
            min_obstacle_height: 1.0,
            max_obstacle_height: 3.0,
            foreground_colour: Rgba::new(0.10, 0.30, 0.12, 1.0),
            background_colour: Rgba::new(0.55, 0.80, 0.45, 1.0),
            ..MapConfig::default()
        },
        MapConfig {
            name: "Scatter".to_string(),
            map_size: Coord::new(21, 17),
            obstacle_percent: 0.25,
            seed: 3,
            min_obstacle_height: 0.5,
            max_obstacle_height: 4.0,
            random_colours: true,
            gradient_pattern: false,
            ..MapConfig::default()
        },
        MapConfig {
            name: "Fortress".to_string(),
            map_size: Coord::new(29, 29),
            obstacle_percent: 0.3,
            seed: 91,
            min_obstacle_height: 2.0,
            max_obstacle_height: 5.0,
            foreground_colour: Rgba::new(0.35, 0.08, 0.05, 1.0),
            background_colour: Rgba::new(0.92, 0.72, 0.40, 1.0),
            ..MapConfig::default()
        },
    ]
}

// ============================================================================
// Generator Settings
// ============================================================================

/// Settings shared by every preset a generator produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct GeneratorSettings {
    pub max_map_size: Coord,
    pub tile_size: f32,
    pub outline_percent: f32,
    pub palette_seed: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_map_size: Coord::new(DEFAULT_MAX_MAP_WIDTH, DEFAULT_MAX_MAP_HEIGHT),
            tile_size: DEFAULT_TILE_SIZE,
            outline_percent: DEFAULT_OUTLINE_PERCENT,
            palette_seed: DEFAULT_PALETTE_SEED,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_map_size.x < 1 || self.max_map_size.y < 1 {
            return Err(ConfigError::InvalidMapSize(self.max_map_size));
        }
        if !(self.tile_size > 0.0 && self.tile_size.is_finite()) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if !(0.0..=1.0).contains(&self.outline_percent) {
            return Err(ConfigError::InvalidOutline(self.outline_percent));
        }
        Ok(())
    }

    // Edge length of a tile or obstacle footprint after the outline inset
    #[must_use]
    pub fn inset_tile_size(&self) -> f32 {
        (1.0 - self.outline_percent) * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_presets_are_valid() {
        let settings = GeneratorSettings::default();
        assert!(settings.validate().is_ok());
        for preset in default_presets() {
            assert_eq!(preset.validate(settings.max_map_size), Ok(()), "{}", preset.name);
        }
    }

    #[test]
    fn center_uses_integer_division() {
        let config = MapConfig {
            map_size: Coord::new(5, 4),
            ..MapConfig::default()
        };
        assert_eq!(config.center(), Coord::new(2, 2));
    }

    #[test]
    fn target_count_truncates() {
        let config = MapConfig {
            map_size: Coord::new(5, 5),
            obstacle_percent: 0.2,
            ..MapConfig::default()
        };
        assert_eq!(config.target_obstacle_count(), 5);

        let config = MapConfig {
            map_size: Coord::new(3, 3),
            obstacle_percent: 0.12,
            ..MapConfig::default()
        };
        assert_eq!(config.target_obstacle_count(), 1);
    }

    #[test]
    fn target_count_keeps_decimal_densities_whole() {
        let expected = [(0.1, 10), (0.3, 30), (0.6, 60), (0.7, 70), (0.9, 90), (1.0, 100)];
        for (density, count) in expected {
            let config = MapConfig {
                map_size: Coord::new(10, 10),
                obstacle_percent: density,
                ..MapConfig::default()
            };
            assert_eq!(config.target_obstacle_count(), count, "density {density}");
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        let bounds = Coord::new(30, 30);
        let config = MapConfig {
            map_size: Coord::new(0, 4),
            ..MapConfig::default()
        };
        assert_eq!(config.validate(bounds), Err(ConfigError::InvalidMapSize(Coord::new(0, 4))));

        let config = MapConfig {
            map_size: Coord::new(-3, 4),
            ..MapConfig::default()
        };
        assert!(matches!(config.validate(bounds), Err(ConfigError::InvalidMapSize(_))));
    }

    #[test]
    fn rejects_density_outside_unit_range() {
        let bounds = Coord::new(30, 30);
        for density in [-0.1, 1.5, f32::NAN] {
            let config = MapConfig {
                obstacle_percent: density,
                ..MapConfig::default()
            };
            assert!(matches!(config.validate(bounds), Err(ConfigError::InvalidDensity(_))));
        }
    }

    #[test]
    fn rejects_map_larger_than_bounds() {
        let config = MapConfig {
            map_size: Coord::new(12, 8),
            ..MapConfig::default()
        };
        assert_eq!(
            config.validate(Coord::new(11, 20)),
            Err(ConfigError::MapExceedsBounds {
                map_size: Coord::new(12, 8),
                max_map_size: Coord::new(11, 20),
            })
        );
    }

    #[test]
    fn rejects_inverted_height_range() {
        let config = MapConfig {
            min_obstacle_height: 3.0,
            max_obstacle_height: 1.0,
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(Coord::new(30, 30)),
            Err(ConfigError::InvalidHeightRange { .. })
        ));
    }

    #[test]
    fn rejects_bad_settings() {
        let settings = GeneratorSettings {
            tile_size: 0.0,
            ..GeneratorSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidTileSize(0.0)));

        let settings = GeneratorSettings {
            outline_percent: 1.2,
            ..GeneratorSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidOutline(1.2)));
    }
}
