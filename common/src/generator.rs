use bevy_math::Vec3;
use tracing::info;

use crate::{
    config::{ConfigError, GeneratorSettings, MapConfig},
    grid::{all_coords, coord_to_position},
    masks::{border_masks, floor_region},
    obstacles::{Palette, place_obstacles},
    protocol::{ArenaLayout, ObstacleSpec, Scale, TileSpec},
    random::{CoordQueue, OPEN_TILE_SHUFFLE_STREAM, TILE_SHUFFLE_STREAM, shuffled},
    reachability::reachable_count,
};

// ============================================================================
// Arena Generator
// ============================================================================

/// Turns map presets into arena layouts.
///
/// A generator owns only its validated settings; every call to [`ArenaGenerator::generate`]
/// builds its bitmap and draw queue from scratch, so equal presets always yield equal layouts.
#[derive(Debug, Clone)]
pub struct ArenaGenerator {
    settings: GeneratorSettings,
}

impl ArenaGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn generate(&self, config: &MapConfig) -> Result<ArenaLayout, ConfigError> {
        config.validate(self.settings.max_map_size)?;

        let map_size = config.map_size;
        let tile_size = self.settings.tile_size;
        let inset = self.settings.inset_tile_size();
        let center = config.center();

        // Enumerate and shuffle
        let coords = all_coords(map_size);
        let mut draw_queue = CoordQueue::new(&coords, config.seed, TILE_SHUFFLE_STREAM);

        // Place obstacles
        let palette = Palette::for_config(config, self.settings.palette_seed);
        let placement = place_obstacles(config, &mut draw_queue, &palette);
        let obstacle_map = placement.obstacle_map;

        debug_assert!(!obstacle_map.is_obstacle(center), "center tile {center} blocked");
        debug_assert_eq!(
            reachable_count(&obstacle_map, center),
            map_size.area() - placement.accepted.len(),
            "open tiles unreachable from center"
        );

        let tiles = coords
            .iter()
            .map(|&coord| TileSpec {
                coord,
                position: coord_to_position(coord, map_size, tile_size).into(),
                scale: Scale::splat(inset),
            })
            .collect();

        let obstacles: Vec<ObstacleSpec> = placement
            .accepted
            .iter()
            .map(|placed| {
                let ground = coord_to_position(placed.coord, map_size, tile_size);
                ObstacleSpec {
                    coord: placed.coord,
                    position: (ground + Vec3::Y * placed.height / 2.0).into(),
                    scale: Scale::new(inset, placed.height, inset),
                    height: placed.height,
                    colour_percent: placed.colour_percent,
                    colour: placed.colour,
                }
            })
            .collect();

        // Open tiles in their own shuffled order, for spawners
        let open_tiles = shuffled(&obstacle_map.open_coords(), config.seed, OPEN_TILE_SHUFFLE_STREAM);

        let max_map_size = self.settings.max_map_size;
        let layout = ArenaLayout {
            name: config.name.clone(),
            seed: config.seed,
            map_size,
            max_map_size,
            tile_size,
            center,
            target_obstacle_count: placement.target,
            obstacle_map,
            tiles,
            obstacles,
            open_tiles,
            masks: border_masks(map_size, max_map_size, tile_size),
            floor: floor_region(map_size, max_map_size, tile_size),
        };

        info!(
            "generated arena '{}' ({}x{}, seed {}): {} of {} obstacles, {} open tiles",
            layout.name,
            map_size.x,
            map_size.y,
            config.seed,
            layout.obstacles.len(),
            layout.target_obstacle_count,
            layout.open_tiles.len()
        );

        Ok(layout)
    }
}
