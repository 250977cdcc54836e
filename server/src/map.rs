use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use tracing::{debug, error, info, warn};

use crate::{
    components::{ArenaTransform, FloorCollider, GridCoord, Mask, ObstacleColour},
    events::{ArenaRegenerated, RegenerateArena},
    resources::{ActiveArena, ArenaPresets},
};
use common::{
    ArenaBuilder, ArenaLayout, TileIndex,
    markers::{ArenaMarker, FloorMarker, MaskMarker, ObstacleMarker, TileMarker},
    protocol::{FloorRegion, MaskRegion, ObstacleSpec, TileSpec},
    realize,
};

// ============================================================================
// ECS Arena Builder
// ============================================================================

// Spawns arena entities through `Commands`. Everything spawned carries `ArenaMarker`, which is
// how the next pass finds what to despawn.
pub struct EcsArenaBuilder<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    previous: Vec<Entity>,
}

impl<'a, 'w, 's> EcsArenaBuilder<'a, 'w, 's> {
    pub const fn new(commands: &'a mut Commands<'w, 's>, previous: Vec<Entity>) -> Self {
        Self { commands, previous }
    }
}

impl ArenaBuilder for EcsArenaBuilder<'_, '_, '_> {
    type Handle = Entity;

    fn clear_previous(&mut self) {
        for entity in self.previous.drain(..) {
            self.commands.entity(entity).despawn();
        }
    }

    fn spawn_tile(&mut self, tile: &TileSpec) -> Entity {
        self.commands
            .spawn((
                ArenaMarker,
                TileMarker,
                GridCoord(tile.coord),
                ArenaTransform {
                    position: tile.position.into(),
                    scale: tile.scale.into(),
                },
            ))
            .id()
    }

    fn spawn_obstacle(&mut self, obstacle: &ObstacleSpec) {
        self.commands.spawn((
            ArenaMarker,
            ObstacleMarker,
            GridCoord(obstacle.coord),
            ObstacleColour(obstacle.colour),
            ArenaTransform {
                position: obstacle.position.into(),
                scale: obstacle.scale.into(),
            },
        ));
    }

    fn spawn_mask(&mut self, mask: &MaskRegion) {
        self.commands.spawn((
            ArenaMarker,
            MaskMarker,
            Mask(mask.side),
            ArenaTransform {
                position: mask.position.into(),
                scale: mask.scale.into(),
            },
        ));
    }

    fn set_floor(&mut self, floor: &FloorRegion) {
        self.commands.spawn((
            ArenaMarker,
            FloorMarker,
            FloorCollider(floor.collider.into()),
            ArenaTransform {
                position: Vec3::ZERO,
                scale: floor.scale.into(),
            },
        ));
    }
}

// ============================================================================
// Regeneration
// ============================================================================

pub fn initial_arena_system(presets: Res<ArenaPresets>, mut requests: MessageWriter<RegenerateArena>) {
    requests.write(RegenerateArena {
        preset: presets.selected,
    });
}

// Run at most one generation pass per frame; the last request wins. A failed pass keeps the
// current arena.
pub fn arena_regenerate_system(
    mut commands: Commands,
    mut requests: MessageReader<RegenerateArena>,
    mut regenerated: MessageWriter<ArenaRegenerated>,
    mut presets: ResMut<ArenaPresets>,
    previous: Query<Entity, With<ArenaMarker>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let Some(config) = presets.get(request.preset) else {
        warn!(
            "preset {} does not exist ({} presets loaded), keeping current arena",
            request.preset,
            presets.presets.len()
        );
        return;
    };

    let layout = match presets.generator.generate(config) {
        Ok(layout) => layout,
        Err(e) => {
            error!("preset {} ({}) rejected: {e}", request.preset, config.name);
            return;
        }
    };

    let mut builder = EcsArenaBuilder::new(&mut commands, previous.iter().collect());
    let tiles = realize(&layout, &mut builder);

    info!(
        "arena {} ready: {} tiles, {} obstacles, {} open",
        layout.name,
        tiles.len(),
        layout.obstacle_count(),
        tiles.open_tile_count()
    );

    presets.selected = request.preset;
    commands.insert_resource(ActiveArena {
        preset: request.preset,
        layout,
        tiles,
    });
    regenerated.write(ArenaRegenerated { preset: request.preset });
}

// ============================================================================
// Tile Queries
// ============================================================================

// World position on top of the tile nearest the origin
#[must_use]
pub fn center_spawn_point(layout: &ArenaLayout, tiles: &TileIndex<Entity>, height: f32) -> Option<Vec3> {
    let (coord, _) = tiles.tile_from_position(Vec3::ZERO)?;
    debug!("center spawn tile {coord}");
    Some(tile_spawn_point(layout, coord, height))
}

#[must_use]
pub fn tile_spawn_point(layout: &ArenaLayout, coord: common::Coord, height: f32) -> Vec3 {
    common::grid::coord_to_position(coord, layout.map_size, layout.tile_size) + Vec3::Y * height
}
