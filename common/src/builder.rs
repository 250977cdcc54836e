//! Collaborator interface between the generator and whatever instantiates arenas.
//!
//! The generator never touches engine objects. It hands an [`ArenaLayout`] to an
//! [`ArenaBuilder`], which creates one object per descriptor and returns a handle for
//! each tile. The handles are kept in a [`TileIndex`] so spawners can ask for tiles
//! after generation is done.

use bevy_math::Vec3;
use std::collections::HashMap;

use crate::{
    grid::position_to_coord,
    protocol::{ArenaLayout, Coord, FloorRegion, MaskRegion, ObstacleSpec, TileSpec},
    random::CoordQueue,
};

pub trait ArenaBuilder {
    type Handle: Clone;

    // Discard everything the previous generation created.
    fn clear_previous(&mut self);

    fn spawn_tile(&mut self, tile: &TileSpec) -> Self::Handle;

    fn spawn_obstacle(&mut self, obstacle: &ObstacleSpec);

    fn spawn_mask(&mut self, mask: &MaskRegion);

    fn set_floor(&mut self, floor: &FloorRegion);
}

// Instantiate a layout through `builder`, replacing the previous generation.
pub fn realize<B: ArenaBuilder>(layout: &ArenaLayout, builder: &mut B) -> TileIndex<B::Handle> {
    builder.clear_previous();

    let tiles = layout
        .tiles
        .iter()
        .map(|tile| (tile.coord, builder.spawn_tile(tile)))
        .collect();

    for obstacle in &layout.obstacles {
        builder.spawn_obstacle(obstacle);
    }
    for mask in &layout.masks {
        builder.spawn_mask(mask);
    }
    builder.set_floor(&layout.floor);

    TileIndex {
        map_size: layout.map_size,
        tile_size: layout.tile_size,
        tiles,
        open_tiles: CoordQueue::from_order(layout.open_tiles.clone()),
    }
}

// ============================================================================
// Tile Lookup
// ============================================================================

/// Handles of a realized arena's tiles, keyed by grid coordinate.
#[derive(Debug, Clone)]
pub struct TileIndex<H> {
    map_size: Coord,
    tile_size: f32,
    tiles: HashMap<Coord, H>,
    open_tiles: CoordQueue,
}

impl<H> TileIndex<H> {
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Option<&H> {
        self.tiles.get(&coord)
    }

    // Tile nearest a world position; positions off the grid snap to the closest edge tile.
    #[must_use]
    pub fn tile_from_position(&self, position: Vec3) -> Option<(Coord, &H)> {
        let coord = position_to_coord(position, self.map_size, self.tile_size);
        self.tiles.get(&coord).map(|handle| (coord, handle))
    }

    // Next open tile in the arena's shuffled open-tile cycle.
    pub fn random_open_tile(&mut self) -> Option<(Coord, &H)> {
        let coord = self.open_tiles.draw()?;
        self.tiles.get(&coord).map(|handle| (coord, handle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn open_tile_count(&self) -> usize {
        self.open_tiles.len()
    }
}
