#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use bevy_math::Vec3;

use crate::protocol::Coord;

// ============================================================================
// Coordinate Enumeration
// ============================================================================

// Every tile coordinate of a map, x-major then y-minor.
#[must_use]
pub fn all_coords(size: Coord) -> Vec<Coord> {
    let mut coords = Vec::with_capacity(size.area());
    for x in 0..size.x {
        for y in 0..size.y {
            coords.push(Coord::new(x, y));
        }
    }
    coords
}

// ============================================================================
// Grid <-> World Transforms
// ============================================================================

// Center of a tile in world space. The grid is centered on the origin.
#[must_use]
pub fn coord_to_position(coord: Coord, size: Coord, tile_size: f32) -> Vec3 {
    let tile_x = coord.x as f32 + 0.5 - size.x as f32 / 2.0;
    let tile_z = coord.y as f32 + 0.5 - size.y as f32 / 2.0;
    Vec3::new(tile_x * tile_size, 0.0, tile_z * tile_size)
}

// Nearest tile to a world position, clamped into the grid. Height is ignored.
#[must_use]
pub fn position_to_coord(position: Vec3, size: Coord, tile_size: f32) -> Coord {
    let x = (position.x / tile_size + (size.x - 1) as f32 / 2.0).round() as i32;
    let y = (position.z / tile_size + (size.y - 1) as f32 / 2.0).round() as i32;
    Coord::new(x.clamp(0, size.x - 1), y.clamp(0, size.y - 1))
}

// ============================================================================
// Obstacle Bitmap
// ============================================================================

// Flat width x height grid, `true` where an obstacle occupies the tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct ObstacleMap {
    size: Coord,
    cells: Vec<bool>,
}

impl ObstacleMap {
    #[must_use]
    pub fn new(size: Coord) -> Self {
        Self {
            size,
            cells: vec![false; size.area()],
        }
    }

    #[must_use]
    pub const fn size(&self) -> Coord {
        self.size
    }

    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.size.x && coord.y >= 0 && coord.y < self.size.y
    }

    #[inline]
    const fn index(&self, coord: Coord) -> usize {
        (coord.x as usize) * (self.size.y as usize) + coord.y as usize
    }

    // Out-of-bounds coordinates are never obstacles
    #[must_use]
    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.contains(coord) && self.cells[self.index(coord)]
    }

    pub fn set(&mut self, coord: Coord, obstacle: bool) {
        debug_assert!(self.contains(coord), "coordinate {coord} outside {}", self.size);
        let index = self.index(coord);
        self.cells[index] = obstacle;
    }

    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    // Open coordinates in enumeration order
    #[must_use]
    pub fn open_coords(&self) -> Vec<Coord> {
        all_coords(self.size)
            .into_iter()
            .filter(|&coord| !self.is_obstacle(coord))
            .collect()
    }
}
