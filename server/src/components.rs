use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::{Timer, TimerMode};

use common::protocol::{Coord, MaskSide, Rgba};

use crate::constants::SPAWN_DELAY;

// ============================================================================
// Arena Components
// ============================================================================

// Where an arena object sits and how large it is
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ArenaTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

// Grid coordinate of a tile or obstacle
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoord(pub Coord);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ObstacleColour(pub Rgba);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask(pub MaskSide);

// Physical floor spanning the generated grid
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FloorCollider(pub Vec3);

// ============================================================================
// Actor Components
// ============================================================================

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub Vec3);

// A tile marked for an enemy spawn; the enemy appears when the timer finishes
#[derive(Component, Debug)]
pub struct PendingSpawn {
    pub tile: Coord,
    pub position: Vec3,
    pub timer: Timer,
}

impl PendingSpawn {
    #[must_use]
    pub fn new(tile: Coord, position: Vec3) -> Self {
        Self {
            tile,
            position,
            timer: Timer::from_seconds(SPAWN_DELAY, TimerMode::Once),
        }
    }
}
