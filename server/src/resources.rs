use bevy_ecs::prelude::*;
use bevy_math::Vec3;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WAVES;
use common::{ArenaGenerator, ArenaLayout, MapConfig, TileIndex};

// ============================================================================
// Arena Resources
// ============================================================================

// Generator plus the presets it can be asked to build, selected by index
#[derive(Resource, Debug)]
pub struct ArenaPresets {
    pub generator: ArenaGenerator,
    pub presets: Vec<MapConfig>,
    pub selected: usize,
}

impl ArenaPresets {
    #[must_use]
    pub const fn new(generator: ArenaGenerator, presets: Vec<MapConfig>, selected: usize) -> Self {
        Self {
            generator,
            presets,
            selected,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MapConfig> {
        self.presets.get(index)
    }
}

// The arena currently instantiated in the world
#[derive(Resource, Debug)]
pub struct ActiveArena {
    pub preset: usize,
    pub layout: ArenaLayout,
    pub tiles: TileIndex<Entity>,
}

// ============================================================================
// Spawner Resources
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Wave {
    pub enemy_count: u32,
    pub time_between_spawns: f32,
    // Preset to switch the arena to when this wave starts
    #[cfg_attr(feature = "json", serde(default))]
    pub preset: Option<usize>,
}

#[derive(Resource, Debug, Clone)]
pub struct WaveSchedule(pub Vec<Wave>);

impl Default for WaveSchedule {
    fn default() -> Self {
        Self(
            DEFAULT_WAVES
                .iter()
                .map(|&(enemy_count, time_between_spawns)| Wave {
                    enemy_count,
                    time_between_spawns,
                    preset: None,
                })
                .collect(),
        )
    }
}

// Progress through the wave schedule
#[derive(Resource, Debug, Default)]
pub struct Spawner {
    pub wave_number: usize, // 0 until the first wave starts
    pub remaining_to_spawn: u32,
    pub remaining_alive: u32,
    pub time_between_spawns: f32,
    pub next_spawn_time: f32,
    pub disabled: bool,
}

// Whether the player has stayed put since the previous check
#[derive(Resource, Debug, Default)]
pub struct CampingState {
    pub next_check_time: f32,
    pub last_position: Vec3,
    pub is_camping: bool,
}
