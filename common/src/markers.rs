use bevy_ecs::prelude::*;

// Marker components to disambiguate entity archetypes in a realized arena.

// Everything one generation pass spawned; despawned before the next pass.
#[derive(Component, Debug, Default)]
pub struct ArenaMarker;

#[derive(Component, Debug, Default)]
pub struct TileMarker;

#[derive(Component, Debug, Default)]
pub struct ObstacleMarker;

#[derive(Component, Debug, Default)]
pub struct MaskMarker;

#[derive(Component, Debug, Default)]
pub struct FloorMarker;

#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct EnemyMarker;
