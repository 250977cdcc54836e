use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::{debug, info};

use crate::{
    components::Position,
    constants::{CAMPING_CHECK_INTERVAL, CAMPING_THRESHOLD_DISTANCE, PLAYER_RESET_HEIGHT},
    events::{NewWave, PlayerKilled},
    map::center_spawn_point,
    resources::{ActiveArena, CampingState, Spawner},
};
use common::markers::PlayerMarker;

pub fn player_spawn_system(mut commands: Commands) {
    commands.spawn((PlayerMarker, Position::default()));
}

// ============================================================================
// Player Reset System
// ============================================================================

// Put the player back on the tile nearest the origin whenever a wave starts
pub fn player_reset_system(
    time: Res<Time>,
    mut new_waves: MessageReader<NewWave>,
    arena: Option<Res<ActiveArena>>,
    mut camping: ResMut<CampingState>,
    mut players: Query<&mut Position, With<PlayerMarker>>,
) {
    let Some(wave) = new_waves.read().last().copied() else {
        return;
    };
    let Some(arena) = arena else {
        return;
    };
    let Some(spawn) = center_spawn_point(&arena.layout, &arena.tiles, PLAYER_RESET_HEIGHT) else {
        return;
    };

    for mut position in &mut players {
        position.0 = spawn;
    }

    camping.last_position = spawn;
    camping.next_check_time = time.elapsed_secs() + CAMPING_CHECK_INTERVAL;
    camping.is_camping = false;
    info!("wave {} starting, player reset to {spawn}", wave.number);
}

// ============================================================================
// Camping Check System
// ============================================================================

pub fn camping_check_system(
    time: Res<Time>,
    mut camping: ResMut<CampingState>,
    players: Query<&Position, With<PlayerMarker>>,
) {
    let now = time.elapsed_secs();
    if now < camping.next_check_time {
        return;
    }
    let Ok(position) = players.single() else {
        return;
    };

    let was_camping = camping.is_camping;
    camping.next_check_time = now + CAMPING_CHECK_INTERVAL;
    camping.is_camping = position.0.distance(camping.last_position) < CAMPING_THRESHOLD_DISTANCE;
    camping.last_position = position.0;

    if camping.is_camping != was_camping {
        debug!("player camping: {}", camping.is_camping);
    }
}

pub fn player_killed_system(mut kills: MessageReader<PlayerKilled>, mut spawner: ResMut<Spawner>) {
    if kills.read().count() > 0 && !spawner.disabled {
        spawner.disabled = true;
        info!("player killed in wave {}, spawner stopped", spawner.wave_number);
    }
}
