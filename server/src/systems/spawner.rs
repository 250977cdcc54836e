use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::Time;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::{
    components::{PendingSpawn, Position},
    constants::ENEMY_SPAWN_HEIGHT,
    events::{EnemyKilled, NewWave, RegenerateArena},
    map::tile_spawn_point,
    resources::{ActiveArena, CampingState, Spawner, WaveSchedule},
};
use common::markers::{EnemyMarker, PlayerMarker};

// Advance to the next wave of the schedule. Empty waves are skipped over.
fn start_next_wave(
    spawner: &mut Spawner,
    schedule: &WaveSchedule,
    now: f32,
    new_waves: &mut MessageWriter<NewWave>,
    regenerate: &mut MessageWriter<RegenerateArena>,
) {
    loop {
        spawner.wave_number += 1;
        let Some(wave) = schedule.0.get(spawner.wave_number - 1) else {
            spawner.remaining_to_spawn = 0;
            spawner.remaining_alive = 0;
            info!("all {} waves cleared", schedule.0.len());
            return;
        };

        spawner.remaining_to_spawn = wave.enemy_count;
        spawner.remaining_alive = wave.enemy_count;
        spawner.time_between_spawns = wave.time_between_spawns;
        spawner.next_spawn_time = now;

        if let Some(preset) = wave.preset {
            regenerate.write(RegenerateArena { preset });
        }
        new_waves.write(NewWave {
            number: spawner.wave_number,
        });

        if wave.enemy_count > 0 {
            return;
        }
    }
}

// ============================================================================
// Wave Systems
// ============================================================================

pub fn spawner_start_system(
    time: Res<Time>,
    schedule: Res<WaveSchedule>,
    mut spawner: ResMut<Spawner>,
    mut new_waves: MessageWriter<NewWave>,
    mut regenerate: MessageWriter<RegenerateArena>,
) {
    start_next_wave(
        &mut spawner,
        &schedule,
        time.elapsed_secs(),
        &mut new_waves,
        &mut regenerate,
    );
}

// Count kills of live enemies; the wave is over once none remain alive
pub fn enemy_killed_system(
    mut commands: Commands,
    time: Res<Time>,
    schedule: Res<WaveSchedule>,
    mut spawner: ResMut<Spawner>,
    mut kills: MessageReader<EnemyKilled>,
    mut new_waves: MessageWriter<NewWave>,
    mut regenerate: MessageWriter<RegenerateArena>,
    enemies: Query<(), With<EnemyMarker>>,
) {
    let killed: HashSet<Entity> = kills
        .read()
        .map(|kill| kill.entity)
        .filter(|&entity| enemies.contains(entity))
        .collect();
    if killed.is_empty() {
        return;
    }

    for entity in &killed {
        commands.entity(*entity).despawn();
    }

    let was_alive = spawner.remaining_alive;
    spawner.remaining_alive = was_alive.saturating_sub(u32::try_from(killed.len()).unwrap_or(u32::MAX));
    debug!("{} enemies killed, {} alive", killed.len(), spawner.remaining_alive);

    if was_alive > 0 && spawner.remaining_alive == 0 && !spawner.disabled {
        start_next_wave(
            &mut spawner,
            &schedule,
            time.elapsed_secs(),
            &mut new_waves,
            &mut regenerate,
        );
    }
}

// ============================================================================
// Enemy Spawn Systems
// ============================================================================

// Mark a tile for the next enemy: the player's own tile while camping, otherwise the next tile
// of the arena's open-tile cycle
pub fn enemy_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    camping: Res<CampingState>,
    mut spawner: ResMut<Spawner>,
    arena: Option<ResMut<ActiveArena>>,
    players: Query<&Position, With<PlayerMarker>>,
) {
    let now = time.elapsed_secs();
    if spawner.disabled || spawner.remaining_to_spawn == 0 || now <= spawner.next_spawn_time {
        return;
    }
    let Some(mut arena) = arena else {
        return;
    };

    let camping_tile = if camping.is_camping {
        players
            .single()
            .ok()
            .and_then(|player| arena.tiles.tile_from_position(player.0).map(|(coord, _)| coord))
    } else {
        None
    };
    let Some(coord) = camping_tile.or_else(|| arena.tiles.random_open_tile().map(|(coord, _)| coord)) else {
        warn!("arena {} has no open tile to spawn on", arena.layout.name);
        return;
    };

    spawner.remaining_to_spawn -= 1;
    spawner.next_spawn_time = now + spawner.time_between_spawns;

    let position = tile_spawn_point(&arena.layout, coord, 0.0);
    commands.spawn(PendingSpawn::new(coord, position));
    debug!("enemy spawn marked on tile {coord}, {} left in wave", spawner.remaining_to_spawn);
}

// Turn marked tiles into enemies once their spawn delay is over
pub fn pending_spawn_system(mut commands: Commands, time: Res<Time>, mut pending: Query<(Entity, &mut PendingSpawn)>) {
    for (entity, mut spawn) in &mut pending {
        spawn.timer.tick(time.delta());
        if spawn.timer.is_finished() {
            commands.entity(entity).despawn();
            commands.spawn((EnemyMarker, Position(spawn.position + Vec3::Y * ENEMY_SPAWN_HEIGHT)));
        }
    }
}
