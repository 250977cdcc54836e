use bevy_app::{App, Startup, Update};
use bevy_ecs::prelude::*;
use bevy_time::TimePlugin;

use crate::{
    events::{ArenaRegenerated, EnemyKilled, NewWave, PlayerKilled, RegenerateArena},
    map::{arena_regenerate_system, initial_arena_system},
    resources::{ArenaPresets, CampingState, Spawner, WaveSchedule},
    systems::*,
};

// ============================================================================
// Headless App
// ============================================================================

pub fn build_app(presets: ArenaPresets, waves: WaveSchedule) -> App {
    let mut app = App::new();

    app.add_plugins(TimePlugin)
        .add_message::<RegenerateArena>()
        .add_message::<ArenaRegenerated>()
        .add_message::<NewWave>()
        .add_message::<EnemyKilled>()
        .add_message::<PlayerKilled>()
        .insert_resource(presets)
        .insert_resource(waves)
        .init_resource::<Spawner>()
        .init_resource::<CampingState>()
        .add_systems(
            Startup,
            (player_spawn_system, initial_arena_system, spawner_start_system).chain(),
        )
        .add_systems(
            Update,
            // Kills may start a wave that switches the arena, so they run before regeneration. The
            // player is reset after the new arena's entities exist, and spawning reads the reset
            // camping state.
            (
                enemy_killed_system,
                player_killed_system,
                arena_regenerate_system,
                player_reset_system,
                camping_check_system,
                enemy_spawn_system,
                pending_spawn_system,
            )
                .chain(),
        );

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{PendingSpawn, Position},
        constants::PLAYER_RESET_HEIGHT,
        resources::{ActiveArena, Wave},
    };
    use bevy_math::Vec3;
    use bevy_time::TimeUpdateStrategy;
    use common::{
        ArenaGenerator, Coord, GeneratorSettings,
        config::default_presets,
        markers::{EnemyMarker, PlayerMarker},
    };
    use std::time::Duration;

    const STEP: Duration = Duration::from_millis(100);

    fn wave(enemy_count: u32, time_between_spawns: f32, preset: Option<usize>) -> Wave {
        Wave {
            enemy_count,
            time_between_spawns,
            preset,
        }
    }

    fn app(selected: usize, waves: Vec<Wave>) -> App {
        let generator = ArenaGenerator::new(GeneratorSettings::default()).expect("valid settings");
        let mut app = build_app(
            ArenaPresets::new(generator, default_presets(), selected),
            WaveSchedule(waves),
        );
        app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
        app
    }

    fn run(app: &mut App, updates: usize) {
        for _ in 0..updates {
            app.update();
        }
    }

    fn player_position(app: &mut App) -> Vec3 {
        app.world_mut()
            .query_filtered::<&Position, With<PlayerMarker>>()
            .single(app.world())
            .expect("one player")
            .0
    }

    fn move_player(app: &mut App, to: Vec3) {
        let mut query = app.world_mut().query_filtered::<&mut Position, With<PlayerMarker>>();
        let mut position = query.single_mut(app.world_mut()).expect("one player");
        position.0 = to;
    }

    fn enemies(app: &mut App) -> Vec<Entity> {
        app.world_mut()
            .query_filtered::<Entity, With<EnemyMarker>>()
            .iter(app.world())
            .collect()
    }

    fn pending_tiles(app: &mut App) -> Vec<Coord> {
        app.world_mut()
            .query::<&PendingSpawn>()
            .iter(app.world())
            .map(|spawn| spawn.tile)
            .collect()
    }

    fn center_tile(app: &App) -> Coord {
        let arena = app.world().resource::<ActiveArena>();
        arena.tiles.tile_from_position(Vec3::ZERO).expect("center tile").0
    }

    #[test]
    fn startup_builds_arena_and_places_player() {
        let mut app = app(1, vec![wave(3, 1.0, None)]);
        app.update();

        let arena = app.world().resource::<ActiveArena>();
        assert_eq!(arena.preset, 1);
        assert_eq!(arena.layout.map_size, Coord::new(15, 11));
        assert_eq!(app.world().resource::<Spawner>().wave_number, 1);

        let position = player_position(&mut app);
        assert!((position.y - PLAYER_RESET_HEIGHT).abs() < 1e-5);
        assert_eq!(center_tile(&app), app.world().resource::<ActiveArena>().layout.center);
    }

    #[test]
    fn first_wave_can_switch_preset() {
        let mut app = app(0, vec![wave(1, 1.0, Some(3))]);
        app.update();
        assert_eq!(app.world().resource::<ActiveArena>().preset, 3);
    }

    #[test]
    fn enemies_appear_after_spawn_delay_on_open_tiles() {
        let mut app = app(2, vec![wave(4, 0.3, None)]);
        run(&mut app, 3);
        assert!(enemies(&mut app).is_empty());
        assert!(!pending_tiles(&mut app).is_empty());

        run(&mut app, 30);
        let spawner = app.world().resource::<Spawner>();
        assert_eq!(spawner.remaining_to_spawn, 0);
        assert_eq!(spawner.remaining_alive, 4);
        assert_eq!(enemies(&mut app).len(), 4);
        assert!(pending_tiles(&mut app).is_empty());

        let positions: Vec<Vec3> = app
            .world_mut()
            .query_filtered::<&Position, With<EnemyMarker>>()
            .iter(app.world())
            .map(|p| p.0)
            .collect();
        let arena = app.world().resource::<ActiveArena>();
        for position in positions {
            let (coord, _) = arena.tiles.tile_from_position(position).expect("on a tile");
            assert!(!arena.layout.is_obstacle(coord));
        }
    }

    #[test]
    fn killing_the_wave_starts_the_next_one() {
        let mut app = app(0, vec![wave(1, 0.1, None), wave(2, 0.1, Some(2))]);
        run(&mut app, 20);
        let killed = enemies(&mut app);
        assert_eq!(killed.len(), 1);

        // Move the player off the center so the reset is observable
        move_player(&mut app, Vec3::new(2.0, 0.0, 2.0));

        app.world_mut().write_message(EnemyKilled { entity: killed[0] });
        app.update();

        assert!(enemies(&mut app).is_empty());
        let spawner = app.world().resource::<Spawner>();
        assert_eq!(spawner.wave_number, 2);
        assert_eq!(spawner.remaining_alive, 2);
        assert_eq!(app.world().resource::<ActiveArena>().preset, 2);

        let position = player_position(&mut app);
        assert!((position.y - PLAYER_RESET_HEIGHT).abs() < 1e-5);
        assert!(position.x.abs() < 1.0 && position.z.abs() < 1.0);
    }

    #[test]
    fn duplicate_and_unknown_kills_are_ignored() {
        let mut app = app(0, vec![wave(2, 0.1, None)]);
        run(&mut app, 20);
        let alive = enemies(&mut app);
        assert_eq!(alive.len(), 2);

        app.world_mut().write_message(EnemyKilled { entity: alive[0] });
        app.world_mut().write_message(EnemyKilled { entity: alive[0] });
        let player = app
            .world_mut()
            .query_filtered::<Entity, With<PlayerMarker>>()
            .single(app.world())
            .expect("one player");
        app.world_mut().write_message(EnemyKilled { entity: player });
        app.update();

        let spawner = app.world().resource::<Spawner>();
        assert_eq!(spawner.wave_number, 1);
        assert_eq!(spawner.remaining_alive, 1);
    }

    #[test]
    fn player_death_stops_spawning() {
        let mut app = app(0, vec![wave(10, 0.2, None)]);
        run(&mut app, 2);
        app.world_mut().write_message(PlayerKilled);
        app.update();
        let remaining = app.world().resource::<Spawner>().remaining_to_spawn;

        run(&mut app, 30);
        let spawner = app.world().resource::<Spawner>();
        assert!(spawner.disabled);
        assert_eq!(spawner.remaining_to_spawn, remaining);
    }

    #[test]
    fn camping_player_gets_spawns_on_their_tile() {
        let mut app = app(3, vec![wave(100, 0.2, None)]);
        run(&mut app, 25);
        assert!(app.world().resource::<CampingState>().is_camping);

        // Drop everything spawned so far, then look only at fresh marks
        let spawned: Vec<Entity> = app
            .world_mut()
            .query_filtered::<Entity, Or<(With<PendingSpawn>, With<EnemyMarker>)>>()
            .iter(app.world())
            .collect();
        for entity in spawned {
            app.world_mut().despawn(entity);
        }
        run(&mut app, 5);

        let center = center_tile(&app);
        let tiles = pending_tiles(&mut app);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|&tile| tile == center));
    }

    #[test]
    fn moving_player_is_not_camping() {
        let mut app = app(3, vec![wave(100, 0.2, None)]);
        run(&mut app, 25);
        assert!(app.world().resource::<CampingState>().is_camping);

        move_player(&mut app, Vec3::new(5.0, 3.0, 5.0));
        run(&mut app, 21);
        assert!(!app.world().resource::<CampingState>().is_camping);
    }
}
