pub mod players;
pub mod spawner;

pub use players::{camping_check_system, player_killed_system, player_reset_system, player_spawn_system};
pub use spawner::{enemy_killed_system, enemy_spawn_system, pending_spawn_system, spawner_start_system};
