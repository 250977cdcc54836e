// ============================================================================
// Server Constants
// ============================================================================

pub const SERVER_LOOP_FREQUENCY: u64 = 30; // ticks per second
pub const MAX_TICK_RATE: u64 = 1000; // ticks per second
pub const LOG_FILTER: &str = "info";

// ============================================================================
// Spawner Settings
// ============================================================================

pub const CAMPING_CHECK_INTERVAL: f32 = 2.0; // seconds between camping checks
pub const CAMPING_THRESHOLD_DISTANCE: f32 = 1.5; // distance the player must move to stop camping
pub const SPAWN_DELAY: f32 = 1.0; // seconds a spawn tile is marked before the enemy appears
pub const ENEMY_SPAWN_HEIGHT: f32 = 1.0; // meters above the spawn tile
pub const PLAYER_RESET_HEIGHT: f32 = 3.0; // meters above the center tile on a new wave

// Default waves: (enemy count, seconds between spawns)
pub const DEFAULT_WAVES: [(u32, f32); 4] = [(5, 1.0), (10, 0.8), (15, 0.6), (25, 0.4)];
