use bevy_ecs::prelude::*;

// ============================================================================
// Bevy Messages
// ============================================================================

/// Request a fresh generation pass for a preset. Only the last request of a frame runs.
#[derive(Message, Debug, Clone, Copy)]
pub struct RegenerateArena {
    pub preset: usize,
}

/// Fired after a generation pass has replaced the arena
#[derive(Message, Debug, Clone, Copy)]
pub struct ArenaRegenerated {
    pub preset: usize,
}

/// Fired when a new wave starts (numbers start at 1)
#[derive(Message, Debug, Clone, Copy)]
pub struct NewWave {
    pub number: usize,
}

/// An enemy was killed by whatever handles combat
#[derive(Message, Debug, Clone, Copy)]
pub struct EnemyKilled {
    pub entity: Entity,
}

/// The player died; the spawner stops
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerKilled;
