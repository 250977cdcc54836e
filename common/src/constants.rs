// ============================================================================
// Generator Defaults
// ============================================================================

pub const DEFAULT_TILE_SIZE: f32 = 1.0; // meters per grid cell
pub const DEFAULT_OUTLINE_PERCENT: f32 = 0.05; // gap between neighbouring tiles, fraction of a tile
pub const DEFAULT_MAX_MAP_WIDTH: i32 = 30; // outer bounding size (X)
pub const DEFAULT_MAX_MAP_HEIGHT: i32 = 30; // outer bounding size (Z)
pub const DEFAULT_PALETTE_SEED: u64 = 0; // seed for the per-pass random colour pair

// ============================================================================
// Map Preset Defaults
// ============================================================================

pub const DEFAULT_MAP_WIDTH: i32 = 10;
pub const DEFAULT_MAP_HEIGHT: i32 = 10;
pub const DEFAULT_OBSTACLE_PERCENT: f32 = 0.2;
pub const DEFAULT_MAP_SEED: u64 = 10;
pub const DEFAULT_OBSTACLE_HEIGHT: f32 = 1.0;

// ============================================================================
// Arena Geometry
// ============================================================================

pub const MASK_HEIGHT: f32 = 1.0; // vertical scale of border masks
pub const FLOOR_COLLIDER_HEIGHT: f32 = 0.5; // thickness of the physical floor
pub const NAV_FLOOR_DEPTH: f32 = 1.0; // third axis of the rotated navigation floor quad
