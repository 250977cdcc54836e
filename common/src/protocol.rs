#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use bevy_color::{ColorToComponents, Srgba};
use bevy_math::Vec3;

use crate::grid::ObstacleMap;

// Macro to reduce boilerplate for descriptor structs
macro_rules! message {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "bincode", derive(Encode, Decode))]
        pub struct $name $body
    };
}

// ============================================================================
// Common Data Types
// ============================================================================

// Grid coordinate. Also used for map sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // Number of tiles when used as a map size
    #[must_use]
    pub const fn area(self) -> usize {
        (self.x as usize) * (self.y as usize)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// World-space position in meters (Y is up, the grid lies in the XZ plane)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

// Per-axis scale of an instantiated object
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Scale {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Scale {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl From<Vec3> for Scale {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Scale> for Vec3 {
    fn from(s: Scale) -> Self {
        Self::new(s.x, s.y, s.z)
    }
}

// RGBA colour in sRGB space, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Srgba> for Rgba {
    fn from(c: Srgba) -> Self {
        let [r, g, b, a] = c.to_f32_array();
        Self { r, g, b, a }
    }
}

impl From<Rgba> for Srgba {
    fn from(c: Rgba) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

// ============================================================================
// Arena Descriptors
// ============================================================================

message! {
// One floor tile, instantiated for every grid coordinate.
struct TileSpec {
    pub coord: Coord,
    pub position: Position,
    pub scale: Scale,
}
}

message! {
// One accepted obstacle. `position` is the obstacle's center, lifted by half its height.
struct ObstacleSpec {
    pub coord: Coord,
    pub position: Position,
    pub scale: Scale,
    pub height: f32,
    pub colour_percent: f32,
    pub colour: Rgba,
}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum MaskSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl MaskSide {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

message! {
// Unwalkable border block padding the grid out to the outer bounding size.
struct MaskRegion {
    pub side: MaskSide,
    pub position: Position,
    pub scale: Scale,
}
}

message! {
// Navigation floor spanning the outer bounding size, plus the physical floor collider
// spanning only the generated grid.
struct FloorRegion {
    pub scale: Scale,
    pub collider: Scale,
}
}

message! {
// Everything one generation pass produces, ready for an `ArenaBuilder`.
struct ArenaLayout {
    pub name: String,
    pub seed: u64,
    pub map_size: Coord,
    pub max_map_size: Coord,
    pub tile_size: f32,
    pub center: Coord,
    pub target_obstacle_count: usize,
    pub obstacle_map: ObstacleMap,
    pub tiles: Vec<TileSpec>,
    pub obstacles: Vec<ObstacleSpec>,
    pub open_tiles: Vec<Coord>,
    pub masks: Vec<MaskRegion>,
    pub floor: FloorRegion,
}
}

impl ArenaLayout {
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    #[must_use]
    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.obstacle_map.is_obstacle(coord)
    }
}
