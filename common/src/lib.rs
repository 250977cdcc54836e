pub mod builder;
pub mod config;
pub mod constants;
pub mod generator;
pub mod grid;
pub mod io;
pub mod markers;
pub mod masks;
pub mod obstacles;
pub mod protocol;
pub mod random;
pub mod reachability;

pub use builder::{ArenaBuilder, TileIndex, realize};
pub use config::{ConfigError, GeneratorSettings, MapConfig};
pub use generator::ArenaGenerator;
pub use protocol::{ArenaLayout, Coord};
