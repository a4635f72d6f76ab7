//! Reader for 3D GameStudio WMB7 level files.
//!
//! Three-layer architecture:
//! - **Layer 1** (`cursor`/`directory`): Raw byte reads and the header section directory
//! - **Layer 2** (`sections`): Typed parsers for individual sections
//! - **Layer 3** (`level`): Assembles the sections into a validated [`Level`]

pub mod coords;
pub mod cursor;
pub mod directory;
pub mod error;
pub mod level;
pub mod options;
pub mod sections;
pub mod warning;

use std::io::Read;

pub use directory::{Directory, Section};
pub use error::{Error, Result};
pub use level::Level;
pub use options::{CoordinateSystem, LoadOptions, WarningLevel};
pub use sections::blocks::{Block, Skin, Triangle, Vertex};
pub use sections::lightmaps::Lightmap;
pub use sections::materials::Material;
pub use sections::objects::{
    Entity, Environment, Euler, Light, Object, ObjectKind, Path, PathEdge, PathNode,
    Position, Region, Sound,
};
pub use sections::textures::{Texture, TextureFormat};
pub use warning::Warning;

/// Decode a level from its complete file contents.
pub fn decode(data: &[u8], options: &LoadOptions) -> Result<Level> {
    Level::parse(data, options)
}

/// Decode a level from any reader. The input is read to the end first.
pub fn decode_reader<R: Read>(mut reader: R, options: &LoadOptions) -> Result<Level> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Level::parse(&data, options)
}

/// Read and decode a level file.
pub fn load(path: impl AsRef<std::path::Path>, options: &LoadOptions) -> Result<Level> {
    let data = std::fs::read(path)?;
    Level::parse(&data, options)
}
