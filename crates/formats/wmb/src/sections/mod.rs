//! Typed parsers for the individual sections of a level file.

pub mod blocks;
pub mod lightmaps;
pub mod materials;
pub mod objects;
pub mod textures;
