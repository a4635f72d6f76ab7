use crate::cursor::Cursor;
use crate::directory::Section;
use crate::error::Result;

/// Size of one material record.
pub const MATERIAL_RECORD_SIZE: usize = 64;

/// Name prefix the compiler writes for the built-in default material.
const DEFAULT_SENTINEL: [u8; 4] = *b"\0def";

/// A material name entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub is_default: bool,
}

/// Parsed materials section.
#[derive(Debug, Default)]
pub struct Materials {
    pub materials: Vec<Material>,
}

impl Materials {
    /// Parse the materials section. The record count follows from the section length.
    pub fn parse(data: &[u8], section: Section) -> Result<Self> {
        let mut c = Cursor::new(data);
        c.seek(section.start())?;

        let count = section.len() / MATERIAL_RECORD_SIZE;
        let mut materials = Vec::with_capacity(count.min(c.remaining() / MATERIAL_RECORD_SIZE));
        for _ in 0..count {
            c.skip(44)?;
            let raw = c.read_bytes(20)?;
            let is_default = raw.starts_with(&DEFAULT_SENTINEL);
            let name = Cursor::new(raw).read_fixed_str(20)?;
            materials.push(Material { name, is_default });
        }

        log::debug!("[wmb] materials: {}", materials.len());
        Ok(Self { materials })
    }
}
