use glam::{Vec2, Vec3};

use crate::coords::CoordinateMapper;
use crate::cursor::Cursor;
use crate::directory::Section;
use crate::error::Result;

const VERTEX_SIZE: usize = 28;
const TRIANGLE_SIZE: usize = 12;
const SKIN_SIZE: usize = 20;

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Texture coordinates.
    pub uv: Vec2,
    /// Lightmap coordinates.
    pub lightmap_uv: Vec2,
}

/// A triangle referencing three vertices and one skin of its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [u16; 3],
    pub skin: u16,
}

/// Texture, lightmap and material binding for a group of triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skin {
    /// Index into the level's textures.
    pub texture: u16,
    /// Index into the level's lightmaps.
    pub lightmap: u16,
    /// Index into the level's materials.
    pub material: u32,
    pub ambient: f32,
    pub albedo: f32,
    pub flags: u32,
}

impl Skin {
    pub const FLAT: u32 = 1;
    pub const SKY: u32 = 2;
    pub const PASSABLE: u32 = 6;
    pub const SMOOTH: u32 = 14;

    /// Whether bit `bit` of the flags word is set.
    pub fn flag(&self, bit: u32) -> bool {
        bit < 32 && self.flags & (1 << bit) != 0
    }

    /// Flat shaded, no lightmap.
    pub fn is_flat(&self) -> bool {
        self.flag(Self::FLAT)
    }

    pub fn is_sky(&self) -> bool {
        self.flag(Self::SKY)
    }

    pub fn is_passable(&self) -> bool {
        self.flag(Self::PASSABLE)
    }

    pub fn is_smooth(&self) -> bool {
        self.flag(Self::SMOOTH)
    }
}

/// A renderable mesh chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub bb_min: Vec3,
    pub bb_max: Vec3,
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    pub skins: Vec<Skin>,
}

/// Parsed blocks section.
#[derive(Debug, Default)]
pub struct Blocks {
    pub blocks: Vec<Block>,
}

impl Blocks {
    /// Parse the blocks section.
    ///
    /// Blocks are stored back to back with no offset table: each header is
    /// followed by its vertices, then triangles, then skins.
    pub fn parse(data: &[u8], section: Section, mapper: &CoordinateMapper) -> Result<Self> {
        let mut c = Cursor::new(data);
        c.seek(section.start())?;

        let count = c.read_u32()? as usize;
        // Even an empty block has a 40-byte header.
        let mut blocks = Vec::with_capacity(count.min(c.remaining() / 40));
        for _ in 0..count {
            blocks.push(Self::parse_block(&mut c, mapper)?);
        }

        log::debug!("[wmb] blocks: {}", blocks.len());
        Ok(Self { blocks })
    }

    fn parse_block(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Block> {
        let min = c.read_vec3()?;
        let max = c.read_vec3()?;
        let _content = c.read_u32()?;
        let vertex_count = c.read_u32()? as usize;
        let triangle_count = c.read_u32()? as usize;
        let skin_count = c.read_u32()? as usize;

        let (bb_min, bb_max) = mapper.bounds(min, max);

        let mut vertices = Vec::with_capacity(vertex_count.min(c.remaining() / VERTEX_SIZE));
        for _ in 0..vertex_count {
            let position = mapper.position(c.read_vec3()?);
            let uv = c.read_vec2()?;
            let lightmap_uv = c.read_vec2()?;
            vertices.push(Vertex {
                position,
                uv,
                lightmap_uv,
            });
        }

        let mut triangles = Vec::with_capacity(triangle_count.min(c.remaining() / TRIANGLE_SIZE));
        for _ in 0..triangle_count {
            let corners = [c.read_u16()?, c.read_u16()?, c.read_u16()?];
            let skin = c.read_u16()?;
            let _unused = c.read_u32()?;
            triangles.push(Triangle {
                vertices: mapper.winding(corners),
                skin,
            });
        }

        let mut skins = Vec::with_capacity(skin_count.min(c.remaining() / SKIN_SIZE));
        for _ in 0..skin_count {
            skins.push(Skin {
                texture: c.read_u16()?,
                lightmap: c.read_u16()?,
                material: c.read_u32()?,
                ambient: c.read_f32()?,
                albedo: c.read_f32()?,
                flags: c.read_u32()?,
            });
        }

        Ok(Block {
            bb_min,
            bb_max,
            vertices,
            triangles,
            skins,
        })
    }
}
