//! Builder for synthetic WMB7 files used by the integration tests.

#![allow(dead_code)]

/// Little-endian byte buffer.
#[derive(Default, Clone)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32s(mut self, vs: &[f32]) -> Self {
        for v in vs {
            self.0.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn zeros(mut self, n: usize) -> Self {
        self.0.resize(self.0.len() + n, 0);
        self
    }

    /// `s` NUL-padded to `width` bytes.
    pub fn text(self, s: &str, width: usize) -> Self {
        let mut field = vec![0u8; width];
        field[..s.len()].copy_from_slice(s.as_bytes());
        self.raw(&field)
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

/// An offset-table section body: count, relative offsets, then the records.
fn table(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Bytes::new().u32(records.len() as u32);
    let mut rel = 4 + 4 * records.len() as u32;
    for r in records {
        out = out.u32(rel);
        rel += r.len() as u32;
    }
    for r in records {
        out = out.raw(r);
    }
    out.build()
}

const TEXTURES: usize = 2;
const MATERIALS: usize = 6;
const OBJECTS: usize = 15;
const LIGHTMAPS: usize = 16;
const BLOCKS: usize = 17;
const TERRAIN_LIGHTMAPS: usize = 19;

/// Assembles a complete level file. Sections left unset get offset 0.
pub struct LevelBuilder {
    magic: [u8; 4],
    sections: [Option<Vec<u8>>; 20],
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self {
            magic: *b"WMB7",
            sections: Default::default(),
        }
    }
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = *magic;
        self
    }

    pub fn textures(mut self, records: &[Vec<u8>]) -> Self {
        self.sections[TEXTURES] = Some(table(records));
        self
    }

    pub fn materials(mut self, names: &[&[u8]]) -> Self {
        let mut body = Bytes::new();
        for name in names {
            let mut field = [0u8; 20];
            field[..name.len()].copy_from_slice(name);
            body = body.zeros(44).raw(&field);
        }
        self.sections[MATERIALS] = Some(body.build());
        self
    }

    pub fn objects(mut self, records: &[Vec<u8>]) -> Self {
        self.sections[OBJECTS] = Some(table(records));
        self
    }

    pub fn blocks(mut self, body: Vec<u8>) -> Self {
        self.sections[BLOCKS] = Some(body);
        self
    }

    pub fn lightmaps(mut self, body: Vec<u8>) -> Self {
        self.sections[LIGHTMAPS] = Some(body);
        self
    }

    pub fn terrain_lightmaps(mut self, body: Vec<u8>) -> Self {
        self.sections[TERRAIN_LIGHTMAPS] = Some(body);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 4 + 20 * 8;
        let mut header = Bytes::new().raw(&self.magic);
        let mut body = Vec::new();
        for section in &self.sections {
            match section {
                Some(bytes) => {
                    let offset = header_len + body.len();
                    header = header.u32(offset as u32).u32(bytes.len() as u32);
                    body.extend_from_slice(bytes);
                }
                None => header = header.u32(0).u32(0),
            }
        }
        header.raw(&body).build()
    }
}

// ── Object records (tag included) ───────────────────────────────────────────

pub fn environment(selector: u8, azimuth: f32) -> Vec<u8> {
    Bytes::new()
        .u32(5)
        .f32s(&[0.0, 0.0, 0.0, azimuth, 45.0])
        .u32(0x7F)
        .f32s(&[7.0])
        .u8(255)
        .u8(selector)
        .zeros(8)
        .u32(0xFFFF_FFFF)
        .u32(0xFF40_4040)
        .zeros(16)
        .build()
}

pub fn light(origin: [f32; 3], range: f32) -> Vec<u8> {
    Bytes::new()
        .u32(2)
        .f32s(&origin)
        .f32s(&[100.0, 100.0, 100.0, range])
        .u32(0)
        .build()
}

pub fn position(name: &str, origin: [f32; 3]) -> Vec<u8> {
    Bytes::new()
        .u32(1)
        .f32s(&origin)
        .f32s(&[0.0, 0.0, 0.0])
        .zeros(8)
        .text(name, 20)
        .build()
}

pub fn entity(name: &str, origin: [f32; 3], scale: [f32; 3], path: i32) -> Vec<u8> {
    Bytes::new()
        .u32(7)
        .f32s(&origin)
        .f32s(&[0.0, 0.0, 0.0])
        .f32s(&scale)
        .text(name, 33)
        .text("model.mdl", 33)
        .text("", 33)
        .zeros(1)
        .f32s(&[0.0; 20])
        .u32(0)
        .f32s(&[0.0, 0.0])
        .i32(path)
        .u32(0)
        .text("", 33)
        .text("", 33)
        .text("", 33)
        .zeros(33)
        .build()
}

/// A path record; node positions are `[i, i, i]` for node `i`.
pub fn path(name: &str, node_count: usize, edges: &[[f32; 2]]) -> Vec<u8> {
    let mut out = Bytes::new()
        .u32(6)
        .text(name, 20)
        .f32s(&[node_count as f32])
        .zeros(12)
        .u32(edges.len() as u32);
    for i in 0..node_count {
        out = out.f32s(&[i as f32; 3]);
    }
    for _ in 0..node_count {
        out = out.f32s(&[0.0; 6]);
    }
    for e in edges {
        out = out.f32s(&[e[0], e[1], 1.0, 0.0, 1.0, 0.0]);
    }
    out.build()
}

pub fn unknown_object(tag: u32) -> Vec<u8> {
    Bytes::new().u32(tag).zeros(64).build()
}

// ── Section bodies ──────────────────────────────────────────────────────────

pub fn texture(name: &str, width: u32, height: u32, ty: u32, payload: &[u8]) -> Vec<u8> {
    Bytes::new()
        .text(name, 16)
        .u32(width)
        .u32(height)
        .u32(ty)
        .zeros(12)
        .raw(payload)
        .build()
}

/// A blocks section with a single quad (two triangles) over four vertices.
pub fn quad_block() -> Vec<u8> {
    let mut out = Bytes::new()
        .u32(1)
        .f32s(&[0.0, 0.0, 0.0, 1.0, 1.0, 0.0])
        .u32(0)
        .u32(4)
        .u32(2)
        .u32(1);
    for v in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
        out = out.f32s(&v).f32s(&[v[0], v[1], v[0], v[1]]);
    }
    for [a, b, c] in [[0u16, 1, 2], [0, 2, 3]] {
        out = out.u16(a).u16(b).u16(c).u16(0).u32(0);
    }
    out.u16(0).u16(0).u32(0).f32s(&[0.0, 1.0]).u32(0).build()
}
