use crate::cursor::Cursor;
use crate::directory::Section;
use crate::error::{Error, Result};

/// Bytes per lightmap pixel (BGR).
pub const LIGHTMAP_BPP: usize = 3;

/// A precomputed light image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightmap {
    pub width: u32,
    pub height: u32,
    /// Index of the owning terrain object, for terrain lightmaps only.
    pub object: Option<u32>,
    /// Pixels in BGR order, 3 bytes each.
    pub data: Vec<u8>,
}

fn payload_len(width: u32, height: u32) -> usize {
    LIGHTMAP_BPP
        .checked_mul(width as usize)
        .and_then(|n| n.checked_mul(height as usize))
        .unwrap_or(usize::MAX)
}

/// Parsed block lightmaps section.
#[derive(Debug, Default)]
pub struct Lightmaps {
    pub lightmaps: Vec<Lightmap>,
}

impl Lightmaps {
    /// Parse the block lightmaps section.
    ///
    /// The section carries no count: every lightmap is `size × size` pixels, with
    /// `size` taken from the level's environment, and the count follows from the
    /// section length.
    pub fn parse(data: &[u8], section: Section, size: u32) -> Result<Self> {
        let len = payload_len(size, size);
        if len == 0 {
            return Err(Error::UnsupportedLightmapSize { size });
        }

        let mut c = Cursor::new(data);
        c.seek(section.start())?;

        let count = section.len() / len;
        let mut lightmaps = Vec::with_capacity(count.min(c.remaining() / len));
        for _ in 0..count {
            lightmaps.push(Lightmap {
                width: size,
                height: size,
                object: None,
                data: c.read_bytes(len)?.to_vec(),
            });
        }

        log::debug!("[wmb] lightmaps: {} ({size}x{size})", lightmaps.len());
        Ok(Self { lightmaps })
    }
}

/// Parsed terrain lightmaps section.
#[derive(Debug, Default)]
pub struct TerrainLightmaps {
    pub lightmaps: Vec<Lightmap>,
}

impl TerrainLightmaps {
    /// Parse the terrain lightmaps section: a count, then per entry the owning
    /// object, width and height followed by the pixels.
    pub fn parse(data: &[u8], section: Section) -> Result<Self> {
        let mut c = Cursor::new(data);
        c.seek(section.start())?;

        let count = c.read_u32()? as usize;
        let mut lightmaps = Vec::with_capacity(count.min(c.remaining() / 12));
        for _ in 0..count {
            let object = c.read_u32()?;
            let width = c.read_u32()?;
            let height = c.read_u32()?;
            let data = c.read_bytes(payload_len(width, height))?.to_vec();
            lightmaps.push(Lightmap {
                width,
                height,
                object: Some(object),
                data,
            });
        }

        log::debug!("[wmb] terrain lightmaps: {}", lightmaps.len());
        Ok(Self { lightmaps })
    }
}
