use crate::cursor::Cursor;
use crate::directory::Section;
use crate::error::{Error, Result};

/// Pixel format of a texture, stored in the low 3 bits of the type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgb565,
    Rgb888,
    Rgba8888,
    /// Pre-compressed DDS blob.
    Dds,
}

impl TextureFormat {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(Self::Rgb565),
            4 => Some(Self::Rgb888),
            5 => Some(Self::Rgba8888),
            6 => Some(Self::Dds),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Rgb565 => 2,
            Self::Rgb888 => 4,
            Self::Rgba8888 => 5,
            Self::Dds => 6,
        }
    }

    /// Bytes per pixel for raw formats, `None` for DDS.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Rgb565 => Some(2),
            Self::Rgb888 => Some(3),
            Self::Rgba8888 => Some(4),
            Self::Dds => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb565 => "RGB565",
            Self::Rgb888 => "RGB888",
            Self::Rgba8888 => "RGBA8888",
            Self::Dds => "DDS",
        }
    }
}

impl std::fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A texture from the textures section.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    /// Width in pixels. For DDS textures this is the byte size of the blob.
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub has_mipmaps: bool,
    /// Pixel data, largest level first. DDS textures have exactly one level.
    pub levels: Vec<Vec<u8>>,
}

impl Texture {
    /// Base level pixel data.
    pub fn data(&self) -> &[u8] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parsed textures section.
#[derive(Debug, Default)]
pub struct Textures {
    pub textures: Vec<Texture>,
}

const FORMAT_MASK: u32 = 0x07;
const MIPMAP_FLAG: u32 = 0x08;
const MAX_LEVELS: usize = 4;

impl Textures {
    /// Parse the textures section.
    ///
    /// `data` is the full file; texture offsets are relative to the section start.
    pub fn parse(data: &[u8], section: Section) -> Result<Self> {
        let mut c = Cursor::new(data);
        c.seek(section.start())?;
        let offsets = c.read_offset_list()?;

        let mut textures = Vec::with_capacity(offsets.len());
        for rel in offsets {
            let offset = section.start().saturating_add(rel as usize);
            textures.push(Self::parse_texture(&mut c.at_offset(offset)?)?);
        }

        log::debug!("[wmb] textures: {}", textures.len());
        Ok(Self { textures })
    }

    fn parse_texture(c: &mut Cursor<'_>) -> Result<Texture> {
        let name = c.read_fixed_str(16)?;
        let width = c.read_u32()?;
        let height = c.read_u32()?;
        let ty = c.read_u32()?;
        c.skip(12)?;

        let code = ty & FORMAT_MASK;
        let format =
            TextureFormat::from_code(code).ok_or_else(|| Error::UnknownTextureFormat {
                name: name.clone(),
                code,
            })?;
        let has_mipmaps = ty & MIPMAP_FLAG != 0;

        let levels = match format.bytes_per_pixel() {
            // The blob follows the header; width holds its length.
            None => vec![c.read_bytes(width as usize)?.to_vec()],
            Some(bpp) => {
                let max_levels = if has_mipmaps { MAX_LEVELS } else { 1 };
                let mut len = bpp
                    .checked_mul(width as usize)
                    .and_then(|n| n.checked_mul(height as usize))
                    .unwrap_or(usize::MAX);
                let mut levels = Vec::with_capacity(max_levels);
                while levels.len() < max_levels && (levels.is_empty() || len > 0) {
                    levels.push(c.read_bytes(len)?.to_vec());
                    len /= 4;
                }
                levels
            }
        };

        Ok(Texture {
            name,
            width,
            height,
            format,
            has_mipmaps,
            levels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Writer;

    /// Lay out a textures section at offset 8 of a buffer.
    fn section(entries: &[Vec<u8>]) -> (Vec<u8>, Section) {
        let mut body = Writer::new();
        body.write_u32(entries.len() as u32);
        let mut rel = 4 + 4 * entries.len() as u32;
        for e in entries {
            body.write_u32(rel);
            rel += e.len() as u32;
        }
        for e in entries {
            body.write_bytes(e);
        }
        let body = body.into_bytes();

        let mut w = Writer::new();
        w.zeros(8).write_bytes(&body);
        let section = Section {
            offset: 8,
            length: body.len() as u32,
        };
        (w.into_bytes(), section)
    }

    fn texture(name: &str, width: u32, height: u32, ty: u32, payload: &[u8]) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_fixed_str(name, 16)
            .write_u32(width)
            .write_u32(height)
            .write_u32(ty)
            .zeros(12)
            .write_bytes(payload);
        w.into_bytes()
    }

    #[test]
    fn raw_texture_without_mipmaps() {
        let pixels: Vec<u8> = (0..2 * 2 * 3).collect();
        let (data, sec) = section(&[texture("stone", 2, 2, 4, &pixels)]);
        let t = &Textures::parse(&data, sec).unwrap().textures[0];
        assert_eq!(t.name, "stone");
        assert_eq!(t.format, TextureFormat::Rgb888);
        assert!(!t.has_mipmaps);
        assert_eq!(t.levels.len(), 1);
        assert_eq!(t.data(), pixels.as_slice());
    }

    #[test]
    fn mipmaps_are_quartered() {
        // 4x4 RGB565: 32, 8, 2, 0 bytes -> three levels.
        let payload = vec![0xAB; 32 + 8 + 2];
        let (data, sec) = section(&[texture("grass", 4, 4, 2 | 8, &payload)]);
        let t = &Textures::parse(&data, sec).unwrap().textures[0];
        assert!(t.has_mipmaps);
        let sizes: Vec<_> = t.levels.iter().map(Vec::len).collect();
        assert_eq!(sizes, [32, 8, 2]);
    }

    #[test]
    fn mipmaps_stop_at_four_levels() {
        // 8x8 RGBA: 256, 64, 16, 4 bytes.
        let payload = vec![1; 256 + 64 + 16 + 4];
        let (data, sec) = section(&[texture("sky", 8, 8, 5 | 8, &payload)]);
        let t = &Textures::parse(&data, sec).unwrap().textures[0];
        let sizes: Vec<_> = t.levels.iter().map(Vec::len).collect();
        assert_eq!(sizes, [256, 64, 16, 4]);
    }

    #[test]
    fn dds_width_is_blob_length() {
        let blob = b"DDS 0123456789";
        let (data, sec) = section(&[
            texture("dds", blob.len() as u32, 64, 6 | 8, blob),
            texture("next", 1, 1, 5, &[9, 9, 9, 9]),
        ]);
        let textures = Textures::parse(&data, sec).unwrap().textures;
        assert_eq!(textures.len(), 2);
        assert_eq!(textures[0].format, TextureFormat::Dds);
        assert_eq!(textures[0].levels, vec![blob.to_vec()]);
        assert_eq!(textures[1].name, "next");
        assert_eq!(textures[1].data(), &[9, 9, 9, 9]);
    }

    #[test]
    fn unknown_format_is_fatal() {
        let (data, sec) = section(&[texture("bad", 1, 1, 3, &[0; 8])]);
        match Textures::parse(&data, sec) {
            Err(Error::UnknownTextureFormat { name, code }) => {
                assert_eq!(name, "bad");
                assert_eq!(code, 3);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_pixels_are_eof() {
        let (data, sec) = section(&[texture("short", 4, 4, 5, &[0; 10])]);
        assert!(matches!(
            Textures::parse(&data, sec),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn format_names() {
        assert_eq!(TextureFormat::from_code(6), Some(TextureFormat::Dds));
        assert_eq!(TextureFormat::from_code(7), None);
        assert_eq!(TextureFormat::Rgba8888.to_string(), "RGBA8888");
        assert_eq!(TextureFormat::Rgb565.code(), 2);
    }
}
