use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Magic bytes at the start of every supported level file.
pub const WMB7_MAGIC: [u8; 4] = *b"WMB7";

/// Size of the header: magic plus 20 section descriptors.
pub const HEADER_SIZE: usize = 4 + 20 * 8;

/// A section entry in the header directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Section {
    /// Absolute byte offset of the section in the file, or 0 if absent.
    pub offset: u32,
    /// Length of the section in bytes.
    pub length: u32,
}

impl Section {
    /// Whether the file carries this section at all.
    pub fn is_present(&self) -> bool {
        self.offset != 0
    }

    /// Absolute start offset.
    pub fn start(&self) -> usize {
        self.offset as usize
    }

    /// Section length in bytes.
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Whether the section has zero length.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// The header directory of a WMB7 file.
///
/// This is Layer 1: it only knows where sections live. Slots only used by the
/// BSP or pre-WMB7 compilers are kept positionally but never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    pub palettes: Section,
    pub legacy1: Section,
    pub textures: Section,
    pub legacy2: Section,
    pub visibility: Section,
    pub bsp_nodes: Section,
    pub materials: Section,
    pub legacy3: Section,
    pub legacy4: Section,
    pub aabb_hulls: Section,
    pub bsp_leaves: Section,
    pub bsp_blocks: Section,
    pub legacy5: Section,
    pub legacy6: Section,
    pub legacy7: Section,
    pub objects: Section,
    pub lightmaps: Section,
    pub blocks: Section,
    pub legacy8: Section,
    pub terrain_lightmaps: Section,
}

impl Directory {
    /// Parse the magic tag and the 20 section descriptors.
    ///
    /// The `data` slice must be the entire file contents.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(data);

        let magic = c.read_magic()?;
        if magic != WMB7_MAGIC {
            return Err(Error::InvalidMagic {
                expected: WMB7_MAGIC,
                found: magic,
            });
        }

        let mut read = || -> Result<Section> {
            Ok(Section {
                offset: c.read_u32()?,
                length: c.read_u32()?,
            })
        };

        // Field initialisers run in source order, which is the on-disk order.
        Ok(Self {
            palettes: read()?,
            legacy1: read()?,
            textures: read()?,
            legacy2: read()?,
            visibility: read()?,
            bsp_nodes: read()?,
            materials: read()?,
            legacy3: read()?,
            legacy4: read()?,
            aabb_hulls: read()?,
            bsp_leaves: read()?,
            bsp_blocks: read()?,
            legacy5: read()?,
            legacy6: read()?,
            legacy7: read()?,
            objects: read()?,
            lightmaps: read()?,
            blocks: read()?,
            legacy8: read()?,
            terrain_lightmaps: read()?,
        })
    }

    /// All 20 descriptors in file order, with their names.
    pub fn sections(&self) -> [(&'static str, Section); 20] {
        [
            ("palettes", self.palettes),
            ("legacy1", self.legacy1),
            ("textures", self.textures),
            ("legacy2", self.legacy2),
            ("visibility", self.visibility),
            ("bsp_nodes", self.bsp_nodes),
            ("materials", self.materials),
            ("legacy3", self.legacy3),
            ("legacy4", self.legacy4),
            ("aabb_hulls", self.aabb_hulls),
            ("bsp_leaves", self.bsp_leaves),
            ("bsp_blocks", self.bsp_blocks),
            ("legacy5", self.legacy5),
            ("legacy6", self.legacy6),
            ("legacy7", self.legacy7),
            ("objects", self.objects),
            ("lightmaps", self.lightmaps),
            ("blocks", self.blocks),
            ("legacy8", self.legacy8),
            ("terrain_lightmaps", self.terrain_lightmaps),
        ]
    }
}
