use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read level: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid magic: expected {expected:?}, found {found:?}")]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("seek to offset {offset:#x} is outside the {len}-byte input")]
    SeekOutOfRange { offset: usize, len: usize },

    #[error("unknown object type {tag} at offset {offset:#x}")]
    UnknownObjectType { offset: usize, tag: u32 },

    #[error("texture {name:?} has unknown format code {code}")]
    UnknownTextureFormat { name: String, code: u32 },

    #[error("level has no environment (INFO) object")]
    MissingEnvironment,

    #[error("invalid lightmap size selector {selector}")]
    InvalidLightmapSize { selector: u8 },

    #[error("unsupported lightmap size {size}")]
    UnsupportedLightmapSize { size: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
