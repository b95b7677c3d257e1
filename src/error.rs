use std::io;

use thiserror::Error;

/// Everything that can make a resource file get rejected.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unexpected end of input at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("cannot seek to position {position} (buffer length: {len})")]
    SeekOutOfBounds { position: usize, len: usize },

    #[error("unsupported colour depth {depth} (only 256 colours are supported)")]
    UnsupportedDepth { depth: u16 },

    #[error("unsupported compression mode {mode}")]
    UnsupportedCompression { mode: u16 },

    #[error("palette chunk has {length} bytes, expected 768")]
    BadPaletteSize { length: u32 },

    #[error("failed to decode palette: {source}")]
    PaletteDecode {
        #[source]
        source: Box<Error>,
    },

    #[error("pixel data found before any palette")]
    MissingPalette,

    #[error("uncompressed pixel data has {length} bytes, image needs {expected}")]
    SizeMismatch { length: u32, expected: u32 },

    #[error("cannot allocate {bytes} bytes for pixel data")]
    OutOfMemory { bytes: usize },

    #[error("incomplete decode: {reason}")]
    IncompleteDecode { reason: &'static str },

    #[error("no item registered for {category:?}/{subtype:?}")]
    UnsupportedSubtype {
        category: crate::items::Category,
        subtype: crate::items::Subtype,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
