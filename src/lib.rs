//! Decoders for legacy game resource files.
//!
//! - [`binary_utils`]: bounds-checked, byte-order aware read cursor
//! - [`formats::sniff`]: sound type detection from leading bytes
//! - [`containers::lbm`]: chunked IFF `PBM ` bitmap loader
//! - [`containers::compression::rle`]: run-length pixel decoding
//! - [`items`]: decoded item model and the item factory

pub mod binary_utils;
pub mod containers;
pub mod error;
pub mod formats;
pub mod items;
pub mod report;

pub use binary_utils::{ByteOrder, EndianCursor};
pub use containers::lbm::{decode_lbm, load_lbm, LbmDecoder};
pub use error::{Error, Result};
pub use items::{Category, Item, ItemFactory, Palette, RasterImage, Sound, SoundType, Subtype};
