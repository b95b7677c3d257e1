//! # LBM (IFF "PBM ") bitmap loader
//!
//! Layout, all big-endian:
//!
//! ```text
//! "FORM" u32:length "PBM "
//! { tag:[u8; 4] length:u32 payload:[u8; length] (padded to even) }*
//! ```
//!
//! `BMHD` carries the dimensions, colour depth and compression mode, `CMAP`
//! the 256 colour palette and `BODY` the pixel indices. Any other chunk is
//! skipped. The palette must come before the pixel data.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::compression::rle::{check_length, decode_pixels, Compression};
use super::ContainerHandler;
use crate::binary_utils::{ByteOrder, EndianCursor};
use crate::error::{Error, Result};
use crate::items::palette::PALETTE_BYTES;
use crate::items::{Category, Item, ItemFactory, Palette, PixelFormat, RasterImage, Subtype};

pub const FORM_MAGIC: [u8; 4] = *b"FORM";
pub const PBM_MAGIC: [u8; 4] = *b"PBM ";

const BMHD: [u8; 4] = *b"BMHD";
// Spelling used by some tools for the same header chunk
const BHMD: [u8; 4] = *b"BHMD";
const CMAP: [u8; 4] = *b"CMAP";
const BODY: [u8; 4] = *b"BODY";

/// Bits of colour depth the loader accepts: 8 bits for each of 256 colours.
pub const SUPPORTED_DEPTH: u16 = 256 * 8;

/// Bytes of the header chunk that are interpreted.
const BMHD_USED_LEN: u32 = 12;

/// Tag and length of one chunk. The length is already padded to even.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub length: u32,
}

impl ChunkHeader {
    fn read(cursor: &mut EndianCursor<'_>) -> Result<Self> {
        let tag = cursor.read_magic()?;
        let length = padded(cursor.read_u32()?);
        Ok(Self { tag, length })
    }

    pub fn tag_str(&self) -> &str {
        std::str::from_utf8(&self.tag).unwrap_or("????")
    }
}

/// Chunks are aligned to two bytes.
pub fn padded(length: u32) -> u32 {
    length.saturating_add(length & 1)
}

#[derive(Clone, Copy, Debug, Default)]
struct BitmapHeader {
    width: u16,
    height: u16,
    compression: Compression,
}

pub struct LbmDecoder<'f> {
    factory: &'f ItemFactory,
}

impl<'f> LbmDecoder<'f> {
    pub fn new(factory: &'f ItemFactory) -> Self {
        Self { factory }
    }

    /// Decode a whole LBM file starting at the cursor's position.
    ///
    /// The file is always read big-endian, whatever order `cursor` was
    /// created with. Succeeds only if a `BODY` chunk was decoded and every
    /// byte of the input was consumed.
    pub fn decode(&self, cursor: &mut EndianCursor<'_>) -> Result<RasterImage> {
        let mut view = cursor.with_order(ByteOrder::Big);
        let result = self.decode_form(&mut view);
        cursor.seek(view.position())?;
        result
    }

    fn decode_form(&self, cursor: &mut EndianCursor<'_>) -> Result<RasterImage> {
        expect_magic(cursor, FORM_MAGIC)?;
        // Declared size of the FORM; the chunk loop runs to end of input instead
        let declared = cursor.read_u32()?;
        expect_magic(cursor, PBM_MAGIC)?;
        debug!(declared, actual = cursor.len(), "PBM container");

        let mut bitmap = match self.create(Category::Bitmap, Subtype::BitmapRaw)? {
            Item::Bitmap(bitmap) => bitmap,
            _ => return Err(unsupported(Category::Bitmap, Subtype::BitmapRaw)),
        };
        bitmap.set_format(PixelFormat::Paletted);

        let mut header = BitmapHeader::default();
        let mut has_body = false;

        while !cursor.is_at_end() {
            if cursor.remaining() < 4 {
                return Err(Error::IncompleteDecode {
                    reason: "trailing bytes after the last chunk",
                });
            }
            let chunk = ChunkHeader::read(cursor)?;
            debug!(
                tag = chunk.tag_str(),
                length = chunk.length,
                offset = cursor.position(),
                "chunk"
            );

            match chunk.tag {
                BMHD | BHMD => {
                    header = read_bitmap_header(cursor, chunk.length)?;
                    bitmap.set_size(header.width, header.height);
                }
                CMAP => {
                    if chunk.length as usize != PALETTE_BYTES {
                        return Err(Error::BadPaletteSize {
                            length: chunk.length,
                        });
                    }
                    let palette = self.read_palette(cursor)?;
                    bitmap.set_palette(palette);
                }
                BODY => {
                    if bitmap.palette().is_none() {
                        return Err(Error::MissingPalette);
                    }
                    // Before allocating, a raw body must hold the whole image
                    check_length(
                        header.compression,
                        header.width,
                        header.height,
                        chunk.length,
                    )?;
                    bitmap.alloc_pixels()?;
                    decode_pixels(
                        cursor,
                        header.compression,
                        header.width,
                        header.height,
                        chunk.length,
                        &mut bitmap,
                    )?;
                    has_body = true;
                }
                _ => {
                    debug!(tag = chunk.tag_str(), "skipping unknown chunk");
                    cursor.skip(chunk.length as usize)?;
                }
            }
        }

        if !has_body {
            return Err(Error::IncompleteDecode {
                reason: "no BODY chunk",
            });
        }
        Ok(bitmap)
    }

    fn create(&self, category: Category, subtype: Subtype) -> Result<Item> {
        self.factory
            .create(category, subtype)
            .ok_or_else(|| unsupported(category, subtype))
    }

    fn read_palette(&self, cursor: &mut EndianCursor<'_>) -> Result<Palette> {
        let mut palette = match self.create(Category::Palette, Subtype::Palette)? {
            Item::Palette(palette) => palette,
            _ => return Err(unsupported(Category::Palette, Subtype::Palette)),
        };
        palette
            .load(cursor)
            .map_err(|e| Error::PaletteDecode {
                source: Box::new(e),
            })?;
        Ok(palette)
    }
}

impl ContainerHandler for LbmDecoder<'_> {
    type Output = RasterImage;

    fn magic_word() -> &'static [u8] {
        &FORM_MAGIC
    }

    fn matches(data: &[u8]) -> bool {
        data.starts_with(&FORM_MAGIC) && data.get(8..12) == Some(&PBM_MAGIC[..])
    }

    fn deserialise(&self, data: &[u8]) -> Result<RasterImage> {
        self.decode(&mut EndianCursor::big_endian(data))
    }
}

fn read_bitmap_header(cursor: &mut EndianCursor<'_>, length: u32) -> Result<BitmapHeader> {
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    // Origin, unused
    cursor.skip(4)?;

    let depth = cursor.read_u16()?;
    if depth != SUPPORTED_DEPTH {
        return Err(Error::UnsupportedDepth { depth });
    }
    let compression = Compression::try_from(cursor.read_u16()?)?;

    if length < BMHD_USED_LEN {
        warn!(length, "bitmap header chunk shorter than its fields");
    }
    cursor.skip(length.saturating_sub(BMHD_USED_LEN) as usize)?;

    debug!(width, height, ?compression, "bitmap header");
    Ok(BitmapHeader {
        width,
        height,
        compression,
    })
}

fn expect_magic(cursor: &mut EndianCursor<'_>, expected: [u8; 4]) -> Result<()> {
    let found = cursor.read_magic()?;
    if found != expected {
        return Err(Error::BadMagic { expected, found });
    }
    Ok(())
}

fn unsupported(category: Category, subtype: Subtype) -> Error {
    Error::UnsupportedSubtype { category, subtype }
}

/// Decode an LBM file held in memory, using the global item factory.
pub fn decode_lbm(data: &[u8]) -> Result<RasterImage> {
    LbmDecoder::new(ItemFactory::global()).decode(&mut EndianCursor::big_endian(data))
}

/// Read and decode an LBM file from disk.
pub fn load_lbm<P: AsRef<Path>>(path: P) -> Result<RasterImage> {
    let data = fs::read(path)?;
    decode_lbm(&data)
}
