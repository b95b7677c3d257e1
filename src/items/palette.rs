//! # Palette
//!
//! 256 RGB colours looked up by the indices stored in paletted bitmaps.

use serde::Serialize;

use crate::binary_utils::EndianCursor;
use crate::error::Result;

pub const PALETTE_COLOURS: usize = 256;

/// Size of a palette on disk: one RGB triple per colour.
pub const PALETTE_BYTES: usize = PALETTE_COLOURS * 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colours: [Rgb; PALETTE_COLOURS],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colours: [Rgb::default(); PALETTE_COLOURS],
        }
    }
}

impl Palette {
    /// Fill all 256 entries from consecutive RGB triples.
    ///
    /// On failure the palette is left unchanged.
    pub fn load(&mut self, cursor: &mut EndianCursor<'_>) -> Result<()> {
        let raw = cursor.read_tag(PALETTE_BYTES)?;
        for (colour, rgb) in self.colours.iter_mut().zip(raw.chunks_exact(3)) {
            *colour = Rgb {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            };
        }
        Ok(())
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.colours[index as usize]
    }

    pub fn set(&mut self, index: u8, colour: Rgb) {
        self.colours[index as usize] = colour;
    }

    pub fn colours(&self) -> &[Rgb; PALETTE_COLOURS] {
        &self.colours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn load_reads_triples_in_order() {
        let raw: Vec<u8> = (0..PALETTE_BYTES).map(|i| (i % 251) as u8).collect();
        let mut cursor = EndianCursor::big_endian(&raw);
        let mut palette = Palette::default();
        palette.load(&mut cursor).unwrap();

        assert!(cursor.is_at_end());
        assert_eq!(palette.get(0), Rgb { r: 0, g: 1, b: 2 });
        assert_eq!(
            palette.get(255),
            Rgb {
                r: (765 % 251) as u8,
                g: (766 % 251) as u8,
                b: (767 % 251) as u8,
            }
        );
    }

    #[test]
    fn short_palette_is_rejected() {
        let raw = [0xAAu8; PALETTE_BYTES - 1];
        let mut cursor = EndianCursor::big_endian(&raw);
        let mut palette = Palette::default();

        assert!(matches!(
            palette.load(&mut cursor),
            Err(Error::UnexpectedEof { need: 768, .. })
        ));
        assert_eq!(palette, Palette::default());
    }
}
