//! In-memory resource items
//!
//! Every decoded asset is an [`Item`]: a broad [`Category`] plus a concrete
//! [`Subtype`], with the variant-specific payload carried by the enum itself.

use serde::Serialize;

pub mod bitmap;
pub mod factory;
pub mod palette;
pub mod sound;

pub use bitmap::{PixelFormat, RasterImage};
pub use factory::{ItemConstructor, ItemFactory, ItemFactoryBuilder};
pub use palette::{Palette, Rgb, PALETTE_COLOURS};
pub use sound::{Sound, SoundType};

/// Broad kind of a resource item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Bitmap,
    Palette,
    Sound,
}

/// Format-specific variant within a [`Category`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Subtype {
    /// Uncompressed paletted raster held fully in memory
    BitmapRaw,
    Palette,
    Sound(SoundType),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Bitmap(RasterImage),
    Palette(Palette),
    Sound(Sound),
}

impl Item {
    pub fn category(&self) -> Category {
        match self {
            Item::Bitmap(_) => Category::Bitmap,
            Item::Palette(_) => Category::Palette,
            Item::Sound(_) => Category::Sound,
        }
    }

    pub fn subtype(&self) -> Subtype {
        match self {
            Item::Bitmap(_) => Subtype::BitmapRaw,
            Item::Palette(_) => Subtype::Palette,
            Item::Sound(sound) => Subtype::Sound(sound.sound_type()),
        }
    }
}
