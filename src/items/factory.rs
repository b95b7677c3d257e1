//! # Item Factory
//!
//! Maps a (category, subtype) pair to a constructor for a fresh, empty item.
//! Decoders ask the factory for items instead of naming concrete types, so
//! the set of supported subtypes is decided in one place when the table is
//! built. The table cannot change once built.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{Category, Item, Palette, RasterImage, Sound, SoundType, Subtype};

pub type ItemConstructor = fn() -> Item;

#[derive(Default)]
pub struct ItemFactoryBuilder {
    constructors: HashMap<(Category, Subtype), ItemConstructor>,
}

impl ItemFactoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `constructor` for the pair, replacing an earlier registration.
    pub fn register(
        mut self,
        category: Category,
        subtype: Subtype,
        constructor: ItemConstructor,
    ) -> Self {
        self.constructors.insert((category, subtype), constructor);
        self
    }

    pub fn build(self) -> ItemFactory {
        ItemFactory {
            constructors: self.constructors,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ItemFactory {
    constructors: HashMap<(Category, Subtype), ItemConstructor>,
}

impl ItemFactory {
    /// Every item type this crate can produce.
    pub fn standard() -> Self {
        ItemFactoryBuilder::new()
            .register(Category::Bitmap, Subtype::BitmapRaw, || {
                Item::Bitmap(RasterImage::default())
            })
            .register(Category::Palette, Subtype::Palette, || {
                Item::Palette(Palette::default())
            })
            .register(Category::Sound, Subtype::Sound(SoundType::None), || {
                Item::Sound(Sound::new(SoundType::None))
            })
            .register(Category::Sound, Subtype::Sound(SoundType::Wave), || {
                Item::Sound(Sound::new(SoundType::Wave))
            })
            .register(Category::Sound, Subtype::Sound(SoundType::XMidi), || {
                Item::Sound(Sound::new(SoundType::XMidi))
            })
            .register(Category::Sound, Subtype::Sound(SoundType::Midi), || {
                Item::Sound(Sound::new(SoundType::Midi))
            })
            .register(Category::Sound, Subtype::Sound(SoundType::Ogg), || {
                Item::Sound(Sound::new(SoundType::Ogg))
            })
            .register(Category::Sound, Subtype::Sound(SoundType::Mp3), || {
                Item::Sound(Sound::new(SoundType::Mp3))
            })
            .build()
    }

    /// Process-wide standard factory, built on first use.
    pub fn global() -> &'static ItemFactory {
        static GLOBAL: OnceLock<ItemFactory> = OnceLock::new();
        GLOBAL.get_or_init(ItemFactory::standard)
    }

    /// A fresh item for the pair, or `None` when nothing is registered.
    pub fn create(&self, category: Category, subtype: Subtype) -> Option<Item> {
        self.constructors
            .get(&(category, subtype))
            .map(|constructor| constructor())
    }

    pub fn supports(&self, category: Category, subtype: Subtype) -> bool {
        self.constructors.contains_key(&(category, subtype))
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
