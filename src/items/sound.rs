use serde::Serialize;
use std::fmt;

use super::{Category, Item, ItemFactory, Subtype};
use crate::binary_utils::EndianCursor;
use crate::error::{Error, Result};
use crate::formats::sniff;

/// Encoding of a sound clip, as detected from its leading bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SoundType {
    #[default]
    None,
    Wave,
    XMidi,
    Midi,
    Ogg,
    Mp3,
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundType::None => "none",
            SoundType::Wave => "wave",
            SoundType::XMidi => "xmidi",
            SoundType::Midi => "midi",
            SoundType::Ogg => "ogg",
            SoundType::Mp3 => "mp3",
        };
        f.write_str(name)
    }
}

/// A sound clip. Only its type is known; the payload stays undecoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sound {
    sound_type: SoundType,
}

impl Sound {
    pub fn new(sound_type: SoundType) -> Self {
        Self { sound_type }
    }

    pub fn sound_type(&self) -> SoundType {
        self.sound_type
    }

    /// Sniff the clip at the cursor and build the matching item.
    ///
    /// Returns `Ok(None)` for wrapped containers of an unknown kind. The
    /// cursor position is the same on return as on entry.
    pub fn find_sub_type(
        cursor: &mut EndianCursor<'_>,
        factory: &ItemFactory,
    ) -> Result<Option<Sound>> {
        let Some(sound_type) = sniff::classify(cursor) else {
            return Ok(None);
        };

        let subtype = Subtype::Sound(sound_type);
        match factory.create(Category::Sound, subtype) {
            Some(Item::Sound(sound)) => Ok(Some(sound)),
            _ => Err(Error::UnsupportedSubtype {
                category: Category::Sound,
                subtype,
            }),
        }
    }
}
