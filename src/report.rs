//! JSON summaries of decoded items, as printed by `legacy-res info --json`.

use std::path::Path;

use serde::Serialize;

use crate::items::{Category, PixelFormat, RasterImage, SoundType};

#[derive(Serialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceReport {
    Bitmap(BitmapReport),
    Sound(SoundReport),
    Rejected(RejectedReport),
}

#[derive(Serialize, Debug)]
pub struct BitmapReport {
    pub file: String,
    pub category: Category,
    pub width: u16,
    pub height: u16,
    pub format: PixelFormat,
    /// Number of distinct palette indices used by the pixels.
    pub colours_used: usize,
}

#[derive(Serialize, Debug)]
pub struct SoundReport {
    pub file: String,
    pub category: Category,
    pub sound_type: SoundType,
}

#[derive(Serialize, Debug)]
pub struct RejectedReport {
    pub file: String,
    pub reason: String,
}

impl ResourceReport {
    pub fn bitmap(path: &Path, bitmap: &RasterImage) -> Self {
        let mut seen = [false; 256];
        for &index in bitmap.pixels() {
            seen[index as usize] = true;
        }

        ResourceReport::Bitmap(BitmapReport {
            file: path.display().to_string(),
            category: Category::Bitmap,
            width: bitmap.width(),
            height: bitmap.height(),
            format: bitmap.format(),
            colours_used: seen.iter().filter(|&&s| s).count(),
        })
    }

    pub fn sound(path: &Path, sound_type: SoundType) -> Self {
        ResourceReport::Sound(SoundReport {
            file: path.display().to_string(),
            category: Category::Sound,
            sound_type,
        })
    }

    pub fn rejected(path: &Path, reason: impl ToString) -> Self {
        ResourceReport::Rejected(RejectedReport {
            file: path.display().to_string(),
            reason: reason.to_string(),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
