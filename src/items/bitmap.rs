use image::{Rgba, RgbaImage};
use serde::Serialize;

use super::palette::Palette;
use crate::containers::compression::rle::PixelSink;
use crate::error::{Error, Result};

/// How pixel values are stored in a bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PixelFormat {
    /// One byte per pixel, indexing into the attached palette
    #[default]
    Paletted,
}

/// A paletted raster image.
///
/// The pixel buffer only exists once [`RasterImage::alloc_pixels`] has
/// succeeded, which requires a palette to be attached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RasterImage {
    width: u16,
    height: u16,
    format: PixelFormat,
    palette: Option<Palette>,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn set_format(&mut self, format: PixelFormat) {
        self.format = format;
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    /// Allocate a zeroed `width * height` pixel buffer, dropping any earlier one.
    pub fn alloc_pixels(&mut self) -> Result<()> {
        if self.palette.is_none() {
            return Err(Error::MissingPalette);
        }
        let count = self.pixel_count();
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| Error::OutOfMemory { bytes: count })?;
        pixels.resize(count, 0);
        self.pixels = pixels;
        Ok(())
    }

    /// Palette indices in row-major order. Empty until allocated.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Writes outside the image, or before allocation, are dropped.
    pub fn set_pixel(&mut self, x: u16, y: u16, index: u8) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = index;
        }
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.width as usize + x as usize;
        (i < self.pixels.len()).then_some(i)
    }

    /// Render through the palette into an opaque RGBA image.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let palette = self.palette.as_ref().ok_or(Error::MissingPalette)?;
        if self.pixels.len() != self.pixel_count() {
            return Err(Error::IncompleteDecode {
                reason: "pixel buffer not allocated",
            });
        }

        let width = self.width as usize;
        Ok(RgbaImage::from_fn(
            self.width as u32,
            self.height as u32,
            |x, y| {
                let colour = palette.get(self.pixels[y as usize * width + x as usize]);
                Rgba([colour.r, colour.g, colour.b, 255])
            },
        ))
    }
}

impl PixelSink for RasterImage {
    fn set_pixel(&mut self, x: u16, y: u16, index: u8) {
        RasterImage::set_pixel(self, x, y, index);
    }
}
