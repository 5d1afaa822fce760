// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rastered glyphs

use crate::conv::{signed_px, to_usize};
use crate::device::{Device, ImageError};
use crate::raster::{Bitmap, RenderedGlyph};
use crate::{GlyphId, Rgba, Vec2};

/// Convert a coverage bitmap to a device image
///
/// Each pixel becomes white with alpha equal to its coverage (straight alpha).
/// The conversion is written to `scratch`, which is grown as required.
///
/// Returns `Ok(None)` for an empty bitmap: such glyphs (e.g. space) have
/// metrics but nothing to draw.
pub fn rasterize_bitmap<D: Device>(
    device: &D,
    bitmap: &Bitmap,
    scratch: &mut Vec<u8>,
) -> Result<Option<D::Image>, ImageError> {
    if bitmap.is_empty() {
        return Ok(None);
    }

    let width = to_usize(bitmap.width);
    let pitch = to_usize(bitmap.pitch);
    debug_assert!(pitch >= width);
    debug_assert!(bitmap.buffer.len() >= pitch * (to_usize(bitmap.rows) - 1) + width);

    scratch.clear();
    scratch.reserve(4 * width * to_usize(bitmap.rows));
    for y in 0..to_usize(bitmap.rows) {
        let row = &bitmap.buffer[y * pitch..y * pitch + width];
        for &coverage in row {
            scratch.extend_from_slice(&[0xff, 0xff, 0xff, coverage]);
        }
    }

    device
        .create_image((bitmap.width, bitmap.rows), scratch)
        .map(Some)
}

/// A rastered glyph
///
/// A glyph is the rastered form of one code point at one pixel size and (for
/// outline glyphs) one outline size. It is immutable once constructed and
/// owns its device image.
#[derive(Debug)]
pub struct Glyph<I> {
    width: u32,
    height: u32,
    glyph_index: GlyphId,
    x_advance: i32,
    left: i32,
    top: i32,
    size: u32,
    outline_size: u32,
    image: Option<I>,
}

impl<I> Glyph<I> {
    /// Construct from a bitmap, its image and metrics
    ///
    /// `outline_size` is zero for filled glyphs.
    ///
    /// A stroked outline may be wider than the advance reported for the glyph,
    /// which would make neighbouring glyphs overlap. For outline glyphs with a
    /// non-zero advance smaller than the bitmap width, the advance is widened
    /// to `max(x_advance + outline_size, width + 1)`.
    #[allow(clippy::too_many_arguments)]
    pub fn configure(
        bitmap: &Bitmap,
        image: Option<I>,
        left: i32,
        top: i32,
        x_advance: i32,
        glyph_index: GlyphId,
        size: u32,
        outline_size: u32,
    ) -> Self {
        let width = signed_px(bitmap.width);
        let mut x_advance = x_advance;
        if x_advance != 0 && outline_size != 0 && x_advance < width {
            let outline_size = signed_px(outline_size);
            x_advance = (x_advance.saturating_add(outline_size)).max(width.saturating_add(1));
        }

        Glyph {
            width: bitmap.width,
            height: bitmap.rows,
            glyph_index,
            x_advance,
            left,
            top,
            size,
            outline_size,
            image,
        }
    }

    /// Raster `rendered` to a device image and construct
    pub fn rasterize<D: Device<Image = I>>(
        device: &D,
        rendered: &RenderedGlyph,
        scratch: &mut Vec<u8>,
        glyph_index: GlyphId,
        size: u32,
        outline_size: u32,
    ) -> Result<Self, ImageError> {
        let image = rasterize_bitmap(device, &rendered.bitmap, scratch)?;
        Ok(Glyph::configure(
            &rendered.bitmap,
            image,
            rendered.left,
            rendered.top,
            rendered.advance,
            glyph_index,
            size,
            outline_size,
        ))
    }

    /// Draw with the bitmap's top-left corner at `(x, y)`
    ///
    /// Glyphs without ink draw nothing.
    pub fn draw<D: Device<Image = I>>(&self, device: &D, x: f32, y: f32, color: Rgba) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        if let Some(image) = self.image.as_ref() {
            device.draw(image, Vec2(x, y), color);
        }
    }

    /// Bitmap width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height (rows) in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Glyph index within the face (used for kerning)
    #[inline]
    pub fn glyph_index(&self) -> GlyphId {
        self.glyph_index
    }

    /// Horizontal advance in pixels
    #[inline]
    pub fn x_advance(&self) -> i32 {
        self.x_advance
    }

    /// Offset from the pen to the left edge of the bitmap
    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Distance from the baseline up to the top of the bitmap
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Pixel size rastered at
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Outline size rastered at (zero for filled glyphs)
    #[inline]
    pub fn outline_size(&self) -> u32 {
        self.outline_size
    }

    /// The device image, if the glyph has ink
    #[inline]
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Width of the ink, i.e. the bitmap width as a signed measure
    #[inline]
    pub(crate) fn ink_width(&self) -> i32 {
        signed_px(self.width)
    }
}
