// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing and measurement
//!
//! Strings are laid out one code point at a time along a pen position on the
//! baseline. Before drawing each char, the pen is moved by the kerning
//! between the previous and current glyph; after drawing, it advances by the
//! glyph's advance.
//!
//! Where both filled and outline glyphs are in use, the outline glyph is
//! *representative*: its advance and dimensions are used for layout since a
//! stroked outline is at least as large as the filled glyph.

use super::Font;
use crate::conv::clamp_px;
use crate::device::Device;
use crate::raster::{RasterFace, Rasterizer};
use crate::{Glyph, GlyphId, Vec2};
use easy_cast::Conv;

impl<'a, R: Rasterizer, D: Device> Font<'a, R, D> {
    /// Draw a char
    ///
    /// The glyph origin (on the baseline) is placed at `(x, y)`. Each enabled
    /// glyph is drawn with its bitmap's top-left corner at
    /// `(x + left, y - top)`. Returns true if anything was drawn.
    pub fn draw_char(&mut self, c: char, x: f32, y: f32) -> bool {
        let mut pen = Vec2(x, y);
        self.draw_at(c, &mut pen, None).is_some()
    }

    /// Draw a string, starting with the pen at `(x, y)` (on the baseline)
    ///
    /// Returns false if any char failed to draw; the rest are still drawn.
    #[inline]
    pub fn draw_string(&mut self, text: &str, x: f32, y: f32) -> bool {
        self.draw_chars(text.chars(), x, y)
    }

    /// Draw a sequence of chars, starting with the pen at `(x, y)`
    ///
    /// Returns false if any char failed to draw; the rest are still drawn.
    pub fn draw_chars<I: IntoIterator<Item = char>>(&mut self, chars: I, x: f32, y: f32) -> bool {
        let mut pen = Vec2(x, y);
        let mut result = true;
        let mut previous = None;
        for c in chars {
            previous = self.draw_at(c, &mut pen, previous);
            if previous.is_none() {
                result = false;
            }
        }
        result
    }

    /// Width of a char's bitmap, or 0 if it cannot be cached
    pub fn char_width(&mut self, c: char) -> u32 {
        if !self.cache_char(c) {
            return 0;
        }
        self.representative(c).map(|g| g.width()).unwrap_or(0)
    }

    /// Height of a char's bitmap, or 0 if it cannot be cached
    pub fn char_height(&mut self, c: char) -> u32 {
        if !self.cache_char(c) {
            return 0;
        }
        self.representative(c).map(|g| g.height()).unwrap_or(0)
    }

    /// Width of a string in pixels
    ///
    /// This is the sum of advances and kerning, except that the last char
    /// contributes the width of its ink instead of its advance. Chars which
    /// cannot be cached are skipped.
    #[inline]
    pub fn string_width(&mut self, text: &str) -> u32 {
        self.string_width_chars(text.chars())
    }

    /// Width of a sequence of chars in pixels
    ///
    /// See [`Font::string_width`].
    pub fn string_width_chars<I: IntoIterator<Item = char>>(&mut self, chars: I) -> u32 {
        let mut width = 0i32;
        let mut previous = None;
        let mut last = None;
        for c in chars {
            if !self.cache_char(c) {
                continue;
            }
            let Some((id, advance, ink)) = self
                .representative(c)
                .map(|g| (g.glyph_index(), g.x_advance(), g.ink_width()))
            else {
                continue;
            };

            let (kerning, _) = self.kerning_offset(previous, Some(id));
            width += advance + kerning;
            previous = Some(id);
            last = Some((advance, ink));
        }

        if let Some((advance, ink)) = last {
            width += ink - advance;
        }
        clamp_px(width)
    }

    /// Height of a string in pixels
    ///
    /// This is the tallest bitmap of all chars, or 0 if none can be cached.
    #[inline]
    pub fn string_height(&mut self, text: &str) -> u32 {
        self.string_height_chars(text.chars())
    }

    /// Height of a sequence of chars in pixels
    ///
    /// See [`Font::string_height`].
    pub fn string_height_chars<I: IntoIterator<Item = char>>(&mut self, chars: I) -> u32 {
        let mut height = 0;
        for c in chars {
            if !self.cache_char(c) {
                continue;
            }
            if let Some(g) = self.representative(c) {
                height = height.max(g.height());
            }
        }
        height
    }

    /// The glyph used for layout of `c`: outline if enabled, else fill
    fn representative(&self, c: char) -> Option<&Glyph<D::Image>> {
        if self.settings.draws_outline() {
            self.glyph_outline(c)
        } else if self.settings.fill {
            self.glyph(c)
        } else {
            None
        }
    }

    /// Kerning offset between `left` and `right`
    ///
    /// This is zero unless the face and settings both enable kerning and both
    /// glyphs exist.
    fn kerning_offset(&mut self, left: Option<GlyphId>, right: Option<GlyphId>) -> (i32, i32) {
        let (Some(left), Some(right)) = (left, right) else {
            return (0, 0);
        };
        if !self.has_kerning || !self.settings.kerning {
            return (0, 0);
        }
        // Kerning is scaled by the face's active size, which may have been
        // left at another size if every glyph here was already cached.
        if let Err(err) = self.update_size() {
            log::warn!("kerning unavailable: {err}");
            return (0, 0);
        }
        self.face.kerning(left, right).unwrap_or((0, 0))
    }

    /// Draw `c` at the pen, kerned against `previous`, and advance the pen
    ///
    /// Returns the representative glyph's index, or `None` if nothing could
    /// be drawn.
    fn draw_at(&mut self, c: char, pen: &mut Vec2, previous: Option<GlyphId>) -> Option<GlyphId> {
        if !self.cache_char(c) {
            return None;
        }
        let current = self.representative(c).map(|g| g.glyph_index())?;

        let (kx, ky) = self.kerning_offset(previous, Some(current));
        *pen = *pen + Vec2(f32::conv(kx), f32::conv(ky));

        let settings = self.settings;
        let fill = if settings.fill {
            self.glyphs.get(c, settings.size, 0)
        } else {
            None
        };
        let outline = if settings.draws_outline() {
            self.outlines
                .get(c, settings.size, settings.outline_size)
        } else {
            None
        };

        if let Some(g) = fill {
            let x = pen.0 + f32::conv(g.left());
            let y = pen.1 - f32::conv(g.top());
            g.draw(self.device, x, y, settings.color);
        }
        if let Some(g) = outline {
            let x = pen.0 + f32::conv(g.left());
            let y = pen.1 - f32::conv(g.top());
            g.draw(self.device, x, y, settings.outline_color);
        }

        if let Some(g) = outline.or(fill) {
            pen.0 += f32::conv(g.x_advance());
        }
        Some(current)
    }
}
