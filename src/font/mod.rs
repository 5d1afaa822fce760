// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Fonts: settings, glyph caching and drawing
//!
//! In this module a *char* refers to the combination of a filled glyph and/or
//! an outline glyph for one code point, while a *glyph* is either one of
//! these.
//!
//! ### Caching
//!
//! Glyphs are rastered on demand and cached by code point, pixel size and
//! (for outline glyphs) outline size. Filled and outline glyphs are cached
//! independently. Changing settings never invalidates the cache: glyphs for
//! other sizes remain cached and are used again when the settings are
//! restored (e.g. by [`Font::pop`]). Use [`Font::clear_cache`] to release
//! them.
//!
//! The face's pixel size and the stroker's radius are only reconfigured when
//! the requested size differs from the last one applied.

use crate::device::Device;
use crate::raster::{FaceFlags, LineCap, LineJoin, Outline, RasterError};
use crate::raster::{RasterFace, Rasterizer, StrokeStyle, Stroker};
use crate::{Glyph, Rgba};
use easy_cast::Conv;
use std::path::Path;

mod cache;
mod layout;
mod settings;

pub use cache::GlyphCache;
pub use settings::{Settings, SettingsStack};

/// A loaded font face with glyph caches
///
/// Fonts are created by a [`FontManager`](crate::FontManager). A font draws to
/// the manager's [`Device`], which it borrows for lifetime `'a`.
pub struct Font<'a, R: Rasterizer, D: Device> {
    device: &'a D,
    face: R::Face,
    stroker: R::Stroker,
    has_kerning: bool,
    settings: Settings,
    stack: SettingsStack,
    // Size last applied to `face` (0: none)
    face_size: u32,
    // Outline size last applied to `stroker` (0: none)
    stroker_size: u32,
    glyphs: GlyphCache<D::Image>,
    outlines: GlyphCache<D::Image>,
    scratch: Vec<u8>,
}

impl<'a, R: Rasterizer, D: Device> std::fmt::Debug for Font<'a, R, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("has_kerning", &self.has_kerning)
            .field("settings", &self.settings)
            .field("stack", &self.stack)
            .field("glyphs", &self.glyphs.len())
            .field("outlines", &self.outlines.len())
            .finish_non_exhaustive()
    }
}

/// Construction
impl<'a, R: Rasterizer, D: Device> Font<'a, R, D> {
    /// Load a font face from `path`
    ///
    /// Only scalable faces with a character map are supported.
    pub(crate) fn new(device: &'a D, library: &R, path: &Path) -> Result<Self, RasterError> {
        let face = library.open_face(path)?;
        let flags = face.flags();
        if !flags.contains(FaceFlags::CHARMAP) {
            return Err(RasterError::NoCharmap);
        }
        if !flags.contains(FaceFlags::SCALABLE) {
            return Err(RasterError::NotScalable);
        }
        let stroker = library.new_stroker()?;

        Ok(Font {
            device,
            face,
            stroker,
            has_kerning: flags.contains(FaceFlags::KERNING),
            settings: Settings::default(),
            stack: SettingsStack::default(),
            face_size: 0,
            stroker_size: 0,
            glyphs: GlyphCache::new(),
            outlines: GlyphCache::new(),
            scratch: Vec::new(),
        })
    }

    /// True if the face supports kerning
    #[inline]
    pub fn has_kerning(&self) -> bool {
        self.has_kerning
    }
}

/// Settings
impl<'a, R: Rasterizer, D: Device> Font<'a, R, D> {
    /// Current settings
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace all settings
    #[inline]
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// If true, filled glyphs are cached and drawn
    #[inline]
    pub fn set_fill(&mut self, fill: bool) {
        self.settings.fill = fill;
    }

    /// If true, outline glyphs are cached and drawn
    #[inline]
    pub fn set_outline(&mut self, outline: bool) {
        self.settings.outline = outline;
    }

    /// Set the pixel size
    ///
    /// The absolute value is used. Size zero disables caching and drawing.
    #[inline]
    pub fn set_size(&mut self, size: i32) {
        self.settings.size = size.unsigned_abs();
    }

    /// Set the outline size
    ///
    /// The absolute value is used. Size zero disables outline glyphs.
    #[inline]
    pub fn set_outline_size(&mut self, size: i32) {
        self.settings.outline_size = size.unsigned_abs();
    }

    #[inline]
    pub fn set_color(&mut self, color: Rgba) {
        self.settings.color = color;
    }

    #[inline]
    pub fn set_outline_color(&mut self, color: Rgba) {
        self.settings.outline_color = color;
    }

    /// Enable or disable kerning
    ///
    /// Kerning is only applied if the face also supports it.
    #[inline]
    pub fn set_kerning(&mut self, kerning: bool) {
        self.settings.kerning = kerning;
    }

    #[inline]
    pub fn fill(&self) -> bool {
        self.settings.fill
    }

    #[inline]
    pub fn outline(&self) -> bool {
        self.settings.outline
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.settings.size
    }

    #[inline]
    pub fn outline_size(&self) -> u32 {
        self.settings.outline_size
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.settings.color
    }

    #[inline]
    pub fn outline_color(&self) -> Rgba {
        self.settings.outline_color
    }

    #[inline]
    pub fn kerning(&self) -> bool {
        self.settings.kerning
    }

    /// Save the current settings
    ///
    /// Each `push` should be paired with a later [`Font::pop`].
    pub fn push(&mut self) {
        self.stack.push(self.settings);
    }

    /// Restore the most recently saved settings
    ///
    /// Does nothing if no settings are saved.
    pub fn pop(&mut self) {
        if let Some(settings) = self.stack.pop() {
            self.settings = settings;
        }
    }

    /// Number of saved settings
    #[inline]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

/// Caching
impl<'a, R: Rasterizer, D: Device> Font<'a, R, D> {
    /// Cache a char
    ///
    /// Caches the filled glyph (if fill is enabled) and the outline glyph (if
    /// outline is enabled with non-zero outline size) for `c` at the current
    /// settings. Returns true only if every requested glyph is cached.
    pub fn cache_char(&mut self, c: char) -> bool {
        let mut result = true;
        if self.settings.fill && !self.cache_glyph(c) {
            result = false;
        }
        if self.settings.draws_outline() && !self.cache_glyph_outline(c) {
            result = false;
        }
        result
    }

    /// Cache each char of `text`
    ///
    /// Returns true only if every char was cached.
    #[inline]
    pub fn cache_string(&mut self, text: &str) -> bool {
        self.cache_chars(text.chars())
    }

    /// Cache each char of a sequence
    ///
    /// Returns true only if every char was cached.
    pub fn cache_chars<I: IntoIterator<Item = char>>(&mut self, chars: I) -> bool {
        let mut result = true;
        for c in chars {
            if !self.cache_char(c) {
                result = false;
            }
        }
        result
    }

    /// Drop all cached glyphs
    ///
    /// Settings are not affected.
    pub fn clear_cache(&mut self) {
        self.glyphs.clear();
        self.outlines.clear();
    }

    /// Number of cached filled glyphs (over all sizes)
    #[inline]
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of cached outline glyphs (over all sizes)
    #[inline]
    pub fn cached_outlines(&self) -> usize {
        self.outlines.len()
    }

    /// Get the cached filled glyph for `c` at the current size
    pub fn glyph(&self, c: char) -> Option<&Glyph<D::Image>> {
        self.glyphs.get(c, self.settings.size, 0)
    }

    /// Get the cached outline glyph for `c` at the current size and outline size
    pub fn glyph_outline(&self, c: char) -> Option<&Glyph<D::Image>> {
        self.outlines
            .get(c, self.settings.size, self.settings.outline_size)
    }

    /// Cache the filled glyph for `c` at the current size
    ///
    /// Returns false if the size is zero or rastering fails. If the face does
    /// not map `c`, its missing glyph is cached instead.
    pub fn cache_glyph(&mut self, c: char) -> bool {
        if self.settings.size == 0 {
            return false;
        }
        if self.glyphs.contains(c, self.settings.size, 0) {
            return true;
        }

        match self.raster_glyph(c) {
            Ok(glyph) => {
                self.glyphs.insert(c, glyph);
                true
            }
            Err(err) => {
                log::warn!(
                    "failed to cache glyph {c:?} at {}px: {err}",
                    self.settings.size
                );
                false
            }
        }
    }

    /// Cache the outline glyph for `c` at the current size and outline size
    ///
    /// Returns false if the size or outline size is zero or rastering fails.
    pub fn cache_glyph_outline(&mut self, c: char) -> bool {
        if self.settings.size == 0 || self.settings.outline_size == 0 {
            return false;
        }
        let (size, outline_size) = (self.settings.size, self.settings.outline_size);
        if self.outlines.contains(c, size, outline_size) {
            return true;
        }

        match self.raster_glyph_outline(c) {
            Ok(glyph) => {
                self.outlines.insert(c, glyph);
                true
            }
            Err(err) => {
                log::warn!(
                    "failed to cache outline {c:?} at {}px, outline {}px: {err}",
                    self.settings.size,
                    self.settings.outline_size,
                );
                false
            }
        }
    }

    /// Apply the current size to the face, if changed
    fn update_size(&mut self) -> Result<(), RasterError> {
        if self.settings.size != self.face_size {
            self.face.set_pixel_size(self.settings.size)?;
            self.face_size = self.settings.size;
        }
        Ok(())
    }

    /// Apply the current outline size to the stroker, if changed
    fn update_outline_size(&mut self) {
        if self.settings.outline_size != self.stroker_size {
            self.stroker.set(StrokeStyle {
                radius: f32::conv(self.settings.outline_size),
                cap: LineCap::Round,
                join: LineJoin::Round,
            });
            self.stroker_size = self.settings.outline_size;
        }
    }

    fn raster_glyph(&mut self, c: char) -> Result<Glyph<D::Image>, RasterError> {
        self.update_size()?;

        // An unmapped char uses the face's missing glyph (usually a box)
        let id = self.face.glyph_index(c);
        if id.is_missing() {
            log::debug!("no glyph for {c:?}; using the missing glyph");
        }

        let rendered = self.face.render_glyph(id)?;
        let glyph = Glyph::rasterize(
            self.device,
            &rendered,
            &mut self.scratch,
            id,
            self.settings.size,
            0,
        )?;
        Ok(glyph)
    }

    fn raster_glyph_outline(&mut self, c: char) -> Result<Glyph<D::Image>, RasterError> {
        self.update_size()?;
        self.update_outline_size();

        let id = self.face.glyph_index(c);
        if id.is_missing() {
            log::debug!("no glyph for {c:?}; using the missing glyph");
        }

        // The outline handle is consumed by each step and dropped on error
        let outline = self.face.load_outline(id)?;
        let outline = outline.stroke(&self.stroker)?;
        let rendered = self.face.rasterize_outline(outline)?;

        let glyph = Glyph::rasterize(
            self.device,
            &rendered,
            &mut self.scratch,
            id,
            self.settings.size,
            self.settings.outline_size,
        )?;
        Ok(glyph)
    }
}
