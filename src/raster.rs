// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rasterizer interface
//!
//! A [`Rasterizer`] is a library context able to open font faces
//! ([`RasterFace`]) and allocate [`Stroker`]s. A face rasters glyphs to 8-bit
//! coverage [`Bitmap`]s, either filled ([`RasterFace::render_glyph`]) or via
//! an [`Outline`] which may be stroked before rastering.
//!
//! [`SwashRasterizer`] is the provided implementation.

use crate::device::ImageError;
use crate::GlyphId;
use std::path::Path;
use thiserror::Error;

mod backend;
pub use backend::{SwashFace, SwashOutline, SwashRasterizer, SwashStroker};

/// Rasterizer errors
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("failed to read font file")]
    Io(#[from] std::io::Error),
    #[error("font load error")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("font face is not scalable")]
    NotScalable,
    #[error("font face has no character map")]
    NoCharmap,
    #[error("failed to allocate stroker")]
    Stroker,
    #[error("invalid pixel size {0}")]
    InvalidSize(u32),
    #[error("failed to render glyph {0:?}")]
    Render(GlyphId),
    #[error("glyph {0:?} has no outline")]
    NoOutline(GlyphId),
    #[error(transparent)]
    Image(#[from] ImageError),
}

bitflags::bitflags! {
    /// Capabilities of a loaded face
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FaceFlags: u8 {
        /// The face has scalable outlines
        const SCALABLE = 1 << 0;
        /// The face has a character map
        const CHARMAP = 1 << 1;
        /// The face has kerning data
        const KERNING = 1 << 2;
    }
}

/// Configuration of [`SwashRasterizer`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Use hinting when rastering
    pub hinting: bool,
    /// Index of the face to load from font collections
    pub face_index: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hinting: true,
            face_index: 0,
        }
    }
}

/// An 8-bit coverage bitmap
///
/// Row `y` starts at byte `y * pitch` of `buffer`; only the first `width`
/// bytes of each row are used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub rows: u32,
    pub pitch: u32,
    pub buffer: Vec<u8>,
}

impl Bitmap {
    /// Construct an empty bitmap (a glyph without ink)
    pub fn empty() -> Self {
        Bitmap::default()
    }

    /// True if the bitmap has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows == 0
    }
}

/// A rastered glyph and its metrics
///
/// All metrics are in whole pixels. `left` is the offset from the pen to the
/// left edge of the bitmap; `top` is the distance from the baseline up to the
/// top row of the bitmap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedGlyph {
    pub bitmap: Bitmap,
    pub left: i32,
    pub top: i32,
    pub advance: i32,
}

/// Stroke line caps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke line joins
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Stroker configuration
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeStyle {
    /// Stroke radius in pixels (half the stroke width)
    pub radius: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Rasterizer library context
///
/// Dropping the library closes it. Faces and strokers opened from a library
/// do not borrow it, but should be dropped first.
pub trait Rasterizer: Sized {
    /// Library configuration
    type Config;
    type Face: RasterFace<Stroker = Self::Stroker>;
    type Stroker: Stroker;

    /// Open the library
    fn open(config: &Self::Config) -> Result<Self, RasterError>;

    /// Open a font face from a file
    fn open_face(&self, path: &Path) -> Result<Self::Face, RasterError>;

    /// Allocate a stroker
    fn new_stroker(&self) -> Result<Self::Stroker, RasterError>;
}

/// An outline stroker
pub trait Stroker {
    /// Set stroke radius, cap and join
    fn set(&mut self, style: StrokeStyle);
}

/// A loaded font face
pub trait RasterFace {
    type Stroker;
    type Outline: Outline<Stroker = Self::Stroker>;

    /// Face capabilities
    fn flags(&self) -> FaceFlags;

    /// Set the active size, in pixels per Em
    fn set_pixel_size(&mut self, px: u32) -> Result<(), RasterError>;

    /// Get the glyph index for a char
    ///
    /// Returns [`GlyphId::MISSING`] if the face does not map `c`.
    fn glyph_index(&self, c: char) -> GlyphId;

    /// Raster a filled glyph at the active size
    fn render_glyph(&mut self, id: GlyphId) -> Result<RenderedGlyph, RasterError>;

    /// Load the (unrendered) outline of a glyph at the active size
    fn load_outline(&mut self, id: GlyphId) -> Result<Self::Outline, RasterError>;

    /// Raster an outline, consuming it
    fn rasterize_outline(&mut self, outline: Self::Outline)
        -> Result<RenderedGlyph, RasterError>;

    /// Kerning vector in pixels for the pair `(left, right)` at the active size
    ///
    /// Returns `None` if the face has no kerning data for the pair.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<(i32, i32)>;
}

/// An unrendered glyph outline
///
/// An outline handle is owned: operations consume it, and dropping it
/// releases it.
pub trait Outline: Sized {
    type Stroker;

    /// Replace the outline by its stroke
    fn stroke(self, stroker: &Self::Stroker) -> Result<Self, RasterError>;
}
