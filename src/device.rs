// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Graphics device interface
//!
//! The library does not draw anything itself. Rastered glyph images are
//! handed to a [`Device`], which turns them into something it can draw (a
//! texture, sprite or atlas entry) and later draws them tinted at a position.

use crate::{Rgba, Vec2};
use thiserror::Error;

/// The device failed to create an image
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("device failed to create a {width}x{height} glyph image")]
pub struct ImageError {
    pub width: u32,
    pub height: u32,
}

/// A 2D graphics device
///
/// Methods take `&self`: the device is shared by a [`FontManager`] and all of
/// its fonts. Implementations needing mutation should use interior mutability
/// (most GPU device and queue handles already work this way).
///
/// [`FontManager`]: crate::FontManager
pub trait Device {
    /// A renderable image handle
    ///
    /// Dropping the handle must release the underlying resource.
    type Image;

    /// Create an image
    ///
    /// `rgba` has length `4 * size.0 * size.1` and is in row-major order with
    /// straight (non-premultiplied) alpha.
    fn create_image(&self, size: (u32, u32), rgba: &[u8]) -> Result<Self::Image, ImageError>;

    /// Draw `image` with its top-left corner at `pos`, modulated by `color`
    fn draw(&self, image: &Self::Image, pos: Vec2, color: Rgba);
}
