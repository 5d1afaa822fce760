// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph caching and string drawing
//!
//! This library sits between an outline rasterizer and a 2D graphics device.
//! A [`FontManager`] opens the rasterizer library and loads [`Font`]s; each
//! font rasters characters on demand (filled and/or stroked outline variants),
//! caches the resulting [`Glyph`]s by code point, pixel size and outline size,
//! and draws strings glyph-by-glyph with kerning.
//!
//! The rasterizer and device are described by the traits in [`raster`] and
//! [`device`]. A rasterizer built on `ttf-parser` and `swash` is provided as
//! [`raster::SwashRasterizer`].
//!
//! ```no_run
//! # use glyph_text::{Device, FontManager, ImageError, Rgba, Vec2};
//! # use glyph_text::raster::{Config, SwashRasterizer};
//! # struct Screen;
//! # impl Device for Screen {
//! #     type Image = ();
//! #     fn create_image(&self, _: (u32, u32), _: &[u8]) -> Result<(), ImageError> { Ok(()) }
//! #     fn draw(&self, _: &(), _: Vec2, _: Rgba) {}
//! # }
//! let screen = Screen;
//! let mut manager = FontManager::<SwashRasterizer, _>::new(Config::default());
//! manager.initialize(&screen).unwrap();
//! let id = manager.load_font("DejaVuSans.ttf").unwrap();
//! let font = manager.font_mut(id).unwrap();
//!
//! font.push();
//! font.set_size(26);
//! font.set_outline(true);
//! font.draw_string("Hello", 5.0, 26.0);
//! font.pop();
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod conv;

mod data;
pub use data::*;

pub mod device;
pub use device::{Device, ImageError};

pub mod raster;

mod glyph;
pub use glyph::{rasterize_bitmap, Glyph};

mod font;
pub use font::{Font, GlyphCache, Settings, SettingsStack};

mod manager;
pub use manager::{FontId, FontManager, ManagerError};
