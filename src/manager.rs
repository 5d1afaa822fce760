// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font manager

use crate::device::Device;
use crate::raster::{RasterError, Rasterizer};
use crate::Font;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Font manager errors
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("font manager is not initialized")]
    NotInitialized,
    #[error("font load error")]
    Raster(#[from] RasterError),
}

/// Font identifier
///
/// Identifies a font loaded by a [`FontManager`]. Identifiers are unique over
/// all managers, thus a manager never mistakes another manager's font for
/// one of its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontId(u64);

impl FontId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        FontId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get as `u64`
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Owner of the rasterizer library and all loaded fonts
///
/// The manager must be [initialized](Self::initialize) with a device before
/// loading fonts. Dropping the manager (or calling
/// [`deinitialize`](Self::deinitialize)) drops all fonts and then closes the
/// library.
pub struct FontManager<'a, R: Rasterizer, D: Device> {
    config: R::Config,
    device: Option<&'a D>,
    // Fonts are listed before the library so that they are dropped first
    fonts: Vec<(FontId, Font<'a, R, D>)>,
    library: Option<R>,
}

impl<'a, R: Rasterizer, D: Device> FontManager<'a, R, D> {
    /// Construct (uninitialized)
    ///
    /// `config` is used to open the library on [`Self::initialize`].
    pub fn new(config: R::Config) -> Self {
        FontManager {
            config,
            device: None,
            fonts: Vec::new(),
            library: None,
        }
    }

    /// Access the rasterizer configuration
    #[inline]
    pub fn config(&self) -> &R::Config {
        &self.config
    }

    /// True if initialized
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.library.is_some()
    }

    /// Initialize: open the rasterizer library
    ///
    /// This must be called before loading fonts. If already initialized, the
    /// manager is first deinitialized, unloading all fonts.
    pub fn initialize(&mut self, device: &'a D) -> Result<(), RasterError> {
        self.deinitialize();
        let library = R::open(&self.config)?;
        self.library = Some(library);
        self.device = Some(device);
        Ok(())
    }

    /// Unload all fonts and close the library
    ///
    /// This is called on drop. It may be called any number of times.
    pub fn deinitialize(&mut self) {
        self.unload_fonts();
        self.device = None;
        if self.library.take().is_some() {
            log::debug!("FontManager: closed rasterizer library");
        }
    }

    /// Load a font from a file
    pub fn load_font<P: AsRef<Path>>(&mut self, path: P) -> Result<FontId, ManagerError> {
        let (Some(library), Some(device)) = (self.library.as_ref(), self.device) else {
            return Err(ManagerError::NotInitialized);
        };

        let path = path.as_ref();
        let font = match Font::new(device, library, path) {
            Ok(font) => font,
            Err(err) => {
                log::error!("Failed to load font {}: {err}", path.display());
                return Err(err.into());
            }
        };

        let id = FontId::next();
        log::debug!("FontManager: loaded {} as {id:?}", path.display());
        self.fonts.push((id, font));
        Ok(id)
    }

    /// Unload a font
    ///
    /// Does nothing (returning false) if `id` is not a font of this manager.
    pub fn unload_font(&mut self, id: FontId) -> bool {
        match self.fonts.iter().position(|(font_id, _)| *font_id == id) {
            Some(index) => {
                self.fonts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Unload all fonts
    pub fn unload_fonts(&mut self) {
        while self.fonts.pop().is_some() {}
    }

    /// Access a font
    pub fn font(&self, id: FontId) -> Option<&Font<'a, R, D>> {
        self.fonts
            .iter()
            .find(|(font_id, _)| *font_id == id)
            .map(|(_, font)| font)
    }

    /// Access a font mutably
    pub fn font_mut(&mut self, id: FontId) -> Option<&mut Font<'a, R, D>> {
        self.fonts
            .iter_mut()
            .find(|(font_id, _)| *font_id == id)
            .map(|(_, font)| font)
    }

    /// True if `id` is a font of this manager
    #[inline]
    pub fn contains(&self, id: FontId) -> bool {
        self.font(id).is_some()
    }

    /// Identifiers of all loaded fonts, in load order
    pub fn ids(&self) -> impl Iterator<Item = FontId> + '_ {
        self.fonts.iter().map(|(id, _)| *id)
    }

    /// Iterate over loaded fonts, in load order
    pub fn fonts(&self) -> impl Iterator<Item = (FontId, &Font<'a, R, D>)> + '_ {
        self.fonts.iter().map(|(id, font)| (*id, font))
    }

    /// Number of loaded fonts
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl<'a, R: Rasterizer, D: Device> Drop for FontManager<'a, R, D> {
    fn drop(&mut self) {
        self.deinitialize();
    }
}
