// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Glyph metrics are stored in whole pixels as `i32` (offsets, advances) or
//! `u32` (bitmap dimensions). Rasterizers usually work in `f32` pixels or in
//! font units; the helpers here perform those conversions.

use easy_cast::{Cast, CastFloat, Conv};

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Round a pixel measure to the nearest whole pixel
#[inline]
pub fn round_px(x: f32) -> i32 {
    x.cast_nearest()
}

/// Clamp a signed pixel measure at zero
#[inline]
pub fn clamp_px(x: i32) -> u32 {
    x.max(0).cast()
}

/// Convert an unsigned pixel measure to signed, saturating at `i32::MAX`
#[inline]
pub fn signed_px(x: u32) -> i32 {
    i32::conv(x.min(u32::conv(i32::MAX)))
}

/// Scale factor: pixels per font unit
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DPU(pub f32);

impl DPU {
    /// Construct from a pixel size (pixels per Em) and the face's units per Em
    pub fn from_px_size(px_size: u32, units_per_em: u16) -> Self {
        DPU(f32::conv(px_size) / f32::from(units_per_em.max(1)))
    }

    pub(crate) fn i16_to_px(self, x: i16) -> f32 {
        f32::from(x) * self.0
    }
    pub(crate) fn u16_to_px(self, x: u16) -> f32 {
        f32::from(x) * self.0
    }
}
