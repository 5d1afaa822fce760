// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font settings

use crate::Rgba;

/// Rendering settings of a [`Font`](crate::Font)
///
/// These are all client-writable settings of a font. They are kept together
/// so that the current configuration may be saved and restored; see
/// [`Font::push`](crate::Font::push) and [`Font::pop`](crate::Font::pop).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Cache and draw filled glyphs
    pub fill: bool,
    /// Cache and draw outline glyphs
    pub outline: bool,
    /// Pixel size (pixels per Em)
    ///
    /// Zero disables caching and drawing.
    pub size: u32,
    /// Outline (stroke radius) size in pixels
    ///
    /// Zero disables outline glyphs.
    pub outline_size: u32,
    /// Apply kerning (if supported by the face)
    pub kerning: bool,
    /// Colour of filled glyphs
    pub color: Rgba,
    /// Colour of outline glyphs
    pub outline_color: Rgba,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fill: true,
            outline: false,
            size: 32,
            outline_size: 1,
            kerning: true,
            color: Rgba::WHITE,
            outline_color: Rgba::BLUE,
        }
    }
}

impl Settings {
    /// True if outline glyphs are used
    ///
    /// This requires both `outline` and a non-zero `outline_size`.
    #[inline]
    pub fn draws_outline(&self) -> bool {
        self.outline && self.outline_size != 0
    }
}

/// A stack of saved [`Settings`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsStack(Vec<Settings>);

impl SettingsStack {
    /// Save a copy of `settings`
    #[inline]
    pub fn push(&mut self, settings: Settings) {
        self.0.push(settings);
    }

    /// Remove and return the most recently saved settings, if any
    #[inline]
    pub fn pop(&mut self) -> Option<Settings> {
        self.0.pop()
    }

    /// Number of saved settings
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(s.fill && !s.outline && s.kerning);
        assert_eq!((s.size, s.outline_size), (32, 1));
        assert_eq!((s.color, s.outline_color), (Rgba::WHITE, Rgba::BLUE));
        assert!(!s.draws_outline());
    }

    #[test]
    fn draws_outline_needs_size() {
        let mut s = Settings {
            outline: true,
            ..Settings::default()
        };
        assert!(s.draws_outline());
        s.outline_size = 0;
        assert!(!s.draws_outline());
    }

    #[test]
    fn stack_is_lifo() {
        let a = Settings::default();
        let b = Settings { size: 12, ..a };
        let mut stack = SettingsStack::default();
        stack.push(a);
        stack.push(b);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(b));
        assert_eq!(stack.pop(), Some(a));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }
}
