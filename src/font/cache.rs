// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph cache

use crate::Glyph;
use smallvec::SmallVec;
use std::collections::HashMap;

/// A cache of rastered glyphs
///
/// Glyphs are bucketed by code point. A bucket holds one glyph per
/// `(size, outline_size)` in use, which is usually very few, so buckets are
/// searched linearly. Filled glyphs have `outline_size == 0`.
#[derive(Debug)]
pub struct GlyphCache<I> {
    buckets: HashMap<char, SmallVec<[Glyph<I>; 1]>>,
}

impl<I> Default for GlyphCache<I> {
    fn default() -> Self {
        GlyphCache {
            buckets: HashMap::new(),
        }
    }
}

impl<I> GlyphCache<I> {
    /// Construct an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the glyph for `c` rastered at `size` and `outline_size`
    pub fn get(&self, c: char, size: u32, outline_size: u32) -> Option<&Glyph<I>> {
        self.buckets
            .get(&c)?
            .iter()
            .find(|g| g.size() == size && g.outline_size() == outline_size)
    }

    /// True if a glyph for `c` at `size` and `outline_size` is cached
    #[inline]
    pub fn contains(&self, c: char, size: u32, outline_size: u32) -> bool {
        self.get(c, size, outline_size).is_some()
    }

    /// Insert a glyph for `c`
    ///
    /// A glyph for `c` with the same size and outline size is replaced.
    pub fn insert(&mut self, c: char, glyph: Glyph<I>) -> &Glyph<I> {
        let bucket = self.buckets.entry(c).or_default();
        let key = (glyph.size(), glyph.outline_size());
        match bucket
            .iter()
            .position(|g| (g.size(), g.outline_size()) == key)
        {
            Some(index) => {
                bucket[index] = glyph;
                &bucket[index]
            }
            None => {
                bucket.push(glyph);
                &bucket[bucket.len() - 1]
            }
        }
    }

    /// Number of cached glyphs
    pub fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop all glyphs (and their images)
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Bitmap;
    use crate::GlyphId;

    fn glyph(advance: i32, size: u32, outline_size: u32) -> Glyph<()> {
        Glyph::configure(
            &Bitmap::empty(),
            None,
            0,
            0,
            advance,
            GlyphId(1),
            size,
            outline_size,
        )
    }

    #[test]
    fn lookup_matches_size_and_outline() {
        let mut cache = GlyphCache::new();
        cache.insert('a', glyph(10, 16, 0));
        cache.insert('a', glyph(20, 32, 0));
        cache.insert('a', glyph(30, 32, 2));

        assert_eq!(cache.get('a', 16, 0).map(|g| g.x_advance()), Some(10));
        assert_eq!(cache.get('a', 32, 0).map(|g| g.x_advance()), Some(20));
        assert_eq!(cache.get('a', 32, 2).map(|g| g.x_advance()), Some(30));
        assert!(cache.get('a', 32, 1).is_none());
        assert!(cache.get('a', 24, 0).is_none());
        assert!(cache.get('b', 16, 0).is_none());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut cache = GlyphCache::new();
        cache.insert('x', glyph(10, 16, 0));
        let g = cache.insert('x', glyph(11, 16, 0));
        assert_eq!(g.x_advance(), 11);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties() {
        let mut cache = GlyphCache::new();
        cache.insert('x', glyph(10, 16, 0));
        cache.insert('y', glyph(10, 16, 0));
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(!cache.contains('x', 16, 0));
    }
}
