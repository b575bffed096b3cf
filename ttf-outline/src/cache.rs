//! Memoization of renderer paths for frequently drawn characters.

use std::collections::HashMap;

use ttf_read::types::{GlyphId, Point};

use crate::{
    outline::{DrawError, GlyphOutline, PathCommand},
    FontFile,
};

/// A consumer of outlines that builds its own path objects.
pub trait PathRenderer {
    /// Handle to a path owned by the renderer.
    type Path: Clone;

    /// Builds a path from commands and the coordinates they consume, in
    /// font units.
    fn create_path(&mut self, commands: &[PathCommand], coords: &[Point<f32>]) -> Self::Path;
}

/// Caches renderer paths by codepoint.
///
/// Only codepoints up to [`max_codepoint`](Self::max_codepoint) are cached.
/// Entries are never evicted.
#[derive(Clone, Debug)]
pub struct GlyphPathCache<P> {
    paths: HashMap<u32, P>,
    max_codepoint: u32,
    scratch: GlyphOutline,
}

impl<P> Default for GlyphPathCache<P> {
    fn default() -> Self {
        Self::with_max_codepoint(Self::DEFAULT_MAX_CODEPOINT)
    }
}

impl<P> GlyphPathCache<P> {
    /// Highest codepoint cached by [`GlyphPathCache::new`].
    pub const DEFAULT_MAX_CODEPOINT: u32 = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache for codepoints up to and including `max_codepoint`.
    pub fn with_max_codepoint(max_codepoint: u32) -> Self {
        Self {
            paths: HashMap::new(),
            max_codepoint,
            scratch: GlyphOutline::new(),
        }
    }

    pub fn max_codepoint(&self) -> u32 {
        self.max_codepoint
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.paths.contains_key(&codepoint)
    }
}

impl<P: Clone> GlyphPathCache<P> {
    /// Returns the path for `codepoint`, drawing `glyph_id` and asking the
    /// renderer to build it on a cache miss.
    ///
    /// The glyph is assumed to be the one `codepoint` maps to; it is not
    /// consulted on a cache hit. Draw errors are returned and leave the
    /// cache unchanged.
    pub fn get_path<R>(
        &mut self,
        font: &FontFile<'_>,
        renderer: &mut R,
        codepoint: u32,
        glyph_id: GlyphId,
    ) -> Result<P, DrawError>
    where
        R: PathRenderer<Path = P>,
    {
        let cacheable = codepoint <= self.max_codepoint;
        if cacheable {
            if let Some(path) = self.paths.get(&codepoint) {
                log::trace!("path cache hit for U+{codepoint:04X}");
                return Ok(path.clone());
            }
        }
        log::trace!("path cache miss for U+{codepoint:04X}, drawing {glyph_id}");
        self.scratch.clear();
        font.draw(glyph_id, &mut self.scratch)?;
        let path = renderer.create_path(self.scratch.commands(), self.scratch.coords());
        if cacheable {
            self.paths.insert(codepoint, path.clone());
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::{sample, sample_font};

    use super::*;

    /// Renderer that counts calls and returns the number of commands.
    #[derive(Default)]
    struct CountingRenderer {
        calls: usize,
    }

    impl PathRenderer for CountingRenderer {
        type Path = usize;

        fn create_path(&mut self, commands: &[PathCommand], coords: &[Point<f32>]) -> usize {
            self.calls += 1;
            let expected: usize = commands.iter().map(|c| c.num_coords()).sum();
            assert_eq!(coords.len(), expected);
            commands.len()
        }
    }

    #[test]
    fn second_request_is_served_from_cache() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut cache = GlyphPathCache::new();
        let gid = font.glyph_index('A');
        let first = cache.get_path(&font, &mut renderer, 'A' as u32, gid).unwrap();
        let second = cache.get_path(&font, &mut renderer, 'A' as u32, gid).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 5);
        assert_eq!(renderer.calls, 1);
        assert!(cache.contains('A' as u32));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn high_codepoints_are_not_cached() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut cache = GlyphPathCache::with_max_codepoint(0x40);
        let gid = GlyphId::from(sample::QUAD);
        cache.get_path(&font, &mut renderer, 0x41, gid).unwrap();
        cache.get_path(&font, &mut renderer, 0x41, gid).unwrap();
        assert_eq!(renderer.calls, 2);
        assert!(cache.is_empty());
        // the boundary itself is cached
        cache.get_path(&font, &mut renderer, 0x40, gid).unwrap();
        cache.get_path(&font, &mut renderer, 0x40, gid).unwrap();
        assert_eq!(renderer.calls, 3);
    }

    #[test]
    fn empty_glyphs_are_cached() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut cache = GlyphPathCache::new();
        let gid = font.glyph_index(' ');
        assert_eq!(gid, GlyphId::from(sample::SPACE));
        assert_eq!(cache.get_path(&font, &mut renderer, 0x20, gid), Ok(0));
        assert_eq!(cache.get_path(&font, &mut renderer, 0x20, gid), Ok(0));
        assert_eq!(renderer.calls, 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut cache = GlyphPathCache::new();
        let bad = GlyphId::new(100);
        assert_eq!(
            cache.get_path(&font, &mut renderer, 0x41, bad),
            Err(DrawError::IndexOutOfRange(bad))
        );
        assert_eq!(renderer.calls, 0);
        assert!(cache.is_empty());
        // a later success for the same codepoint is cached
        let gid = GlyphId::from(sample::QUAD);
        cache.get_path(&font, &mut renderer, 0x41, gid).unwrap();
        assert!(cache.contains(0x41));
    }
}
