#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use ttf_outline::{
    outline::{DrawSettings, GlyphOutline, PathStyle},
    FontFile, GlyphId, GlyphPathCache, PathRenderer, Point,
};

/// Checks that every outline handed over is internally consistent.
struct CheckingRenderer;

impl PathRenderer for CheckingRenderer {
    type Path = usize;

    fn create_path(
        &mut self,
        commands: &[ttf_outline::outline::PathCommand],
        coords: &[Point],
    ) -> usize {
        let expected: usize = commands.iter().map(|c| c.num_coords()).sum();
        assert_eq!(expected, coords.len());
        commands.len()
    }
}

fn do_outline_things(data: &[u8], settings: DrawSettings) -> Result<(), Box<dyn Error>> {
    let font = FontFile::new(data)?.with_settings(settings);
    let _ = font.metrics();

    let mut outline = GlyphOutline::new();
    // one past the end to cover the range check
    for gid in 0..=font.num_glyphs() as u32 {
        let gid = GlyphId::new(gid);
        let before = outline.clone();
        // we don't care about the result, just that we don't panic, hang, etc
        if font.draw(gid, &mut outline).is_err() {
            assert_eq!(before, outline);
        }
        let _ = font.glyph_metrics(gid);
    }

    let mut cache = GlyphPathCache::new();
    for (cp, gid) in font.charmap().mappings().take(512) {
        let _ = cache.get_path(&font, &mut CheckingRenderer, cp, gid);
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_outline_things(data, DrawSettings::new());
    let _ = do_outline_things(
        data,
        DrawSettings::new()
            .path_style(PathStyle::FreeType)
            .apply_component_transforms(false),
    );
});
