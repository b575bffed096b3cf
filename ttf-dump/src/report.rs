//! Plain text and JSON reports for the inspection subcommands.

use std::fmt;

use serde::Serialize;
use ttf_outline::{
    outline::{GlyphOutline, SvgPen},
    raw::FontRef,
    FontFile, FontMetrics, GlyphId, GlyphMetrics,
};

use crate::Error;

/// Lists the records of the table directory, in file order.
pub fn tables(font: &FontRef) -> String {
    let directory = font.table_directory();
    let mut lines = vec![format!(
        "sfnt version {:#010x}, {} tables",
        directory.sfnt_version(),
        directory.num_tables()
    )];
    lines.extend(directory.table_records().map(|record| {
        format!(
            "{} offset {:>8} length {:>8} checksum {:#010x}",
            record.tag, record.offset, record.length, record.checksum
        )
    }));
    lines.join("\n")
}

/// Font-wide values worth knowing before drawing anything.
#[derive(Clone, Debug, Serialize)]
pub struct FontInfo {
    #[serde(flatten)]
    pub metrics: FontMetrics,
    pub index_to_loc_format: u16,
    pub glyph_data_format: u16,
    pub cmap_format: Option<u16>,
    pub cmap_offset: Option<u32>,
}

impl FontInfo {
    pub fn new(font: &FontFile) -> Self {
        FontInfo {
            metrics: font.metrics(),
            index_to_loc_format: font.index_to_loc_format(),
            glyph_data_format: font.glyph_data_format(),
            cmap_format: font.charmap().format(),
            cmap_offset: font.charmap().index_map_offset(),
        }
    }
}

impl fmt::Display for FontInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "units per em: {}", m.units_per_em)?;
        writeln!(f, "ascender: {}", m.ascender)?;
        writeln!(f, "descender: {}", m.descender)?;
        writeln!(f, "line gap: {}", m.line_gap)?;
        writeln!(
            f,
            "bounds: {} {} {} {}",
            m.bounds.x_min, m.bounds.y_min, m.bounds.x_max, m.bounds.y_max
        )?;
        writeln!(f, "glyphs: {}", m.glyph_count)?;
        writeln!(f, "loca format: {}", self.index_to_loc_format)?;
        writeln!(f, "glyph data format: {}", self.glyph_data_format)?;
        match (self.cmap_format, self.cmap_offset) {
            (Some(format), Some(offset)) => {
                write!(f, "cmap: format {format} at offset {offset}")
            }
            _ => write!(f, "cmap: no supported unicode subtable"),
        }
    }
}

/// Reports font-wide metrics, as text or JSON.
pub fn font_info(font: &FontFile, json: bool) -> Result<String, Error> {
    let info = FontInfo::new(font);
    if json {
        Ok(serde_json::to_string_pretty(&info)?)
    } else {
        Ok(info.to_string())
    }
}

/// Lists every mapping of the selected cmap subtable, by codepoint.
pub fn charmap(font: &FontFile) -> String {
    let charmap = font.charmap();
    let mut lines = vec![match charmap.format() {
        Some(format) => format!("format {format}"),
        None => "no supported unicode subtable".to_string(),
    }];
    lines.extend(
        charmap
            .mappings()
            .map(|(codepoint, gid)| format!("U+{codepoint:04X} {}", gid.to_u32())),
    );
    lines.join("\n")
}

/// How the glyph to report on was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlyphSelector {
    /// The nominal glyph for a character.
    Char(char),
    /// A glyph identifier.
    Id(GlyphId),
}

impl GlyphSelector {
    pub fn resolve(self, font: &FontFile) -> GlyphId {
        match self {
            GlyphSelector::Char(ch) => font.glyph_index(ch),
            GlyphSelector::Id(gid) => gid,
        }
    }
}

#[derive(Serialize)]
struct GlyphReport {
    glyph_id: GlyphId,
    #[serde(flatten)]
    metrics: GlyphMetrics,
    outline: GlyphOutline,
}

/// Reports the metrics and outline of one glyph.
///
/// The text form ends with the outline as SVG path data.
pub fn glyph_report(font: &FontFile, selector: GlyphSelector, json: bool) -> Result<String, Error> {
    let glyph_id = selector.resolve(font);
    let report = GlyphReport {
        glyph_id,
        metrics: font.glyph_metrics(glyph_id)?,
        outline: font.outline(glyph_id)?,
    };
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    let mut pen = SvgPen::new();
    report.outline.draw(&mut pen);
    let bounds = report.metrics.bounds;
    Ok([
        format!("glyph: {}", glyph_id.to_u32()),
        format!("advance: {}", report.metrics.advance_width),
        format!("left side bearing: {}", report.metrics.left_side_bearing),
        format!(
            "bounds: {} {} {} {}",
            bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max
        ),
        format!("path: {}", pen.as_ref()),
    ]
    .join("\n"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ttf_outline::outline::{DrawError, DrawSettings, PathStyle};
    use ttf_test_data::{sample, sample_font, TestFont};

    use super::*;

    #[test]
    fn table_listing() {
        let data = sample_font();
        let font = FontRef::new(&data).unwrap();
        let listing = tables(&font);
        let mut lines = listing.lines();
        assert_eq!(lines.next(), Some("sfnt version 0x00010000, 7 tables"));
        let tags: Vec<_> = lines
            .map(|line| line.split(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(tags.len(), 7);
        for tag in ["head", "maxp", "hhea", "hmtx", "cmap", "loca", "glyf"] {
            assert!(tags.iter().any(|t| t == tag), "missing {tag}");
        }
    }

    #[test]
    fn info_as_json() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&font_info(&font, true).unwrap()).unwrap();
        assert_eq!(json["units_per_em"], 1000);
        assert_eq!(json["ascender"], 800);
        assert_eq!(json["descender"], -200);
        assert_eq!(json["line_gap"], 90);
        assert_eq!(json["glyph_count"], 4);
        assert_eq!(json["index_to_loc_format"], 0);
        assert_eq!(json["cmap_format"], 4);
    }

    #[test]
    fn info_as_text() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let text = font_info(&font, false).unwrap();
        assert!(text.starts_with("units per em: 1000\nascender: 800\n"));
        assert!(text.ends_with(&format!(
            "cmap: format 4 at offset {}",
            font.charmap().index_map_offset().unwrap()
        )));
    }

    #[test]
    fn info_without_unicode_cmap() {
        let data = TestFont::new()
            .glyph(Vec::new(), 100)
            .cmap_table(ttf_test_data::tables::cmap(&[]))
            .build();
        let font = FontFile::new(&data).unwrap();
        let text = font_info(&font, false).unwrap();
        assert!(text.ends_with("cmap: no supported unicode subtable"));
        assert_eq!(charmap(&font), "no supported unicode subtable");
    }

    #[test]
    fn charmap_listing() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        assert_eq!(
            charmap(&font),
            "format 4\nU+0020 2\nU+0041 1\nU+0042 3"
        );
    }

    #[test]
    fn glyph_by_char() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let report = glyph_report(&font, GlyphSelector::Char('A'), false).unwrap();
        assert_eq!(
            report,
            "glyph: 1\n\
             advance: 120\n\
             left side bearing: 0\n\
             bounds: 0 0 100 100\n\
             path: M0,0 L100,0 Q100,100 0,100 L0,0 Z"
        );
    }

    #[test]
    fn unmapped_char_reports_notdef() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let selector = GlyphSelector::Char('z');
        assert_eq!(selector.resolve(&font), GlyphId::NOTDEF);
        let report = glyph_report(&font, selector, false).unwrap();
        assert!(report.starts_with("glyph: 0\nadvance: 500\n"));
    }

    #[test]
    fn glyph_as_json() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let selector = GlyphSelector::Id(GlyphId::from(sample::QUAD));
        let json: serde_json::Value =
            serde_json::from_str(&glyph_report(&font, selector, true).unwrap()).unwrap();
        assert_eq!(json["glyph_id"], 1);
        assert_eq!(json["advance_width"], 120);
        assert_eq!(json["bounds"]["x_max"], 100.0);
        assert_eq!(
            json["outline"]["commands"],
            serde_json::json!(["MoveTo", "LineTo", "QuadTo", "LineTo", "Close"])
        );
        assert_eq!(json["outline"]["coords"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn glyph_out_of_range() {
        let data = sample_font();
        let font = FontFile::new(&data).unwrap();
        let gid = GlyphId::new(40);
        let err = glyph_report(&font, GlyphSelector::Id(gid), false).unwrap_err();
        assert!(matches!(err, Error::Draw(DrawError::IndexOutOfRange(g)) if g == gid));
    }

    #[test]
    fn glyph_respects_settings() {
        let data = TestFont::new()
            .glyph(Vec::new(), 0)
            .glyph(
                ttf_test_data::tables::SimpleGlyph::new()
                    .contour(&[(50, 100, false), (100, 0, true), (0, 0, true)])
                    .to_bytes(),
                100,
            )
            .build();
        let font = FontFile::new(&data)
            .unwrap()
            .with_settings(DrawSettings::new().path_style(PathStyle::FreeType));
        let report = glyph_report(&font, GlyphSelector::Id(GlyphId::new(1)), false).unwrap();
        assert!(report.ends_with("path: M0,0 Q50,100 100,0 L0,0 Z"), "{report}");
    }
}
