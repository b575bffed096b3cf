use std::path::PathBuf;

use clap::Parser;

use ttf_dump::{Error, GlyphSelector};
use ttf_outline::{
    outline::{DrawSettings, PathStyle},
    raw::FontRef,
    FontFile, GlyphId, GlyphPathCache,
};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Where to start a contour whose first point is off-curve.
#[derive(clap::ValueEnum, Copy, Clone, Default, Debug)]
enum Style {
    /// Start at the following point, like hb-draw.
    #[default]
    Harfbuzz,
    /// Start at the preceding point, like FreeType.
    Freetype,
}

impl From<Style> for PathStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Harfbuzz => PathStyle::HarfBuzz,
            Style::Freetype => PathStyle::FreeType,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List the records of the table directory
    Tables {
        /// Path to a TrueType font file
        font: PathBuf,
    },
    /// Print font-wide metrics
    Info {
        font: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every codepoint to glyph mapping
    Charmap { font: PathBuf },
    /// Print the metrics and outline of a single glyph
    Glyph {
        font: PathBuf,
        /// The character whose nominal glyph is drawn
        #[arg(long = "char", conflicts_with = "gid", required_unless_present = "gid")]
        ch: Option<char>,
        /// The glyph identifier to draw
        #[arg(long)]
        gid: Option<u32>,
        #[arg(long, value_enum, default_value_t)]
        style: Style,
        /// Draw composite components at their own origins
        #[arg(long)]
        no_transforms: bool,
        /// Round implied on-curve points down to whole units
        #[arg(long)]
        floor_midpoints: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Lay out a line of text and print it as an SVG document
    Text {
        font: PathBuf,
        text: String,
        /// Font size in points
        #[arg(long, default_value_t = 20.0)]
        size: f32,
        /// Display resolution in pixels per inch
        #[arg(long, default_value_t = 220.0)]
        dpi: f32,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Tables { font } => {
            let data = ttf_dump::load(&font)?;
            println!("{}", ttf_dump::tables(&FontRef::new(&data)?));
        }
        Command::Info { font, json } => {
            let data = ttf_dump::load(&font)?;
            println!("{}", ttf_dump::font_info(&FontFile::new(&data)?, json)?);
        }
        Command::Charmap { font } => {
            let data = ttf_dump::load(&font)?;
            println!("{}", ttf_dump::charmap(&FontFile::new(&data)?));
        }
        Command::Glyph {
            font,
            ch,
            gid,
            style,
            no_transforms,
            floor_midpoints,
            json,
        } => {
            let data = ttf_dump::load(&font)?;
            let settings = DrawSettings::new()
                .path_style(style.into())
                .apply_component_transforms(!no_transforms)
                .floor_implied_points(floor_midpoints);
            let font = FontFile::new(&data)?.with_settings(settings);
            let selector = match (ch, gid) {
                (Some(ch), _) => GlyphSelector::Char(ch),
                (None, gid) => GlyphSelector::Id(GlyphId::new(gid.unwrap_or_default())),
            };
            println!("{}", ttf_dump::glyph_report(&font, selector, json)?);
        }
        Command::Text {
            font,
            text,
            size,
            dpi,
        } => {
            let data = ttf_dump::load(&font)?;
            let font = FontFile::new(&data)?;
            let mut cache = GlyphPathCache::new();
            let mut renderer = ttf_dump::BezPathRenderer::new();
            let layout = ttf_dump::layout_text(&font, &mut cache, &mut renderer, &text, size, dpi);
            log::debug!(
                "{} glyphs placed from {} paths",
                layout.glyphs.len(),
                renderer.paths_created()
            );
            println!("{}", layout.to_svg());
        }
    }
    Ok(())
}
