//! Label text rasterization
//!
//! Text is laid out and rasterized by resvg from a one-element SVG document,
//! then alpha-blended onto the canvas. The font database is built once and
//! shared by every draw. A public-domain face ships inside the crate and is
//! loaded when nothing else is available.

use crate::config::TextConfig;
use image::{Rgba, RgbaImage};
use resvg::tiny_skia;
use resvg::usvg::{self, fontdb};
use std::sync::Arc;
use tierlist_domain::Rgb;

/// Tuffy Regular, public domain (see `assets/Tuffy-LICENSE.txt`)
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/Tuffy.ttf");

/// Family name of [`BUNDLED_FONT`]
pub const BUNDLED_FAMILY: &str = "Tuffy";

/// Where text sits inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered both ways
    Center,
    /// Horizontally centered, hanging from the top edge
    TopCenter,
}

/// Axis-aligned box on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    /// Left edge
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

/// Draws single-line text with a fixed font preference
pub struct TextPainter {
    fontdb: Arc<fontdb::Database>,
    family: String,
}

impl TextPainter {
    /// Load fonts according to `config`
    pub fn new(config: &TextConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        for path in &config.font_files {
            if let Err(e) = db.load_font_file(path) {
                tracing::warn!("Failed to load font file {}: {}", path.display(), e);
            }
        }

        if db.len() == 0 && config.bundled_fallback {
            tracing::info!("No fonts found; using the bundled {} face", BUNDLED_FAMILY);
            db.load_font_data(BUNDLED_FONT.to_vec());
            db.set_sans_serif_family(BUNDLED_FAMILY);
        }

        if db.len() == 0 {
            tracing::warn!("No fonts available; tier labels and names will not be drawn");
        } else {
            tracing::debug!("Loaded {} font faces", db.len());
        }

        Self {
            fontdb: Arc::new(db),
            family: config.font_family.clone(),
        }
    }

    /// Whether any font face is loaded
    pub fn has_fonts(&self) -> bool {
        self.fontdb.len() > 0
    }

    /// Draw `text` inside `area`, clipped to it
    ///
    /// Returns `false` when nothing could be drawn (no fonts, empty text, or
    /// an SVG error). Never fails the render.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, area: TextBox, size: f32, color: Rgb, anchor: Anchor) -> bool {
        if text.is_empty() || !self.has_fonts() || area.width == 0 || area.height == 0 {
            return false;
        }

        let svg = self.svg_document(text, area, size, color, anchor);
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree = match usvg::Tree::from_str(&svg, &options) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::debug!("Skipping text '{}': {}", text, e);
                return false;
            }
        };

        let Some(mut pixmap) = tiny_skia::Pixmap::new(area.width, area.height) else {
            return false;
        };
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let layer = RgbaImage::from_fn(area.width, area.height, |x, y| {
            let px = pixmap.pixels()[(y * area.width + x) as usize].demultiply();
            Rgba([px.red(), px.green(), px.blue(), px.alpha()])
        });
        image::imageops::overlay(canvas, &layer, area.x, area.y);
        true
    }

    fn svg_document(&self, text: &str, area: TextBox, size: f32, color: Rgb, anchor: Anchor) -> String {
        let x = area.width as f32 / 2.0;
        let (y, baseline) = match anchor {
            Anchor::Center => (area.height as f32 / 2.0, "central"),
            Anchor::TopCenter => (0.0, "hanging"),
        };

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
                r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" "#,
                r#"fill="rgb({r},{g},{b})" text-anchor="middle" dominant-baseline="{baseline}">"#,
                "{text}</text></svg>"
            ),
            w = area.width,
            h = area.height,
            x = x,
            y = y,
            family = escape_xml(&self.family),
            size = size,
            r = color[0],
            g = color[1],
            b = color[2],
            baseline = baseline,
            text = escape_xml(text),
        )
    }
}

/// Escape text for use in SVG content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Requested families, then generic families, then the first loaded face.
fn font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, db| {
            let mut families: Vec<fontdb::Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => fontdb::Family::Monospace,
                    usvg::FontFamily::Named(name) => fontdb::Family::Name(name.as_str()),
                })
                .collect();
            families.push(fontdb::Family::SansSerif);
            families.push(fontdb::Family::Serif);
            families.push(fontdb::Family::Monospace);

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };

            db.query(&query)
                .or_else(|| db.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}
