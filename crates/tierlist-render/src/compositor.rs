//! Image composition
//!
//! Walks the tiers top to bottom and draws, for each band: the colored label
//! column with the tier letter, the wrapped grid of avatars with their names,
//! and a separator line along the band's bottom edge. CPU-bound and
//! synchronous; the renderer runs it on a blocking worker.

use crate::config::{PaletteConfig, RenderConfig};
use crate::error::RenderError;
use crate::layout::{Band, Layout};
use crate::text::{Anchor, TextBox, TextPainter};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;
use tierlist_domain::{Member, MemberId, RenderSnapshot, Rgb};

/// Names longer than this are shortened.
pub const MAX_NAME_CHARS: usize = 10;

/// Characters kept from a shortened name.
pub const TRUNCATED_NAME_CHARS: usize = 9;

/// Appended to shortened names.
pub const TRUNCATION_MARKER: &str = "..";

/// Gap between the bottom of an avatar and the top of its name
const NAME_GAP: u32 = 2;

/// Thickness of the separator under each band
const SEPARATOR_WIDTH: u32 = 2;

/// An encoded tierlist image
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// PNG bytes
    pub png: Vec<u8>,
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
}

/// Draws a snapshot onto a canvas
pub struct Compositor {
    layout: Layout,
    text: TextPainter,
    palette: PaletteConfig,
    label_font_size: f32,
    name_font_size: f32,
    max_canvas_height: u32,
}

impl Compositor {
    /// Build a compositor; loads fonts
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            layout: Layout::new(&config.layout)?,
            text: TextPainter::new(&config.text),
            palette: config.palette.clone(),
            label_font_size: config.text.label_font_size,
            name_font_size: config.text.name_font_size,
            max_canvas_height: config.max_canvas_height,
        })
    }

    /// Geometry in use
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Draw and encode in one step
    pub fn render_png(
        &self,
        snapshot: &RenderSnapshot,
        avatars: &HashMap<MemberId, Vec<u8>>,
    ) -> Result<EncodedImage, RenderError> {
        let canvas = self.compose(snapshot, avatars)?;
        let (width, height) = canvas.dimensions();
        let png = encode_png(canvas)?;
        Ok(EncodedImage { png, width, height })
    }

    /// Draw the snapshot
    ///
    /// `avatars` holds raw bytes for members whose fetch succeeded. Missing
    /// or undecodable avatars leave an empty cell; the name is still drawn.
    pub fn compose(
        &self,
        snapshot: &RenderSnapshot,
        avatars: &HashMap<MemberId, Vec<u8>>,
    ) -> Result<RgbaImage, RenderError> {
        let plan = self.layout.plan(snapshot);
        let width = self.layout.total_width();
        let height = plan.total_height;

        if height == 0 || height > self.max_canvas_height {
            return Err(RenderError::CanvasAllocation { width, height });
        }
        let mut canvas = RgbaImage::from_pixel(width, height, opaque(self.palette.background));

        for band in &plan.bands {
            self.draw_label(&mut canvas, band);

            for (index, (id, member)) in snapshot.members(band.tier).iter().enumerate() {
                let (x, y) = self.layout.cell_origin(band.top, index);
                if let Some(bytes) = avatars.get(id) {
                    self.draw_avatar(&mut canvas, *id, bytes, x, y);
                }
                self.draw_name(&mut canvas, member, x, y);
            }

            let bottom = band.top + band.height;
            fill_rect(
                &mut canvas,
                0,
                bottom.saturating_sub(SEPARATOR_WIDTH - 1),
                width,
                SEPARATOR_WIDTH,
                opaque(self.palette.outline),
            );
        }

        Ok(canvas)
    }

    fn draw_label(&self, canvas: &mut RgbaImage, band: &Band) {
        let label_width = self.layout.label_width();
        // The label box spans one pixel past the band, like an inclusive
        // rectangle; the next band's box paints over it.
        let box_width = label_width + 1;
        let box_height = band.height + 1;

        fill_rect(canvas, 0, band.top, box_width, box_height, opaque(band.tier.color()));
        outline_rect(canvas, 0, band.top, box_width, box_height, opaque(self.palette.outline));

        let area = TextBox {
            x: 0,
            y: band.top as i64,
            width: label_width,
            height: band.height,
        };
        self.text.draw(
            canvas,
            band.tier.label(),
            area,
            self.label_font_size,
            self.palette.label_text,
            Anchor::Center,
        );
    }

    fn draw_avatar(&self, canvas: &mut RgbaImage, id: MemberId, bytes: &[u8], x: u32, y: u32) {
        let decoded = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!("Error decoding avatar for member {}: {}", id, e);
                return;
            }
        };

        let size = self.layout.avatar_size();
        let avatar = imageops::resize(&decoded.to_rgba8(), size, size, FilterType::Triangle);
        imageops::overlay(canvas, &avatar, x as i64, y as i64);
    }

    fn draw_name(&self, canvas: &mut RgbaImage, member: &Member, x: u32, y: u32) {
        let avatar_size = self.layout.avatar_size();
        let padding = self.layout.padding();
        let name_top = y + avatar_size + NAME_GAP;

        // Widen the box by the padding so names can overhang the avatar a bit.
        let area = TextBox {
            x: x as i64 - (padding / 2) as i64,
            y: name_top as i64,
            width: avatar_size + padding,
            height: self.layout.text_height().saturating_sub(NAME_GAP).max(1),
        };
        self.text.draw(
            canvas,
            &display_name(&member.name),
            area,
            self.name_font_size,
            self.palette.name_text,
            Anchor::TopCenter,
        );
    }
}

/// Shorten a display name for the grid
///
/// # Examples
///
/// ```
/// use tierlist_render::compositor::display_name;
///
/// assert_eq!(display_name("Alice"), "Alice");
/// assert_eq!(display_name("Bartholomew"), "Bartholom..");
/// ```
pub fn display_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let mut short: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
        short.push_str(TRUNCATION_MARKER);
        short
    } else {
        name.to_string()
    }
}

/// Encode a canvas as an opaque RGB PNG
pub fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, RenderError> {
    let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

fn opaque(color: Rgb) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// Fill a rectangle, clipped to the canvas
fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// One-pixel rectangle outline, clipped to the canvas
fn outline_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    if width == 0 || height == 0 {
        return;
    }
    fill_rect(canvas, x, y, width, 1, color);
    fill_rect(canvas, x, y + height - 1, width, 1, color);
    fill_rect(canvas, x, y, 1, height, color);
    fill_rect(canvas, x + width - 1, y, 1, height, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextConfig;
    use tierlist_domain::{Tier, Tierlist};

    fn compositor() -> Compositor {
        Compositor::new(&RenderConfig {
            text: TextConfig {
                load_system_fonts: false,
                ..TextConfig::default()
            },
            ..RenderConfig::default()
        })
        .unwrap()
    }

    fn red_png(size: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_display_name_truncation() {
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("0123456789"), "0123456789");
        assert_eq!(display_name("0123456789A"), "012345678..");
        // Counted in characters, not bytes.
        assert_eq!(display_name("ééééééééééé"), "ééééééééé..");
    }

    #[test]
    fn test_empty_tierlist_dimensions_and_colors() {
        let compositor = compositor();
        let snapshot = Tierlist::new().snapshot("empty");
        let canvas = compositor.compose(&snapshot, &HashMap::new()).unwrap();

        assert_eq!(canvas.dimensions(), (1000, 6 * 120));
        // Label column of the first band carries the S color (away from the letter).
        assert_eq!(*canvas.get_pixel(20, 20), opaque(Tier::S.color()));
        assert_eq!(*canvas.get_pixel(20, 120 + 20), opaque(Tier::A.color()));
        // Content area is background.
        assert_eq!(*canvas.get_pixel(500, 40), opaque([30, 30, 30]));
        // Separator at the bottom of the first band.
        assert_eq!(*canvas.get_pixel(500, 120), opaque([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(500, 119), opaque([0, 0, 0]));
    }

    #[test]
    fn test_letters_and_names_drawn_without_system_fonts() {
        let compositor = compositor();
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), Member::new("Alice", "unreachable"), Tier::S);

        let canvas = compositor.compose(&list.snapshot("t"), &HashMap::new()).unwrap();

        // Tier letter: label-colored glyph pixels inside the S box.
        let letter_pixels = (30..120)
            .flat_map(|x| (20..100).map(move |y| (x, y)))
            .filter(|&(x, y)| *canvas.get_pixel(x, y) != opaque(Tier::S.color()))
            .count();
        assert!(letter_pixels > 0, "tier letter missing");

        // Name row under the empty avatar cell at (160, 10).
        let name_pixels = (155..265)
            .flat_map(|x| (112..130).map(move |y| (x, y)))
            .filter(|&(x, y)| *canvas.get_pixel(x, y) != opaque([30, 30, 30]))
            .count();
        assert!(name_pixels > 0, "member name missing");
    }

    #[test]
    fn test_avatar_is_pasted_at_grid_position() {
        let compositor = compositor();
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), Member::new("Alice", "uri1"), Tier::S);
        list.add_member(MemberId(2), Member::new("Bob", "uri2"), Tier::S);

        let mut avatars = HashMap::new();
        avatars.insert(MemberId(2), red_png(32));

        let canvas = compositor.compose(&list.snapshot("t"), &avatars).unwrap();

        // Bob is second in S: x = 150 + 10 + 110, y = 10.
        assert_eq!(*canvas.get_pixel(270 + 50, 10 + 50), Rgba([255, 0, 0, 255]));
        // Alice had no avatar; her cell stays background.
        assert_eq!(*canvas.get_pixel(160 + 50, 10 + 50), opaque([30, 30, 30]));
    }

    #[test]
    fn test_undecodable_avatar_is_skipped() {
        let compositor = compositor();
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), Member::new("Alice", "uri1"), Tier::F);
        list.add_member(MemberId(2), Member::new("Bob", "uri2"), Tier::F);

        let mut avatars = HashMap::new();
        avatars.insert(MemberId(1), b"not an image".to_vec());
        avatars.insert(MemberId(2), red_png(8));

        let canvas = compositor.compose(&list.snapshot("t"), &avatars).unwrap();
        let f_top = 5 * 120;
        assert_eq!(*canvas.get_pixel(160 + 50, f_top + 60), opaque([30, 30, 30]));
        assert_eq!(*canvas.get_pixel(270 + 50, f_top + 60), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_avatar_blends() {
        let compositor = compositor();
        let mut list = Tierlist::new();
        list.add_member(MemberId(1), Member::new("Ghost", "uri"), Tier::S);

        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        let avatars = HashMap::from([(MemberId(1), buf)]);

        let canvas = compositor.compose(&list.snapshot("t"), &avatars).unwrap();
        assert_eq!(*canvas.get_pixel(210, 60), opaque([30, 30, 30]));
    }

    #[test]
    fn test_canvas_limit() {
        let compositor = Compositor::new(&RenderConfig {
            max_canvas_height: 500,
            text: TextConfig {
                load_system_fonts: false,
                ..TextConfig::default()
            },
            ..RenderConfig::default()
        })
        .unwrap();

        let result = compositor.compose(&Tierlist::new().snapshot("t"), &HashMap::new());
        assert!(matches!(
            result,
            Err(RenderError::CanvasAllocation { width: 1000, height: 720 })
        ));
    }

    #[test]
    fn test_render_png_decodes_back() {
        let compositor = compositor();
        let encoded = compositor
            .render_png(&Tierlist::new().snapshot("t"), &HashMap::new())
            .unwrap();

        assert_eq!(&encoded.png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory_with_format(&encoded.png, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (encoded.width, encoded.height));
    }
}
