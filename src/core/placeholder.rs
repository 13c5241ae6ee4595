//! Initials-on-a-circle placeholder logos.
//!
//! Text is drawn with a TrueType font when one can be loaded from disk,
//! otherwise with the Spleen 12x24 bitmap font compiled into the binary.

use crate::utils::error::{LogoError, Result};
use ab_glyph::{point, Font, FontVec, PxScale, Rect, ScaleFont};
use image::{ImageFormat, Rgba, RgbaImage};
use spleen_font::{PSF2Font, FONT_12X24};
use std::io::Cursor;
use std::path::Path;

const BITMAP_CHAR_WIDTH: u32 = 12;
const BITMAP_CHAR_HEIGHT: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderStyle {
    pub size: u32,
    pub circle_color: [u8; 3],
    pub text_color: [u8; 3],
    pub font_size: f32,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            size: 80,
            circle_color: [59, 130, 246],
            text_color: [255, 255, 255],
            font_size: 24.0,
        }
    }
}

enum GlyphFont {
    TrueType(FontVec),
    Bitmap,
}

pub struct PlaceholderGenerator {
    style: PlaceholderStyle,
    font: GlyphFont,
}

impl PlaceholderGenerator {
    /// Loads the font at `font_path` if given, falling back to the built-in bitmap font.
    pub fn new(style: PlaceholderStyle, font_path: Option<&Path>) -> Self {
        let font = match font_path {
            Some(path) => load_truetype(path),
            None => GlyphFont::Bitmap,
        };
        Self { style, font }
    }

    pub fn with_builtin_font(style: PlaceholderStyle) -> Self {
        Self {
            style,
            font: GlyphFont::Bitmap,
        }
    }

    pub fn uses_builtin_font(&self) -> bool {
        matches!(self.font, GlyphFont::Bitmap)
    }

    pub fn style(&self) -> &PlaceholderStyle {
        &self.style
    }

    pub fn render_image(&self, company_name: &str) -> Result<RgbaImage> {
        let size = self.style.size;
        let mut canvas = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 0]));

        let margin = size as f32 / 8.0;
        let center = size as f32 / 2.0;
        draw_filled_circle(
            &mut canvas,
            center,
            center,
            center - margin,
            self.style.circle_color,
        );

        let text = initials(company_name);
        match &self.font {
            GlyphFont::TrueType(font) => self.draw_truetype_text(&mut canvas, font, &text),
            GlyphFont::Bitmap => self.draw_bitmap_text(&mut canvas, &text)?,
        }

        Ok(canvas)
    }

    /// PNG-encoded placeholder for `company_name`.
    pub fn render(&self, company_name: &str) -> Result<Vec<u8>> {
        let canvas = self.render_image(company_name)?;
        let mut bytes = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw_truetype_text(&self, canvas: &mut RgbaImage, font: &FontVec, text: &str) {
        let scale = PxScale::from(self.style.font_size);
        let scaled = font.as_scaled(scale);
        let baseline = scaled.ascent();

        let mut caret_x = 0.0f32;
        let mut outlines = Vec::new();
        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(scale, point(caret_x, baseline));
            caret_x += scaled.h_advance(glyph_id);
            if let Some(outlined) = font.outline_glyph(glyph) {
                outlines.push(outlined);
            }
        }

        // Center the ink box, not the advance box.
        let Some(ink) = outlines
            .iter()
            .map(|o| o.px_bounds())
            .reduce(union_rect)
        else {
            return;
        };

        let size = self.style.size as f32;
        let offset_x = ((size - ink.width()) / 2.0).floor() - ink.min.x;
        let offset_y = ((size - ink.height()) / 2.0).floor() - ink.min.y;

        for outlined in &outlines {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = (bounds.min.x + offset_x) as i32 + px as i32;
                let y = (bounds.min.y + offset_y) as i32 + py as i32;
                blend_at(canvas, x, y, self.style.text_color, coverage);
            });
        }
    }

    fn draw_bitmap_text(&self, canvas: &mut RgbaImage, text: &str) -> Result<()> {
        let mut font = PSF2Font::new(FONT_12X24).map_err(|_| LogoError::RenderError {
            message: "built-in bitmap font could not be parsed".to_string(),
        })?;

        let text_width = text.chars().count() as u32 * BITMAP_CHAR_WIDTH;
        let origin_x = (self.style.size as i32 - text_width as i32) / 2;
        let origin_y = (self.style.size as i32 - BITMAP_CHAR_HEIGHT as i32) / 2;

        let mut cursor_x = origin_x;
        for ch in text.chars() {
            let utf8 = ch.to_string();
            if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on {
                            blend_at(
                                canvas,
                                cursor_x + col_x as i32,
                                origin_y + row_y as i32,
                                self.style.text_color,
                                1.0,
                            );
                        }
                    }
                }
            }
            cursor_x += BITMAP_CHAR_WIDTH as i32;
        }

        Ok(())
    }
}

fn load_truetype(path: &Path) -> GlyphFont {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(
                "Font {} not readable ({}), using built-in bitmap font",
                path.display(),
                e
            );
            return GlyphFont::Bitmap;
        }
    };

    match FontVec::try_from_vec(bytes) {
        Ok(font) => {
            tracing::debug!("Loaded font {}", path.display());
            GlyphFont::TrueType(font)
        }
        Err(e) => {
            tracing::debug!(
                "Font {} is not a usable TrueType font ({}), using built-in bitmap font",
                path.display(),
                e
            );
            GlyphFont::Bitmap
        }
    }
}

/// First letter of each of the first two words, uppercased.
///
/// Names yielding fewer than two letters use their first two characters instead.
pub fn initials(company_name: &str) -> String {
    let from_words: String = company_name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if from_words.chars().count() >= 2 {
        return from_words;
    }

    company_name
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn union_rect(a: Rect, b: Rect) -> Rect {
    Rect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    }
}

fn draw_filled_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 3]) {
    let (width, height) = canvas.dimensions();
    for y in 0..height {
        for x in 0..width {
            let dist = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
            // One pixel of anti-aliasing at the edge.
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_at(canvas, x as i32, y as i32, color, coverage);
            }
        }
    }
}

/// Source-over blend of an opaque `color` with the given coverage.
fn blend_at(canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 3], coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage == 0.0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let dst_alpha = pixel[3] as f32 / 255.0;
    let out_alpha = coverage + dst_alpha * (1.0 - coverage);

    for channel in 0..3 {
        let src = color[channel] as f32;
        let dst = pixel[channel] as f32;
        let value = (src * coverage + dst * dst_alpha * (1.0 - coverage)) / out_alpha;
        pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    pixel[3] = (out_alpha * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_first_two_words() {
        assert_eq!(initials("ABS Jets, a.s."), "AJ");
        assert_eq!(initials("agriKomp Bohemia s.r.o."), "AB");
        assert_eq!(initials("Geomine a.s."), "GA");
        assert_eq!(initials("ČKD Blansko Holding, a.s."), "ČB");
    }

    #[test]
    fn test_initials_fallback_to_leading_characters() {
        assert_eq!(initials("nytron"), "NY");
        assert_eq!(initials("X"), "X");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_render_produces_png_with_circle_on_transparent_canvas() {
        let generator = PlaceholderGenerator::with_builtin_font(PlaceholderStyle::default());
        let bytes = generator.render("ABS Jets, a.s.").unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (80, 80));

        // Corner stays transparent.
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        // Upper part of the circle, above the text.
        assert_eq!(decoded.get_pixel(40, 13), &Rgba([59, 130, 246, 255]));
    }

    #[test]
    fn test_bitmap_fallback_draws_text() {
        let generator = PlaceholderGenerator::new(
            PlaceholderStyle::default(),
            Some(Path::new("/nonexistent/fonts/missing.ttf")),
        );
        assert!(generator.uses_builtin_font());

        let canvas = generator.render_image("KARAT Software a.s.").unwrap();
        let white = canvas
            .pixels()
            .filter(|p| **p == Rgba([255, 255, 255, 255]))
            .count();
        assert!(white > 0);
    }

    #[test]
    fn test_invalid_font_file_falls_back() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a font").unwrap();

        let generator = PlaceholderGenerator::new(PlaceholderStyle::default(), Some(file.path()));
        assert!(generator.uses_builtin_font());
    }

    #[test]
    fn test_custom_size_is_respected() {
        let style = PlaceholderStyle {
            size: 128,
            ..PlaceholderStyle::default()
        };
        let generator = PlaceholderGenerator::with_builtin_font(style);
        let canvas = generator.render_image("HGS, a.s.").unwrap();
        assert_eq!(canvas.dimensions(), (128, 128));
    }
}
