use std::{fmt, path::Path};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use font8x8::{BASIC_FONTS, HIRAGANA_FONTS, LATIN_FONTS, UnicodeFonts};
use image::RgbaImage;

use crate::compositor::canvas::over;

/// Why the caption font could not be loaded.
#[derive(thiserror::Error, Debug)]
pub enum FontError {
    #[error("read font '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse font '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// Font used to draw captions.
///
/// Load it once and share it by reference; it is immutable after construction.
#[derive(Clone)]
pub enum CaptionFont {
    /// A TrueType/OpenType face.
    Outline(FontArc),
    /// The built-in 8×8 bitmap font, scaled by whole pixels.
    Builtin,
}

impl fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("CaptionFont::Outline"),
            Self::Builtin => f.write_str("CaptionFont::Builtin"),
        }
    }
}

/// Pixel extent of a laid-out caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

impl CaptionFont {
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let font = FontArc::try_from_vec(data).map_err(|source| FontError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::Outline(font))
    }

    /// Load the font at `path`, degrading to [`CaptionFont::Builtin`] when it is missing or invalid.
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(font) => font,
            Err(err) => {
                tracing::warn!(error = %err, "caption font unavailable, using built-in bitmap font");
                Self::Builtin
            }
        }
    }

    pub fn builtin() -> Self {
        Self::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Measure `text` at `px` pixels.
    pub fn measure(&self, text: &str, px: f32) -> TextExtent {
        match self {
            Self::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                let mut width = 0.0f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                TextExtent {
                    width: width.ceil().max(0.0) as u32,
                    height: (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32,
                }
            }
            Self::Builtin => {
                let cell = bitmap_cell(px);
                TextExtent {
                    width: cell * text.chars().count() as u32,
                    height: if text.is_empty() { 0 } else { cell },
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`), blending `color` by glyph coverage.
    pub fn draw(
        &self,
        mut canvas: RgbaImage,
        text: &str,
        px: f32,
        x: i64,
        y: i64,
        color: [u8; 4],
    ) -> RgbaImage {
        match self {
            Self::Outline(font) => {
                let scale = PxScale::from(px);
                let scaled = font.as_scaled(scale);
                let baseline = y as f32 + scaled.ascent();
                let mut cursor_x = x as f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        cursor_x += scaled.kern(prev, id);
                    }
                    let glyph = id.with_scale_and_position(scale, point(cursor_x, baseline));
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|gx, gy, coverage| {
                            let px_x = bounds.min.x as i64 + i64::from(gx);
                            let px_y = bounds.min.y as i64 + i64::from(gy);
                            blend(&mut canvas, px_x, px_y, color, coverage);
                        });
                    }
                    cursor_x += scaled.h_advance(id);
                    prev = Some(id);
                }
            }
            Self::Builtin => {
                let cell = bitmap_cell(px);
                let k = i64::from(cell / 8);
                for (n, ch) in text.chars().enumerate() {
                    let glyph = bitmap_glyph(ch);
                    let origin_x = x + n as i64 * i64::from(cell);
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..8u32 {
                            if (bits >> col) & 1 == 0 {
                                continue;
                            }
                            let bx = origin_x + i64::from(col) * k;
                            let by = y + row as i64 * k;
                            for dy in 0..k {
                                for dx in 0..k {
                                    blend(&mut canvas, bx + dx, by + dy, color, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
        canvas
    }
}

/// Draw `text` horizontally centred on the canvas, nudged by `shift_x`, with its top at `y`.
///
/// `y` is clamped to the top edge.
pub fn draw_text_centered(
    canvas: RgbaImage,
    font: &CaptionFont,
    text: &str,
    px: f32,
    shift_x: i64,
    y: i64,
    color: [u8; 4],
) -> RgbaImage {
    if text.is_empty() {
        return canvas;
    }
    let extent = font.measure(text, px);
    let x = (i64::from(canvas.width()) - i64::from(extent.width)).div_euclid(2) + shift_x;
    font.draw(canvas, text, px, x, y.max(0), color)
}

/// Side of one bitmap glyph cell: the 8×8 font scaled by a whole factor.
fn bitmap_cell(px: f32) -> u32 {
    ((px / 8.0).floor() as u32).max(1) * 8
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| HIRAGANA_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or_default()
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    dst.0 = over(dst.0, color, coverage);
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/text.rs"]
mod tests;
