//! Text drawing for palette images. TrueType fonts are preferred; a 5x7
//! bitmap font is always available so rendering never fails on missing fonts.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, warn};

const HEADING_FONT_FILE: &str = "DejaVuSans-Bold.ttf";
const LABEL_FONT_FILE: &str = "DejaVuSans.ttf";
const SYSTEM_FONT_DIR: &str = "/usr/share/fonts/truetype/dejavu";

const HEADING_PX: f32 = 16.0;
const LABEL_PX: f32 = 12.0;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_ADVANCE: u32 = 6;

pub enum Typeface {
    TrueType { font: FontVec, scale: PxScale },
    Bitmap { scale: u32 },
}

impl Typeface {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap { .. })
    }

    pub fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self {
            Self::TrueType { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text)
            }
            Self::Bitmap { scale } => draw_bitmap_text(canvas, x, y, *scale, text, color),
        }
    }
}

/// Heading and label faces used by the palette renderer.
pub struct Fonts {
    pub heading: Typeface,
    pub label: Typeface,
}

impl Fonts {
    /// Looks for DejaVu Sans in the system and user font directories.
    pub fn load() -> Self {
        let mut search_dirs = vec![PathBuf::from(SYSTEM_FONT_DIR)];
        if let Some(user_fonts) = dirs::font_dir() {
            search_dirs.push(user_fonts);
        }
        Self::load_from(&search_dirs)
    }

    pub fn load_from(dirs: &[PathBuf]) -> Self {
        let heading = find_font(dirs, HEADING_FONT_FILE);
        let label = find_font(dirs, LABEL_FONT_FILE);

        match (heading, label) {
            (Some(heading), Some(label)) => Self {
                heading: Typeface::TrueType {
                    font: heading,
                    scale: PxScale::from(HEADING_PX),
                },
                label: Typeface::TrueType {
                    font: label,
                    scale: PxScale::from(LABEL_PX),
                },
            },
            _ => {
                warn!(?dirs, "TrueType fonts unavailable, using bitmap font");
                Self::bitmap()
            }
        }
    }

    pub fn bitmap() -> Self {
        Self {
            heading: Typeface::Bitmap { scale: 2 },
            label: Typeface::Bitmap { scale: 1 },
        }
    }
}

fn find_font(dirs: &[PathBuf], file_name: &str) -> Option<FontVec> {
    dirs.iter()
        .map(|dir| dir.join(file_name))
        .find_map(|path| load_font(&path))
}

fn load_font(path: &Path) -> Option<FontVec> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            debug!(path = %path.display(), %err, "font not readable");
            return None;
        }
    };

    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid font file");
            None
        }
    }
}

/// Width in pixels of `text` drawn with the bitmap font.
#[cfg(test)]
fn bitmap_text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_WIDTH)) * scale
}

fn draw_bitmap_text(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    scale: u32,
    text: &str,
    color: Rgb<u8>,
) {
    let step = scale as i32;
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0b10000 >> col) != 0 {
                        let px = pen_x + col as i32 * step;
                        let py = y + row as i32 * step;
                        let dot = Rect::at(px, py).of_size(scale, scale);
                        draw_filled_rect_mut(canvas, dot, color);
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE as i32 * step;
    }
}

/// Row-major 5x7 glyphs; bit 4 is the leftmost column. Lowercase letters
/// share the uppercase shapes.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        '0' => [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
        '1' => [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
        '2' => [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
        '3' => [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
        '4' => [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
        '5' => [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
        '6' => [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
        '7' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
        '9' => [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
        'A' => [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'B' => [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e],
        'C' => [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e],
        'D' => [0x1c, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1c],
        'E' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f],
        'F' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10],
        'G' => [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f],
        'H' => [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'I' => [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f],
        'M' => [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'P' => [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10],
        'Q' => [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d],
        'R' => [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11],
        'S' => [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e],
        'T' => [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a],
        'X' => [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0a, 0x04, 0x04, 0x04],
        'Z' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f],
        '#' => [0x0a, 0x0a, 0x1f, 0x0a, 0x1f, 0x0a, 0x0a],
        '&' => [0x0c, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0d],
        '-' => [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}
