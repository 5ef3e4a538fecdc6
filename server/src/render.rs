pub mod font;

use std::fs::{self, OpenOptions};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::color::{hex_to_rgb, Color, ColorError};
use crate::palette::{Palette, PaletteGroup, PALETTE_LEN};
use font::Fonts;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;
pub const SWATCH_IMAGE_SIZE: u32 = 100;

const PADDING: i32 = 20;
const SPACING: i32 = 10;
const TITLE_HEIGHT: i32 = 22;
const SWATCH_HEIGHT: i32 = 40;
const LABEL_STRIP_HEIGHT: i32 = 16;
const GROUP_GAP: i32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([0x2c, 0x2f, 0x33]);
const SEPARATOR: Rgb<u8> = Rgb([0x4a, 0x4a, 0x4a]);
const TEXT: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const LABEL_STRIP: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);

const MAX_NAME_ATTEMPTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("expected {expected} colors, got {actual}")]
    ColorCount { expected: usize, actual: usize },
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("no free file name in '{0}'")]
    NamesExhausted(PathBuf),
}

/// Placement of one swatch on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwatchSlot {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupLayout {
    pub group: PaletteGroup,
    pub title_y: i32,
    pub swatches: Vec<SwatchSlot>,
    /// Separator drawn below the group; absent for the last group.
    pub separator_y: Option<i32>,
}

/// Computes the fixed top-to-bottom layout of the five palette groups.
pub fn palette_layout() -> Vec<GroupLayout> {
    let available = CANVAS_WIDTH as i32 - 2 * PADDING;
    let last = PaletteGroup::ALL.len() - 1;
    let mut y = PADDING;

    PaletteGroup::ALL
        .iter()
        .enumerate()
        .map(|(index, &group)| {
            let title_y = y;
            y += TITLE_HEIGHT;

            let count = group.range().len() as i32;
            let width = (available - (count - 1) * SPACING) / count;
            let swatches = (0..count)
                .map(|i| SwatchSlot {
                    x: PADDING + i * (width + SPACING),
                    y,
                    width: width as u32,
                    height: SWATCH_HEIGHT as u32,
                })
                .collect();

            y += SWATCH_HEIGHT + GROUP_GAP;
            let separator_y = (index != last).then_some(y - GROUP_GAP / 2);

            GroupLayout {
                group,
                title_y,
                swatches,
                separator_y,
            }
        })
        .collect()
}

/// Rasterizes palettes and stores them as uniquely named PNG files.
pub struct PaletteRenderer {
    output_dir: PathBuf,
    fonts: Fonts,
}

impl PaletteRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_fonts(output_dir, Fonts::load())
    }

    pub fn with_fonts(output_dir: impl Into<PathBuf>, fonts: Fonts) -> Self {
        Self {
            output_dir: output_dir.into(),
            fonts,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render_palette(&self, palette: &Palette) -> Result<PathBuf, RenderError> {
        self.render(&palette.to_hex_strings())
    }

    /// Draws the twelve colors and writes them to a new file, returning its
    /// path. The path is only returned once the file is completely written.
    pub fn render<S: AsRef<str>>(&self, colors: &[S]) -> Result<PathBuf, RenderError> {
        let canvas = self.draw(colors)?;
        let png = encode_png(&canvas)?;
        self.persist(&png)
    }

    pub fn draw<S: AsRef<str>>(&self, colors: &[S]) -> Result<RgbImage, RenderError> {
        if colors.len() != PALETTE_LEN {
            return Err(RenderError::ColorCount {
                expected: PALETTE_LEN,
                actual: colors.len(),
            });
        }
        let colors = colors
            .iter()
            .map(|hex| hex_to_rgb(hex.as_ref()))
            .collect::<Result<Vec<Color>, _>>()?;

        let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        for layout in palette_layout() {
            self.fonts
                .heading
                .draw(&mut canvas, PADDING, layout.title_y, layout.group.title(), TEXT);

            let members = &colors[layout.group.range()];
            for (slot, &color) in layout.swatches.iter().zip(members) {
                self.draw_swatch(&mut canvas, *slot, color);
            }

            if let Some(y) = layout.separator_y {
                let y = y as f32;
                let right = (CANVAS_WIDTH as i32 - PADDING) as f32;
                draw_line_segment_mut(&mut canvas, (PADDING as f32, y), (right, y), SEPARATOR);
            }
        }

        Ok(canvas)
    }

    fn draw_swatch(&self, canvas: &mut RgbImage, slot: SwatchSlot, color: Color) {
        let fill = Rect::at(slot.x, slot.y).of_size(slot.width, slot.height);
        draw_filled_rect_mut(canvas, fill, Rgb(color.channels()));

        let strip_y = slot.y + slot.height as i32 - LABEL_STRIP_HEIGHT;
        let strip = Rect::at(slot.x, strip_y).of_size(slot.width, LABEL_STRIP_HEIGHT as u32);
        draw_filled_rect_mut(canvas, strip, LABEL_STRIP);

        self.fonts
            .label
            .draw(canvas, slot.x + 5, strip_y + 2, &color.to_hex(), TEXT);
    }

    fn persist(&self, png: &[u8]) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.output_dir)?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.output_dir.join(unique_filename());
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "palette file name taken, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if let Err(err) = file.write_all(png).and_then(|()| file.sync_all()) {
                drop(file);
                if let Err(cleanup) = fs::remove_file(&path) {
                    warn!(
                        path = %path.display(),
                        ?cleanup,
                        "failed to remove partial palette image"
                    );
                }
                return Err(err.into());
            }

            info!(path = %path.display(), bytes = png.len(), "wrote palette image");
            return Ok(path);
        }

        Err(RenderError::NamesExhausted(self.output_dir.clone()))
    }
}

/// `palette_<8 hex digits>.png`
pub fn unique_filename() -> String {
    let id: u32 = rand::rng().random();
    format!("palette_{id:08x}.png")
}

/// Encodes a square PNG filled with a single color.
pub fn swatch_png(color: Color) -> Result<Vec<u8>, RenderError> {
    let image = RgbImage::from_pixel(SWATCH_IMAGE_SIZE, SWATCH_IMAGE_SIZE, Rgb(color.channels()));
    encode_png(&image)
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
