//! Software renderer for headless screenshots of a scrolled viewport.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Tokens → Layout → DisplayList → Render
//!                                   ↓
//!                                 Pixels
//! ```
//!
//! It knows nothing about markup or line breaking. It draws the words of a
//! display list that fall inside the viewport, each anchored at its top-left
//! corner and shifted up by the scroll offset.

use std::path::Path;

use anyhow::Result;
use fontdue::Font;
use image::{ImageBuffer, Rgba, RgbaImage};
use log::debug;
use wren_layout::{DisplayList, PlacedItem};

use crate::font_metrics::FontSet;
use crate::viewport::Viewport;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Software renderer that draws a display list into a pixel buffer.
pub struct Renderer {
    /// RGBA pixel buffer
    buffer: RgbaImage,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Faces used to rasterize words
    fonts: FontSet,
}

impl Renderer {
    /// Create a renderer with a white canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32, fonts: FontSet) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, BACKGROUND),
            width,
            height,
            fonts,
        }
    }

    /// Create a renderer matching the size of `viewport`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_viewport(viewport: &Viewport, fonts: FontSet) -> Self {
        Self::new(viewport.width as u32, viewport.height as u32, fonts)
    }

    /// Clear the canvas and draw every visible item of `display_list`.
    ///
    /// Returns the number of words drawn. Words whose style has no face in
    /// the renderer's [`FontSet`] are skipped and not counted.
    pub fn render(&mut self, display_list: &DisplayList, viewport: &Viewport) -> usize {
        for pixel in self.buffer.pixels_mut() {
            *pixel = BACKGROUND;
        }

        let mut drawn = 0;
        for item in viewport.visible_items(display_list) {
            if self.draw_item(item, viewport.scroll) {
                drawn += 1;
            }
        }
        debug!("render: {drawn} of {} items visible", display_list.len());
        drawn
    }

    /// Draw one word with its top-left corner at `(x, y - scroll)`.
    ///
    /// Returns `false` if no face is available for the word's style.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_item(&mut self, item: &PlacedItem, scroll: f32) -> bool {
        let key = item.font.key();
        let Some(font) = self.fonts.face(key).cloned() else {
            return false;
        };
        let font_size = key.size as f32;

        let mut cursor_x = item.x;
        let baseline = item.y - scroll + item.font.ascent();

        for ch in item.word.chars() {
            if ch.is_control() {
                continue;
            }

            let (metrics, bitmap) = font.rasterize(ch, font_size);

            // fontdue gives the bitmap's offset from the pen position on
            // the baseline.
            let glyph_x = cursor_x as i32 + metrics.xmin;
            let glyph_y = baseline as i32 - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = bitmap[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if px >= 0 && py >= 0 && (px as u32) < self.width && (py as u32) < self.height
                    {
                        let bg = *self.buffer.get_pixel(px as u32, py as u32);
                        self.buffer
                            .put_pixel(px as u32, py as u32, alpha_blend(TEXT_COLOR, bg, alpha));
                    }
                }
            }

            cursor_x += advance(&font, ch, font_size);
        }
        true
    }

    /// The rendered pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Save the rendered image to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer.save(path).map_err(|e| {
            anyhow::anyhow!("failed to save screenshot to '{}': {e}", path.display())
        })?;
        Ok(())
    }
}

fn advance(font: &Font, ch: char, font_size: f32) -> f32 {
    font.metrics(ch, font_size).advance_width
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
