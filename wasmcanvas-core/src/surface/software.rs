//! Software framebuffer implementation of [`Surface`].

use fontdue::{Font, FontSettings};

use super::{Alignment, Surface};
use crate::color::Rgba;

const WHITE: Rgba = Rgba {
    r: 0xFF,
    g: 0xFF,
    b: 0xFF,
    a: 0xFF,
};

/// In-memory rendering target backed by a `width * height` RGBA framebuffer.
///
/// Text needs a font: supply TTF/OTF bytes via [`SoftwareSurface::load_font`]
/// (font choice belongs to the embedding application, not the bridge). Without
/// one, text draw calls log a warning and render nothing.
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    framebuffer: Vec<u32>,

    font: Option<Font>,
    font_px: u32,
    alignment: Alignment,
    fill_color: Rgba,
    stroke_color: Rgba,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            framebuffer: vec![0; (width as usize) * (height as usize)],
            font: None,
            font_px: 16,
            alignment: Alignment::default(),
            fill_color: WHITE,
            stroke_color: WHITE,
        }
    }

    /// Load the font used by text draw calls.
    pub fn load_font(&mut self, ttf_bytes: &[u8]) -> Result<(), anyhow::Error> {
        let font = Font::from_bytes(ttf_bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("failed to parse font: {e}"))?;
        self.font = Some(font);
        Ok(())
    }

    /// Packed-RGBA pixel at `(x, y)`, or `None` off-surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.framebuffer[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    pub fn clear(&mut self, color: Rgba) {
        self.framebuffer.fill(color.to_packed());
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.framebuffer[(y as u32 * self.width + x as u32) as usize] = color.to_packed();
        }
    }

    fn parse_style(&self, color: &str, previous: Rgba) -> Rgba {
        match Rgba::parse_hex(color) {
            Some(c) => c,
            None => {
                log::warn!("ignoring unparseable style `{color}`");
                previous
            }
        }
    }

    fn rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        // Clip in i64: the module controls these arguments, and x + width can
        // exceed i32 range.
        let x_start = x.max(0) as i64;
        let y_start = y.max(0) as i64;
        let x_end = (x as i64 + width as i64).min(self.width as i64);
        let y_end = (y as i64 + height as i64).min(self.height as i64);

        if x_start >= x_end || y_start >= y_end {
            return;
        }

        let fb_w = self.width as usize;
        let packed = color.to_packed();
        for row in y_start..y_end {
            let start = (row as usize) * fb_w + (x_start as usize);
            let end = (row as usize) * fb_w + (x_end as usize);
            self.framebuffer[start..end].fill(packed);
        }
    }

    /// Advance-width sum at the current font size. Zero without a font.
    fn measure(&self, text: &str) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };
        text.chars()
            .map(|ch| font.metrics(ch, self.font_px as f32).advance_width)
            .sum()
    }

    fn aligned_origin(&self, text: &str, x: i32) -> f32 {
        let width = self.measure(text);
        match self.alignment {
            Alignment::Left => x as f32,
            Alignment::Center => x as f32 - width / 2.0,
            Alignment::Right => x as f32 - width,
        }
    }

    /// Rasterize `text` with `(x, y)` on the baseline, blending glyph
    /// coverage over the framebuffer.
    fn text(&mut self, text: &str, x: i32, y: i32, color: Rgba) {
        let px = self.font_px as f32;
        let mut pen_x = self.aligned_origin(text, x);
        let Some(font) = self.font.as_ref() else {
            log::warn!("text draw call before any font was loaded; skipping");
            return;
        };

        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, px);

            let glyph_x = pen_x as i32 + metrics.xmin;
            let glyph_y = y - metrics.ymin - metrics.height as i32;

            for (i, &alpha) in coverage.iter().enumerate() {
                if alpha == 0 || metrics.width == 0 {
                    continue;
                }
                let gx = glyph_x + (i % metrics.width) as i32;
                let gy = glyph_y + (i / metrics.width) as i32;
                if gx < 0 || gx >= self.width as i32 || gy < 0 || gy >= self.height as i32 {
                    continue;
                }

                let idx = (gy as u32 * self.width + gx as u32) as usize;
                let bg = Rgba::from_packed(self.framebuffer[idx]);
                let a = alpha as u32;
                let inv = 255 - a;
                let blend = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * inv) / 255) as u8;

                self.framebuffer[idx] = Rgba {
                    r: blend(color.r, bg.r),
                    g: blend(color.g, bg.g),
                    b: blend(color.b, bg.b),
                    a: 0xFF,
                }
                .to_packed();
            }

            pen_x += metrics.advance_width;
        }
    }
}

impl Surface for SoftwareSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_font_size(&mut self, px: u32) {
        self.font_px = px;
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_color = self.parse_style(color, self.fill_color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke_color = self.parse_style(color, self.stroke_color);
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) {
        self.text(text, x, y, self.fill_color);
    }

    fn stroke_text(&mut self, text: &str, x: i32, y: i32) {
        // No vector outlines in the software rasterizer; outline text renders
        // as coverage in the stroke color.
        self.text(text, x, y, self.stroke_color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.rect(x, y, width, height, self.fill_color);
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let color = self.stroke_color;
        // Far-edge origins computed in i64; a saturated origin sits past the
        // surface and clips to nothing.
        let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let bottom = clamp(y as i64 + height as i64 - 1);
        let right = clamp(x as i64 + width as i64 - 1);
        // One-pixel edges: top, bottom, left, right.
        self.rect(x, y, width, 1, color);
        self.rect(x, bottom, width, 1, color);
        self.rect(x, y, 1, height, color);
        self.rect(right, y, 1, height, color);
    }
}
