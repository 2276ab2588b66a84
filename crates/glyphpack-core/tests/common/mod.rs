#![allow(dead_code)]

use glyphpack_core::{GlyphError, RasterizedGlyph, Rasterizer};

/// Stand-in for a monospace font: every visible glyph has the same advance,
/// bitmap sizes vary slightly per character, and a few characters can be
/// marked as missing from the face.
pub struct MonospaceRasterizer {
    pub advance_px: u32,
    pub ascent: u32,
    pub missing: Vec<char>,
}

impl MonospaceRasterizer {
    pub fn new(px: u32) -> Self {
        Self {
            advance_px: px / 2 + 1,
            ascent: px,
            missing: Vec::new(),
        }
    }

    pub fn missing(mut self, chars: &[char]) -> Self {
        self.missing.extend_from_slice(chars);
        self
    }
}

impl Rasterizer for MonospaceRasterizer {
    fn rasterize(&mut self, ch: char) -> Result<RasterizedGlyph, GlyphError> {
        if self.missing.contains(&ch) {
            return Err(GlyphError::MissingGlyph);
        }
        let advance_x = (self.advance_px * 64) as i32;
        if ch.is_whitespace() {
            return Ok(RasterizedGlyph {
                advance_x,
                ..Default::default()
            });
        }

        let code = ch as u32;
        let width = self.advance_px - code % 3;
        let height = if ch.is_ascii_lowercase() {
            self.ascent * 3 / 4
        } else {
            self.ascent - code % 2
        };
        let coverage = (0..width * height)
            .map(|i| ((i * 37 + code) % 256) as u8)
            .collect();
        Ok(RasterizedGlyph {
            width,
            height,
            coverage: Some(coverage),
            bearing_x: (code % 2) as i32,
            bearing_y: height as i32,
            advance_x,
            advance_y: 0,
        })
    }
}
