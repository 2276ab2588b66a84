use ::fontdue::{Font, FontSettings};

use super::{FontSource, RasterizedGlyph, Rasterizer, SizeSpec};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{AtlasError, GlyphError, Result};

/// Pure-Rust rasterizer backed by `fontdue`.
///
/// fontdue scales glyphs uniformly, so when a size asks for different
/// horizontal and vertical scales the vertical one is used and the
/// adjustment is reported.
pub struct FontdueRasterizer {
    font: Font,
    px: f32,
}

impl FontdueRasterizer {
    /// Load the first face of `source` at `size`.
    pub fn open(
        source: &FontSource,
        size: &SizeSpec,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        Self::open_indexed(source, 0, size, diagnostics)
    }

    /// Load face `index` of a font collection at `size`.
    pub fn open_indexed(
        source: &FontSource,
        index: u32,
        size: &SizeSpec,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let (px_w, px_h) = size.pixels_per_em()?;
        if px_w != px_h {
            diagnostics.report(&Diagnostic::SizeAdjusted {
                requested: format!("{size:?}"),
                applied_px: px_h,
            });
        }

        let data = source.read()?;
        let settings = FontSettings {
            collection_index: index,
            scale: px_h,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings)
            .map_err(|e| AtlasError::FaceLoad(e.to_string()))?;
        Ok(Self { font, px: px_h })
    }

    /// Pixels per em glyphs are rasterized at.
    pub fn pixel_size(&self) -> f32 {
        self.px
    }
}

impl Rasterizer for FontdueRasterizer {
    fn rasterize(&mut self, ch: char) -> std::result::Result<RasterizedGlyph, GlyphError> {
        let index = self.font.lookup_glyph_index(ch);
        if index == 0 {
            return Err(GlyphError::MissingGlyph);
        }

        let (metrics, bitmap) = self.font.rasterize_indexed(index, self.px);
        let width = metrics.width as u32;
        let height = metrics.height as u32;
        // fontdue hands back an empty Vec for blank glyphs; report it as "no bitmap".
        let coverage = (width > 0 && height > 0).then_some(bitmap);

        Ok(RasterizedGlyph {
            width,
            height,
            coverage,
            bearing_x: metrics.xmin,
            // ymin is the bottom edge relative to the baseline, positive up.
            bearing_y: metrics.ymin + height as i32,
            advance_x: (metrics.advance_width * 64.0).round() as i32,
            advance_y: 0,
        })
    }
}
