use std::collections::BTreeMap;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{GlyphError, Result};
use crate::expand::coverage_to_rgba;
use crate::metrics::CharacterMetrics;
use crate::options::CharRange;
use crate::rasterizer::{RasterizedGlyph, Rasterizer};

/// Loaded characters, iterated in ascending code point order.
pub type CharacterTable = BTreeMap<char, CharacterMetrics>;

/// Rasterize every character in `range`.
///
/// Characters the rasterizer cannot produce are reported and left out.
/// Whitespace keeps its metrics but gets no pixels.
pub fn build_table<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    range: CharRange,
    diagnostics: &dyn Diagnostics,
) -> Result<CharacterTable> {
    range.validate()?;

    let mut table = CharacterTable::new();
    for ch in range.chars() {
        match load_character(rasterizer, ch) {
            Ok(metrics) => {
                table.insert(ch, metrics);
            }
            Err(error) => {
                diagnostics.report(&Diagnostic::GlyphSkipped { ch, error: &error });
            }
        }
    }
    Ok(table)
}

fn load_character<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    ch: char,
) -> std::result::Result<CharacterMetrics, GlyphError> {
    let RasterizedGlyph {
        width,
        height,
        coverage,
        bearing_x,
        bearing_y,
        advance_x,
        advance_y,
    } = rasterizer.rasterize(ch)?;

    let pixels = if ch.is_whitespace() {
        Vec::new()
    } else {
        coverage_to_rgba(width, height, coverage.as_deref())?
    };

    Ok(CharacterMetrics {
        bitmap_width: width,
        bitmap_height: height,
        bearing_x,
        bearing_y,
        advance_x,
        advance_y,
        cell: None,
        uv: None,
        pixels,
    })
}
