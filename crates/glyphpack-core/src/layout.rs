//! Uniform-grid atlas packing.
//!
//! Every visible glyph gets a cell of the same size, large enough for the
//! widest and tallest glyph in the table. The grid is square and sized for
//! the whole configured range, so skipped and whitespace characters still
//! count toward it.

use crate::error::{AtlasError, Result};
use crate::metrics::{Atlas, CharacterMetrics, PixelPoint, Quad};
use crate::options::AtlasOptions;
use crate::table::CharacterTable;

/// Dimensions derived from a character table before anything is packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cells_per_side: u32,
    pub max_glyph_width: u32,
    pub max_glyph_height: u32,
    /// Horizontal cursor step: widest glyph plus padding.
    pub cell_width: u32,
    /// Row step: tallest glyph plus padding.
    pub cell_height: u32,
    pub margin: u32,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    /// Size the grid for `table`. Fails with [`AtlasError::AtlasTooLarge`]
    /// when the cell or atlas dimensions overflow `u32`.
    pub fn compute(table: &CharacterTable, options: &AtlasOptions) -> Result<Self> {
        let (max_glyph_width, max_glyph_height) = table
            .iter()
            .filter(|(ch, metrics)| is_packed(**ch, metrics))
            .fold((0, 0), |(w, h), (_, m)| {
                (w.max(m.bitmap_width), h.max(m.bitmap_height))
            });

        let cells_per_side = ceil_sqrt(options.range.len() as u32);
        let AtlasOptions {
            padding, margin, ..
        } = *options;
        let too_large = || AtlasError::AtlasTooLarge {
            cells_per_side,
            glyph_width: max_glyph_width,
            glyph_height: max_glyph_height,
            padding,
            margin,
        };

        let cell_width = max_glyph_width.checked_add(padding).ok_or_else(too_large)?;
        let cell_height = max_glyph_height.checked_add(padding).ok_or_else(too_large)?;
        // cells * (glyph + padding) + 2 * margin
        let side = |cell: u32| {
            cells_per_side
                .checked_mul(cell)?
                .checked_add(margin.checked_mul(2)?)
        };

        Ok(Self {
            cells_per_side,
            max_glyph_width,
            max_glyph_height,
            cell_width,
            cell_height,
            margin,
            width: side(cell_width).ok_or_else(too_large)?,
            height: side(cell_height).ok_or_else(too_large)?,
        })
    }
}

/// Whether a character occupies a cell in the atlas.
pub fn is_packed(ch: char, metrics: &CharacterMetrics) -> bool {
    !ch.is_whitespace() && !metrics.is_blank()
}

fn ceil_sqrt(n: u32) -> u32 {
    let mut side = (n as f64).sqrt().ceil() as u32;
    // Guard against float rounding on either side of a perfect square.
    while side > 0 && (side - 1) * (side - 1) >= n {
        side -= 1;
    }
    while side * side < n {
        side += 1;
    }
    side
}

/// Allocate the atlas and copy every visible glyph into its cell, in
/// ascending code point order. Assigns each packed character's `cell`.
pub fn pack(table: &mut CharacterTable, options: &AtlasOptions) -> Result<(Atlas, GridLayout)> {
    let grid = GridLayout::compute(table, options)?;
    let mut atlas = Atlas::new(grid.width, grid.height)?;

    let mut x = grid.margin;
    let mut y = grid.margin;
    for (&ch, metrics) in table.iter_mut() {
        if !is_packed(ch, metrics) {
            continue;
        }

        if x.saturating_add(metrics.bitmap_width) > atlas.width {
            x = grid.margin;
            y = y.saturating_add(grid.cell_height);
        }

        blit(&mut atlas, ch, PixelPoint::new(x, y), metrics)?;
        metrics.cell = Some(Quad::from_rect(
            PixelPoint::new(x, y),
            metrics.bitmap_width,
            metrics.bitmap_height,
        ));

        x = x.saturating_add(grid.cell_width);
    }

    Ok((atlas, grid))
}

/// Copy a glyph's RGBA pixels into the atlas with its top-left corner at
/// `origin`. Fails instead of clipping when the glyph would leave the atlas.
pub fn blit(
    atlas: &mut Atlas,
    ch: char,
    origin: PixelPoint,
    glyph: &CharacterMetrics,
) -> Result<()> {
    let (w, h) = (glyph.bitmap_width, glyph.bitmap_height);
    let fits_x = origin.x.checked_add(w).is_some_and(|right| right <= atlas.width);
    let fits_y = origin.y.checked_add(h).is_some_and(|bottom| bottom <= atlas.height);
    if !fits_x || !fits_y {
        return Err(AtlasError::BlitOutOfBounds {
            ch,
            x: origin.x,
            y: origin.y,
            width: w,
            height: h,
            atlas_width: atlas.width,
            atlas_height: atlas.height,
        });
    }

    let src_stride = w as usize * 4;
    let expected = src_stride * h as usize;
    if glyph.pixels.len() != expected {
        return Err(AtlasError::PixelBufferSize {
            ch,
            expected,
            actual: glyph.pixels.len(),
        });
    }
    if expected == 0 {
        return Ok(());
    }

    let dst_stride = atlas.stride();
    let x_offset = origin.x as usize * 4;
    for (row, src) in glyph.pixels.chunks_exact(src_stride).enumerate() {
        let start = (origin.y as usize + row) * dst_stride + x_offset;
        atlas.pixels[start..start + src_stride].copy_from_slice(src);
    }
    Ok(())
}
