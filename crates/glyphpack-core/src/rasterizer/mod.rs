//! Glyph rasterizer seam.
//!
//! A [`Rasterizer`] turns one character into an 8-bit coverage mask plus
//! placement metrics. The default backend is fontdue; enabling the
//! `freetype` feature swaps in FreeType.

pub mod fontdue;
#[cfg(feature = "freetype")]
pub mod freetype;

pub use self::fontdue::FontdueRasterizer;
#[cfg(feature = "freetype")]
pub use self::freetype::FreeTypeRasterizer;

use std::path::PathBuf;

use crate::error::{AtlasError, GlyphError, Result};

/// Rasterizer used by [`FontAtlasSet::build`](crate::FontAtlasSet::build).
#[cfg(not(feature = "freetype"))]
pub type DefaultRasterizer = FontdueRasterizer;
#[cfg(feature = "freetype")]
pub type DefaultRasterizer = FreeTypeRasterizer;

/// Where the font data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A font file on disk, used as given.
    Path(PathBuf),
    /// Font file contents already in memory.
    Bytes(Vec<u8>),
}

impl FontSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Read the font data, loading it from disk for [`FontSource::Path`].
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => Ok(std::fs::read(path)?),
            Self::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Requested glyph size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSpec {
    /// Point size in 26.6 fixed point (points * 64) at the given resolution.
    Points {
        size: i64,
        width_dpi: u32,
        height_dpi: u32,
    },
    /// Pixel size. A zero dimension is derived from the other one.
    Pixels { height: u32, width: u32 },
}

impl SizeSpec {
    /// 64pt.
    pub const DEFAULT_POINT_SIZE: i64 = 64 * 64;
    pub const DEFAULT_DPI: u32 = 600;

    /// Point size at the default 600x600 DPI.
    pub fn points(size: i64) -> Self {
        Self::points_with_dpi(size, Self::DEFAULT_DPI, Self::DEFAULT_DPI)
    }

    pub fn points_with_dpi(size: i64, width_dpi: u32, height_dpi: u32) -> Self {
        Self::Points {
            size,
            width_dpi,
            height_dpi,
        }
    }

    pub fn pixels(height: u32, width: u32) -> Self {
        Self::Pixels { height, width }
    }

    /// Resolve to pixels per em as `(horizontal, vertical)`, filling in zero
    /// dimensions from their counterpart. Resolutions of zero fall back to the
    /// other axis, then to 72 DPI.
    pub fn pixels_per_em(&self) -> Result<(f32, f32)> {
        match *self {
            SizeSpec::Points {
                size,
                width_dpi,
                height_dpi,
            } => {
                if size <= 0 {
                    return Err(AtlasError::SizeConfig(format!(
                        "point size {size} (26.6) must be positive"
                    )));
                }
                let (w_dpi, h_dpi) = match (width_dpi, height_dpi) {
                    (0, 0) => (72, 72),
                    (0, h) => (h, h),
                    (w, 0) => (w, w),
                    (w, h) => (w, h),
                };
                let points = size as f32 / 64.0;
                Ok((
                    points * w_dpi as f32 / 72.0,
                    points * h_dpi as f32 / 72.0,
                ))
            }
            SizeSpec::Pixels { height, width } => match (width, height) {
                (0, 0) => Err(AtlasError::SizeConfig(
                    "pixel width and height are both zero".to_string(),
                )),
                (0, h) => Ok((h as f32, h as f32)),
                (w, 0) => Ok((w as f32, w as f32)),
                (w, h) => Ok((w as f32, h as f32)),
            },
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::points(Self::DEFAULT_POINT_SIZE)
    }
}

/// Output of rasterizing one character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, `width * height` bytes. `None` when the
    /// rasterizer produced no bitmap.
    pub coverage: Option<Vec<u8>>,
    pub bearing_x: i32,
    pub bearing_y: i32,
    /// 26.6 fixed point.
    pub advance_x: i32,
    pub advance_y: i32,
}

/// Rasterizes single characters at a size fixed when the rasterizer was opened.
///
/// Implementations are not expected to be shareable across threads; each
/// build owns its own rasterizer.
pub trait Rasterizer {
    fn rasterize(&mut self, ch: char) -> std::result::Result<RasterizedGlyph, GlyphError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn rasterize(&mut self, ch: char) -> std::result::Result<RasterizedGlyph, GlyphError> {
        (**self).rasterize(ch)
    }
}
