use ::freetype::face::LoadFlag;
use ::freetype::render_mode::RenderMode;
use ::freetype::{Face, Library};

use super::{FontSource, RasterizedGlyph, Rasterizer, SizeSpec};
use crate::diagnostics::Diagnostics;
use crate::error::{AtlasError, GlyphError, Result};

/// FreeType-backed rasterizer. Owns its library and face handles, which are
/// released when the rasterizer is dropped. Not `Send`: FreeType handles
/// must stay on the thread that created them.
pub struct FreeTypeRasterizer {
    face: Face,
    _library: Library,
}

impl FreeTypeRasterizer {
    pub fn open(
        source: &FontSource,
        size: &SizeSpec,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        Self::open_indexed(source, 0, size, diagnostics)
    }

    pub fn open_indexed(
        source: &FontSource,
        index: u32,
        size: &SizeSpec,
        _diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        // Validate up front so a bad size fails the same way on both backends.
        size.pixels_per_em()?;

        let library = Library::init().map_err(|e| AtlasError::LibraryInit(e.to_string()))?;
        let face = match source {
            FontSource::Path(path) => library.new_face(path.as_os_str(), index as isize),
            FontSource::Bytes(bytes) => library.new_memory_face(bytes.clone(), index as isize),
        }
        .map_err(|e| AtlasError::FaceLoad(e.to_string()))?;

        match *size {
            SizeSpec::Points {
                size,
                width_dpi,
                height_dpi,
            } => face.set_char_size(0, size as isize, width_dpi, height_dpi),
            SizeSpec::Pixels { height, width } => face.set_pixel_sizes(width, height),
        }
        .map_err(|e| AtlasError::SizeConfig(e.to_string()))?;

        Ok(Self {
            face,
            _library: library,
        })
    }
}

impl Rasterizer for FreeTypeRasterizer {
    fn rasterize(&mut self, ch: char) -> std::result::Result<RasterizedGlyph, GlyphError> {
        let index = self
            .face
            .get_char_index(ch as usize)
            .ok_or(GlyphError::MissingGlyph)?;
        self.face
            .load_glyph(index, LoadFlag::DEFAULT)
            .map_err(|e| GlyphError::Render(format!("load: {e}")))?;

        let slot = self.face.glyph();
        slot.render_glyph(RenderMode::Normal)
            .map_err(|e| GlyphError::Render(format!("render: {e}")))?;

        let bitmap = slot.bitmap();
        let width = bitmap.width().max(0) as u32;
        let height = bitmap.rows().max(0) as u32;
        let src = bitmap.buffer();
        let coverage = if src.is_empty() || width == 0 || height == 0 {
            None
        } else {
            Some(tight_rows(src, width, height, bitmap.pitch()))
        };

        let advance = slot.advance();
        Ok(RasterizedGlyph {
            width,
            height,
            coverage,
            bearing_x: slot.bitmap_left(),
            bearing_y: slot.bitmap_top(),
            advance_x: advance.x as i32,
            advance_y: advance.y as i32,
        })
    }
}

/// Copy a pitched bitmap into a tight top-down buffer. Rows may be padded,
/// and a negative pitch means the buffer starts with the bottom row.
fn tight_rows(src: &[u8], width: u32, height: u32, pitch: i32) -> Vec<u8> {
    let w = width as usize;
    let stride = (pitch.unsigned_abs() as usize).max(w);
    let rows = src.chunks(stride).take(height as usize);
    let mut tight = Vec::with_capacity(w * height as usize);
    let mut push = |row: &[u8]| tight.extend_from_slice(&row[..w.min(row.len())]);
    if pitch < 0 {
        rows.rev().for_each(&mut push);
    } else {
        rows.for_each(&mut push);
    }
    tight
}
