//! glyphpack-core: rasterize a range of characters into one RGBA texture atlas.
//!
//! The pipeline runs once per [`FontAtlasSet::build`]:
//! - [`table`]: rasterize every character in the configured range
//! - [`expand`]: turn coverage masks into RGBA with coverage in alpha
//! - [`layout`]: pack visible glyphs into a uniform grid and blit them
//! - [`normalize`]: convert cell corners into `[0, 1]` texture coordinates
//!
//! The rasterizer sits behind the [`Rasterizer`] trait. fontdue is the
//! default backend; the `freetype` feature switches to FreeType.

pub mod diagnostics;
pub mod error;
pub mod expand;
pub mod export;
pub mod font_atlas;
pub mod layout;
pub mod metrics;
pub mod normalize;
pub mod options;
pub mod rasterizer;
pub mod table;

#[cfg(test)]
mod test_support;

pub use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics, NullDiagnostics};
pub use error::{AtlasError, ExportError, GlyphError, LookupError, Result};
pub use export::write_png;
pub use font_atlas::FontAtlasSet;
pub use layout::GridLayout;
pub use metrics::{Atlas, CharacterMetrics, PixelPoint, Quad, TexCoord};
pub use options::{AtlasOptions, CharRange};
pub use rasterizer::{
    DefaultRasterizer, FontSource, FontdueRasterizer, RasterizedGlyph, Rasterizer, SizeSpec,
};
#[cfg(feature = "freetype")]
pub use rasterizer::FreeTypeRasterizer;
pub use table::CharacterTable;
