//! Error types for atlas construction, glyph rasterization and lookups.

use thiserror::Error;

/// Result type for fatal atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Errors that abort an atlas build. A build that hits one of these has no
/// usable atlas.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Reading the font file failed.
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rasterizer library could not be initialized.
    #[error("rasterizer initialization failed: {0}")]
    LibraryInit(String),

    /// The font data could not be parsed into a face.
    #[error("failed to load font face: {0}")]
    FaceLoad(String),

    /// The requested glyph size could not be applied to the face.
    #[error("invalid glyph size: {0}")]
    SizeConfig(String),

    /// The configured character range is empty or not made of Unicode scalar values.
    #[error("invalid character range {min:#x}..={max:#x}")]
    InvalidRange { min: u32, max: u32 },

    /// A glyph did not fit inside the atlas buffer. Indicates a sizing bug.
    #[error(
        "glyph {ch:?} ({width}x{height} at {x},{y}) \
         exceeds atlas bounds {atlas_width}x{atlas_height}"
    )]
    BlitOutOfBounds {
        ch: char,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        atlas_width: u32,
        atlas_height: u32,
    },

    /// A glyph's pixel buffer does not match its bitmap dimensions.
    #[error("glyph {ch:?} pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize {
        ch: char,
        expected: usize,
        actual: usize,
    },

    /// The grid dimensions do not fit in `u32` pixels.
    #[error(
        "{cells_per_side}x{cells_per_side} grid of {glyph_width}x{glyph_height} glyphs \
         with padding {padding} and margin {margin} is too large"
    )]
    AtlasTooLarge {
        cells_per_side: u32,
        glyph_width: u32,
        glyph_height: u32,
        padding: u32,
        margin: u32,
    },

    /// The atlas pixel buffer could not be allocated.
    #[error("cannot allocate a {width}x{height} atlas")]
    AtlasAllocation { width: u32, height: u32 },
}

/// Per-character failures. The character is left out of the table and the
/// build continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// The face has no glyph mapped to the character.
    #[error("no glyph mapped to character")]
    MissingGlyph,

    /// Loading or rendering the glyph failed inside the rasterizer.
    #[error("glyph rendering failed: {0}")]
    Render(String),

    /// A visible character came back without a coverage bitmap.
    #[error("rasterizer returned no coverage bitmap")]
    MissingCoverage,

    /// The coverage bitmap does not match the reported dimensions.
    #[error("coverage bitmap holds {actual} bytes, expected {expected}")]
    CoverageSize { expected: usize, actual: usize },
}

/// Reasons a character lookup on a [`FontAtlasSet`](crate::FontAtlasSet) finds nothing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The atlas failed to build; no character data exists.
    #[error("font atlas was not built")]
    NotBuilt,

    /// The character lies outside the configured range.
    #[error("character {code:#x} is outside the loaded range {min:#x}..={max:#x}")]
    OutOfRange { code: u32, min: u32, max: u32 },

    /// The character is in range but its glyph could not be rasterized.
    #[error("character {0:?} was not loaded")]
    NotLoaded(char),
}

/// Errors raised while writing a pixel buffer to an image file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The buffer has been released or the image has no area.
    #[error("pixel buffer is empty")]
    Empty,

    /// The buffer length does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The character has never been loaded.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Encoding or writing failed.
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}
