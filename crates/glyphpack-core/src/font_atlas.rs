use std::path::Path;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{AtlasError, ExportError, LookupError, Result};
use crate::export::write_png;
use crate::layout::{self, GridLayout};
use crate::metrics::{Atlas, CharacterMetrics};
use crate::normalize::assign_uvs;
use crate::options::AtlasOptions;
use crate::rasterizer::{DefaultRasterizer, FontSource, Rasterizer, SizeSpec};
use crate::table::{CharacterTable, build_table};

/// A font rasterized into one RGBA atlas plus per-character placement data.
///
/// Everything is computed up front by [`FontAtlasSet::build`]. Afterwards the
/// set is read-only apart from releasing pixel buffers once they have been
/// uploaded elsewhere; metrics and texture coordinates stay valid after a
/// release.
///
/// ```no_run
/// use glyphpack_core::{AtlasOptions, FontAtlasSet, FontSource, LogDiagnostics, SizeSpec};
///
/// let font = FontAtlasSet::build(
///     &FontSource::path("DejaVuSansMono.ttf"),
///     &SizeSpec::pixels(32, 0),
///     AtlasOptions::default(),
///     &LogDiagnostics,
/// )?;
/// let atlas = font.atlas();
/// let a = font.character('a')?;
/// println!("{}x{} atlas, 'a' at {:?}", atlas.width, atlas.height, a.uv);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FontAtlasSet {
    characters: CharacterTable,
    atlas: Atlas,
    options: AtlasOptions,
    grid: Option<GridLayout>,
    error: Option<AtlasError>,
}

impl FontAtlasSet {
    /// Open `source` at `size` with the default rasterizer and build the atlas.
    ///
    /// The rasterizer lives only for the duration of this call.
    pub fn build(
        source: &FontSource,
        size: &SizeSpec,
        options: AtlasOptions,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let result = DefaultRasterizer::open(source, size, diagnostics)
            .and_then(|mut rasterizer| Self::assemble(&mut rasterizer, options, diagnostics));
        Self::reported(result, diagnostics)
    }

    /// Build the atlas from an already opened rasterizer.
    pub fn build_with<R: Rasterizer + ?Sized>(
        rasterizer: &mut R,
        options: AtlasOptions,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let result = Self::assemble(rasterizer, options, diagnostics);
        Self::reported(result, diagnostics)
    }

    /// Like [`build`](Self::build) but never fails. Check [`is_ready`](Self::is_ready)
    /// before use; a failed set answers every query with empty data.
    pub fn load(
        source: &FontSource,
        size: &SizeSpec,
        options: AtlasOptions,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        Self::build(source, size, options, diagnostics)
            .unwrap_or_else(|error| Self::failed(options, error))
    }

    fn assemble<R: Rasterizer + ?Sized>(
        rasterizer: &mut R,
        options: AtlasOptions,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let mut characters = build_table(rasterizer, options.range, diagnostics)?;
        let (atlas, grid) = layout::pack(&mut characters, &options)?;
        assign_uvs(&mut characters, atlas.width, atlas.height);

        diagnostics.report(&Diagnostic::AtlasBuilt {
            width: atlas.width,
            height: atlas.height,
            characters: characters.len(),
            placed: characters.values().filter(|m| m.cell.is_some()).count(),
        });

        Ok(Self {
            characters,
            atlas,
            options,
            grid: Some(grid),
            error: None,
        })
    }

    fn reported(result: Result<Self>, diagnostics: &dyn Diagnostics) -> Result<Self> {
        if let Err(err) = &result {
            diagnostics.report(&Diagnostic::BuildFailed(err));
        }
        result
    }

    fn failed(options: AtlasOptions, error: AtlasError) -> Self {
        Self {
            characters: CharacterTable::new(),
            atlas: Atlas::default(),
            options,
            grid: None,
            error: Some(error),
        }
    }

    /// True when the build completed without a fatal error.
    pub fn is_ready(&self) -> bool {
        self.error.is_none()
    }

    /// The fatal error that stopped the build, if any.
    pub fn error(&self) -> Option<&AtlasError> {
        self.error.as_ref()
    }

    /// Look up a loaded character. Never inserts: a character that was not
    /// loaded is reported as such instead of coming back as an empty entry.
    pub fn character(&self, ch: char) -> std::result::Result<&CharacterMetrics, LookupError> {
        if !self.is_ready() {
            return Err(LookupError::NotBuilt);
        }
        let range = self.options.range;
        if !range.contains(ch as u32) {
            return Err(LookupError::OutOfRange {
                code: ch as u32,
                min: range.min,
                max: range.max,
            });
        }
        self.characters.get(&ch).ok_or(LookupError::NotLoaded(ch))
    }

    /// [`character`](Self::character) by raw code point.
    pub fn character_code(
        &self,
        code: u32,
    ) -> std::result::Result<&CharacterMetrics, LookupError> {
        match char::from_u32(code) {
            Some(ch) => self.character(ch),
            None if !self.is_ready() => Err(LookupError::NotBuilt),
            None => Err(LookupError::OutOfRange {
                code,
                min: self.options.range.min,
                max: self.options.range.max,
            }),
        }
    }

    /// Loaded characters in ascending order.
    pub fn characters(&self) -> impl Iterator<Item = (char, &CharacterMetrics)> {
        self.characters.iter().map(|(ch, metrics)| (*ch, metrics))
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The packed texture. Empty (0x0) when the build failed.
    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn grid(&self) -> Option<&GridLayout> {
        self.grid.as_ref()
    }

    pub fn options(&self) -> &AtlasOptions {
        &self.options
    }

    /// Largest glyph bitmap, as `(width, height)`.
    pub fn max_glyph_size(&self) -> (u32, u32) {
        self.grid
            .map(|g| (g.max_glyph_width, g.max_glyph_height))
            .unwrap_or_default()
    }

    /// Bytes currently held by per-character pixel buffers.
    pub fn total_character_bytes(&self) -> usize {
        self.characters.values().map(|m| m.pixels.len()).sum()
    }

    /// Free every character's pixel buffer.
    pub fn release_character_pixels(&mut self) {
        for metrics in self.characters.values_mut() {
            metrics.pixels = Vec::new();
        }
    }

    /// Free the atlas pixel buffer. Dimensions are kept.
    pub fn release_atlas_pixels(&mut self) {
        self.atlas.pixels = Vec::new();
    }

    pub fn export_atlas_png(
        &self,
        path: impl AsRef<Path>,
    ) -> std::result::Result<(), ExportError> {
        write_png(path, &self.atlas.pixels, self.atlas.width, self.atlas.height)
    }

    pub fn export_character_png(
        &self,
        ch: char,
        path: impl AsRef<Path>,
    ) -> std::result::Result<(), ExportError> {
        let metrics = self.character(ch)?;
        write_png(
            path,
            &metrics.pixels,
            metrics.bitmap_width,
            metrics.bitmap_height,
        )
    }

    /// Write one `U+XXXX.png` per character that still holds pixels into
    /// `dir`, which must exist. Whitespace and blank glyphs are skipped.
    /// Returns the number of files written.
    pub fn export_glyph_pngs(
        &self,
        dir: impl AsRef<Path>,
    ) -> std::result::Result<usize, ExportError> {
        let dir = dir.as_ref();
        let mut written = 0;
        for (ch, metrics) in self.characters() {
            if metrics.pixels.is_empty() {
                continue;
            }
            self.export_character_png(ch, dir.join(format!("U+{:04X}.png", ch as u32)))?;
            written += 1;
        }
        Ok(written)
    }
}
