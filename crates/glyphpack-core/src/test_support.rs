use std::cell::RefCell;
use std::collections::HashSet;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::GlyphError;
use crate::rasterizer::{RasterizedGlyph, Rasterizer};

/// Deterministic rasterizer producing solid rectangles whose size varies a
/// little with the code point.
pub(crate) struct BlockRasterizer {
    width: u32,
    height: u32,
    failing: HashSet<char>,
    without_bitmap: HashSet<char>,
}

impl BlockRasterizer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            failing: HashSet::new(),
            without_bitmap: HashSet::new(),
        }
    }

    pub(crate) fn failing(mut self, ch: char) -> Self {
        self.failing.insert(ch);
        self
    }

    pub(crate) fn without_bitmap(mut self, ch: char) -> Self {
        self.without_bitmap.insert(ch);
        self
    }
}

impl Rasterizer for BlockRasterizer {
    fn rasterize(&mut self, ch: char) -> Result<RasterizedGlyph, GlyphError> {
        if self.failing.contains(&ch) {
            return Err(GlyphError::MissingGlyph);
        }
        let advance_x = (self.width * 64) as i32;
        if ch.is_whitespace() {
            return Ok(RasterizedGlyph {
                advance_x,
                ..Default::default()
            });
        }

        let code = ch as u32;
        let width = self.width.saturating_sub(code % 3).max(1);
        let height = self.height.saturating_sub(code % 4).max(1);
        let coverage = if self.without_bitmap.contains(&ch) {
            None
        } else {
            Some(vec![(code % 255) as u8 + 1; (width * height) as usize])
        };
        Ok(RasterizedGlyph {
            width,
            height,
            coverage,
            bearing_x: 1,
            bearing_y: height as i32,
            advance_x,
            advance_y: 0,
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingDiagnostics {
    skipped: RefCell<Vec<(char, GlyphError)>>,
    built: RefCell<Option<(usize, usize)>>,
    failures: RefCell<usize>,
}

impl RecordingDiagnostics {
    pub(crate) fn skipped(&self) -> Vec<(char, GlyphError)> {
        self.skipped.borrow().clone()
    }

    /// `(characters, placed)` from the last successful build.
    pub(crate) fn built(&self) -> Option<(usize, usize)> {
        *self.built.borrow()
    }

    pub(crate) fn failures(&self) -> usize {
        *self.failures.borrow()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::GlyphSkipped { ch, error } => {
                self.skipped.borrow_mut().push((*ch, (*error).clone()));
            }
            Diagnostic::AtlasBuilt {
                characters, placed, ..
            } => {
                *self.built.borrow_mut() = Some((*characters, *placed));
            }
            Diagnostic::BuildFailed(_) => *self.failures.borrow_mut() += 1,
            Diagnostic::SizeAdjusted { .. } => {}
        }
    }
}
