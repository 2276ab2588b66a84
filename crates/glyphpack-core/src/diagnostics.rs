//! Reporting hook for build progress and recoverable failures.
//!
//! The core never installs a logger. Callers hand a [`Diagnostics`]
//! implementation to the build; [`LogDiagnostics`] forwards to the `log`
//! facade and [`NullDiagnostics`] drops everything.

use crate::error::{AtlasError, GlyphError};

/// Something worth surfacing while building an atlas.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// A character was left out of the table.
    GlyphSkipped { ch: char, error: &'a GlyphError },
    /// The rasterizer could not honor the requested size exactly.
    SizeAdjusted { requested: String, applied_px: f32 },
    /// The atlas was packed.
    AtlasBuilt {
        width: u32,
        height: u32,
        characters: usize,
        placed: usize,
    },
    /// A fatal error stopped the build.
    BuildFailed(&'a AtlasError),
}

pub trait Diagnostics {
    fn report(&self, event: &Diagnostic<'_>);
}

/// Forwards diagnostics to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::GlyphSkipped { ch, error } => {
                log::warn!("skipping character {:?} (U+{:04X}): {}", ch, *ch as u32, error);
            }
            Diagnostic::SizeAdjusted {
                requested,
                applied_px,
            } => {
                log::info!("requested size {requested} rasterized at {applied_px}px per em");
            }
            Diagnostic::AtlasBuilt {
                width,
                height,
                characters,
                placed,
            } => {
                log::debug!(
                    "packed {placed} of {characters} characters into {width}x{height} atlas"
                );
            }
            Diagnostic::BuildFailed(err) => log::error!("font atlas build failed: {err}"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn report(&self, _event: &Diagnostic<'_>) {}
}
