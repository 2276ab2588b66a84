use crate::error::GlyphError;

/// Convert an 8-bit coverage mask into RGBA pixels with zeroed color
/// channels and the coverage stored in alpha.
///
/// `None` models a rasterizer that produced no bitmap; callers only expand
/// visible characters, so a missing bitmap is an error.
pub fn coverage_to_rgba(
    width: u32,
    height: u32,
    coverage: Option<&[u8]>,
) -> Result<Vec<u8>, GlyphError> {
    let coverage = coverage.ok_or(GlyphError::MissingCoverage)?;
    let expected = width as usize * height as usize;
    if coverage.len() != expected {
        return Err(GlyphError::CoverageSize {
            expected,
            actual: coverage.len(),
        });
    }

    let mut out = vec![0u8; expected * 4];
    for (px, &alpha) in out.chunks_exact_mut(4).zip(coverage) {
        px[3] = alpha;
    }
    Ok(out)
}
