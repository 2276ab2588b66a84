//! Builds an atlas from an installed monospace font. Skipped when the
//! machine has none.

use anyhow::Result;
use fontdb::{Database, Family, Query};
use glyphpack_core::{
    AtlasOptions, FontAtlasSet, FontSource, FontdueRasterizer, LookupError, NullDiagnostics,
    SizeSpec,
};

fn system_monospace() -> Option<(Vec<u8>, u32)> {
    let mut db = Database::new();
    db.load_system_fonts();
    let id = db.query(&Query {
        families: &[Family::Monospace],
        ..Query::default()
    })?;
    db.with_face_data(id, |data, index| (data.to_vec(), index))
}

#[test]
fn monospace_font_at_16px() -> Result<()> {
    let Some((bytes, index)) = system_monospace() else {
        eprintln!("no monospace system font found; skipping");
        return Ok(());
    };

    let source = FontSource::Bytes(bytes);
    let size = SizeSpec::pixels(16, 0);
    let mut raster = FontdueRasterizer::open_indexed(&source, index, &size, &NullDiagnostics)?;
    let set = FontAtlasSet::build_with(&mut raster, AtlasOptions::default(), &NullDiagnostics)?;
    assert!(set.is_ready());

    let grid = set.grid().expect("grid");
    assert_eq!(grid.cells_per_side, 10);
    let atlas = set.atlas();
    assert!(atlas.width > 0 && atlas.height > 0);
    let (max_w, max_h) = set.max_glyph_size();
    assert!(max_w > 0 && max_h > 0);
    assert_eq!(atlas.width, 10 * max_w + 10 * 5 + 10);
    assert_eq!(atlas.height, 10 * max_h + 10 * 5 + 10);

    let space = set.character(' ')?;
    assert_eq!((space.bitmap_width, space.bitmap_height), (0, 0));
    assert!(space.cell.is_none());
    assert!(space.advance_x > 0);

    let m = set.character('M')?;
    assert!(m.cell.is_some());
    assert!(m.pixels.iter().skip(3).step_by(4).any(|&a| a > 0));

    assert!(matches!(
        set.character('\u{7f}'),
        Err(LookupError::OutOfRange { .. })
    ));

    // Monospace fonts share one advance across printable ASCII.
    let advance = set.character('i')?.advance_px().0;
    assert_eq!(set.character('W')?.advance_px().0, advance);
    Ok(())
}
