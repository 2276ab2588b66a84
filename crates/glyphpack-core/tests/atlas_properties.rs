mod common;

use anyhow::Result;
use common::MonospaceRasterizer;
use glyphpack_core::{
    AtlasOptions, CharRange, FontAtlasSet, LookupError, NullDiagnostics, layout::is_packed,
};

fn build(px: u32, options: AtlasOptions) -> Result<FontAtlasSet> {
    let mut raster = MonospaceRasterizer::new(px);
    Ok(FontAtlasSet::build_with(&mut raster, options, &NullDiagnostics)?)
}

#[test]
fn texture_coordinates_stay_in_unit_square() -> Result<()> {
    let set = build(16, AtlasOptions::default())?;
    for (ch, metrics) in set.characters() {
        if !is_packed(ch, metrics) {
            assert!(metrics.uv.is_none(), "{ch:?} should have no uv");
            continue;
        }
        let uv = metrics.uv.expect("packed glyph has uv");
        for corner in uv.corners() {
            assert!((0.0..=1.0).contains(&corner.x), "{ch:?} x {}", corner.x);
            assert!((0.0..=1.0).contains(&corner.y), "{ch:?} y {}", corner.y);
        }
        assert!(uv.top_left.x <= uv.top_right.x);
        assert!(uv.top_left.y <= uv.bottom_left.y);
    }
    Ok(())
}

#[test]
fn cells_never_overlap() -> Result<()> {
    let options = AtlasOptions::default().with_padding(0).with_margin(0);
    let set = build(21, options)?;
    let cells: Vec<_> = set
        .characters()
        .filter_map(|(ch, m)| m.cell.map(|c| (ch, c)))
        .collect();
    assert_eq!(cells.len(), 94);
    for (i, (a_ch, a)) in cells.iter().enumerate() {
        for (b_ch, b) in &cells[i + 1..] {
            assert!(!a.overlaps(b), "{a_ch:?} overlaps {b_ch:?}");
        }
    }
    Ok(())
}

#[test]
fn atlas_buffer_matches_dimensions() -> Result<()> {
    for px in [8, 13, 32] {
        let set = build(px, AtlasOptions::default())?;
        let atlas = set.atlas();
        assert_eq!(
            atlas.pixels.len(),
            atlas.width as usize * atlas.height as usize * 4
        );
        assert!(atlas.pixels.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
    }
    Ok(())
}

#[test]
fn builds_are_reproducible() -> Result<()> {
    let first = build(16, AtlasOptions::default())?;
    let second = build(16, AtlasOptions::default())?;
    assert_eq!(first.atlas(), second.atlas());
    let cells = |set: &FontAtlasSet| -> Vec<_> {
        set.characters().map(|(c, m)| (c, m.cell)).collect()
    };
    assert_eq!(cells(&first), cells(&second));
    Ok(())
}

#[test]
fn released_pixels_keep_placement() -> Result<()> {
    let mut set = build(16, AtlasOptions::default())?;
    let before: Vec<_> = set
        .characters()
        .map(|(c, m)| (c, m.bearing_x, m.bearing_y, m.advance_x, m.cell, m.uv))
        .collect();

    set.release_character_pixels();

    let after: Vec<_> = set
        .characters()
        .map(|(c, m)| (c, m.bearing_x, m.bearing_y, m.advance_x, m.cell, m.uv))
        .collect();
    assert_eq!(before, after);
    assert!(set.characters().all(|(_, m)| m.pixels.is_empty()));
    assert!(!set.atlas().pixels.is_empty());
    Ok(())
}

#[test]
fn printable_ascii_scenario() -> Result<()> {
    let set = build(16, AtlasOptions::default())?;
    let grid = set.grid().expect("built set has a grid");
    assert_eq!(grid.cells_per_side, 10);

    let (max_w, max_h) = set.max_glyph_size();
    let atlas = set.atlas();
    assert_eq!(atlas.width, 10 * max_w + 10 * 5 + 2 * 5);
    assert_eq!(atlas.height, 10 * max_h + 10 * 5 + 2 * 5);

    let space = set.character(' ')?;
    assert_eq!((space.bitmap_width, space.bitmap_height), (0, 0));
    assert!(space.cell.is_none());
    assert_eq!(space.advance_px(), (9, 0));
    Ok(())
}

#[test]
fn out_of_range_lookup_is_not_found() -> Result<()> {
    let set = build(16, AtlasOptions::default())?;
    for code in [0u32, 31, 127, 0x20AC] {
        assert!(matches!(
            set.character_code(code),
            Err(LookupError::OutOfRange { .. })
        ));
    }
    Ok(())
}

#[test]
fn missing_glyphs_leave_gaps_but_build_succeeds() -> Result<()> {
    let mut raster = MonospaceRasterizer::new(16).missing(&['q', '~']);
    let set = FontAtlasSet::build_with(&mut raster, AtlasOptions::default(), &NullDiagnostics)?;
    assert!(set.is_ready());
    assert_eq!(set.character('q'), Err(LookupError::NotLoaded('q')));
    assert_eq!(set.len(), 93);
    Ok(())
}

#[test]
fn custom_range_sizes_grid_from_range() -> Result<()> {
    let options = AtlasOptions::default().with_range(CharRange::new('0' as u32, '9' as u32));
    let set = build(12, options)?;
    assert_eq!(set.grid().map(|g| g.cells_per_side), Some(4));
    assert_eq!(set.len(), 10);
    assert!(matches!(
        set.character('a'),
        Err(LookupError::OutOfRange { .. })
    ));
    Ok(())
}
