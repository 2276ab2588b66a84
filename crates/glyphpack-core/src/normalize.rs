use crate::metrics::{PixelPoint, Quad, TexCoord};
use crate::table::CharacterTable;

impl PixelPoint {
    /// Scale into `[0, 1]` texture space for an atlas of the given size.
    pub fn normalized(self, width: u32, height: u32) -> TexCoord {
        TexCoord {
            x: self.x as f32 / width as f32,
            y: self.y as f32 / height as f32,
        }
    }
}

/// Texture coordinates for a cell inside a `width` x `height` atlas.
pub fn cell_uv(cell: &Quad<PixelPoint>, width: u32, height: u32) -> Quad<TexCoord> {
    cell.map(|corner| corner.normalized(width, height))
}

/// Fill in `uv` for every character that has a cell. Characters without a
/// cell keep `uv == None`.
pub fn assign_uvs(table: &mut CharacterTable, width: u32, height: u32) {
    for metrics in table.values_mut() {
        metrics.uv = metrics.cell.as_ref().map(|cell| cell_uv(cell, width, height));
    }
}
