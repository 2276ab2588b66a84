use std::fmt;

use crate::error::AtlasError;

/// Integer position inside the atlas, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Normalized texture coordinate in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TexCoord {
    pub x: f32,
    pub y: f32,
}

/// The four corners of a glyph's region within the atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_left: T,
    pub bottom_right: T,
}

impl<T: Copy> Quad<T> {
    /// Apply `f` to every corner.
    pub fn map<U>(&self, mut f: impl FnMut(T) -> U) -> Quad<U> {
        Quad {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [T; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

impl Quad<PixelPoint> {
    /// Axis-aligned rectangle with its top-left corner at `origin`.
    pub fn from_rect(origin: PixelPoint, width: u32, height: u32) -> Self {
        let PixelPoint { x, y } = origin;
        Self {
            top_left: PixelPoint::new(x, y),
            top_right: PixelPoint::new(x + width, y),
            bottom_left: PixelPoint::new(x, y + height),
            bottom_right: PixelPoint::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> u32 {
        self.top_right.x - self.top_left.x
    }

    pub fn height(&self) -> u32 {
        self.bottom_left.y - self.top_left.y
    }

    /// True when the two rectangles share any pixel. Touching edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X : {} | Y : {}", self.x, self.y)
    }
}

impl fmt::Display for TexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X : {} | Y : {}", self.x, self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Quad<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top Left     : {}", self.top_left)?;
        writeln!(f, "Top Right    : {}", self.top_right)?;
        writeln!(f, "Bottom Left  : {}", self.bottom_left)?;
        write!(f, "Bottom Right : {}", self.bottom_right)
    }
}

/// Placement and sampling data for one loaded character.
///
/// `cell` and `uv` stay `None` until the atlas layout assigns a region, and
/// remain `None` for whitespace, which is never written into the atlas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterMetrics {
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    /// Offset from the pen origin to the bitmap's left edge.
    pub bearing_x: i32,
    /// Offset from the baseline up to the bitmap's top edge.
    pub bearing_y: i32,
    /// Pen advance in 26.6 fixed point.
    pub advance_x: i32,
    pub advance_y: i32,
    pub cell: Option<Quad<PixelPoint>>,
    pub uv: Option<Quad<TexCoord>>,
    /// RGBA pixels, `bitmap_width * bitmap_height * 4` bytes until released.
    pub pixels: Vec<u8>,
}

impl CharacterMetrics {
    /// Whole-pixel pen advance.
    pub fn advance_px(&self) -> (i32, i32) {
        (self.advance_x >> 6, self.advance_y >> 6)
    }

    /// True when the glyph has no visible area.
    pub fn is_blank(&self) -> bool {
        self.bitmap_width == 0 || self.bitmap_height == 0
    }

    /// Render the alpha channel as text, one line per bitmap row. Blank
    /// pixels print as spaces, covered ones as the coverage value.
    /// Returns an empty string once the pixels have been released.
    pub fn coverage_art(&self) -> String {
        let width = self.bitmap_width as usize;
        if self.pixels.is_empty() || width == 0 {
            return String::new();
        }
        let mut out = String::new();
        for row in self.pixels.chunks_exact(width * 4) {
            for px in row.chunks_exact(4) {
                match px[3] {
                    0 => out.push(' '),
                    a => out.push_str(&a.to_string()),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// The packed RGBA texture holding every visible glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atlas {
    /// Row-major RGBA, `width * height * 4` bytes until released.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Atlas {
    /// Allocate a fully transparent atlas. Fails instead of aborting when the
    /// buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, AtlasError> {
        let too_large = || AtlasError::AtlasAllocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, 0);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Bytes per row of the pixel buffer.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn is_released(&self) -> bool {
        self.pixels.is_empty()
    }
}
