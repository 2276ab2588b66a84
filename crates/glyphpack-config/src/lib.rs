//! glyphpack configuration
//!
//! Loads atlas settings from `glyphpack.toml`, with environment variables
//! taking precedence over file values.

use glyphpack_core::{AtlasOptions, CharRange, SizeSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlyphpackConfig {
    /// Font file and glyph size
    pub font: FontConfig,
    /// Character range and grid spacing
    pub atlas: AtlasConfig,
    /// Where generated images go
    pub output: OutputConfig,
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to the font file (.ttf/.otf), used as given
    pub path: Option<PathBuf>,
    /// Face index inside a font collection
    pub index: u32,
    /// Pixel height; takes priority over `point_size` when set
    pub pixel_height: Option<u32>,
    /// Pixel width, 0 derives it from the height
    pub pixel_width: u32,
    /// Point size in 26.6 fixed point (points * 64)
    pub point_size: i64,
    /// Horizontal resolution for point sizes
    pub width_dpi: u32,
    /// Vertical resolution for point sizes
    pub height_dpi: u32,
}

/// Atlas layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// First code point to load
    pub range_min: u32,
    /// Last code point to load (inclusive)
    pub range_max: u32,
    /// Gap between cells in pixels
    pub padding: u32,
    /// Border around the grid in pixels
    pub margin: u32,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Atlas PNG path
    pub atlas_png: PathBuf,
    /// Directory for one PNG per glyph; skipped when unset
    pub glyph_dir: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            index: 0,
            pixel_height: None,
            pixel_width: 0,
            point_size: SizeSpec::DEFAULT_POINT_SIZE,
            width_dpi: SizeSpec::DEFAULT_DPI,
            height_dpi: SizeSpec::DEFAULT_DPI,
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        let options = AtlasOptions::default();
        Self {
            range_min: options.range.min,
            range_max: options.range.max,
            padding: options.padding,
            margin: options.margin,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            atlas_png: PathBuf::from("atlas.png"),
            glyph_dir: None,
        }
    }
}

impl FontConfig {
    /// Pixel sizing when `pixel_height` is set, point sizing otherwise.
    pub fn size_spec(&self) -> SizeSpec {
        match self.pixel_height {
            Some(height) => SizeSpec::pixels(height, self.pixel_width),
            None => SizeSpec::points_with_dpi(self.point_size, self.width_dpi, self.height_dpi),
        }
    }
}

impl AtlasConfig {
    pub fn atlas_options(&self) -> AtlasOptions {
        AtlasOptions::default()
            .with_range(CharRange::new(self.range_min, self.range_max))
            .with_padding(self.padding)
            .with_margin(self.margin)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

impl GlyphpackConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the glyphpack.toml configuration file
    ///
    /// # Returns
    /// * `Ok(GlyphpackConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from glyphpack.toml in the current directory, or
    /// defaults if the file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("glyphpack.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        // Font settings
        if let Ok(path) = std::env::var("GLYPHPACK_FONT") {
            self.font.path = Some(PathBuf::from(path));
        }
        if let Some(height) = env_parse("GLYPHPACK_PIXEL_HEIGHT") {
            self.font.pixel_height = Some(height);
        }
        if let Some(width) = env_parse("GLYPHPACK_PIXEL_WIDTH") {
            self.font.pixel_width = width;
        }
        if let Some(size) = env_parse("GLYPHPACK_POINT_SIZE") {
            self.font.point_size = size;
            self.font.pixel_height = None;
        }
        if let Some(dpi) = env_parse("GLYPHPACK_DPI") {
            self.font.width_dpi = dpi;
            self.font.height_dpi = dpi;
        }

        // Atlas settings
        if let Some(min) = env_parse("GLYPHPACK_RANGE_MIN") {
            self.atlas.range_min = min;
        }
        if let Some(max) = env_parse("GLYPHPACK_RANGE_MAX") {
            self.atlas.range_max = max;
        }
        if let Some(padding) = env_parse("GLYPHPACK_PADDING") {
            self.atlas.padding = padding;
        }
        if let Some(margin) = env_parse("GLYPHPACK_MARGIN") {
            self.atlas.margin = margin;
        }

        // Output settings
        if let Ok(path) = std::env::var("GLYPHPACK_OUTPUT") {
            self.output.atlas_png = PathBuf::from(path);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from glyphpack.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
