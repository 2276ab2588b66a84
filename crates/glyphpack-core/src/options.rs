use crate::error::{AtlasError, Result};

/// Inclusive range of code points to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    pub min: u32,
    pub max: u32,
}

impl CharRange {
    /// Printable ASCII, space through tilde.
    pub const PRINTABLE_ASCII: CharRange = CharRange { min: 32, max: 126 };

    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Number of code points in the range, including ones that end up skipped.
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.min..=self.max).contains(&code)
    }

    /// Reject empty ranges and bounds that are not Unicode scalar values.
    pub fn validate(&self) -> Result<()> {
        let bounds_ok = char::from_u32(self.min).is_some() && char::from_u32(self.max).is_some();
        if self.min > self.max || !bounds_ok {
            return Err(AtlasError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Characters in ascending order. Surrogate code points are skipped.
    pub fn chars(self) -> impl Iterator<Item = char> {
        (self.min..=self.max).filter_map(char::from_u32)
    }
}

impl Default for CharRange {
    fn default() -> Self {
        Self::PRINTABLE_ASCII
    }
}

/// Layout settings for an atlas build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasOptions {
    pub range: CharRange,
    /// Gap between neighbouring cells, in pixels, on each axis.
    pub padding: u32,
    /// Border around the whole grid, in pixels, on each side.
    pub margin: u32,
}

impl AtlasOptions {
    pub const DEFAULT_PADDING: u32 = 5;
    pub const DEFAULT_MARGIN: u32 = 5;

    pub fn with_range(mut self, range: CharRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            range: CharRange::default(),
            padding: Self::DEFAULT_PADDING,
            margin: Self::DEFAULT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_ascii_has_95_characters() {
        let range = CharRange::default();
        assert_eq!(range.len(), 95);
        assert_eq!(range.chars().count(), 95);
        assert_eq!(range.chars().next(), Some(' '));
        assert_eq!(range.chars().last(), Some('~'));
    }

    #[test]
    fn reversed_range_is_invalid() {
        assert!(matches!(
            CharRange::new(126, 32).validate(),
            Err(AtlasError::InvalidRange { min: 126, max: 32 })
        ));
    }

    #[test]
    fn surrogate_bounds_are_invalid() {
        assert!(CharRange::new(0xD800, 0xD900).validate().is_err());
        assert!(CharRange::new(0xD000, 0xE000).validate().is_ok());
        assert_eq!(CharRange::new(0xD7FF, 0xE000).chars().count(), 2);
    }

    #[test]
    fn builder_overrides_defaults() {
        let options = AtlasOptions::default().with_padding(2).with_margin(0);
        assert_eq!(options.padding, 2);
        assert_eq!(options.margin, 0);
        assert_eq!(options.range, CharRange::PRINTABLE_ASCII);
    }
}
