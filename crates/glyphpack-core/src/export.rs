use std::path::Path;

use image::{ColorType, ImageFormat};

use crate::error::ExportError;

/// Write a tightly packed RGBA buffer to `path` as PNG.
pub fn write_png(
    path: impl AsRef<Path>,
    rgba: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ExportError> {
    let expected = width as usize * height as usize * 4;
    if rgba.is_empty() || expected == 0 {
        return Err(ExportError::Empty);
    }
    if rgba.len() != expected {
        return Err(ExportError::SizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        ColorType::Rgba8,
        ImageFormat::Png,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_readable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.png");
        let pixels = [0, 0, 0, 255].repeat(6);
        write_png(&path, &pixels, 3, 2).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn released_buffer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(dir.path().join("empty.png"), &[], 3, 2).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(dir.path().join("short.png"), &[0; 8], 3, 2).unwrap_err();
        assert!(matches!(
            err,
            ExportError::SizeMismatch {
                expected: 24,
                actual: 8
            }
        ));
    }
}
