//! PNG export with nearest-neighbour integer upscaling.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{ForgeError, ForgeResult};
use crate::settings::validate_scale;

/// Default file name for procedural exports.
pub const CHARACTER_FILE_NAME: &str = "hollow_warrior.png";

/// Default file name for sheet exports.
pub const SHEET_FILE_NAME: &str = "hollow_forge_character.png";

/// Scales `image` by an integer factor in `1..=8`, copying each pixel into
/// a `scale x scale` block.
pub fn upscale(image: &RgbaImage, scale: u32) -> ForgeResult<RgbaImage> {
    validate_scale(scale)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ForgeError::export("cannot export an empty image"));
    }
    if scale == 1 {
        return Ok(image.clone());
    }
    Ok(RgbaImage::from_fn(
        image.width() * scale,
        image.height() * scale,
        |x, y| *image.get_pixel(x / scale, y / scale),
    ))
}

/// Upscales and encodes to PNG bytes.
pub fn encode_png(image: &RgbaImage, scale: u32) -> ForgeResult<Vec<u8>> {
    let scaled = upscale(image, scale)?;
    let mut bytes = Cursor::new(Vec::new());
    scaled.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Upscales and writes a PNG file.
pub fn save_png(image: &RgbaImage, scale: u32, path: impl AsRef<Path>) -> ForgeResult<()> {
    let bytes = encode_png(image, scale)?;
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), scale, "exported png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn upscale_repeats_pixels() {
        let scaled = upscale(&checker(), 4).unwrap();
        assert_eq!(scaled.dimensions(), (8, 8));
        assert_eq!(scaled.get_pixel(3, 3).0, [255, 255, 255, 255]);
        assert_eq!(scaled.get_pixel(4, 3).0, [0, 0, 0, 255]);
        assert_eq!(scaled.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn scale_outside_range_is_rejected() {
        assert!(matches!(upscale(&checker(), 0), Err(ForgeError::Export(_))));
        assert!(matches!(upscale(&checker(), 9), Err(ForgeError::Export(_))));
        assert!(upscale(&checker(), 8).is_ok());
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = encode_png(&RgbaImage::new(0, 0), 2).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn encoded_png_decodes_at_scaled_size() {
        let bytes = encode_png(&checker(), 3).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (6, 6));
        assert_eq!(decoded.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHARACTER_FILE_NAME);
        save_png(&checker(), 2, &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }
}
