use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use tracing::debug;

use crate::{Dimensions, PipelineError, Result};

/// Decode encoded image bytes, rejecting images without pixels
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );
    Ok(image)
}

/// Decode to 3-channel RGB; any alpha channel is dropped
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    Ok(decode_image(bytes)?.to_rgb8())
}

/// Decode to 8-bit grayscale
pub fn decode_luma(bytes: &[u8]) -> Result<GrayImage> {
    Ok(decode_image(bytes)?.to_luma8())
}

/// Width and height of a fully decoded image, so truncated data is rejected
/// like in every other pipeline
pub fn image_dimensions(bytes: &[u8]) -> Result<Dimensions> {
    let image = decode_image(bytes)?;
    Ok(Dimensions::new(image.width(), image.height()))
}

/// Encode an image as PNG
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| PipelineError::Encode {
            format: "PNG",
            message: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 10) as u8, (y * 10) as u8, 7]);
        }
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let bytes = png_bytes(7, 5);
        assert_eq!(image_dimensions(&bytes).unwrap(), Dimensions::new(7, 5));
    }

    #[test]
    fn test_decode_rgb_keeps_exact_values() {
        let bytes = png_bytes(4, 4);
        let img = decode_rgb(&bytes).unwrap();
        assert_eq!(img.get_pixel(3, 2), &Rgb([30, 20, 7]));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(1, 1, Rgba([10, 20, 30, 0]));
        let bytes = encode_png(&DynamicImage::ImageRgba8(img)).unwrap();
        let rgb = decode_rgb(&bytes).unwrap();
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let garbage = b"definitely not an image";
        assert!(matches!(decode_image(garbage), Err(PipelineError::Decode(_))));
        assert!(matches!(image_dimensions(garbage), Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_truncated_png_is_a_decode_error() {
        let bytes = png_bytes(16, 16);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(decode_image(truncated), Err(PipelineError::Decode(_))));
        assert!(matches!(image_dimensions(truncated), Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_decode_luma() {
        let img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        let bytes = encode_png(&DynamicImage::ImageRgb8(img)).unwrap();
        let gray = decode_luma(&bytes).unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.get_pixel(0, 0).0, [255]);
    }
}
