use image::GrayImage;
use imageproc::distance_transform::Norm;
use hueseum_common::{PipelineError, Result};

use crate::traits::ImagePreprocessor;

/// Gaussian blur with an explicit (odd) kernel size
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub kernel_size: usize,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self { kernel_size: 3 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.kernel_size <= 1 {
            return Ok(image.clone());
        }
        let kernel = gaussian_kernel(self.kernel_size);
        Ok(imageproc::filter::separable_filter_equal(image, &kernel))
    }

    fn name(&self) -> &'static str {
        "gaussian_blur"
    }
}

/// Normalised 1-D Gaussian taps, symmetric around the centre tap.
///
/// Even sizes are bumped to the next odd one. Sizes up to 7 use the binomial
/// taps; larger sizes derive sigma from the size as `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let size = size | 1;
    match size {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        _ => {
            let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
            let center = (size / 2) as f32;
            let taps: Vec<f32> = (0..size)
                .map(|i| {
                    let d = i as f32 - center;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f32 = taps.iter().sum();
            taps.into_iter().map(|t| t / sum).collect()
        }
    }
}

/// Two-threshold Canny edge detection; edges come out as 255 on 0
#[derive(Debug, Clone)]
pub struct CannyPreprocessor {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for CannyPreprocessor {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl ImagePreprocessor for CannyPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let (a, b) = (self.low_threshold, self.high_threshold);
        if !a.is_finite() || !b.is_finite() {
            return Err(PipelineError::invalid_parameter(format!(
                "canny thresholds must be finite, got {a} and {b}"
            )));
        }
        let (low, high) = if a.total_cmp(&b).is_le() { (a, b) } else { (b, a) };
        Ok(imageproc::edges::canny(image, low, high))
    }

    fn name(&self) -> &'static str {
        "canny"
    }
}

/// Dilation by a 3x3 square, repeated `iterations` times
#[derive(Debug, Clone)]
pub struct DilatePreprocessor {
    pub iterations: u8,
}

impl Default for DilatePreprocessor {
    fn default() -> Self {
        Self { iterations: 1 }
    }
}

impl ImagePreprocessor for DilatePreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.iterations == 0 {
            return Ok(image.clone());
        }
        // n passes of a 3x3 square equal one pass with chessboard radius n
        Ok(imageproc::morphology::dilate(image, Norm::LInf, self.iterations))
    }

    fn name(&self) -> &'static str {
        "dilate"
    }
}

/// Bitwise inversion, turning white-on-black edges into black lines on white
#[derive(Debug, Clone, Default)]
pub struct InvertPreprocessor;

impl ImagePreprocessor for InvertPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut inverted = image.clone();
        image::imageops::invert(&mut inverted);
        Ok(inverted)
    }

    fn name(&self) -> &'static str {
        "invert"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn square(size: u32, from: u32, to: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            if (from..to).contains(&x) && (from..to).contains(&y) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }

    #[test]
    fn test_gaussian_kernels_are_normalised() {
        for size in [1, 3, 5, 7, 9, 15, 31] {
            let kernel = gaussian_kernel(size);
            assert_eq!(kernel.len(), size);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "size {size} sums to {sum}");
            assert_eq!(kernel.first(), kernel.last());
        }
    }

    #[test]
    fn test_even_kernel_sizes_stay_symmetric() {
        for size in [0, 2, 4, 10] {
            let kernel = gaussian_kernel(size);
            assert_eq!(kernel.len(), size + 1);
            let mirrored: Vec<f32> = kernel.iter().rev().copied().collect();
            assert_eq!(kernel, mirrored);
        }

        let flat = GrayImage::from_pixel(10, 10, Luma([90u8]));
        let blurred = GaussianBlurPreprocessor { kernel_size: 4 }.preprocess(&flat).unwrap();
        assert!(blurred.pixels().all(|p| p.0[0] == 90));
    }

    #[test]
    fn test_canny_rejects_non_finite_thresholds() {
        let image = square(20, 5, 15);
        for (low_threshold, high_threshold) in [(f32::NAN, 150.0), (50.0, f32::NAN), (0.0, f32::INFINITY)] {
            let result = CannyPreprocessor { low_threshold, high_threshold }.preprocess(&image);
            assert!(matches!(result, Err(PipelineError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn test_blur_keeps_flat_regions() {
        let flat = GrayImage::from_pixel(10, 10, Luma([200u8]));
        let blurred = GaussianBlurPreprocessor { kernel_size: 3 }.preprocess(&flat).unwrap();
        assert_eq!(blurred.dimensions(), (10, 10));
        assert!(blurred.pixels().all(|p| p.0[0] == 200));
    }

    #[test]
    fn test_canny_finds_square_border() {
        let edges = CannyPreprocessor::default().preprocess(&square(40, 10, 30)).unwrap();
        let edge_pixels = edges.pixels().filter(|p| p.0[0] == 255).count();
        assert!(edge_pixels > 0);
        assert!(edges.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        // Far from the square nothing fires
        assert_eq!(edges.get_pixel(2, 2).0[0], 0);
        assert_eq!(edges.get_pixel(20, 20).0[0], 0);
    }

    #[test]
    fn test_canny_accepts_swapped_thresholds() {
        let image = square(20, 5, 15);
        let ordered = CannyPreprocessor { low_threshold: 50.0, high_threshold: 150.0 }
            .preprocess(&image)
            .unwrap();
        let swapped = CannyPreprocessor { low_threshold: 150.0, high_threshold: 50.0 }
            .preprocess(&image)
            .unwrap();
        assert_eq!(ordered, swapped);
    }

    #[test]
    fn test_dilation_grows_a_point() {
        let mut image = GrayImage::new(9, 9);
        image.put_pixel(4, 4, Luma([255]));

        let once = DilatePreprocessor { iterations: 1 }.preprocess(&image).unwrap();
        assert_eq!(once.pixels().filter(|p| p.0[0] == 255).count(), 9);

        let twice = DilatePreprocessor { iterations: 2 }.preprocess(&image).unwrap();
        assert_eq!(twice.pixels().filter(|p| p.0[0] == 255).count(), 25);

        let none = DilatePreprocessor { iterations: 0 }.preprocess(&image).unwrap();
        assert_eq!(none, image);
    }

    #[test]
    fn test_invert() {
        let image = square(4, 0, 2);
        let inverted = InvertPreprocessor.preprocess(&image).unwrap();
        assert_eq!(inverted.get_pixel(0, 0).0[0], 0);
        assert_eq!(inverted.get_pixel(3, 3).0[0], 255);
    }
}
