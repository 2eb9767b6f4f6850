use image::GrayImage;
use hueseum_common::Result;

use crate::types::Contour;

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Transform the input image (e.g., blur, edge detection, dilation)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;

    /// Short name used in pipeline descriptions and logs
    fn name(&self) -> &'static str;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Trace the borders of the non-zero regions of an edge map
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}
