pub mod builder;

use image::GrayImage;
use hueseum_common::Result;
use tracing::debug;

use crate::{
    types::ComputedOutline,
    traits::{ImagePreprocessor, ContourExtractor},
};

/// An outline pipeline: a chain of image preprocessors followed by contour extraction
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
        }
    }

    /// Run every preprocessor in sequence, producing the edge map
    pub fn edge_map(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
            debug!(stage = preprocessor.name(), "applied preprocessor");
        }
        Ok(processed_image)
    }

    /// Process an image through the entire pipeline
    pub fn process(&self, image: &GrayImage) -> Result<ComputedOutline> {
        let edges = self.edge_map(image)?;
        let contours = self.contour_extractor.extract_contours(&edges)?;

        Ok(ComputedOutline {
            contours,
            image_width: image.width(),
            image_height: image.height(),
        })
    }

    /// Names of the preprocessing stages, in order
    pub fn stages(&self) -> Vec<&'static str> {
        self.preprocessors.iter().map(|p| p.name()).collect()
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} -> contours",
            self.stages().join(" -> ")
        )
    }
}
