use crate::{
    params::EdgeSettings,
    pipeline::Pipeline,
    traits::{ImagePreprocessor, ContourExtractor},
    algorithms::{
        CannyPreprocessor,
        DilatePreprocessor,
        GaussianBlurPreprocessor,
        ImageprocContourExtractor,
        InvertPreprocessor,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    pub fn with_gaussian_blur(self, kernel_size: usize) -> Self {
        self.add_preprocessor(GaussianBlurPreprocessor { kernel_size })
    }

    pub fn with_canny(self, low_threshold: f32, high_threshold: f32) -> Self {
        self.add_preprocessor(CannyPreprocessor { low_threshold, high_threshold })
    }

    /// Add dilation; zero iterations adds nothing
    pub fn with_dilation(self, iterations: u8) -> Self {
        if iterations == 0 {
            return self;
        }
        self.add_preprocessor(DilatePreprocessor { iterations })
    }

    pub fn with_inversion(self) -> Self {
        self.add_preprocessor(InvertPreprocessor)
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ImageprocContourExtractor));

        Pipeline::new(self.preprocessors, contour_extractor)
    }

    /// Blur, edge detection and dilation as configured
    pub fn from_settings(settings: &EdgeSettings) -> Self {
        Self::new()
            .with_gaussian_blur(settings.blur_kernel)
            .with_canny(settings.canny_low, settings.canny_high)
            .with_dilation(settings.dilate_iterations)
    }

    /// The fixed raster chain: 3x3 blur, Canny 50/150, one dilation, inversion
    pub fn coloring_book() -> Pipeline {
        Self::from_settings(&EdgeSettings::default())
            .with_inversion()
            .build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
