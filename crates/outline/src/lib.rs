//! # Outline Extraction Library
//!
//! Turns photographs into coloring-book line art. Two outputs share one
//! trait-based pipeline of grayscale preprocessors:
//!
//! - **Raster**: blur, Canny edges, dilation and inversion, encoded as a PNG with
//!   black lines on white.
//! - **Vector**: the same edge map traced into contours and emitted as SVG paths.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outline::{OutlineParams, generate_coloring_book_outline, generate_vector_outline};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let png = generate_coloring_book_outline(&bytes)?;
//! let svg = generate_vector_outline(&bytes, &OutlineParams::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use outline::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .add_preprocessor(GaussianBlurPreprocessor { kernel_size: 5 })
//!     .add_preprocessor(CannyPreprocessor { low_threshold: 30.0, high_threshold: 90.0 })
//!     .with_dilation(2)
//!     .build();
//! ```

// Core modules
pub mod types;
pub mod traits;
pub mod params;
pub mod algorithms;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use types::{ComputedOutline, Contour, StrokeStyle};
pub use traits::*;
pub use params::{EdgeSettings, OutlineParams, MAX_BLUR_KERNEL};
pub use pipeline::{Pipeline, builder::PipelineBuilder};

use hueseum_common::{
    Result,
    codec::{decode_luma, encode_png},
};
use image::DynamicImage;
use tracing::{debug, instrument};

/// Fixed-parameter coloring-book outline as PNG bytes (8-bit grayscale)
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn generate_coloring_book_outline(bytes: &[u8]) -> Result<Vec<u8>> {
    let gray = decode_luma(bytes)?;
    let pipeline = PipelineBuilder::coloring_book();
    debug!(pipeline = %pipeline.info(), "rendering raster outline");

    let lines = pipeline.edge_map(&gray)?;
    encode_png(&DynamicImage::ImageLuma8(lines))
}

/// Traced outline as an SVG document
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn generate_vector_outline(bytes: &[u8], params: &OutlineParams) -> Result<String> {
    let settings = params.validate()?;
    let outline = trace_outline(bytes, &settings)?;
    Ok(outline.to_svg(&StrokeStyle::with_width(settings.stroke_width)))
}

/// Run the vector pipeline and return the contours themselves
pub fn trace_outline(bytes: &[u8], settings: &EdgeSettings) -> Result<ComputedOutline> {
    let gray = decode_luma(bytes)?;
    let pipeline = PipelineBuilder::from_settings(settings).build();
    let outline = pipeline.process(&gray)?;
    debug!(
        contours = outline.contours.len(),
        vertices = outline.vertex_count(),
        "traced outline"
    );
    Ok(outline)
}
