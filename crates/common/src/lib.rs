//! # Hueseum Common - Shared Types and Utilities
//!
//! Shared data structures, the error taxonomy and the image decoding helpers used by
//! the palette and outline pipelines and by every request surface on top of them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hueseum_common::{ImageInput, codec::image_dimensions};
//!
//! let input = ImageInput::Base64("data:image/png;base64,iVBORw0KGgo...".to_string());
//! let bytes = input.into_bytes()?;
//! let dims = image_dimensions(&bytes)?;
//! println!("{}x{}", dims.width, dims.height);
//! # Ok::<(), hueseum_common::PipelineError>(())
//! ```

pub mod codec;
pub mod input;

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use thiserror::Error;
use ts_rs::TS;

pub use input::ImageInput;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Everything that can go wrong between receiving image bytes and producing an artifact
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Coordinates out of bounds: ({x}, {y}) is outside a {width}x{height} image")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Could not encode {format}: {message}")]
    Encode { format: &'static str, message: String },
}

impl PipelineError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter { message: message.into() }
    }

    /// True when the caller sent something unusable, false for internal failures
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encode { .. })
    }
}

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check whether signed coordinates address a pixel of this image
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

/// One colour of a palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorEntry {
    /// `#rrggbb`, lowercase
    pub hex: String,
    pub rgb: [u8; 3],
    /// Share of the image's pixels, 0-100 with two decimals
    pub percentage: f64,
}

impl ColorEntry {
    pub fn new(rgb: [u8; 3], percentage: f64) -> Self {
        Self {
            hex: hex_string(rgb),
            rgb,
            percentage,
        }
    }
}

/// Pixel coordinates as echoed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinates {
    pub x: u32,
    pub y: u32,
}

/// The exact colour found at one pixel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PixelSample {
    pub coordinates: Coordinates,
    pub rgb: [u8; 3],
    pub hex: String,
}

impl PixelSample {
    pub fn new(x: u32, y: u32, rgb: [u8; 3]) -> Self {
        Self {
            coordinates: Coordinates { x, y },
            rgb,
            hex: hex_string(rgb),
        }
    }
}

/// Encode an RGB triplet as `#rrggbb`
pub fn hex_string([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
