//! Route handlers. Each decodes its input, dispatches one [`ImageCommand`]
//! and frames the resulting [`Artifact`].

pub mod colors;
pub mod outline;
pub mod status;

pub use colors::{analyze_colors, extract_palette, get_pixel_color, image_dimensions};
pub use outline::{generate_advanced_outline, generate_outline};
pub use status::{health, root};

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use hueseum_common::ImageInput;
use serde::Deserialize;

use crate::{command::Artifact, error::ApiError};

/// JSON body carrying a base64 or data-URL encoded image
#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub image_data: String,
}

impl ImagePayload {
    pub fn into_bytes(self) -> Result<Vec<u8>, ApiError> {
        Ok(ImageInput::from(self.image_data).into_bytes()?)
    }
}

pub(crate) fn unexpected(artifact: &Artifact) -> ApiError {
    ApiError::Internal(format!("unexpected {} artifact", artifact.kind()))
}

impl IntoResponse for Artifact {
    fn into_response(self) -> Response {
        let content_type = self.content_type();
        let disposition = self
            .filename()
            .map(|name| format!("attachment; filename={name}"));

        let mut response = match self {
            Artifact::Palette(palette) => Json(palette).into_response(),
            Artifact::Pixel(sample) => Json(sample).into_response(),
            Artifact::Dimensions(dims) => Json(dims).into_response(),
            Artifact::Png(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
            Artifact::Svg(svg) => ([(header::CONTENT_TYPE, content_type)], svg).into_response(),
        };

        if let Some(value) = disposition.and_then(|d| d.parse().ok()) {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
        response
    }
}
