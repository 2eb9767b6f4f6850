use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        multipart::MultipartRejection,
        Multipart, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use hueseum_common::{ColorEntry, Dimensions, ImageInput};
use serde::{Deserialize, Serialize};
use swatch::{MAX_COLORS, MIN_COLORS};
use tracing::info;
use ts_rs::TS;

use super::{ImagePayload, unexpected};
use crate::{
    command::{Artifact, ImageCommand},
    error::ApiError,
    server::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PaletteQuery {
    #[serde(default = "default_palette_size")]
    pub size: usize,
}

fn default_palette_size() -> usize {
    12
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
}

fn default_num_colors() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct PixelQuery {
    pub x: i64,
    pub y: i64,
}

/// Response of `POST /palette`
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct PaletteResponse {
    pub palette: Vec<ColorEntry>,
    pub count: usize,
}

/// Response of `POST /analyze-colors`
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AnalyzeResponse {
    pub dominant_colors: Vec<ColorEntry>,
    pub image_dimensions: Dimensions,
}

fn check_color_count(name: &str, value: usize, min: usize) -> Result<(), ApiError> {
    if (min..=MAX_COLORS).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "{name} must be between {min} and {MAX_COLORS}, got {value}"
        )))
    }
}

/// `POST /palette?size=k`
pub async fn extract_palette(
    State(state): State<AppState>,
    query: Result<Query<PaletteQuery>, QueryRejection>,
    payload: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<Json<PaletteResponse>, ApiError> {
    let Query(PaletteQuery { size }) = query?;
    check_color_count("size", size, MIN_COLORS)?;
    let Json(payload) = payload?;

    let artifact = state
        .execute(ImageCommand::ExtractPalette { size }, payload.into_bytes()?)
        .await?;
    let palette = match artifact {
        Artifact::Palette(palette) => palette,
        other => return Err(unexpected(&other)),
    };

    info!(requested = size, count = palette.len(), "palette extracted");
    Ok(Json(PaletteResponse {
        count: palette.len(),
        palette: palette.entries,
    }))
}

/// `POST /analyze-colors?num_colors=k` with a multipart `file` upload
pub async fn analyze_colors(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Query(AnalyzeQuery { num_colors }) = query?;
    check_color_count("num_colors", num_colors, 1)?;

    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        if !field.content_type().is_some_and(|ct| ct.starts_with("image/")) {
            return Err(ApiError::BadRequest("File must be an image".to_string()));
        }
        upload = Some(ImageInput::from(field.bytes().await?.to_vec()));
        break;
    }
    let bytes = upload
        .ok_or_else(|| ApiError::Validation("Missing upload field 'file'".to_string()))?
        .into_bytes()?;

    let artifact = state
        .execute(ImageCommand::ExtractPalette { size: num_colors }, bytes)
        .await?;
    let palette = match artifact {
        Artifact::Palette(palette) => palette,
        other => return Err(unexpected(&other)),
    };

    Ok(Json(AnalyzeResponse {
        dominant_colors: palette.entries,
        image_dimensions: palette.image_dimensions,
    }))
}

/// `POST /get-pixel-color?x=&y=`
pub async fn get_pixel_color(
    State(state): State<AppState>,
    query: Result<Query<PixelQuery>, QueryRejection>,
    payload: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(PixelQuery { x, y }) = query?;
    let Json(payload) = payload?;

    let artifact = state
        .execute(ImageCommand::PixelColor { x, y }, payload.into_bytes()?)
        .await?;
    Ok(artifact.into_response())
}

/// `POST /image-dimensions`
pub async fn image_dimensions(
    State(state): State<AppState>,
    payload: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let artifact = state
        .execute(ImageCommand::Dimensions, payload.into_bytes()?)
        .await?;
    Ok(artifact.into_response())
}
