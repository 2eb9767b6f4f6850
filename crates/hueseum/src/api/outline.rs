use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use outline::OutlineParams;
use serde::Deserialize;

use super::ImagePayload;
use crate::{command::ImageCommand, error::ApiError, server::AppState};

/// Image plus optional edge-detection tuning; omitted fields take their defaults
#[derive(Debug, Deserialize)]
pub struct AdvancedOutlineRequest {
    pub image_data: String,
    #[serde(flatten)]
    pub params: OutlineParams,
}

/// `POST /generate-outline`
pub async fn generate_outline(
    State(state): State<AppState>,
    payload: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let artifact = state
        .execute(ImageCommand::ColoringBookOutline, payload.into_bytes()?)
        .await?;
    Ok(artifact.into_response())
}

/// `POST /generate-advanced-outline`
pub async fn generate_advanced_outline(
    State(state): State<AppState>,
    payload: Result<Json<AdvancedOutlineRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(AdvancedOutlineRequest { image_data, params }) = payload?;
    // Parameter errors win over payload errors
    params.validate()?;

    let bytes = ImagePayload { image_data }.into_bytes()?;
    let artifact = state
        .execute(ImageCommand::VectorOutline(params), bytes)
        .await?;
    Ok(artifact.into_response())
}
