use axum::extract::{Query, State};
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ImageParams {
    pub prompt: Option<String>,
}

/// Returns the generated image as a base64 string.
#[tracing::instrument(skip(state, params))]
pub async fn image_handler(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Result<String, ApiError> {
    let prompt = params
        .prompt
        .ok_or_else(|| ApiError::BadRequest("missing 'prompt' query parameter".to_string()))?;

    tracing::debug!(prompt = %sanitize_prompt(&prompt), "Image request received");

    Ok(state.image_service.generate(&prompt).await?)
}
