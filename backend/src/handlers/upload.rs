//! HTTP handler for uploaded data files

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::upload::UploadOutcome;
use crate::AppState;

/// An uploaded CSV file: original file name plus text content.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub file_name: String,
    pub content: String,
}

/// Validate and ingest an uploaded CSV; accepted rows land in the local
/// store, which re-triggers the pipeline.
pub async fn upload_data(
    State(state): State<AppState>,
    Json(input): Json<UploadRequest>,
) -> AppResult<Json<UploadOutcome>> {
    let outcome = state.uploads.ingest_csv(&input.file_name, &input.content).await?;
    Ok(Json(outcome))
}
