//! Consultation upload endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, info};

use super::error::ApiError;
use super::AppState;
use crate::consultation::{ArtifactUpload, Consultation};

const IMAGE_FIELD: &str = "image";
const AUDIO_FIELD: &str = "audio";

// Fallback names when a client omits the part filename; only the extension
// matters downstream.
const DEFAULT_IMAGE_NAME: &str = "image.jpg";
const DEFAULT_AUDIO_NAME: &str = "audio.wav";

/// `POST /process-consultation/`: multipart form with `image` and `audio`
/// file parts. Request-shape problems are 400; pipeline failures are 500,
/// both with a `{"detail": ...}` body.
pub async fn process_consultation(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Consultation>, ApiError> {
    let mut image: Option<ArtifactUpload> = None;
    let mut audio: Option<ArtifactUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request(format!("Failed to parse multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            IMAGE_FIELD => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read `image` field: {}", e))
                })?;
                image = Some(ArtifactUpload::new(filename, bytes));
            }
            AUDIO_FIELD => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_AUDIO_NAME.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read `audio` field: {}", e))
                })?;
                audio = Some(ArtifactUpload::new(filename, bytes));
            }
            other => {
                debug!(field = other, "ignoring unexpected multipart field");
                let _ = field.bytes().await;
            }
        }
    }

    let image = image.ok_or_else(|| ApiError::bad_request("Missing `image` file field"))?;
    let audio = audio.ok_or_else(|| ApiError::bad_request("Missing `audio` file field"))?;
    if image.bytes.is_empty() {
        return Err(ApiError::bad_request("`image` payload is empty"));
    }
    if audio.bytes.is_empty() {
        return Err(ApiError::bad_request("`audio` payload is empty"));
    }

    info!(
        image = %image.filename,
        image_bytes = image.bytes.len(),
        audio = %audio.filename,
        audio_bytes = audio.bytes.len(),
        "processing consultation"
    );

    let consultation = state.pipeline.process(image, audio).await?;
    Ok(Json(consultation))
}
