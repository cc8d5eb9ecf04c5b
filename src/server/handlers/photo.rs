//! Photo upload, clearing and preview API handlers.
//!
//! Uploads follow the ingest token protocol: the token is issued while the
//! session lock is held, the decode runs on the blocking pool with no lock,
//! and the result is committed only if it is still the newest ingest for
//! its target — a stale or mistargeted decode is discarded silently and the
//! session keeps whatever it had.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::customizer::CustomizerSnapshot;
use crate::ingest::{self, IngestTarget, RawUpload, UploadKind};

use super::super::state::AppState;
use super::error_response;
use super::session::with_session;

/// Extract the `image` field from a multipart body.
async fn read_image_field(mut multipart: Multipart) -> Result<RawUpload, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("unknown").to_string();
            let content_type = field.content_type().map(String::from);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read image: {}", e)))?;
            return Ok(RawUpload {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }

    Err((StatusCode::BAD_REQUEST, "No image field found".to_string()))
}

/// Shared upload flow for single-photo and slot targets.
async fn upload_to_target(
    state: Arc<AppState>,
    id: String,
    target: IngestTarget,
    multipart: Multipart,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let upload = read_image_field(multipart).await?;

    // Reject bad files before a token is issued, so a failed upload never
    // supersedes an in-flight decode
    ingest::validate(&upload, UploadKind::Photo).map_err(error_response)?;

    // Issue the token and capture the target print size under the lock
    let (token, print_size) =
        with_session(&state, &id, |c| {
            let token = c.begin_ingest(target)?;
            Ok((token, c.target_print_size()))
        })
        .await?;

    // Decode off the request path; the session stays interactive
    let image = ingest::ingest(upload, UploadKind::Photo, print_size)
        .await
        .map_err(error_response)?;

    let snapshot = with_session(&state, &id, |c| {
        let accepted = c.commit_ingest(token, image)?;
        if !accepted {
            println!("[photo] Discarded stale upload for session {}", id);
        }
        Ok(c.snapshot())
    })
    .await?;

    Ok(Json(snapshot))
}

/// POST /api/session/:id/photo - Upload the single photo.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    upload_to_target(state, id, IngestTarget::Single, multipart).await
}

/// POST /api/session/:id/slot/:index/photo - Upload into a collage slot.
pub async fn upload_slot(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, usize)>,
    multipart: Multipart,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    upload_to_target(state, id, IngestTarget::Slot(index), multipart).await
}

/// DELETE /api/session/:id/photo - Clear the single photo.
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.clear_photo();
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/session/:id/slot/:index/photo - Clear one collage slot.
pub async fn clear_slot(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.clear_slot(index)?;
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/session/:id/slots - Clear every collage slot.
pub async fn clear_slots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.clear_slots();
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// GET /api/session/:id/preview - PNG preview of the current canvas or
/// collage composite.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Clone the customizer to release the lock before rendering
    let customizer = with_session(&state, &id, |c| Ok(c.clone())).await?;

    let png_bytes = tokio::task::spawn_blocking(move || customizer.render_preview_png())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Render task failed: {}", e),
            )
        })?
        .map_err(error_response)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
