//! Order submission API handler.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::order::SubmitMode;

use super::error_status;
use super::session::with_session;
use super::super::state::AppState;

/// Request body for order submission.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub mode: SubmitMode,
}

/// POST /api/session/:id/submit - Submit the order intent.
///
/// Single attempt, no retry. A failure surfaces the collaborator's message
/// verbatim; the session state is untouched either way, so the user can
/// simply resubmit.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let gateway = state.gateway.clone().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({
            "success": false,
            "error": "No order endpoint configured"
        })),
    ))?;

    // Clone the session's customizer so the lock is not held across the
    // collaborator call
    let customizer = with_session(&state, &id, |c| Ok(c.clone()))
        .await
        .map_err(|(status, message)| {
            (
                status,
                Json(serde_json::json!({"success": false, "error": message})),
            )
        })?;

    println!(
        "[order] Submitting session {} ({:?}, {} item(s))",
        id,
        req.mode,
        customizer.quantity()
    );

    match customizer.submit(gateway.as_ref(), req.mode).await {
        Ok(receipt) => Ok(Json(serde_json::json!({
            "success": true,
            "message": if receipt.message.is_empty() {
                "Order placed successfully".to_string()
            } else {
                receipt.message
            },
            "orderRef": receipt.order_ref,
        }))),
        Err(err) => Err((
            error_status(&err),
            Json(serde_json::json!({"success": false, "error": err.to_string()})),
        )),
    }
}
