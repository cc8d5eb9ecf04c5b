//! Session lifecycle and customization API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::{CatalogProduct, TemplateKind};
use crate::customizer::{Customizer, CustomizerSnapshot};
use crate::error::LienzoError;

use super::super::state::{AppState, CustomizerSession};
use super::error_response;

/// Response from session creation.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: String,
    #[serde(flatten)]
    pub snapshot: CustomizerSnapshot,
}

/// POST /api/session - Start a customization session.
///
/// The body is an optional catalog product record; omitted fields (or the
/// whole body) fall back to the default product.
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CatalogProduct>>,
) -> Json<CreateResponse> {
    let product = body.map(|Json(p)| p).unwrap_or_default();
    let customizer = Customizer::new(product);
    let snapshot = customizer.snapshot();

    let session_id = Uuid::new_v4();
    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id, CustomizerSession::new(customizer));
    }
    println!("[session] Created {} for '{}'", session_id, snapshot.product_id);

    Json(CreateResponse {
        id: session_id.to_string(),
        snapshot,
    })
}

/// Run a closure against one session, touching it and mapping errors.
pub(crate) async fn with_session<T>(
    state: &AppState,
    id: &str,
    f: impl FnOnce(&mut Customizer) -> Result<T, LienzoError>,
) -> Result<T, (StatusCode, String)> {
    let session_id = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&session_id).ok_or((
        StatusCode::NOT_FOUND,
        "Session not found or expired".to_string(),
    ))?;
    session.touch();

    f(&mut session.customizer).map_err(error_response)
}

/// GET /api/session/:id - Current session snapshot.
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| Ok(c.snapshot())).await?;
    Ok(Json(snapshot))
}

/// Request body for choice selection.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub dimension: String,
    pub choice: String,
}

/// POST /api/session/:id/select - Select an option choice.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.select(&req.dimension, &req.choice)?;
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// Request body for template changes.
#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: TemplateKind,
}

/// POST /api/session/:id/template - Change the design template.
pub async fn template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.set_template(req.template);
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

/// POST /api/session/:id/quantity - Set the order quantity.
pub async fn quantity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<QuantityRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.set_quantity(req.quantity)?;
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// POST /api/session/:id/text - Set the custom text.
pub async fn text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TextRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        c.set_custom_text(&req.text);
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// Wizard navigation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Continue,
    Back,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub action: StepAction,
}

/// POST /api/session/:id/step - Advance or go back in the wizard.
pub async fn step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StepRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        match req.action {
            StepAction::Continue => {
                c.continue_step()?;
            }
            StepAction::Back => {
                c.back_step();
            }
        }
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// Canvas adjustments.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasAction {
    ZoomIn,
    ZoomOut,
    Rotate,
}

#[derive(Debug, Deserialize)]
pub struct CanvasRequest {
    pub action: CanvasAction,
}

/// POST /api/session/:id/canvas - Zoom or rotate the placed photo.
pub async fn canvas(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CanvasRequest>,
) -> Result<Json<CustomizerSnapshot>, (StatusCode, String)> {
    let snapshot = with_session(&state, &id, |c| {
        match req.action {
            CanvasAction::ZoomIn => c.zoom_in()?,
            CanvasAction::ZoomOut => c.zoom_out()?,
            CanvasAction::Rotate => c.rotate()?,
        }
        Ok(c.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}
