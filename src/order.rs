//! # Order Intent Emission
//!
//! Packages the final selections into an [`OrderIntent`] and hands it to the
//! external cart/order collaborator. Submission is a single fire-and-await:
//! no retry, no backoff (the user can simply re-click), and no local state
//! is rolled back on failure — the collaborator's error message is surfaced
//! verbatim and the selections stay intact for resubmission.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LienzoError;

/// Which flow the submit button came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMode {
    Cart,
    BuyNow,
}

/// One selected choice, serialized as display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    pub dimension: String,
    pub choice: String,
}

/// The image handed to the collaborator for persistence: the raw uploaded
/// bytes for single-image flows, or the generated composite for collage.
#[derive(Debug, Clone)]
pub struct OrderImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The outbound order payload. Constructed once per submit action and
/// discarded after the collaborator call returns.
///
/// Wire format is camelCase JSON; the image travels alongside as a binary
/// part, not inline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIntent {
    pub product_id: String,
    pub product_name: String,
    pub category: Option<String>,
    pub quantity: u32,
    /// Unit price in cents, as computed by the price engine.
    pub unit_price: i64,
    /// `unit_price × quantity` in cents.
    pub total_price: i64,
    pub selections: Vec<SelectedOption>,
    /// Flattened selections the collaborator reads by name.
    pub selected_size: Option<String>,
    pub selected_frame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_thickness: Option<String>,
    pub custom_text: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip)]
    pub image: OrderImage,
}

impl OrderIntent {
    /// Selected choice for a dimension label, if present.
    pub fn selection(&self, dimension: &str) -> Option<&str> {
        self.selections
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.choice.as_str())
    }
}

/// Successful response from the order collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceipt {
    #[serde(default)]
    pub message: String,
    /// Collaborator-assigned reference, when it returns one.
    #[serde(default)]
    pub order_ref: Option<String>,
}

/// The order collaborator seam.
///
/// One attempt per call; implementations must not retry internally. Errors
/// are returned as [`LienzoError::Submission`] carrying the collaborator's
/// message verbatim.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit(
        &self,
        intent: &OrderIntent,
        mode: SubmitMode,
    ) -> Result<OrderReceipt, LienzoError>;
}

/// HTTP gateway posting the intent as multipart: a JSON `order` part plus
/// the raw image bytes as an `image` part.
pub struct HttpOrderGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderGateway {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit(
        &self,
        intent: &OrderIntent,
        mode: SubmitMode,
    ) -> Result<OrderReceipt, LienzoError> {
        let order_json = serde_json::to_string(intent)
            .map_err(|e| LienzoError::Submission(format!("Failed to encode order: {}", e)))?;

        let image_part = reqwest::multipart::Part::bytes(intent.image.bytes.clone())
            .file_name(intent.image.filename.clone())
            .mime_str(&intent.image.content_type)
            .map_err(|e| LienzoError::Submission(format!("Invalid image content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("order", order_json)
            .text(
                "mode",
                match mode {
                    SubmitMode::Cart => "cart",
                    SubmitMode::BuyNow => "buy_now",
                },
            )
            .part("image", image_part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LienzoError::Submission(format!("Order request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Surface the collaborator's message verbatim
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!("Order rejected with status {}", status)
            } else {
                body
            };
            return Err(LienzoError::Submission(message));
        }

        response
            .json::<OrderReceipt>()
            .await
            .map_err(|e| LienzoError::Submission(format!("Unreadable order response: {}", e)))
    }
}
