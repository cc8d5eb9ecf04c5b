//! HTTP API handlers.

pub mod order;
pub mod photo;
pub mod session;

use axum::http::StatusCode;

use crate::error::LienzoError;

/// Map a lienzo error to the HTTP status it should surface as.
pub(crate) fn error_status(err: &LienzoError) -> StatusCode {
    match err {
        LienzoError::Validation(_) | LienzoError::Decode(_) => StatusCode::BAD_REQUEST,
        LienzoError::Submission(_) => StatusCode::BAD_GATEWAY,
        LienzoError::Image(_) | LienzoError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a lienzo error to a `(status, message)` rejection pair.
pub(crate) fn error_response(err: LienzoError) -> (StatusCode, String) {
    (error_status(&err), err.to_string())
}
