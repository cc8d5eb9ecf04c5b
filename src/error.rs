//! # Error Types
//!
//! This module defines error types used throughout the lienzo library.
//!
//! The variants mirror the failure taxonomy of the customization flow:
//! validation problems are recoverable by the user immediately, decode
//! problems leave the frame empty, and submission problems surface the
//! collaborator's message verbatim. None of them destroy entered state.

use thiserror::Error;

/// Main error type for lienzo operations
#[derive(Debug, Error)]
pub enum LienzoError {
    /// Rejected user input (bad file type, oversized file, missing
    /// required text or image before submit)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Image failed to decode into the canvas
    #[error("Decode error: {0}")]
    Decode(String),

    /// The order collaborator rejected the request or the network failed
    #[error("Submission error: {0}")]
    Submission(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
