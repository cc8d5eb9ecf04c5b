//! # Step Controller
//!
//! The customization flow is a three-state wizard:
//!
//! ```text
//! design ──continue──▶ upload ──continue──▶ preview
//!   ▲                    │  ▲                  │
//!   └───────back─────────┘  └──────back────────┘
//! ```
//!
//! Forward progress from `upload` is guarded on image presence; backward
//! navigation is always allowed and never loses data. There is no way to
//! reach `preview` without passing the guard.

use serde::{Deserialize, Serialize};

use crate::error::LienzoError;

/// Wizard position. `Preview` is terminal for this flow — submit exits to
/// the external order collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Design,
    Upload,
    Preview,
}

impl Step {
    /// Attempt to advance one step.
    ///
    /// `has_image` is the template-specific readiness: a non-null single
    /// image, or at least one filled collage slot. Rejected attempts return
    /// a validation error and the caller keeps its current step.
    pub fn advance(self, has_image: bool) -> Result<Step, LienzoError> {
        match self {
            Step::Design => Ok(Step::Upload),
            Step::Upload => {
                if has_image {
                    Ok(Step::Preview)
                } else {
                    Err(LienzoError::Validation(
                        "Please upload at least one photo before continuing".to_string(),
                    ))
                }
            }
            Step::Preview => Err(LienzoError::Validation(
                "Already at the preview step".to_string(),
            )),
        }
    }

    /// Step backward. Unconditional; `Design` stays put.
    pub fn back(self) -> Step {
        match self {
            Step::Design => Step::Design,
            Step::Upload => Step::Design,
            Step::Preview => Step::Upload,
        }
    }
}
