// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

use crate::state::Step;

/// Why an action left the state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("{action} is not allowed while {step}")]
    NotAllowed { action: &'static str, step: Step },
    #[error("Asset '{0}' is not supported")]
    UnsupportedAsset(String),
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
}

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("State blob is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("State blob is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("State blob describes an impossible wizard state")]
    Inconsistent,
}
