// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

use qf_bridge::{AssemblyError, QuoteError};
use qf_evm::{AttestationError, VoteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Project {0} has no round in the directory")]
    ProjectNotFound(String),
    #[error("Project lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// What the frame should offer the donor after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Show the project's fallback view.
    Fallback,
    /// Let the donor press confirm again.
    RetryConfirm,
    /// Start over from the project lookup.
    RestartFromLookup,
    /// A bug; retrying will not help.
    None,
}

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Lookup failure: {0}")]
    Lookup(#[from] LookupError),
    #[error("Encoding failure: {0}")]
    Encoding(#[from] VoteError),
    #[error("Attestation failure: {0}")]
    Attestation(#[from] AttestationError),
    #[error("Quote failure: {0}")]
    Quote(#[from] QuoteError),
    #[error("Assembly failure: {0}")]
    Assembly(#[from] AssemblyError),
}

impl DonationError {
    /// Stable name for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DonationError::Lookup(_) => "LookupFailure",
            DonationError::Encoding(_) => "EncodingFailure",
            DonationError::Attestation(_) => "AttestationFailure",
            DonationError::Quote(_) => "QuoteFailure",
            DonationError::Assembly(_) => "AssemblyFailure",
        }
    }

    pub fn recovery(&self) -> Recovery {
        match self {
            DonationError::Lookup(_) => Recovery::Fallback,
            DonationError::Encoding(_) => Recovery::None,
            DonationError::Attestation(_) | DonationError::Quote(_) => Recovery::RetryConfirm,
            DonationError::Assembly(_) => Recovery::RestartFromLookup,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.recovery() != Recovery::None
    }
}
