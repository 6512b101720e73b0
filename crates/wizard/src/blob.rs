// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;

use crate::{errors::BlobError, state::SessionState};

impl SessionState {
    /// Opaque blob handed back to the frame host: json, base64url without padding.
    pub fn to_blob(&self) -> Result<String, BlobError> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    pub fn from_blob(blob: &str) -> Result<Self, BlobError> {
        let json = URL_SAFE_NO_PAD.decode(blob.trim())?;
        let state: SessionState = serde_json::from_slice(&json)?;
        if !state.wizard.is_consistent() {
            return Err(BlobError::Inconsistent);
        }
        Ok(state)
    }

    /// A missing or unreadable blob starts a fresh session.
    pub fn from_blob_or_default(blob: Option<&str>) -> Self {
        match blob.filter(|b| !b.trim().is_empty()) {
            None => SessionState::default(),
            Some(blob) => SessionState::from_blob(blob).unwrap_or_else(|e| {
                debug!(error = %e, "discarding unreadable session blob");
                SessionState::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QfSlide, Step, WizardState};
    use alloy_primitives::U256;

    fn sample() -> SessionState {
        SessionState {
            wizard: WizardState {
                step: Step::AmountSet,
                donate_asset: "ETH".to_string(),
                donate_amount: U256::from(10u64).pow(U256::from(18u64)),
            },
            qf_slide: QfSlide::new(1),
        }
    }

    #[test]
    fn blob_round_trips() -> Result<(), BlobError> {
        for state in [SessionState::default(), sample()] {
            let blob = state.to_blob()?;
            assert!(!blob.contains('='));
            assert!(!blob.contains('+') && !blob.contains('/'));
            assert_eq!(SessionState::from_blob(&blob)?, state);
        }
        Ok(())
    }

    #[test]
    fn bad_blobs_start_fresh() {
        assert!(matches!(
            SessionState::from_blob("***"),
            Err(BlobError::Encoding(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(
            SessionState::from_blob(&not_json),
            Err(BlobError::Json(_))
        ));
        let impossible = URL_SAFE_NO_PAD.encode(r#"{"step":"Confirmed"}"#);
        assert!(matches!(
            SessionState::from_blob(&impossible),
            Err(BlobError::Inconsistent)
        ));

        assert_eq!(
            SessionState::from_blob_or_default(Some("***")),
            SessionState::default()
        );
        assert_eq!(SessionState::from_blob_or_default(None), SessionState::default());
    }
}
