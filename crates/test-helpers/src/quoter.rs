// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use alloy::primitives::U256;
use async_trait::async_trait;
use qf_bridge::{BridgeQuote, FeeQuoter, QuoteError, QuoteRequest};

enum QuoteMode {
    Quote(BridgeQuote),
    Status(u16),
    TooLow,
    Stall(Duration),
}

/// Relay fee service double. Records the last request it was asked to price.
pub struct FakeQuoter {
    mode: QuoteMode,
    calls: AtomicUsize,
    last_request: Mutex<Option<QuoteRequest>>,
}

impl FakeQuoter {
    fn with_mode(mode: QuoteMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn quoting(total_relay_fee: u64, timestamp: u64) -> Self {
        Self::with_mode(QuoteMode::Quote(BridgeQuote {
            total_relay_fee: U256::from(total_relay_fee),
            timestamp,
        }))
    }

    /// Answers with an HTTP error status.
    pub fn status(status: u16) -> Self {
        Self::with_mode(QuoteMode::Status(status))
    }

    pub fn amount_too_low() -> Self {
        Self::with_mode(QuoteMode::TooLow)
    }

    pub fn stalled(delay: Duration) -> Self {
        Self::with_mode(QuoteMode::Stall(delay))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<QuoteRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FeeQuoter for FakeQuoter {
    async fn quote(&self, request: &QuoteRequest) -> Result<BridgeQuote, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        match &self.mode {
            QuoteMode::Quote(quote) => Ok(quote.clone()),
            QuoteMode::Status(status) => Err(QuoteError::Status {
                status: *status,
                body: "fake failure".to_string(),
            }),
            QuoteMode::TooLow => Err(QuoteError::AmountTooLow),
            QuoteMode::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Err(QuoteError::Request("stalled".to_string()))
            }
        }
    }
}
