// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use alloy::primitives::{keccak256, Address, Bytes, B256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use qf_config::ChainConstants;
use qf_evm::{DigestSigner, MessageHasher};

enum HashMode {
    Keccak,
    Fail(String),
    Stall(Duration),
}

/// Stands in for the receiver's `getMessageHash`.
pub struct FakeHasher {
    mode: HashMode,
    calls: AtomicUsize,
}

impl FakeHasher {
    fn with_mode(mode: HashMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn keccak() -> Self {
        Self::with_mode(HashMode::Keccak)
    }

    pub fn failing(reason: &str) -> Self {
        Self::with_mode(HashMode::Fail(reason.to_string()))
    }

    pub fn stalled(delay: Duration) -> Self {
        Self::with_mode(HashMode::Stall(delay))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageHasher for FakeHasher {
    async fn message_hash(&self, _chain: &ChainConstants, payload: &Bytes) -> Result<B256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            HashMode::Keccak => Ok(keccak256(payload)),
            HashMode::Fail(reason) => Err(anyhow!("{reason}")),
            HashMode::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(keccak256(payload))
            }
        }
    }
}

/// Signer whose key is never available.
pub struct FailingSigner;

#[async_trait]
impl DigestSigner for FailingSigner {
    fn address(&self) -> Address {
        Address::ZERO
    }

    async fn sign_digest(&self, _digest: B256) -> Result<Bytes> {
        Err(anyhow!("signing key unavailable"))
    }
}
