// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use alloy::primitives::Address;
use async_trait::async_trait;
use qf_indexer::{ProjectDirectory, ProjectLookup, ProjectReference, RoundInfo};

/// Strategy contract of the round `FakeDirectory::found` resolves to.
pub const ROUND_STRATEGY: Address = Address::repeat_byte(0x5a);

/// Directory that answers every reference with the same lookup.
pub struct FakeDirectory {
    lookup: ProjectLookup,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn new(lookup: ProjectLookup) -> Self {
        Self {
            lookup,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A project in round `389` whose anchor is `anchor`.
    pub fn found(anchor: Address) -> Self {
        Self::in_round(anchor, "389", ROUND_STRATEGY)
    }

    pub fn in_round(anchor: Address, round_id: &str, strategy: Address) -> Self {
        Self::new(ProjectLookup {
            banner_image: Some("bafyBanner".to_string()),
            round: Some(RoundInfo {
                round_id: round_id.to_string(),
                strategy_address: strategy,
                anchor_address: Some(anchor),
            }),
        })
    }

    pub fn not_found() -> Self {
        Self::new(ProjectLookup::empty())
    }

    /// Answer only after `delay`.
    pub fn stalled(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectDirectory for FakeDirectory {
    async fn resolve(&self, _project: &ProjectReference) -> ProjectLookup {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.lookup.clone()
    }
}
