// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Donation progress. Strictly linear: `Idle -> AssetSelected -> AmountSet -> Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    AssetSelected,
    AmountSet,
    Confirmed,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Idle => "idle",
            Step::AssetSelected => "asset selected",
            Step::AmountSet => "amount set",
            Step::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// The primary slice: which step the donor is on and what they entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardState {
    pub step: Step,
    pub donate_asset: String,
    /// Wei
    pub donate_amount: U256,
}

impl WizardState {
    /// Inputs later steps rely on must be present.
    pub fn is_consistent(&self) -> bool {
        match self.step {
            Step::Idle => self.donate_asset.is_empty() && self.donate_amount.is_zero(),
            Step::AssetSelected => !self.donate_asset.is_empty() && self.donate_amount.is_zero(),
            Step::AmountSet | Step::Confirmed => {
                !self.donate_asset.is_empty() && !self.donate_amount.is_zero()
            }
        }
    }
}

/// Explainer slide index, clamped to `[0, QfSlide::LAST]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct QfSlide(u8);

impl QfSlide {
    pub const LAST: u8 = 2;

    pub fn new(index: u8) -> Self {
        Self(index.min(Self::LAST))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.0 < Self::LAST
    }

    pub fn has_prev(&self) -> bool {
        self.0 > 0
    }
}

impl From<u8> for QfSlide {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<QfSlide> for u8 {
    fn from(value: QfSlide) -> Self {
        value.0
    }
}

/// Everything a frame session carries between requests. Both slices travel in one blob but are
/// reduced independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(flatten)]
    pub wizard: WizardState,
    #[serde(default)]
    pub qf_slide: QfSlide,
}
