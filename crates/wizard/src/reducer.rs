// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::{utils::parse_ether, U256};
use tracing::debug;

use crate::{
    action::Action,
    errors::Rejection,
    state::{QfSlide, SessionState, Step, WizardState},
};

/// Asset symbols the wizard offers. Only the native currency for now.
pub const SUPPORTED_ASSETS: &[&str] = &["ETH"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The donor confirmed; the caller runs the donation pipeline exactly once.
    Submit,
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub outcome: Outcome,
}

impl Transition {
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, Outcome::Rejected(_))
    }
}

/// Apply one action. Rejected actions return the input state unchanged.
pub fn reduce(state: &SessionState, action: &Action) -> Transition {
    let mut next = state.clone();
    let result = {
        let mut reducer = SessionReducer::new(&mut next);
        match action {
            Action::QfNext => {
                reducer.explainer().next();
                Ok(Outcome::Applied)
            }
            Action::QfPrev => {
                reducer.explainer().prev();
                Ok(Outcome::Applied)
            }
            other => reducer.wizard().apply(other),
        }
    };

    match result {
        Ok(outcome) => Transition {
            state: next,
            outcome,
        },
        Err(rejection) => {
            debug!(action = action.name(), step = %state.wizard.step, %rejection, "action rejected");
            Transition {
                state: state.clone(),
                outcome: Outcome::Rejected(rejection),
            }
        }
    }
}

/// Splits mutable access to the session into its two independent slices.
struct SessionReducer<'a> {
    state: &'a mut SessionState,
}

impl<'a> SessionReducer<'a> {
    fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }

    fn wizard(&mut self) -> WizardReducer<'_> {
        WizardReducer {
            wizard: &mut self.state.wizard,
        }
    }

    fn explainer(&mut self) -> ExplainerReducer<'_> {
        ExplainerReducer {
            slide: &mut self.state.qf_slide,
        }
    }
}

struct ExplainerReducer<'a> {
    slide: &'a mut QfSlide,
}

impl ExplainerReducer<'_> {
    fn next(&mut self) {
        *self.slide = self.slide.next();
    }

    fn prev(&mut self) {
        *self.slide = self.slide.prev();
    }
}

struct WizardReducer<'a> {
    wizard: &'a mut WizardState,
}

impl WizardReducer<'_> {
    fn apply(&mut self, action: &Action) -> Result<Outcome, Rejection> {
        match (self.wizard.step, action) {
            (Step::Idle, Action::SelectAsset(symbol)) => {
                self.wizard.donate_asset = supported_asset(symbol)?;
                self.wizard.step = Step::AssetSelected;
            }
            (Step::AssetSelected, Action::SetAmount(text)) => {
                self.wizard.donate_amount = parse_amount(text)?;
                self.wizard.step = Step::AmountSet;
            }
            (Step::AmountSet, Action::Confirm) => {
                self.wizard.step = Step::Confirmed;
                return Ok(Outcome::Submit);
            }
            (Step::Confirmed, Action::SubmissionFailed) => {
                self.wizard.step = Step::AmountSet;
            }
            (Step::AssetSelected, Action::Back) => {
                *self.wizard = WizardState::default();
            }
            (Step::AmountSet, Action::Back) => {
                self.wizard.donate_amount = U256::ZERO;
                self.wizard.step = Step::AssetSelected;
            }
            (_, Action::Reset) => {
                *self.wizard = WizardState::default();
            }
            (step, action) => {
                return Err(Rejection::NotAllowed {
                    action: action.name(),
                    step,
                })
            }
        }
        Ok(Outcome::Applied)
    }
}

fn supported_asset(symbol: &str) -> Result<String, Rejection> {
    let wanted = symbol.trim();
    SUPPORTED_ASSETS
        .iter()
        .find(|asset| asset.eq_ignore_ascii_case(wanted))
        .map(|asset| asset.to_string())
        .ok_or_else(|| Rejection::UnsupportedAsset(wanted.to_string()))
}

/// Decimal ether to wei.
fn parse_amount(text: &str) -> Result<U256, Rejection> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(Rejection::InvalidAmount(trimmed.to_string()));
    }
    let wei = parse_ether(trimmed).map_err(|_| Rejection::InvalidAmount(trimmed.to_string()))?;
    if wei.is_zero() {
        return Err(Rejection::ZeroAmount);
    }
    Ok(wei)
}
