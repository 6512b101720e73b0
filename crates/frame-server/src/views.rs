// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{utils::format_ether, U256};
use qf_bridge::TransactionDescriptor;
use qf_config::ValidUrl;
use qf_donation::Recovery;
use qf_indexer::{ProjectLookup, ProjectReference};
use qf_wizard::{QfSlide, Step, WizardState, SUPPORTED_ASSETS};

use crate::types::{Button, FrameImage, FrameResponse, View};

pub const GENERIC_FAILURE: &str = "Something went wrong, try again";

/// External locations the frames link to.
#[derive(Debug, Clone)]
pub struct FrameLinks {
    pub ipfs_gateway: ValidUrl,
    pub explorer_url: ValidUrl,
}

impl FrameLinks {
    fn explorer(&self, project: Option<&ProjectReference>) -> String {
        match project {
            Some(project) => self.explorer_url.join_path(&format!("#/{project}")),
            None => self.explorer_url.to_string(),
        }
    }
}

struct FramePaths {
    frame: String,
    explainer: String,
    donate: String,
    tx: String,
}

impl FramePaths {
    fn new(project: &ProjectReference) -> Self {
        Self {
            frame: format!("/frame/{project}"),
            explainer: format!("/what-is-qf/{project}"),
            donate: format!("/donate/{project}"),
            tx: format!("/donate/{project}/tx"),
        }
    }
}

fn slide(title: &str, lines: &[&str]) -> FrameImage {
    FrameImage::Slide {
        title: title.to_string(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// `500000000000000000` wei as `0.5`.
pub fn display_ether(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}

pub fn landing(
    links: &FrameLinks,
    project: Option<&ProjectReference>,
    lookup: &ProjectLookup,
    state: String,
) -> FrameResponse {
    let mut buttons = vec![Button::link("Donate", links.explorer(project))];
    if let Some(project) = project {
        let paths = FramePaths::new(project);
        buttons.push(Button::post("What is QF?", &paths.explainer, None));
        buttons.push(Button::post("Donate cross-chain", &paths.donate, None));
    }

    FrameResponse::new(
        View::Landing,
        FrameImage::Banner {
            url: lookup.banner_url(&links.ipfs_gateway),
        },
        buttons,
        state,
    )
}

/// Explainer slides. Back returns to the wizard step the donor left from.
pub fn explainer(
    project: &ProjectReference,
    step: Step,
    qf_slide: QfSlide,
    state: String,
) -> FrameResponse {
    let paths = FramePaths::new(project);
    let image = match qf_slide.index() {
        0 => slide("Unlock the power of community funding", &[]),
        1 => slide(
            "What is QF?",
            &["Quadratic Funding (QF) is a crowdfunding approach that leverages community donations to allocate funds. Donations act as votes, with broader support resulting in larger matches."],
        ),
        _ => slide(
            "Why QF?",
            &[
                "MANY DONATIONS WIN",
                "MULTIPLIED BY REAL PEOPLE",
                "FOR REAL PEOPLE",
            ],
        ),
    };

    let back = match step {
        Step::Idle => Button::reset("Back", &paths.frame),
        Step::AssetSelected | Step::AmountSet | Step::Confirmed => {
            Button::post("Back", &paths.donate, None)
        }
    };
    let mut buttons = vec![back];
    if qf_slide.has_prev() {
        buttons.push(Button::post("PREVIOUS", &paths.explainer, Some("prev")));
    }
    if qf_slide.has_next() {
        buttons.push(Button::post("NEXT", &paths.explainer, Some("next")));
    }

    FrameResponse::new(View::WhatIsQf, image, buttons, state)
}

/// The wizard frame for whatever step the donor is on.
pub fn wizard(project: &ProjectReference, wizard: &WizardState, state: String) -> FrameResponse {
    let paths = FramePaths::new(project);
    match wizard.step {
        Step::Idle => {
            let mut buttons: Vec<Button> = SUPPORTED_ASSETS
                .iter()
                .map(|asset| {
                    let value = format!("asset:{asset}");
                    Button::post(asset, &paths.donate, Some(value.as_str()))
                })
                .collect();
            buttons.push(Button::reset("Back", &paths.frame));
            buttons.push(Button::post("What is QF?", &paths.explainer, None));
            FrameResponse::new(
                View::SelectAsset,
                slide("Choose what to donate", &[]),
                buttons,
                state,
            )
        }
        Step::AssetSelected => FrameResponse::new(
            View::EnterAmount,
            slide(&format!("How much {} do you want to donate?", wizard.donate_asset), &[]),
            vec![
                Button::post("Back", &paths.donate, Some("back")),
                Button::post("Continue", &paths.donate, Some("amount")),
                Button::post("What is QF?", &paths.explainer, None),
            ],
            state,
        )
        .with_text_input(&format!("Amount in {}", wizard.donate_asset)),
        Step::AmountSet => FrameResponse::new(
            View::Confirm,
            slide(
                &format!(
                    "Donate {} {}",
                    display_ether(wizard.donate_amount),
                    wizard.donate_asset
                ),
                &["A relay fee is added on top of your donation."],
            ),
            vec![
                Button::post("Back", &paths.donate, Some("back")),
                Button::tx("Confirm", &paths.tx),
                Button::post("What is QF?", &paths.explainer, None),
            ],
            state,
        ),
        Step::Confirmed => FrameResponse::new(
            View::Submitted,
            slide("Thank you for your donation!", &[]),
            vec![Button::post("Donate again", &paths.donate, Some("reset"))],
            state,
        ),
    }
}

pub fn submitted(
    project: &ProjectReference,
    wizard_state: &WizardState,
    transaction: TransactionDescriptor,
    state: String,
) -> FrameResponse {
    wizard(project, wizard_state, state).with_transaction(transaction)
}

/// Generic failure frame. Buttons follow what the failure allows.
pub fn failure(project: &ProjectReference, recovery: Recovery, state: String) -> FrameResponse {
    let paths = FramePaths::new(project);
    let buttons = match recovery {
        Recovery::RetryConfirm => vec![
            Button::post("Back", &paths.donate, Some("back")),
            Button::tx("Try again", &paths.tx),
        ],
        Recovery::Fallback | Recovery::RestartFromLookup | Recovery::None => {
            vec![Button::reset("Start over", &paths.frame)]
        }
    };
    FrameResponse::new(View::Error, slide(GENERIC_FAILURE, &[]), buttons, state)
        .with_message(GENERIC_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ButtonAction;

    #[test]
    fn ether_display() {
        assert_eq!(display_ether(U256::from(500_000_000_000_000_000u64)), "0.5");
        assert_eq!(display_ether(U256::from(10u64).pow(U256::from(18u64))), "1");
        assert_eq!(display_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn explainer_buttons_follow_slide() {
        let project: ProjectReference = "10/389/2".parse().unwrap();
        let labels = |slide: u8| -> Vec<String> {
            explainer(&project, Step::Idle, QfSlide::new(slide), String::new())
                .buttons
                .into_iter()
                .map(|b| b.label)
                .collect()
        };
        assert_eq!(labels(0), vec!["Back", "NEXT"]);
        assert_eq!(labels(1), vec!["Back", "PREVIOUS", "NEXT"]);
        assert_eq!(labels(2), vec!["Back", "PREVIOUS"]);
    }

    #[test]
    fn explainer_back_keeps_wizard_progress() {
        let project: ProjectReference = "10/389/2".parse().unwrap();
        let back = |step: Step| {
            explainer(&project, step, QfSlide::new(1), String::new())
                .buttons
                .remove(0)
                .action
        };

        assert!(matches!(
            back(Step::Idle),
            ButtonAction::Reset { target } if target == "/frame/10/389/2"
        ));
        assert!(matches!(
            back(Step::AmountSet),
            ButtonAction::Post { target, value: None } if target == "/donate/10/389/2"
        ));
    }

    #[test]
    fn wizard_steps_link_the_explainer() {
        let project: ProjectReference = "10/389/2".parse().unwrap();
        for step in [Step::Idle, Step::AssetSelected, Step::AmountSet] {
            let wizard_state = WizardState {
                step,
                ..WizardState::default()
            };
            let response = wizard(&project, &wizard_state, String::new());
            assert!(response.buttons.iter().any(|b| matches!(
                &b.action,
                ButtonAction::Post { target, .. } if target == "/what-is-qf/10/389/2"
            )));
        }
    }
}
