// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use qf_bridge::TransactionDescriptor;
use serde::{Deserialize, Serialize};

/// What the frame host posts when a button is pressed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    pub button_value: Option<String>,
    pub input_text: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Landing,
    WhatIsQf,
    SelectAsset,
    EnterAmount,
    Confirm,
    Submitted,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameImage {
    Banner { url: Option<String> },
    Slide { title: String, lines: Vec<String> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Post back to `target` with `value` as the button value.
    Post {
        target: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Leave the frame.
    Link { href: String },
    /// Go back to the initial frame, discarding state.
    Reset { target: String },
    /// Ask the host wallet to fetch and send the transaction from `target`.
    Tx { target: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn post(label: &str, target: &str, value: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Post {
                target: target.to_string(),
                value: value.map(str::to_string),
            },
        }
    }

    pub fn link(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Link { href },
        }
    }

    pub fn reset(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Reset {
                target: target.to_string(),
            },
        }
    }

    pub fn tx(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Tx {
                target: target.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResponse {
    pub view: View,
    pub image: FrameImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_input: Option<String>,
    pub buttons: Vec<Button>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionDescriptor>,
}

impl FrameResponse {
    pub fn new(view: View, image: FrameImage, buttons: Vec<Button>, state: String) -> Self {
        Self {
            view,
            image,
            text_input: None,
            buttons,
            state,
            message: None,
            transaction: None,
        }
    }

    pub fn with_text_input(mut self, placeholder: &str) -> Self {
        self.text_input = Some(placeholder.to_string());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_transaction(mut self, transaction: TransactionDescriptor) -> Self {
        self.transaction = Some(transaction);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
