// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

/// One user intent per request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectAsset(String),
    /// Amount as typed by the donor, in ether.
    SetAmount(String),
    Confirm,
    SubmissionFailed,
    Back,
    Reset,
    QfNext,
    QfPrev,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectAsset(_) => "select asset",
            Action::SetAmount(_) => "set amount",
            Action::Confirm => "confirm",
            Action::SubmissionFailed => "submission failed",
            Action::Back => "back",
            Action::Reset => "reset",
            Action::QfNext => "next slide",
            Action::QfPrev => "previous slide",
        }
    }

    /// Map a frame button press (and the text input, if any) to an action.
    pub fn from_interaction(button_value: Option<&str>, input_text: Option<&str>) -> Option<Self> {
        let value = button_value?.trim();
        if let Some(symbol) = value.strip_prefix("asset:") {
            return Some(Action::SelectAsset(symbol.to_string()));
        }
        match value {
            "amount" => Some(Action::SetAmount(input_text.unwrap_or_default().to_string())),
            "confirm" => Some(Action::Confirm),
            "back" => Some(Action::Back),
            "reset" => Some(Action::Reset),
            "next" => Some(Action::QfNext),
            "prev" => Some(Action::QfPrev),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buttons() {
        assert_eq!(
            Action::from_interaction(Some("asset:ETH"), None),
            Some(Action::SelectAsset("ETH".to_string()))
        );
        assert_eq!(
            Action::from_interaction(Some("amount"), Some("0.5")),
            Some(Action::SetAmount("0.5".to_string()))
        );
        assert_eq!(
            Action::from_interaction(Some("amount"), None),
            Some(Action::SetAmount(String::new()))
        );
        assert_eq!(Action::from_interaction(Some("next"), None), Some(Action::QfNext));
        assert_eq!(Action::from_interaction(Some("wat"), None), None);
        assert_eq!(Action::from_interaction(None, Some("1")), None);
    }
}
