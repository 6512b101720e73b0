// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Address;
use qf_config::ValidUrl;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The round a project application belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundInfo {
    pub round_id: String,
    pub strategy_address: Address,
    pub anchor_address: Option<Address>,
}

/// What the directory knows about a project. Every field is optional: an unknown project and an
/// unreachable indexer both resolve to [`ProjectLookup::empty`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLookup {
    pub banner_image: Option<String>,
    pub round: Option<RoundInfo>,
}

impl ProjectLookup {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The project's anchor, the recipient id votes are cast for.
    pub fn anchor_address(&self) -> Option<Address> {
        self.round.as_ref().and_then(|r| r.anchor_address)
    }

    /// Banner url through the gateway, `None` when the project has no banner.
    pub fn banner_url(&self, gateway: &ValidUrl) -> Option<String> {
        self.banner_image.as_deref().map(|cid| gateway.join_path(cid))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest {
    pub query: &'static str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    pub data: Option<ApplicationData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationData {
    pub application: Option<Application>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Application {
    pub anchor_address: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub round: Option<Round>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Round {
    pub id: Option<String>,
    pub strategy_address: Option<String>,
}

fn parse_address(field: &str, value: Option<&str>) -> Option<Address> {
    let raw = value?;
    match raw.parse() {
        Ok(address) => Some(address),
        Err(_) => {
            warn!(field, value = raw, "indexer returned an unparsable address");
            None
        }
    }
}

impl From<Application> for ProjectLookup {
    fn from(application: Application) -> Self {
        let banner_image = application
            .metadata
            .as_ref()
            .and_then(|m| m.pointer("/application/project/bannerImg"))
            .and_then(|v| v.as_str())
            .filter(|cid| !cid.is_empty())
            .map(str::to_string);

        let anchor_address = parse_address("anchorAddress", application.anchor_address.as_deref());
        let round = application.round.and_then(|round| {
            let round_id = round.id?;
            let strategy_address =
                parse_address("strategyAddress", round.strategy_address.as_deref())?;
            Some(RoundInfo {
                round_id,
                strategy_address,
                anchor_address,
            })
        });

        ProjectLookup {
            banner_image,
            round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn application(value: serde_json::Value) -> Application {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_application() {
        let lookup = ProjectLookup::from(application(json!({
            "id": "17",
            "anchorAddress": "0x00000000000000000000000000000000000000aa",
            "metadata": { "application": { "project": { "bannerImg": "bafyBanner" } } },
            "round": { "id": "389", "strategyAddress": "0x00000000000000000000000000000000000000bb" }
        })));

        assert_eq!(lookup.banner_image.as_deref(), Some("bafyBanner"));
        assert_eq!(lookup.anchor_address(), Some(Address::with_last_byte(0xaa)));
        let round = lookup.round.unwrap();
        assert_eq!(round.round_id, "389");
        assert_eq!(round.strategy_address, Address::with_last_byte(0xbb));
    }

    #[test]
    fn test_partial_application() {
        let lookup = ProjectLookup::from(application(json!({
            "anchorAddress": "not-an-address",
            "metadata": { "application": {} },
            "round": { "id": "389", "strategyAddress": "0x00000000000000000000000000000000000000bb" }
        })));
        assert_eq!(lookup.banner_image, None);
        assert!(lookup.round.is_some());
        assert_eq!(lookup.anchor_address(), None);

        let lookup = ProjectLookup::from(application(json!({ "round": null })));
        assert_eq!(lookup, ProjectLookup::empty());
    }

    #[test]
    fn test_banner_url() -> anyhow::Result<()> {
        let gateway: ValidUrl = "https://ipfs.io/ipfs".parse()?;
        let lookup = ProjectLookup {
            banner_image: Some("bafyBanner".to_string()),
            round: None,
        };
        assert_eq!(
            lookup.banner_url(&gateway).as_deref(),
            Some("https://ipfs.io/ipfs/bafyBanner")
        );
        assert_eq!(ProjectLookup::empty().banner_url(&gateway), None);
        Ok(())
    }
}
