// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// A url that has been parsed at configuration time so services never see a malformed endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidUrl(Url);

impl ValidUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Join a path segment without dropping the last segment of the base.
    pub fn join_path(&self, tail: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            tail.trim_start_matches('/')
        )
    }
}

impl FromStr for ValidUrl {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ValidUrl(Url::parse(s)?))
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<ValidUrl> for String {
    fn from(value: ValidUrl) -> Self {
        value.0.to_string()
    }
}

impl Serialize for ValidUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ValidUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_keeps_base_segments() -> anyhow::Result<()> {
        let gateway: ValidUrl = "https://ipfs.io/ipfs".parse()?;
        assert_eq!(gateway.join_path("bafyBanner"), "https://ipfs.io/ipfs/bafyBanner");

        let gateway: ValidUrl = "https://ipfs.io/ipfs/".parse()?;
        assert_eq!(gateway.join_path("/bafyBanner"), "https://ipfs.io/ipfs/bafyBanner");
        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!("::not-a-url".parse::<ValidUrl>().is_err());
    }
}
