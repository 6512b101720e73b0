// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Expected <network>/<round>/<project> but got '{0}'")]
    Shape(String),
    #[error("Network id '{0}' is not a number")]
    Network(String),
    #[error("Round and project ids must not be empty")]
    EmptySegment,
}

/// Identifies a project application: chain, round and project id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReference {
    pub network_id: u64,
    pub round_id: String,
    pub project_id: String,
}

impl ProjectReference {
    pub fn from_parts(network: &str, round: &str, project: &str) -> Result<Self, ReferenceError> {
        let network_id = network
            .trim()
            .parse()
            .map_err(|_| ReferenceError::Network(network.to_string()))?;
        let round_id = round.trim();
        let project_id = project.trim();
        if round_id.is_empty() || project_id.is_empty() {
            return Err(ReferenceError::EmptySegment);
        }
        Ok(Self {
            network_id,
            round_id: round_id.to_string(),
            project_id: project_id.to_string(),
        })
    }
}

impl FromStr for ProjectReference {
    type Err = ReferenceError;

    /// Parses `<network>/<round>/<project>`, ignoring surrounding slashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim_matches('/').split('/').collect();
        match parts.as_slice() {
            [network, round, project] => Self::from_parts(network, round, project),
            _ => Err(ReferenceError::Shape(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.network_id, self.round_id, self.project_id)
    }
}
