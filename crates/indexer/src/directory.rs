// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use qf_config::ValidUrl;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    models::{GraphQlRequest, GraphQlResponse},
    ProjectLookup, ProjectReference,
};

const APPLICATION_QUERY: &str = r#"
query Application($chainId: Int!, $applicationId: String!, $roundId: String!) {
  application(chainId: $chainId, id: $applicationId, roundId: $roundId) {
    id
    anchorAddress
    metadata
    round {
      id
      strategyAddress
    }
  }
}
"#;

/// Resolves a project reference to its display data and round.
///
/// Implementations never fail: anything that goes wrong resolves to an empty lookup so the
/// landing frame can still render its fallback.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn resolve(&self, project: &ProjectReference) -> ProjectLookup;
}

#[derive(Debug, Error)]
enum DirectoryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("query errors: {0}")]
    Query(String),
}

/// Project directory backed by the grants indexer GraphQL api.
pub struct GraphQlDirectory {
    client: reqwest::Client,
    endpoint: ValidUrl,
}

impl GraphQlDirectory {
    pub fn new(endpoint: ValidUrl, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, endpoint })
    }

    async fn fetch(&self, project: &ProjectReference) -> Result<ProjectLookup, DirectoryError> {
        let request = GraphQlRequest {
            query: APPLICATION_QUERY,
            variables: json!({
                "chainId": project.network_id,
                "applicationId": project.project_id,
                "roundId": project.round_id,
            }),
        };

        let response = self
            .client
            .post(self.endpoint.as_url().clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: GraphQlResponse = serde_json::from_str(&body)?;
        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(DirectoryError::Query(messages.join("; ")));
        }

        Ok(response
            .data
            .and_then(|data| data.application)
            .map(ProjectLookup::from)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ProjectDirectory for GraphQlDirectory {
    #[instrument(skip_all, fields(project = %project))]
    async fn resolve(&self, project: &ProjectReference) -> ProjectLookup {
        match self.fetch(project).await {
            Ok(lookup) => {
                debug!(found = lookup.round.is_some(), "resolved project");
                lookup
            }
            Err(e) => {
                warn!(error = %e, "project lookup failed, using empty lookup");
                ProjectLookup::empty()
            }
        }
    }
}
