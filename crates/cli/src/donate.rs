// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::utils::parse_ether;
use anyhow::{Context, Result};
use qf_config::AppConfig;
use qf_donation::DonationRequest;
use qf_indexer::ProjectReference;
use tracing::instrument;

use crate::helpers::build_pipeline;

#[instrument(skip_all, fields(project = %project))]
pub async fn execute(config: &AppConfig, project: &ProjectReference, amount: &str) -> Result<()> {
    let amount = parse_ether(amount).with_context(|| format!("'{amount}' is not an ether amount"))?;
    let pipeline = build_pipeline(config)?;

    let prepared = pipeline
        .prepare(
            project,
            &DonationRequest {
                asset: "ETH".to_string(),
                amount,
            },
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&prepared)?);
    Ok(())
}
