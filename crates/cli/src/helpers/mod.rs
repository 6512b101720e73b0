// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;

use anyhow::Result;
use qf_bridge::AcrossQuoter;
use qf_config::AppConfig;
use qf_donation::DonationPipeline;
use qf_evm::{helpers::load_signer_from_env, MessageAttestor, RpcMessageHasher};
use qf_frame_server::FrameLinks;
use qf_indexer::GraphQlDirectory;
use tracing::info;

pub mod telemetry;

/// Wire the live directory, attestor and quoter from configuration.
pub fn build_pipeline(config: &AppConfig) -> Result<DonationPipeline> {
    let call_timeout = config.call_timeout();

    let directory = GraphQlDirectory::new(config.indexer_url().clone(), call_timeout)?;
    let hasher = RpcMessageHasher::connect(config.chains())?;
    let signer = load_signer_from_env(config.signer_env())?;
    info!(attestor = %signer.address(), "Attestation signer loaded");
    let attestor = MessageAttestor::new(Arc::new(hasher), Arc::new(signer), call_timeout);
    let quoter = AcrossQuoter::new(config.quote_url().clone(), call_timeout)?;

    Ok(DonationPipeline::new(
        Arc::new(config.chain_registry().clone()),
        config.origin_chain_id(),
        Arc::new(directory),
        attestor,
        Arc::new(quoter),
        call_timeout,
    ))
}

pub fn frame_links(config: &AppConfig) -> FrameLinks {
    FrameLinks {
        ipfs_gateway: config.ipfs_gateway().clone(),
        explorer_url: config.explorer_url().clone(),
    }
}
