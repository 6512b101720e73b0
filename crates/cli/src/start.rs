// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;

use anyhow::Result;
use qf_config::AppConfig;
use qf_frame_server::FrameServer;
use tracing::{info, instrument};

use crate::helpers::{build_pipeline, frame_links};

#[instrument(skip_all)]
pub async fn execute(config: AppConfig) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let server = FrameServer::builder(Arc::new(pipeline), frame_links(&config))
        .with_server_config(config.server())
        .build();

    let chains: Vec<u64> = config.chain_registry().chain_ids().collect();
    info!(
        origin_chain_id = config.origin_chain_id(),
        chains = ?chains,
        "LAUNCHING FRAME SERVER: {}",
        server.bind_address()
    );
    println!("QF frame server listening on http://{}", server.bind_address());

    server.run().await
}
