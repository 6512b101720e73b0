// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod routes;
mod types;
mod views;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use qf_config::ServerConfig;
use qf_donation::DonationPipeline;
use std::sync::Arc;
use tracing::info;

pub use routes::{configure, FrameContext};
pub use types::*;
pub use views::{display_ether, FrameLinks, GENERIC_FAILURE};

#[derive(Clone)]
pub struct FrameServerBuilder {
    pipeline: Arc<DonationPipeline>,
    links: FrameLinks,
    port: Option<u16>,
    host: Option<String>,
}

impl FrameServerBuilder {
    pub fn new(pipeline: Arc<DonationPipeline>, links: FrameLinks) -> Self {
        Self {
            pipeline,
            links,
            port: None,
            host: None,
        }
    }

    /// Set the port number (default: 3000)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the host address (default: "0.0.0.0")
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_server_config(self, server: &ServerConfig) -> Self {
        self.with_host(server.host.clone()).with_port(server.port)
    }

    pub fn build(self) -> FrameServer {
        let defaults = ServerConfig::default();
        FrameServer {
            context: FrameContext {
                pipeline: self.pipeline,
                links: self.links,
            },
            port: self.port.unwrap_or(defaults.port),
            host: self.host.unwrap_or(defaults.host),
        }
    }
}

#[derive(Clone)]
pub struct FrameServer {
    context: FrameContext,
    port: u16,
    host: String,
}

impl FrameServer {
    pub fn builder(pipeline: Arc<DonationPipeline>, links: FrameLinks) -> FrameServerBuilder {
        FrameServerBuilder::new(pipeline, links)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run the HTTP server until it is stopped
    pub async fn run(&self) -> Result<()> {
        let bind_addr = self.bind_address();
        let context = self.context.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(context.clone()))
                .wrap(Logger::default())
                .configure(configure)
        })
        .bind(&bind_addr)?;

        info!("QF frame server listening on http://{}", bind_addr);
        server.run().await.map_err(Into::into)
    }
}
