// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::env;

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::RpcClient,
    signers::local::PrivateKeySigner,
    transports::http::{
        reqwest::{
            header::{HeaderMap, HeaderValue, AUTHORIZATION},
            Client,
        },
        Http,
    },
};
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use qf_config::{RpcAuth, RPC};

pub trait AuthConversions {
    fn to_header_value(&self) -> Option<HeaderValue>;
}

impl AuthConversions for RpcAuth {
    fn to_header_value(&self) -> Option<HeaderValue> {
        match self {
            RpcAuth::None => None,
            RpcAuth::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                HeaderValue::from_str(&format!("Basic {}", credentials)).ok()
            }
            RpcAuth::Bearer(token) => HeaderValue::from_str(&format!("Bearer {}", token)).ok(),
        }
    }
}

pub struct ProviderConfig {
    rpc: RPC,
    auth: RpcAuth,
}

impl ProviderConfig {
    pub fn new(rpc: RPC, auth: RpcAuth) -> Self {
        Self { rpc, auth }
    }

    /// A read-only provider for `eth_call`s. Connecting is lazy so no request is made here.
    pub fn create_readonly_provider(&self) -> Result<DynProvider> {
        let provider = ProviderBuilder::new().connect_client(self.create_http_client()?);
        Ok(provider.erased())
    }

    fn create_http_client(&self) -> Result<RpcClient> {
        let mut headers = HeaderMap::new();
        if let Some(auth_header) = self.auth.to_header_value() {
            headers.insert(AUTHORIZATION, auth_header);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let http = Http::with_client(client, self.rpc.as_http_url()?);
        Ok(RpcClient::new(http, self.rpc.is_local()))
    }
}

/// Read the attestation key from `var` and scrub it from the process environment.
pub fn load_signer_from_env(var: &str) -> Result<PrivateKeySigner> {
    let private_key =
        env::var(var).with_context(|| format!("Signer key env var `{var}` is not set"))?;
    env::remove_var(var);
    private_key
        .trim()
        .parse()
        .with_context(|| format!("`{var}` does not hold a valid private key"))
}
