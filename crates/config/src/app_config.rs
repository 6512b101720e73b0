// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::chain_config::{ChainConfig, ChainRegistry};
use crate::load_config::{find_in_parent, resolve_config_path, DEFAULT_CONFIG_NAME, ENV_PREFIX};
use crate::validation::ValidUrl;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{
    env, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_INDEXER_URL: &str = "https://grants-stack-indexer-v2.gitcoin.co/graphql";
pub const DEFAULT_QUOTE_URL: &str = "https://app.across.to/api/suggested-fees";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.gitcoin.co";
pub const DEFAULT_SIGNER_ENV: &str = "QF_FRAME_SIGNER_KEY";
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;

/// Where the frame HTTP server binds
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// The configuration as it is written in the yaml file, before anything has been validated.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct UnscopedAppConfig {
    /// Chain the donor pays on. Must be one of `chains`.
    origin_chain_id: Option<u64>,
    /// GraphQL endpoint of the grants indexer
    indexer_url: String,
    /// Relay fee quoting endpoint (suggested fees)
    quote_url: String,
    /// Gateway prefix for banner images
    ipfs_gateway: String,
    /// Explorer used for the plain "Donate" redirect
    explorer_url: String,
    /// Timeout applied to every remote call
    call_timeout_ms: u64,
    /// Name of the env var holding the attestation signer's private key
    signer_env: String,
    server: ServerConfig,
    chains: Vec<ChainConfig>,
}

impl Default for UnscopedAppConfig {
    fn default() -> Self {
        Self {
            origin_chain_id: None,
            indexer_url: DEFAULT_INDEXER_URL.to_string(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
            signer_env: DEFAULT_SIGNER_ENV.to_string(),
            server: ServerConfig::default(),
            chains: vec![],
        }
    }
}

impl UnscopedAppConfig {
    /// Validate and convert into the config used throughout the app
    pub fn into_app_config(self, config_file: &Path) -> Result<AppConfig> {
        let Some(origin_chain_id) = self.origin_chain_id else {
            bail!("`origin_chain_id` is required so donations know which chain they are paid on");
        };

        if self.call_timeout_ms == 0 {
            bail!("`call_timeout_ms` must be greater than zero");
        }

        for chain in &self.chains {
            chain.rpc_url()?;
        }

        let registry = ChainRegistry::from_configs(&self.chains)?;
        if !registry.contains(origin_chain_id) {
            bail!(
                "Origin chain {} has no entry under `chains`. Add its rpc_url and contracts.",
                origin_chain_id
            );
        }

        Ok(AppConfig {
            origin_chain_id,
            indexer_url: parse_url("indexer_url", &self.indexer_url)?,
            quote_url: parse_url("quote_url", &self.quote_url)?,
            ipfs_gateway: parse_url("ipfs_gateway", &self.ipfs_gateway)?,
            explorer_url: parse_url("explorer_url", &self.explorer_url)?,
            call_timeout_ms: self.call_timeout_ms,
            signer_env: self.signer_env,
            server: self.server,
            chains: self.chains,
            config_file: config_file.to_path_buf(),
            registry,
        })
    }
}

fn parse_url(field: &str, value: &str) -> Result<ValidUrl> {
    value
        .parse()
        .with_context(|| format!("`{field}` is not a valid url: '{value}'"))
}

/// The config actually used throughout the app
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    origin_chain_id: u64,
    indexer_url: ValidUrl,
    quote_url: ValidUrl,
    ipfs_gateway: ValidUrl,
    explorer_url: ValidUrl,
    call_timeout_ms: u64,
    signer_env: String,
    server: ServerConfig,
    chains: Vec<ChainConfig>,
    config_file: PathBuf,
    #[serde(skip)]
    registry: ChainRegistry,
}

impl AppConfig {
    pub fn origin_chain_id(&self) -> u64 {
        self.origin_chain_id
    }

    pub fn indexer_url(&self) -> &ValidUrl {
        &self.indexer_url
    }

    pub fn quote_url(&self) -> &ValidUrl {
        &self.quote_url
    }

    pub fn ipfs_gateway(&self) -> &ValidUrl {
        &self.ipfs_gateway
    }

    pub fn explorer_url(&self) -> &ValidUrl {
        &self.explorer_url
    }

    /// Timeout applied to each remote call site
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn signer_env(&self) -> &str {
        &self.signer_env
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get the chains config
    pub fn chains(&self) -> &[ChainConfig] {
        &self.chains
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// The immutable chain constant table built when the config was loaded
    pub fn chain_registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qf-frame"))
    }
}

/// Load the config at the given file or search for `qf-frame.config.yaml` if none is given.
///
/// A missing file is reported as an [`io::ErrorKind::NotFound`] so callers can tell it apart from
/// a broken configuration.
pub fn load_config(config_file: Option<String>) -> Result<AppConfig> {
    let cwd = env::current_dir()?;
    let default_dir = OsDirs::config_dir().unwrap_or_else(|| cwd.clone());
    let explicit = config_file.map(PathBuf::from);

    let resolved = resolve_config_path(
        find_in_parent,
        &cwd,
        &default_dir,
        DEFAULT_CONFIG_NAME,
        explicit.as_deref(),
    );

    if !resolved.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Configuration file not found at {}", resolved.display()),
        )
        .into());
    }

    load_config_from(&resolved)
}

/// Layer defaults, the yaml file and `QF_FRAME_*` environment overrides.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let signer_key = DEFAULT_SIGNER_ENV.trim_start_matches(ENV_PREFIX).to_lowercase();
    let config: UnscopedAppConfig = Figment::from(Serialized::defaults(UnscopedAppConfig::default()))
        .merge(Yaml::file(path))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .ignore(&[signer_key.as_str()]),
        )
        .extract()
        .context("Could not parse configuration")?;

    config
        .into_app_config(path)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}
