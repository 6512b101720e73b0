// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::collections::HashMap;

use crate::{
    contract::ContractAddresses,
    rpc::{RpcAuth, RPC},
};
use alloy_primitives::Address;
use anyhow::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Hash, Eq, Deserialize, Serialize)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    #[serde(default)]
    pub rpc_auth: RpcAuth,
    pub contracts: ContractAddresses,
}

impl ChainConfig {
    pub fn rpc_url(&self) -> Result<RPC> {
        RPC::from_url(&self.rpc_url)
            .map_err(|e| anyhow!("Failed to parse RPC URL for chain {}: {}", self.name, e))
    }
}

/// Everything the pipeline needs to know about one chain. Built once from configuration and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConstants {
    pub chain_id: u64,
    pub name: String,
    pub donation_relay: Address,
    pub message_receiver: Address,
    pub wrapped_native: Address,
}

impl ChainConstants {
    /// CAIP-2 identifier the host wallet expects on a transaction descriptor
    pub fn caip2(&self) -> String {
        format!("eip155:{}", self.chain_id)
    }
}

impl From<&ChainConfig> for ChainConstants {
    fn from(value: &ChainConfig) -> Self {
        ChainConstants {
            chain_id: value.chain_id,
            name: value.name.clone(),
            donation_relay: value.contracts.donation_relay,
            message_receiver: value.contracts.message_receiver,
            wrapped_native: value.contracts.wrapped_native,
        }
    }
}

/// Read-only lookup of chain constants keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainConstants>,
}

impl ChainRegistry {
    pub fn from_configs(configs: &[ChainConfig]) -> Result<Self> {
        let mut chains = HashMap::with_capacity(configs.len());
        for config in configs {
            for (label, address) in config.contracts.all() {
                if address == Address::ZERO {
                    warn!(chain = %config.name, contract = label, "contract address is zero");
                }
            }
            let constants = ChainConstants::from(config);
            if chains.insert(config.chain_id, constants).is_some() {
                bail!(
                    "Chain id {} is configured more than once (last seen as '{}')",
                    config.chain_id,
                    config.name
                );
            }
        }
        Ok(Self { chains })
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainConstants> {
        self.chains.get(&chain_id)
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.chains.contains_key(&chain_id)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(name: &str, chain_id: u64) -> ChainConfig {
        ChainConfig {
            name: name.to_string(),
            chain_id,
            rpc_url: "http://localhost:8545".to_string(),
            rpc_auth: RpcAuth::None,
            contracts: ContractAddresses {
                donation_relay: Address::repeat_byte(0x01),
                message_receiver: Address::repeat_byte(0x02),
                wrapped_native: Address::repeat_byte(0x03),
            },
        }
    }

    #[test]
    fn registry_lookup() -> Result<()> {
        let registry = ChainRegistry::from_configs(&[chain("optimism", 10), chain("arbitrum", 42161)])?;
        let op = registry.get(10).context("optimism missing")?;
        assert_eq!(op.name, "optimism");
        assert_eq!(op.caip2(), "eip155:10");
        assert_eq!(op.wrapped_native, Address::repeat_byte(0x03));
        assert!(registry.contains(42161));
        assert!(registry.get(1).is_none());
        Ok(())
    }

    #[test]
    fn duplicate_chain_ids_are_rejected() {
        let result = ChainRegistry::from_configs(&[chain("a", 10), chain("b", 10)]);
        assert!(result.is_err());
    }
}
