// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use qf_config::{ChainConfig, ChainRegistry, ContractAddresses, RpcAuth};

pub const ORIGIN_CHAIN_ID: u64 = 10;
pub const DESTINATION_CHAIN_ID: u64 = 42161;

fn chain(name: &str, chain_id: u64, seed: u8) -> ChainConfig {
    ChainConfig {
        name: name.to_string(),
        chain_id,
        rpc_url: format!("http://localhost:{}", 8545 + seed as u16),
        rpc_auth: RpcAuth::None,
        contracts: ContractAddresses {
            donation_relay: Address::repeat_byte(seed),
            message_receiver: Address::repeat_byte(seed + 1),
            wrapped_native: Address::repeat_byte(seed + 2),
        },
    }
}

/// Origin chain fixture (id 10). Contracts are `0x11..`, `0x12..`, `0x13..`.
pub fn origin_chain() -> ChainConfig {
    chain("optimism", ORIGIN_CHAIN_ID, 0x11)
}

/// Destination chain fixture (id 42161). Contracts are `0x21..`, `0x22..`, `0x23..`.
pub fn destination_chain() -> ChainConfig {
    chain("arbitrum", DESTINATION_CHAIN_ID, 0x21)
}

pub fn chain_registry() -> ChainRegistry {
    match ChainRegistry::from_configs(&[origin_chain(), destination_chain()]) {
        Ok(registry) => registry,
        Err(e) => panic!("fixture chains are valid: {e}"),
    }
}
