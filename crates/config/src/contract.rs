// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// The contracts a chain needs to take part in a donation, either as the origin of the bridge
/// deposit or as the destination where the vote is cast.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractAddresses {
    /// Origin side entrypoint exposing `callDepositV3(params, message)`
    pub donation_relay: Address,
    /// Destination side handler that receives the bridged funds and message. It is also the
    /// contract queried for the message hash.
    pub message_receiver: Address,
    /// Wrapped native token used as the bridge input/output token for native donations
    pub wrapped_native: Address,
}

impl ContractAddresses {
    pub fn all(&self) -> [(&'static str, Address); 3] {
        [
            ("donation_relay", self.donation_relay),
            ("message_receiver", self.message_receiver),
            ("wrapped_native", self.wrapped_native),
        ]
    }
}
