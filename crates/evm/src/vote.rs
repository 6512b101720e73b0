// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::fmt;

use alloy::{
    primitives::{address, Address, Bytes, U256},
    sol_types::{sol_data, SolType},
};
use thiserror::Error;

use crate::contracts::{Permit2Data, PermitTransferFrom, TokenPermissions};

/// Sentinel the allocation strategy uses for the chain's native token.
pub const NATIVE_TOKEN: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// How the strategy should pull the voted tokens. Native votes carry the value with the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PermitType {
    None = 0,
    Permit = 1,
    Permit2 = 2,
}

/// Assets a donation can be made in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonationAsset {
    #[default]
    Native,
}

impl DonationAsset {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "ETH" => Some(DonationAsset::Native),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DonationAsset::Native => "ETH",
        }
    }

    pub fn token(&self) -> Address {
        match self {
            DonationAsset::Native => NATIVE_TOKEN,
        }
    }
}

impl fmt::Display for DonationAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A donor's request to vote `amount` wei for the project whose anchor is `recipient_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationIntent {
    pub recipient_id: Address,
    pub amount: U256,
    pub asset: DonationAsset,
}

impl DonationIntent {
    pub fn native(recipient_id: Address, amount: U256) -> Self {
        Self {
            recipient_id,
            amount,
            asset: DonationAsset::Native,
        }
    }

    pub fn encode(&self) -> Result<EncodedVote, VoteError> {
        encode_vote(self.recipient_id, self.amount)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("Donation amount must be greater than zero")]
    ZeroAmount,
    #[error("Recipient id is the zero address")]
    ZeroRecipient,
    #[error("Asset '{0}' is not supported")]
    UnsupportedAsset(String),
}

/// The ABI-encoded ballot the destination strategy decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedVote(Bytes);

impl EncodedVote {
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Encode a native-token vote as `(address recipientId, uint8 permitType, Permit2Data permit)`.
///
/// The permit is zero-filled apart from the token (the native sentinel) and the amount, and the
/// permit type is `None` since native votes carry their value with the call. Deterministic: the
/// same intent always yields the same bytes.
pub fn encode_vote(recipient_id: Address, amount: U256) -> Result<EncodedVote, VoteError> {
    if amount.is_zero() {
        return Err(VoteError::ZeroAmount);
    }
    if recipient_id == Address::ZERO {
        return Err(VoteError::ZeroRecipient);
    }

    let permit = Permit2Data {
        permit: PermitTransferFrom {
            permitted: TokenPermissions {
                token: NATIVE_TOKEN,
                amount,
            },
            nonce: U256::ZERO,
            deadline: U256::ZERO,
        },
        signature: Bytes::new(),
    };

    let encoded = <(sol_data::Address, sol_data::Uint<8>, Permit2Data)>::abi_encode_params(&(
        recipient_id,
        PermitType::None as u8,
        permit,
    ));
    Ok(EncodedVote(encoded.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETH_TO_AA: &str = concat!(
        "000000000000000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000060",
        "000000000000000000000000eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
        "0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000000000000000000000000000000000a0",
        "0000000000000000000000000000000000000000000000000000000000000000",
    );

    fn one_eth() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn encodes_native_vote_layout() {
        let vote = encode_vote(Address::repeat_byte(0xaa), one_eth()).unwrap();
        assert_eq!(hex::encode(vote.as_bytes()), ONE_ETH_TO_AA);
    }

    #[test]
    fn encoding_is_deterministic() {
        let intent = DonationIntent::native(Address::repeat_byte(0x11), U256::from(42u64));
        assert_eq!(intent.encode().unwrap(), intent.encode().unwrap());

        let other = DonationIntent::native(Address::repeat_byte(0x11), U256::from(43u64));
        assert_ne!(intent.encode().unwrap(), other.encode().unwrap());
    }

    #[test]
    fn decodes_back_to_the_intent() {
        let recipient = Address::repeat_byte(0x42);
        let vote = encode_vote(recipient, U256::from(7u64)).unwrap();

        let (decoded_recipient, permit_type, permit) =
            <(sol_data::Address, sol_data::Uint<8>, Permit2Data)>::abi_decode_params(vote.as_bytes()).unwrap();
        assert_eq!(decoded_recipient, recipient);
        assert_eq!(permit_type, PermitType::None as u8);
        assert_eq!(permit.permit.permitted.token, NATIVE_TOKEN);
        assert_eq!(permit.permit.permitted.amount, U256::from(7u64));
        assert!(permit.signature.is_empty());
    }

    #[test]
    fn rejects_degenerate_intents() {
        assert_eq!(
            encode_vote(Address::repeat_byte(0x01), U256::ZERO),
            Err(VoteError::ZeroAmount)
        );
        assert_eq!(
            encode_vote(Address::ZERO, U256::from(1u64)),
            Err(VoteError::ZeroRecipient)
        );
    }

    #[test]
    fn asset_symbols() {
        assert_eq!(DonationAsset::from_symbol("eth"), Some(DonationAsset::Native));
        assert_eq!(DonationAsset::from_symbol(" ETH "), Some(DonationAsset::Native));
        assert_eq!(DonationAsset::from_symbol("USDC"), None);
        assert_eq!(DonationAsset::Native.token(), NATIVE_TOKEN);
    }
}
