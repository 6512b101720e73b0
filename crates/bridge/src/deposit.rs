// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use qf_config::ChainConstants;
use qf_evm::{
    contracts::{DepositParams, IDonationRelay},
    DonationIntent,
};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::quote::BridgeQuote;

/// Seconds a relayer has to fill the deposit, counted from assembly time.
pub const FILL_DEADLINE_WINDOW_SECS: u64 = 6 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Relay fee with margin overflows")]
    FeeOverflow,
    #[error("Donation amount plus relay fee overflows")]
    AmountOverflow,
    #[error("Quote timestamp {0} does not fit in 32 bits")]
    QuoteTimestampOutOfRange(u64),
    #[error("Fill deadline {0} does not fit in 32 bits")]
    FillDeadlineOutOfRange(u64),
    #[error("Chain {0} is not configured")]
    UnknownChain(u64),
    #[error("Project has no anchor address to vote for")]
    MissingAnchor,
    #[error("Fill deadline {fill_deadline} is not after quote timestamp {quote_timestamp}")]
    DeadlineNotAfterQuote {
        fill_deadline: u32,
        quote_timestamp: u32,
    },
    #[error("System clock unavailable: {0}")]
    ClockUnavailable(String),
}

/// The arguments of a single `callDepositV3` on the origin relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParameters {
    pub recipient: Address,
    pub input_token: Address,
    pub output_token: Address,
    pub input_amount: U256,
    pub output_amount: U256,
    pub destination_chain_id: u64,
    pub exclusive_relayer: Address,
    pub quote_timestamp: u32,
    pub fill_deadline: u32,
    pub exclusivity_deadline: u32,
}

impl From<&DepositParameters> for DepositParams {
    fn from(value: &DepositParameters) -> Self {
        DepositParams {
            recipient: value.recipient,
            inputToken: value.input_token,
            outputToken: value.output_token,
            inputAmount: value.input_amount,
            outputAmount: value.output_amount,
            destinationChainId: U256::from(value.destination_chain_id),
            exclusiveRelayer: value.exclusive_relayer,
            quoteTimestamp: value.quote_timestamp,
            fillDeadline: value.fill_deadline,
            exclusivityDeadline: value.exclusivity_deadline,
        }
    }
}

/// Combine a quote and an intent into deposit parameters.
///
/// The relayer delivers exactly the donation to `round_contract` on the destination chain, so the
/// donor pays the donation plus the quoted fee with its margin. Pure: `now` is the unix time in
/// seconds.
pub fn assemble(
    quote: &BridgeQuote,
    intent: &DonationIntent,
    origin: &ChainConstants,
    destination: &ChainConstants,
    round_contract: Address,
    now: u64,
) -> Result<DepositParameters, AssemblyError> {
    let fee = quote.fee_with_margin().ok_or(AssemblyError::FeeOverflow)?;
    let input_amount = intent
        .amount
        .checked_add(fee)
        .ok_or(AssemblyError::AmountOverflow)?;

    let quote_timestamp = u32::try_from(quote.timestamp)
        .map_err(|_| AssemblyError::QuoteTimestampOutOfRange(quote.timestamp))?;
    let deadline = now.saturating_add(FILL_DEADLINE_WINDOW_SECS);
    let fill_deadline =
        u32::try_from(deadline).map_err(|_| AssemblyError::FillDeadlineOutOfRange(deadline))?;
    if fill_deadline <= quote_timestamp {
        return Err(AssemblyError::DeadlineNotAfterQuote {
            fill_deadline,
            quote_timestamp,
        });
    }

    Ok(DepositParameters {
        recipient: round_contract,
        input_token: origin.wrapped_native,
        output_token: destination.wrapped_native,
        input_amount,
        output_amount: intent.amount,
        destination_chain_id: destination.chain_id,
        exclusive_relayer: Address::ZERO,
        quote_timestamp,
        fill_deadline,
        exclusivity_deadline: 0,
    })
}

/// What the host wallet needs to send the deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    pub chain_id: String,
    pub to: Address,
    pub data: Bytes,
    #[serde(serialize_with = "as_decimal")]
    pub value: U256,
}

fn as_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Calldata for `callDepositV3(params, message)` on the origin relay, paying `inputAmount`.
pub fn build_transaction(
    params: &DepositParameters,
    message: &Bytes,
    origin: &ChainConstants,
) -> TransactionDescriptor {
    let call = IDonationRelay::callDepositV3Call {
        params: params.into(),
        message: message.clone(),
    };

    TransactionDescriptor {
        chain_id: origin.caip2(),
        to: origin.donation_relay,
        data: call.abi_encode().into(),
        value: params.input_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimism() -> ChainConstants {
        ChainConstants {
            chain_id: 10,
            name: "optimism".to_string(),
            donation_relay: Address::repeat_byte(0x11),
            message_receiver: Address::repeat_byte(0x12),
            wrapped_native: Address::repeat_byte(0x13),
        }
    }

    fn arbitrum() -> ChainConstants {
        ChainConstants {
            chain_id: 42161,
            name: "arbitrum".to_string(),
            donation_relay: Address::repeat_byte(0x21),
            message_receiver: Address::repeat_byte(0x22),
            wrapped_native: Address::repeat_byte(0x23),
        }
    }

    fn one_eth() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    const NOW: u64 = 1_700_000_100;
    const ROUND: Address = Address::repeat_byte(0x5a);

    #[test]
    fn test_assemble_one_eth() {
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1000u64),
            timestamp: 1_700_000_000,
        };
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), one_eth());

        let params = assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, NOW).unwrap();

        assert_eq!(params.output_amount, one_eth());
        assert_eq!(params.input_amount, one_eth() + U256::from(1010u64));
        assert_eq!(params.recipient, ROUND);
        assert_eq!(params.input_token, optimism().wrapped_native);
        assert_eq!(params.output_token, arbitrum().wrapped_native);
        assert_eq!(params.destination_chain_id, 42161);
        assert_eq!(params.exclusive_relayer, Address::ZERO);
        assert_eq!(params.exclusivity_deadline, 0);
        assert_eq!(params.quote_timestamp, 1_700_000_000);
        assert_eq!(params.fill_deadline as u64, NOW + 21_600);
        assert!(params.fill_deadline > params.quote_timestamp);
    }

    #[test]
    fn test_deadline_must_follow_quote() {
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1000u64),
            timestamp: 1_700_000_000,
        };
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), one_eth());

        assert_eq!(
            assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, 0),
            Err(AssemblyError::DeadlineNotAfterQuote {
                fill_deadline: 21_600,
                quote_timestamp: 1_700_000_000,
            })
        );

        // Relay clock a full window ahead of ours.
        let ahead = 1_700_000_000 - FILL_DEADLINE_WINDOW_SECS;
        assert!(matches!(
            assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, ahead),
            Err(AssemblyError::DeadlineNotAfterQuote { .. })
        ));

        let params =
            assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, ahead + 1).unwrap();
        assert_eq!(params.fill_deadline, 1_700_000_001);
    }

    #[test]
    fn test_recipient_is_the_round_contract() {
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1000u64),
            timestamp: 1_700_000_000,
        };
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), one_eth());
        let message = Bytes::from_static(&[0xca, 0xfe]);

        let first = assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, NOW).unwrap();
        let other_round = Address::repeat_byte(0x6b);
        let second =
            assemble(&quote, &intent, &optimism(), &arbitrum(), other_round, NOW).unwrap();

        assert_eq!(second.recipient, other_round);
        assert_ne!(
            build_transaction(&first, &message, &optimism()).data,
            build_transaction(&second, &message, &optimism()).data
        );
    }

    #[test]
    fn test_input_covers_output_plus_margin() {
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), U256::from(5u64));
        for fee in [0u64, 1, 99, 100, 12_345, 1_000_000_007] {
            let quote = BridgeQuote {
                total_relay_fee: U256::from(fee),
                timestamp: 1,
            };
            let params = assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, NOW).unwrap();
            assert_eq!(
                params.input_amount,
                params.output_amount + U256::from(fee * 101 / 100)
            );
            assert!(params.input_amount >= params.output_amount);
        }
    }

    #[test]
    fn test_out_of_range_values() {
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), U256::from(5u64));
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1u64),
            timestamp: u64::from(u32::MAX) + 1,
        };
        assert_eq!(
            assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, NOW),
            Err(AssemblyError::QuoteTimestampOutOfRange(u64::from(u32::MAX) + 1))
        );

        let quote = BridgeQuote {
            total_relay_fee: U256::from(1u64),
            timestamp: 1,
        };
        let late = u64::from(u32::MAX);
        assert!(matches!(
            assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, late),
            Err(AssemblyError::FillDeadlineOutOfRange(_))
        ));

        let greedy = DonationIntent::native(Address::repeat_byte(0xaa), U256::MAX);
        assert_eq!(
            assemble(&quote, &greedy, &optimism(), &arbitrum(), ROUND, NOW),
            Err(AssemblyError::AmountOverflow)
        );
    }

    #[test]
    fn test_build_transaction() {
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1000u64),
            timestamp: 1_700_000_000,
        };
        let intent = DonationIntent::native(Address::repeat_byte(0xaa), one_eth());
        let params = assemble(&quote, &intent, &optimism(), &arbitrum(), ROUND, NOW).unwrap();
        let message = Bytes::from_static(&[0xca, 0xfe]);

        let tx = build_transaction(&params, &message, &optimism());
        assert_eq!(tx.chain_id, "eip155:10");
        assert_eq!(tx.to, optimism().donation_relay);
        assert_eq!(tx.value, params.input_amount);
        assert_eq!(&tx.data[..4], IDonationRelay::callDepositV3Call::SELECTOR.as_slice());

        let decoded = IDonationRelay::callDepositV3Call::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.message, message);
        assert_eq!(decoded.params, DepositParams::from(&params));

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["chainId"], "eip155:10");
        assert_eq!(json["value"], "1000000000000001010");
    }
}
