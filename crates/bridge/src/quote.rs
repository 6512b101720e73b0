// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

use alloy::{
    hex,
    primitives::{Address, Bytes, U256},
};
use anyhow::Context;
use async_trait::async_trait;
use qf_config::ValidUrl;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Safety margin applied on top of the quoted relay fee, in percent.
pub const FEE_MARGIN_PERCENT: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub input_token: Address,
    pub output_token: Address,
    pub amount: U256,
    pub recipient: Address,
    pub message: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeQuote {
    pub total_relay_fee: U256,
    pub timestamp: u64,
}

impl BridgeQuote {
    /// `floor(fee * 101 / 100)`. `None` only if the fee is absurdly close to `U256::MAX`.
    pub fn fee_with_margin(&self) -> Option<U256> {
        self.total_relay_fee
            .checked_mul(U256::from(100 + FEE_MARGIN_PERCENT))
            .map(|scaled| scaled / U256::from(100u64))
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Bridge quote request failed: {0}")]
    Request(String),
    #[error("Bridge quote request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Bridge quoter answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Bridge quote could not be parsed: {0}")]
    Malformed(String),
    #[error("Donation amount is too low to be bridged")]
    AmountTooLow,
}

/// Anything that can price the relay of a deposit between two chains.
#[async_trait]
pub trait FeeQuoter: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<BridgeQuote, QuoteError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestedFees {
    total_relay_fee: Option<RelayFee>,
    timestamp: Option<NumberOrString>,
    #[serde(default)]
    is_amount_too_low: bool,
}

#[derive(Debug, Deserialize)]
struct RelayFee {
    total: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

/// Read a suggested-fees response body into a quote.
pub fn parse_suggested_fees(body: &str) -> Result<BridgeQuote, QuoteError> {
    let fees: SuggestedFees =
        serde_json::from_str(body).map_err(|e| QuoteError::Malformed(e.to_string()))?;

    if fees.is_amount_too_low {
        return Err(QuoteError::AmountTooLow);
    }

    let total = fees
        .total_relay_fee
        .and_then(|fee| fee.total)
        .ok_or_else(|| QuoteError::Malformed("missing totalRelayFee.total".to_string()))?;
    let total_relay_fee: U256 = total
        .parse()
        .map_err(|_| QuoteError::Malformed(format!("totalRelayFee.total '{total}' is not a number")))?;

    let timestamp = match fees.timestamp {
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::String(s)) => s
            .parse()
            .map_err(|_| QuoteError::Malformed(format!("timestamp '{s}' is not a number")))?,
        None => return Err(QuoteError::Malformed("missing timestamp".to_string())),
    };

    Ok(BridgeQuote {
        total_relay_fee,
        timestamp,
    })
}

/// Quotes through the Across suggested-fees endpoint.
pub struct AcrossQuoter {
    client: reqwest::Client,
    endpoint: ValidUrl,
    timeout: Duration,
}

impl AcrossQuoter {
    pub fn new(endpoint: ValidUrl, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    fn query(request: &QuoteRequest) -> Vec<(&'static str, String)> {
        vec![
            ("inputToken", request.input_token.to_string()),
            ("outputToken", request.output_token.to_string()),
            ("originChainId", request.origin_chain_id.to_string()),
            ("destinationChainId", request.destination_chain_id.to_string()),
            ("amount", request.amount.to_string()),
            ("recipient", request.recipient.to_string()),
            ("message", hex::encode_prefixed(&request.message)),
        ]
    }
}

#[async_trait]
impl FeeQuoter for AcrossQuoter {
    #[instrument(skip_all, fields(origin = request.origin_chain_id, destination = request.destination_chain_id))]
    async fn quote(&self, request: &QuoteRequest) -> Result<BridgeQuote, QuoteError> {
        let response = self
            .client
            .get(self.endpoint.as_url().clone())
            .query(&Self::query(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuoteError::Timeout(self.timeout)
                } else {
                    QuoteError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                QuoteError::Timeout(self.timeout)
            } else {
                QuoteError::Request(e.to_string())
            }
        })?;
        if !status.is_success() {
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let quote = parse_suggested_fees(&body)?;
        debug!(fee = %quote.total_relay_fee, timestamp = quote.timestamp, "received relay fee quote");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};

    async fn serve(status: StatusCode, body: &'static str) -> std::io::Result<ValidUrl> {
        let server = HttpServer::new(move || {
            App::new().default_service(web::to(move || async move {
                HttpResponse::build(status)
                    .content_type("application/json")
                    .body(body)
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Ok(format!("http://{addr}/api/suggested-fees")
            .parse()
            .expect("valid url"))
    }

    fn request() -> QuoteRequest {
        QuoteRequest {
            origin_chain_id: 10,
            destination_chain_id: 42161,
            input_token: Address::repeat_byte(0x03),
            output_token: Address::repeat_byte(0x04),
            amount: U256::from(1_000_000u64),
            recipient: Address::repeat_byte(0x02),
            message: Bytes::from_static(&[0xde, 0xad]),
        }
    }

    #[test]
    fn test_margin_floors() {
        let quote = BridgeQuote {
            total_relay_fee: U256::from(1000u64),
            timestamp: 0,
        };
        assert_eq!(quote.fee_with_margin(), Some(U256::from(1010u64)));

        let quote = BridgeQuote {
            total_relay_fee: U256::from(99u64),
            timestamp: 0,
        };
        // 99 * 1.01 = 99.99
        assert_eq!(quote.fee_with_margin(), Some(U256::from(99u64)));

        let quote = BridgeQuote {
            total_relay_fee: U256::MAX,
            timestamp: 0,
        };
        assert_eq!(quote.fee_with_margin(), None);
    }

    #[test]
    fn test_parse_suggested_fees() {
        let quote = parse_suggested_fees(
            r#"{"totalRelayFee":{"pct":"1000","total":"1000"},"timestamp":"1700000000","isAmountTooLow":false}"#,
        )
        .unwrap();
        assert_eq!(quote.total_relay_fee, U256::from(1000u64));
        assert_eq!(quote.timestamp, 1_700_000_000);

        let quote =
            parse_suggested_fees(r#"{"totalRelayFee":{"total":"5"},"timestamp":1700000001}"#).unwrap();
        assert_eq!(quote.timestamp, 1_700_000_001);
    }

    #[test]
    fn test_parse_rejections() {
        assert!(matches!(
            parse_suggested_fees(r#"{"totalRelayFee":{"total":"5"},"timestamp":"1","isAmountTooLow":true}"#),
            Err(QuoteError::AmountTooLow)
        ));
        assert!(matches!(
            parse_suggested_fees(r#"{"timestamp":"1"}"#),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_suggested_fees(r#"{"totalRelayFee":{"total":"lots"},"timestamp":"1"}"#),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_suggested_fees("<html>"),
            Err(QuoteError::Malformed(_))
        ));
    }

    #[actix_web::test]
    async fn test_quote_over_http() -> anyhow::Result<()> {
        let endpoint = serve(
            StatusCode::OK,
            r#"{"totalRelayFee":{"total":"1000"},"timestamp":"1700000000"}"#,
        )
        .await?;
        let quoter = AcrossQuoter::new(endpoint, Duration::from_secs(5))?;

        let quote = quoter.quote(&request()).await?;
        assert_eq!(quote.total_relay_fee, U256::from(1000u64));
        Ok(())
    }

    #[actix_web::test]
    async fn test_server_error_is_a_quote_failure() -> anyhow::Result<()> {
        let endpoint = serve(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await?;
        let quoter = AcrossQuoter::new(endpoint, Duration::from_secs(5))?;

        let err = quoter.quote(&request()).await.unwrap_err();
        assert!(matches!(err, QuoteError::Status { status: 500, .. }));
        Ok(())
    }
}
