// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use alloy::primitives::{Address, U256};
use qf_bridge::{
    assemble, build_transaction, AssemblyError, DepositParameters, FeeQuoter, QuoteError,
    QuoteRequest, TransactionDescriptor,
};
use qf_config::{ChainConstants, ChainRegistry};
use qf_evm::{DonationAsset, DonationIntent, MessageAttestor, VoteError};
use qf_indexer::{ProjectDirectory, ProjectReference};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

use crate::error::{DonationError, LookupError};

/// Unix seconds used for the fill deadline.
pub type Clock = Arc<dyn Fn() -> Result<u64, AssemblyError> + Send + Sync>;

pub fn system_clock() -> Result<u64, AssemblyError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|e| AssemblyError::ClockUnavailable(e.to_string()))
}

/// The donor's confirmed inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub asset: String,
    /// Wei
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedDonation {
    pub transaction: TransactionDescriptor,
    pub deposit: DepositParameters,
    pub attestor: Address,
}

/// Runs lookup, encoding, attestation, quoting and assembly strictly in sequence.
pub struct DonationPipeline {
    chains: Arc<ChainRegistry>,
    origin_chain_id: u64,
    directory: Arc<dyn ProjectDirectory>,
    attestor: MessageAttestor,
    quoter: Arc<dyn FeeQuoter>,
    call_timeout: Duration,
    clock: Clock,
}

impl DonationPipeline {
    pub fn new(
        chains: Arc<ChainRegistry>,
        origin_chain_id: u64,
        directory: Arc<dyn ProjectDirectory>,
        attestor: MessageAttestor,
        quoter: Arc<dyn FeeQuoter>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            chains,
            origin_chain_id,
            directory,
            attestor,
            quoter,
            call_timeout,
            clock: Arc::new(system_clock),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn directory(&self) -> Arc<dyn ProjectDirectory> {
        self.directory.clone()
    }

    /// Produce the deposit transaction for one confirmed donation.
    #[instrument(skip_all, fields(project = %project, amount = %request.amount))]
    pub async fn prepare(
        &self,
        project: &ProjectReference,
        request: &DonationRequest,
    ) -> Result<PreparedDonation, DonationError> {
        match self.run(project, request).await {
            Ok(prepared) => {
                info!(
                    to = %prepared.transaction.to,
                    value = %prepared.transaction.value,
                    "donation transaction prepared"
                );
                Ok(prepared)
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "donation pipeline failed");
                Err(e)
            }
        }
    }

    fn chain(&self, chain_id: u64) -> Result<&ChainConstants, AssemblyError> {
        self.chains
            .get(chain_id)
            .ok_or(AssemblyError::UnknownChain(chain_id))
    }

    async fn run(
        &self,
        project: &ProjectReference,
        request: &DonationRequest,
    ) -> Result<PreparedDonation, DonationError> {
        let lookup = timeout(self.call_timeout, self.directory.resolve(project))
            .await
            .map_err(|_| LookupError::Timeout(self.call_timeout))?;
        let Some(round) = lookup.round else {
            return Err(LookupError::ProjectNotFound(project.to_string()).into());
        };
        debug!(
            round = %round.round_id,
            strategy = %round.strategy_address,
            "project resolved"
        );

        let origin = self.chain(self.origin_chain_id)?;
        let destination = self.chain(project.network_id)?;
        let anchor = round.anchor_address.ok_or(AssemblyError::MissingAnchor)?;

        let asset = DonationAsset::from_symbol(&request.asset)
            .ok_or_else(|| VoteError::UnsupportedAsset(request.asset.clone()))?;
        let intent = DonationIntent {
            recipient_id: anchor,
            amount: request.amount,
            asset,
        };
        let vote = intent.encode()?;

        let signed = self.attestor.attest(destination, &vote).await?;
        debug!(hash = %signed.hash(), "vote attested");
        let message = signed.encode();

        let quote_request = QuoteRequest {
            origin_chain_id: origin.chain_id,
            destination_chain_id: destination.chain_id,
            input_token: origin.wrapped_native,
            output_token: destination.wrapped_native,
            amount: intent.amount,
            recipient: round.strategy_address,
            message: message.clone(),
        };
        let quote = timeout(self.call_timeout, self.quoter.quote(&quote_request))
            .await
            .map_err(|_| QuoteError::Timeout(self.call_timeout))??;
        debug!(fee = %quote.total_relay_fee, "relay fee quoted");

        let now = (self.clock)()?;
        let deposit = assemble(
            &quote,
            &intent,
            origin,
            destination,
            round.strategy_address,
            now,
        )?;
        let transaction = build_transaction(&deposit, &message, origin);

        Ok(PreparedDonation {
            transaction,
            deposit,
            attestor: self.attestor.signer_address(),
        })
    }
}
