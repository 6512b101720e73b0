// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{collections::HashMap, sync::Arc, time::Duration};

use alloy::{
    primitives::{Address, Bytes, B256},
    providers::DynProvider,
    signers::{local::PrivateKeySigner, Signer},
    sol_types::SolValue,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use qf_config::{ChainConfig, ChainConstants};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::{contracts::IMessageReceiver, helpers::ProviderConfig, vote::EncodedVote};

/// Computes the digest the destination receiver will verify for a payload.
#[async_trait]
pub trait MessageHasher: Send + Sync {
    async fn message_hash(&self, chain: &ChainConstants, payload: &Bytes) -> Result<B256>;
}

/// Produces a 65-byte EIP-191 signature over a message digest.
#[async_trait]
pub trait DigestSigner: Send + Sync {
    fn address(&self) -> Address;
    async fn sign_digest(&self, digest: B256) -> Result<Bytes>;
}

#[async_trait]
impl DigestSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_digest(&self, digest: B256) -> Result<Bytes> {
        let signature = self.sign_message(digest.as_slice()).await?;
        Ok(Bytes::from(signature.as_bytes().to_vec()))
    }
}

/// Asks each chain's message receiver for the hash it expects via `getMessageHash`.
pub struct RpcMessageHasher {
    providers: HashMap<u64, DynProvider>,
}

impl RpcMessageHasher {
    pub fn connect(chains: &[ChainConfig]) -> Result<Self> {
        let mut providers = HashMap::with_capacity(chains.len());
        for chain in chains {
            let provider =
                ProviderConfig::new(chain.rpc_url()?, chain.rpc_auth.clone()).create_readonly_provider()?;
            providers.insert(chain.chain_id, provider);
        }
        Ok(Self { providers })
    }
}

#[async_trait]
impl MessageHasher for RpcMessageHasher {
    async fn message_hash(&self, chain: &ChainConstants, payload: &Bytes) -> Result<B256> {
        let provider = self
            .providers
            .get(&chain.chain_id)
            .ok_or_else(|| anyhow!("No rpc provider configured for chain {}", chain.chain_id))?;
        let receiver = IMessageReceiver::new(chain.message_receiver, provider);
        let hash = receiver.getMessageHash(payload.clone()).call().await?;
        Ok(hash)
    }
}

#[derive(Debug, Error)]
pub enum AttestationError {
    #[error("Message hash query on chain {chain_id} failed: {reason}")]
    HashQuery { chain_id: u64, reason: String },
    #[error("Message hash query on chain {chain_id} timed out after {after:?}")]
    HashTimeout { chain_id: u64, after: Duration },
    #[error("Signing the message hash failed: {0}")]
    Signing(String),
    #[error("Signing the message hash timed out after {0:?}")]
    SigningTimeout(Duration),
}

/// A vote payload together with the session signature over its receiver-side hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    payload: Bytes,
    hash: B256,
    signature: Bytes,
}

impl SignedMessage {
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn hash(&self) -> B256 {
        self.hash
    }

    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// `abi.encode(bytes payload, bytes signature)`, the message carried through the bridge.
    pub fn encode(&self) -> Bytes {
        (self.payload.clone(), self.signature.clone())
            .abi_encode_params()
            .into()
    }
}

/// Hashes an encoded vote on the destination chain and signs that hash with the session key.
#[derive(Clone)]
pub struct MessageAttestor {
    hasher: Arc<dyn MessageHasher>,
    signer: Arc<dyn DigestSigner>,
    call_timeout: Duration,
}

impl MessageAttestor {
    pub fn new(
        hasher: Arc<dyn MessageHasher>,
        signer: Arc<dyn DigestSigner>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            hasher,
            signer,
            call_timeout,
        }
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    #[instrument(skip_all, fields(chain_id = destination.chain_id))]
    pub async fn attest(
        &self,
        destination: &ChainConstants,
        vote: &EncodedVote,
    ) -> Result<SignedMessage, AttestationError> {
        let chain_id = destination.chain_id;
        let payload = vote.as_bytes().clone();

        let hash = timeout(
            self.call_timeout,
            self.hasher.message_hash(destination, &payload),
        )
        .await
        .map_err(|_| AttestationError::HashTimeout {
            chain_id,
            after: self.call_timeout,
        })?
        .map_err(|e| AttestationError::HashQuery {
            chain_id,
            reason: format!("{e:#}"),
        })?;
        debug!(%hash, "received message hash");

        let signature = timeout(self.call_timeout, self.signer.sign_digest(hash))
            .await
            .map_err(|_| AttestationError::SigningTimeout(self.call_timeout))?
            .map_err(|e| AttestationError::Signing(format!("{e:#}")))?;

        Ok(SignedMessage {
            payload,
            hash,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::encode_vote;
    use alloy::primitives::{keccak256, Signature, U256};

    struct KeccakHasher;

    #[async_trait]
    impl MessageHasher for KeccakHasher {
        async fn message_hash(&self, _: &ChainConstants, payload: &Bytes) -> Result<B256> {
            Ok(keccak256(payload))
        }
    }

    struct SlowHasher;

    #[async_trait]
    impl MessageHasher for SlowHasher {
        async fn message_hash(&self, _: &ChainConstants, _: &Bytes) -> Result<B256> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(B256::ZERO)
        }
    }

    struct BrokenHasher;

    #[async_trait]
    impl MessageHasher for BrokenHasher {
        async fn message_hash(&self, _: &ChainConstants, _: &Bytes) -> Result<B256> {
            Err(anyhow!("execution reverted"))
        }
    }

    fn destination() -> ChainConstants {
        ChainConstants {
            chain_id: 42161,
            name: "arbitrum".to_string(),
            donation_relay: Address::repeat_byte(0x01),
            message_receiver: Address::repeat_byte(0x02),
            wrapped_native: Address::repeat_byte(0x03),
        }
    }

    fn attestor(hasher: Arc<dyn MessageHasher>) -> (MessageAttestor, Address) {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        (
            MessageAttestor::new(hasher, Arc::new(signer), Duration::from_secs(5)),
            address,
        )
    }

    #[tokio::test]
    async fn test_signed_message_layout() -> Result<()> {
        let (attestor, signer) = attestor(Arc::new(KeccakHasher));
        let vote = encode_vote(Address::repeat_byte(0xaa), U256::from(10u64).pow(U256::from(18u64)))?;

        let signed = attestor.attest(&destination(), &vote).await?;
        assert_eq!(signed.hash(), keccak256(vote.as_bytes()));
        assert_eq!(signed.signature().len(), 65);

        let encoded = signed.encode();
        // offsets: payload at 0x40, signature after the 288 byte payload
        assert_eq!(U256::from_be_slice(&encoded[0..32]), U256::from(0x40u64));
        assert_eq!(U256::from_be_slice(&encoded[32..64]), U256::from(0x180u64));

        let (payload, signature) = <(Bytes, Bytes)>::abi_decode_params(&encoded)?;
        assert_eq!(&payload, vote.as_bytes());

        let signature = Signature::try_from(&signature[..])?;
        let recovered = signature.recover_address_from_msg(signed.hash().as_slice())?;
        assert_eq!(recovered, signer);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_hash_timeout_is_distinct() -> Result<()> {
        let (attestor, _) = attestor(Arc::new(SlowHasher));
        let vote = encode_vote(Address::repeat_byte(0xaa), U256::from(1u64))?;

        let err = attestor.attest(&destination(), &vote).await.unwrap_err();
        assert!(matches!(
            err,
            AttestationError::HashTimeout { chain_id: 42161, .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_hash_query_failure() -> Result<()> {
        let (attestor, _) = attestor(Arc::new(BrokenHasher));
        let vote = encode_vote(Address::repeat_byte(0xaa), U256::from(1u64))?;

        let err = attestor.attest(&destination(), &vote).await.unwrap_err();
        assert!(err.to_string().contains("execution reverted"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_chain_has_no_provider() -> Result<()> {
        let hasher = RpcMessageHasher::connect(&[])?;
        let result = hasher
            .message_hash(&destination(), &Bytes::from_static(b"vote"))
            .await;
        assert!(result.is_err());
        Ok(())
    }
}
