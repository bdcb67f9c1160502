//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect a signing provider to the configured JSON-RPC endpoint
//! - Verify the endpoint serves the configured chain
//! - Bound every RPC request by the configured timeout

use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::config::ChainSettings;

/// Signing RPC client for one chain.
#[derive(Clone)]
pub struct ChainClient {
    /// Provider with the wallet filler attached.
    provider: DynProvider,
    wallet: Wallet,
    network: String,
    rpc_timeout: Duration,
    tx_timeout: Duration,
    confirmations: u64,
}

impl ChainClient {
    /// Connect to the chain described by `settings`.
    ///
    /// Fails if the key is invalid, the endpoint is unreachable, or the
    /// endpoint reports a different chain ID than configured.
    pub async fn connect(settings: &ChainSettings) -> BlockchainResult<Self> {
        let wallet = Wallet::from_private_key(settings.signer_key.expose(), settings.chain_id)?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.to_ethereum_wallet())
            .connect_http(settings.rpc_url.clone())
            .erased();

        let client = Self {
            provider,
            wallet,
            network: settings.network.clone(),
            rpc_timeout: settings.rpc_timeout,
            tx_timeout: settings.tx_timeout,
            confirmations: settings.confirmation_blocks,
        };

        client.verify_chain_id(settings.chain_id).await?;

        tracing::info!(
            network = %client.network,
            rpc_url = %settings.rpc_url,
            chain_id = settings.chain_id,
            signer = %client.address(),
            "Chain client connected"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches `expected`.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let actual = self.get_chain_id().await?;
        if actual.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: actual.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_timeout(self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Run an RPC future under the request timeout.
    pub async fn with_timeout<T, E, F>(&self, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match timeout(self.rpc_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }

    /// The signing provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Maximum wait for a transaction to reach the required confirmations.
    pub fn tx_timeout(&self) -> Duration {
        self.tx_timeout
    }

    /// Number of confirmation blocks required.
    pub fn confirmations(&self) -> u64 {
        self.confirmations
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("network", &self.network)
            .field("signer", &self.wallet.address())
            .field("chain_id", &self.wallet.chain_id())
            .field("rpc_timeout_secs", &self.rpc_timeout.as_secs())
            .finish()
    }
}
