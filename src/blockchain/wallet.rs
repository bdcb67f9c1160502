//! Wallet management and message signing.
//!
//! # Security
//! - Private keys come only from resolved settings (environment)
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Local signing wallet bound to a chain.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id));

        tracing::debug!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sign arbitrary message bytes (EIP-191 personal message).
    pub async fn sign_message(&self, message: &[u8]) -> BlockchainResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Message signing failed: {}", e)))
    }

    /// Network wallet for a signing provider.
    pub fn to_ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
