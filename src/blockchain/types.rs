//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured time.
    #[error("Transaction {tx_hash} not confirmed after {secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, secs: u64 },

    /// Transaction was mined but reverted.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    /// A creation transaction's receipt carried no contract address.
    #[error("Transaction {0} created no contract")]
    MissingContractAddress(TxHash),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Connected chain differs from the configured one.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A confirmed, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTx {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Set for contract-creation transactions.
    pub contract_address: Option<Address>,
}
