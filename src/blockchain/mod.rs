//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ChainSettings (private key, RPC URL, chain id)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (signing provider, chain-id check, RPC timeouts)
//!     → transaction.rs (send, confirm, map reverts)
//! ```
//!
//! # Security Constraints
//! - Private keys only from the environment, via resolved settings
//! - Never log private keys
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use transaction::TxSender;
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmedTx};
pub use wallet::Wallet;
