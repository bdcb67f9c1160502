//! Block-explorer source verification.
//!
//! # Data Flow
//! ```text
//! VerificationRequest (contract, address, constructor args)
//!     → ArtifactStore (source name, build info)
//!     → etherscan.rs (submit standard-JSON input, poll status)
//!     → VerificationOutcome
//! ```
//!
//! The orchestrator only sees [`SourceVerifier`]; the explorer decides
//! success or failure independently per contract.

pub mod etherscan;

use std::future::Future;

use alloy::primitives::Address;
use thiserror::Error;

use crate::contracts::{ArtifactError, ConstructorArgs, ContractKind};

pub use etherscan::EtherscanVerifier;

/// A single verification submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub contract: ContractKind,
    pub address: Address,
    /// Must equal the arguments the contract was deployed with.
    pub constructor_args: ConstructorArgs,
}

/// Successful verification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
}

/// Errors from a verification attempt.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("explorer request failed: {0}")]
    Http(String),

    #[error("explorer rejected {contract}: {reason}")]
    Rejected {
        contract: ContractKind,
        reason: String,
    },

    #[error("verification of {contract} still pending after {polls} status checks")]
    Timeout { contract: ContractKind, polls: u32 },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("unexpected explorer response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for VerifyError {
    fn from(e: reqwest::Error) -> Self {
        VerifyError::Http(e.to_string())
    }
}

/// Submits deployed contracts for source verification.
pub trait SourceVerifier {
    fn verify(
        &self,
        request: &VerificationRequest,
    ) -> impl Future<Output = Result<VerificationOutcome, VerifyError>> + Send;
}
