//! Deployment records and errors.

use std::fmt;

use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::contracts::{ArtifactError, ConstructorArgs, ContractKind};
use crate::deploy::wiring::WiringCall;
use crate::verification::VerifyError;

/// A contract created in this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub kind: ContractKind,
    pub address: Address,
    /// Exactly the arguments sent with the creation transaction.
    pub constructor_args: ConstructorArgs,
}

/// Addresses produced by a full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentResult {
    pub governance: Address,
    pub nft_marketplace: Address,
    pub mintium: Address,
    pub solythis: Address,
}

impl DeploymentResult {
    /// `(contract, address)` pairs in deployment order.
    pub fn entries(&self) -> [(ContractKind, Address); 4] {
        [
            (ContractKind::Governance, self.governance),
            (ContractKind::NftMarketplace, self.nft_marketplace),
            (ContractKind::Mintium, self.mintium),
            (ContractKind::Solythis, self.solythis),
        ]
    }
}

impl fmt::Display for DeploymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, address)) in self.entries().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", kind, address)?;
        }
        Ok(())
    }
}

/// Failure of a single chain operation.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Fatal failure of a deploy run, naming the step that failed.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("configuration check failed: {0}")]
    Config(#[from] ConfigError),

    #[error("could not connect to chain: {0}")]
    Connect(#[source] BlockchainError),

    #[error("could not set up verifier: {0}")]
    VerifierSetup(#[source] VerifyError),

    #[error("deploying {contract} failed: {source}")]
    Deploy {
        contract: ContractKind,
        #[source]
        source: ChainError,
    },

    #[error("wiring call {call} failed: {source}")]
    Wire {
        call: WiringCall,
        #[source]
        source: ChainError,
    },

    #[error("verification failed for {}", describe_failures(.failures))]
    Verify {
        failures: Vec<(ContractKind, VerifyError)>,
        /// Contracts remain deployed and wired.
        deployment: DeploymentResult,
    },
}

fn describe_failures(failures: &[(ContractKind, VerifyError)]) -> String {
    failures
        .iter()
        .map(|(kind, err)| format!("{} ({})", kind, err))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_error_names_each_contract() {
        let err = OrchestratorError::Verify {
            failures: vec![
                (
                    ContractKind::Mintium,
                    VerifyError::Http("connection refused".into()),
                ),
                (
                    ContractKind::Governance,
                    VerifyError::Timeout {
                        contract: ContractKind::Governance,
                        polls: 3,
                    },
                ),
            ],
            deployment: DeploymentResult {
                governance: Address::repeat_byte(1),
                nft_marketplace: Address::repeat_byte(2),
                mintium: Address::repeat_byte(3),
                solythis: Address::repeat_byte(4),
            },
        };

        let msg = err.to_string();
        assert!(msg.contains("Mintium (explorer request failed: connection refused)"));
        assert!(msg.contains("Governance"));
    }

    #[test]
    fn test_result_display_order() {
        let result = DeploymentResult {
            governance: Address::repeat_byte(1),
            nft_marketplace: Address::repeat_byte(2),
            mintium: Address::repeat_byte(3),
            solythis: Address::repeat_byte(4),
        };
        let shown = result.to_string();
        assert!(shown.starts_with("Governance=0x"));
        assert!(shown.contains("NFTMarketplace=0x"));
    }
}
