//! Solythra contract deployment toolkit
//!
//! Deploys the Governance, NFTMarketplace, Mintium and Solythis contracts,
//! wires them together, and verifies their sources on a block explorer.
//! Also carries the token transfer smoke script and the vote signer.

pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod observability;
pub mod transfer;
pub mod verification;
pub mod voting;

pub use config::schema::DeployerConfig;
pub use deploy::{execute, DeploymentResult, Orchestrator, OrchestratorError};
