//! Deployment orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! EnvSnapshot + DeployerConfig
//!     → orchestrator::execute (precondition check)
//!     → Orchestrator::run
//!         → chain.rs (ChainOps: deploy, wiring calls)
//!         → wiring.rs (which calls, in which order)
//!         → verification::SourceVerifier
//!     → DeploymentResult
//! ```

pub mod chain;
pub mod orchestrator;
pub mod types;
pub mod wiring;

pub use chain::{AlloyChain, ChainOps};
pub use orchestrator::{execute, DeploymentPlan, Orchestrator};
pub use types::{ChainError, DeployedContract, DeploymentResult, OrchestratorError};
pub use wiring::WiringCall;
