//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, dotenvy) + process environment
//!     → env.rs (EnvSnapshot, required-variable checks)
//! deploy.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DeployerConfig (validated, immutable)
//! DeployerConfig + EnvSnapshot
//!     → settings.rs (ChainSettings / DeploySettings)
//!     → passed by reference into the orchestrator and binaries
//! ```
//!
//! # Design Decisions
//! - The environment is read once; deployment logic never reads it
//! - All file fields have defaults; no file is needed for the stock networks
//! - Missing required variables are all reported together, before any
//!   network call

pub mod env;
pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use env::{EnvSnapshot, Operation};
pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{DeployerConfig, NetworkConfig, VerificationPolicy};
pub use settings::{ChainSettings, DeploySettings, ExplorerSettings, Secret};
