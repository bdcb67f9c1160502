//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default network exists)
//! - Validate value ranges (chain IDs, poll settings) and URLs
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::DeployerConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default network '{0}' is not defined")]
    UnknownDefaultNetwork(String),

    #[error("no networks defined")]
    NoNetworks,

    #[error("network '{0}': chain_id must be non-zero")]
    ZeroChainId(String),

    #[error("network '{network}': invalid rpc_url '{url}'")]
    InvalidRpcUrl { network: String, url: String },

    #[error("network '{network}': invalid explorer api_url '{url}'")]
    InvalidExplorerUrl { network: String, url: String },

    #[error("network '{0}': signer_env must not be empty")]
    EmptySignerEnv(String),

    #[error("verification.{0} must be greater than zero")]
    ZeroVerificationSetting(&'static str),

    #[error("deployment.{0} must be greater than zero")]
    ZeroDeploymentSetting(&'static str),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DeployerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    } else if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::UnknownDefaultNetwork(
            config.default_network.clone(),
        ));
    }

    for (name, network) in &config.networks {
        if network.chain_id == 0 {
            errors.push(ValidationError::ZeroChainId(name.clone()));
        }
        if Url::parse(&network.rpc_url).is_err() {
            errors.push(ValidationError::InvalidRpcUrl {
                network: name.clone(),
                url: network.rpc_url.clone(),
            });
        }
        if network.signer_env.trim().is_empty() {
            errors.push(ValidationError::EmptySignerEnv(name.clone()));
        }
        if let Some(explorer) = &network.explorer {
            if Url::parse(&explorer.api_url).is_err() {
                errors.push(ValidationError::InvalidExplorerUrl {
                    network: name.clone(),
                    url: explorer.api_url.clone(),
                });
            }
        }
    }

    if config.verification.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroVerificationSetting("poll_interval_secs"));
    }
    if config.verification.max_polls == 0 {
        errors.push(ValidationError::ZeroVerificationSetting("max_polls"));
    }
    if config.deployment.confirmation_blocks == 0 {
        errors.push(ValidationError::ZeroDeploymentSetting("confirmation_blocks"));
    }
    if config.deployment.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDeploymentSetting("rpc_timeout_secs"));
    }
    if config.deployment.tx_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDeploymentSetting("tx_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
