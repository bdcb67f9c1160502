//! Resolved runtime settings.
//!
//! A [`DeployerConfig`] plus an [`EnvSnapshot`] resolve into the settings
//! structs below, once, at startup. Required variables are checked before
//! anything else is parsed so a missing key is always reported first.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use url::Url;

use crate::config::env::{EnvSnapshot, Operation};
use crate::config::loader::ConfigError;
use crate::config::schema::{DeployerConfig, NetworkConfig, VerificationPolicy};

/// A sensitive string that never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Everything needed to talk to one chain with one signer.
#[derive(Debug, Clone)]
pub struct ChainSettings {
    /// Network name as configured (e.g. `base_sepolia`).
    pub network: String,
    pub chain_id: u64,
    pub rpc_url: Url,
    pub signer_key: Secret,
    pub rpc_timeout: Duration,
    pub tx_timeout: Duration,
    pub confirmation_blocks: u64,
}

impl ChainSettings {
    /// Resolve chain settings for `network`, requiring the variables of `operation`.
    pub fn resolve(
        config: &DeployerConfig,
        network: &str,
        operation: Operation,
        env: &EnvSnapshot,
    ) -> Result<Self, ConfigError> {
        let network_config = lookup_network(config, network)?;
        env.require(&operation.required_vars(network_config))?;
        Self::from_network(config, network, network_config, env)
    }

    fn from_network(
        config: &DeployerConfig,
        name: &str,
        network: &NetworkConfig,
        env: &EnvSnapshot,
    ) -> Result<Self, ConfigError> {
        let raw_url = network
            .rpc_url_env
            .as_deref()
            .and_then(|var| env.get(var))
            .unwrap_or(&network.rpc_url);
        let rpc_url = Url::parse(raw_url).map_err(|e| ConfigError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        let signer_key = env
            .get(&network.signer_env)
            .map(Secret::new)
            .ok_or_else(|| ConfigError::MissingVars(vec![network.signer_env.clone()]))?;

        Ok(Self {
            network: name.to_string(),
            chain_id: network.chain_id,
            rpc_url,
            signer_key,
            rpc_timeout: Duration::from_secs(config.deployment.rpc_timeout_secs),
            tx_timeout: Duration::from_secs(config.deployment.tx_timeout_secs),
            confirmation_blocks: config.deployment.confirmation_blocks,
        })
    }
}

/// Etherscan-compatible explorer access for verification.
#[derive(Debug, Clone)]
pub struct ExplorerSettings {
    pub api_url: Url,
    pub browser_url: Option<String>,
    pub api_key: Secret,
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub request_timeout: Duration,
}

/// Settings for a full deploy run.
#[derive(Debug, Clone)]
pub struct DeploySettings {
    pub chain: ChainSettings,
    /// Multisig treasury passed to every constructor.
    pub treasury: Address,
    /// Liquidity pool wired into Mintium when non-zero.
    pub liquidity_pool: Address,
    /// Pre-known token address passed to the NFTMarketplace constructor.
    pub mintium_token: Address,
    /// `None` when the network has no explorer or verification is skipped.
    pub explorer: Option<ExplorerSettings>,
    pub verify_delay: Duration,
    pub verification_policy: VerificationPolicy,
    pub artifacts_root: PathBuf,
}

impl DeploySettings {
    /// Resolve deploy settings for `network`.
    ///
    /// Fails with [`ConfigError::MissingVars`] naming every absent variable
    /// before any value is parsed.
    pub fn resolve(
        config: &DeployerConfig,
        network: &str,
        env: &EnvSnapshot,
    ) -> Result<Self, ConfigError> {
        let network_config = lookup_network(config, network)?;
        env.require(&Operation::Deploy.required_vars(network_config))?;

        let chain = ChainSettings::from_network(config, network, network_config, env)?;

        let explorer = match &network_config.explorer {
            Some(explorer) => {
                let api_url =
                    Url::parse(&explorer.api_url).map_err(|e| ConfigError::InvalidUrl {
                        url: explorer.api_url.clone(),
                        reason: e.to_string(),
                    })?;
                let api_key = env
                    .get(&explorer.api_key_env)
                    .map(Secret::new)
                    .ok_or_else(|| ConfigError::MissingVars(vec![explorer.api_key_env.clone()]))?;
                Some(ExplorerSettings {
                    api_url,
                    browser_url: explorer.browser_url.clone(),
                    api_key,
                    poll_interval: Duration::from_secs(config.verification.poll_interval_secs),
                    max_polls: config.verification.max_polls,
                    request_timeout: Duration::from_secs(config.verification.request_timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            chain,
            treasury: parse_address(env, "MULTISIG_TREASURY")?,
            liquidity_pool: parse_address(env, "LIQUIDITY_POOL")?,
            mintium_token: parse_address(env, "MINTIUM_TOKEN")?,
            explorer,
            verify_delay: Duration::from_secs(config.deployment.verify_delay_secs),
            verification_policy: config.verification.policy,
            artifacts_root: config.artifacts.root.clone(),
        })
    }
}

fn lookup_network<'a>(
    config: &'a DeployerConfig,
    network: &str,
) -> Result<&'a NetworkConfig, ConfigError> {
    config
        .networks
        .get(network)
        .ok_or_else(|| ConfigError::UnknownNetwork(network.to_string()))
}

/// Parse a required address variable.
pub fn parse_address(env: &EnvSnapshot, var: &str) -> Result<Address, ConfigError> {
    let raw = env
        .get(var)
        .ok_or_else(|| ConfigError::MissingVars(vec![var.to_string()]))?;
    Address::from_str(raw).map_err(|e| ConfigError::InvalidAddress {
        var: var.to_string(),
        reason: e.to_string(),
    })
}
