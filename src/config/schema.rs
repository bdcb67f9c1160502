//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration structure for the deployer.
//! All types derive Serde traits for deserialization from a TOML file, and
//! every field has a default so the deployer runs without any file at all.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the network used when none is selected on the command line.
pub const DEFAULT_NETWORK: &str = "base_sepolia";

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployerConfig {
    /// Network selected when `--network` is not given.
    pub default_network: String,

    /// Named chain targets.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Transaction and pacing settings.
    pub deployment: DeploymentConfig,

    /// Block-explorer verification settings.
    pub verification: VerificationConfig,

    /// Location of compiled contract artifacts.
    pub artifacts: ArtifactsConfig,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            default_network: DEFAULT_NETWORK.to_string(),
            networks: default_networks(),
            deployment: DeploymentConfig::default(),
            verification: VerificationConfig::default(),
            artifacts: ArtifactsConfig::default(),
        }
    }
}

/// A single chain target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// EIP-155 chain ID.
    pub chain_id: u64,

    /// RPC endpoint used when `rpc_url_env` is unset or empty.
    pub rpc_url: String,

    /// Environment variable that overrides `rpc_url`.
    #[serde(default)]
    pub rpc_url_env: Option<String>,

    /// Environment variable holding the signing key for this network.
    #[serde(default = "default_signer_env")]
    pub signer_env: String,

    /// Etherscan-compatible explorer, if the network has one.
    #[serde(default)]
    pub explorer: Option<ExplorerConfig>,
}

fn default_signer_env() -> String {
    "PRIVATE_KEY".to_string()
}

/// Etherscan-compatible block explorer endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// Verification API endpoint (e.g. `https://api.basescan.org/api`).
    pub api_url: String,

    /// Human-facing explorer URL, used only for log links.
    #[serde(default)]
    pub browser_url: Option<String>,

    /// Environment variable holding the explorer API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    "BASESCAN_API_KEY".to_string()
}

/// Transaction and pacing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Pause between the last wiring call and the first verification.
    pub verify_delay_secs: u64,

    /// Block confirmations awaited for every transaction.
    pub confirmation_blocks: u64,

    /// Timeout for a single RPC request in seconds.
    pub rpc_timeout_secs: u64,

    /// Timeout for a transaction to reach the required confirmations.
    pub tx_timeout_secs: u64,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            verify_delay_secs: 10,
            confirmation_blocks: 1,
            rpc_timeout_secs: 30,
            tx_timeout_secs: 180,
        }
    }
}

/// How a failed verification affects the remaining ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationPolicy {
    /// Attempt every contract, then fail the run if any attempt failed.
    #[default]
    BestEffort,
    /// Stop at the first failed verification.
    FailFast,
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationPolicy::BestEffort => write!(f, "best-effort"),
            VerificationPolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl FromStr for VerificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-effort" => Ok(VerificationPolicy::BestEffort),
            "fail-fast" => Ok(VerificationPolicy::FailFast),
            other => Err(format!(
                "unknown verification policy '{}', expected best-effort or fail-fast",
                other
            )),
        }
    }
}

/// Block-explorer verification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Failure policy across the four contracts.
    pub policy: VerificationPolicy,

    /// Interval between `checkverifystatus` polls in seconds.
    pub poll_interval_secs: u64,

    /// Maximum number of status polls per contract.
    pub max_polls: u32,

    /// Timeout for a single explorer HTTP request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            policy: VerificationPolicy::BestEffort,
            poll_interval_secs: 5,
            max_polls: 12,
            request_timeout_secs: 30,
        }
    }
}

/// Location of compiled contract artifacts (Hardhat layout).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Root of the artifacts tree, containing `contracts/` and `build-info/`.
    pub root: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("artifacts"),
        }
    }
}

fn default_networks() -> BTreeMap<String, NetworkConfig> {
    let mut networks = BTreeMap::new();

    networks.insert(
        "base_sepolia".to_string(),
        NetworkConfig {
            chain_id: 84532,
            rpc_url: "https://sepolia.base.org".to_string(),
            rpc_url_env: Some("BASE_SEPOLIA_RPC".to_string()),
            signer_env: default_signer_env(),
            explorer: Some(ExplorerConfig {
                api_url: "https://api-sepolia.basescan.org/api".to_string(),
                browser_url: Some("https://sepolia.basescan.org".to_string()),
                api_key_env: default_api_key_env(),
            }),
        },
    );

    networks.insert(
        "base_mainnet".to_string(),
        NetworkConfig {
            chain_id: 8453,
            rpc_url: "https://mainnet.base.org".to_string(),
            rpc_url_env: Some("BASE_MAINNET_RPC".to_string()),
            signer_env: default_signer_env(),
            explorer: Some(ExplorerConfig {
                api_url: "https://api.basescan.org/api".to_string(),
                browser_url: Some("https://basescan.org".to_string()),
                api_key_env: default_api_key_env(),
            }),
        },
    );

    networks.insert(
        "gnosis_safe".to_string(),
        NetworkConfig {
            chain_id: 100,
            rpc_url: "https://rpc.gnosischain.com".to_string(),
            rpc_url_env: Some("GNOSIS_SAFE_RPC".to_string()),
            signer_env: "MULTISIG_WALLET".to_string(),
            explorer: None,
        },
    );

    networks.insert(
        "localhost".to_string(),
        NetworkConfig {
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            rpc_url_env: None,
            signer_env: default_signer_env(),
            explorer: None,
        },
    );

    networks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_networks() {
        let config = DeployerConfig::default();
        assert_eq!(config.default_network, "base_sepolia");
        assert_eq!(config.networks["base_sepolia"].chain_id, 84532);
        assert_eq!(config.networks["base_mainnet"].chain_id, 8453);
        assert_eq!(config.networks["gnosis_safe"].chain_id, 100);
        assert_eq!(config.networks["gnosis_safe"].signer_env, "MULTISIG_WALLET");
        assert!(config.networks["gnosis_safe"].explorer.is_none());
    }

    #[test]
    fn test_default_pacing() {
        let config = DeploymentConfig::default();
        assert_eq!(config.verify_delay_secs, 10);
        assert_eq!(config.confirmation_blocks, 1);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("best-effort".parse(), Ok(VerificationPolicy::BestEffort));
        assert_eq!("fail-fast".parse(), Ok(VerificationPolicy::FailFast));
        assert!("sometimes".parse::<VerificationPolicy>().is_err());
        assert_eq!(VerificationPolicy::FailFast.to_string(), "fail-fast");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DeployerConfig = toml::from_str(
            r#"
            default_network = "base_mainnet"

            [verification]
            policy = "fail-fast"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_network, "base_mainnet");
        assert_eq!(config.verification.policy, VerificationPolicy::FailFast);
        assert_eq!(config.verification.max_polls, 12);
        assert_eq!(config.networks.len(), 4);
    }
}
