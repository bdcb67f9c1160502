//! Environment variable snapshot and required-variable checks.
//!
//! The process environment is read exactly once at startup into an
//! [`EnvSnapshot`]; nothing below the binaries' `main` reads
//! `std::env` directly.

use std::collections::HashMap;

use crate::config::loader::ConfigError;
use crate::config::schema::NetworkConfig;

/// Variables the deploy run cannot start without, in reporting order.
pub const DEPLOY_REQUIRED_VARS: [&str; 6] = [
    "PRIVATE_KEY",
    "BASESCAN_API_KEY",
    "MULTISIG_TREASURY",
    "LIQUIDITY_POOL",
    "BASE_SEPOLIA_RPC",
    "MINTIUM_TOKEN",
];

/// An operation with its own set of required variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Full deploy, wire and verify run.
    Deploy,
    /// Token transfer smoke script.
    Transfer,
    /// Vote signing.
    Vote,
}

impl Operation {
    /// Required variable names for this operation against `network`.
    ///
    /// The network's signer variable is always required; a deploy also
    /// requires the explorer key variable when the network has an explorer.
    pub fn required_vars(&self, network: &NetworkConfig) -> Vec<String> {
        let mut vars: Vec<String> = match self {
            Operation::Deploy => DEPLOY_REQUIRED_VARS.iter().map(|v| v.to_string()).collect(),
            Operation::Transfer | Operation::Vote => Vec::new(),
        };

        if !vars.contains(&network.signer_env) {
            vars.push(network.signer_env.clone());
        }

        if *self == Operation::Deploy {
            if let Some(explorer) = &network.explorer {
                if !vars.contains(&explorer.api_key_env) {
                    vars.push(explorer.api_key_env.clone());
                }
            }
        }

        vars
    }
}

/// Immutable copy of the environment taken at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a variable's value. Empty or whitespace-only values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Names from `keys` that are absent or empty, in the given order.
    pub fn missing<S: AsRef<str>>(&self, keys: &[S]) -> Vec<String> {
        keys.iter()
            .map(AsRef::as_ref)
            .filter(|key| self.get(key).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Fail with every missing name if any of `keys` is absent or empty.
    pub fn require<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), ConfigError> {
        let missing = self.missing(keys);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVars(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DeployerConfig;

    #[test]
    fn test_empty_value_counts_as_missing() {
        let env = EnvSnapshot::from_pairs([("PRIVATE_KEY", "  "), ("BASESCAN_API_KEY", "abc")]);
        assert_eq!(env.get("PRIVATE_KEY"), None);
        assert_eq!(env.get("BASESCAN_API_KEY"), Some("abc"));
    }

    #[test]
    fn test_require_reports_all_missing_in_order() {
        let env = EnvSnapshot::from_pairs([("BASESCAN_API_KEY", "abc")]);
        let err = env.require(&DEPLOY_REQUIRED_VARS).unwrap_err();
        match err {
            ConfigError::MissingVars(missing) => {
                assert_eq!(
                    missing,
                    vec![
                        "PRIVATE_KEY",
                        "MULTISIG_TREASURY",
                        "LIQUIDITY_POOL",
                        "BASE_SEPOLIA_RPC",
                        "MINTIUM_TOKEN"
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deploy_vars_for_base_sepolia() {
        let config = DeployerConfig::default();
        let vars = Operation::Deploy.required_vars(&config.networks["base_sepolia"]);
        assert_eq!(vars, DEPLOY_REQUIRED_VARS.to_vec());
    }

    #[test]
    fn test_gnosis_safe_requires_multisig_signer() {
        let config = DeployerConfig::default();
        let vars = Operation::Transfer.required_vars(&config.networks["gnosis_safe"]);
        assert_eq!(vars, vec!["MULTISIG_WALLET".to_string()]);

        let vars = Operation::Deploy.required_vars(&config.networks["gnosis_safe"]);
        assert!(vars.contains(&"MULTISIG_WALLET".to_string()));
        assert_eq!(vars.len(), DEPLOY_REQUIRED_VARS.len() + 1);
    }
}
