//! Compiled contract artifacts.
//!
//! Reads the Hardhat output layout:
//!
//! ```text
//! <root>/contracts/<Name>.sol/<Name>.json      bytecode, sourceName
//! <root>/contracts/<Name>.sol/<Name>.dbg.json  → buildInfo (relative path)
//! <root>/build-info/<id>.json                  solcLongVersion, input
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

use crate::contracts::ContractKind;

/// Errors reading or decoding an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact {path} could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact for {contract} has invalid bytecode: {reason}")]
    Bytecode { contract: String, reason: String },

    #[error("artifact for {0} has empty bytecode (abstract contract or interface?)")]
    EmptyBytecode(String),
}

/// Deployable artifact of a single contract.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    /// Solidity source path, e.g. `contracts/Mintium.sol`.
    pub source_name: String,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

impl Artifact {
    /// Fully qualified name used by explorers: `<source>:<contract>`.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

/// Compiler run that produced an artifact.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Full solc version, e.g. `0.8.22+commit.4fc1097e`.
    pub solc_long_version: String,
    /// Standard-JSON compiler input.
    pub input: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    source_name: String,
    bytecode: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDebugFile {
    build_info: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuildInfo {
    solc_long_version: String,
    input: serde_json::Value,
}

/// Read-only view over an artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_dir(&self, kind: ContractKind) -> PathBuf {
        let name = kind.artifact_name();
        self.root.join("contracts").join(format!("{}.sol", name))
    }

    /// Load the deployable artifact for `kind`.
    pub fn load(&self, kind: ContractKind) -> Result<Artifact, ArtifactError> {
        let name = kind.artifact_name();
        let path = self.artifact_dir(kind).join(format!("{}.json", name));
        let raw: RawArtifact = read_json(&path)?;

        let hex = raw.bytecode.trim();
        if hex.is_empty() || hex == "0x" {
            return Err(ArtifactError::EmptyBytecode(name.to_string()));
        }
        let bytecode: Bytes = hex.parse().map_err(|e| ArtifactError::Bytecode {
            contract: name.to_string(),
            reason: format!("{} (unlinked libraries?)", e),
        })?;

        Ok(Artifact {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            bytecode,
        })
    }

    /// Load the compiler run that produced `kind`'s artifact.
    pub fn build_info(&self, kind: ContractKind) -> Result<BuildInfo, ArtifactError> {
        let dir = self.artifact_dir(kind);
        let dbg_path = dir.join(format!("{}.dbg.json", kind.artifact_name()));
        let dbg: RawDebugFile = read_json(&dbg_path)?;

        let raw: RawBuildInfo = read_json(&dir.join(&dbg.build_info))?;
        Ok(BuildInfo {
            solc_long_version: raw.solc_long_version,
            input: raw.input,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a minimal Hardhat-layout artifact tree under a fresh temp dir.
    fn write_fixture(tag: &str, bytecode: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "solythra-artifacts-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("build-info")).unwrap();
        fs::write(
            root.join("build-info").join("abc123.json"),
            r#"{
                "solcVersion": "0.8.22",
                "solcLongVersion": "0.8.22+commit.4fc1097e",
                "input": {"language": "Solidity", "sources": {}}
            }"#,
        )
        .unwrap();

        for kind in ContractKind::DEPLOY_ORDER {
            let name = kind.artifact_name();
            let dir = root.join("contracts").join(format!("{}.sol", name));
            fs::create_dir_all(&dir).unwrap();
            fs::write(
                dir.join(format!("{}.json", name)),
                format!(
                    r#"{{"contractName": "{name}", "sourceName": "contracts/{name}.sol", "abi": [], "bytecode": "{bytecode}"}}"#
                ),
            )
            .unwrap();
            fs::write(
                dir.join(format!("{}.dbg.json", name)),
                r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json"}"#,
            )
            .unwrap();
        }

        root
    }

    #[test]
    fn test_load_artifact() {
        let root = write_fixture("load", "0x6080604052");
        let store = ArtifactStore::new(&root);

        let artifact = store.load(ContractKind::NftMarketplace).unwrap();
        assert_eq!(artifact.contract_name, "NFTMarketplace");
        assert_eq!(artifact.bytecode.len(), 5);
        assert_eq!(
            artifact.fully_qualified_name(),
            "contracts/NFTMarketplace.sol:NFTMarketplace"
        );
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_build_info_follows_dbg_file() {
        let root = write_fixture("buildinfo", "0x6080604052");
        let store = ArtifactStore::new(&root);

        let info = store.build_info(ContractKind::Mintium).unwrap();
        assert_eq!(info.solc_long_version, "0.8.22+commit.4fc1097e");
        assert_eq!(info.input["language"], "Solidity");
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let root = write_fixture("empty", "0x");
        let store = ArtifactStore::new(&root);
        let err = store.load(ContractKind::Governance).unwrap_err();
        assert!(matches!(err, ArtifactError::EmptyBytecode(_)));
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_unlinked_bytecode_rejected() {
        let root = write_fixture("unlinked", "0x6080__$abcdef$__");
        let store = ArtifactStore::new(&root);
        let err = store.load(ContractKind::Solythis).unwrap_err();
        assert!(matches!(err, ArtifactError::Bytecode { .. }));
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_missing_artifact() {
        let store = ArtifactStore::new("/nonexistent/artifacts");
        let err = store.load(ContractKind::Mintium).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
