//! The four contracts this repository deploys, their constructor
//! arguments, call bindings and compiled artifacts.

pub mod artifacts;
pub mod bindings;

use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};

pub use artifacts::{Artifact, ArtifactError, ArtifactStore, BuildInfo};

/// Token units per whole token (18 decimals).
pub const TOKEN_DECIMALS: u8 = 18;

/// Convert a whole-token amount to base units at 18 decimals.
pub fn token_units(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// Fixed Mintium supply minted at construction.
pub fn mintium_total_supply() -> U256 {
    token_units(100_000_000)
}

/// One of the deployed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Governance,
    NftMarketplace,
    Mintium,
    Solythis,
}

impl ContractKind {
    /// Deployment order.
    pub const DEPLOY_ORDER: [ContractKind; 4] = [
        ContractKind::Governance,
        ContractKind::NftMarketplace,
        ContractKind::Mintium,
        ContractKind::Solythis,
    ];

    /// Verification order.
    pub const VERIFY_ORDER: [ContractKind; 4] = [
        ContractKind::Mintium,
        ContractKind::Solythis,
        ContractKind::Governance,
        ContractKind::NftMarketplace,
    ];

    /// Contract name as compiled (artifact and explorer name).
    pub fn artifact_name(&self) -> &'static str {
        match self {
            ContractKind::Governance => "Governance",
            ContractKind::NftMarketplace => "NFTMarketplace",
            ContractKind::Mintium => "Mintium",
            ContractKind::Solythis => "Solythis",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact_name())
    }
}

/// A static ABI constructor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorArg {
    Address(Address),
    Uint(U256),
}

impl ConstructorArg {
    pub fn to_sol_value(&self) -> DynSolValue {
        match *self {
            ConstructorArg::Address(address) => DynSolValue::Address(address),
            ConstructorArg::Uint(value) => DynSolValue::Uint(value, 256),
        }
    }
}

impl fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArg::Address(address) => write!(f, "{}", address),
            ConstructorArg::Uint(value) => write!(f, "{}", value),
        }
    }
}

/// Ordered constructor arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorArgs(Vec<ConstructorArg>);

impl ConstructorArgs {
    pub fn new(args: Vec<ConstructorArg>) -> Self {
        Self(args)
    }

    /// `(owner, treasury)`, used by Governance, Mintium and Solythis.
    pub fn owner_treasury(owner: Address, treasury: Address) -> Self {
        Self(vec![
            ConstructorArg::Address(owner),
            ConstructorArg::Address(treasury),
        ])
    }

    /// `(owner, token, treasury)`, used by NFTMarketplace.
    pub fn owner_token_treasury(owner: Address, token: Address, treasury: Address) -> Self {
        Self(vec![
            ConstructorArg::Address(owner),
            ConstructorArg::Address(token),
            ConstructorArg::Address(treasury),
        ])
    }

    /// ABI-encoded arguments, as appended to creation bytecode.
    pub fn abi_encode(&self) -> Bytes {
        let params = DynSolValue::Tuple(self.0.iter().map(ConstructorArg::to_sol_value).collect());
        Bytes::from(params.abi_encode_params())
    }

    /// Hex encoding without `0x`, as explorer APIs expect.
    pub fn abi_encode_hex(&self) -> String {
        alloy::primitives::hex::encode(self.abi_encode())
    }

    /// Creation bytecode followed by the encoded arguments.
    pub fn deploy_code(&self, bytecode: &Bytes) -> Bytes {
        let mut code = bytecode.to_vec();
        code.extend_from_slice(&self.abi_encode());
        Bytes::from(code)
    }
}

impl fmt::Display for ConstructorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
