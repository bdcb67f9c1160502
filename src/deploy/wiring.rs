//! Post-deployment wiring calls.
//!
//! Mintium calls are skipped for zero addresses; Solythis calls are always
//! made. Each call is its own transaction and a partially wired contract
//! is left as is.

use std::fmt;

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;

use crate::contracts::bindings::{IMintium, ISolythis};
use crate::contracts::ContractKind;

/// A cross-contract reference set after deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiringCall {
    /// `Mintium.setNFTMarketplace(marketplace)`
    SetNftMarketplace(Address),
    /// `Mintium.setLiquidityPool(pool)`
    SetLiquidityPool(Address),
    /// `Solythis.setGovernanceContract(governance)`
    SetGovernanceContract(Address),
    /// `Solythis.setTreasury(treasury)`
    SetTreasury(Address),
}

impl WiringCall {
    /// Contract the call is sent to.
    pub fn target(&self) -> ContractKind {
        match self {
            WiringCall::SetNftMarketplace(_) | WiringCall::SetLiquidityPool(_) => {
                ContractKind::Mintium
            }
            WiringCall::SetGovernanceContract(_) | WiringCall::SetTreasury(_) => {
                ContractKind::Solythis
            }
        }
    }

    /// Solidity function name.
    pub fn function(&self) -> &'static str {
        match self {
            WiringCall::SetNftMarketplace(_) => "setNFTMarketplace",
            WiringCall::SetLiquidityPool(_) => "setLiquidityPool",
            WiringCall::SetGovernanceContract(_) => "setGovernanceContract",
            WiringCall::SetTreasury(_) => "setTreasury",
        }
    }

    /// The address argument.
    pub fn argument(&self) -> Address {
        match *self {
            WiringCall::SetNftMarketplace(a)
            | WiringCall::SetLiquidityPool(a)
            | WiringCall::SetGovernanceContract(a)
            | WiringCall::SetTreasury(a) => a,
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> Bytes {
        let encoded = match *self {
            WiringCall::SetNftMarketplace(marketplace) => {
                IMintium::setNFTMarketplaceCall { marketplace }.abi_encode()
            }
            WiringCall::SetLiquidityPool(pool) => {
                IMintium::setLiquidityPoolCall { pool }.abi_encode()
            }
            WiringCall::SetGovernanceContract(governance) => {
                ISolythis::setGovernanceContractCall { governance }.abi_encode()
            }
            WiringCall::SetTreasury(treasury) => {
                ISolythis::setTreasuryCall { treasury }.abi_encode()
            }
        };
        Bytes::from(encoded)
    }
}

impl fmt::Display for WiringCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.target(), self.function(), self.argument())
    }
}

/// Mintium wiring: marketplace then liquidity pool, each only if non-zero.
pub fn mintium_wiring(marketplace: Address, liquidity_pool: Address) -> Vec<WiringCall> {
    let mut calls = Vec::with_capacity(2);
    if !marketplace.is_zero() {
        calls.push(WiringCall::SetNftMarketplace(marketplace));
    }
    if !liquidity_pool.is_zero() {
        calls.push(WiringCall::SetLiquidityPool(liquidity_pool));
    }
    calls
}

/// Solythis wiring: governance then treasury, unconditionally.
pub fn solythis_wiring(governance: Address, treasury: Address) -> Vec<WiringCall> {
    vec![
        WiringCall::SetGovernanceContract(governance),
        WiringCall::SetTreasury(treasury),
    ]
}
