//! Chain operations used by the orchestrator.

use std::future::Future;

use alloy::primitives::{Address, TxHash};

use crate::blockchain::TxSender;
use crate::contracts::{ArtifactStore, ConstructorArgs, ContractKind};
use crate::deploy::types::ChainError;
use crate::deploy::wiring::WiringCall;

/// Contract creation and wiring transactions, awaited to confirmation.
pub trait ChainOps {
    /// Address that signs every transaction (the initial owner).
    fn deployer(&self) -> Address;

    /// Deploy `contract` with `args`, returning the confirmed address.
    fn deploy(
        &self,
        contract: ContractKind,
        args: &ConstructorArgs,
    ) -> impl Future<Output = Result<Address, ChainError>> + Send;

    /// Send a wiring call to `target` and wait for confirmation.
    fn call(
        &self,
        target: Address,
        call: WiringCall,
    ) -> impl Future<Output = Result<TxHash, ChainError>> + Send;
}

/// [`ChainOps`] over a live RPC endpoint and a Hardhat artifacts tree.
#[derive(Debug, Clone)]
pub struct AlloyChain {
    sender: TxSender,
    artifacts: ArtifactStore,
}

impl AlloyChain {
    pub fn new(sender: TxSender, artifacts: ArtifactStore) -> Self {
        Self { sender, artifacts }
    }
}

impl ChainOps for AlloyChain {
    fn deployer(&self) -> Address {
        self.sender.address()
    }

    async fn deploy(
        &self,
        contract: ContractKind,
        args: &ConstructorArgs,
    ) -> Result<Address, ChainError> {
        let artifact = self.artifacts.load(contract)?;
        let (address, confirmed) = self
            .sender
            .deploy(args.deploy_code(&artifact.bytecode))
            .await?;

        tracing::debug!(
            contract = %contract,
            tx_hash = %confirmed.tx_hash,
            gas_used = confirmed.gas_used,
            "Creation transaction confirmed"
        );

        Ok(address)
    }

    async fn call(&self, target: Address, call: WiringCall) -> Result<TxHash, ChainError> {
        let confirmed = self.sender.call(target, call.calldata()).await?;
        Ok(confirmed.tx_hash)
    }
}
