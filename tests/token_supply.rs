//! totalSupply smoke tests against a local Anvil node.
//!
//! Need `anvil` on PATH and compiled Hardhat artifacts (`npx hardhat
//! compile`) under `./artifacts`, or wherever `ARTIFACTS_DIR` points.
//!
//! ```text
//! cargo test --test token_supply -- --ignored
//! ```

use std::path::PathBuf;
use std::time::Duration;

use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::{hex, Address, U256};

use solythra_deploy::blockchain::{ChainClient, TxSender};
use solythra_deploy::config::{ChainSettings, Secret};
use solythra_deploy::contracts::bindings::{IMintium, ISolythis};
use solythra_deploy::contracts::{
    mintium_total_supply, token_units, ArtifactStore, ConstructorArg, ConstructorArgs,
    ContractKind,
};
use solythra_deploy::deploy::{AlloyChain, ChainOps};

fn artifacts_dir() -> PathBuf {
    std::env::var("ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts"))
}

async fn connect(anvil: &AnvilInstance) -> (ChainClient, AlloyChain) {
    let settings = ChainSettings {
        network: "localhost".to_string(),
        chain_id: anvil.chain_id(),
        rpc_url: anvil.endpoint_url(),
        signer_key: Secret::new(hex::encode(anvil.keys()[0].to_bytes())),
        rpc_timeout: Duration::from_secs(10),
        tx_timeout: Duration::from_secs(30),
        confirmation_blocks: 1,
    };
    let client = ChainClient::connect(&settings).await.unwrap();
    let chain = AlloyChain::new(
        TxSender::new(client.clone()),
        ArtifactStore::new(artifacts_dir()),
    );
    (client, chain)
}

#[tokio::test]
#[ignore = "requires anvil and compiled contract artifacts"]
async fn test_mintium_total_supply_is_fixed() {
    let anvil = Anvil::new().try_spawn().unwrap();
    let (client, chain) = connect(&anvil).await;
    let owner = client.address();

    let address = chain
        .deploy(
            ContractKind::Mintium,
            &ConstructorArgs::new(vec![ConstructorArg::Address(owner)]),
        )
        .await
        .unwrap();

    let token = IMintium::new(address, client.provider().clone());
    let supply = token.totalSupply().call().await.unwrap();
    assert_eq!(supply, mintium_total_supply());
    assert_eq!(supply, U256::from(100_000_000u64) * U256::from(10u64).pow(U256::from(18)));
}

#[tokio::test]
#[ignore = "requires anvil and compiled contract artifacts"]
async fn test_solythis_total_supply_matches_constructor() {
    let anvil = Anvil::new().try_spawn().unwrap();
    let (client, chain) = connect(&anvil).await;
    let owner = client.address();
    let initial_supply = token_units(1_000_000_000);

    let address = chain
        .deploy(
            ContractKind::Solythis,
            &ConstructorArgs::new(vec![
                ConstructorArg::Address(owner),
                ConstructorArg::Uint(initial_supply),
            ]),
        )
        .await
        .unwrap();

    let token = ISolythis::new(address, client.provider().clone());
    assert_eq!(token.totalSupply().call().await.unwrap(), initial_supply);
    assert_ne!(address, Address::ZERO);
}
