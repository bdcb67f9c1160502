//! Deployment orchestration.
//!
//! # Steps
//! ```text
//! 1. precondition check   (settings resolution, before any network call)
//! 2. deploy Governance      (owner, treasury)
//! 3. deploy NFTMarketplace  (owner, MINTIUM_TOKEN, treasury)
//! 4. deploy Mintium         (owner, treasury)
//! 5. deploy Solythis        (owner, treasury)
//! 6. wire Mintium           (non-zero marketplace / pool only)
//! 7. wire Solythis          (governance, treasury)
//! 8. delay
//! 9. verify                 Mintium, Solythis, Governance, NFTMarketplace
//! ```
//!
//! Every step awaits the previous one; the first failure ends the run.

use std::future::Future;
use std::time::Duration;

use alloy::primitives::Address;
use tokio::time::sleep;

use crate::config::{DeploySettings, DeployerConfig, EnvSnapshot, VerificationPolicy};
use crate::contracts::{ConstructorArgs, ContractKind};
use crate::deploy::chain::ChainOps;
use crate::deploy::types::{DeployedContract, DeploymentResult, OrchestratorError};
use crate::deploy::wiring::{mintium_wiring, solythis_wiring, WiringCall};
use crate::verification::{SourceVerifier, VerificationOutcome, VerificationRequest};

/// Run-specific values the orchestrator needs, taken from [`DeploySettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    pub treasury: Address,
    pub liquidity_pool: Address,
    /// Token address handed to the NFTMarketplace constructor.
    pub mintium_token: Address,
    pub verify_delay: Duration,
    pub verification_policy: VerificationPolicy,
}

impl DeploymentPlan {
    pub fn from_settings(settings: &DeploySettings) -> Self {
        Self {
            treasury: settings.treasury,
            liquidity_pool: settings.liquidity_pool,
            mintium_token: settings.mintium_token,
            verify_delay: settings.verify_delay,
            verification_policy: settings.verification_policy,
        }
    }
}

/// Sequential deploy, wire and verify pipeline.
pub struct Orchestrator<C, V> {
    chain: C,
    /// `None` skips the delay and verification steps.
    verifier: Option<V>,
    plan: DeploymentPlan,
}

impl<C, V> Orchestrator<C, V>
where
    C: ChainOps,
    V: SourceVerifier,
{
    pub fn new(chain: C, verifier: Option<V>, plan: DeploymentPlan) -> Self {
        Self {
            chain,
            verifier,
            plan,
        }
    }

    /// Run steps 2 through 9.
    pub async fn run(&self) -> Result<DeploymentResult, OrchestratorError> {
        let owner = self.chain.deployer();
        let plan = &self.plan;

        tracing::info!(
            deployer = %owner,
            treasury = %plan.treasury,
            liquidity_pool = %plan.liquidity_pool,
            "Starting deployment"
        );

        let governance = self
            .deploy(
                ContractKind::Governance,
                ConstructorArgs::owner_treasury(owner, plan.treasury),
            )
            .await?;

        tracing::warn!(
            token = %plan.mintium_token,
            "NFTMarketplace is constructed with the configured MINTIUM_TOKEN, \
             not the Mintium contract deployed later in this run"
        );
        let marketplace = self
            .deploy(
                ContractKind::NftMarketplace,
                ConstructorArgs::owner_token_treasury(owner, plan.mintium_token, plan.treasury),
            )
            .await?;

        let mintium = self
            .deploy(
                ContractKind::Mintium,
                ConstructorArgs::owner_treasury(owner, plan.treasury),
            )
            .await?;
        if mintium.address != plan.mintium_token {
            tracing::warn!(
                configured_token = %plan.mintium_token,
                deployed_mintium = %mintium.address,
                "NFTMarketplace token reference differs from the Mintium deployed in this run"
            );
        }

        let solythis = self
            .deploy(
                ContractKind::Solythis,
                ConstructorArgs::owner_treasury(owner, plan.treasury),
            )
            .await?;

        tracing::info!("Configuring Mintium");
        self.wire(
            mintium.address,
            mintium_wiring(marketplace.address, plan.liquidity_pool),
        )
        .await?;

        tracing::info!("Configuring Solythis governance and treasury");
        self.wire(
            solythis.address,
            solythis_wiring(governance.address, plan.treasury),
        )
        .await?;

        let result = DeploymentResult {
            governance: governance.address,
            nft_marketplace: marketplace.address,
            mintium: mintium.address,
            solythis: solythis.address,
        };

        match &self.verifier {
            Some(verifier) => {
                tracing::info!(
                    delay_secs = plan.verify_delay.as_secs(),
                    "Waiting before verifying contracts"
                );
                sleep(plan.verify_delay).await;

                let deployed = [governance, marketplace, mintium, solythis];
                self.verify_all(verifier, &deployed, result).await?;
                tracing::info!("Contract verification complete");
            }
            None => {
                tracing::warn!("Verification disabled; skipping");
            }
        }

        tracing::info!(deployment = %result, "Deployment successful");
        Ok(result)
    }

    async fn deploy(
        &self,
        kind: ContractKind,
        args: ConstructorArgs,
    ) -> Result<DeployedContract, OrchestratorError> {
        tracing::info!(contract = %kind, args = %args, "Deploying");

        let address = self
            .chain
            .deploy(kind, &args)
            .await
            .map_err(|source| OrchestratorError::Deploy {
                contract: kind,
                source,
            })?;

        tracing::info!(contract = %kind, address = %address, "Deployed");

        Ok(DeployedContract {
            kind,
            address,
            constructor_args: args,
        })
    }

    async fn wire(&self, target: Address, calls: Vec<WiringCall>) -> Result<(), OrchestratorError> {
        for call in calls {
            let tx_hash = self
                .chain
                .call(target, call)
                .await
                .map_err(|source| OrchestratorError::Wire { call, source })?;
            tracing::info!(call = %call, tx_hash = %tx_hash, "Wiring call confirmed");
        }
        Ok(())
    }

    async fn verify_all(
        &self,
        verifier: &V,
        deployed: &[DeployedContract],
        deployment: DeploymentResult,
    ) -> Result<(), OrchestratorError> {
        let mut failures = Vec::new();

        let ordered = ContractKind::VERIFY_ORDER
            .iter()
            .filter_map(|kind| deployed.iter().find(|c| c.kind == *kind));

        for contract in ordered {
            let request = VerificationRequest {
                contract: contract.kind,
                address: contract.address,
                constructor_args: contract.constructor_args.clone(),
            };

            match verifier.verify(&request).await {
                Ok(VerificationOutcome::Verified) => {
                    tracing::info!(contract = %contract.kind, address = %contract.address, "Verified");
                }
                Ok(VerificationOutcome::AlreadyVerified) => {
                    tracing::info!(contract = %contract.kind, address = %contract.address, "Already verified");
                }
                Err(e) => {
                    tracing::error!(contract = %contract.kind, error = %e, "Verification failed");
                    failures.push((contract.kind, e));
                    if self.plan.verification_policy == VerificationPolicy::FailFast {
                        break;
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(OrchestratorError::Verify {
                failures,
                deployment,
            })
        }
    }
}

/// Step 1 then the rest: resolve settings from `env`, build an orchestrator
/// with `build`, and run it.
///
/// `build` is only invoked once every required variable is present, so a
/// missing key never reaches the chain.
pub async fn execute<C, V, F, Fut>(
    config: &DeployerConfig,
    network: &str,
    env: &EnvSnapshot,
    build: F,
) -> Result<DeploymentResult, OrchestratorError>
where
    C: ChainOps,
    V: SourceVerifier,
    F: FnOnce(DeploySettings) -> Fut,
    Fut: Future<Output = Result<Orchestrator<C, V>, OrchestratorError>>,
{
    let settings = DeploySettings::resolve(config, network, env)?;
    tracing::info!(network = network, "Required configuration present");

    let orchestrator = build(settings).await?;
    orchestrator.run().await
}
