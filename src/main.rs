//! Solythra deployer
//!
//! Deploys and wires the contract suite, then verifies sources on the
//! network's block explorer.
//!
//! # Pipeline
//!
//! ```text
//!   .env / process env ──▶ EnvSnapshot ──┐
//!                                        ├──▶ DeploySettings ──▶ ChainClient ──▶ AlloyChain ──┐
//!   deploy.toml (optional) ──────────────┘          │                                         │
//!                                                   └──────▶ EtherscanVerifier ───────────────┤
//!                                                                                             ▼
//!                                          Governance → NFTMarketplace → Mintium → Solythis
//!                                          wire Mintium → wire Solythis → delay → verify ×4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use solythra_deploy::blockchain::{ChainClient, TxSender};
use solythra_deploy::config::{load_or_default, EnvSnapshot, VerificationPolicy};
use solythra_deploy::contracts::artifacts::ArtifactStore;
use solythra_deploy::deploy::{
    execute, AlloyChain, DeploymentPlan, DeploymentResult, Orchestrator, OrchestratorError,
};
use solythra_deploy::observability::init_logging;
use solythra_deploy::verification::etherscan::EtherscanVerifier;

#[derive(Parser)]
#[command(name = "solythra-deploy")]
#[command(about = "Deploy, wire and verify the Solythra contracts", long_about = None)]
struct Cli {
    /// Target network (defaults to the config's default network)
    #[arg(short, long, env = "DEPLOY_NETWORK")]
    network: Option<String>,

    /// Path to a TOML network configuration
    #[arg(short, long, env = "DEPLOY_CONFIG")]
    config: Option<PathBuf>,

    /// Verification failure handling: best-effort or fail-fast
    #[arg(long, env = "VERIFY_POLICY")]
    verify_policy: Option<VerificationPolicy>,

    /// Deploy and wire only
    #[arg(long)]
    skip_verify: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Deployment failed");
            eprintln!("Error: {}", e);
            if let OrchestratorError::Verify { deployment, .. } = &e {
                println!("{}", deployment);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<DeploymentResult, OrchestratorError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(policy) = cli.verify_policy {
        config.verification.policy = policy;
    }
    let network = cli
        .network
        .unwrap_or_else(|| config.default_network.clone());
    let skip_verify = cli.skip_verify;

    let env = EnvSnapshot::from_process();

    execute(&config, &network, &env, |settings| async move {
        let client = ChainClient::connect(&settings.chain)
            .await
            .map_err(OrchestratorError::Connect)?;
        let artifacts = ArtifactStore::new(&settings.artifacts_root);

        let verifier = match &settings.explorer {
            Some(_) if skip_verify => {
                tracing::info!("Verification skipped by request");
                None
            }
            Some(explorer) => Some(
                EtherscanVerifier::new(explorer, settings.chain.chain_id, artifacts.clone())
                    .map_err(OrchestratorError::VerifierSetup)?,
            ),
            None => None,
        };

        let chain = AlloyChain::new(TxSender::new(client), artifacts);
        Ok::<_, OrchestratorError>(Orchestrator::new(
            chain,
            verifier,
            DeploymentPlan::from_settings(&settings),
        ))
    })
    .await
}
