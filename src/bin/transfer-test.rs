use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::Address;
use clap::Parser;

use solythra_deploy::blockchain::ChainClient;
use solythra_deploy::config::{load_or_default, ChainSettings, EnvSnapshot, Operation};
use solythra_deploy::contracts::token_units;
use solythra_deploy::observability::init_logging;
use solythra_deploy::transfer::{
    run_transfers, TransferPlan, DEFAULT_MINTIUM, DEFAULT_RECIPIENT, DEFAULT_SOLYTHIS,
};

#[derive(Parser)]
#[command(name = "transfer-test")]
#[command(about = "Send MNTM and LYTH to a recipient as a smoke test", long_about = None)]
struct Cli {
    /// Target network (defaults to the config's default network)
    #[arg(short, long, env = "DEPLOY_NETWORK")]
    network: Option<String>,

    #[arg(short, long, env = "DEPLOY_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "MINTIUM_ADDRESS", default_value = DEFAULT_MINTIUM)]
    mintium: Address,

    #[arg(long, env = "SOLYTHIS_ADDRESS", default_value = DEFAULT_SOLYTHIS)]
    solythis: Address,

    #[arg(long, env = "TRANSFER_RECIPIENT", default_value = DEFAULT_RECIPIENT)]
    recipient: Address,

    /// Whole tokens (18 decimals) sent of each token
    #[arg(long, default_value_t = 10)]
    amount: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Transfer failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_or_default(cli.config.as_deref())?;
    let network = cli
        .network
        .unwrap_or_else(|| config.default_network.clone());
    let env = EnvSnapshot::from_process();

    let settings = ChainSettings::resolve(&config, &network, Operation::Transfer, &env)?;
    let client = ChainClient::connect(&settings).await?;

    let plan = TransferPlan {
        mintium: cli.mintium,
        solythis: cli.solythis,
        recipient: cli.recipient,
        amount: token_units(cli.amount),
    };
    let receipts = run_transfers(&client, &plan).await?;

    println!("MNTM transfer: {}", receipts.mintium);
    println!("LYTH transfer: {}", receipts.solythis);
    Ok(())
}
