use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::hex;
use clap::Parser;

use solythra_deploy::blockchain::Wallet;
use solythra_deploy::config::{load_or_default, ChainSettings, EnvSnapshot, Operation};
use solythra_deploy::observability::init_logging;
use solythra_deploy::voting::{LocalWalletProvider, VoteChoice, VotingSession};

#[derive(Parser)]
#[command(name = "vote")]
#[command(about = "Sign a governance vote with the configured key", long_about = None)]
struct Cli {
    /// "a" / "Option A" or "b" / "Option B"
    #[arg(short = 'c', long)]
    choice: VoteChoice,

    /// Network whose signer signs the vote
    #[arg(short, long, env = "DEPLOY_NETWORK")]
    network: Option<String>,

    #[arg(long, env = "DEPLOY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Vote failed");
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

    // Signing is offline; only the key and chain id are used.
    let settings = ChainSettings::resolve(&config, &network, Operation::Vote, &env)?;
    let wallet = Wallet::from_private_key(settings.signer_key.expose(), settings.chain_id)?;

    let mut session = VotingSession::new(LocalWalletProvider::new(wallet));
    session.connect().await?;
    println!("{}", session.connect_label());

    let record = session.submit_vote(cli.choice).await?;
    println!("Message:   {}", record.choice.message());
    println!("Signer:    {}", record.signer);
    println!("Signature: {}", hex::encode_prefixed(record.signature.as_bytes()));
    Ok(())
}
