//! Governance vote signing.
//!
//! # Flow
//! ```text
//! connect()      → WalletProvider::request_accounts → first account
//! submit_vote(c) → requires connected account
//!                → WalletProvider::sign_message("Voting for: <c>")
//!                → VoteRecord (kept locally, never transmitted)
//! ```
//!
//! Votes are not stored anywhere; an off-chain store is out of scope.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use alloy::primitives::Address;
use alloy::signers::Signature;
use thiserror::Error;

use crate::blockchain::Wallet;

/// The fixed ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    OptionA,
    OptionB,
}

impl VoteChoice {
    /// Display label, as embedded in the signed message.
    pub fn label(&self) -> &'static str {
        match self {
            VoteChoice::OptionA => "Option A",
            VoteChoice::OptionB => "Option B",
        }
    }

    /// The exact plaintext that gets signed.
    pub fn message(&self) -> String {
        format!("Voting for: {}", self.label())
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VoteChoice {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "option a" | "option-a" => Ok(VoteChoice::OptionA),
            "b" | "option b" | "option-b" => Ok(VoteChoice::OptionB),
            _ => Err(VoteError::UnknownChoice(s.to_string())),
        }
    }
}

/// Errors from the vote flow.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("wallet provider returned no accounts")]
    NoAccounts,

    #[error("connect a wallet before voting")]
    NotConnected,

    #[error("wallet request failed: {0}")]
    Provider(String),

    #[error("unknown vote choice '{0}', expected 'Option A' or 'Option B'")]
    UnknownChoice(String),
}

/// A signed vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub choice: VoteChoice,
    pub signer: Address,
    pub signature: Signature,
}

impl VoteRecord {
    /// Check the signature recovers to the recorded signer.
    pub fn verify(&self) -> bool {
        self.signature
            .recover_address_from_msg(self.choice.message())
            .map(|recovered| recovered == self.signer)
            .unwrap_or(false)
    }
}

/// Source of accounts and message signatures.
pub trait WalletProvider {
    /// Ask for account access; suspends until the wallet answers.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, VoteError>> + Send;

    /// Ask `account` to sign `message` as an EIP-191 personal message.
    fn sign_message(
        &self,
        account: Address,
        message: &str,
    ) -> impl Future<Output = Result<Signature, VoteError>> + Send;
}

/// [`WalletProvider`] backed by a local private key.
#[derive(Debug, Clone)]
pub struct LocalWalletProvider {
    wallet: Wallet,
}

impl LocalWalletProvider {
    pub fn new(wallet: Wallet) -> Self {
        Self { wallet }
    }
}

impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, VoteError> {
        Ok(vec![self.wallet.address()])
    }

    async fn sign_message(&self, account: Address, message: &str) -> Result<Signature, VoteError> {
        if account != self.wallet.address() {
            return Err(VoteError::Provider(format!(
                "account {} is not managed by this wallet",
                account
            )));
        }
        self.wallet
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| VoteError::Provider(e.to_string()))
    }
}

/// One user's voting session.
#[derive(Debug)]
pub struct VotingSession<P> {
    provider: P,
    connected: Option<Address>,
    last_vote: Option<VoteRecord>,
}

impl<P: WalletProvider> VotingSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            connected: None,
            last_vote: None,
        }
    }

    /// Request accounts and remember the first one.
    pub async fn connect(&mut self) -> Result<Address, VoteError> {
        let accounts = self.provider.request_accounts().await?;
        let account = *accounts.first().ok_or(VoteError::NoAccounts)?;
        tracing::info!(account = %account, "Wallet connected");
        self.connected = Some(account);
        Ok(account)
    }

    /// Sign a vote for `choice` with the connected account.
    pub async fn submit_vote(&mut self, choice: VoteChoice) -> Result<VoteRecord, VoteError> {
        let signer = self.connected.ok_or(VoteError::NotConnected)?;
        let signature = self.provider.sign_message(signer, &choice.message()).await?;

        let record = VoteRecord {
            choice,
            signer,
            signature,
        };
        tracing::info!(choice = %choice, signer = %signer, "Vote signed");
        self.last_vote = Some(record.clone());
        Ok(record)
    }

    pub fn connected(&self) -> Option<Address> {
        self.connected
    }

    pub fn last_vote(&self) -> Option<&VoteRecord> {
        self.last_vote.as_ref()
    }

    /// Button label for the connect action.
    pub fn connect_label(&self) -> String {
        match self.connected {
            Some(address) => {
                let shown = address.to_string();
                format!("Connected: {}...", &shown[..6])
            }
            None => "Connect Wallet".to_string(),
        }
    }
}
