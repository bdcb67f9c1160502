//! Transaction submission and confirmation.
//!
//! # Responsibilities
//! - Send contract-creation and contract-call transactions from the signer
//! - Wait for the configured number of confirmations, bounded by a timeout
//! - Map reverted receipts and missing creation addresses to errors
//!
//! Nonce, gas and fee fields are filled by the provider's recommended
//! fillers. Nothing here retries.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{PendingTransactionError, Provider, WatchTxError};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmedTx};

/// Sends transactions through a [`ChainClient`] one at a time.
#[derive(Debug, Clone)]
pub struct TxSender {
    client: ChainClient,
}

impl TxSender {
    pub fn new(client: ChainClient) -> Self {
        Self { client }
    }

    /// Deploy `code` (creation bytecode with encoded constructor arguments
    /// appended) and return the created address with its transaction.
    pub async fn deploy(&self, code: Bytes) -> BlockchainResult<(Address, ConfirmedTx)> {
        let tx = TransactionRequest::default().with_deploy_code(code);
        let confirmed = self.send_and_confirm(tx).await?;
        let address = confirmed
            .contract_address
            .ok_or(BlockchainError::MissingContractAddress(confirmed.tx_hash))?;
        Ok((address, confirmed))
    }

    /// Call `to` with `input` and return the confirmed transaction.
    pub async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<ConfirmedTx> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.send_and_confirm(tx).await
    }

    async fn send_and_confirm(&self, tx: TransactionRequest) -> BlockchainResult<ConfirmedTx> {
        let tx = tx.with_from(self.client.address());

        let pending = self
            .client
            .with_timeout(self.client.provider().send_transaction(tx))
            .await?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %tx_hash, "Transaction broadcast");

        let timeout = self.client.tx_timeout();
        let receipt = pending
            .with_required_confirmations(self.client.confirmations())
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|e| match e {
                PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
                    BlockchainError::ConfirmationTimeout {
                        tx_hash,
                        secs: timeout.as_secs(),
                    }
                }
                other => BlockchainError::Rpc(other.to_string()),
            })?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash));
        }

        let confirmed = ConfirmedTx {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            contract_address: receipt.contract_address,
        };

        tracing::debug!(
            tx_hash = %tx_hash,
            block_number = ?confirmed.block_number,
            gas_used = confirmed.gas_used,
            "Transaction confirmed"
        );

        Ok(confirmed)
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.client.address()
    }
}
