//! Token transfer smoke script.
//!
//! Sends a fixed amount of MNTM and then LYTH from the signer to one
//! recipient, waiting for each transfer to confirm before the next.

use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;

use crate::blockchain::{BlockchainResult, ChainClient, TxSender};
use crate::contracts::bindings::{IMintium, ISolythis};

/// Addresses the smoke script targets by default.
pub const DEFAULT_MINTIUM: &str = "0xb8F36458A5E8FD2fa9868De995752DAdd1d5293a";
pub const DEFAULT_SOLYTHIS: &str = "0x344B3eEeE292506B1a2b141d52b61012A4962673";
pub const DEFAULT_RECIPIENT: &str = "0x384F150324358b4C34928469603Fb62CDbD067fE";

/// What to send, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub mintium: Address,
    pub solythis: Address,
    pub recipient: Address,
    /// Base units sent of each token.
    pub amount: U256,
}

/// Confirmed transfer hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipts {
    pub mintium: TxHash,
    pub solythis: TxHash,
}

/// `transfer(recipient, amount)` calldata, shared by both tokens.
pub fn transfer_calldata(recipient: Address, amount: U256) -> Vec<u8> {
    // Both tokens expose the same ERC-20 transfer signature.
    debug_assert_eq!(
        IMintium::transferCall::SELECTOR,
        ISolythis::transferCall::SELECTOR
    );
    IMintium::transferCall {
        to: recipient,
        amount,
    }
    .abi_encode()
}

/// Run both transfers in order.
pub async fn run_transfers(
    client: &ChainClient,
    plan: &TransferPlan,
) -> BlockchainResult<TransferReceipts> {
    let sender = TxSender::new(client.clone());
    let calldata = transfer_calldata(plan.recipient, plan.amount);

    tracing::info!(recipient = %plan.recipient, amount = %plan.amount, "Sending MNTM");
    let mintium = sender.call(plan.mintium, calldata.clone().into()).await?;
    tracing::info!(tx_hash = %mintium.tx_hash, "MNTM transfer confirmed");

    tracing::info!(recipient = %plan.recipient, amount = %plan.amount, "Sending LYTH");
    let solythis = sender.call(plan.solythis, calldata.into()).await?;
    tracing::info!(tx_hash = %solythis.tx_hash, "LYTH transfer confirmed");

    let mntm_balance = client
        .with_timeout(
            IMintium::new(plan.mintium, client.provider().clone())
                .balanceOf(plan.recipient)
                .call(),
        )
        .await?;
    let lyth_balance = client
        .with_timeout(
            ISolythis::new(plan.solythis, client.provider().clone())
                .balanceOf(plan.recipient)
                .call(),
        )
        .await?;
    tracing::info!(
        recipient = %plan.recipient,
        mntm = %mntm_balance,
        lyth = %lyth_balance,
        "Transfers completed"
    );

    Ok(TransferReceipts {
        mintium: mintium.tx_hash,
        solythis: solythis.tx_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::token_units;
    use std::str::FromStr;

    #[test]
    fn test_default_addresses_parse() {
        for raw in [DEFAULT_MINTIUM, DEFAULT_SOLYTHIS, DEFAULT_RECIPIENT] {
            assert!(Address::from_str(raw).is_ok(), "{raw}");
        }
    }

    #[test]
    fn test_transfer_calldata() {
        let recipient = Address::from_str(DEFAULT_RECIPIENT).unwrap();
        let calldata = transfer_calldata(recipient, token_units(10));
        assert_eq!(calldata.len(), 4 + 64);
        assert_eq!(&calldata[..4], &[0xa9, 0x05, 0x9c, 0xbb]);

        let decoded = IMintium::transferCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.to, recipient);
        assert_eq!(decoded.amount, token_units(10));
    }
}
