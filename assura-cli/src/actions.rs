//! Contract actions. Each submits one transaction and waits for it to confirm.

use alloy_primitives::Bytes;
use serde::Serialize;

use assura_types::constants::{FEE_AMOUNT, PAYMENT_AMOUNT};
use assura_types::primitives::{address_to_hex, tx_hash_to_hex, Address};

use crate::error::ActionError;
use crate::session::Session;
use crate::wallet::{InsuranceContract, PendingTransaction, ProviderError, Receipt};

fn require(session: Option<&Session>) -> Result<&Session, ActionError> {
    session.ok_or(ActionError::NoSession)
}

async fn confirm(
    pending: Result<PendingTransaction, ProviderError>,
) -> Result<Receipt, ActionError> {
    let pending = pending.map_err(ActionError::TransactionRejectedOrFailed)?;
    tracing::debug!(tx_hash = %tx_hash_to_hex(&pending.hash()), "awaiting confirmation");
    let receipt = pending
        .wait()
        .await
        .map_err(ActionError::TransactionRejectedOrFailed)?;
    tracing::info!(
        tx_hash = %tx_hash_to_hex(&receipt.tx_hash),
        block = receipt.block_number,
        "transaction confirmed"
    );
    Ok(receipt)
}

/// Call `approveClaim()` with no value.
pub async fn approve_claim(session: Option<&Session>) -> Result<Receipt, ActionError> {
    let session = require(session)?;
    let receipt = confirm(session.contract().approve_claim().await).await?;
    tracing::info!("Claim approved");
    Ok(receipt)
}

/// Call `executePayment()` with exactly [`PAYMENT_AMOUNT`] attached.
pub async fn execute_payment(session: Option<&Session>) -> Result<Receipt, ActionError> {
    let session = require(session)?;
    let receipt = confirm(session.contract().execute_payment(PAYMENT_AMOUNT).await).await?;
    tracing::info!(value = %PAYMENT_AMOUNT, "Payment executed");
    Ok(receipt)
}

/// Send [`FEE_AMOUNT`] to the contract address with no calldata.
pub async fn pay_fee(session: Option<&Session>) -> Result<Receipt, ActionError> {
    let session = require(session)?;
    let to = session.contract().address();
    let receipt = confirm(
        session
            .signer()
            .send_transaction(Some(to), FEE_AMOUNT, Bytes::new())
            .await,
    )
    .await?;
    tracing::info!(value = %FEE_AMOUNT, "Fee paid");
    Ok(receipt)
}

/// Public state of the insurance contract.
#[derive(Debug, Clone, Serialize)]
pub struct ContractSnapshot {
    pub address: String,
    pub claim_approved: bool,
    pub contract_details: String,
    pub insured: String,
    pub insurer: String,
}

/// Read every public accessor of the bound contract.
pub async fn inspect(session: Option<&Session>) -> Result<ContractSnapshot, ActionError> {
    let session = require(session)?;
    let contract = session.contract();
    let read = ActionError::ContractReadFailed;
    Ok(ContractSnapshot {
        address: address_to_hex(&contract.address()),
        claim_approved: contract.claim_approved().await.map_err(read)?,
        contract_details: contract.contract_details().await.map_err(read)?,
        insured: address_to_hex(&contract.insured().await.map_err(read)?),
        insurer: address_to_hex(&contract.insurer().await.map_err(read)?),
    })
}

/// Deploy a new policy contract from the session account.
pub async fn deploy(
    session: Option<&Session>,
    bytecode: &[u8],
    insured: Address,
    details: &str,
) -> Result<Receipt, ActionError> {
    let session = require(session)?;
    let receipt = confirm(
        InsuranceContract::deploy(session.signer(), bytecode, insured, details).await,
    )
    .await?;
    if let Some(addr) = receipt.contract_address {
        tracing::info!(contract = %address_to_hex(&addr), "policy contract deployed");
    }
    Ok(receipt)
}
