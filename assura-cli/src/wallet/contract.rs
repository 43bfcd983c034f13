use std::sync::Arc;

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolCall;

use assura_abi::{deploy_data, Insurance};
use assura_types::primitives::{tx_hash_to_hex, Address, TxHash, Wei};

use super::provider::{ProviderError, Receipt, TransactionRequest, WalletProvider};

/// The wallet provider bound to one authorized account.
#[derive(Clone)]
pub struct Signer {
    provider: Arc<dyn WalletProvider>,
    account: Address,
}

impl Signer {
    pub fn new(provider: Arc<dyn WalletProvider>, account: Address) -> Self {
        Self { provider, account }
    }

    pub fn address(&self) -> Address {
        self.account
    }

    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Sign and broadcast a transaction from the bound account.
    pub async fn send_transaction(
        &self,
        to: Option<Address>,
        value: Wei,
        data: Bytes,
    ) -> Result<PendingTransaction, ProviderError> {
        let tx = TransactionRequest {
            from: self.account,
            to,
            value,
            data,
        };
        let hash = self.provider.send_transaction(&tx).await?;
        tracing::debug!(
            tx_hash = %tx_hash_to_hex(&hash),
            value = %value,
            "transaction submitted"
        );
        Ok(PendingTransaction {
            hash,
            provider: Arc::clone(&self.provider),
        })
    }

    /// Read-only call from the bound account.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        let tx = TransactionRequest {
            from: self.account,
            to: Some(to),
            value: U256::ZERO,
            data,
        };
        self.provider.call(&tx).await
    }
}

/// A submitted transaction that has not been confirmed yet.
pub struct PendingTransaction {
    hash: TxHash,
    provider: Arc<dyn WalletProvider>,
}

impl PendingTransaction {
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Wait for the receipt. A mined-but-reverted transaction is an error.
    pub async fn wait(self) -> Result<Receipt, ProviderError> {
        let receipt = self.provider.wait_for_receipt(&self.hash).await?;
        if !receipt.success {
            return Err(ProviderError::Reverted { tx_hash: self.hash });
        }
        Ok(receipt)
    }
}

/// Binding of the insurance contract's address to a signer.
#[derive(Clone)]
pub struct InsuranceContract {
    address: Address,
    signer: Signer,
}

impl InsuranceContract {
    pub fn new(address: Address, signer: Signer) -> Self {
        Self { address, signer }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Submit `approveClaim()`.
    pub async fn approve_claim(&self) -> Result<PendingTransaction, ProviderError> {
        self.transact(Insurance::approveClaimCall {}, U256::ZERO).await
    }

    /// Submit `executePayment()` with `value` attached.
    pub async fn execute_payment(&self, value: Wei) -> Result<PendingTransaction, ProviderError> {
        self.transact(Insurance::executePaymentCall {}, value).await
    }

    pub async fn claim_approved(&self) -> Result<bool, ProviderError> {
        Ok(self.read(Insurance::claimApprovedCall {}).await?._0)
    }

    pub async fn contract_details(&self) -> Result<String, ProviderError> {
        Ok(self.read(Insurance::contractDetailsCall {}).await?._0)
    }

    pub async fn insured(&self) -> Result<Address, ProviderError> {
        Ok(self.read(Insurance::insuredCall {}).await?._0)
    }

    pub async fn insurer(&self) -> Result<Address, ProviderError> {
        Ok(self.read(Insurance::insurerCall {}).await?._0)
    }

    /// Submit a creation transaction for a new policy contract.
    pub async fn deploy(
        signer: &Signer,
        bytecode: &[u8],
        insured: Address,
        details: &str,
    ) -> Result<PendingTransaction, ProviderError> {
        let data = deploy_data(bytecode, insured, details);
        signer.send_transaction(None, U256::ZERO, data).await
    }

    async fn transact<C: SolCall>(
        &self,
        call: C,
        value: Wei,
    ) -> Result<PendingTransaction, ProviderError> {
        self.signer
            .send_transaction(Some(self.address), value, call.abi_encode().into())
            .await
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, ProviderError> {
        let out = self
            .signer
            .call(self.address, call.abi_encode().into())
            .await?;
        Ok(C::abi_decode_returns(&out, true)?)
    }
}
