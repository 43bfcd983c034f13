use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use alloy_primitives::{keccak256, Bytes};
use alloy_sol_types::{SolCall, SolInterface};

use assura_abi::{Insurance, InsuranceCalls};
use assura_types::primitives::{Address, TxHash, Wei, ZERO_ADDRESS};

use super::provider::{ProviderError, Receipt, TransactionRequest, WalletProvider};

/// Account the simulated wallet authorizes by default.
pub const SIMULATED_ACCOUNT: Address = Address::new([0x5a; 20]);

/// Insurer reported by the emulated contract.
pub const SIMULATED_INSURER: Address = Address::new([0x1e; 20]);

/// Chain id of the simulated network (a local dev chain).
pub const SIMULATED_CHAIN_ID: u64 = 1337;

/// Time the simulated network takes to "mine" a transaction.
const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_millis(500);

/// How the simulated wallet should fail transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    /// The user declines to sign.
    Rejected,
    /// The account cannot cover the value.
    InsufficientFunds,
    /// The transaction is mined but reverts.
    Revert,
}

#[derive(Debug, Default)]
struct SimulatedState {
    authorization_requests: usize,
    sent: Vec<TransactionRequest>,
    receipts: HashMap<TxHash, Receipt>,
    nonce: u64,
    block: u64,
    claim_approved: bool,
    payments_received: Wei,
}

/// In-process wallet with an emulated insurance contract.
///
/// Authorizes instantly, mines after a fixed delay, and records every request.
/// Serves the `mock` mode and the tests.
pub struct SimulatedWallet {
    accounts: Vec<Address>,
    reject_authorization: bool,
    failure: Option<SimulatedFailure>,
    confirmation_delay: Duration,
    contract_details: String,
    state: Mutex<SimulatedState>,
}

impl Default for SimulatedWallet {
    fn default() -> Self {
        Self::new(SIMULATED_ACCOUNT)
    }
}

impl SimulatedWallet {
    pub fn new(account: Address) -> Self {
        Self {
            accounts: vec![account],
            reject_authorization: false,
            failure: None,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
            contract_details: "Simulated life insurance policy".to_string(),
            state: Mutex::new(SimulatedState::default()),
        }
    }

    /// Decline every account authorization request.
    pub fn with_rejected_authorization(mut self) -> Self {
        self.reject_authorization = true;
        self
    }

    /// Authorize, but expose no accounts.
    pub fn with_no_accounts(mut self) -> Self {
        self.accounts.clear();
        self
    }

    /// Fail every transaction the given way.
    pub fn with_failure(mut self, failure: SimulatedFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    pub fn with_contract_details(mut self, details: &str) -> Self {
        self.contract_details = details.to_string();
        self
    }

    /// Number of account authorization prompts shown so far.
    pub fn authorization_requests(&self) -> usize {
        self.state().authorization_requests
    }

    /// Every transaction submitted so far, in order.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state().sent.clone()
    }

    /// Total value received through `executePayment()`.
    pub fn payments_received(&self) -> Wei {
        self.state().payments_received
    }

    pub fn claim_approved(&self) -> bool {
        self.state().claim_approved
    }

    fn state(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply a mined transaction to the emulated contract.
    fn apply(state: &mut SimulatedState, tx: &TransactionRequest) {
        match InsuranceCalls::abi_decode(&tx.data, true) {
            Ok(InsuranceCalls::approveClaim(_)) => state.claim_approved = true,
            Ok(InsuranceCalls::executePayment(_)) => state.payments_received += tx.value,
            _ => {}
        }
    }

    fn read(&self, state: &SimulatedState, data: &[u8]) -> Result<Bytes, ProviderError> {
        let call = InsuranceCalls::abi_decode(data, true)
            .map_err(|_| execution_reverted("unknown selector"))?;
        let out = match call {
            InsuranceCalls::claimApproved(_) => {
                Insurance::claimApprovedCall::abi_encode_returns(&(state.claim_approved,))
            }
            InsuranceCalls::contractDetails(_) => {
                let details = self.contract_details.clone();
                Insurance::contractDetailsCall::abi_encode_returns(&(details,))
            }
            InsuranceCalls::insured(_) => {
                let insured = self.accounts.first().copied().unwrap_or(ZERO_ADDRESS);
                Insurance::insuredCall::abi_encode_returns(&(insured,))
            }
            InsuranceCalls::insurer(_) => {
                Insurance::insurerCall::abi_encode_returns(&(SIMULATED_INSURER,))
            }
            _ => return Err(execution_reverted("not a view function")),
        };
        Ok(out.into())
    }
}

fn execution_reverted(reason: &str) -> ProviderError {
    ProviderError::Rpc {
        code: 3,
        message: format!("execution reverted: {}", reason),
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(SIMULATED_CHAIN_ID)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.state().authorization_requests += 1;
        if self.reject_authorization {
            return Err(ProviderError::UserRejected);
        }
        Ok(self.accounts.clone())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        match self.failure {
            Some(SimulatedFailure::Rejected) => return Err(ProviderError::UserRejected),
            Some(SimulatedFailure::InsufficientFunds) => {
                return Err(ProviderError::InsufficientFunds)
            }
            _ => {}
        }

        let mut state = self.state();
        let mut preimage = Vec::with_capacity(28 + tx.data.len());
        preimage.extend_from_slice(tx.from.as_slice());
        preimage.extend_from_slice(&state.nonce.to_be_bytes());
        preimage.extend_from_slice(&tx.data);
        let tx_hash = keccak256(&preimage);

        let contract_address = tx
            .to
            .is_none()
            .then(|| Address::from_slice(&keccak256(&preimage[..28])[12..]));

        let success = self.failure != Some(SimulatedFailure::Revert);
        if success {
            Self::apply(&mut state, tx);
        }

        state.nonce += 1;
        state.block += 1;
        let block = state.block;
        state.sent.push(tx.clone());
        state.receipts.insert(
            tx_hash,
            Receipt {
                tx_hash,
                block_number: Some(block),
                success,
                contract_address,
            },
        );
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, ProviderError> {
        tokio::time::sleep(self.confirmation_delay).await;
        self.state()
            .receipts
            .get(tx_hash)
            .cloned()
            .ok_or_else(|| ProviderError::InvalidResponse("unknown transaction".to_string()))
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        let state = self.state();
        self.read(&state, &tx.data)
    }
}
