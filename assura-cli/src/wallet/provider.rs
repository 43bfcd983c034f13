use async_trait::async_trait;
use thiserror::Error;

use alloy_primitives::Bytes;

use assura_types::primitives::{tx_hash_to_hex, Address, TxHash, Wei};

/// A transaction to sign and send, or a read-only call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    /// `None` deploys a contract.
    pub to: Option<Address>,
    pub value: Wei,
    pub data: Bytes,
}

/// The confirmation of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
    pub contract_address: Option<Address>,
}

/// Why a wallet call failed.
///
/// Users see one generic notice per action; the distinction here only
/// reaches the logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("user rejected the request")]
    UserRejected,

    #[error("insufficient funds for gas * price + value")]
    InsufficientFunds,

    #[error("transaction {} reverted", tx_hash_to_hex(.tx_hash))]
    Reverted { tx_hash: TxHash },

    #[error("rpc error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("abi error: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// The wallet capability injected into the desk.
///
/// Mirrors the EIP-1193 surface the desk relies on: account authorization,
/// transaction submission, confirmation and read-only calls.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Check the provider is reachable. Used to detect whether a wallet is present.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Ask the wallet for account access. May prompt the user.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Sign and broadcast a transaction, returning its hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Wait until the transaction is mined.
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, ProviderError>;

    /// Execute a read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError>;
}
