use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{hex, Bytes, U256};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::{Deserialize, Serialize};

use assura_types::primitives::{address_to_hex, tx_hash_to_hex, Address, TxHash};

use super::provider::{ProviderError, Receipt, TransactionRequest, WalletProvider};

/// JSON-RPC "method not found".
const METHOD_NOT_FOUND: i32 = -32601;

/// EIP-1193 "user rejected the request".
const USER_REJECTED: i32 = 4001;

/// Wallet reached over Ethereum JSON-RPC (a node with unlocked accounts, or a
/// wallet bridge exposing the EIP-1193 methods over HTTP).
pub struct RpcWallet {
    client: HttpClient,
    poll_interval: Duration,
}

impl RpcWallet {
    /// Create a new RPC wallet. No request is made until first use.
    pub fn new(
        url: &str,
        request_timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Self, ProviderError> {
        let client = HttpClientBuilder::default()
            .request_timeout(request_timeout)
            .build(url)
            .map_err(|e| ProviderError::Transport(format!("failed to connect: {}", e)))?;
        Ok(Self {
            client,
            poll_interval,
        })
    }

    /// Create a spinner for a wallet round trip.
    fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("  {spinner} {msg}")
                .expect("valid template"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn map_rpc_error(e: &ClientError) -> ProviderError {
        match e {
            ClientError::Call(obj) => classify(obj.code(), obj.message()),
            other => ProviderError::Transport(other.to_string()),
        }
    }

    async fn request_account_list(&self) -> Result<Vec<String>, ProviderError> {
        let result: Result<Vec<String>, ClientError> = self
            .client
            .request("eth_requestAccounts", rpc_params![])
            .await;
        match result {
            Ok(accounts) => Ok(accounts),
            Err(ClientError::Call(ref obj)) if obj.code() == METHOD_NOT_FOUND => {
                tracing::debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                self.client
                    .request("eth_accounts", rpc_params![])
                    .await
                    .map_err(|e| Self::map_rpc_error(&e))
            }
            Err(e) => Err(Self::map_rpc_error(&e)),
        }
    }

    async fn poll_receipt(&self, hash_hex: &str) -> Result<Receipt, ProviderError> {
        loop {
            let receipt: Option<RpcReceipt> = self
                .client
                .request("eth_getTransactionReceipt", rpc_params![hash_hex])
                .await
                .map_err(|e| Self::map_rpc_error(&e))?;
            match receipt {
                Some(r) => return r.into_receipt(),
                None => {
                    tracing::debug!(tx_hash = %hash_hex, "receipt not yet available");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    fn name(&self) -> &str {
        "json-rpc"
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let id: String = self
            .client
            .request("eth_chainId", rpc_params![])
            .await
            .map_err(|e| Self::map_rpc_error(&e))?;
        u64::try_from(parse_quantity(&id)?)
            .map_err(|_| ProviderError::InvalidResponse(format!("chain id out of range: {}", id)))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let pb = Self::spinner("Waiting for wallet authorization...");
        let result = self.request_account_list().await;
        pb.finish_and_clear();
        result?.iter().map(|a| parse_hex::<Address>(a)).collect()
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        let pb = Self::spinner("Waiting for wallet signature...");
        let result: Result<String, ClientError> = self
            .client
            .request("eth_sendTransaction", rpc_params![RpcTransaction::from(tx)])
            .await;
        pb.finish_and_clear();
        let hash = result.map_err(|e| Self::map_rpc_error(&e))?;
        parse_hex::<TxHash>(&hash)
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, ProviderError> {
        let hash_hex = tx_hash_to_hex(tx_hash);
        let pb = Self::spinner("Waiting for confirmation...");
        let result = self.poll_receipt(&hash_hex).await;
        pb.finish_and_clear();
        result
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        let out: String = self
            .client
            .request("eth_call", rpc_params![RpcTransaction::from(tx), "latest"])
            .await
            .map_err(|e| Self::map_rpc_error(&e))?;
        parse_hex::<Bytes>(&out)
    }
}

/// Sort a JSON-RPC error object into a [`ProviderError`].
fn classify(code: i32, message: &str) -> ProviderError {
    let lower = message.to_lowercase();
    if code == USER_REJECTED || lower.contains("user denied") || lower.contains("user rejected") {
        ProviderError::UserRejected
    } else if lower.contains("insufficient funds") {
        ProviderError::InsufficientFunds
    } else {
        ProviderError::Rpc {
            code,
            message: message.to_string(),
        }
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

/// Transaction object of `eth_sendTransaction` / `eth_call`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcTransaction {
    from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl From<&TransactionRequest> for RpcTransaction {
    fn from(tx: &TransactionRequest) -> Self {
        Self {
            from: address_to_hex(&tx.from),
            to: tx.to.as_ref().map(address_to_hex),
            value: to_quantity(tx.value),
            data: (!tx.data.is_empty()).then(|| hex::encode_prefixed(&tx.data)),
        }
    }
}

/// The fields of `eth_getTransactionReceipt` the desk reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    contract_address: Option<String>,
}

impl RpcReceipt {
    fn into_receipt(self) -> Result<Receipt, ProviderError> {
        let block_number = match self.block_number.as_deref() {
            Some(n) => Some(
                u64::try_from(parse_quantity(n)?)
                    .map_err(|_| ProviderError::InvalidResponse("block number".to_string()))?,
            ),
            None => None,
        };
        // Pre-Byzantium receipts carry no status; treat them as success.
        let success = match self.status.as_deref() {
            Some(s) => parse_quantity(s)? == U256::from(1),
            None => true,
        };
        let contract_address = match self.contract_address.as_deref() {
            Some(a) => Some(parse_hex::<Address>(a)?),
            None => None,
        };
        Ok(Receipt {
            tx_hash: parse_hex::<TxHash>(&self.transaction_hash)?,
            block_number,
            success,
            contract_address,
        })
    }
}

// ── Hex helpers ─────────────────────────────────────────────────────────────

/// Encode a quantity as minimal 0x-prefixed hex.
pub fn to_quantity(value: U256) -> String {
    format!("{:#x}", value)
}

/// Decode a 0x-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> Result<U256, ProviderError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(ProviderError::InvalidResponse(format!("empty quantity '{}'", s)));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::InvalidResponse(format!("quantity '{}': {}", s, e)))
}

/// Decode 0x-prefixed hex data into an address, hash or byte string.
pub fn parse_hex<T>(s: &str) -> Result<T, ProviderError>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse()
        .map_err(|e| ProviderError::InvalidResponse(format!("invalid hex '{}': {}", s, e)))
}
