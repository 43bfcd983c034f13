//! Wallet capability: the provider trait and its live and simulated backends.

pub mod contract;
pub mod provider;
pub mod rpc;
pub mod simulated;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, Mode};
use crate::error::AppError;

pub use contract::{InsuranceContract, PendingTransaction, Signer};
pub use provider::{ProviderError, Receipt, TransactionRequest, WalletProvider};
pub use rpc::RpcWallet;
pub use simulated::SimulatedWallet;

/// Build the wallet capability the configuration describes.
///
/// `None` means no wallet is installed: live mode without a `wallet.rpc_url`.
pub fn provider_from_config(
    config: &AppConfig,
) -> Result<Option<Arc<dyn WalletProvider>>, AppError> {
    match config.mode {
        Mode::Mock => Ok(Some(Arc::new(SimulatedWallet::default()))),
        Mode::Live => match config.wallet.rpc_url.as_deref() {
            None => Ok(None),
            Some(url) => {
                let wallet = RpcWallet::new(
                    url,
                    Duration::from_secs(config.wallet.request_timeout_secs),
                    Duration::from_millis(config.wallet.poll_interval_ms),
                )
                .map_err(|e| AppError::Config(format!("wallet rpc_url '{}': {}", url, e)))?;
                Ok(Some(Arc::new(wallet)))
            }
        },
    }
}
