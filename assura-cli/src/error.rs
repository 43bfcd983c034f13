use thiserror::Error;

use crate::document::DocumentError;
use crate::guard::Action;
use crate::wallet::ProviderError;

/// Failures of a single user action. Each one becomes exactly one notice.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no wallet provider is available")]
    WalletUnavailable,

    #[error("wallet authorization was denied")]
    AuthorizationDenied(#[source] ProviderError),

    #[error("no wallet session; connect the wallet first")]
    NoSession,

    #[error("transaction was rejected or failed")]
    TransactionRejectedOrFailed(#[source] ProviderError),

    #[error("document service error")]
    DocumentServiceError(#[source] DocumentError),

    #[error("contract read failed")]
    ContractReadFailed(#[source] ProviderError),

    #[error("{0} is already in progress")]
    Busy(Action),
}

impl ActionError {
    /// The innermost cause, for logging.
    pub fn cause(&self) -> Option<String> {
        let mut source = std::error::Error::source(self)?;
        let mut chain = source.to_string();
        while let Some(next) = source.source() {
            chain.push_str(": ");
            chain.push_str(&next.to_string());
            source = next;
        }
        Some(chain)
    }
}

/// Errors surfaced by the `assura` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("prompt error: {0}")]
    Prompt(String),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("{0} failed")]
    ActionFailed(String),
}

impl AppError {
    /// A follow-up suggestion printed under the error line.
    pub fn hint(&self) -> Option<&str> {
        match self {
            AppError::Config(_) => Some("Check the file written by `assura config init`."),
            AppError::Action(ActionError::WalletUnavailable) => {
                Some("Set wallet.rpc_url to a running node, or pass --mock.")
            }
            AppError::Action(ActionError::NoSession) => Some("Run `assura connect` first."),
            AppError::ActionFailed(_) => Some("Re-run with RUST_LOG=debug for the cause."),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(e: dialoguer::Error) -> Self {
        AppError::Prompt(e.to_string())
    }
}
