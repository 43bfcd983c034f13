//! Wallet detection, account authorization, and the resulting session.

use std::sync::{Arc, Mutex, RwLock};

use assura_types::primitives::{address_to_hex, Address};

use crate::error::ActionError;
use crate::wallet::{InsuranceContract, Signer, WalletProvider};

/// An authorized account with its signer and contract binding.
///
/// Built in one piece by [`WalletSessionManager::connect`] and never mutated.
pub struct Session {
    account: Address,
    signer: Signer,
    contract: InsuranceContract,
}

impl Session {
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn contract(&self) -> &InsuranceContract {
        &self.contract
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Owns the wallet capability and at most one session.
pub struct WalletSessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    contract_address: Address,
    state: Mutex<ConnectionState>,
    session: RwLock<Option<Arc<Session>>>,
}

impl WalletSessionManager {
    /// `provider` is `None` when no wallet is installed.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
            state: Mutex::new(ConnectionState::Disconnected),
            session: RwLock::new(None),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Detect the wallet, request account access, and build the session.
    ///
    /// An existing session is returned as is, without asking the wallet again.
    pub async fn connect(&self) -> Result<Arc<Session>, ActionError> {
        if let Some(session) = self.session() {
            return Ok(session);
        }

        self.set_state(ConnectionState::Connecting);
        match self.establish().await {
            Ok(session) => {
                *self.session.write().unwrap_or_else(|e| e.into_inner()) =
                    Some(Arc::clone(&session));
                self.set_state(ConnectionState::Connected);
                Ok(session)
            }
            Err(e) => {
                self.set_state(ConnectionState::Disconnected);
                Err(e)
            }
        }
    }

    async fn establish(&self) -> Result<Arc<Session>, ActionError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ActionError::WalletUnavailable)?;

        let chain_id = provider.chain_id().await.map_err(|e| {
            tracing::warn!(provider = provider.name(), error = %e, "wallet detection failed");
            ActionError::WalletUnavailable
        })?;

        let accounts = provider
            .request_accounts()
            .await
            .map_err(ActionError::AuthorizationDenied)?;
        let account = *accounts.first().ok_or_else(|| {
            ActionError::AuthorizationDenied(crate::wallet::ProviderError::InvalidResponse(
                "wallet returned no accounts".to_string(),
            ))
        })?;

        tracing::info!(
            account = %address_to_hex(&account),
            chain_id,
            provider = provider.name(),
            "wallet connected"
        );

        let signer = Signer::new(Arc::clone(provider), account);
        let contract = InsuranceContract::new(self.contract_address, signer.clone());
        Ok(Arc::new(Session {
            account,
            signer,
            contract,
        }))
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::simulated::{SimulatedWallet, SIMULATED_ACCOUNT};
    use assura_types::constants::CONTRACT_ADDRESS;

    #[tokio::test]
    async fn test_no_provider_is_unavailable() {
        let manager = WalletSessionManager::new(None, CONTRACT_ADDRESS);
        assert!(matches!(
            manager.connect().await,
            Err(ActionError::WalletUnavailable)
        ));
        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert!(manager.session().is_none());
    }

    #[tokio::test]
    async fn test_connect_binds_account_and_contract() {
        let wallet = Arc::new(SimulatedWallet::default());
        let manager = WalletSessionManager::new(Some(wallet), CONTRACT_ADDRESS);
        let session = manager.connect().await.unwrap();
        assert_eq!(session.account(), SIMULATED_ACCOUNT);
        assert_eq!(session.signer().address(), SIMULATED_ACCOUNT);
        assert_eq!(session.contract().address(), CONTRACT_ADDRESS);
        assert_eq!(manager.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_repeat_connect_reuses_session() {
        let wallet = Arc::new(SimulatedWallet::default());
        let manager = WalletSessionManager::new(Some(wallet.clone()), CONTRACT_ADDRESS);
        let first = manager.connect().await.unwrap();
        let second = manager.connect().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(wallet.authorization_requests(), 1);
    }

    #[tokio::test]
    async fn test_rejected_authorization_leaves_no_session() {
        let wallet = Arc::new(SimulatedWallet::default().with_rejected_authorization());
        let manager = WalletSessionManager::new(Some(wallet), CONTRACT_ADDRESS);
        assert!(matches!(
            manager.connect().await,
            Err(ActionError::AuthorizationDenied(_))
        ));
        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert!(manager.session().is_none());
    }

    #[tokio::test]
    async fn test_empty_account_list_is_denied() {
        let wallet = Arc::new(SimulatedWallet::new(SIMULATED_ACCOUNT).with_no_accounts());
        let manager = WalletSessionManager::new(Some(wallet), CONTRACT_ADDRESS);
        assert!(matches!(
            manager.connect().await,
            Err(ActionError::AuthorizationDenied(_))
        ));
    }
}
