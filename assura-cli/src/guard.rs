//! Single-slot in-flight tracking per action.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// A user action that talks to the wallet or the document service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GenerateContract,
    ConnectWallet,
    ApproveClaim,
    ExecutePayment,
    PayFee,
    Inspect,
    Deploy,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::GenerateContract => "contract generation",
            Action::ConnectWallet => "wallet connection",
            Action::ApproveClaim => "claim approval",
            Action::ExecutePayment => "execute payment",
            Action::PayFee => "fee payment",
            Action::Inspect => "contract inspection",
            Action::Deploy => "contract deployment",
        };
        f.write_str(name)
    }
}

/// Set of actions currently running.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    running: Arc<Mutex<HashSet<Action>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `action`. `None` if it is already taken.
    ///
    /// The slot is released when the returned ticket is dropped.
    pub fn try_begin(&self, action: Action) -> Option<Ticket> {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if !running.insert(action) {
            return None;
        }
        Some(Ticket {
            action,
            running: Arc::clone(&self.running),
        })
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&action)
    }
}

/// Holds an in-flight slot until dropped.
#[derive(Debug)]
pub struct Ticket {
    action: Action,
    running: Arc<Mutex<HashSet<Action>>>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.action);
    }
}
