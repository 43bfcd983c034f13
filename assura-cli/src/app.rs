//! One handler per user event. Errors stop here and become notices.

use std::sync::{Arc, Mutex, MutexGuard};

use assura_types::constants::FEE_REPORT_NOTE;
use assura_types::customer::CustomerRecord;
use assura_types::primitives::{address_to_hex, Address};

use crate::actions::{self, ContractSnapshot};
use crate::config::{AppConfig, Mode};
use crate::document::{self, DocumentService, Generated};
use crate::error::{ActionError, AppError};
use crate::guard::{Action, InFlight, Ticket};
use crate::page::{Alert, AlertLevel, AlertSink, Button, Controls, Page};
use crate::session::{ConnectionState, Session, WalletSessionManager};
use crate::wallet::{self, Receipt, WalletProvider};

/// Where the current run stands, as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
    /// Connected, with a wallet action awaiting confirmation.
    ActionInFlight,
}

const WALLET_ACTIONS: [Action; 5] = [
    Action::ApproveClaim,
    Action::ExecutePayment,
    Action::PayFee,
    Action::Inspect,
    Action::Deploy,
];

/// How a failed action is reported.
struct Failure {
    message: &'static str,
    modal: bool,
}

pub struct App {
    mode: Mode,
    page: Mutex<Page>,
    sink: Arc<dyn AlertSink>,
    sessions: WalletSessionManager,
    documents: Arc<dyn DocumentService>,
    in_flight: InFlight,
}

impl App {
    pub fn new(
        mode: Mode,
        provider: Option<Arc<dyn WalletProvider>>,
        contract_address: Address,
        documents: Arc<dyn DocumentService>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            mode,
            page: Mutex::new(Page::new()),
            sink,
            sessions: WalletSessionManager::new(provider, contract_address),
            documents,
            in_flight: InFlight::new(),
        }
    }

    /// Wire up the backends the configuration selects.
    pub fn from_config(config: &AppConfig, sink: Arc<dyn AlertSink>) -> Result<Self, AppError> {
        let provider = wallet::provider_from_config(config)?;
        let contract_address = config.contract.contract_address()?;
        let documents = document::service_from_config(config);
        tracing::debug!(
            mode = %config.mode,
            wallet = provider.as_ref().map(|p| p.name()).unwrap_or("none"),
            "app initialized"
        );
        Ok(Self::new(
            config.mode,
            provider,
            contract_address,
            documents,
            sink,
        ))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.sessions.session()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.sessions.state() {
            ConnectionState::Disconnected => SessionPhase::Disconnected,
            ConnectionState::Connecting => SessionPhase::Connecting,
            ConnectionState::Connected => {
                if WALLET_ACTIONS.iter().any(|a| self.in_flight.is_busy(*a)) {
                    SessionPhase::ActionInFlight
                } else {
                    SessionPhase::Connected
                }
            }
        }
    }

    pub fn display(&self) -> String {
        self.page().display().to_string()
    }

    pub fn controls(&self) -> Controls {
        self.page().controls()
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        self.controls().is_enabled(button)
    }

    pub fn enabled_buttons(&self) -> Vec<Button> {
        self.controls().enabled()
    }

    // ── Handlers ────────────────────────────────────────────────────────────

    /// Send the customer data to the document service.
    ///
    /// On success the contract text (live mode) goes into the display area
    /// and the claim button is enabled.
    pub async fn submit_customer_form(&self, record: CustomerRecord) -> bool {
        let Some(_ticket) = self.begin(Action::GenerateContract) else {
            return false;
        };

        tracing::info!(
            name = %record.name,
            age = ?record.age,
            policy_number = ?record.policy_number,
            insurance_type = ?record.insurance_type,
            "customer data submitted"
        );
        self.notify("Customer information received", AlertLevel::Info);

        let outcome = self.documents.generate(&record).await;
        match outcome {
            Ok(generated) => {
                {
                    let mut page = self.page();
                    if let Generated::Document(text) = generated {
                        page.set_display(text);
                    }
                    page.enable(&[Button::Claim]);
                }
                self.notify("Recorded on the blockchain", AlertLevel::Success);
                true
            }
            Err(e) => {
                self.fail(
                    Action::GenerateContract,
                    ActionError::DocumentServiceError(e),
                    Failure {
                        message: "An error occurred while generating the insurance contract.",
                        modal: false,
                    },
                );
                false
            }
        }
    }

    /// Start a claim. Enables the wallet connection.
    pub fn claim(&self) {
        self.page().enable(&[Button::ConnectWallet]);
        self.notify("Requesting insurance claim...", AlertLevel::Info);
    }

    pub async fn connect_wallet(&self) -> Option<Arc<Session>> {
        let _ticket = self.begin(Action::ConnectWallet)?;

        match self.sessions.connect().await {
            Ok(session) => {
                self.page()
                    .enable(&[Button::ApproveClaim, Button::ExecutePayment, Button::PayFee]);
                self.notify(
                    format!("Wallet connected: {}", address_to_hex(&session.account())),
                    AlertLevel::Success,
                );
                Some(session)
            }
            Err(e) => {
                let message = match e {
                    ActionError::WalletUnavailable => "No wallet provider is available.",
                    _ => "An error occurred while connecting the wallet.",
                };
                self.fail(
                    Action::ConnectWallet,
                    e,
                    Failure {
                        message,
                        modal: false,
                    },
                );
                None
            }
        }
    }

    pub async fn approve_claim(&self) -> bool {
        let Some(_ticket) = self.begin(Action::ApproveClaim) else {
            return false;
        };
        let session = self.session();
        match actions::approve_claim(session.as_deref()).await {
            Ok(_) => {
                self.notify_modal("The insurance claim has been approved.", AlertLevel::Success);
                true
            }
            Err(e) => {
                self.fail(
                    Action::ApproveClaim,
                    e,
                    Failure {
                        message: "An error occurred while approving the claim.",
                        modal: true,
                    },
                );
                false
            }
        }
    }

    pub async fn execute_payment(&self) -> bool {
        let Some(_ticket) = self.begin(Action::ExecutePayment) else {
            return false;
        };
        let session = self.session();
        match actions::execute_payment(session.as_deref()).await {
            Ok(_) => {
                self.notify_modal("The insurance payment has been executed.", AlertLevel::Success);
                true
            }
            Err(e) => {
                self.fail(
                    Action::ExecutePayment,
                    e,
                    Failure {
                        message: "An error occurred while executing the payment.",
                        modal: true,
                    },
                );
                false
            }
        }
    }

    /// Pay the flat fee and note the filed claim report in the display area.
    pub async fn pay_fee(&self) -> bool {
        let Some(_ticket) = self.begin(Action::PayFee) else {
            return false;
        };
        let session = self.session();
        match actions::pay_fee(session.as_deref()).await {
            Ok(_) => {
                self.page().append_display(FEE_REPORT_NOTE);
                self.notify("Fee payment complete", AlertLevel::Success);
                true
            }
            Err(e) => {
                self.fail(
                    Action::PayFee,
                    e,
                    Failure {
                        message: "An error occurred while paying the fee.",
                        modal: false,
                    },
                );
                false
            }
        }
    }

    pub async fn inspect(&self) -> Option<ContractSnapshot> {
        let _ticket = self.begin(Action::Inspect)?;
        let session = self.session();
        match actions::inspect(session.as_deref()).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                self.fail(
                    Action::Inspect,
                    e,
                    Failure {
                        message: "An error occurred while reading the contract.",
                        modal: false,
                    },
                );
                None
            }
        }
    }

    pub async fn deploy(&self, bytecode: &[u8], insured: Address, details: &str) -> Option<Receipt> {
        let _ticket = self.begin(Action::Deploy)?;
        let session = self.session();
        match actions::deploy(session.as_deref(), bytecode, insured, details).await {
            Ok(receipt) => {
                let message = match receipt.contract_address {
                    Some(addr) => format!("Policy contract deployed at {}", address_to_hex(&addr)),
                    None => "Policy contract deployed".to_string(),
                };
                self.notify(message, AlertLevel::Success);
                Some(receipt)
            }
            Err(e) => {
                self.fail(
                    Action::Deploy,
                    e,
                    Failure {
                        message: "An error occurred while deploying the contract.",
                        modal: false,
                    },
                );
                None
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Never called with the page lock held: console alerts may block on input.
    fn notify(&self, message: impl Into<String>, level: AlertLevel) {
        self.sink.show(&Alert::new(message, level, false));
    }

    fn notify_modal(&self, message: impl Into<String>, level: AlertLevel) {
        self.sink.show(&Alert::new(message, level, true));
    }

    fn begin(&self, action: Action) -> Option<Ticket> {
        let ticket = self.in_flight.try_begin(action);
        if ticket.is_none() {
            let busy = ActionError::Busy(action);
            tracing::warn!(action = %action, "ignored: already in progress");
            self.notify(format!("{}.", capitalize(&busy.to_string())), AlertLevel::Warning);
        }
        ticket
    }

    fn fail(&self, action: Action, err: ActionError, failure: Failure) {
        match &err {
            ActionError::NoSession => {
                tracing::warn!(action = %action, "no wallet session");
                self.notify_modal("Please connect your wallet first.", AlertLevel::Warning);
            }
            _ => {
                let cause = err.cause().unwrap_or_default();
                tracing::error!(action = %action, error = %err, cause = %cause, "action failed");
                if failure.modal {
                    self.notify_modal(failure.message, AlertLevel::Danger);
                } else {
                    self.notify(failure.message, AlertLevel::Danger);
                }
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
