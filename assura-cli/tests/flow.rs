//! The full page flow on the simulated wallet and recorder:
//! customer form → claim → connect → approve / pay / fee.

use std::sync::Arc;
use std::time::Duration;

use assura_cli::app::{App, SessionPhase};
use assura_cli::config::{AppConfig, Mode};
use assura_cli::document::SimulatedRecorder;
use assura_cli::page::{AlertLevel, Button, MemoryAlerts};
use assura_cli::wallet::simulated::{SimulatedFailure, SIMULATED_ACCOUNT};
use assura_cli::wallet::{SimulatedWallet, WalletProvider};
use assura_types::constants::{
    CONTRACT_ADDRESS, FEE_AMOUNT, FEE_REPORT_NOTE, PAYMENT_AMOUNT, RECORDING_DELAY,
};
use assura_types::customer::{CustomerForm, CustomerRecord};
use assura_types::primitives::{address_to_hex, ZERO_ADDRESS};

fn fast_wallet() -> SimulatedWallet {
    SimulatedWallet::default().with_confirmation_delay(Duration::ZERO)
}

fn mock_app(wallet: Option<Arc<SimulatedWallet>>) -> (App, MemoryAlerts) {
    let alerts = MemoryAlerts::new();
    let app = App::new(
        Mode::Mock,
        wallet.map(|w| w as Arc<dyn WalletProvider>),
        CONTRACT_ADDRESS,
        Arc::new(SimulatedRecorder::with_delay(Duration::ZERO)),
        Arc::new(alerts.clone()),
    );
    (app, alerts)
}

#[tokio::test]
async fn test_full_flow() {
    let wallet = Arc::new(fast_wallet());
    let (app, alerts) = mock_app(Some(wallet.clone()));

    assert_eq!(app.enabled_buttons(), vec![Button::GenerateContract]);

    let form = CustomerForm {
        name: "John Doe".to_string(),
        age: "30".to_string(),
        policy_number: "PN-001".to_string(),
    };
    assert!(app.submit_customer_form(CustomerRecord::from_form(&form)).await);
    assert!(app.is_enabled(Button::Claim));
    assert!(!app.is_enabled(Button::ConnectWallet));

    app.claim();
    assert!(app.is_enabled(Button::ConnectWallet));
    assert!(!app.is_enabled(Button::ApproveClaim));

    let session = app.connect_wallet().await.unwrap();
    assert_ne!(session.account(), ZERO_ADDRESS);
    assert_eq!(session.account(), SIMULATED_ACCOUNT);
    assert_eq!(session.contract().address(), CONTRACT_ADDRESS);
    assert_eq!(app.phase(), SessionPhase::Connected);

    assert!(app.approve_claim().await);
    assert!(wallet.claim_approved());

    assert!(app.execute_payment().await);
    assert_eq!(wallet.payments_received(), PAYMENT_AMOUNT);

    assert!(app.pay_fee().await);
    assert_eq!(app.display(), FEE_REPORT_NOTE);

    let sent = wallet.sent_transactions();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1].value, PAYMENT_AMOUNT);
    assert_eq!(sent[2].value, FEE_AMOUNT);
    assert!(sent[2].data.is_empty());

    let connected = format!("Wallet connected: {}", address_to_hex(&SIMULATED_ACCOUNT));
    assert_eq!(
        alerts.messages(),
        vec![
            "Customer information received",
            "Recorded on the blockchain",
            "Requesting insurance claim...",
            connected.as_str(),
            "The insurance claim has been approved.",
            "The insurance payment has been executed.",
            "Fee payment complete",
        ]
    );
}

#[tokio::test]
async fn test_actions_without_session_never_touch_wallet() {
    let wallet = Arc::new(fast_wallet());
    let (app, alerts) = mock_app(Some(wallet.clone()));

    assert!(!app.approve_claim().await);
    assert!(!app.execute_payment().await);
    assert!(!app.pay_fee().await);

    assert_eq!(wallet.authorization_requests(), 0);
    assert!(wallet.sent_transactions().is_empty());
    for alert in alerts.alerts() {
        assert_eq!(alert.message, "Please connect your wallet first.");
        assert_eq!(alert.level, AlertLevel::Warning);
        assert!(alert.modal);
    }
    assert_eq!(alerts.alerts().len(), 3);
    assert_eq!(app.display(), "");
}

#[tokio::test]
async fn test_no_wallet_never_creates_session() {
    let (app, alerts) = mock_app(None);
    for _ in 0..2 {
        assert!(app.connect_wallet().await.is_none());
    }
    assert!(app.session().is_none());
    assert!(alerts
        .messages()
        .iter()
        .all(|m| m == "No wallet provider is available."));
    assert!(!app.is_enabled(Button::PayFee));
}

#[tokio::test]
async fn test_duplicate_payment_is_busy() {
    let wallet = Arc::new(
        SimulatedWallet::default().with_confirmation_delay(Duration::from_millis(200)),
    );
    let (app, alerts) = mock_app(Some(wallet.clone()));
    app.connect_wallet().await.unwrap();
    alerts.clear();

    let (first, second) = tokio::join!(app.execute_payment(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(app.phase(), SessionPhase::ActionInFlight);
        app.execute_payment().await
    });

    assert!(first);
    assert!(!second);
    assert_eq!(wallet.sent_transactions().len(), 1);
    assert_eq!(wallet.payments_received(), PAYMENT_AMOUNT);
    assert_eq!(
        alerts.messages(),
        vec![
            "Execute payment is already in progress.",
            "The insurance payment has been executed.",
        ]
    );

    // The slot is free again afterwards.
    assert_eq!(app.phase(), SessionPhase::Connected);
    assert!(app.execute_payment().await);
    assert_eq!(wallet.sent_transactions().len(), 2);
}

#[tokio::test]
async fn test_failed_transaction_keeps_session() {
    let wallet = Arc::new(fast_wallet().with_failure(SimulatedFailure::InsufficientFunds));
    let (app, alerts) = mock_app(Some(wallet));
    app.connect_wallet().await.unwrap();

    assert!(!app.execute_payment().await);
    let last = alerts.last().unwrap();
    assert_eq!(last.message, "An error occurred while executing the payment.");
    assert!(last.modal);
    assert_eq!(app.phase(), SessionPhase::Connected);

    assert!(!app.pay_fee().await);
    assert_eq!(
        alerts.last().unwrap().message,
        "An error occurred while paying the fee."
    );
    assert_eq!(app.display(), "");
}

#[tokio::test(start_paused = true)]
async fn test_mock_recording_takes_two_seconds() {
    let alerts = MemoryAlerts::new();
    let app = Arc::new(App::new(
        Mode::Mock,
        None,
        CONTRACT_ADDRESS,
        Arc::new(SimulatedRecorder::default()),
        Arc::new(alerts.clone()),
    ));

    let task = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.submit_customer_form(CustomerRecord::default()).await })
    };

    // Let the task start its timer before moving the clock.
    tokio::task::yield_now().await;
    tokio::time::advance(RECORDING_DELAY - Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert!(!task.is_finished());
    assert!(!app.is_enabled(Button::Claim));
    assert_eq!(alerts.messages(), vec!["Customer information received"]);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(task.await.unwrap());
    assert!(app.is_enabled(Button::Claim));
    assert_eq!(
        alerts.last().unwrap().message,
        "Recorded on the blockchain"
    );
}

#[tokio::test]
async fn test_mock_config_builds_working_app() {
    let mut config = AppConfig::default();
    config.mode = Mode::Mock;
    let alerts = MemoryAlerts::new();
    let app = App::from_config(&config, Arc::new(alerts.clone())).unwrap();
    assert_eq!(app.mode(), Mode::Mock);
    assert!(app.connect_wallet().await.is_some());
}
