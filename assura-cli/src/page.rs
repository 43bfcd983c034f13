//! The page model: buttons, the display area, and where alerts go.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::format::{style_bold, style_error, style_info, style_success, style_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// One user-facing notice.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
    /// Blocking notice the user has to acknowledge.
    pub modal: bool,
    pub at: DateTime<Utc>,
}

impl Alert {
    pub fn new(message: impl Into<String>, level: AlertLevel, modal: bool) -> Self {
        Self {
            message: message.into(),
            level,
            modal,
            at: Utc::now(),
        }
    }
}

/// Receiver of user-facing notices.
pub trait AlertSink: Send + Sync {
    fn show(&self, alert: &Alert);
}

/// Prints alerts to the terminal.
///
/// While an activity spinner runs, alerts are printed with the spinner
/// suspended so the two never share a line.
#[derive(Default)]
pub struct ConsoleAlerts {
    /// Wait for Enter after a modal notice.
    interactive: bool,
    activity: Mutex<Option<ProgressBar>>,
}

impl ConsoleAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Self::default()
        }
    }

    /// Show a spinner until [`ConsoleAlerts::finish_activity`].
    pub fn start_activity(&self, msg: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("valid template"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Some(previous) = self.activity().replace(pb) {
            previous.finish_and_clear();
        }
    }

    pub fn finish_activity(&self) {
        if let Some(pb) = self.activity().take() {
            pb.finish_and_clear();
        }
    }

    fn activity(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.activity.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn print(&self, alert: &Alert) {
        let style = match alert.level {
            AlertLevel::Success => style_success(),
            AlertLevel::Info => style_info(),
            AlertLevel::Warning => style_warn(),
            AlertLevel::Danger => style_error(),
        };
        let marker = match alert.level {
            AlertLevel::Success => "✓",
            AlertLevel::Info => "•",
            AlertLevel::Warning => "!",
            AlertLevel::Danger => "✗",
        };

        if !alert.modal {
            println!("  {} {}", style.apply_to(marker), alert.message);
            return;
        }

        let width = alert.message.chars().count() + 4;
        let bar = "─".repeat(width);
        println!();
        println!("  {}", style.apply_to(format!("┌{}┐", bar)));
        println!(
            "  {}  {}  {}",
            style.apply_to("│"),
            style_bold().apply_to(&alert.message),
            style.apply_to("│")
        );
        println!("  {}", style.apply_to(format!("└{}┘", bar)));
        if self.interactive {
            // Acknowledgement only; a closed stdin just moves on.
            let _ = crate::prompt::pause();
        }
    }
}

impl AlertSink for ConsoleAlerts {
    fn show(&self, alert: &Alert) {
        let activity = self.activity().clone();
        match activity {
            Some(pb) => pb.suspend(|| self.print(alert)),
            None => self.print(alert),
        }
    }
}

/// Collects alerts in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryAlerts {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl MemoryAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.alerts().into_iter().map(|a| a.message).collect()
    }

    pub fn last(&self) -> Option<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn clear(&self) {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl AlertSink for MemoryAlerts {
    fn show(&self, alert: &Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(alert.clone());
    }
}

/// Named page buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    GenerateContract,
    Claim,
    ConnectWallet,
    ApproveClaim,
    ExecutePayment,
    PayFee,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::GenerateContract,
        Button::Claim,
        Button::ConnectWallet,
        Button::ApproveClaim,
        Button::ExecutePayment,
        Button::PayFee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Button::GenerateContract => "Generate insurance contract",
            Button::Claim => "Claim insurance",
            Button::ConnectWallet => "Connect wallet",
            Button::ApproveClaim => "Approve claim",
            Button::ExecutePayment => "Execute payment",
            Button::PayFee => "Pay fee",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enable flags for every button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub generate_contract: bool,
    pub claim: bool,
    pub connect_wallet: bool,
    pub approve_claim: bool,
    pub execute_payment: bool,
    pub pay_fee: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            generate_contract: true,
            claim: false,
            connect_wallet: false,
            approve_claim: false,
            execute_payment: false,
            pay_fee: false,
        }
    }
}

impl Controls {
    pub fn is_enabled(&self, button: Button) -> bool {
        *self.flag(button)
    }

    pub fn set(&mut self, button: Button, enabled: bool) {
        *self.flag_mut(button) = enabled;
    }

    pub fn enabled(&self) -> Vec<Button> {
        Button::ALL
            .into_iter()
            .filter(|b| self.is_enabled(*b))
            .collect()
    }

    fn flag(&self, button: Button) -> &bool {
        match button {
            Button::GenerateContract => &self.generate_contract,
            Button::Claim => &self.claim,
            Button::ConnectWallet => &self.connect_wallet,
            Button::ApproveClaim => &self.approve_claim,
            Button::ExecutePayment => &self.execute_payment,
            Button::PayFee => &self.pay_fee,
        }
    }

    fn flag_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::GenerateContract => &mut self.generate_contract,
            Button::Claim => &mut self.claim,
            Button::ConnectWallet => &mut self.connect_wallet,
            Button::ApproveClaim => &mut self.approve_claim,
            Button::ExecutePayment => &mut self.execute_payment,
            Button::PayFee => &mut self.pay_fee,
        }
    }
}

/// Buttons and display area of one page.
#[derive(Debug, Default)]
pub struct Page {
    controls: Controls,
    display: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, buttons: &[Button]) {
        for b in buttons {
            self.controls.set(*b, true);
        }
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn set_display(&mut self, text: impl Into<String>) {
        self.display = text.into();
    }

    pub fn append_display(&mut self, text: &str) {
        self.display.push_str(text);
    }
}
