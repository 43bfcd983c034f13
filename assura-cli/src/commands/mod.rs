pub mod approve_claim;
pub mod config_cmd;
pub mod connect;
pub mod deploy;
pub mod execute_payment;
pub mod generate;
pub mod inspect;
pub mod pay_fee;

use std::sync::Arc;

use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::page::{AlertSink, ConsoleAlerts, MemoryAlerts};
use crate::session::Session;

/// An `App` for one command. With `json`, alerts are collected instead of printed.
pub(crate) fn build_app(
    config: &AppConfig,
    json: bool,
) -> Result<(App, Option<MemoryAlerts>), AppError> {
    if json {
        let alerts = MemoryAlerts::new();
        let app = App::from_config(config, Arc::new(alerts.clone()))?;
        Ok((app, Some(alerts)))
    } else {
        let sink: Arc<dyn AlertSink> = Arc::new(ConsoleAlerts::new());
        Ok((App::from_config(config, sink)?, None))
    }
}

/// Connect first; the wallet has already reported why if this fails.
pub(crate) async fn require_session(app: &App) -> Result<Arc<Session>, AppError> {
    app.connect_wallet()
        .await
        .ok_or_else(|| AppError::ActionFailed("wallet connection".to_string()))
}

pub(crate) fn print_json(value: &serde_json::Value) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn alerts_json(alerts: &Option<MemoryAlerts>) -> serde_json::Value {
    match alerts {
        Some(a) => serde_json::to_value(a.alerts()).unwrap_or_default(),
        None => serde_json::Value::Null,
    }
}

/// Map a failed handler outcome to a process error.
pub(crate) fn outcome(ok: bool, what: &str) -> Result<(), AppError> {
    if ok {
        Ok(())
    } else {
        Err(AppError::ActionFailed(what.to_string()))
    }
}
