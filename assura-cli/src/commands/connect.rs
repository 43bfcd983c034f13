use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{format_address, style_bold};
use crate::ui::InfoCard;

use super::{alerts_json, build_app, print_json};

pub async fn run(config: &AppConfig, json: bool) -> Result<(), AppError> {
    let (app, alerts) = build_app(config, json)?;
    let connected = app.connect_wallet().await;

    if json {
        print_json(&serde_json::json!({
            "connected": connected.is_some(),
            "account": connected.as_ref().map(|s| format_address(&s.account())),
            "contract": connected.as_ref().map(|s| format_address(&s.contract().address())),
            "mode": app.mode().to_string(),
            "alerts": alerts_json(&alerts),
        }))?;
        return match connected {
            Some(_) => Ok(()),
            None => Err(AppError::ActionFailed("wallet connection".to_string())),
        };
    }

    let session =
        connected.ok_or_else(|| AppError::ActionFailed("wallet connection".to_string()))?;

    println!();
    println!("  {}", style_bold().apply_to("Wallet Session"));
    InfoCard::new()
        .row("Account", format_address(&session.account()))
        .row("Contract", format_address(&session.contract().address()))
        .row("Wallet", session.signer().provider().name())
        .row("Mode", app.mode())
        .print();
    println!();

    Ok(())
}
