use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{style_bold, style_success, style_warn};
use crate::ui::InfoCard;

use super::{alerts_json, build_app, print_json, require_session};

pub async fn run(config: &AppConfig, json: bool) -> Result<(), AppError> {
    let (app, alerts) = build_app(config, json)?;
    require_session(&app).await?;
    let snapshot = app
        .inspect()
        .await
        .ok_or_else(|| AppError::ActionFailed("contract inspection".to_string()))?;

    if json {
        let mut value = serde_json::to_value(&snapshot)?;
        value["alerts"] = alerts_json(&alerts);
        return print_json(&value);
    }

    let approved = if snapshot.claim_approved {
        style_success().apply_to("approved").to_string()
    } else {
        style_warn().apply_to("pending").to_string()
    };

    println!();
    println!("  {}", style_bold().apply_to("Insurance Contract"));
    InfoCard::new()
        .row("Address", &snapshot.address)
        .row("Claim", approved)
        .row("Details", &snapshot.contract_details)
        .row("Insured", &snapshot.insured)
        .row("Insurer", &snapshot.insurer)
        .print();
    println!();

    Ok(())
}
