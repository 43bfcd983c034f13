//! The interactive page: display area plus a menu of the enabled buttons.

use std::sync::Arc;

use assura_types::customer::CustomerRecord;

use crate::app::{App, SessionPhase};
use crate::banner::print_banner;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{format_address, print_divider, style_bold, style_dim, style_info};
use crate::page::{Button, ConsoleAlerts};
use crate::prompt::{customer_form, select};

const QUIT: &str = "Quit";

pub async fn run(config: &AppConfig) -> Result<(), AppError> {
    print_banner(&config.mode.to_string());
    let alerts = Arc::new(ConsoleAlerts::interactive());
    let app = App::from_config(config, alerts.clone())?;

    loop {
        print_page(&app);

        let buttons = app.enabled_buttons();
        let mut labels: Vec<&str> = buttons.iter().map(|b| b.label()).collect();
        labels.push(QUIT);
        let choice = select("Choose an action", &labels)?;
        let Some(button) = buttons.get(choice).copied() else {
            break;
        };

        match button {
            Button::GenerateContract => {
                let form = customer_form()?;
                let record = CustomerRecord::from_form(&form);
                alerts.start_activity("Generating insurance contract...");
                app.submit_customer_form(record).await;
                alerts.finish_activity();
            }
            Button::Claim => app.claim(),
            Button::ConnectWallet => {
                app.connect_wallet().await;
            }
            Button::ApproveClaim => {
                app.approve_claim().await;
            }
            Button::ExecutePayment => {
                app.execute_payment().await;
            }
            Button::PayFee => {
                app.pay_fee().await;
            }
        }
    }

    println!("  {}", style_dim().apply_to("Goodbye."));
    Ok(())
}

fn print_page(app: &App) {
    println!();
    let status = match (app.phase(), app.session()) {
        (SessionPhase::Connected | SessionPhase::ActionInFlight, Some(session)) => format!(
            "connected as {}",
            style_info().apply_to(format_address(&session.account()))
        ),
        (SessionPhase::Connecting, _) => "connecting...".to_string(),
        _ => style_dim().apply_to("wallet not connected").to_string(),
    };
    println!("  {}  {}", style_bold().apply_to("Assura"), status);
    print_divider();

    let display = app.display();
    if display.is_empty() {
        println!("  {}", style_dim().apply_to("(no contract generated)"));
    } else {
        for line in display.lines() {
            println!("  {}", line);
        }
    }
    print_divider();
}
