use assura_types::constants::PAYMENT_AMOUNT;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{format_address, format_ether, print_divider, style_bold, style_info};
use crate::prompt::confirm;

use super::{build_app, outcome, require_session};

pub async fn run(config: &AppConfig, yes: bool) -> Result<(), AppError> {
    let (app, _) = build_app(config, false)?;
    let session = require_session(&app).await?;

    if !yes {
        println!();
        println!("  {}", style_bold().apply_to("Payment Summary"));
        print_divider();
        println!("  From:     {}", format_address(&session.account()));
        println!(
            "  Contract: {}",
            style_info().apply_to(format_address(&session.contract().address()))
        );
        println!("  Call:     executePayment()");
        println!(
            "  Value:    {}",
            style_bold().apply_to(format_ether(PAYMENT_AMOUNT))
        );
        println!();

        if !confirm("Confirm payment?")? {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    outcome(app.execute_payment().await, "payment")
}
