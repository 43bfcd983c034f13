use assura_types::constants::FEE_AMOUNT;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{format_address, format_ether, print_divider, style_bold, style_dim, style_info};
use crate::prompt::confirm;

use super::{build_app, outcome, require_session};

pub async fn run(config: &AppConfig, yes: bool) -> Result<(), AppError> {
    let (app, _) = build_app(config, false)?;
    let session = require_session(&app).await?;

    if !yes {
        println!();
        println!("  {}", style_bold().apply_to("Fee Summary"));
        print_divider();
        println!("  From:   {}", format_address(&session.account()));
        println!(
            "  To:     {}",
            style_info().apply_to(format_address(&session.contract().address()))
        );
        println!("  Amount: {}", style_bold().apply_to(format_ether(FEE_AMOUNT)));
        println!();

        if !confirm("Confirm fee payment?")? {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let ok = app.pay_fee().await;
    if ok {
        for line in app.display().lines().filter(|l| !l.is_empty()) {
            println!("  {}", style_dim().apply_to(line));
        }
    }
    outcome(ok, "fee payment")
}
