use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{print_success, style_bold};
use crate::ui::InfoCard;

pub fn init(dir: Option<&str>) -> Result<(), AppError> {
    let dir = match dir {
        Some(d) => d.to_string(),
        None => {
            let default = AppConfig::default_path()?;
            default
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| ".".to_string())
        }
    };
    let path = AppConfig::init(&dir)?;
    print_success(&format!("Config written to {}", path.display()));
    Ok(())
}

pub fn show(config: &AppConfig, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!();
    println!("  {}", style_bold().apply_to("Assura Configuration"));

    InfoCard::new()
        .row("Mode", config.mode)
        .row(
            "Wallet RPC",
            config.wallet.rpc_url.as_deref().unwrap_or("(none)"),
        )
        .row(
            "Request timeout",
            format!("{}s", config.wallet.request_timeout_secs),
        )
        .row("Poll interval", format!("{}ms", config.wallet.poll_interval_ms))
        .row("Contract", &config.contract.address)
        .row("Document endpoint", &config.document.endpoint)
        .row("Log level", &config.logging.level)
        .row("Config file", AppConfig::default_path()?.display())
        .print();
    println!();

    Ok(())
}
