use clap::Parser;
use tracing_subscriber::EnvFilter;

use assura_cli::cli::{self, Cli};
use assura_cli::config::AppConfig;
use assura_cli::format::print_error;

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string(), Some("Run `assura config init` to write a default config."));
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    rt.block_on(async {
        if let Err(e) = cli::run(cli, config).await {
            tracing::error!("Fatal error: {}", e);
            print_error(&e.to_string(), e.hint());
            std::process::exit(1);
        }
    });
}
