use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::{AppConfig, Mode};
use crate::desk;
use crate::error::AppError;

#[derive(Parser)]
#[command(
    name = "assura",
    about = "Assura insurance desk: contract documents, claims and payments on Ethereum",
    version
)]
pub struct Cli {
    /// Path to config file (defaults to ~/.assura/assura.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Use the simulated wallet and recorder
    #[arg(long, global = true)]
    pub mock: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive insurance desk
    Console,
    /// Record customer data and generate the insurance contract
    Generate {
        /// Customer name
        #[arg(long, default_value = "")]
        name: String,
        /// Customer age
        #[arg(long, default_value = "")]
        age: String,
        /// Policy number
        #[arg(long)]
        policy_number: Option<String>,
        /// Insurance type (e.g. "Life Insurance")
        #[arg(long)]
        insurance_type: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Connect the wallet and show the authorized account
    Connect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve the insurance claim
    ApproveClaim,
    /// Execute the insurance payment (0.1 ETH)
    ExecutePayment {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Pay the claim fee (0.01 ETH to the contract)
    PayFee {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Read the public state of the insurance contract
    Inspect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Deploy a new policy contract
    Deploy {
        /// File containing hex-encoded creation bytecode
        #[arg(long)]
        bytecode: String,
        /// Address of the insured party
        #[arg(long)]
        insured: String,
        /// Contract details stored on-chain
        #[arg(long)]
        details: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Output directory (defaults to ~/.assura)
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(cli: Cli, mut config: AppConfig) -> Result<(), AppError> {
    if cli.mock {
        config.mode = Mode::Mock;
    }

    match cli.command {
        Command::Console => desk::run(&config).await,
        Command::Generate {
            name,
            age,
            policy_number,
            insurance_type,
            json,
        } => commands::generate::run(&config, name, age, policy_number, insurance_type, json).await,
        Command::Connect { json } => commands::connect::run(&config, json).await,
        Command::ApproveClaim => commands::approve_claim::run(&config).await,
        Command::ExecutePayment { yes } => commands::execute_payment::run(&config, yes).await,
        Command::PayFee { yes } => commands::pay_fee::run(&config, yes).await,
        Command::Inspect { json } => commands::inspect::run(&config, json).await,
        Command::Deploy {
            bytecode,
            insured,
            details,
            yes,
        } => commands::deploy::run(&config, &bytecode, &insured, &details, yes).await,
        Command::Config { command } => match command {
            ConfigCommand::Init { dir } => commands::config_cmd::init(dir.as_deref()),
            ConfigCommand::Show { json } => commands::config_cmd::show(&config, json),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "assura",
            "--mock",
            "generate",
            "--name",
            "John Doe",
            "--age",
            "30",
            "--insurance-type",
            "Life Insurance",
        ]);
        assert!(cli.mock);
        match cli.command {
            Command::Generate {
                name,
                age,
                policy_number,
                insurance_type,
                json,
            } => {
                assert_eq!(name, "John Doe");
                assert_eq!(age, "30");
                assert!(policy_number.is_none());
                assert_eq!(insurance_type.as_deref(), Some("Life Insurance"));
                assert!(!json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["assura", "pay-fee", "--yes", "--config", "/tmp/a.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/a.toml"));
        assert!(matches!(cli.command, Command::PayFee { yes: true }));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
