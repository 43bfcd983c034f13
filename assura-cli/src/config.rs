use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use assura_types::constants::{
    CONTRACT_ADDRESS_HEX, DEFAULT_DOCUMENT_ENDPOINT, DEFAULT_POLL_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_WALLET_RPC_URL,
};
use assura_types::primitives::Address;

use crate::error::AppError;
use crate::format::parse_address;

const CONFIG_FILE: &str = "assura.toml";

/// Which backends serve the wallet and document paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// JSON-RPC wallet and HTTP document endpoint.
    #[default]
    Live,
    /// In-process simulated wallet and timed recorder.
    Mock,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Mock => write!(f, "mock"),
        }
    }
}

/// Top-level configuration, stored in `~/.assura/assura.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet. Absent means no wallet is installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: Some(DEFAULT_WALLET_RPC_URL.to_string()),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Address of the deployed insurance contract.
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: CONTRACT_ADDRESS_HEX.to_string(),
        }
    }
}

impl ContractConfig {
    pub fn contract_address(&self) -> Result<Address, AppError> {
        parse_address(&self.address)
            .map_err(|e| AppError::Config(format!("contract.address: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub endpoint: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DOCUMENT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// `~/.assura/assura.toml`
    pub fn default_path() -> Result<PathBuf, AppError> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".assura").join(CONFIG_FILE))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read config file '{}': {}", path, e))
        })?;
        let config: AppConfig = toml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("failed to parse config file '{}': {}", path, e))
        })?;
        config.contract.contract_address()?;
        Ok(config)
    }

    /// Load the explicit path, else the default file if it exists, else defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, AppError> {
        if let Some(p) = path {
            return Self::load(p);
        }
        let default = Self::default_path()?;
        if default.exists() {
            Self::load(&default.to_string_lossy())
        } else {
            Ok(Self::default())
        }
    }

    /// Write a default configuration file into `dir`, returning its path.
    pub fn init(dir: &str) -> Result<PathBuf, AppError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let toml_str = toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| AppError::Config(format!("failed to serialize default config: {}", e)))?;

        let config_path = dir_path.join(CONFIG_FILE);
        std::fs::write(&config_path, toml_str)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assura_types::constants::CONTRACT_ADDRESS;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.wallet.rpc_url.as_deref(), Some(DEFAULT_WALLET_RPC_URL));
        assert_eq!(config.wallet.request_timeout_secs, 120);
        assert_eq!(config.wallet.poll_interval_ms, 1000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.contract.contract_address().unwrap(), CONTRACT_ADDRESS);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.document.endpoint, config.document.endpoint);
        assert_eq!(back.wallet.rpc_url, config.wallet.rpc_url);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("mode = \"mock\"\n[wallet]\n").unwrap();
        assert_eq!(config.mode, Mode::Mock);
        assert!(config.wallet.rpc_url.is_none());
        assert_eq!(config.wallet.poll_interval_ms, 1000);
        assert_eq!(config.document.endpoint, DEFAULT_DOCUMENT_ENDPOINT);
    }

    #[test]
    fn test_init_creates_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = AppConfig::init(tmp.path().to_str().unwrap()).unwrap();
        assert!(path.exists());
        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.mode, Mode::Live);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(AppConfig::load("/nonexistent/path/assura.toml").is_err());
    }

    #[test]
    fn test_invalid_contract_address_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[contract]\naddress = \"0x1234\"\n").unwrap();
        let err = AppConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "mode = \"mock\"\n").unwrap();
        let config = AppConfig::load_or_default(path.to_str()).unwrap();
        assert_eq!(config.mode, Mode::Mock);
    }
}
