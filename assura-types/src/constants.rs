use alloy_primitives::{address, U256};
use std::time::Duration;

use crate::primitives::{Address, Wei};

// ─── Currency ────────────────────────────────────────────────────────────────

/// Number of decimal places for ether.
pub const ETHER_DECIMALS: u32 = 18;

/// One ether in wei (10^18).
pub const ONE_ETHER: Wei = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Value attached to every `executePayment()` call (0.1 ETH).
pub const PAYMENT_AMOUNT: Wei = U256::from_limbs([100_000_000_000_000_000, 0, 0, 0]);

/// Flat fee sent straight to the contract address (0.01 ETH).
pub const FEE_AMOUNT: Wei = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Deployed insurance contract: 0x701B8b98a44AcFbaA8406F9d97003866280fF01d
pub const CONTRACT_ADDRESS: Address = address!("701b8b98a44acfbaa8406f9d97003866280ff01d");

/// Checksummed form of [`CONTRACT_ADDRESS`], used as the config default.
pub const CONTRACT_ADDRESS_HEX: &str = "0x701B8b98a44AcFbaA8406F9d97003866280fF01d";

/// Line appended to the display area once a fee payment confirms.
pub const FEE_REPORT_NOTE: &str = "\nClaim report has been filed.";

// ─── Timing ──────────────────────────────────────────────────────────────────

/// Delay before the simulated recorder reports completion.
pub const RECORDING_DELAY: Duration = Duration::from_secs(2);

/// Default interval between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// Default JSON-RPC request timeout. Wallet signing prompts wait on a human.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ─── Endpoints ───────────────────────────────────────────────────────────────

/// Default wallet JSON-RPC endpoint.
pub const DEFAULT_WALLET_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default contract document generator.
pub const DEFAULT_DOCUMENT_ENDPOINT: &str = "http://127.0.0.1:5000/generate-contract";
