use console::Style;

use assura_types::constants::{ETHER_DECIMALS, ONE_ETHER};
use assura_types::primitives::{address_to_hex, tx_hash_to_hex, Address, TxHash, Wei};

use crate::error::AppError;

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn style_success() -> Style {
    Style::new().green()
}

pub fn style_error() -> Style {
    Style::new().red()
}

pub fn style_warn() -> Style {
    Style::new().yellow()
}

pub fn style_info() -> Style {
    Style::new().cyan()
}

pub fn style_bold() -> Style {
    Style::new().bold()
}

pub fn style_dim() -> Style {
    Style::new().dim()
}

// ── Amount formatting ───────────────────────────────────────────────────────

/// Format wei as ether, trimming trailing zeros: 10^17 -> "0.1 ETH".
pub fn format_ether(value: Wei) -> String {
    let (whole, frac) = value.div_rem(ONE_ETHER);
    if frac.is_zero() {
        return format!("{} ETH", whole);
    }
    let frac_str = format!("{:0>width$}", frac, width = ETHER_DECIMALS as usize);
    format!("{}.{} ETH", whole, frac_str.trim_end_matches('0'))
}

// ── Address formatting ──────────────────────────────────────────────────────

/// Format an Address as a 0x-prefixed hex string.
pub fn format_address(addr: &Address) -> String {
    address_to_hex(addr)
}

pub fn format_tx_hash(hash: &TxHash) -> String {
    tx_hash_to_hex(hash)
}

/// Parse a hex address string (with or without 0x prefix) into an Address.
pub fn parse_address(s: &str) -> Result<Address, AppError> {
    s.trim()
        .parse()
        .map_err(|e| AppError::InvalidAddress(format!("'{}': {}", s, e)))
}

// ── Display helpers ─────────────────────────────────────────────────────────

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("  {} {}", style_success().apply_to("✓"), msg);
}

/// Print an error message with a hint.
pub fn print_error(msg: &str, hint: Option<&str>) {
    eprintln!("  {} {}", style_error().apply_to("Error:"), msg);
    if let Some(h) = hint {
        eprintln!(
            "  {} {}",
            style_dim().apply_to("Hint:"),
            style_dim().apply_to(h)
        );
    }
}

/// Print a divider.
pub fn print_divider() {
    println!(
        "  {}",
        style_dim().apply_to("────────────────────────────────")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use assura_types::constants::{FEE_AMOUNT, PAYMENT_AMOUNT};

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::ZERO), "0 ETH");
        assert_eq!(format_ether(ONE_ETHER), "1 ETH");
        assert_eq!(format_ether(PAYMENT_AMOUNT), "0.1 ETH");
        assert_eq!(format_ether(FEE_AMOUNT), "0.01 ETH");
        assert_eq!(
            format_ether(ONE_ETHER + U256::from(1)),
            "1.000000000000000001 ETH"
        );
    }

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0x701B8b98a44AcFbaA8406F9d97003866280fF01d").unwrap();
        assert_eq!(addr[0], 0x70);
        assert_eq!(addr[19], 0x1d);
        let bare = parse_address("701b8b98a44acfbaa8406f9d97003866280ff01d").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_parse_address_rejects_bad_input() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address(&format!("0x{}", "zz".repeat(20))).is_err());
    }

    #[test]
    fn test_format_address_is_lowercase_hex() {
        let addr = Address::repeat_byte(0xab);
        assert_eq!(format_address(&addr), format!("0x{}", "ab".repeat(20)));
    }
}
