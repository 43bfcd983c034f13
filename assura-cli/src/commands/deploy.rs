use alloy_primitives::hex;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::format::{
    format_address, format_tx_hash, parse_address, print_divider, print_success, style_bold,
    style_info,
};
use crate::prompt::confirm;

use super::{build_app, require_session};

/// Read hex-encoded creation bytecode; whitespace and a 0x prefix are allowed.
pub(crate) fn read_bytecode(path: &str) -> Result<Vec<u8>, AppError> {
    let text = std::fs::read_to_string(path)?;
    let compact: String = text.split_whitespace().collect();
    let hex_str = compact.strip_prefix("0x").unwrap_or(&compact);
    if hex_str.is_empty() {
        return Err(AppError::Config(format!("bytecode file '{}' is empty", path)));
    }
    hex::decode(hex_str)
        .map_err(|e| AppError::Config(format!("bytecode file '{}': invalid hex: {}", path, e)))
}

pub async fn run(
    config: &AppConfig,
    bytecode_path: &str,
    insured: &str,
    details: &str,
    yes: bool,
) -> Result<(), AppError> {
    let bytecode = read_bytecode(bytecode_path)?;
    let insured = parse_address(insured)?;

    let (app, _) = build_app(config, false)?;
    let session = require_session(&app).await?;

    if !yes {
        println!();
        println!("  {}", style_bold().apply_to("Deploy Summary"));
        print_divider();
        println!("  From:     {}", format_address(&session.account()));
        println!(
            "  Insured:  {}",
            style_info().apply_to(format_address(&insured))
        );
        println!("  Details:  \"{}\"", details);
        println!("  Bytecode: {} bytes", bytecode.len());
        println!();

        if !confirm("Deploy policy contract?")? {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let receipt = app
        .deploy(&bytecode, insured, details)
        .await
        .ok_or_else(|| AppError::ActionFailed("contract deployment".to_string()))?;

    print_success("Policy contract deployed");
    println!("  Tx:       {}", format_tx_hash(&receipt.tx_hash));
    if let Some(block) = receipt.block_number {
        println!("  Block:    {}", block);
    }
    if let Some(addr) = receipt.contract_address {
        println!(
            "  Contract: {}",
            style_info().apply_to(format_address(&addr))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bytecode_accepts_prefix_and_whitespace() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("policy.bin");
        std::fs::write(&path, "0x6080\n6040 52\n").unwrap();
        let code = read_bytecode(path.to_str().unwrap()).unwrap();
        assert_eq!(code, vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_read_bytecode_rejects_empty_and_bad_hex() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = tmp.path().join("empty.bin");
        std::fs::write(&empty, "  \n").unwrap();
        assert!(read_bytecode(empty.to_str().unwrap()).is_err());

        let bad = tmp.path().join("bad.bin");
        std::fs::write(&bad, "0xzz").unwrap();
        assert!(read_bytecode(bad.to_str().unwrap()).is_err());
    }
}
