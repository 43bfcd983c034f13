pub use alloy_primitives::Address;

use alloy_primitives::hex;
use alloy_primitives::{B256, U256};

/// 32-byte Keccak-256 transaction hash.
pub type TxHash = B256;

/// Amount of ether in wei (18 decimals).
pub type Wei = U256;

/// The zero address.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Format an address as a 0x-prefixed lowercase hex string.
pub fn address_to_hex(addr: &Address) -> String {
    hex::encode_prefixed(addr.as_slice())
}

/// Format a transaction hash as a 0x-prefixed lowercase hex string.
pub fn tx_hash_to_hex(hash: &TxHash) -> String {
    hex::encode_prefixed(hash.as_slice())
}
