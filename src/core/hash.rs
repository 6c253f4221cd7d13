use crate::domain::model::strip_suffix;
use alloy_primitives::{keccak256, B256, U256};

/// ENS labelhash: Keccak-256 of the UTF-8 label (the name without `.eth`).
pub fn label_hash(name: &str) -> B256 {
    keccak256(strip_suffix(name).as_bytes())
}

/// The registrar keys names by the labelhash read as a big-endian uint256.
pub fn token_id(label_hash: B256) -> U256 {
    U256::from_be_bytes(label_hash.0)
}
