use ethers::{types::H256, utils::keccak256};
use serde::Serialize;

/// keccak-256 of the empty byte string, the hash of an account with no code.
pub const EMPTY_CODE_HASH: H256 = H256([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

pub fn code_hash(code: &[u8]) -> H256 {
    H256::from(keccak256(code))
}

/// Outcome of comparing two code blobs.
///
/// `identical` is decided on the raw bytes; the hashes are for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    identical: bool,
    hash_a: H256,
    hash_b: H256,
    #[serde(rename = "diff_length")]
    length_delta: usize,
}

impl Comparison {
    pub fn identical(&self) -> bool {
        self.identical
    }

    pub fn hash_a(&self) -> H256 {
        self.hash_a
    }

    pub fn hash_b(&self) -> H256 {
        self.hash_b
    }

    pub fn length_delta(&self) -> usize {
        self.length_delta
    }
}

pub fn compare(code_a: &[u8], code_b: &[u8]) -> Comparison {
    Comparison {
        identical: code_a == code_b,
        hash_a: code_hash(code_a),
        hash_b: code_hash(code_b),
        length_delta: code_a.len().abs_diff(code_b.len()),
    }
}
