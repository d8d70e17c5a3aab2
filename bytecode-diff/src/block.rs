use ethers::types::{BlockId, BlockNumber};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Point in chain history the code is read at. Forwarded to the node as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockReference {
    #[default]
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
    Number(u64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "Invalid block {0:?}: expected a tag (latest, earliest, pending, safe, finalized) \
     or a block number"
)]
pub struct BlockParseError(pub String);

impl FromStr for BlockReference {
    type Err = BlockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let block = match s.to_ascii_lowercase().as_str() {
            "latest" => BlockReference::Latest,
            "earliest" => BlockReference::Earliest,
            "pending" => BlockReference::Pending,
            "safe" => BlockReference::Safe,
            "finalized" => BlockReference::Finalized,
            other => {
                let invalid = || BlockParseError(s.to_string());
                let (digits, radix) = match other.strip_prefix("0x") {
                    Some(hex) => (hex, 16),
                    None => (other, 10),
                };
                // from_str_radix also takes a leading sign
                if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                    return Err(invalid());
                }
                let number = u64::from_str_radix(digits, radix).map_err(|_| invalid())?;
                BlockReference::Number(number)
            }
        };
        Ok(block)
    }
}

impl From<BlockReference> for BlockNumber {
    fn from(block: BlockReference) -> Self {
        match block {
            BlockReference::Latest => BlockNumber::Latest,
            BlockReference::Earliest => BlockNumber::Earliest,
            BlockReference::Pending => BlockNumber::Pending,
            BlockReference::Safe => BlockNumber::Safe,
            BlockReference::Finalized => BlockNumber::Finalized,
            BlockReference::Number(n) => BlockNumber::Number(n.into()),
        }
    }
}

impl From<BlockReference> for BlockId {
    fn from(block: BlockReference) -> Self {
        BlockId::Number(block.into())
    }
}

impl fmt::Display for BlockReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReference::Latest => f.write_str("latest"),
            BlockReference::Earliest => f.write_str("earliest"),
            BlockReference::Pending => f.write_str("pending"),
            BlockReference::Safe => f.write_str("safe"),
            BlockReference::Finalized => f.write_str("finalized"),
            BlockReference::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for BlockReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockReference::Number(n) => serializer.serialize_u64(*n),
            tag => serializer.collect_str(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_numbers() {
        assert_eq!("latest".parse(), Ok(BlockReference::Latest));
        assert_eq!("Finalized".parse(), Ok(BlockReference::Finalized));
        assert_eq!("18000000".parse(), Ok(BlockReference::Number(18_000_000)));
        assert_eq!("0x10".parse(), Ok(BlockReference::Number(16)));
    }

    #[test]
    fn rejects_garbage() {
        assert!("-1".parse::<BlockReference>().is_err());
        assert!("newest".parse::<BlockReference>().is_err());
        assert!("0xzz".parse::<BlockReference>().is_err());
        assert!("0x".parse::<BlockReference>().is_err());
    }

    #[test]
    fn rejects_signed_numbers() {
        assert!("+5".parse::<BlockReference>().is_err());
        assert!("0x+5".parse::<BlockReference>().is_err());
    }

    #[test]
    fn converts_to_block_id() {
        assert_eq!(
            BlockId::from(BlockReference::Number(42)),
            BlockId::Number(BlockNumber::Number(42u64.into()))
        );
        assert_eq!(
            BlockId::from(BlockReference::Latest),
            BlockId::Number(BlockNumber::Latest)
        );
    }
}
