// Error handling

use std::{fmt, time::Duration};
use thiserror::Error;

use crate::address::ContractAddress;

/// Which of the two compared addresses an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "address A"),
            Side::B => write!(f, "address B"),
        }
    }
}

/// Malformed address input. Raised before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAddressError {
    #[error("Invalid address {input:?}: expected 40 hex digits, got {len}")]
    Length { input: String, len: usize },

    #[error("Invalid address {input:?}: not a hex string")]
    Hex { input: String },

    #[error("Invalid address {input:?}: bad EIP-55 checksum (expected {expected})")]
    Checksum { input: String, expected: String },
}

/// Underlying reason a code fetch failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchCause {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Error fetching bytecode for {address}: {cause}")]
pub struct FetchError {
    pub address: ContractAddress,
    #[source]
    pub cause: FetchCause,
}

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("{side}: {source}")]
    InvalidAddress {
        side: Side,
        #[source]
        source: InvalidAddressError,
    },

    #[error("{side}: {source}")]
    Fetch {
        side: Side,
        #[source]
        source: FetchError,
    },
}

impl DiffError {
    pub fn side(&self) -> Side {
        match self {
            DiffError::InvalidAddress { side, .. } | DiffError::Fetch { side, .. } => *side,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiffError>;
