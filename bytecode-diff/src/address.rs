use ethers::{types::Address, utils::to_checksum};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::error::InvalidAddressError;

/// An account address, always rendered in EIP-55 checksummed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractAddress(Address);

impl ContractAddress {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn as_address(&self) -> Address {
        self.0
    }

    pub fn checksummed(&self) -> String {
        to_checksum(&self.0, None)
    }
}

// Parse without ENS resolution. Mixed-case input must carry a valid checksum;
// all-lower or all-upper input is normalized as-is.
impl FromStr for ContractAddress {
    type Err = InvalidAddressError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 40 {
            return Err(InvalidAddressError::Length {
                input: input.to_string(),
                len: digits.len(),
            });
        }

        let bytes = hex::decode(digits).map_err(|_| InvalidAddressError::Hex {
            input: input.to_string(),
        })?;
        let address = Self(Address::from_slice(&bytes));

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            let expected = address.checksummed();
            if expected[2..] != *digits {
                return Err(InvalidAddressError::Checksum {
                    input: input.to_string(),
                    expected,
                });
            }
        }

        Ok(address)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed())
    }
}

impl Serialize for ContractAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
