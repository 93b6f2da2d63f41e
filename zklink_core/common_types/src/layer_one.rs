//! Common primitives for the layer1 blockchain network interaction.
// Built-in deps
use std::fmt;
use std::str::FromStr;
// External uses
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zklink_basic_types::H160;
// Local uses
use crate::error::TypeError;
use zklink_crypto::params::TX_ADDRESS_BYTES;

const ADDRESS_LEN: usize = 20;

/// Layer-1 account address, always 20 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ZkLinkAddress([u8; ADDRESS_LEN]);

impl ZkLinkAddress {
    pub const LEN: usize = ADDRESS_LEN;

    /// Reads a account address from its byte sequence representation.
    ///
    /// Returns err if the slice length does not match with address length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
        let bytes = slice.try_into().map_err(|_| {
            TypeError::malformed(
                "address",
                format!("expected {} bytes, got {}", Self::LEN, slice.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The address left padded with zeros to the width used in transaction bytes.
    pub fn to_fixed_bytes(&self) -> [u8; TX_ADDRESS_BYTES] {
        let mut bytes = [0; TX_ADDRESS_BYTES];
        bytes[TX_ADDRESS_BYTES - Self::LEN..].copy_from_slice(&self.0);
        bytes
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    /// GLOBAL_ASSET_ACCOUNT_ADDRESS is 0xffffffffffffffffffffffffffffffffffffffff
    pub fn is_global_account_address(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0xff)
    }

    pub fn to_h160(&self) -> H160 {
        H160(self.0)
    }
}

impl AsRef<[u8]> for ZkLinkAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<H160> for ZkLinkAddress {
    fn from(address: H160) -> Self {
        Self(address.0)
    }
}

impl From<[u8; ADDRESS_LEN]> for ZkLinkAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ZkLinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ZkLinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZkLinkAddress({self})")
    }
}

impl FromStr for ZkLinkAddress {
    type Err = TypeError;

    /// Parses `0x` followed by exactly 40 hex characters, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| TypeError::malformed("address", "address should start with 0x"))?;
        if digits.len() != Self::LEN * 2 {
            return Err(TypeError::malformed(
                "address",
                format!("expected {} hex characters, got {}", Self::LEN * 2, digits.len()),
            ));
        }
        let bytes = hex::decode(digits).map_err(|e| TypeError::malformed("address", e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for ZkLinkAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ZkLinkAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Self::from_str(&string).map_err(serde::de::Error::custom)
    }
}
