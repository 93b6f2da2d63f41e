use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zklink_crypto::zklink_signer::utils::sha256_bytes;
use zklink_utils::{decode_zero_prefix_hex, ZeroPrefixHexSerde};

use crate::error::TypeError;

/// SHA-256 of the canonical transaction bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash {
    #[serde(with = "ZeroPrefixHexSerde")]
    pub data: [u8; 32],
}

impl TxHash {
    pub fn hash(bytes: &[u8]) -> Self {
        Self {
            data: sha256_bytes(bytes),
        }
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
        let data = slice.try_into().map_err(|_| {
            TypeError::malformed("tx hash", format!("expected 32 bytes, got {}", slice.len()))
        })?;
        Ok(Self { data })
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.data))
    }
}

impl AsRef<[u8]> for TxHash {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl FromStr for TxHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes =
            decode_zero_prefix_hex(s).map_err(|e| TypeError::malformed("tx hash", e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_hex() {
        let hash = TxHash::hash(b"zklink");
        let s = hash.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(TxHash::from_str(&s).unwrap(), hash);
        assert_eq!(
            serde_json::to_string(&hash).unwrap(),
            format!("\"{}\"", s)
        );
        assert!(TxHash::from_str("0x1234").is_err());
    }
}
