use super::error::ZkSignerError;
use super::public_key::PackedPublicKey;
use super::utils::sha256_bytes;
use super::PUBKEY_HASH_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zklink_utils::decode_zero_prefix_hex;

/// Hash of the account's owner public key.
///
/// This is an essential type used within zklink network to authorize transaction author
/// to perform an operation.
///
/// `PubKeyHash` is calculated as the first 20 bytes of the SHA-256 hash of the packed public key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PubKeyHash {
    pub data: [u8; PUBKEY_HASH_LEN],
}

impl PubKeyHash {
    /// Creates an uninitialized `PubkeyHash` object.
    /// This value is used for new accounts to signalize that `PubKeyHash` was not yet
    /// set for the corresponding account.
    pub fn zero() -> Self {
        PubKeyHash::default()
    }

    pub fn is_zero(&self) -> bool {
        self.data == [0u8; PUBKEY_HASH_LEN]
    }

    pub fn from_pubkey(public_key: &PackedPublicKey) -> Self {
        let hash = sha256_bytes(public_key.as_bytes());
        let mut data = [0u8; PUBKEY_HASH_LEN];
        data.copy_from_slice(&hash[..PUBKEY_HASH_LEN]);
        Self { data }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZkSignerError> {
        let data = bytes.try_into().map_err(|_| {
            ZkSignerError::InvalidPubkey(format!(
                "pubkey hash must be {} bytes, got {}",
                PUBKEY_HASH_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self { data })
    }

    /// Decodes `PubKeyHash` from the `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, ZkSignerError> {
        let s = s
            .strip_prefix("0x")
            .ok_or_else(|| ZkSignerError::invalid_pubkey("pubkey hash must start with 0x"))?;
        let bytes = decode_zero_prefix_hex(s).map_err(ZkSignerError::invalid_pubkey)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.data))
    }
}

impl FromStr for PubKeyHash {
    type Err = ZkSignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for PubKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl fmt::Display for PubKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Serialize for PubKeyHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for PubKeyHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let string = String::deserialize(deserializer)?;
        PubKeyHash::from_hex(&string).map_err(Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubkey_hash_hex() {
        let hex = "0xdbd9c8235e4fc9d5b9b7bb201f1133e8a28c0edd";
        let pkh = PubKeyHash::from_hex(hex).unwrap();
        assert_eq!(pkh.as_hex(), hex);
        assert_eq!(pkh.to_string(), hex);
        assert!(!pkh.is_zero());
        assert!(PubKeyHash::zero().is_zero());

        assert!(PubKeyHash::from_hex("dbd9c8235e4fc9d5b9b7bb201f1133e8a28c0edd").is_err());
        assert!(PubKeyHash::from_hex("0xdbd9c8").is_err());
        assert!(PubKeyHash::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_pubkey_hash_serde() {
        let pkh = PubKeyHash { data: [7u8; 20] };
        let json = serde_json::to_string(&pkh).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "07".repeat(20)));
        let back: PubKeyHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pkh);
    }

    #[test]
    fn test_pubkey_hash_is_prefix_of_sha256() {
        let pk = PackedPublicKey([3u8; 32]);
        let pkh = PubKeyHash::from_pubkey(&pk);
        assert_eq!(pkh.data[..], sha256_bytes(&[3u8; 32])[..20]);
    }
}
