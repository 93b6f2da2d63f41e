use super::error::ZkSignerError;
use super::pubkey_hash::PubKeyHash;
use super::utils::point_from_bytes;
use super::{PublicPoint, PACKED_POINT_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use zklink_utils::{decode_zero_prefix_hex, ZeroPrefixHexSerde};

/// Compressed Baby Jubjub point, the layer-2 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedPublicKey(#[serde(with = "ZeroPrefixHexSerde")] pub [u8; PACKED_POINT_SIZE]);

impl PackedPublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZkSignerError> {
        let bytes: [u8; PACKED_POINT_SIZE] = bytes.try_into().map_err(|_| {
            ZkSignerError::InvalidPubkey(format!(
                "expected {} bytes, got {}",
                PACKED_POINT_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, ZkSignerError> {
        let bytes = decode_zero_prefix_hex(s).map_err(ZkSignerError::invalid_pubkey)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Decompresses the key, rejecting points off the prime order subgroup and the identity.
    pub fn as_point(&self) -> Result<PublicPoint, ZkSignerError> {
        let point = point_from_bytes(&self.0)?;
        if point.is_zero() {
            return Err(ZkSignerError::invalid_pubkey("identity point"));
        }
        Ok(point)
    }

    pub fn public_key_hash(&self) -> PubKeyHash {
        PubKeyHash::from_pubkey(self)
    }
}

impl fmt::Debug for PackedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedPublicKey({})", self.as_hex())
    }
}

impl fmt::Display for PackedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}
