use super::error::ZkSignerError;
use super::public_key::PackedPublicKey;
use super::utils::{hash_to_scalar, point_from_bytes, scalar_from_bytes, sha256_bytes};
use super::{PublicPoint, PACKED_POINT_SIZE, PACKED_SIGNATURE_SIZE};
use ark_ec::AffineRepr;
use serde::{Deserialize, Serialize};
use std::fmt;
use zklink_utils::{decode_zero_prefix_hex, ZeroPrefixHexSerde};

/// Musig signature `R ‖ s`, the point compressed and the scalar little-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedSignature(#[serde(with = "ZeroPrefixHexSerde")] pub [u8; PACKED_SIGNATURE_SIZE]);

impl Default for PackedSignature {
    fn default() -> Self {
        Self([0u8; PACKED_SIGNATURE_SIZE])
    }
}

impl fmt::Debug for PackedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedSignature(0x{})", hex::encode(self.0))
    }
}

impl PackedSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZkSignerError> {
        let bytes = bytes.try_into().map_err(|_| {
            ZkSignerError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                PACKED_SIGNATURE_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// zkLink transaction signature: the signer's packed public key together with the
/// Musig signature over the message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLinkSignature {
    pub pub_key: PackedPublicKey,
    pub signature: PackedSignature,
}

impl ZkLinkSignature {
    pub const BYTES: usize = PACKED_POINT_SIZE + PACKED_SIGNATURE_SIZE;

    /// Decodes `pub_key ‖ R ‖ s`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZkSignerError> {
        if bytes.len() != Self::BYTES {
            return Err(ZkSignerError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            )));
        }
        Ok(Self {
            pub_key: PackedPublicKey::from_bytes(&bytes[..PACKED_POINT_SIZE])?,
            signature: PackedSignature::from_bytes(&bytes[PACKED_POINT_SIZE..])?,
        })
    }

    pub fn from_hex(s: &str) -> Result<Self, ZkSignerError> {
        let bytes = decode_zero_prefix_hex(s).map_err(ZkSignerError::invalid_signature)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::BYTES);
        out.extend_from_slice(self.pub_key.as_bytes());
        out.extend_from_slice(self.signature.as_bytes());
        out
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }

    /// True for the all-zero placeholder carried by unsigned transactions.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the signature against `msg`.
    ///
    /// Returns an error when the key or signature is not a valid encoding and
    /// `Ok(false)` when it is well formed but does not match.
    pub fn verify_musig(&self, msg: &[u8]) -> Result<bool, ZkSignerError> {
        let public_key = self.pub_key.as_point()?;
        let (r_bytes, s_bytes) = self.signature.0.split_at(PACKED_POINT_SIZE);
        let r_point: PublicPoint = point_from_bytes(r_bytes)?;
        let s = scalar_from_bytes(s_bytes)?;

        let m = sha256_bytes(msg);
        let c = hash_to_scalar(&[self.pub_key.as_bytes(), r_bytes, &m[..]]);

        let lhs = PublicPoint::generator() * s;
        let rhs = r_point.into_group() + public_key.into_group() * c;
        Ok(lhs == rhs)
    }
}
