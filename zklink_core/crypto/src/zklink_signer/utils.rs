use super::{PublicPoint, Scalar, PACKED_POINT_SIZE, SCALAR_SIZE};
use crate::params::ORDERS_BYTES;
use crate::zklink_signer::ZkSignerError;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use sha2::{Digest, Sha256, Sha512};

pub fn sha256_bytes(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(input));
    out
}

/// Reduces the SHA-512 digest of the concatenated parts into a curve scalar.
pub(crate) fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    Scalar::from_le_bytes_mod_order(&hasher.finalize())
}

/// Hash of the maker and taker orders, zero padded to `ORDERS_BYTES`.
pub fn hash_orders(orders_bytes: &[u8]) -> [u8; 32] {
    let mut padded = orders_bytes.to_vec();
    padded.resize(padded.len().max(ORDERS_BYTES), 0);
    sha256_bytes(&padded)
}

pub(crate) fn point_to_bytes(point: &PublicPoint) -> Result<[u8; PACKED_POINT_SIZE], ZkSignerError> {
    let mut out = [0u8; PACKED_POINT_SIZE];
    point
        .serialize_compressed(&mut out[..])
        .map_err(ZkSignerError::invalid_pubkey)?;
    Ok(out)
}

pub(crate) fn point_from_bytes(bytes: &[u8]) -> Result<PublicPoint, ZkSignerError> {
    PublicPoint::deserialize_compressed(bytes).map_err(ZkSignerError::invalid_pubkey)
}

pub(crate) fn scalar_to_bytes(scalar: &Scalar) -> Result<[u8; SCALAR_SIZE], ZkSignerError> {
    let mut out = [0u8; SCALAR_SIZE];
    scalar
        .serialize_compressed(&mut out[..])
        .map_err(ZkSignerError::invalid_signature)?;
    Ok(out)
}

pub(crate) fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar, ZkSignerError> {
    Scalar::deserialize_compressed(bytes).map_err(ZkSignerError::invalid_signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_orders_pads_input() {
        let short = vec![1u8; 76];
        let mut padded = short.clone();
        padded.resize(ORDERS_BYTES, 0);
        assert_eq!(hash_orders(&short), sha256_bytes(&padded));
    }

    #[test]
    fn test_hash_to_scalar_depends_on_every_part() {
        let a = hash_to_scalar(&[&b"ab"[..], &b"c"[..]]);
        let b = hash_to_scalar(&[&b"a"[..], &b"bc"[..]]);
        let c = hash_to_scalar(&[&b"ab"[..], &b"d"[..]]);
        // plain concatenation
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
