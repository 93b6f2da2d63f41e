use super::error::ZkSignerError;
use super::public_key::PackedPublicKey;
use super::pubkey_hash::PubKeyHash;
use super::signature::{PackedSignature, ZkLinkSignature};
use super::utils::{hash_to_scalar, point_to_bytes, scalar_to_bytes, sha256_bytes};
use super::{PublicPoint, Scalar, PACKED_SIGNATURE_SIZE, SCALAR_SIZE};
use crate::eth_signer::PrivateKeySigner;
use crate::params::ZKLINK_SIGNER_SEED_MESSAGE;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField, Zero};
use rand::RngCore;
use std::fmt;

/// Holds a layer-2 private key and produces Musig signatures.
#[derive(Clone)]
pub struct ZkLinkSigner {
    private_key: Scalar,
    public_key: PackedPublicKey,
}

impl fmt::Debug for ZkLinkSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZkLinkSigner")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl ZkLinkSigner {
    const MIN_SEED_LEN: usize = 32;

    /// Generates a signer from a random seed.
    pub fn new() -> Result<Self, ZkSignerError> {
        let mut seed = [0u8; Self::MIN_SEED_LEN];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::new_from_seed(&seed)
    }

    /// Derives the key as SHA-256 of the seed reduced into the scalar field.
    pub fn new_from_seed(seed: &[u8]) -> Result<Self, ZkSignerError> {
        if seed.len() < Self::MIN_SEED_LEN {
            return Err(ZkSignerError::InvalidSeed(format!(
                "seed must be at least {} bytes, got {}",
                Self::MIN_SEED_LEN,
                seed.len()
            )));
        }
        let private_key = Scalar::from_be_bytes_mod_order(&sha256_bytes(seed));
        if private_key.is_zero() {
            return Err(ZkSignerError::InvalidSeed("seed maps to a zero key".into()));
        }
        Self::from_scalar(private_key)
    }

    /// Loads a raw big-endian private key. Non canonical and zero scalars are rejected.
    pub fn new_from_bytes(bytes: &[u8]) -> Result<Self, ZkSignerError> {
        if bytes.len() != SCALAR_SIZE {
            return Err(ZkSignerError::InvalidPrivKey(format!(
                "expected {} bytes, got {}",
                SCALAR_SIZE,
                bytes.len()
            )));
        }
        let private_key = Scalar::from_be_bytes_mod_order(bytes);
        if private_key.is_zero() || private_key.into_bigint().to_bytes_be() != bytes {
            return Err(ZkSignerError::invalid_privkey(
                "not a canonical non-zero scalar",
            ));
        }
        Self::from_scalar(private_key)
    }

    /// Derives the layer-2 key from the layer-1 key: the EIP-191 signature of a fixed
    /// message is used as the seed, so the same layer-1 key always yields the same signer.
    pub fn new_from_hex_eth_signer(eth_hex_private_key: &str) -> Result<Self, ZkSignerError> {
        let eth_signer =
            PrivateKeySigner::new(eth_hex_private_key).map_err(ZkSignerError::invalid_privkey)?;
        let signature = eth_signer
            .sign_message(ZKLINK_SIGNER_SEED_MESSAGE.as_bytes())
            .map_err(ZkSignerError::invalid_privkey)?;
        Self::new_from_seed(&signature.serialize_packed())
    }

    fn from_scalar(private_key: Scalar) -> Result<Self, ZkSignerError> {
        let point = (PublicPoint::generator() * private_key).into_affine();
        let public_key = PackedPublicKey(point_to_bytes(&point)?);
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Big-endian encoding accepted by [`ZkLinkSigner::new_from_bytes`].
    pub fn private_key_bytes(&self) -> Vec<u8> {
        self.private_key.into_bigint().to_bytes_be()
    }

    pub fn public_key(&self) -> PackedPublicKey {
        self.public_key
    }

    pub fn public_key_hash(&self) -> PubKeyHash {
        self.public_key.public_key_hash()
    }

    /// Signs `msg` with a deterministic nonce, the same message always yields the same signature.
    pub fn sign_musig(&self, msg: &[u8]) -> Result<ZkLinkSignature, ZkSignerError> {
        let m = sha256_bytes(msg);
        let private_key_bytes = scalar_to_bytes(&self.private_key)?;

        let r = hash_to_scalar(&[&b"nonce"[..], &private_key_bytes[..], &m[..]]);
        let r_point = (PublicPoint::generator() * r).into_affine();
        let r_bytes = point_to_bytes(&r_point)?;

        let c = hash_to_scalar(&[self.public_key.as_bytes(), &r_bytes[..], &m[..]]);
        let s = r + c * self.private_key;

        let mut signature = [0u8; PACKED_SIGNATURE_SIZE];
        signature[..r_bytes.len()].copy_from_slice(&r_bytes);
        signature[r_bytes.len()..].copy_from_slice(&scalar_to_bytes(&s)?);
        Ok(ZkLinkSignature {
            pub_key: self.public_key,
            signature: PackedSignature(signature),
        })
    }
}
