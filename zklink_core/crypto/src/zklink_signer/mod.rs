//! Layer-2 Musig (Schnorr) signatures over Baby Jubjub, the twisted Edwards
//! curve embedded in BN254.

pub mod error;
pub mod pk_signer;
pub mod pubkey_hash;
pub mod public_key;
pub mod signature;
pub mod utils;

pub use error::ZkSignerError;
pub use pk_signer::ZkLinkSigner;
pub use pubkey_hash::PubKeyHash;
pub use public_key::PackedPublicKey;
pub use signature::{PackedSignature, ZkLinkSignature};

/// Curve types used by the signer.
pub type PublicPoint = ark_ed_on_bn254::EdwardsAffine;
pub type Scalar = ark_ed_on_bn254::Fr;

pub const PACKED_POINT_SIZE: usize = 32;
pub const SCALAR_SIZE: usize = 32;
pub const PACKED_SIGNATURE_SIZE: usize = PACKED_POINT_SIZE + SCALAR_SIZE;
pub const PUBKEY_HASH_LEN: usize = 20;
