//! `zklink_crypto` is a crate containing essential zkLink cryptographic primitives:
//! the layer-2 Musig signer, public key hashes and the layer-1 (EOA) ECDSA signer.

pub mod eth_signer;
pub mod params;
pub mod zklink_signer;

pub use eth_signer::{EthSignerError, PackedEthSignature, PrivateKeySigner};
pub use zklink_signer::{
    PackedPublicKey, PackedSignature, PubKeyHash, ZkLinkSignature, ZkLinkSigner, ZkSignerError,
};
