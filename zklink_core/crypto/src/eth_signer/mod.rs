//! Layer-1 (EOA) ECDSA signing over secp256k1.

pub mod eip712;
pub mod error;
pub mod packed_eth_signature;
pub mod pk_signer;

pub use eip712::{change_pubkey_struct_hash, eip712_digest, Eip712Domain};
pub use error::EthSignerError;
pub use packed_eth_signature::PackedEthSignature;
pub use pk_signer::PrivateKeySigner;

pub use ethers::types::{Address, H160, H256};
