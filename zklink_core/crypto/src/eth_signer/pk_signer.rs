use super::error::EthSignerError;
use super::packed_eth_signature::PackedEthSignature;
use ethers::core::k256::ecdsa::SigningKey;
use ethers::types::{H160, H256};
use ethers::utils::{hash_message, secret_key_to_address};
use std::fmt;
use zklink_utils::decode_zero_prefix_hex;

/// Signs layer-1 messages with a secp256k1 private key held in memory.
#[derive(Clone)]
pub struct PrivateKeySigner {
    signing_key: SigningKey,
    address: H160,
}

impl fmt::Debug for PrivateKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeySigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&str> for PrivateKeySigner {
    type Error = EthSignerError;

    fn try_from(private_key: &str) -> Result<Self, Self::Error> {
        Self::new(private_key)
    }
}

impl PrivateKeySigner {
    /// Accepts a hex private key with or without `0x`.
    pub fn new(private_key: &str) -> Result<Self, EthSignerError> {
        let bytes = decode_zero_prefix_hex(private_key.trim())
            .map_err(|e| EthSignerError::InvalidEthSigner(e.to_string()))?;
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|e| EthSignerError::InvalidEthSigner(e.to_string()))?;
        let address = secret_key_to_address(&signing_key);
        Ok(Self {
            signing_key,
            address,
        })
    }

    pub fn address(&self) -> H160 {
        self.address
    }

    /// Signs a 32-byte prehash, `v` is encoded as `27 + recovery_id`.
    pub fn sign_hash(&self, hash: &[u8]) -> Result<PackedEthSignature, EthSignerError> {
        if hash.len() != 32 {
            return Err(EthSignerError::SigningFailed(format!(
                "expected a 32-byte hash, got {} bytes",
                hash.len()
            )));
        }
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| EthSignerError::SigningFailed(e.to_string()))?;
        let mut packed = [0u8; 65];
        packed[..64].copy_from_slice(&signature.to_bytes());
        packed[64] = recovery_id.to_byte() + 27;
        Ok(PackedEthSignature(packed))
    }

    /// EIP-191 personal message signature.
    pub fn sign_message(&self, msg: &[u8]) -> Result<PackedEthSignature, EthSignerError> {
        self.sign_hash(hash_message(msg).as_bytes())
    }

    /// Signs an already computed EIP-712 digest.
    pub fn sign_byted_data(&self, digest: &H256) -> Result<PackedEthSignature, EthSignerError> {
        self.sign_hash(digest.as_bytes())
    }
}
