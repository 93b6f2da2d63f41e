use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZkSignerError {
    #[error("invalid private key: {0}")]
    InvalidPrivKey(String),
    #[error("invalid public key: {0}")]
    InvalidPubkey(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
}

impl ZkSignerError {
    pub fn invalid_privkey<T: std::fmt::Display>(e: T) -> Self {
        Self::InvalidPrivKey(e.to_string())
    }

    pub fn invalid_pubkey<T: std::fmt::Display>(e: T) -> Self {
        Self::InvalidPubkey(e.to_string())
    }

    pub fn invalid_signature<T: std::fmt::Display>(e: T) -> Self {
        Self::InvalidSignature(e.to_string())
    }
}
