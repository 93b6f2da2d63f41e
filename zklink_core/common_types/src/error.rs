use num::BigUint;
use thiserror::Error;
use validator::ValidationErrors;
use zklink_crypto::{EthSignerError, ZkSignerError};

/// Errors of the field codec and amount packing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },
    #[error("amount {0} can not be packed without losing precision")]
    AmountTooLarge(BigUint),
}

impl TypeError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or signing a transaction.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("change pubkey auth data is missing")]
    MissingAuthData,
    #[error("change pubkey auth data is already set")]
    AuthDataAlreadySet,
    #[error("signer public key hash does not match the new public key hash")]
    IncorrectSigner,
    #[error(transparent)]
    ZkSigner(#[from] ZkSignerError),
    #[error(transparent)]
    EthSigner(#[from] EthSignerError),
}
