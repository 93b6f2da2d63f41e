use thiserror::Error;
use zklink_crypto::{EthSignerError, ZkSignerError};
use zklink_types::TxError;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("incorrect tx: {0}")]
    IncorrectTx(String),
    #[error(transparent)]
    Tx(#[from] TxError),
    #[error("zklink signer error: {0}")]
    ZkSigner(#[from] ZkSignerError),
    #[error("eth signer error: {0}")]
    EthSigner(#[from] EthSignerError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SignError {
    pub fn incorrect_tx(reason: impl Into<String>) -> Self {
        Self::IncorrectTx(reason.into())
    }
}
