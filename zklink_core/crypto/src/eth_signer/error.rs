use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EthSignerError {
    #[error("invalid eth signer: {0}")]
    InvalidEthSigner(String),
    #[error("signing failed: {0}")]
    SigningFailed(String),
    #[error("invalid signature string: {0}")]
    InvalidSignatureStr(String),
    #[error("failed to recover address from signature: {0}")]
    RecoverAddress(String),
    #[error("eip712 error: {0}")]
    Eip712(String),
}
