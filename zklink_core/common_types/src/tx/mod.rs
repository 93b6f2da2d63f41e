//! zklink network L2 transactions.

mod change_pubkey;
mod deposit;
mod forced_exit;
mod fullexit;
mod order_matching;
mod transfer;
mod tx_hash;
mod withdraw;
mod zklink_tx;

pub mod validators;

// Re-export transactions.
pub use self::{
    change_pubkey::{
        ChangePubKey, ChangePubKeyAuthData, ChangePubKeyBuilder, Create2Data, EthECDSAData,
    },
    deposit::{Deposit, DepositBuilder},
    forced_exit::{ForcedExit, ForcedExitBuilder},
    fullexit::{FullExit, FullExitBuilder},
    order_matching::{Order, OrderBuilder, OrderMatching, OrderMatchingBuilder},
    transfer::{Transfer, TransferBuilder},
    tx_hash::TxHash,
    withdraw::{Withdraw, WithdrawBuilder},
    zklink_tx::{ZkLinkTx, ZkLinkTxType},
};

use crate::error::{TxError, TypeError};
use validator::Validate;
use zklink_crypto::{PubKeyHash, ZkLinkSignature, ZkLinkSigner};

/// Canonical byte encoding of a transaction (or order) as it is signed and hashed.
pub trait TxBytes {
    /// Leading type tag of the encoding.
    const TX_TYPE: u8;

    /// Encodes the transaction data as the byte sequence according to the zkLink protocol.
    fn get_bytes(&self) -> Vec<u8>;

    /// Fails when a field does not fit its wire width, i.e. when `get_bytes`
    /// would carry a rounded or truncated value.
    fn check_encoding(&self) -> Result<(), TypeError>;

    fn tx_hash(&self) -> TxHash {
        TxHash::hash(&self.get_bytes())
    }
}

/// Transactions authorized by a layer-2 Musig signature.
pub trait ZkSignatureTx: TxBytes + Validate + Sized {
    fn signature(&self) -> &ZkLinkSignature;

    fn signature_mut(&mut self) -> &mut ZkLinkSignature;

    /// Signs the canonical bytes, replacing any previous signature. Values that
    /// can not be encoded losslessly are rejected instead of being signed rounded.
    fn sign(mut self, signer: &ZkLinkSigner) -> Result<Self, TxError> {
        self.check_encoding()?;
        *self.signature_mut() = signer.sign_musig(&self.get_bytes())?;
        Ok(self)
    }

    /// Verifies the signature against the current content. Malformed keys or
    /// signatures, and content that does not encode losslessly, are reported as invalid.
    fn is_signature_valid(&self) -> bool {
        self.check_encoding().is_ok()
            && self
                .signature()
                .verify_musig(&self.get_bytes())
                .unwrap_or(false)
    }

    /// Restores the `PubKeyHash` from the transaction signature.
    fn verify_signature(&self) -> Option<PubKeyHash> {
        self.is_signature_valid()
            .then(|| self.signature().pub_key.public_key_hash())
    }

    fn check_correctness(&self) -> bool {
        self.validate().is_ok()
    }
}
