//! Signing flows of the zkLink sdk.
//!
//! The transaction types live in `zklink_types`, the keys in `zklink_crypto`. This crate
//! combines them: it attaches layer-1 authorizations, signs, and turns the result into
//! the parameters of a `sendTransaction` JSON-RPC request.

pub mod error;
pub mod log;
pub mod rpc;
pub mod sign_change_pubkey;
pub mod sign_tx;
pub mod submitter;

#[cfg(test)]
mod test;

use serde::{Deserialize, Serialize};
use zklink_types::{PackedEthSignature, ZkLinkTx};

pub use error::SignError;
pub use rpc::{json_str_of_zklink_signature, RpcRequest};
pub use sign_change_pubkey::{
    build_change_pubkey_request_with_eth_ecdsa_auth_data, check_create2data,
    create_signed_change_pubkey, create_submitter_signature, eth_signature_of_change_pubkey,
    sign_change_pubkey, ChangePubKeyAuthRequest,
};
pub use sign_tx::{sign_forced_exit, sign_order, sign_order_matching, sign_transfer, sign_withdraw};
pub use submitter::RpcSubmitter;

/// A transaction carrying its layer-2 signature, plus the optional layer-1
/// signature of the account owner (2FA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSignature {
    pub tx: ZkLinkTx,
    pub eth_signature: Option<PackedEthSignature>,
}
