//! Assembly of the `sendTransaction` JSON-RPC request.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zklink_types::ZkLinkSignature;

use crate::TxSignature;

pub const JSONRPC_VERSION: &str = "2.0";
pub const SEND_TRANSACTION: &str = "sendTransaction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: &str, params: Vec<Value>) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// `sendTransaction` with params `[tx, eth_signature | null, submitter_signature | null]`.
    pub fn send_transaction(
        id: u64,
        tx_signature: &TxSignature,
        submitter_signature: Option<&ZkLinkSignature>,
    ) -> serde_json::Result<Self> {
        let params = tx_signature.to_rpc_params(submitter_signature)?;
        Ok(Self::new(id, SEND_TRANSACTION, params))
    }
}

impl TxSignature {
    pub fn to_rpc_params(
        &self,
        submitter_signature: Option<&ZkLinkSignature>,
    ) -> serde_json::Result<Vec<Value>> {
        Ok(vec![
            serde_json::to_value(&self.tx)?,
            serde_json::to_value(self.eth_signature)?,
            serde_json::to_value(submitter_signature)?,
        ])
    }
}

pub fn json_str_of_zklink_signature(signature: &ZkLinkSignature) -> serde_json::Result<String> {
    serde_json::to_string(signature)
}
