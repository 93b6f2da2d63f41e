use super::error::EthSignerError;
use ethers::types::{Signature, H160, H256};
use ethers::utils::hash_message;
use serde::{Deserialize, Serialize};
use std::fmt;
use zklink_utils::{decode_zero_prefix_hex, ZeroPrefixHexSerde};

/// Struct used for working with ethereum signatures created using eth_sign (using geth, ethers.js, etc)
/// message is serialized as 65 bytes long `0x` prefixed string.
///
/// Most clients produce v = 27 + recovery_id, some produce the bare recovery_id.
/// The packed form always stores v = 27 + recovery_id, `deserialize_packed` adds 27 when needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedEthSignature(#[serde(with = "ZeroPrefixHexSerde")] pub [u8; 65]);

impl Default for PackedEthSignature {
    fn default() -> Self {
        Self([0u8; 65])
    }
}

impl fmt::Debug for PackedEthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedEthSignature({})", self.as_hex())
    }
}

impl PackedEthSignature {
    pub fn serialize_packed(&self) -> [u8; 65] {
        self.0
    }

    pub fn deserialize_packed(bytes: &[u8]) -> Result<Self, EthSignerError> {
        let mut data: [u8; 65] = bytes.try_into().map_err(|_| {
            EthSignerError::InvalidSignatureStr(format!(
                "eth signature length should be 65 bytes, got {}",
                bytes.len()
            ))
        })?;
        if data[64] < 27 {
            data[64] += 27;
        }
        Ok(Self(data))
    }

    pub fn from_hex(s: &str) -> Result<Self, EthSignerError> {
        let bytes = decode_zero_prefix_hex(s)
            .map_err(|e| EthSignerError::InvalidSignatureStr(e.to_string()))?;
        Self::deserialize_packed(&bytes)
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Recovers the address that signed the 32-byte `msg_hash`.
    pub fn signature_recover_signer(&self, msg_hash: &H256) -> Result<H160, EthSignerError> {
        let signature = Signature::try_from(&self.0[..])
            .map_err(|e| EthSignerError::RecoverAddress(e.to_string()))?;
        signature
            .recover(*msg_hash)
            .map_err(|e| EthSignerError::RecoverAddress(e.to_string()))
    }

    /// Recovers the signer of an EIP-191 personal message.
    pub fn recover_message_signer(&self, msg: &[u8]) -> Result<H160, EthSignerError> {
        self.signature_recover_signer(&hash_message(msg))
    }
}
