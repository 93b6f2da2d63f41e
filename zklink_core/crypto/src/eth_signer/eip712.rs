//! Hashing of EIP-712 typed data for the `ChangePubKey` authorization.

use super::error::EthSignerError;
use crate::params::{EIP712_DOMAIN_NAME, EIP712_DOMAIN_VERSION};
use ethers::abi::{encode, Token};
use ethers::types::{H160, H256, U256};
use ethers::utils::keccak256;

const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const CHANGE_PUBKEY_TYPE: &str = "ChangePubKey(bytes20 pubKeyHash,uint32 nonce,uint32 accountId)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    pub verifying_contract: H160,
}

impl Eip712Domain {
    /// Domain of the zkLink main contract deployed on the layer-1 chain `l1_client_id`.
    pub fn new(l1_client_id: u32, verifying_contract: &[u8]) -> Result<Self, EthSignerError> {
        if verifying_contract.len() != H160::len_bytes() {
            return Err(EthSignerError::Eip712(format!(
                "verifying contract must be 20 bytes, got {}",
                verifying_contract.len()
            )));
        }
        Ok(Self {
            name: EIP712_DOMAIN_NAME.to_string(),
            version: EIP712_DOMAIN_VERSION.to_string(),
            chain_id: U256::from(l1_client_id),
            verifying_contract: H160::from_slice(verifying_contract),
        })
    }

    pub fn separator(&self) -> H256 {
        let encoded = encode(&[
            Token::FixedBytes(keccak256(EIP712_DOMAIN_TYPE).to_vec()),
            Token::FixedBytes(keccak256(self.name.as_bytes()).to_vec()),
            Token::FixedBytes(keccak256(self.version.as_bytes()).to_vec()),
            Token::Uint(self.chain_id),
            Token::Address(self.verifying_contract),
        ]);
        H256(keccak256(encoded))
    }
}

/// `hashStruct` of `ChangePubKey(bytes20 pubKeyHash,uint32 nonce,uint32 accountId)`.
pub fn change_pubkey_struct_hash(pub_key_hash: &[u8; 20], nonce: u32, account_id: u32) -> H256 {
    let encoded = encode(&[
        Token::FixedBytes(keccak256(CHANGE_PUBKEY_TYPE).to_vec()),
        Token::FixedBytes(pub_key_hash.to_vec()),
        Token::Uint(U256::from(nonce)),
        Token::Uint(U256::from(account_id)),
    ]);
    H256(keccak256(encoded))
}

/// `keccak256("\x19\x01" ‖ domainSeparator ‖ hashStruct(message))`
pub fn eip712_digest(domain: &Eip712Domain, struct_hash: &H256) -> H256 {
    let mut bytes = Vec::with_capacity(66);
    bytes.extend_from_slice(&[0x19, 0x01]);
    bytes.extend_from_slice(domain.separator().as_bytes());
    bytes.extend_from_slice(struct_hash.as_bytes());
    H256(keccak256(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eth_signer::PrivateKeySigner;

    fn domain() -> Eip712Domain {
        Eip712Domain::new(5, &[0x11u8; 20]).unwrap()
    }

    #[test]
    fn test_domain_rejects_bad_contract() {
        assert!(matches!(
            Eip712Domain::new(1, &[0u8; 19]),
            Err(EthSignerError::Eip712(_))
        ));
    }

    #[test]
    fn test_bytes20_is_right_padded() {
        let pkh = [0xabu8; 20];
        let encoded = encode(&[Token::FixedBytes(pkh.to_vec())]);
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..20], &pkh[..]);
        assert_eq!(&encoded[20..], &[0u8; 12][..]);
    }

    #[test]
    fn test_digest_depends_on_every_field() {
        let base = change_pubkey_struct_hash(&[1u8; 20], 0, 7);
        assert_ne!(base, change_pubkey_struct_hash(&[2u8; 20], 0, 7));
        assert_ne!(base, change_pubkey_struct_hash(&[1u8; 20], 1, 7));
        assert_ne!(base, change_pubkey_struct_hash(&[1u8; 20], 0, 8));

        let other_chain = Eip712Domain::new(6, &[0x11u8; 20]).unwrap();
        assert_ne!(eip712_digest(&domain(), &base), eip712_digest(&other_chain, &base));
    }

    #[test]
    fn test_typed_data_signature_recovers_signer() {
        let signer = PrivateKeySigner::new(
            "0xbe725250b123a39dab5b7579334d5888987c72a58f4508062545fe6e08ca94f4",
        )
        .unwrap();
        let digest = eip712_digest(&domain(), &change_pubkey_struct_hash(&[3u8; 20], 1, 10));
        let signature = signer.sign_byted_data(&digest).unwrap();
        assert_eq!(
            signature.signature_recover_signer(&digest).unwrap(),
            signer.address()
        );
    }
}
