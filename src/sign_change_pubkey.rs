use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;
use zklink_crypto::zklink_signer::utils::sha256_bytes;
use zklink_crypto::{PrivateKeySigner, ZkLinkSigner};
use zklink_types::{
    ChangePubKey, ChangePubKeyAuthData, ChangePubKeyBuilder, Create2Data, EthECDSAData,
    PackedEthSignature, TxBytes, TxError, ZkLinkAddress, ZkLinkSignature, ZkSignatureTx,
};

use crate::error::SignError;
use crate::TxSignature;

/// Which layer-1 authorization [`sign_change_pubkey`] should attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangePubKeyAuthRequest {
    OnChain,
    /// Sign the EIP-712 `ChangePubKey` message with the eth signer.
    EthECDSA,
    EthCREATE2 { data: Create2Data },
}

/// Attaches the requested authorization and signs the transaction with the new key.
pub fn sign_change_pubkey(
    eth_signer: &PrivateKeySigner,
    zklink_signer: &ZkLinkSigner,
    tx: ChangePubKey,
    main_contract: ZkLinkAddress,
    l1_client_id: u32,
    account_address: ZkLinkAddress,
    auth_request: ChangePubKeyAuthRequest,
) -> Result<TxSignature, SignError> {
    let eth_auth_data = match auth_request {
        ChangePubKeyAuthRequest::OnChain => ChangePubKeyAuthData::OnChain,
        ChangePubKeyAuthRequest::EthECDSA => {
            let eth_signature =
                eth_signature_of_change_pubkey(l1_client_id, &tx, eth_signer, &main_contract)?;
            ChangePubKeyAuthData::EthECDSA(EthECDSAData { eth_signature })
        }
        ChangePubKeyAuthRequest::EthCREATE2 { data } => {
            check_create2data(zklink_signer, &data, &account_address)?;
            ChangePubKeyAuthData::EthCREATE2(data)
        }
    };
    let tx = create_signed_change_pubkey(zklink_signer, tx, eth_auth_data)?;
    info!(
        account_id = *tx.account_id,
        tx_hash = %tx.tx_hash(),
        "signed change pubkey"
    );
    Ok(TxSignature {
        tx: tx.into(),
        eth_signature: None,
    })
}

/// EIP-712 signature of the account owner over the `ChangePubKey` message.
pub fn eth_signature_of_change_pubkey(
    l1_client_id: u32,
    tx: &ChangePubKey,
    eth_signer: &PrivateKeySigner,
    main_contract: &ZkLinkAddress,
) -> Result<PackedEthSignature, SignError> {
    let digest = tx.eth_signature_hash(l1_client_id, main_contract)?;
    debug!(l1_client_id, %main_contract, "eip712 digest {:?}", digest);
    Ok(eth_signer.sign_byted_data(&digest)?)
}

/// Validates the transaction, attaches `eth_auth_data` and signs it.
pub fn create_signed_change_pubkey(
    zklink_signer: &ZkLinkSigner,
    tx: ChangePubKey,
    eth_auth_data: ChangePubKeyAuthData,
) -> Result<ChangePubKey, SignError> {
    tx.validate().map_err(TxError::from)?;
    let tx = tx.with_auth_data(eth_auth_data)?.sign(zklink_signer)?;
    Ok(tx)
}

/// Signature of the submitter: the Musig signature over the tx hash
/// (`sha256(tx_bytes)`).
pub fn create_submitter_signature(
    tx_bytes: &[u8],
    zklink_signer: &ZkLinkSigner,
) -> Result<ZkLinkSignature, SignError> {
    let tx_hash = sha256_bytes(tx_bytes);
    Ok(zklink_signer.sign_musig(&tx_hash)?)
}

/// Checks that the CREATE2 parameters together with the signer's pubkey hash
/// derive `account_address`.
pub fn check_create2data(
    zklink_signer: &ZkLinkSigner,
    data: &Create2Data,
    account_address: &ZkLinkAddress,
) -> Result<(), SignError> {
    let from_address = data.get_address(&zklink_signer.public_key_hash());
    if from_address != *account_address {
        return Err(SignError::incorrect_tx(format!(
            "create2 address {from_address} does not match account address {account_address}"
        )));
    }
    Ok(())
}

/// Builds the `sendTransaction` params of a `ChangePubKey` authorized with an EIP-712
/// signature, with both layer-2 keys derived from one layer-1 private key.
pub fn build_change_pubkey_request_with_eth_ecdsa_auth_data(
    eth_private_key: &str,
    builder: ChangePubKeyBuilder,
    l1_client_id: u32,
    main_contract: ZkLinkAddress,
) -> Result<Vec<Value>, SignError> {
    let eth_signer = PrivateKeySigner::new(eth_private_key)?;
    let zklink_signer = ZkLinkSigner::new_from_hex_eth_signer(eth_private_key)?;
    let tx = builder.build()?;
    let account_address = ZkLinkAddress::from(eth_signer.address());

    let tx_signature = sign_change_pubkey(
        &eth_signer,
        &zklink_signer,
        tx,
        main_contract,
        l1_client_id,
        account_address,
        ChangePubKeyAuthRequest::EthECDSA,
    )?;
    let submitter_signature =
        create_submitter_signature(&tx_signature.tx.get_bytes(), &zklink_signer)?;
    Ok(tx_signature.to_rpc_params(Some(&submitter_signature))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::BigUint;
    use std::str::FromStr;
    use zklink_types::{
        AccountId, ChainId, Nonce, PubKeyHash, SubAccountId, TimeStamp, TokenId, ZkLinkTx, H256,
    };

    const ETH_PRIVATE_KEY: &str =
        "0xbe725250b123a39dab5b7579334d5888987c72a58f4508062545fe6e08ca94f4";
    const MAIN_CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
    const L1_CLIENT_ID: u32 = 5;

    fn main_contract() -> ZkLinkAddress {
        ZkLinkAddress::from_str(MAIN_CONTRACT).unwrap()
    }

    fn builder(new_pubkey_hash: PubKeyHash) -> ChangePubKeyBuilder {
        ChangePubKeyBuilder {
            chain_id: ChainId(1),
            account_id: AccountId(2),
            sub_account_id: SubAccountId(4),
            new_pubkey_hash,
            fee_token: TokenId(18),
            fee: BigUint::from(100u32),
            nonce: Nonce(100),
            ts: Some(TimeStamp(1693472232)),
        }
    }

    fn signers() -> (PrivateKeySigner, ZkLinkSigner) {
        (
            PrivateKeySigner::new(ETH_PRIVATE_KEY).unwrap(),
            ZkLinkSigner::new_from_hex_eth_signer(ETH_PRIVATE_KEY).unwrap(),
        )
    }

    fn unwrap_change_pubkey(tx: ZkLinkTx) -> ChangePubKey {
        match tx {
            ZkLinkTx::ChangePubKey(tx) => *tx,
            other => panic!("unexpected tx {other:?}"),
        }
    }

    #[test]
    fn test_sign_change_pubkey_onchain() {
        let (eth_signer, zklink_signer) = signers();
        let tx = builder(zklink_signer.public_key_hash()).build().unwrap();
        let signed = sign_change_pubkey(
            &eth_signer,
            &zklink_signer,
            tx,
            main_contract(),
            L1_CLIENT_ID,
            eth_signer.address().into(),
            ChangePubKeyAuthRequest::OnChain,
        )
        .unwrap();
        assert!(signed.eth_signature.is_none());
        assert!(signed.tx.is_signature_valid());
        assert!(unwrap_change_pubkey(signed.tx).is_onchain());
    }

    #[test]
    fn test_sign_change_pubkey_eth_ecdsa() {
        let (eth_signer, zklink_signer) = signers();
        let tx = builder(zklink_signer.public_key_hash()).build().unwrap();
        let signed = sign_change_pubkey(
            &eth_signer,
            &zklink_signer,
            tx,
            main_contract(),
            L1_CLIENT_ID,
            eth_signer.address().into(),
            ChangePubKeyAuthRequest::EthECDSA,
        )
        .unwrap();
        assert!(signed.tx.is_signature_valid());

        let tx = unwrap_change_pubkey(signed.tx);
        let owner = ZkLinkAddress::from(eth_signer.address());
        assert!(tx.is_eth_auth_data_valid(L1_CLIENT_ID, &main_contract(), &owner));
        // bound to the layer-1 network and the contract
        assert!(!tx.is_eth_auth_data_valid(L1_CLIENT_ID + 1, &main_contract(), &owner));
        assert!(!tx.is_eth_auth_data_valid(L1_CLIENT_ID, &owner, &owner));
    }

    #[test]
    fn test_sign_change_pubkey_create2() {
        let (eth_signer, zklink_signer) = signers();
        let data = Create2Data {
            creator_address: main_contract(),
            salt_arg: H256::repeat_byte(0x11),
            code_hash: H256::repeat_byte(0x22),
        };
        let account_address = data.get_address(&zklink_signer.public_key_hash());

        let tx = builder(zklink_signer.public_key_hash()).build().unwrap();
        let signed = sign_change_pubkey(
            &eth_signer,
            &zklink_signer,
            tx.clone(),
            main_contract(),
            L1_CLIENT_ID,
            account_address,
            ChangePubKeyAuthRequest::EthCREATE2 { data: data.clone() },
        )
        .unwrap();
        let signed = unwrap_change_pubkey(signed.tx);
        assert!(signed.is_eth_auth_data_valid(L1_CLIENT_ID, &main_contract(), &account_address));

        let err = sign_change_pubkey(
            &eth_signer,
            &zklink_signer,
            tx,
            main_contract(),
            L1_CLIENT_ID,
            eth_signer.address().into(),
            ChangePubKeyAuthRequest::EthCREATE2 { data },
        )
        .unwrap_err();
        assert!(matches!(err, SignError::IncorrectTx(_)));
    }

    #[test]
    fn test_sign_change_pubkey_with_foreign_key() {
        let (eth_signer, zklink_signer) = signers();
        let other = ZkLinkSigner::new_from_seed(&[3u8; 32]).unwrap();
        let tx = builder(other.public_key_hash()).build().unwrap();
        let err = sign_change_pubkey(
            &eth_signer,
            &zklink_signer,
            tx,
            main_contract(),
            L1_CLIENT_ID,
            eth_signer.address().into(),
            ChangePubKeyAuthRequest::OnChain,
        )
        .unwrap_err();
        assert!(matches!(err, SignError::Tx(TxError::IncorrectSigner)));
    }

    #[test]
    fn test_create_signed_change_pubkey_rejects_second_auth_data() {
        let (_, zklink_signer) = signers();
        let tx = builder(zklink_signer.public_key_hash())
            .build()
            .unwrap()
            .with_auth_data(ChangePubKeyAuthData::OnChain)
            .unwrap();
        let err = create_signed_change_pubkey(&zklink_signer, tx, ChangePubKeyAuthData::OnChain)
            .unwrap_err();
        assert!(matches!(err, SignError::Tx(TxError::AuthDataAlreadySet)));
    }

    #[test]
    fn test_create_signed_change_pubkey_validates() {
        let (_, zklink_signer) = signers();
        let mut tx = builder(zklink_signer.public_key_hash()).build().unwrap();
        tx.sub_account_id = SubAccountId(32);
        let err = create_signed_change_pubkey(&zklink_signer, tx, ChangePubKeyAuthData::OnChain)
            .unwrap_err();
        assert!(matches!(err, SignError::Tx(TxError::Validation(_))));
    }

    #[test]
    fn test_submitter_signature_signs_tx_hash() {
        let (_, zklink_signer) = signers();
        let tx = builder(zklink_signer.public_key_hash()).build().unwrap();
        let signature = create_submitter_signature(&tx.get_bytes(), &zklink_signer).unwrap();
        assert!(signature.verify_musig(&tx.tx_hash().data).unwrap());
        assert!(!signature.verify_musig(&tx.get_bytes()).unwrap());
        assert_eq!(signature.pub_key, zklink_signer.public_key());
    }

    #[test]
    fn test_build_change_pubkey_request_params() {
        let (eth_signer, zklink_signer) = signers();
        let params = build_change_pubkey_request_with_eth_ecdsa_auth_data(
            ETH_PRIVATE_KEY,
            builder(zklink_signer.public_key_hash()),
            L1_CLIENT_ID,
            main_contract(),
        )
        .unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0]["type"], "ChangePubKey");
        assert_eq!(params[0]["ethAuthData"]["type"], "EthECDSA");
        assert!(params[1].is_null());

        let tx: ZkLinkTx = serde_json::from_value(params[0].clone()).unwrap();
        assert!(tx.is_signature_valid());
        let tx = unwrap_change_pubkey(tx);
        let owner = ZkLinkAddress::from(eth_signer.address());
        assert!(tx.is_eth_auth_data_valid(L1_CLIENT_ID, &main_contract(), &owner));

        let submitter_signature: ZkLinkSignature =
            serde_json::from_value(params[2].clone()).unwrap();
        assert!(submitter_signature.verify_musig(&tx.tx_hash().data).unwrap());
    }
}
