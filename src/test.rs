use num::BigUint;
use serde_json::Value;
use std::str::FromStr;
use zklink_crypto::{PrivateKeySigner, ZkLinkSigner};
use zklink_types::{
    AccountId, ChainId, ChangePubKeyAuthData, ChangePubKeyBuilder, EthECDSAData, Nonce,
    SubAccountId, TimeStamp, TokenId, ZkLinkAddress, ZkLinkTx, ZkSignatureTx,
};

use crate::{
    create_signed_change_pubkey, create_submitter_signature, eth_signature_of_change_pubkey,
    json_str_of_zklink_signature, RpcRequest, TxSignature,
};

const PRIVATE_KEY: &str = "0xbe725250b123a39dab5b7579334d5888987c72a58f4508062545fe6e08ca94f4";

/// Step by step `ChangePubKey`: eth signature, auth data, layer-2 signature,
/// submitter signature and the rpc request.
#[test]
fn test_change_pubkey_low_level_flow() {
    let eth_signer = PrivateKeySigner::new(PRIVATE_KEY).unwrap();
    let zklink_signer = ZkLinkSigner::new_from_hex_eth_signer(PRIVATE_KEY).unwrap();
    let main_contract = ZkLinkAddress::from_str("0x0000000000000000000000000000000000000001")
        .unwrap();
    let l1_client_id = 1;

    let tx = ChangePubKeyBuilder {
        chain_id: ChainId(1),
        account_id: AccountId(2),
        sub_account_id: SubAccountId(4),
        new_pubkey_hash: zklink_signer.public_key_hash(),
        fee_token: TokenId(1),
        fee: BigUint::from(100u32),
        nonce: Nonce(100),
        ts: Some(TimeStamp(1693472232)),
    }
    .build()
    .unwrap();

    let eth_signature =
        eth_signature_of_change_pubkey(l1_client_id, &tx, &eth_signer, &main_contract).unwrap();
    let tx = create_signed_change_pubkey(
        &zklink_signer,
        tx,
        ChangePubKeyAuthData::EthECDSA(EthECDSAData { eth_signature }),
    )
    .unwrap();
    assert!(tx.is_signature_valid());
    assert_eq!(tx.verify_signature(), Some(zklink_signer.public_key_hash()));
    assert!(tx.is_eth_auth_data_valid(l1_client_id, &main_contract, &eth_signer.address().into()));

    let zklink_tx = ZkLinkTx::from(tx);
    let submitter_signature =
        create_submitter_signature(&zklink_tx.get_bytes(), &zklink_signer).unwrap();
    let json_str = json_str_of_zklink_signature(&submitter_signature).unwrap();

    let tx_signature = TxSignature {
        tx: zklink_tx,
        eth_signature: None,
    };
    let request = RpcRequest::send_transaction(1, &tx_signature, Some(&submitter_signature))
        .unwrap();
    let request: Value = serde_json::to_value(request).unwrap();
    assert_eq!(request["params"][0]["type"], "ChangePubKey");
    assert_eq!(request["params"][0]["nonce"], 100);
    assert_eq!(
        request["params"][0]["newPkHash"],
        zklink_signer.public_key_hash().as_hex()
    );
    assert!(request["params"][1].is_null());
    assert_eq!(
        request["params"][2],
        serde_json::from_str::<Value>(&json_str).unwrap()
    );
}
