use tracing::debug;
use zklink_crypto::{PrivateKeySigner, ZkLinkSigner};
use zklink_types::{
    ForcedExit, Order, OrderMatching, PackedEthSignature, Transfer, TxError, Withdraw,
    ZkSignatureTx,
};

use crate::error::SignError;
use crate::TxSignature;

fn sign_eth_message(
    eth_signer: Option<&PrivateKeySigner>,
    message: impl FnOnce() -> String,
) -> Result<Option<PackedEthSignature>, SignError> {
    let Some(eth_signer) = eth_signer else {
        return Ok(None);
    };
    let signature = eth_signer.sign_message(message().as_bytes())?;
    Ok(Some(signature))
}

fn sign_l2<T: ZkSignatureTx>(zklink_signer: &ZkLinkSigner, tx: T) -> Result<T, SignError> {
    tx.validate().map_err(TxError::from)?;
    let tx = tx.sign(zklink_signer)?;
    debug!(tx_type = T::TX_TYPE, tx_hash = %tx.tx_hash(), "signed");
    Ok(tx)
}

/// Signs a transfer, with the layer-1 2FA signature when `eth_signer` is given.
pub fn sign_transfer(
    zklink_signer: &ZkLinkSigner,
    eth_signer: Option<&PrivateKeySigner>,
    tx: Transfer,
    token_symbol: &str,
) -> Result<TxSignature, SignError> {
    let tx = sign_l2(zklink_signer, tx)?;
    let eth_signature = sign_eth_message(eth_signer, || tx.get_ethereum_sign_message(token_symbol))?;
    Ok(TxSignature {
        tx: tx.into(),
        eth_signature,
    })
}

pub fn sign_withdraw(
    zklink_signer: &ZkLinkSigner,
    eth_signer: Option<&PrivateKeySigner>,
    tx: Withdraw,
    l2_source_token_symbol: &str,
) -> Result<TxSignature, SignError> {
    let tx = sign_l2(zklink_signer, tx)?;
    let eth_signature = sign_eth_message(eth_signer, || {
        tx.get_ethereum_sign_message(l2_source_token_symbol)
    })?;
    Ok(TxSignature {
        tx: tx.into(),
        eth_signature,
    })
}

pub fn sign_forced_exit(
    zklink_signer: &ZkLinkSigner,
    eth_signer: Option<&PrivateKeySigner>,
    tx: ForcedExit,
    l2_source_token_symbol: &str,
    fee_token_symbol: &str,
) -> Result<TxSignature, SignError> {
    let tx = sign_l2(zklink_signer, tx)?;
    let eth_signature = sign_eth_message(eth_signer, || {
        tx.get_ethereum_sign_message(l2_source_token_symbol, fee_token_symbol)
    })?;
    Ok(TxSignature {
        tx: tx.into(),
        eth_signature,
    })
}

/// Signs an order on behalf of its owner. Orders are not submitted on their own,
/// they travel inside an `OrderMatching`.
pub fn sign_order(zklink_signer: &ZkLinkSigner, order: Order) -> Result<Order, SignError> {
    sign_l2(zklink_signer, order)
}

/// Signs the match as the submitter. Both orders must already carry valid signatures.
pub fn sign_order_matching(
    zklink_signer: &ZkLinkSigner,
    tx: OrderMatching,
) -> Result<TxSignature, SignError> {
    if !tx.maker.is_signature_valid() {
        return Err(SignError::incorrect_tx("maker order signature is invalid"));
    }
    if !tx.taker.is_signature_valid() {
        return Err(SignError::incorrect_tx("taker order signature is invalid"));
    }
    let tx = sign_l2(zklink_signer, tx)?;
    Ok(TxSignature {
        tx: tx.into(),
        eth_signature: None,
    })
}
