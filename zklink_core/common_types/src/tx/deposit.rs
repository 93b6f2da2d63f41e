use num::BigUint;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use zklink_basic_types::{ChainId, SubAccountId, TokenId, H256};
use zklink_crypto::params::DEPOSIT_BIT_WIDTH;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::codec::{encode_raw_amount, try_encode_raw_amount, FieldCodec};
use crate::error::{TxError, TypeError};
use crate::tx::validators::*;
use crate::tx::TxBytes;
use crate::ZkLinkAddress;

/// `Deposit` priority operation moves funds from a layer-1 account into zklink.
///
/// It is submitted to the layer-1 contract, so it carries no layer-2 signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "deposit_token_pair_validator"))]
pub struct Deposit {
    /// The source chain ID of the transaction.
    #[validate(custom = "chain_id_validator")]
    pub from_chain_id: ChainId,
    /// Layer1 address of the transaction initiator's L1 account.
    pub from: ZkLinkAddress,
    /// The target sub-account id of depositing amount.
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    /// Source token and target token of deposited from l1 to l2.
    #[validate(custom = "token_validator")]
    pub l1_source_token: TokenId,
    #[validate(custom = "token_validator")]
    pub l2_target_token: TokenId,
    /// Amount of tokens deposited.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_unpackable")]
    pub amount: BigUint,
    /// Layer1 address of L2 account to deposit funds to.
    #[validate(custom = "zklink_address_validator")]
    pub to: ZkLinkAddress,
    /// serial id for unique tx_hash
    pub serial_id: u64,
    pub eth_hash: H256,
}

fn deposit_token_pair_validator(tx: &Deposit) -> Result<(), ValidationError> {
    token_pair_validator(tx.l2_target_token, tx.l1_source_token)
}

#[derive(Debug, Clone)]
pub struct DepositBuilder {
    pub from_chain_id: ChainId,
    pub from_address: ZkLinkAddress,
    pub sub_account_id: SubAccountId,
    pub to_address: ZkLinkAddress,
    pub l2_target_token: TokenId,
    pub l1_source_token: TokenId,
    pub amount: BigUint,
    pub serial_id: u64,
    pub eth_hash: H256,
}

impl DepositBuilder {
    pub fn build(self) -> Result<Deposit, TxError> {
        let tx = Deposit::new(
            self.from_chain_id,
            self.from_address,
            self.sub_account_id,
            self.to_address,
            self.l2_target_token,
            self.l1_source_token,
            self.amount,
            self.serial_id,
            self.eth_hash,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl Deposit {
    /// Creates transaction from all the required fields without validating them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from_chain_id: ChainId,
        from: ZkLinkAddress,
        sub_account_id: SubAccountId,
        to: ZkLinkAddress,
        l2_target_token: TokenId,
        l1_source_token: TokenId,
        amount: BigUint,
        serial_id: u64,
        eth_hash: H256,
    ) -> Self {
        Self {
            from_chain_id,
            from,
            sub_account_id,
            l1_source_token,
            l2_target_token,
            amount,
            to,
            serial_id,
            eth_hash,
        }
    }
}

impl TxBytes for Deposit {
    const TX_TYPE: u8 = 0x01;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DEPOSIT_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.from_chain_id.encode());
        out.extend(self.from.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.to.encode());
        out.extend(self.l2_target_token.encode());
        out.extend(self.l1_source_token.encode());
        out.extend(encode_raw_amount(&self.amount));
        out.extend(self.serial_id.encode());
        out.extend(self.eth_hash.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.from_chain_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.l2_target_token.try_encode()?;
        self.l1_source_token.try_encode()?;
        try_encode_raw_amount(&self.amount)?;
        Ok(())
    }
}
