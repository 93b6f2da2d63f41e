use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use zklink_basic_types::{AccountId, ChainId, SubAccountId, TokenId, H256};
use zklink_crypto::params::FULL_EXIT_BIT_WIDTH;

use crate::codec::FieldCodec;
use crate::error::{TxError, TypeError};
use crate::tx::validators::*;
use crate::tx::TxBytes;
use crate::ZkLinkAddress;

/// `FullExit` priority operation withdraws the whole balance of a token to layer-1.
///
/// Requested through the layer-1 contract, so it carries no layer-2 signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "full_exit_token_pair_validator"))]
pub struct FullExit {
    #[validate(custom = "chain_id_validator")]
    pub to_chain_id: ChainId,
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    #[validate(custom = "zklink_address_validator")]
    pub exit_address: ZkLinkAddress,
    /// Source token and target token of withdrawal from l2 to l1.
    #[validate(custom = "token_validator")]
    pub l2_source_token: TokenId,
    #[validate(custom = "token_validator")]
    pub l1_target_token: TokenId,
    pub serial_id: u64,
    pub eth_hash: H256,
}

fn full_exit_token_pair_validator(tx: &FullExit) -> Result<(), ValidationError> {
    token_pair_validator(tx.l2_source_token, tx.l1_target_token)
}

#[derive(Debug, Clone)]
pub struct FullExitBuilder {
    pub to_chain_id: ChainId,
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub exit_address: ZkLinkAddress,
    pub l2_source_token: TokenId,
    pub l1_target_token: TokenId,
    pub serial_id: u64,
    pub eth_hash: H256,
}

impl FullExitBuilder {
    pub fn build(self) -> Result<FullExit, TxError> {
        let tx = FullExit::new(
            self.to_chain_id,
            self.account_id,
            self.sub_account_id,
            self.exit_address,
            self.l2_source_token,
            self.l1_target_token,
            self.serial_id,
            self.eth_hash,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl FullExit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        to_chain_id: ChainId,
        account_id: AccountId,
        sub_account_id: SubAccountId,
        exit_address: ZkLinkAddress,
        l2_source_token: TokenId,
        l1_target_token: TokenId,
        serial_id: u64,
        eth_hash: H256,
    ) -> Self {
        Self {
            to_chain_id,
            account_id,
            sub_account_id,
            exit_address,
            l2_source_token,
            l1_target_token,
            serial_id,
            eth_hash,
        }
    }
}

impl TxBytes for FullExit {
    const TX_TYPE: u8 = 0x05;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FULL_EXIT_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.to_chain_id.encode());
        out.extend(self.account_id.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.exit_address.encode());
        out.extend(self.l2_source_token.encode());
        out.extend(self.l1_target_token.encode());
        out.extend(self.serial_id.encode());
        out.extend(self.eth_hash.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.to_chain_id.try_encode()?;
        self.account_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.l2_source_token.try_encode()?;
        self.l1_target_token.try_encode()?;
        Ok(())
    }
}
