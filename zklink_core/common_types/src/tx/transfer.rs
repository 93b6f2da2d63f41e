use num::BigUint;
use serde::{Deserialize, Serialize};
use validator::Validate;
use zklink_basic_types::{AccountId, Nonce, SubAccountId, TimeStamp, TokenId};
use zklink_crypto::params::{SIGNED_TRANSFER_BIT_WIDTH, TOKEN_MAX_PRECISION};
use zklink_crypto::ZkLinkSignature;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::clock::{Clock, SystemClock};
use crate::codec::FieldCodec;
use crate::error::{TxError, TypeError};
use crate::helpers::{
    pack_fee_amount, pack_token_amount, try_pack_fee_amount, try_pack_token_amount,
};
use crate::tx::validators::*;
use crate::tx::{TxBytes, ZkSignatureTx};
use crate::utils::ethereum_sign_message_part;
use crate::ZkLinkAddress;

/// `Transfer` transaction performs a move of funds from one zklink account to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// zklink network account ID of the transaction initiator.
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    /// zklink network sub-account ID of the transaction initiator.
    #[validate(custom = "sub_account_validator")]
    pub from_sub_account_id: SubAccountId,
    /// zklink network sub-account ID of the recipient.
    #[validate(custom = "sub_account_validator")]
    pub to_sub_account_id: SubAccountId,
    /// Layer1 address of account to transfer funds to.
    #[validate(custom = "zklink_address_validator")]
    pub to: ZkLinkAddress,
    /// Type of token for transfer. Also represents the token in which fee will be paid.
    #[validate(custom = "token_validator")]
    pub token: TokenId,
    /// Amount of funds to transfer, packed on the wire.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_packable")]
    pub amount: BigUint,
    /// Fee for the transaction, packed on the wire.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "fee_packable")]
    pub fee: BigUint,
    /// Current account nonce.
    #[validate(custom = "nonce_validator")]
    pub nonce: Nonce,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,
    /// Used as request id
    pub ts: TimeStamp,
}

/// Parameters of a `Transfer`. `ts` falls back to the clock when absent.
#[derive(Debug, Clone)]
pub struct TransferBuilder {
    pub account_id: AccountId,
    pub to_address: ZkLinkAddress,
    pub from_sub_account_id: SubAccountId,
    pub to_sub_account_id: SubAccountId,
    pub token: TokenId,
    pub amount: BigUint,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub ts: Option<TimeStamp>,
}

impl TransferBuilder {
    pub fn build(self) -> Result<Transfer, TxError> {
        self.build_with_clock(&SystemClock)
    }

    pub fn build_with_clock(self, clock: &impl Clock) -> Result<Transfer, TxError> {
        let ts = self.ts.unwrap_or_else(|| clock.now());
        let tx = Transfer::new(
            self.account_id,
            self.to_address,
            self.from_sub_account_id,
            self.to_sub_account_id,
            self.token,
            self.amount,
            self.fee,
            self.nonce,
            None,
            ts,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl Transfer {
    /// Creates transaction from all the required fields without validating them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: AccountId,
        to: ZkLinkAddress,
        from_sub_account_id: SubAccountId,
        to_sub_account_id: SubAccountId,
        token: TokenId,
        amount: BigUint,
        fee: BigUint,
        nonce: Nonce,
        signature: Option<ZkLinkSignature>,
        ts: TimeStamp,
    ) -> Self {
        Self {
            account_id,
            from_sub_account_id,
            to_sub_account_id,
            to,
            token,
            amount,
            fee,
            nonce,
            signature: signature.unwrap_or_default(),
            ts,
        }
    }

    /// Get the first part of the message we expect to be signed by Ethereum account key.
    /// The only difference is the missing `nonce` since it's added at the end of the transactions
    /// batch message.
    pub fn get_ethereum_sign_message_part(&self, token_symbol: &str) -> String {
        ethereum_sign_message_part(
            "Transfer",
            token_symbol,
            TOKEN_MAX_PRECISION as u8,
            &self.amount,
            &self.fee,
            &self.to,
        )
    }

    /// Gets message that should be signed by Ethereum keys of the account for 2-Factor authentication.
    pub fn get_ethereum_sign_message(&self, token_symbol: &str) -> String {
        let mut message = self.get_ethereum_sign_message_part(token_symbol);
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(format!("Nonce: {}", self.nonce).as_str());
        message
    }
}

impl TxBytes for Transfer {
    const TX_TYPE: u8 = 0x04;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_TRANSFER_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.account_id.encode());
        out.extend(self.from_sub_account_id.encode());
        out.extend(self.to.encode());
        out.extend(self.to_sub_account_id.encode());
        out.extend(self.token.encode());
        out.extend(pack_token_amount(&self.amount));
        out.extend(pack_fee_amount(&self.fee));
        out.extend(self.nonce.encode());
        out.extend(self.ts.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.account_id.try_encode()?;
        self.from_sub_account_id.try_encode()?;
        self.to_sub_account_id.try_encode()?;
        self.token.try_encode()?;
        try_pack_token_amount(&self.amount)?;
        try_pack_fee_amount(&self.fee)?;
        Ok(())
    }
}

impl ZkSignatureTx for Transfer {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }
}
