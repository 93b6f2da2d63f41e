use num::BigUint;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use zklink_basic_types::{AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId};
use zklink_crypto::params::{SIGNED_WITHDRAW_BIT_WIDTH, TOKEN_MAX_PRECISION};
use zklink_crypto::ZkLinkSignature;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::clock::{Clock, SystemClock};
use crate::codec::{encode_raw_amount, try_encode_raw_amount, FieldCodec};
use crate::error::{TxError, TypeError};
use crate::helpers::{pack_fee_amount, try_pack_fee_amount};
use crate::tx::validators::*;
use crate::tx::{TxBytes, ZkSignatureTx};
use crate::utils::ethereum_sign_message_part;
use crate::ZkLinkAddress;

/// `Withdraw` transaction performs a withdrawal of funds from zklink account to L1 account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "withdraw_token_pair_validator"))]
pub struct Withdraw {
    /// Target chain of withdraw.
    #[validate(custom = "chain_id_validator")]
    pub to_chain_id: ChainId,
    /// zkLink network account ID of the transaction initiator.
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    /// The source sub-account id of withdraw amount.
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    /// Address of L1 account to withdraw funds to.
    #[validate(custom = "zklink_address_validator")]
    pub to: ZkLinkAddress,
    /// Source token and target token of withdrawal from l2 to l1.
    /// Also represents the token in which fee will be paid.
    #[validate(custom = "token_validator")]
    pub l2_source_token: TokenId,
    #[validate(custom = "token_validator")]
    pub l1_target_token: TokenId,
    /// Amount of funds to withdraw, layer1 can not unpack it, do not packaging
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_unpackable")]
    pub amount: BigUint,
    /// Fee for the transaction, need packaging
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "fee_packable")]
    pub fee: BigUint,
    /// Current account nonce.
    #[validate(custom = "nonce_validator")]
    pub nonce: Nonce,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,
    /// Fast withdraw or normal withdraw
    #[validate(custom = "boolean_validator")]
    pub fast_withdraw: u8,
    /// Ratio of the amount charged by the fast withdraw provider, in basis points.
    #[validate(custom = "withdraw_fee_ratio_validator")]
    pub withdraw_fee_ratio: u16,
    /// Used as request id
    pub ts: TimeStamp,
}

fn withdraw_token_pair_validator(tx: &Withdraw) -> Result<(), ValidationError> {
    token_pair_validator(tx.l2_source_token, tx.l1_target_token)
}

#[derive(Debug, Clone)]
pub struct WithdrawBuilder {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub to_chain_id: ChainId,
    pub to_address: ZkLinkAddress,
    pub l2_source_token: TokenId,
    pub l1_target_token: TokenId,
    pub amount: BigUint,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub fast_withdraw: bool,
    pub withdraw_fee_ratio: u16,
    pub ts: Option<TimeStamp>,
}

impl WithdrawBuilder {
    pub fn build(self) -> Result<Withdraw, TxError> {
        self.build_with_clock(&SystemClock)
    }

    pub fn build_with_clock(self, clock: &impl Clock) -> Result<Withdraw, TxError> {
        let ts = self.ts.unwrap_or_else(|| clock.now());
        let tx = Withdraw::new(
            self.account_id,
            self.sub_account_id,
            self.to_chain_id,
            self.to_address,
            self.l2_source_token,
            self.l1_target_token,
            self.amount,
            self.fee,
            self.nonce,
            self.fast_withdraw,
            self.withdraw_fee_ratio,
            None,
            ts,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl Withdraw {
    /// Creates transaction from all the required fields without validating them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: AccountId,
        sub_account_id: SubAccountId,
        to_chain_id: ChainId,
        to: ZkLinkAddress,
        l2_source_token: TokenId,
        l1_target_token: TokenId,
        amount: BigUint,
        fee: BigUint,
        nonce: Nonce,
        fast_withdraw: bool,
        withdraw_fee_ratio: u16,
        signature: Option<ZkLinkSignature>,
        ts: TimeStamp,
    ) -> Self {
        Self {
            to_chain_id,
            account_id,
            sub_account_id,
            to,
            l2_source_token,
            l1_target_token,
            amount,
            fee,
            nonce,
            signature: signature.unwrap_or_default(),
            fast_withdraw: u8::from(fast_withdraw),
            withdraw_fee_ratio,
            ts,
        }
    }

    pub fn is_fast_withdraw(&self) -> bool {
        self.fast_withdraw == 1
    }

    /// Get the first part of the message we expect to be signed by Ethereum account key.
    /// The only difference is the missing `nonce` since it's added at the end of the transactions
    /// batch message.
    pub fn get_ethereum_sign_message_part(&self, token_symbol: &str) -> String {
        ethereum_sign_message_part(
            "Withdraw",
            token_symbol,
            TOKEN_MAX_PRECISION as u8,
            &self.amount,
            &self.fee,
            &self.to,
        )
    }

    /// Get message that should be signed by Ethereum keys of the account for 2-Factor authentication.
    pub fn get_ethereum_sign_message(&self, token_symbol: &str) -> String {
        let mut message = self.get_ethereum_sign_message_part(token_symbol);
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(format!("Nonce: {}", self.nonce).as_str());
        message
    }
}

impl TxBytes for Withdraw {
    const TX_TYPE: u8 = 0x03;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_WITHDRAW_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.to_chain_id.encode());
        out.extend(self.account_id.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.to.encode());
        out.extend(self.l2_source_token.encode());
        out.extend(self.l1_target_token.encode());
        out.extend(encode_raw_amount(&self.amount));
        out.extend(pack_fee_amount(&self.fee));
        out.extend(self.nonce.encode());
        out.extend(self.fast_withdraw.encode());
        out.extend(self.withdraw_fee_ratio.encode());
        out.extend(self.ts.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.to_chain_id.try_encode()?;
        self.account_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.l2_source_token.try_encode()?;
        self.l1_target_token.try_encode()?;
        try_encode_raw_amount(&self.amount)?;
        try_pack_fee_amount(&self.fee)?;
        Ok(())
    }
}

impl ZkSignatureTx for Withdraw {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }
}
