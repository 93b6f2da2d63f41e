use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use zklink_basic_types::{AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId};
use zklink_crypto::params::{SIGNED_FORCED_EXIT_BIT_WIDTH, TOKEN_MAX_PRECISION};
use zklink_crypto::ZkLinkSignature;
use zklink_utils::{format_units, BigUintSerdeAsRadix10Str};

use crate::clock::{Clock, SystemClock};
use crate::codec::FieldCodec;
use crate::error::{TxError, TypeError};
use crate::helpers::{pack_fee_amount, try_pack_fee_amount};
use crate::tx::validators::*;
use crate::tx::{TxBytes, ZkSignatureTx};
use crate::ZkLinkAddress;

/// `ForcedExit` transaction is used to withdraw funds from an unowned
/// account to its corresponding L1 address.
///
/// Caller of this function will pay fee for the operation, and has no
/// control over the address on which funds will be withdrawn. Account
/// to which `ForcedExit` is applied must have no public key hash set.
///
/// This operation is expected to be used in cases when account in L1
/// cannot prove its identity in L2 (e.g. it's an existing smart contract),
/// so the funds won't get "locked" in L2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "forced_exit_token_pair_validator"))]
pub struct ForcedExit {
    /// The chain ID of receiver of the transaction.
    #[validate(custom = "chain_id_validator")]
    pub to_chain_id: ChainId,
    /// zkLink network account ID of the transaction initiator.
    #[validate(custom = "account_validator")]
    pub initiator_account_id: AccountId,
    /// sub-account ID of initiator fee token.
    #[validate(custom = "sub_account_validator")]
    pub initiator_sub_account_id: SubAccountId,
    /// Layer1 address of the account to withdraw funds from.
    /// Also this field represents the address in L1 to which funds will be withdrawn.
    #[validate(custom = "zklink_address_validator")]
    pub target: ZkLinkAddress,
    /// Source sub-account ID of the transaction withdraw.
    #[validate(custom = "sub_account_validator")]
    pub target_sub_account_id: SubAccountId,
    /// Source token and target token of ForcedExit from l2 to l1.
    #[validate(custom = "token_validator")]
    pub l2_source_token: TokenId,
    #[validate(custom = "token_validator")]
    pub l1_target_token: TokenId,
    /// Fee for the transaction, need packaging
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "fee_packable")]
    pub fee: BigUint,
    #[validate(custom = "token_validator")]
    pub fee_token: TokenId,
    /// Current initiator account nonce.
    #[validate(custom = "nonce_validator")]
    pub nonce: Nonce,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,
    /// Used as request id
    pub ts: TimeStamp,
}

fn forced_exit_token_pair_validator(tx: &ForcedExit) -> Result<(), ValidationError> {
    token_pair_validator(tx.l2_source_token, tx.l1_target_token)
}

#[derive(Debug, Clone)]
pub struct ForcedExitBuilder {
    pub to_chain_id: ChainId,
    pub initiator_account_id: AccountId,
    pub initiator_sub_account_id: SubAccountId,
    pub target: ZkLinkAddress,
    pub target_sub_account_id: SubAccountId,
    pub l2_source_token: TokenId,
    pub l1_target_token: TokenId,
    pub fee_token: TokenId,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub ts: Option<TimeStamp>,
}

impl ForcedExitBuilder {
    pub fn build(self) -> Result<ForcedExit, TxError> {
        self.build_with_clock(&SystemClock)
    }

    pub fn build_with_clock(self, clock: &impl Clock) -> Result<ForcedExit, TxError> {
        let ts = self.ts.unwrap_or_else(|| clock.now());
        let tx = ForcedExit::new(
            self.to_chain_id,
            self.initiator_account_id,
            self.initiator_sub_account_id,
            self.target,
            self.target_sub_account_id,
            self.l2_source_token,
            self.l1_target_token,
            self.fee_token,
            self.fee,
            self.nonce,
            None,
            ts,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl ForcedExit {
    /// Creates transaction from all the required fields without validating them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        to_chain_id: ChainId,
        initiator_account_id: AccountId,
        initiator_sub_account_id: SubAccountId,
        target: ZkLinkAddress,
        target_sub_account_id: SubAccountId,
        l2_source_token: TokenId,
        l1_target_token: TokenId,
        fee_token: TokenId,
        fee: BigUint,
        nonce: Nonce,
        signature: Option<ZkLinkSignature>,
        ts: TimeStamp,
    ) -> Self {
        Self {
            to_chain_id,
            initiator_account_id,
            initiator_sub_account_id,
            target,
            target_sub_account_id,
            l2_source_token,
            l1_target_token,
            fee,
            fee_token,
            nonce,
            signature: signature.unwrap_or_default(),
            ts,
        }
    }

    /// Get the first part of the message we expect to be signed by Ethereum account key.
    /// The format is:
    ///
    /// ForcedExit {token} to: {target}
    /// [Fee: {fee} {token}]
    ///
    /// Note that the second line is optional.
    pub fn get_ethereum_sign_message_part(
        &self,
        l2_source_token_symbol: &str,
        fee_token_symbol: &str,
    ) -> String {
        let mut message = format!(
            "ForcedExit {token} to: {to}",
            token = l2_source_token_symbol,
            to = self.target
        );
        if !self.fee.is_zero() {
            message.push_str(
                format!(
                    "\nFee: {fee} {token}",
                    fee = format_units(&self.fee, TOKEN_MAX_PRECISION as u8),
                    token = fee_token_symbol,
                )
                .as_str(),
            );
        }
        message
    }

    /// Gets message that should be signed by Ethereum keys of the account for 2-Factor authentication.
    pub fn get_ethereum_sign_message(
        &self,
        l2_source_token_symbol: &str,
        fee_token_symbol: &str,
    ) -> String {
        let mut message =
            self.get_ethereum_sign_message_part(l2_source_token_symbol, fee_token_symbol);
        message.push_str(format!("\nNonce: {}", self.nonce).as_str());
        message
    }
}

impl TxBytes for ForcedExit {
    const TX_TYPE: u8 = 0x07;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_FORCED_EXIT_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.to_chain_id.encode());
        out.extend(self.initiator_account_id.encode());
        out.extend(self.initiator_sub_account_id.encode());
        out.extend(self.target.encode());
        out.extend(self.target_sub_account_id.encode());
        out.extend(self.l2_source_token.encode());
        out.extend(self.l1_target_token.encode());
        out.extend(self.fee_token.encode());
        out.extend(pack_fee_amount(&self.fee));
        out.extend(self.nonce.encode());
        out.extend(self.ts.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.to_chain_id.try_encode()?;
        self.initiator_account_id.try_encode()?;
        self.initiator_sub_account_id.try_encode()?;
        self.target_sub_account_id.try_encode()?;
        self.l2_source_token.try_encode()?;
        self.l1_target_token.try_encode()?;
        self.fee_token.try_encode()?;
        try_pack_fee_amount(&self.fee)?;
        Ok(())
    }
}

impl ZkSignatureTx for ForcedExit {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }
}
