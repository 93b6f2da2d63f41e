use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zklink_basic_types::{AccountId, Nonce, SlotId, SubAccountId, TokenId};
use zklink_crypto::params::{
    ORDER_NONCE_BYTES, PRICE_BYTES, SIGNED_ORDER_BIT_WIDTH, SIGNED_ORDER_MATCHING_BIT_WIDTH,
};
use zklink_crypto::zklink_signer::utils::hash_orders;
use zklink_crypto::ZkLinkSignature;
use zklink_utils::{format_units, BigUintSerdeAsRadix10Str};

use crate::codec::{biguint_to_be_fixed, encode_raw_amount, try_encode_raw_amount, FieldCodec};
use crate::error::{TxError, TypeError};
use crate::helpers::{
    pack_fee_amount, pack_token_amount, try_pack_fee_amount, try_pack_token_amount,
};
use crate::tx::validators::*;
use crate::tx::{TxBytes, ZkSignatureTx};

/// `OrderMatching` transaction was used to match two orders.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderMatching {
    /// zklink network account ID of the transaction initiator.
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    /// all content of Taker and Maker orders
    #[validate]
    pub taker: Order,
    #[validate]
    pub maker: Order,
    /// Fee for the transaction, need packaging
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "fee_packable")]
    pub fee: BigUint,
    #[validate(custom = "token_validator")]
    pub fee_token: TokenId,
    /// The maximum base(quote) token amount that tx submitter expects to trade.
    ///
    /// These values bound the amount actually traded between maker and taker, so a
    /// dex submitting several matches against the same taker can cap each of them.
    /// Zero does not limit the trade. They are not packed: the difference of two
    /// packable amounts is not packable in general.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_unpackable")]
    pub expect_base_amount: BigUint,
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_unpackable")]
    pub expect_quote_amount: BigUint,
    /// Transaction zkLink signature of the submitter.
    #[serde(default)]
    pub signature: ZkLinkSignature,
}

/// Limit order signed by its owner, matched by `OrderMatching`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    #[validate(custom = "slot_id_validator")]
    pub slot_id: SlotId,
    #[validate(custom = "nonce_validator")]
    pub nonce: Nonce,
    #[validate(custom = "token_validator")]
    pub base_token_id: TokenId, // btc
    #[validate(custom = "token_validator")]
    pub quote_token_id: TokenId, // usdt
    /// The amount of base token buy or sell
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "amount_packable")]
    pub amount: BigUint,
    /// How much a quote token, accuracy will be improved
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "price_validator")]
    pub price: BigUint,
    /// Order type, 0: buy, 1: sell
    #[validate(custom = "boolean_validator")]
    pub is_sell: u8,
    /// Fee as maker, 100 means 1%, max is 2.56 %
    pub fee_ratio1: u8,
    /// Fee as taker
    pub fee_ratio2: u8,
    #[serde(default)]
    pub signature: ZkLinkSignature,
}

#[derive(Debug, Clone)]
pub struct OrderBuilder {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub slot_id: SlotId,
    pub nonce: Nonce,
    pub base_token_id: TokenId,
    pub quote_token_id: TokenId,
    pub amount: BigUint,
    pub price: BigUint,
    pub is_sell: bool,
    pub fee_ratio1: u8,
    pub fee_ratio2: u8,
}

impl OrderBuilder {
    pub fn build(self) -> Result<Order, TxError> {
        let order = Order::new(
            self.account_id,
            self.sub_account_id,
            self.slot_id,
            self.nonce,
            self.base_token_id,
            self.quote_token_id,
            self.amount,
            self.price,
            self.is_sell,
            self.fee_ratio1,
            self.fee_ratio2,
            None,
        );
        order.validate()?;
        Ok(order)
    }
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: AccountId,
        sub_account_id: SubAccountId,
        slot_id: SlotId,
        nonce: Nonce,
        base_token_id: TokenId,
        quote_token_id: TokenId,
        amount: BigUint,
        price: BigUint,
        is_sell: bool,
        fee_ratio1: u8,
        fee_ratio2: u8,
        signature: Option<ZkLinkSignature>,
    ) -> Self {
        Self {
            account_id,
            sub_account_id,
            slot_id,
            nonce,
            base_token_id,
            quote_token_id,
            amount,
            price,
            is_sell: u8::from(is_sell),
            fee_ratio1,
            fee_ratio2,
            signature: signature.unwrap_or_default(),
        }
    }

    pub fn get_ethereum_sign_message(
        &self,
        quote_token: &str,
        based_token: &str,
        decimals: u8,
    ) -> String {
        let mut message = if self.amount.is_zero() {
            format!("Limit order for {} -> {}\n", quote_token, based_token)
        } else {
            format!(
                "Order for {} {} -> {}\n",
                format_units(&self.amount, decimals),
                quote_token,
                based_token
            )
        };
        message += format!(
            "price: {price}\n\
            Nonce: {nonce}",
            price = self.price,
            nonce = self.nonce
        )
        .as_str();
        message
    }
}

impl TxBytes for Order {
    const TX_TYPE: u8 = 0xff;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_ORDER_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.account_id.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.slot_id.encode());
        // only the low bytes of the nonce are signed
        out.extend_from_slice(&self.nonce.encode()[Nonce::BYTES - ORDER_NONCE_BYTES..]);
        out.extend(self.base_token_id.encode());
        out.extend(self.quote_token_id.encode());
        out.extend(biguint_to_be_fixed(&self.price, PRICE_BYTES));
        out.extend(self.is_sell.encode());
        out.extend(self.fee_ratio1.encode());
        out.extend(self.fee_ratio2.encode());
        out.extend(pack_token_amount(&self.amount));
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.account_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.slot_id.try_encode()?;
        self.base_token_id.try_encode()?;
        self.quote_token_id.try_encode()?;
        if self.price.bits() > (PRICE_BYTES * 8) as u64 {
            return Err(TypeError::malformed("price", "exceeds the price width"));
        }
        try_pack_token_amount(&self.amount)?;
        Ok(())
    }
}

impl ZkSignatureTx for Order {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }
}

#[derive(Debug, Clone)]
pub struct OrderMatchingBuilder {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub taker: Order,
    pub maker: Order,
    pub fee: BigUint,
    pub fee_token: TokenId,
    pub expect_base_amount: BigUint,
    pub expect_quote_amount: BigUint,
}

impl OrderMatchingBuilder {
    pub fn build(self) -> Result<OrderMatching, TxError> {
        let tx = OrderMatching::new(
            self.account_id,
            self.sub_account_id,
            self.taker,
            self.maker,
            self.fee,
            self.fee_token,
            self.expect_base_amount,
            self.expect_quote_amount,
            None,
        );
        tx.validate()?;
        Ok(tx)
    }
}

impl OrderMatching {
    /// Creates transaction from all the required fields without validating them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: AccountId,
        sub_account_id: SubAccountId,
        taker: Order,
        maker: Order,
        fee: BigUint,
        fee_token: TokenId,
        expect_base_amount: BigUint,
        expect_quote_amount: BigUint,
        signature: Option<ZkLinkSignature>,
    ) -> Self {
        Self {
            account_id,
            sub_account_id,
            taker,
            maker,
            fee,
            fee_token,
            expect_base_amount,
            expect_quote_amount,
            signature: signature.unwrap_or_default(),
        }
    }

    /// Hash of `maker ‖ taker` order bytes.
    pub fn orders_hash(&self) -> [u8; 32] {
        let mut orders_bytes = self.maker.get_bytes();
        orders_bytes.extend(self.taker.get_bytes());
        hash_orders(&orders_bytes)
    }
}

impl TxBytes for OrderMatching {
    const TX_TYPE: u8 = 0x08;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_ORDER_MATCHING_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.account_id.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.orders_hash());
        out.extend(self.fee_token.encode());
        out.extend(pack_fee_amount(&self.fee));
        out.extend(encode_raw_amount(&self.expect_base_amount));
        out.extend(encode_raw_amount(&self.expect_quote_amount));
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.account_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.fee_token.try_encode()?;
        try_pack_fee_amount(&self.fee)?;
        try_encode_raw_amount(&self.expect_base_amount)?;
        try_encode_raw_amount(&self.expect_quote_amount)?;
        self.maker.check_encoding()?;
        self.taker.check_encoding()
    }
}

impl ZkSignatureTx for OrderMatching {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }

    /// The submitter signature and the signatures of both orders must hold.
    fn is_signature_valid(&self) -> bool {
        self.check_encoding().is_ok()
            && self
                .signature
                .verify_musig(&self.get_bytes())
                .unwrap_or(false)
            && self.maker.is_signature_valid()
            && self.taker.is_signature_valid()
    }
}
