//! Field validators plugged into `#[derive(Validate)]` of the transactions.
use crate::helpers::{is_fee_amount_packable, is_token_amount_packable};
use crate::utils::check_source_token_and_target_token;
use crate::ZkLinkAddress;
use num::BigUint;
use validator::ValidationError;
use zklink_basic_types::{AccountId, ChainId, Nonce, SlotId, SubAccountId, TokenId};
use zklink_crypto::params::{
    FEE_DENOMINATOR, GLOBAL_ASSET_ACCOUNT_ID, MAX_ACCOUNT_ID, MAX_CHAIN_ID, MAX_NONCE, MAX_PRICE,
    MAX_REAL_SLOT_ID, MAX_REAL_TOKEN_ID, MAX_SUB_ACCOUNT_ID, MIN_PRICE, TOKEN_ID_ZERO,
    USDX_TOKEN_ID_LOWER_BOUND, USDX_TOKEN_ID_UPPER_BOUND,
};

/// Check transaction account value validation
///
/// - account id should <= MAX_ACCOUNT_ID
/// - account id should not be GLOBAL_ASSET_ACCOUNT_ID(not invalid in transaction)
pub fn account_validator(account_id: &AccountId) -> Result<(), ValidationError> {
    if *account_id > MAX_ACCOUNT_ID {
        return Err(ValidationError::new("account id out of range"));
    }
    if *account_id == GLOBAL_ASSET_ACCOUNT_ID {
        return Err(ValidationError::new("account eq GLOBAL_ASSET_ACCOUNT_ID"));
    }
    Ok(())
}

/// - sub_account id should <= MAX_SUB_ACCOUNT_ID
pub fn sub_account_validator(sub_account_id: &SubAccountId) -> Result<(), ValidationError> {
    if *sub_account_id > MAX_SUB_ACCOUNT_ID {
        return Err(ValidationError::new("sub_account id out of range"));
    }
    Ok(())
}

/// Check layer1 unpackable amount value validation
///
/// - amount should <= u128::MAX
pub fn amount_unpackable(amount: &BigUint) -> Result<(), ValidationError> {
    if *amount > BigUint::from(u128::MAX) {
        return Err(ValidationError::new("amount out of range"));
    }
    Ok(())
}

/// Check layer1 packable amount value validation
///
/// - amount should <= u128::MAX
/// - amount should keep same after pack and unpack
pub fn amount_packable(amount: &BigUint) -> Result<(), ValidationError> {
    if !is_token_amount_packable(amount) {
        return Err(ValidationError::new("amount is not packable"));
    }
    Ok(())
}

/// - fee should <= 20470000000000000000000000000000000
/// - fee should keep same after pack and unpack
pub fn fee_packable(fee: &BigUint) -> Result<(), ValidationError> {
    if !is_fee_amount_packable(fee) {
        return Err(ValidationError::new("fee is not packable"));
    }
    Ok(())
}

/// Check token value validation
///
/// - token id should <= MAX_REAL_TOKEN_ID
/// - token id should not use 0 and [2,16]
pub fn token_validator(token_id: &TokenId) -> Result<(), ValidationError> {
    if *token_id > MAX_REAL_TOKEN_ID {
        return Err(ValidationError::new("token id out of range"));
    }
    if **token_id == TOKEN_ID_ZERO
        || (USDX_TOKEN_ID_LOWER_BOUND..=USDX_TOKEN_ID_UPPER_BOUND).contains(&**token_id)
    {
        return Err(ValidationError::new("token id should not use 0 or [2, 16]"));
    }
    Ok(())
}

/// Token pair of priority operations and withdrawals
///
/// - the layer one token is in range and not 0
/// - `l2_token` equals `l1_token` or is USD with `l1_token` a stable coin
pub fn token_pair_validator(l2_token: TokenId, l1_token: TokenId) -> Result<(), ValidationError> {
    if *l1_token > *MAX_REAL_TOKEN_ID || *l1_token == TOKEN_ID_ZERO {
        return Err(ValidationError::new("l1 token id out of range"));
    }
    if *l2_token > *MAX_REAL_TOKEN_ID {
        return Err(ValidationError::new("l2 token id out of range"));
    }
    let (is_required_tokens, _) = check_source_token_and_target_token(l2_token, l1_token);
    if !is_required_tokens {
        return Err(ValidationError::new("source token and target token mismatch"));
    }
    Ok(())
}

/// - zklink address should not be 0 and GLOBAL_ASSET_ACCOUNT_ADDRESS 0xffffffffffffffffffffffffffffffffffffffff
pub fn zklink_address_validator(zklink_address: &ZkLinkAddress) -> Result<(), ValidationError> {
    if zklink_address.is_zero() {
        return Err(ValidationError::new("zklink address is 0"));
    }
    if zklink_address.is_global_account_address() {
        return Err(ValidationError::new(
            "zklink address is global asset account address",
        ));
    }
    Ok(())
}

/// - chain id should <= MAX_CHAIN_ID
pub fn chain_id_validator(chain_id: &ChainId) -> Result<(), ValidationError> {
    if *chain_id > MAX_CHAIN_ID {
        return Err(ValidationError::new("chain id out of range"));
    }
    Ok(())
}

/// - boolean should be 0 or 1
pub fn boolean_validator(boolean: u8) -> Result<(), ValidationError> {
    if boolean > 1u8 {
        return Err(ValidationError::new("boolean value should be 0 or 1"));
    }
    Ok(())
}

/// - withdraw_fee_ratio should <= 10000
pub fn withdraw_fee_ratio_validator(withdraw_fee_ratio: u16) -> Result<(), ValidationError> {
    if withdraw_fee_ratio as usize > FEE_DENOMINATOR {
        return Err(ValidationError::new("withdraw fee ratio out of range"));
    }
    Ok(())
}

/// Check order matching price value validation
///
/// - price should > MIN_PRICE(1)
/// - price should < MAX_PRICE(\[(2 ** 120 - 1)/10 ^18\] * 10^18 = 1329227995784915872000000000000000000)
pub fn price_validator(price: &BigUint) -> Result<(), ValidationError> {
    if *price <= BigUint::from(MIN_PRICE) || *price >= BigUint::from(MAX_PRICE) {
        return Err(ValidationError::new("price value out of range"));
    }
    Ok(())
}

/// - slot_id should <= MAX_REAL_SLOT_ID
pub fn slot_id_validator(slot_id: &SlotId) -> Result<(), ValidationError> {
    if *slot_id > MAX_REAL_SLOT_ID {
        return Err(ValidationError::new("slot id out of range"));
    }
    Ok(())
}

/// - nonce should < MAX_NONCE
pub fn nonce_validator(nonce: &Nonce) -> Result<(), ValidationError> {
    if *nonce >= MAX_NONCE {
        return Err(ValidationError::new("The nonce has reached its maximum."));
    }
    Ok(())
}
