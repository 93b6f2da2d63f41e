//! Utilities used in tx module.

use crate::ZkLinkAddress;
use num::{BigUint, Zero};
use zklink_basic_types::TokenId;
use zklink_crypto::params::{
    get_usd_mapping_token, is_usd_token, USDX_TOKEN_ID_LOWER_BOUND, USDX_TOKEN_ID_UPPER_BOUND,
    USD_TOKEN_ID,
};
use zklink_utils::format_units;

/// Construct the first part of the message that should be signed by Ethereum key.
/// The pattern is as follows:
///
/// [{Transfer/Withdraw} {amount} {token} to: {to_address}]
/// [Fee: {fee} {token}]
///
/// Note that both lines are optional.
pub fn ethereum_sign_message_part(
    transaction: &str,
    token_symbol: &str,
    decimals: u8,
    amount: &BigUint,
    fee: &BigUint,
    to: &ZkLinkAddress,
) -> String {
    let mut message = if !amount.is_zero() {
        format!(
            "{transaction} {amount} {token_symbol} to: {to}",
            amount = format_units(amount, decimals),
        )
    } else {
        String::new()
    };
    if !fee.is_zero() {
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(&format!(
            "Fee: {fee} {token_symbol}",
            fee = format_units(fee, decimals)
        ));
    }
    message
}

/// Check l1 token(deposited from layer one or withdraw to layer one) and l2 token(token exist in layer two)
/// Returns whether the pair is allowed and the layer two token that `l1_token` maps to.
///
/// Stable coins [17, 31] may be mapped to USD(1) through their USD_X token `l1_token - 15`.
pub fn check_source_token_and_target_token(l2_token: TokenId, l1_token: TokenId) -> (bool, TokenId) {
    if *l2_token == USD_TOKEN_ID {
        match get_usd_mapping_token(&l1_token) {
            Some(mapped) if is_usd_token(&l1_token) => (true, mapped),
            _ => (false, l1_token),
        }
    } else if (USDX_TOKEN_ID_LOWER_BOUND..=USDX_TOKEN_ID_UPPER_BOUND).contains(&*l2_token) {
        (false, l1_token)
    } else {
        (l2_token == l1_token, l1_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_token_mapping() {
        assert_eq!(
            check_source_token_and_target_token(TokenId(1), TokenId(17)),
            (true, TokenId(2))
        );
        assert_eq!(
            check_source_token_and_target_token(TokenId(1), TokenId(31)),
            (true, TokenId(16))
        );
        assert!(!check_source_token_and_target_token(TokenId(1), TokenId(32)).0);
        // no underflow for small l1 tokens
        assert_eq!(
            check_source_token_and_target_token(TokenId(1), TokenId(2)),
            (false, TokenId(2))
        );
        assert!(!check_source_token_and_target_token(TokenId(5), TokenId(5)).0);
        assert!(check_source_token_and_target_token(TokenId(18), TokenId(18)).0);
        assert!(!check_source_token_and_target_token(TokenId(18), TokenId(19)).0);
    }

    #[test]
    fn test_ethereum_sign_message_part() {
        let to = ZkLinkAddress::from_str("0xafaff3ad1a0425d792432d9ecd1c3e26ef2c42e9").unwrap();
        let message = ethereum_sign_message_part(
            "Transfer",
            "USDT",
            6,
            &BigUint::from(1_500_000u32),
            &BigUint::from(3u32),
            &to,
        );
        assert_eq!(
            message,
            "Transfer 1.5 USDT to: 0xafaff3ad1a0425d792432d9ecd1c3e26ef2c42e9\nFee: 0.000003 USDT"
        );
        let fee_only =
            ethereum_sign_message_part("Withdraw", "ETH", 18, &BigUint::zero(), &BigUint::from(1u8), &to);
        assert_eq!(fee_only, "Fee: 0.000000000000000001 ETH");
    }
}
