use zklink_basic_types::{AccountId, ChainId, Nonce, SlotId, SubAccountId, TokenId};

/// Maximum precision of token amount
pub const TOKEN_MAX_PRECISION: u64 = 18;

/// Depth of sub-account tree allowed (be used for multiple different partition dex).
pub const SUB_ACCOUNT_TREE_DEPTH: usize = 5;
/// Depth of the balance subtree for each account.
pub const BALANCE_SUB_TREE_DEPTH: usize = 16;
/// Depth of the orders subtree for each account.
pub const ORDER_SUB_TREE_DEPTH: usize = 16;
pub const CHAIN_SUB_TREE_DEPTH: usize = SUB_ACCOUNT_TREE_DEPTH;
pub const USED_ACCOUNT_SUBTREE_DEPTH: usize = 24;

pub const MAX_ACCOUNT_ID: AccountId = AccountId(u32::pow(2, USED_ACCOUNT_SUBTREE_DEPTH as u32) - 1);
pub const MAX_SUB_ACCOUNT_ID: SubAccountId =
    SubAccountId(u8::pow(2, SUB_ACCOUNT_TREE_DEPTH as u32) - 1);
/// Maximum number of chains allowed => The width of every token chain partition.
pub const MAX_CHAIN_ID: ChainId = ChainId(u8::pow(2, CHAIN_SUB_TREE_DEPTH as u32) - 1);
/// uint16 is used as token id type in Contract, so the max token id can be used is 2^16-1=65535
pub const MAX_REAL_TOKEN_ID: TokenId = TokenId(u32::pow(2, BALANCE_SUB_TREE_DEPTH as u32) - 1);
/// one slot is a leaf of order subtree, slot number = 2 ^ ORDER_SUB_TREE_DEPTH - 1
pub const MAX_REAL_SLOT_ID: SlotId = SlotId(u32::pow(2, ORDER_SUB_TREE_DEPTH as u32) - 1);
pub const MAX_NONCE: Nonce = Nonce(u32::MAX);

pub const CHAIN_ID_BIT_WIDTH: usize = 8;
pub const ACCOUNT_ID_BIT_WIDTH: usize = 32;
pub const SUB_ACCOUNT_ID_BIT_WIDTH: usize = 8;
pub const TOKEN_BIT_WIDTH: usize = 16;
pub const TX_TYPE_BIT_WIDTH: usize = 8;
pub const SLOT_BIT_WIDTH: usize = 16;
pub const NONCE_BIT_WIDTH: usize = 32;
/// Order nonce bit width
pub const ORDER_NONCE_BIT_WIDTH: usize = 24;
pub const ORDER_NONCE_BYTES: usize = ORDER_NONCE_BIT_WIDTH / 8;
pub const SERIAL_ID_BIT_WIDTH: usize = 64;
pub const SIMP_TIMESTAMP_BIT_WIDTH: usize = 4 * 8;
/// balance bit width
pub const BALANCE_BIT_WIDTH: usize = 128;
pub const FEE_RATIO_BIT_WIDTH: usize = 8;

pub const PRICE_BIT_WIDTH: usize = 120;
pub const PRICE_BYTES: usize = PRICE_BIT_WIDTH / 8;
pub const MIN_PRICE: u128 = 1;
/// deciamls of price in order will be improved with TOKEN_MAX_PRECISION(18)
/// the bit width of price in pubdata is PRICE_BIT_WIDTH(120)
/// so the max price of price that order can submit is
/// 2 ** 120 - 1 / 10 ^18 = 1329227995784915872
pub const MAX_PRICE: u128 = 1329227995784915872000000000000000000;

/// Amount bit widths
pub const AMOUNT_BIT_WIDTH: usize = AMOUNT_EXPONENT_BIT_WIDTH + AMOUNT_MANTISSA_BIT_WIDTH;
pub const AMOUNT_EXPONENT_BIT_WIDTH: usize = 5;
pub const AMOUNT_MANTISSA_BIT_WIDTH: usize = 35;

/// Fee bit widths
pub const FEE_BIT_WIDTH: usize = FEE_EXPONENT_BIT_WIDTH + FEE_MANTISSA_BIT_WIDTH;
pub const FEE_EXPONENT_BIT_WIDTH: usize = 5;
pub const FEE_MANTISSA_BIT_WIDTH: usize = 11;

pub const FR_ADDRESS_LEN: usize = 20;
pub const NEW_PUBKEY_HASH_WIDTH: usize = FR_ADDRESS_LEN * 8;
/// Layer-1 addresses are left padded to this width when serialized.
pub const TX_ADDRESS_BYTES: usize = 32;

/// Size of the data that is signed for transfer tx
pub const SIGNED_TRANSFER_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + 2 * SUB_ACCOUNT_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + TOKEN_BIT_WIDTH
    + AMOUNT_BIT_WIDTH
    + FEE_BIT_WIDTH
    + NONCE_BIT_WIDTH
    + SIMP_TIMESTAMP_BIT_WIDTH;

/// Size of the data that is signed for withdraw tx
pub const SIGNED_WITHDRAW_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + CHAIN_ID_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + 2 * TOKEN_BIT_WIDTH
    + BALANCE_BIT_WIDTH
    + FEE_BIT_WIDTH
    + NONCE_BIT_WIDTH
    + 8 // fast withdraw
    + 16 // withdraw fee ratio
    + SIMP_TIMESTAMP_BIT_WIDTH;

/// Size of the data that is signed for forced exit tx
pub const SIGNED_FORCED_EXIT_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + CHAIN_ID_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + 2 * SUB_ACCOUNT_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + 3 * TOKEN_BIT_WIDTH
    + FEE_BIT_WIDTH
    + NONCE_BIT_WIDTH
    + SIMP_TIMESTAMP_BIT_WIDTH;

/// Size of the data that is signed for change pubkey tx
pub const SIGNED_CHANGE_PUBKEY_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + CHAIN_ID_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + NEW_PUBKEY_HASH_WIDTH
    + TOKEN_BIT_WIDTH
    + FEE_BIT_WIDTH
    + NONCE_BIT_WIDTH
    + SIMP_TIMESTAMP_BIT_WIDTH;

/// Size of the data that is signed for order_matching tx
pub const SIGNED_ORDER_MATCHING_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + 256 // orders hash
    + TOKEN_BIT_WIDTH
    + FEE_BIT_WIDTH
    + 2 * BALANCE_BIT_WIDTH;

/// Size of the data that is signed for order
pub const SIGNED_ORDER_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + SLOT_BIT_WIDTH
    + ORDER_NONCE_BIT_WIDTH
    + 2 * TOKEN_BIT_WIDTH
    + PRICE_BIT_WIDTH
    + 8 // order -> is_sell
    + 2 * FEE_RATIO_BIT_WIDTH
    + AMOUNT_BIT_WIDTH;

/// Size of the data that is signed for deposit priority op
pub const DEPOSIT_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + CHAIN_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + 2 * TOKEN_BIT_WIDTH
    + BALANCE_BIT_WIDTH
    + SERIAL_ID_BIT_WIDTH
    + 256; // eth hash

/// Size of the data that is signed for full exit priority op
pub const FULL_EXIT_BIT_WIDTH: usize = TX_TYPE_BIT_WIDTH
    + CHAIN_ID_BIT_WIDTH
    + ACCOUNT_ID_BIT_WIDTH
    + SUB_ACCOUNT_ID_BIT_WIDTH
    + TX_ADDRESS_BYTES * 8
    + 2 * TOKEN_BIT_WIDTH
    + SERIAL_ID_BIT_WIDTH
    + 256; // eth hash

pub const ORDERS_BIT_WIDTH: usize = 1424;
pub const ORDERS_BYTES: usize = ORDERS_BIT_WIDTH / 8;

/// 0 can not be used as token id
pub const TOKEN_ID_ZERO: u32 = 0;
pub const USD_TOKEN_ID: u32 = 1;
pub const USDX_TOKEN_ID_LOWER_BOUND: u32 = USD_TOKEN_ID + 1;
pub const USDX_TOKEN_ID_UPPER_BOUND: u32 = 16;
pub const USDX_TOKEN_ID_RANGE: u32 = USDX_TOKEN_ID_UPPER_BOUND - USDX_TOKEN_ID_LOWER_BOUND + 1;
pub const MAX_USD_TOKEN_ID: u32 = USDX_TOKEN_ID_UPPER_BOUND + USDX_TOKEN_ID_RANGE;

/// Test usd token[17-31]
pub fn is_usd_token(token_id: &TokenId) -> bool {
    token_id.0 > USDX_TOKEN_ID_UPPER_BOUND && token_id.0 <= MAX_USD_TOKEN_ID
}

/// USD_X = X - 15, `None` for tokens below the stable coin range.
pub fn get_usd_mapping_token(token_id: &TokenId) -> Option<TokenId> {
    token_id.0.checked_sub(USDX_TOKEN_ID_RANGE).map(TokenId)
}

/// The account used to store the remaining assets of the tokens for contracts of layer1.
/// No layer-2 transaction may be issued by or sent to it.
pub const GLOBAL_ASSET_ACCOUNT_ID: AccountId = AccountId(1);

/// All fee related values
pub const FEE_PRECISION: u64 = 4;
pub const FEE_DENOMINATOR: usize = 10usize.pow(FEE_PRECISION as u32);

/// The message signed by a layer-1 key to derive its layer-2 Musig key.
pub const ZKLINK_SIGNER_SEED_MESSAGE: &str = "Sign this message to create a key to interact with zkLink's layer2 services.\nNOTE: This application is powered by zkLink protocol.\n\nOnly sign this message for a trusted client!";

/// EIP-712 domain of the main contract.
pub const EIP712_DOMAIN_NAME: &str = "ZkLink";
pub const EIP712_DOMAIN_VERSION: &str = "1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_bit_widths_are_byte_aligned() {
        for width in [
            SIGNED_TRANSFER_BIT_WIDTH,
            SIGNED_WITHDRAW_BIT_WIDTH,
            SIGNED_FORCED_EXIT_BIT_WIDTH,
            SIGNED_CHANGE_PUBKEY_BIT_WIDTH,
            SIGNED_ORDER_MATCHING_BIT_WIDTH,
            SIGNED_ORDER_BIT_WIDTH,
            DEPOSIT_BIT_WIDTH,
            FULL_EXIT_BIT_WIDTH,
        ] {
            assert_eq!(width % 8, 0);
        }
        assert_eq!(SIGNED_TRANSFER_BIT_WIDTH / 8, 56);
        assert_eq!(SIGNED_ORDER_BIT_WIDTH / 8, 38);
    }

    #[test]
    fn test_usd_token_mapping() {
        assert!(is_usd_token(&TokenId(17)));
        assert!(is_usd_token(&TokenId(31)));
        assert!(!is_usd_token(&TokenId(16)));
        assert!(!is_usd_token(&TokenId(32)));
        assert_eq!(get_usd_mapping_token(&TokenId(17)), Some(TokenId(2)));
        assert_eq!(get_usd_mapping_token(&TokenId(3)), None);
    }
}
