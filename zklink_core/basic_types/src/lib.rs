//! The declaration of the most primitive types used in zklink network.
//! Hashes and wide integers are re-exported from the `ethers` crate.

#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Deref, DerefMut, Sub};
use std::str::FromStr;

pub use ethers::types::{Address, H160, H256, U256};

basic_type!(
    /// Unique identifier of the order slot of a sub-account.
    SlotId,
    u32
);

basic_type!(
    /// Unique identifier of the token in the zklink network.
    TokenId,
    u32
);

basic_type!(
    /// unix timestamp in seconds
    TimeStamp,
    u32
);

basic_type!(
    /// Unique identifier of the account in the zklink network.
    AccountId,
    u32
);

basic_type!(
    /// zklink account nonce.
    Nonce,
    u32
);

basic_type!(
    /// Unique identifier of the chain in the network
    ChainId,
    u8
);

basic_type!(
    /// Unique identifier of the SubAccount in the network
    SubAccountId,
    u8
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_serde_is_transparent_number() {
        let account_id = AccountId(10);
        let json = serde_json::to_string(&account_id).unwrap();
        assert_eq!(json, "10");
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, account_id);
    }

    #[test]
    fn test_basic_type_from_str_and_display() {
        let nonce: Nonce = "42".parse().unwrap();
        assert_eq!(nonce, Nonce(42));
        assert_eq!(nonce.to_string(), "42");
        assert!("-1".parse::<SubAccountId>().is_err());
        assert!("256".parse::<ChainId>().is_err());
    }

    #[test]
    fn test_basic_type_arithmetic() {
        assert_eq!(Nonce(1) + 1, Nonce(2));
        assert_eq!(TokenId(18) - 1, TokenId(17));
        assert_eq!(*TimeStamp::from(7u8), 7u32);
        assert_eq!(u64::from(AccountId(3)), 3u64);
    }
}
