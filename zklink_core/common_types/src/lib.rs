//! zkLink layer-2 transaction types: typed transactions, their canonical byte
//! encoding, validation and signature checks.
//!
//! Transactions are created through the `XxxBuilder` structs, which validate the
//! parameters, and are signed with [`ZkSignatureTx::sign`]:
//!
//! ```
//! use num::BigUint;
//! use std::str::FromStr;
//! use zklink_types::*;
//! use zklink_crypto::ZkLinkSigner;
//!
//! let signer = ZkLinkSigner::new_from_seed(&[7u8; 32]).unwrap();
//! let transfer = TransferBuilder {
//!     account_id: AccountId(10),
//!     to_address: ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9").unwrap(),
//!     from_sub_account_id: SubAccountId(1),
//!     to_sub_account_id: SubAccountId(1),
//!     token: TokenId(18),
//!     amount: BigUint::from(10000u32),
//!     fee: BigUint::from(3u32),
//!     nonce: Nonce(1),
//!     ts: None,
//! }
//! .build()
//! .unwrap()
//! .sign(&signer)
//! .unwrap();
//! assert!(transfer.is_signature_valid());
//! ```

pub mod clock;
pub mod codec;
pub mod error;
pub mod helpers;
pub mod layer_one;
pub mod tx;
pub mod utils;

pub use zklink_basic_types::*;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::codec::FieldCodec;
pub use self::error::{TxError, TypeError};
pub use self::layer_one::ZkLinkAddress;
pub use self::tx::{
    ChangePubKey, ChangePubKeyAuthData, ChangePubKeyBuilder, Create2Data, Deposit, DepositBuilder,
    EthECDSAData, ForcedExit, ForcedExitBuilder, FullExit, FullExitBuilder, Order, OrderBuilder,
    OrderMatching, OrderMatchingBuilder, Transfer, TransferBuilder, TxBytes, TxHash, Withdraw,
    WithdrawBuilder, ZkLinkTx, ZkLinkTxType, ZkSignatureTx,
};
pub use zklink_crypto::{PackedEthSignature, PackedPublicKey, PubKeyHash, ZkLinkSignature};
