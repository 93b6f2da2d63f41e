use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use zklink_basic_types::Nonce;

use crate::tx::{
    ChangePubKey, Deposit, ForcedExit, FullExit, OrderMatching, Transfer, TxBytes, TxHash,
    Withdraw, ZkSignatureTx,
};

/// A set of L2 transaction type supported by the zklink network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZkLinkTxType {
    Deposit,
    FullExit,
    ChangePubKey,
    Transfer,
    Withdraw,
    ForcedExit,
    OrderMatching,
}

impl ZkLinkTxType {
    /// Leading byte of the canonical encoding.
    pub fn tx_type(&self) -> u8 {
        match self {
            ZkLinkTxType::Deposit => Deposit::TX_TYPE,
            ZkLinkTxType::FullExit => FullExit::TX_TYPE,
            ZkLinkTxType::ChangePubKey => ChangePubKey::TX_TYPE,
            ZkLinkTxType::Transfer => Transfer::TX_TYPE,
            ZkLinkTxType::Withdraw => Withdraw::TX_TYPE,
            ZkLinkTxType::ForcedExit => ForcedExit::TX_TYPE,
            ZkLinkTxType::OrderMatching => OrderMatching::TX_TYPE,
        }
    }

    /// Layer-1 priority operations carry no layer-2 signature.
    pub fn is_priority_op(&self) -> bool {
        matches!(self, ZkLinkTxType::Deposit | ZkLinkTxType::FullExit)
    }
}

/// A set of L2 transaction supported by the zklink network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ZkLinkTx {
    FullExit(Box<FullExit>),
    Deposit(Box<Deposit>),
    Transfer(Box<Transfer>),
    Withdraw(Box<Withdraw>),
    ChangePubKey(Box<ChangePubKey>),
    ForcedExit(Box<ForcedExit>),
    OrderMatching(Box<OrderMatching>),
}

impl From<FullExit> for ZkLinkTx {
    fn from(full_exit: FullExit) -> Self {
        Self::FullExit(Box::new(full_exit))
    }
}

impl From<Deposit> for ZkLinkTx {
    fn from(deposit: Deposit) -> Self {
        Self::Deposit(Box::new(deposit))
    }
}

impl From<Transfer> for ZkLinkTx {
    fn from(transfer: Transfer) -> Self {
        Self::Transfer(Box::new(transfer))
    }
}

impl From<Withdraw> for ZkLinkTx {
    fn from(withdraw: Withdraw) -> Self {
        Self::Withdraw(Box::new(withdraw))
    }
}

impl From<ChangePubKey> for ZkLinkTx {
    fn from(change_pub_key: ChangePubKey) -> Self {
        Self::ChangePubKey(Box::new(change_pub_key))
    }
}

impl From<ForcedExit> for ZkLinkTx {
    fn from(tx: ForcedExit) -> Self {
        Self::ForcedExit(Box::new(tx))
    }
}

impl From<OrderMatching> for ZkLinkTx {
    fn from(tx: OrderMatching) -> Self {
        Self::OrderMatching(Box::new(tx))
    }
}

impl ZkLinkTx {
    pub fn tx_type(&self) -> ZkLinkTxType {
        match self {
            ZkLinkTx::Transfer(_) => ZkLinkTxType::Transfer,
            ZkLinkTx::Withdraw(_) => ZkLinkTxType::Withdraw,
            ZkLinkTx::ChangePubKey(_) => ZkLinkTxType::ChangePubKey,
            ZkLinkTx::ForcedExit(_) => ZkLinkTxType::ForcedExit,
            ZkLinkTx::OrderMatching(_) => ZkLinkTxType::OrderMatching,
            ZkLinkTx::Deposit(_) => ZkLinkTxType::Deposit,
            ZkLinkTx::FullExit(_) => ZkLinkTxType::FullExit,
        }
    }

    /// Check tx format
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            ZkLinkTx::Transfer(tx) => tx.validate(),
            ZkLinkTx::Withdraw(tx) => tx.validate(),
            ZkLinkTx::ChangePubKey(tx) => tx.validate(),
            ZkLinkTx::ForcedExit(tx) => tx.validate(),
            ZkLinkTx::OrderMatching(tx) => tx.validate(),
            ZkLinkTx::Deposit(tx) => tx.validate(),
            ZkLinkTx::FullExit(tx) => tx.validate(),
        }
    }

    pub fn get_bytes(&self) -> Vec<u8> {
        match self {
            ZkLinkTx::Transfer(tx) => tx.get_bytes(),
            ZkLinkTx::Withdraw(tx) => tx.get_bytes(),
            ZkLinkTx::ChangePubKey(tx) => tx.get_bytes(),
            ZkLinkTx::ForcedExit(tx) => tx.get_bytes(),
            ZkLinkTx::Deposit(tx) => tx.get_bytes(),
            ZkLinkTx::FullExit(tx) => tx.get_bytes(),
            ZkLinkTx::OrderMatching(tx) => tx.get_bytes(),
        }
    }

    /// Returns the hash of the transaction.
    pub fn tx_hash(&self) -> TxHash {
        TxHash::hash(&self.get_bytes())
    }

    /// Priority operations are authorized on layer-1 and always pass.
    pub fn is_signature_valid(&self) -> bool {
        match self {
            ZkLinkTx::Transfer(tx) => tx.is_signature_valid(),
            ZkLinkTx::Withdraw(tx) => tx.is_signature_valid(),
            ZkLinkTx::ChangePubKey(tx) => tx.is_signature_valid(),
            ZkLinkTx::ForcedExit(tx) => tx.is_signature_valid(),
            ZkLinkTx::OrderMatching(tx) => tx.is_signature_valid(),
            ZkLinkTx::Deposit(_) | ZkLinkTx::FullExit(_) => true,
        }
    }

    /// Returns the account nonce associated with transaction.
    pub fn nonce(&self) -> Nonce {
        match self {
            ZkLinkTx::Transfer(tx) => tx.nonce,
            ZkLinkTx::Withdraw(tx) => tx.nonce,
            ZkLinkTx::ChangePubKey(tx) => tx.nonce,
            ZkLinkTx::ForcedExit(tx) => tx.nonce,
            ZkLinkTx::OrderMatching(_tx) => Nonce(u32::MAX),
            ZkLinkTx::FullExit(tx) => Nonce((tx.serial_id & 0xffffffff) as u32),
            ZkLinkTx::Deposit(tx) => Nonce((tx.serial_id & 0xffffffff) as u32),
        }
    }
}
