use ethers::utils::keccak256;
use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zklink_basic_types::{AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId, H256};
use zklink_crypto::eth_signer::{change_pubkey_struct_hash, eip712_digest, Eip712Domain};
use zklink_crypto::params::SIGNED_CHANGE_PUBKEY_BIT_WIDTH;
use zklink_crypto::{PackedEthSignature, PubKeyHash, ZkLinkSignature, ZkLinkSigner};
use zklink_utils::{format_units, BigUintSerdeAsRadix10Str};

use crate::clock::{Clock, SystemClock};
use crate::codec::FieldCodec;
use crate::error::{TxError, TypeError};
use crate::helpers::{pack_fee_amount, try_pack_fee_amount};
use crate::tx::validators::*;
use crate::tx::{TxBytes, ZkSignatureTx};
use crate::ZkLinkAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthECDSAData {
    pub eth_signature: PackedEthSignature,
}

/// Parameters of a CREATE2 deployed account (a smart contract wallet whose
/// address commits to the new public key hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Create2Data {
    pub creator_address: ZkLinkAddress,
    pub salt_arg: H256,
    pub code_hash: H256,
}

impl Create2Data {
    /// `keccak256(0xff ‖ creator ‖ keccak256(salt_arg ‖ pubkey_hash) ‖ code_hash)[12..]`
    pub fn get_address(&self, pubkey_hash: &PubKeyHash) -> ZkLinkAddress {
        let salt = {
            let mut bytes = Vec::with_capacity(52);
            bytes.extend_from_slice(self.salt_arg.as_bytes());
            bytes.extend_from_slice(&pubkey_hash.data);
            keccak256(bytes)
        };

        let mut bytes = Vec::with_capacity(85);
        bytes.push(0xff);
        bytes.extend_from_slice(self.creator_address.as_bytes());
        bytes.extend_from_slice(&salt);
        bytes.extend_from_slice(self.code_hash.as_bytes());
        let hash = keccak256(bytes);
        let mut address = [0u8; ZkLinkAddress::LEN];
        address.copy_from_slice(&hash[12..]);
        ZkLinkAddress::from(address)
    }
}

/// Proof that the layer-1 owner of the account authorized the new public key hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangePubKeyAuthData {
    /// Authorized by a `setAuthPubkeyHash` call on the main contract.
    OnChain,
    /// EIP-712 signature of the account owner.
    EthECDSA(EthECDSAData),
    EthCREATE2(Create2Data),
}

impl ChangePubKeyAuthData {
    pub fn is_eth_ecdsa(&self) -> bool {
        matches!(self, ChangePubKeyAuthData::EthECDSA(..))
    }

    pub fn is_onchain(&self) -> bool {
        matches!(self, ChangePubKeyAuthData::OnChain)
    }

    pub fn is_create2(&self) -> bool {
        matches!(self, ChangePubKeyAuthData::EthCREATE2(..))
    }
}

/// `ChangePubKey` transaction is used to set the owner's public key hash
/// associated with the account.
///
/// Without public key hash set, account is unable to execute any L2 transactions.
/// The transaction moves through `unsigned -> auth data attached -> signed`:
/// auth data is attached once with [`ChangePubKey::with_auth_data`] and only then
/// the key owning `new_pk_hash` may sign it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKey {
    /// According to layer2 chain id , select eip712domain layer1 chain id.
    #[validate(custom = "chain_id_validator")]
    pub chain_id: ChainId,
    /// zklink network account ID to apply operation to.
    #[validate(custom = "account_validator")]
    pub account_id: AccountId,
    /// zklink network sub account ID to apply operation to.
    #[validate(custom = "sub_account_validator")]
    pub sub_account_id: SubAccountId,
    /// Public key hash to set.
    pub new_pk_hash: PubKeyHash,
    /// Token to be used for fee.
    #[validate(custom = "token_validator")]
    pub fee_token: TokenId,
    /// Fee for the transaction, need packaging
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    #[validate(custom = "fee_packable")]
    pub fee: BigUint,
    /// Current account nonce of account_id
    #[validate(custom = "nonce_validator")]
    pub nonce: Nonce,
    /// Transaction zkLink signature. Must be signed with the key corresponding to the
    /// `new_pk_hash` value. This signature is required to ensure that `fee_token` and `fee`
    /// fields can't be changed by an attacker.
    #[serde(default)]
    pub signature: ZkLinkSignature,
    /// Data needed to check if Ethereum address authorized ChangePubKey operation
    #[serde(default)]
    pub eth_auth_data: Option<ChangePubKeyAuthData>,
    /// Used as request id
    pub ts: TimeStamp,
}

#[derive(Debug, Clone)]
pub struct ChangePubKeyBuilder {
    pub chain_id: ChainId,
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub new_pubkey_hash: PubKeyHash,
    pub fee_token: TokenId,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub ts: Option<TimeStamp>,
}

impl ChangePubKeyBuilder {
    pub fn build(self) -> Result<ChangePubKey, TxError> {
        self.build_with_clock(&SystemClock)
    }

    pub fn build_with_clock(self, clock: &impl Clock) -> Result<ChangePubKey, TxError> {
        let ts = self.ts.unwrap_or_else(|| clock.now());
        let tx = ChangePubKey::new(
            self.chain_id,
            self.account_id,
            self.sub_account_id,
            self.new_pubkey_hash,
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

impl ChangePubKey {
    /// Creates an unsigned transaction without auth data and without validating it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: ChainId,
        account_id: AccountId,
        sub_account_id: SubAccountId,
        new_pk_hash: PubKeyHash,
        fee_token: TokenId,
        fee: BigUint,
        nonce: Nonce,
        signature: Option<ZkLinkSignature>,
        ts: TimeStamp,
    ) -> Self {
        Self {
            chain_id,
            account_id,
            sub_account_id,
            new_pk_hash,
            fee_token,
            fee,
            nonce,
            signature: signature.unwrap_or_default(),
            eth_auth_data: None,
            ts,
        }
    }

    /// Attaches the layer-1 authorization. It can be attached only once.
    pub fn with_auth_data(mut self, auth_data: ChangePubKeyAuthData) -> Result<Self, TxError> {
        if self.eth_auth_data.is_some() {
            return Err(TxError::AuthDataAlreadySet);
        }
        self.eth_auth_data = Some(auth_data);
        Ok(self)
    }

    pub fn is_onchain(&self) -> bool {
        matches!(self.eth_auth_data, Some(ChangePubKeyAuthData::OnChain))
    }

    /// EIP-712 digest the account owner signs for `EthECDSA` auth data.
    pub fn eth_signature_hash(
        &self,
        l1_client_id: u32,
        main_contract: &ZkLinkAddress,
    ) -> Result<H256, TxError> {
        let domain = Eip712Domain::new(l1_client_id, main_contract.as_bytes())?;
        let struct_hash =
            change_pubkey_struct_hash(&self.new_pk_hash.data, *self.nonce, *self.account_id);
        Ok(eip712_digest(&domain, &struct_hash))
    }

    /// Checks the layer-1 part of the authorization for the account owned by `layer_one_address`.
    ///
    /// `OnChain` is always accepted here, the contract checks it when the block is executed.
    pub fn is_eth_auth_data_valid(
        &self,
        l1_client_id: u32,
        main_contract: &ZkLinkAddress,
        layer_one_address: &ZkLinkAddress,
    ) -> bool {
        match &self.eth_auth_data {
            None => false,
            Some(ChangePubKeyAuthData::OnChain) => true,
            Some(ChangePubKeyAuthData::EthECDSA(EthECDSAData { eth_signature })) => self
                .eth_signature_hash(l1_client_id, main_contract)
                .ok()
                .and_then(|hash| eth_signature.signature_recover_signer(&hash).ok())
                .map(|recovered| ZkLinkAddress::from(recovered) == *layer_one_address)
                .unwrap_or(false),
            Some(ChangePubKeyAuthData::EthCREATE2(create2_data)) => {
                create2_data.get_address(&self.new_pk_hash) == *layer_one_address
            }
        }
    }

    /// Get part of the message that should be signed with Ethereum account key for the batch of transactions.
    /// The message for single `ChangePubKey` transaction is defined differently. The pattern is:
    ///
    /// Set signing key: {pubKeyHash}
    /// [Fee: {fee} {token}]
    ///
    /// Note that the second line is optional.
    pub fn get_ethereum_sign_message_part(&self, token_symbol: &str, decimals: u8) -> String {
        let mut message = format!("Set signing key: {}", hex::encode(self.new_pk_hash.data));
        if !self.fee.is_zero() {
            message.push_str(
                format!(
                    "\nFee: {fee} {token}",
                    fee = format_units(&self.fee, decimals),
                    token = token_symbol,
                )
                .as_str(),
            );
        }
        message
    }
}

impl TxBytes for ChangePubKey {
    const TX_TYPE: u8 = 0x06;

    fn get_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_CHANGE_PUBKEY_BIT_WIDTH / 8);
        out.push(Self::TX_TYPE);
        out.extend(self.chain_id.encode());
        out.extend(self.account_id.encode());
        out.extend(self.sub_account_id.encode());
        out.extend(self.new_pk_hash.encode());
        out.extend(self.fee_token.encode());
        out.extend(pack_fee_amount(&self.fee));
        out.extend(self.nonce.encode());
        out.extend(self.ts.encode());
        out
    }

    fn check_encoding(&self) -> Result<(), TypeError> {
        self.chain_id.try_encode()?;
        self.account_id.try_encode()?;
        self.sub_account_id.try_encode()?;
        self.fee_token.try_encode()?;
        try_pack_fee_amount(&self.fee)?;
        Ok(())
    }
}

impl ZkSignatureTx for ChangePubKey {
    fn signature(&self) -> &ZkLinkSignature {
        &self.signature
    }

    fn signature_mut(&mut self) -> &mut ZkLinkSignature {
        &mut self.signature
    }

    /// Requires auth data and a signer owning `new_pk_hash`.
    fn sign(mut self, signer: &ZkLinkSigner) -> Result<Self, TxError> {
        if self.eth_auth_data.is_none() {
            return Err(TxError::MissingAuthData);
        }
        if signer.public_key_hash() != self.new_pk_hash {
            return Err(TxError::IncorrectSigner);
        }
        self.check_encoding()?;
        self.signature = signer.sign_musig(&self.get_bytes())?;
        Ok(self)
    }

    fn is_signature_valid(&self) -> bool {
        self.eth_auth_data.is_some()
            && self.check_encoding().is_ok()
            && self.signature.pub_key.public_key_hash() == self.new_pk_hash
            && self
                .signature
                .verify_musig(&self.get_bytes())
                .unwrap_or(false)
    }
}
