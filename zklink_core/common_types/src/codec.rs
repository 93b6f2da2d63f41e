//! Fixed-width big-endian encoding of the primitive fields of transactions.

use crate::error::TypeError;
use crate::layer_one::ZkLinkAddress;
use num::BigUint;
use zklink_basic_types::{AccountId, ChainId, Nonce, SlotId, SubAccountId, TimeStamp, TokenId, H256};
use zklink_crypto::params::{
    MAX_ACCOUNT_ID, MAX_CHAIN_ID, MAX_SUB_ACCOUNT_ID, TX_ADDRESS_BYTES,
};
use zklink_crypto::PubKeyHash;

/// A field with a fixed wire width.
pub trait FieldCodec: Sized {
    /// Number of bytes produced by `encode`.
    const BYTES: usize;

    fn encode(&self) -> Vec<u8>;

    /// Like `encode`, but fails when the value is outside the range `decode` accepts.
    fn try_encode(&self) -> Result<Vec<u8>, TypeError> {
        Ok(self.encode())
    }

    fn decode(bytes: &[u8]) -> Result<Self, TypeError>;
}

fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], TypeError> {
    bytes
        .try_into()
        .map_err(|_| TypeError::malformed(field, format!("expected {} bytes, got {}", N, bytes.len())))
}

/// Implements the codec for an identifier newtype, carried on the wire as `$wire`
/// and valid only up to `$max`. `encode` keeps the low bytes of larger values.
macro_rules! impl_id_codec {
    ($name:ident, $wire:ty, $max:expr) => {
        impl FieldCodec for $name {
            const BYTES: usize = std::mem::size_of::<$wire>();

            fn encode(&self) -> Vec<u8> {
                (self.0 as $wire).to_be_bytes().to_vec()
            }

            #[allow(clippy::useless_conversion)]
            fn try_encode(&self) -> Result<Vec<u8>, TypeError> {
                <$wire>::try_from(self.0)
                    .ok()
                    .filter(|raw| u64::from(*raw) <= $max as u64)
                    .map(|raw| raw.to_be_bytes().to_vec())
                    .ok_or_else(|| {
                        TypeError::malformed(
                            stringify!($name),
                            format!("{} exceeds {}", self.0, $max),
                        )
                    })
            }

            fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
                let raw = <$wire>::from_be_bytes(fixed(stringify!($name), bytes)?);
                if raw as u64 > $max as u64 {
                    return Err(TypeError::malformed(
                        stringify!($name),
                        format!("{} exceeds {}", raw, $max),
                    ));
                }
                Ok(Self(raw.into()))
            }
        }
    };
}

impl_id_codec!(ChainId, u8, MAX_CHAIN_ID.0);
impl_id_codec!(AccountId, u32, MAX_ACCOUNT_ID.0);
impl_id_codec!(SubAccountId, u8, MAX_SUB_ACCOUNT_ID.0);
impl_id_codec!(TokenId, u16, u16::MAX);
impl_id_codec!(SlotId, u16, u16::MAX);
impl_id_codec!(Nonce, u32, u32::MAX);
impl_id_codec!(TimeStamp, u32, u32::MAX);

macro_rules! impl_primitive_codec {
    ($($ty:ty),+) => {
        $(
            impl FieldCodec for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();

                fn encode(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }

                fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
                    Ok(<$ty>::from_be_bytes(fixed(stringify!($ty), bytes)?))
                }
            }
        )+
    };
}

impl_primitive_codec!(u8, u16, u64);

impl FieldCodec for ZkLinkAddress {
    const BYTES: usize = TX_ADDRESS_BYTES;

    fn encode(&self) -> Vec<u8> {
        self.to_fixed_bytes().to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
        let padded: [u8; TX_ADDRESS_BYTES] = fixed("address", bytes)?;
        let (padding, address) = padded.split_at(TX_ADDRESS_BYTES - ZkLinkAddress::LEN);
        if padding.iter().any(|b| *b != 0) {
            return Err(TypeError::malformed("address", "non-zero padding"));
        }
        ZkLinkAddress::from_slice(address)
    }
}

impl FieldCodec for PubKeyHash {
    const BYTES: usize = 20;

    fn encode(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
        Ok(PubKeyHash {
            data: fixed("pubkey hash", bytes)?,
        })
    }
}

impl FieldCodec for H256 {
    const BYTES: usize = 32;

    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
        Ok(H256(fixed("hash", bytes)?))
    }
}

pub const RAW_AMOUNT_BYTES: usize = 16;

/// The low `width` bytes of `value`, big-endian and zero padded in front.
pub fn biguint_to_be_fixed(value: &BigUint, width: usize) -> Vec<u8> {
    let le = value.to_bytes_le();
    let mut out = vec![0u8; width];
    for (i, byte) in le.iter().take(width).enumerate() {
        out[width - 1 - i] = *byte;
    }
    out
}

/// Encodes an unpacked amount as a 16-byte big-endian integer. Bits above 128 are dropped.
pub fn encode_raw_amount(amount: &BigUint) -> Vec<u8> {
    biguint_to_be_fixed(amount, RAW_AMOUNT_BYTES)
}

/// Encodes an unpacked amount, failing with `AmountTooLarge` above `u128::MAX`.
pub fn try_encode_raw_amount(amount: &BigUint) -> Result<Vec<u8>, TypeError> {
    if amount.bits() > (RAW_AMOUNT_BYTES * 8) as u64 {
        return Err(TypeError::AmountTooLarge(amount.clone()));
    }
    Ok(encode_raw_amount(amount))
}

pub fn decode_raw_amount(bytes: &[u8]) -> Result<BigUint, TypeError> {
    let raw: [u8; RAW_AMOUNT_BYTES] = fixed("amount", bytes)?;
    Ok(BigUint::from(u128::from_be_bytes(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use std::str::FromStr;

    fn assert_round_trip<T: FieldCodec + PartialEq + Debug>(value: T) {
        let encoded = value.encode();
        assert_eq!(encoded.len(), T::BYTES);
        assert_eq!(T::decode(&encoded).unwrap(), value);
        assert!(T::decode(&encoded[1..]).is_err());
    }

    #[test]
    fn test_round_trips() {
        assert_round_trip(ChainId(31));
        assert_round_trip(AccountId(10));
        assert_round_trip(MAX_ACCOUNT_ID);
        assert_round_trip(SubAccountId(1));
        assert_round_trip(TokenId(65535));
        assert_round_trip(SlotId(7));
        assert_round_trip(Nonce(u32::MAX));
        assert_round_trip(TimeStamp(1693472232));
        assert_round_trip(42u8);
        assert_round_trip(513u16);
        assert_round_trip(u64::MAX - 1);
        assert_round_trip(
            ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9").unwrap(),
        );
        assert_round_trip(PubKeyHash { data: [9u8; 20] });
        assert_round_trip(H256::repeat_byte(0x5a));
    }

    #[test]
    fn test_big_endian_layout() {
        assert_eq!(AccountId(10).encode(), vec![0, 0, 0, 10]);
        assert_eq!(TokenId(18).encode(), vec![0, 18]);
        assert_eq!(TimeStamp(1693472232).encode(), vec![100, 240, 85, 232]);
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(ChainId::decode(&[32]).is_err());
        assert!(SubAccountId::decode(&[32]).is_err());
        assert!(AccountId::decode(&[1, 0, 0, 0]).is_err());
        let mut padded = [0u8; 32];
        padded[0] = 1;
        assert!(matches!(
            ZkLinkAddress::decode(&padded),
            Err(TypeError::MalformedField { field: "address", .. })
        ));
    }

    #[test]
    fn test_try_encode_rejects_what_decode_rejects() {
        assert_eq!(TokenId(65535).try_encode().unwrap(), vec![255, 255]);
        assert_eq!(SlotId(0).try_encode().unwrap(), vec![0, 0]);
        assert_eq!(MAX_CHAIN_ID.try_encode().unwrap(), vec![31]);
        assert_eq!(Nonce(u32::MAX).try_encode().unwrap(), u32::MAX.to_be_bytes().to_vec());

        let out_of_range: Vec<(Result<Vec<u8>, TypeError>, &str)> = vec![
            (TokenId(65536).try_encode(), "TokenId"),
            (SlotId(70_000).try_encode(), "SlotId"),
            (ChainId(32).try_encode(), "ChainId"),
            (SubAccountId(255).try_encode(), "SubAccountId"),
            (AccountId(MAX_ACCOUNT_ID.0 + 1).try_encode(), "AccountId"),
        ];
        for (encoded, name) in out_of_range {
            assert!(
                matches!(encoded, Err(TypeError::MalformedField { field, .. }) if field == name),
                "{name}"
            );
        }
        // plain encode keeps the low bytes
        assert_eq!(TokenId(65536).encode(), vec![0, 0]);
    }

    #[test]
    fn test_try_encode_raw_amount() {
        let max = BigUint::from(u128::MAX);
        assert_eq!(try_encode_raw_amount(&max).unwrap(), vec![0xff; RAW_AMOUNT_BYTES]);
        let too_big = &max + 1u32;
        assert_eq!(
            try_encode_raw_amount(&too_big),
            Err(TypeError::AmountTooLarge(too_big.clone()))
        );
    }

    #[test]
    fn test_raw_amount() {
        let amount = BigUint::from(u128::MAX);
        assert_eq!(decode_raw_amount(&encode_raw_amount(&amount)).unwrap(), amount);
        // only the low 128 bits are kept
        let wide = (BigUint::from(1u8) << 128) + BigUint::from(5u8);
        assert_eq!(decode_raw_amount(&encode_raw_amount(&wide)).unwrap(), BigUint::from(5u8));
        assert!(decode_raw_amount(&[0u8; 15]).is_err());
        assert_eq!(
            biguint_to_be_fixed(&BigUint::from(0x0102u32), 4),
            vec![0, 0, 1, 2]
        );
    }
}
