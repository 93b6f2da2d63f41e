use num::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Used to serialize BigUint as radix 10 string.
#[derive(Clone, Debug)]
pub struct BigUintSerdeAsRadix10Str;

impl BigUintSerdeAsRadix10Str {
    pub fn serialize<S>(val: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let big_dec = val.to_str_radix(10);
        String::serialize(&big_dec, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(&s).map_err(|e| D::Error::custom(format!("invalid BigUint string: {e}")))
    }
}

/// Serializes byte containers as `0x`-prefixed lowercase hex. Deserialization
/// accepts the string with or without the prefix.
pub struct ZeroPrefixHexSerde;

impl ZeroPrefixHexSerde {
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value.as_ref())))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: TryFrom<Vec<u8>>,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = decode_zero_prefix_hex(&s).map_err(D::Error::custom)?;
        let len = bytes.len();
        T::try_from(bytes).map_err(|_| D::Error::custom(format!("unexpected byte length {len}")))
    }
}

/// Decodes hex with an optional `0x` prefix.
pub fn decode_zero_prefix_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Wrapped {
        #[serde(with = "BigUintSerdeAsRadix10Str")]
        amount: BigUint,
        #[serde(with = "ZeroPrefixHexSerde")]
        data: [u8; 4],
    }

    #[test]
    fn test_wrappers_json() {
        let w = Wrapped {
            amount: BigUint::from(10_000u32),
            data: [0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"amount":"10000","data":"0xdeadbeef"}"#);

        let parsed: Wrapped = serde_json::from_str(r#"{"amount":"7","data":"01020304"}"#).unwrap();
        assert_eq!(parsed.amount, BigUint::from(7u8));
        assert_eq!(parsed.data, [1, 2, 3, 4]);
    }

    #[test]
    fn test_wrappers_reject_bad_input() {
        assert!(serde_json::from_str::<Wrapped>(r#"{"amount":"-1","data":"0x01020304"}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"amount":"1","data":"0x0102"}"#).is_err());
    }
}
