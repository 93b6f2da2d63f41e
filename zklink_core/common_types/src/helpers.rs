//! Packing of token amounts and fees into the decimal float format of the protocol.
//!
//! A packed value is a big-endian bit string `mantissa ‖ exponent` standing for
//! `mantissa * 10^exponent`. Token amounts use a 35-bit mantissa, fees an 11-bit one,
//! both with a 5-bit exponent.

use crate::error::TypeError;
use num::{BigUint, One, ToPrimitive, Zero};
use zklink_crypto::params::{
    AMOUNT_BIT_WIDTH, AMOUNT_EXPONENT_BIT_WIDTH, AMOUNT_MANTISSA_BIT_WIDTH, FEE_BIT_WIDTH,
    FEE_EXPONENT_BIT_WIDTH, FEE_MANTISSA_BIT_WIDTH,
};

pub const AMOUNT_PACKED_BYTES: usize = AMOUNT_BIT_WIDTH / 8;
pub const FEE_PACKED_BYTES: usize = FEE_BIT_WIDTH / 8;

struct FloatFormat {
    exponent_len: usize,
    mantissa_len: usize,
    field: &'static str,
}

const TOKEN_FORMAT: FloatFormat = FloatFormat {
    exponent_len: AMOUNT_EXPONENT_BIT_WIDTH,
    mantissa_len: AMOUNT_MANTISSA_BIT_WIDTH,
    field: "amount",
};

const FEE_FORMAT: FloatFormat = FloatFormat {
    exponent_len: FEE_EXPONENT_BIT_WIDTH,
    mantissa_len: FEE_MANTISSA_BIT_WIDTH,
    field: "fee",
};

impl FloatFormat {
    fn bytes(&self) -> usize {
        (self.exponent_len + self.mantissa_len) / 8
    }

    fn max_exponent(&self) -> u64 {
        (1u64 << self.exponent_len) - 1
    }

    fn max_mantissa(&self) -> u64 {
        (1u64 << self.mantissa_len) - 1
    }

    fn max_value(&self) -> BigUint {
        BigUint::from(self.max_mantissa()) * BigUint::from(10u8).pow(self.max_exponent() as u32)
    }

    /// Divides by ten until the mantissa fits, dropping the remainder.
    /// Values above the representable range saturate at the largest packable value.
    fn pack(&self, number: &BigUint) -> Vec<u8> {
        let max_mantissa = BigUint::from(self.max_mantissa());
        let ten = BigUint::from(10u8);
        let mut mantissa = number.clone();
        let mut exponent = 0u64;
        while mantissa > max_mantissa && exponent < self.max_exponent() {
            mantissa /= &ten;
            exponent += 1;
        }
        let mantissa = mantissa.to_u64().unwrap_or(u64::MAX).min(self.max_mantissa());
        let encoded = (mantissa << self.exponent_len) | exponent;
        encoded.to_be_bytes()[8 - self.bytes()..].to_vec()
    }

    fn unpack(&self, data: &[u8]) -> Result<BigUint, TypeError> {
        if data.len() != self.bytes() {
            return Err(TypeError::malformed(
                self.field,
                format!("packed value must be {} bytes, got {}", self.bytes(), data.len()),
            ));
        }
        let mut buf = [0u8; 8];
        buf[8 - data.len()..].copy_from_slice(data);
        let encoded = u64::from_be_bytes(buf);
        let exponent = encoded & self.max_exponent();
        let mantissa = encoded >> self.exponent_len;
        Ok(BigUint::from(mantissa) * BigUint::from(10u8).pow(exponent as u32))
    }

    fn round_trips(&self, number: &BigUint) -> bool {
        self.unpack(&self.pack(number))
            .map(|unpacked| &unpacked == number)
            .unwrap_or(false)
    }
}

fn max_raw_amount() -> BigUint {
    (BigUint::one() << 128) - BigUint::one()
}

/// Largest token amount that is both packable and fits into `u128`.
pub fn max_packable_token_amount() -> BigUint {
    closest_packable_token_amount(&max_raw_amount())
}

pub fn max_packable_fee_amount() -> BigUint {
    FEE_FORMAT.max_value()
}

/// Checks whether the token amount can be packed (and thus used in the transaction).
pub fn is_token_amount_packable(amount: &BigUint) -> bool {
    *amount <= max_raw_amount() && TOKEN_FORMAT.round_trips(amount)
}

/// Checks whether the fee amount can be packed (and thus used in the transaction).
pub fn is_fee_amount_packable(amount: &BigUint) -> bool {
    FEE_FORMAT.round_trips(amount)
}

/// Returns the closest possible packable token amount, rounded down.
pub fn closest_packable_token_amount(amount: &BigUint) -> BigUint {
    let limited = amount.min(&max_raw_amount()).clone();
    unpack_token_amount(&TOKEN_FORMAT.pack(&limited)).unwrap_or_else(|_| BigUint::zero())
}

/// Returns the closest possible packable fee amount, rounded down.
pub fn closest_packable_fee_amount(fee: &BigUint) -> BigUint {
    unpack_fee_amount(&FEE_FORMAT.pack(fee)).unwrap_or_else(|_| BigUint::zero())
}

/// Packs the token amount, rounding it down to the closest packable value.
pub fn pack_token_amount(amount: &BigUint) -> Vec<u8> {
    TOKEN_FORMAT.pack(&closest_packable_token_amount(amount))
}

/// Packs the fee amount, rounding it down to the closest packable value.
pub fn pack_fee_amount(fee: &BigUint) -> Vec<u8> {
    FEE_FORMAT.pack(fee)
}

/// Packs the token amount, failing when the value would lose precision.
pub fn try_pack_token_amount(amount: &BigUint) -> Result<Vec<u8>, TypeError> {
    if is_token_amount_packable(amount) {
        Ok(TOKEN_FORMAT.pack(amount))
    } else {
        Err(TypeError::AmountTooLarge(amount.clone()))
    }
}

/// Packs the fee amount, failing when the value would lose precision.
pub fn try_pack_fee_amount(fee: &BigUint) -> Result<Vec<u8>, TypeError> {
    if is_fee_amount_packable(fee) {
        Ok(FEE_FORMAT.pack(fee))
    } else {
        Err(TypeError::AmountTooLarge(fee.clone()))
    }
}

pub fn unpack_token_amount(data: &[u8]) -> Result<BigUint, TypeError> {
    TOKEN_FORMAT.unpack(data)
}

pub fn unpack_fee_amount(data: &[u8]) -> Result<BigUint, TypeError> {
    FEE_FORMAT.unpack(data)
}
