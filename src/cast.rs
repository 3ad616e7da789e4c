//! Conversions between `BigFloat` and the machine types, plus the
//! range-aware field accessors.
//!
//! The narrowing conversions follow the Java-style narrowing primitive
//! conversion rules: fractions truncate toward zero, infinities saturate
//! the integer types, NaN converts to zero, and oversized integers keep
//! only their low-order bits. Each has an `_exact` twin that reports lost
//! information as an error instead.

use core::cmp::Ordering;

use crate::bigint::{BigInt, LossFraction};
use crate::error::{Error, Result};
use crate::float::{BigFloat, Category};
use crate::format::{BinaryFormat, RoundingMode, BINARY32, BINARY64};
use crate::round::round_result;

impl From<f64> for BigFloat {
    /// Converts a `double` exactly. The result has 53 bits of precision.
    fn from(val: f64) -> Self {
        let bits = val.to_bits();
        let sign = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let frac = bits & ((1u64 << 52) - 1);
        if biased == 0x7ff {
            if frac == 0 {
                return BigFloat::inf(53, sign);
            }
            return BigFloat::nan(53, sign);
        }
        if biased == 0 && frac == 0 {
            return BigFloat::zero(53, sign);
        }
        let (mantissa, exp) = if biased == 0 {
            (frac, -1074)
        } else {
            (frac | 1 << 52, biased - 1075)
        };
        let mut res = BigFloat::raw(sign, exp, BigInt::from_u64(mantissa), 53, Category::Normal);
        res.align();
        res
    }
}

impl From<f32> for BigFloat {
    /// Converts a `float` exactly. The result has 24 bits of precision.
    fn from(val: f32) -> Self {
        let bits = val.to_bits();
        let sign = bits >> 31 == 1;
        let biased = ((bits >> 23) & 0xff) as i64;
        let frac = (bits & ((1u32 << 23) - 1)) as u64;
        if biased == 0xff {
            if frac == 0 {
                return BigFloat::inf(24, sign);
            }
            return BigFloat::nan(24, sign);
        }
        if biased == 0 && frac == 0 {
            return BigFloat::zero(24, sign);
        }
        let (mantissa, exp) = if biased == 0 {
            (frac, -149)
        } else {
            (frac | 1 << 23, biased - 150)
        };
        let mut res = BigFloat::raw(sign, exp, BigInt::from_u64(mantissa), 24, Category::Normal);
        res.align();
        res
    }
}

impl BigFloat {
    /// Converts a `double` and rounds it into `fmt`.
    pub fn try_from_f64(val: f64, fmt: &BinaryFormat) -> Result<Self> {
        Ok(round_result(Self::from(val), LossFraction::ExactlyZero, fmt)?.0)
    }

    /// Converts a `float` and rounds it into `fmt`.
    pub fn try_from_f32(val: f32, fmt: &BinaryFormat) -> Result<Self> {
        Ok(round_result(Self::from(val), LossFraction::ExactlyZero, fmt)?.0)
    }

    /// Converts an unsigned integer and rounds it into `fmt`.
    pub fn try_from_u64(val: u64, fmt: &BinaryFormat) -> Result<Self> {
        Self::try_from_bigint(false, &BigInt::from_u64(val), fmt)
    }

    /// Converts a signed integer and rounds it into `fmt`.
    pub fn try_from_i64(val: i64, fmt: &BinaryFormat) -> Result<Self> {
        Self::try_from_bigint(val < 0, &BigInt::from_u64(val.unsigned_abs()), fmt)
    }

    /// Converts a sign-and-magnitude integer and rounds it into `fmt`.
    pub fn try_from_bigint(sign: bool, value: &BigInt, fmt: &BinaryFormat) -> Result<Self> {
        if value.is_zero() {
            return Ok(Self::zero(fmt.precision(), sign));
        }
        let w = fmt.precision().max(value.msb_index() as u64);
        let val = Self::raw(sign, 0, value.clone(), w, Category::Normal);
        Ok(round_result(val, LossFraction::ExactlyZero, fmt)?.0)
    }

    /// Converts to a `double`, rounding to nearest. Values outside the
    /// binary64 range become infinities or (signed) zero.
    pub fn to_f64(&self) -> f64 {
        // The binary64 widened range always installs, so the pipeline
        // cannot fail here.
        let (v, _) = round_result(self.clone(), LossFraction::ExactlyZero, &BINARY64)
            .unwrap_or_else(|_| (Self::nan(53, false), false));
        let sign_bit = (v.sign as u64) << 63;
        match v.category {
            Category::NaN => f64::NAN,
            Category::Infinity => f64::from_bits(sign_bit | 0x7ff0_0000_0000_0000),
            Category::Zero => f64::from_bits(sign_bit),
            Category::Normal => {
                let nat = v.natural_exponent();
                if nat < -1022 {
                    let frac = v.mantissa.as_u64() >> (-1022 - nat) as usize;
                    f64::from_bits(sign_bit | frac)
                } else {
                    let frac = v.mantissa.as_u64() & ((1 << 52) - 1);
                    f64::from_bits(sign_bit | ((nat + 1023) as u64) << 52 | frac)
                }
            }
        }
    }

    /// Converts to a `float`, rounding to nearest.
    pub fn to_f32(&self) -> f32 {
        let (v, _) = round_result(self.clone(), LossFraction::ExactlyZero, &BINARY32)
            .unwrap_or_else(|_| (Self::nan(24, false), false));
        let sign_bit = (v.sign as u32) << 31;
        match v.category {
            Category::NaN => f32::NAN,
            Category::Infinity => f32::from_bits(sign_bit | 0x7f80_0000),
            Category::Zero => f32::from_bits(sign_bit),
            Category::Normal => {
                let nat = v.natural_exponent();
                if nat < -126 {
                    let frac = (v.mantissa.as_u64() >> (-126 - nat) as usize) as u32;
                    f32::from_bits(sign_bit | frac)
                } else {
                    let frac = v.mantissa.as_u64() as u32 & ((1 << 23) - 1);
                    f32::from_bits(sign_bit | ((nat + 127) as u32) << 23 | frac)
                }
            }
        }
    }

    /// Converts to a `double`, erroring if any information would be lost.
    pub fn to_f64_exact(&self) -> Result<f64> {
        let d = self.to_f64();
        if self.is_nan() && d.is_nan() {
            return Ok(d);
        }
        if self.ieee_eq(&Self::from(d)) {
            return Ok(d);
        }
        Err(Error::ValueOutOfRange(
            "value is not exactly representable as an f64",
        ))
    }

    /// Converts to a `float`, erroring if any information would be lost.
    pub fn to_f32_exact(&self) -> Result<f32> {
        let f = self.to_f32();
        if self.is_nan() && f.is_nan() {
            return Ok(f);
        }
        if self.ieee_eq(&Self::from(f)) {
            return Ok(f);
        }
        Err(Error::ValueOutOfRange(
            "value is not exactly representable as an f32",
        ))
    }

    // True when the value has no fractional part. Specials are not
    // integral.
    pub(crate) fn is_integral(&self) -> bool {
        match self.category {
            Category::Zero => true,
            Category::Normal => {
                self.exp >= 0
                    || self
                        .mantissa
                        .get_loss_kind_for_bit((-self.exp) as usize)
                        .is_exactly_zero()
            }
            _ => false,
        }
    }

    /// Truncates toward zero to a sign-and-magnitude integer. NaN and the
    /// infinities convert to zero; use the saturating integer conversions
    /// or [`BigFloat::to_bigint_exact`] if that distinction matters.
    pub fn to_bigint(&self) -> (bool, BigInt) {
        match self.category {
            Category::NaN => (false, BigInt::zero()),
            Category::Infinity => (self.sign, BigInt::zero()),
            Category::Zero => (self.sign, BigInt::zero()),
            Category::Normal => {
                let mut m = self.mantissa.clone();
                if self.exp >= 0 {
                    m.shift_left(self.exp as usize);
                } else {
                    m.shift_right((-self.exp) as usize);
                }
                (self.sign, m)
            }
        }
    }

    /// Converts to an integer, erroring on NaN, infinities, and values with
    /// a nonzero fractional part.
    pub fn to_bigint_exact(&self) -> Result<(bool, BigInt)> {
        if !self.is_integral() {
            return Err(Error::ValueOutOfRange("value is not an integer"));
        }
        Ok(self.to_bigint())
    }

    /// Narrows to an `i64`: fractions truncate, NaN converts to zero,
    /// infinities saturate, and larger magnitudes keep the low 64 bits of
    /// their two's complement form.
    pub fn to_i64(&self) -> i64 {
        if self.is_inf() {
            return if self.sign { i64::MIN } else { i64::MAX };
        }
        let (sign, m) = self.to_bigint();
        let low = m.as_u64() as i64;
        if sign {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Narrows to an `i32` under the same rules as [`BigFloat::to_i64`].
    pub fn to_i32(&self) -> i32 {
        if self.is_inf() {
            return if self.sign { i32::MIN } else { i32::MAX };
        }
        let (sign, m) = self.to_bigint();
        let low = m.as_u64() as u32 as i32;
        if sign {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Converts to an `i64`, erroring unless the value is an integer in
    /// range.
    pub fn to_i64_exact(&self) -> Result<i64> {
        let (sign, m) = self.to_bigint_exact()?;
        let limit = if sign {
            BigInt::one_hot(63)
        } else {
            BigInt::all1s(63)
        };
        if m > limit {
            return Err(Error::ValueOutOfRange("integer does not fit in 64 bits"));
        }
        let low = m.as_u64() as i64;
        Ok(if sign { low.wrapping_neg() } else { low })
    }

    /// Converts to an `i32`, erroring unless the value is an integer in
    /// range.
    pub fn to_i32_exact(&self) -> Result<i32> {
        let v = self.to_i64_exact()?;
        i32::try_from(v).map_err(|_| Error::ValueOutOfRange("integer does not fit in 32 bits"))
    }

    /// The IEEE exponent of this value within an exponent range: NaN and
    /// the infinities report `max_exponent + 1`, zeros and subnormals
    /// report `min_exponent - 1`, and normal values report the power of two
    /// of their leading significand bit.
    ///
    /// Together with [`BigFloat::significand`] this inverts
    /// [`BigFloat::from_parts`].
    pub fn exponent(&self, min_exponent: i64, max_exponent: i64) -> Result<i64> {
        if self.is_nan() || self.is_inf() {
            return Ok(max_exponent + 1);
        }
        if self.is_zero() || self.is_subnormal(min_exponent)? {
            return Ok(min_exponent - 1);
        }
        let nat = self.natural_exponent();
        if nat < min_exponent || nat > max_exponent {
            return Err(Error::ValueOutOfRange(
                "exponent is not in the specified exponent range",
            ));
        }
        Ok(nat)
    }

    /// The full explicit significand scaled to an integer, as the
    /// interchange encoding would store it. Zeros and infinities report
    /// zero; NaN has no accessible payload.
    pub fn significand(&self, min_exponent: i64, _max_exponent: i64) -> Result<BigInt> {
        if self.is_nan() {
            return Err(Error::UnsupportedOperation("NaN payload is undefined"));
        }
        if self.is_inf() || self.is_zero() {
            return Ok(BigInt::zero());
        }
        let mut m = self.mantissa.clone();
        if self.is_subnormal(min_exponent)? {
            m.shift_right((min_exponent - self.natural_exponent()) as usize);
        }
        Ok(m)
    }

    /// True when the value is nonzero, finite, and below `2^min_exponent`
    /// in magnitude. Errors when the value is too small for even the
    /// subnormal grid of that range.
    pub fn is_subnormal(&self, min_exponent: i64) -> Result<bool> {
        if !self.is_normal() {
            return Ok(false);
        }
        let nat = self.natural_exponent();
        if min_exponent - nat > self.precision as i64 - 1 {
            return Err(Error::ValueOutOfRange(
                "value not representable in the provided exponent range",
            ));
        }
        Ok(nat < min_exponent)
    }

    /// Re-rounds the value into `fmt`. This is the identity on values the
    /// format can represent exactly.
    pub fn round(&self, fmt: &BinaryFormat) -> Result<Self> {
        Ok(round_result(self.clone(), LossFraction::ExactlyZero, fmt)?.0)
    }

    /// Rounds to a nearby integer in the direction of the format's rounding
    /// mode, then into the format. NaN, infinities, and zeros pass through.
    pub fn rint(&self, fmt: &BinaryFormat) -> Result<Self> {
        if !self.is_normal() || self.exp >= 0 {
            return Ok(round_result(self.clone(), LossFraction::ExactlyZero, fmt)?.0);
        }
        let rm = fmt.rounding_mode();
        let mut v = self.clone();
        let bits = (-v.exp) as usize;
        let loss = v.mantissa.get_loss_kind_for_bit(bits);
        v.mantissa.shift_right(bits);
        v.exp = 0;
        let ternary = v.normalize(rm, loss);
        if ternary != Ordering::Equal && rm == RoundingMode::ExactRequired {
            return Err(Error::RoundingRequired);
        }
        Ok(round_result(v, LossFraction::ExactlyZero, fmt)?.0)
    }
}
