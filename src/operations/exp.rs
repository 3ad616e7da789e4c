//! The exponential and logarithm family.

use crate::error::Result;
use crate::float::BigFloat;
use crate::format::BinaryFormat;
use crate::operations::widen;
use crate::round::round_inexact_result;

impl BigFloat {
    // The Taylor series of log around 1, valid on [0..2]:
    // z = (x - 1)/(x + 1); log(x) = 2 (z + z^3/3 + z^5/5 + ...)
    fn log_taylor(x: &Self) -> Self {
        let w = x.precision();
        let one = Self::from_u64(1, w);
        let z = &(x - &one) / &(x + &one);
        let z2 = &z * &z;

        let mut top = z;
        let mut sum = Self::zero(w, false);
        let mut prev = Self::one(w, true);
        for i in 0..(w + 32) {
            if prev == sum {
                break;
            }
            prev = sum.clone();
            let bottom = Self::from_u64(i * 2 + 1, w);
            sum = &sum + &(&top / &bottom);
            top = &top * &z2;
        }
        sum.scaled(1)
    }

    // Shrinks the argument toward 1 with log(x) = 2 log(sqrt(x)) and
    // log(x) = -log(1/x), then runs the series.
    fn log_range_reduce(x: &Self) -> Self {
        let w = x.precision();
        let one = Self::from_u64(1, w);
        let up = Self::from(1.001f64);

        if *x > up {
            Self::log_range_reduce(&x.sqrt_inner()).scaled(1)
        } else if *x < one {
            Self::log_range_reduce(&(&one / x)).neg()
        } else {
            Self::log_taylor(x)
        }
    }

    // Natural log of a positive normal value at the working precision.
    pub(crate) fn log_inner(x: &Self) -> Self {
        debug_assert!(x.is_normal() && !x.sign());
        Self::log_range_reduce(x)
    }

    // The Taylor series exp(x) = 1 + x/1! + x^2/2! + ..., for |x| <= 1.
    fn exp_taylor(x: &Self) -> Self {
        use crate::bigint::BigInt;
        let w = x.precision();
        let mut top = Self::one(w, false);
        let mut bottom = BigInt::one();

        let mut sum = Self::zero(w, false);
        let mut prev = Self::one(w, true);
        for k in 1..(w + 32) {
            if prev == sum {
                break;
            }
            prev = sum.clone();
            let den = Self::from_bigint_lossy(&bottom, w);
            sum = &sum + &(&top / &den);
            bottom.inplace_mul(&BigInt::from_u64(k));
            top = &top * x;
        }
        sum
    }

    // e^x = (e^(x/8))^8 brings the argument under 1 for the series.
    fn exp_range_reduce(x: &Self) -> Self {
        let w = x.precision();
        let one = Self::from_u64(1, w);
        if *x > one {
            let sx = x.scaled(-3);
            let esx = Self::exp_range_reduce(&sx);
            let e2 = &esx * &esx;
            let e4 = &e2 * &e2;
            return &e4 * &e4;
        }
        Self::exp_taylor(x)
    }

    // e^x for a normal argument of either sign, at the working precision.
    pub(crate) fn exp_inner(x: &Self) -> Self {
        if x.sign() {
            let one = Self::from_u64(1, x.precision());
            return &one / &Self::exp_range_reduce(&x.abs());
        }
        Self::exp_range_reduce(x)
    }

    /// Computes `e^self`, rounded into `fmt`.
    ///
    /// `exp(±0) = 1` exactly, `exp(-Inf) = +0`, `exp(+Inf) = +Inf`.
    pub fn exp(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::one(p, false));
        }
        if self.is_inf() {
            return Ok(if self.sign() {
                Self::zero(p, false)
            } else {
                Self::inf(p, false)
            });
        }
        let raw = Self::exp_inner(&self.widened(widen(fmt, 10)));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes `10^self`, rounded into `fmt`. Same special values as `exp`.
    pub fn exp10(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::one(p, false));
        }
        if self.is_inf() {
            return Ok(if self.sign() {
                Self::zero(p, false)
            } else {
                Self::inf(p, false)
            });
        }
        let w = widen(fmt, 10);
        let ln10 = Self::log_inner(&Self::from_u64(10, w));
        let raw = Self::exp_inner(&(&self.widened(w) * &ln10));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the natural logarithm, rounded into `fmt`.
    ///
    /// `log(±0) = -Inf`, `log(1) = +0` exactly, `log(+Inf) = +Inf`;
    /// negative operands and NaN produce NaN.
    pub fn log(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || (self.is_negative() && !self.is_zero()) {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::inf(p, true));
        }
        if self.is_inf() {
            return Ok(Self::inf(p, false));
        }
        if self.ieee_eq(&Self::one(self.precision(), false)) {
            return Ok(Self::zero(p, false));
        }
        let raw = Self::log_inner(&self.widened(widen(fmt, 10)));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the base-10 logarithm, rounded into `fmt`. Same special
    /// values as `log`.
    pub fn log10(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || (self.is_negative() && !self.is_zero()) {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::inf(p, true));
        }
        if self.is_inf() {
            return Ok(Self::inf(p, false));
        }
        if self.ieee_eq(&Self::one(self.precision(), false)) {
            return Ok(Self::zero(p, false));
        }
        let w = widen(fmt, 10);
        let x = self.widened(w);
        let ln10 = Self::log_inner(&Self::from_u64(10, w));
        let raw = &Self::log_inner(&x) / &ln10;
        Ok(round_inexact_result(raw, fmt)?.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::BINARY64;

    #[test]
    fn test_exp_values() {
        assert_eq!(
            BigFloat::from(2.51f64).exp(&BINARY64).unwrap().to_f64(),
            12.30493006051041
        );
        for x in [
            0.000003f64, 0.001, 0.12, 0.13, 0.5, 1.2, 2.3, 4.5, 9.8, 5.0,
            11.2, 15.2, 25.0, 34.001, 54., 89.1, 91.2, 102.2, 150., 192.4,
            212., 256., 102.3,
        ] {
            let lhs = BigFloat::from(x).exp(&BINARY64).unwrap().to_f64();
            let rhs = x.exp();
            assert_eq!(lhs, rhs, "exp({})", x);
        }
    }

    #[test]
    fn test_exp_negative_and_specials() {
        for x in [-0.5f64, -2.3, -11.0, -54.2] {
            let lhs = BigFloat::from(x).exp(&BINARY64).unwrap().to_f64();
            assert_eq!(lhs, x.exp(), "exp({})", x);
        }
        assert_eq!(BigFloat::zero(53, true).exp(&BINARY64).unwrap().to_f64(), 1.0);
        let r = BigFloat::inf(53, true).exp(&BINARY64).unwrap();
        assert!(r.is_zero() && !r.sign());
        assert!(BigFloat::inf(53, false).exp(&BINARY64).unwrap().is_inf());
        assert!(BigFloat::nan(53, false).exp(&BINARY64).unwrap().is_nan());
        // Overflows the format into infinity.
        let r = BigFloat::from(1e10f64).exp(&BINARY64).unwrap();
        assert!(r.is_inf() && !r.sign());
    }

    #[test]
    fn test_log_values() {
        let x = BigFloat::from(0.1f64).log(&BINARY64).unwrap();
        assert_eq!(x.to_f64(), 0.1f64.ln());
        for x in [
            0.1f64, 0.5, 2.3, 4.5, 9.8, 11.2, 15.2, 91.2, 102.2, 192.4,
            1024.2, 90210.2,
        ] {
            let lhs = BigFloat::from(x).log(&BINARY64).unwrap().to_f64();
            let rhs = x.ln();
            assert_eq!(lhs, rhs, "log({})", x);
        }
    }

    #[test]
    fn test_log_specials() {
        let r = BigFloat::zero(53, false).log(&BINARY64).unwrap();
        assert!(r.is_inf() && r.sign());
        let r = BigFloat::zero(53, true).log(&BINARY64).unwrap();
        assert!(r.is_inf() && r.sign());
        assert!(BigFloat::from(-2.0f64).log(&BINARY64).unwrap().is_nan());
        assert!(BigFloat::inf(53, true).log(&BINARY64).unwrap().is_nan());
        assert!(BigFloat::inf(53, false).log(&BINARY64).unwrap().is_inf());
        // log(1) is exactly zero.
        let r = BigFloat::from(1.0f64).log(&BINARY64).unwrap();
        assert!(r.is_zero() && !r.sign());
    }

    #[test]
    fn test_exp10_and_log10() {
        for x in [1.0f64, 2.0, 3.0, 8.0] {
            let r = BigFloat::from(x).exp10(&BINARY64).unwrap().to_f64();
            let expected = 10f64.powf(x);
            let ulps = (r.to_bits() as i64 - expected.to_bits() as i64).abs();
            assert!(ulps <= 1, "10^{}: {} vs {}", x, r, expected);
        }
        for x in [0.1f64, 2.5, 100.0, 1e10, 90210.2] {
            let r = BigFloat::from(x).log10(&BINARY64).unwrap().to_f64();
            let expected = x.log10();
            let ulps = (r.to_bits() as i64 - expected.to_bits() as i64).abs();
            assert!(ulps <= 1, "log10({}): {} vs {}", x, r, expected);
        }
    }
}
