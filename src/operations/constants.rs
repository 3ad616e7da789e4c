//! Mathematical constants, computed on demand at any precision.

use crate::error::Result;
use crate::float::BigFloat;
use crate::format::BinaryFormat;
use crate::operations::widen;
use crate::round::round_inexact_result;

impl BigFloat {
    // Brent's AGM iteration ("Fast Multiple-Precision Evaluation of
    // Elementary Functions", pg. 246), at the given working precision.
    pub(crate) fn pi_inner(precision: u64) -> Self {
        let one = Self::from_u64(1, precision);
        let two = Self::from_u64(2, precision);
        let four = Self::from_u64(4, precision);

        let mut a = one.clone();
        let mut b = &one / &two.sqrt_inner();
        let mut t = &one / &four;
        let mut x = one;

        while a != b {
            let y = a.clone();
            a = (&a + &b).scaled(-1);
            b = (&b * &y).sqrt_inner();
            let d = &a - &y;
            t = &t - &(&x * &(&d * &d));
            x = x.scaled(1);
        }
        &(&a * &a) / &t
    }

    /// Computes pi, rounded into `fmt`. The result is always inexact.
    pub fn pi(fmt: &BinaryFormat) -> Result<Self> {
        let raw = Self::pi_inner(widen(fmt, 4));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes Euler's number e, rounded into `fmt`. Always inexact.
    pub fn e(fmt: &BinaryFormat) -> Result<Self> {
        let w = widen(fmt, 2);
        let one = Self::from_u64(1, w);
        let two = Self::from_u64(2, w);

        // Euler's continued fraction, evaluated bottom-up. The convergents
        // gain more than two bits per level, so w/2 levels are plenty.
        let levels = (w / 2).max(16) as i64;
        let mut term = one.clone();
        for i in (1..levels).rev() {
            let v = Self::from_i64(i, w);
            term = &v + &(&v / &term);
        }
        let raw = &(&one / &term) + &two;
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    // log(2) as the sum of 1/(k * 2^k), which gains one bit per term.
    pub(crate) fn ln2_inner(precision: u64) -> Self {
        let one = Self::from_u64(1, precision);
        let mut sum = Self::zero(precision, false);
        let mut prev = Self::inf(precision, true);
        for k in 1..(precision + 16) {
            let k2 = one.scaled(k as i64);
            let kf = Self::from_u64(k, precision);
            let term = &one / &(&kf * &k2);
            sum = &sum + &term;
            if prev == sum {
                break;
            }
            prev = sum.clone();
        }
        sum
    }

    /// Computes log(2), rounded into `fmt`. Always inexact.
    pub fn ln2(fmt: &BinaryFormat) -> Result<Self> {
        let raw = Self::ln2_inner(widen(fmt, 2));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes log(10), rounded into `fmt`. Always inexact.
    pub fn ln10(fmt: &BinaryFormat) -> Result<Self> {
        let w = widen(fmt, 10);
        let raw = Self::log_inner(&Self::from_u64(10, w));
        Ok(round_inexact_result(raw, fmt)?.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::format::{RoundingMode, BINARY32, BINARY64};

    #[test]
    fn test_pi() {
        assert_eq!(BigFloat::pi(&BINARY64).unwrap().to_f64(), std::f64::consts::PI);
        assert_eq!(BigFloat::pi(&BINARY32).unwrap().to_f32(), std::f32::consts::PI);
    }

    #[test]
    fn test_e() {
        assert_eq!(BigFloat::e(&BINARY64).unwrap().to_f64(), std::f64::consts::E);
        assert_eq!(BigFloat::e(&BINARY32).unwrap().to_f32(), std::f32::consts::E);
    }

    #[test]
    fn test_logarithm_constants() {
        assert_eq!(BigFloat::ln2(&BINARY64).unwrap().to_f64(), std::f64::consts::LN_2);
        assert_eq!(
            BigFloat::ln10(&BINARY64).unwrap().to_f64(),
            std::f64::consts::LN_10
        );
    }

    #[test]
    fn test_constants_are_inexact() {
        let fmt = BINARY64.with_rounding_mode(RoundingMode::ExactRequired);
        assert_eq!(BigFloat::pi(&fmt), Err(Error::RoundingRequired));
        assert_eq!(BigFloat::e(&fmt), Err(Error::RoundingRequired));
    }

    #[test]
    fn test_pi_at_high_precision_round_trips() {
        // The binary64 rounding of pi must agree with pi computed at a much
        // higher precision and rounded twice as hard.
        let wide = crate::format::BinaryFormat::with_exponent_range(
            256,
            -1022,
            1023,
            RoundingMode::NearestTiesToEven,
        )
        .unwrap();
        let hi = BigFloat::pi(&wide).unwrap();
        assert_eq!(hi.to_f64(), std::f64::consts::PI);
    }
}
