//! Inverse circular functions.

use crate::error::Result;
use crate::float::BigFloat;
use crate::format::BinaryFormat;
use crate::operations::widen;
use crate::round::round_inexact_result;

impl BigFloat {
    // atan(x) = x - x^3/3 + x^5/5 - ..., for small arguments.
    fn atan_taylor(x: &Self) -> Self {
        let w = x.precision();
        let x2 = x * x;
        let mut top = x.clone();
        let mut neg = false;
        let mut sum = Self::zero(w, false);
        let mut prev = Self::one(w, true);
        for i in 0..(w + 32) {
            if prev == sum {
                break;
            }
            prev = sum.clone();
            let bottom = Self::from_u64(i * 2 + 1, w);
            let elem = &top / &bottom;
            sum = if neg { &sum - &elem } else { &sum + &elem };
            top = &top * &x2;
            neg ^= true;
        }
        sum
    }

    // atan of a non-negative normal value at the working precision.
    // Arguments above one flip through atan(x) = pi/2 - atan(1/x); the rest
    // shrink with the half-angle identity
    // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2))).
    pub(crate) fn atan_inner(x: &Self) -> Self {
        debug_assert!(!x.sign());
        let w = x.precision();
        let one = Self::from_u64(1, w);
        if *x > one {
            let pi_half = Self::pi_inner(w).scaled(-1);
            return &pi_half - &Self::atan_inner(&(&one / x));
        }
        let steps = (64 - w.leading_zeros()) as usize;
        let mut v = x.clone();
        for _ in 0..steps {
            let root = (&one + &(&v * &v)).sqrt_inner();
            v = &v / &(&one + &root);
        }
        Self::atan_taylor(&v).scaled(steps as i64)
    }

    /// Computes the arctangent, rounded into `fmt`. `atan(±0) = ±0` exactly
    /// and `atan(±Inf) = ±pi/2`.
    pub fn atan(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign()));
        }
        let w = widen(fmt, 10);
        let raw = if self.is_inf() {
            Self::pi_inner(w).scaled(-1)
        } else {
            Self::atan_inner(&self.abs().widened(w))
        };
        let signed = if self.sign() { raw.neg() } else { raw };
        Ok(round_inexact_result(signed, fmt)?.0)
    }

    /// Computes the arcsine, rounded into `fmt`. Arguments outside `[-1, 1]`
    /// (and infinities) produce NaN; `asin(±0) = ±0` exactly.
    pub fn asin(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign()));
        }
        let one = Self::one(self.precision(), false);
        let mag = self.abs();
        if mag.ieee_gt(&one) {
            return Ok(Self::nan(p, self.sign()));
        }
        // The sqrt cancellation near |x| = 1 eats up to `precision` bits, so
        // the margin is proportional rather than logarithmic.
        let w = widen(fmt, 10) + 2 * p;
        let raw = if mag.ieee_eq(&one) {
            Self::pi_inner(w).scaled(-1)
        } else {
            let x = mag.widened(w);
            let onew = Self::from_u64(1, w);
            let den = (&onew - &(&x * &x)).sqrt_inner();
            Self::atan_inner(&(&x / &den))
        };
        let signed = if self.sign() { raw.neg() } else { raw };
        Ok(round_inexact_result(signed, fmt)?.0)
    }

    /// Computes the arccosine, rounded into `fmt`. Arguments outside
    /// `[-1, 1]` (and infinities) produce NaN; `acos(1) = +0` exactly.
    pub fn acos(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        let one = Self::one(self.precision(), false);
        if self.ieee_eq(&one) {
            return Ok(Self::zero(p, false));
        }
        if self.abs().ieee_gt(&one) {
            return Ok(Self::nan(p, self.sign()));
        }
        let w = widen(fmt, 10) + 2 * p;
        let pi_half = Self::pi_inner(w).scaled(-1);
        let raw = if self.is_zero() {
            pi_half
        } else if self.ieee_eq(&one.neg()) {
            pi_half.scaled(1)
        } else {
            let x = self.abs().widened(w);
            let onew = Self::from_u64(1, w);
            let den = (&onew - &(&x * &x)).sqrt_inner();
            let asin_mag = Self::atan_inner(&(&x / &den));
            if self.sign() {
                &pi_half + &asin_mag
            } else {
                &pi_half - &asin_mag
            }
        };
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the two-argument arctangent of `self / x`, honoring the
    /// quadrant signs, rounded into `fmt`. Follows the C99/IEEE table:
    /// `atan2(±0, +x) = ±0`, `atan2(±0, -x) = ±pi`,
    /// `atan2(±Inf, ±Inf) = ±(3)pi/4`, `atan2(±y, 0) = ±pi/2`.
    pub fn atan2(&self, x: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || x.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        let sign = self.sign();
        let w = widen(fmt, 10);
        let finish = |raw: Self, sign: bool, fmt: &BinaryFormat| -> Result<Self> {
            let signed = if sign { raw.neg() } else { raw };
            Ok(round_inexact_result(signed, fmt)?.0)
        };
        if self.is_zero() {
            if x.sign() {
                return finish(Self::pi_inner(w), sign, fmt);
            }
            return Ok(Self::zero(p, sign));
        }
        if self.is_inf() {
            let raw = if x.is_inf() {
                let quarter = Self::pi_inner(w).scaled(-2);
                if x.sign() {
                    // 3*pi/4
                    &quarter + &quarter.scaled(1)
                } else {
                    quarter
                }
            } else {
                Self::pi_inner(w).scaled(-1)
            };
            return finish(raw, sign, fmt);
        }
        if x.is_zero() {
            return finish(Self::pi_inner(w).scaled(-1), sign, fmt);
        }
        if x.is_inf() {
            if x.sign() {
                return finish(Self::pi_inner(w), sign, fmt);
            }
            return Ok(Self::zero(p, sign));
        }
        let ratio = &self.abs().widened(w) / &x.abs().widened(w);
        let base = Self::atan_inner(&ratio);
        let raw = if x.sign() {
            &Self::pi_inner(w) - &base
        } else {
            base
        };
        finish(raw, sign, fmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::BINARY64;

    fn close(a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        (a - b).abs() <= b.abs() * 4e-16
    }

    #[test]
    fn test_atan_values() {
        for i in [-500, -230, -100, -13, 7, 50, 99, 170, 420, 10000] {
            let f0 = (i as f64) / 100.;
            let r = BigFloat::from(f0).atan(&BINARY64).unwrap().to_f64();
            assert!(close(r, f0.atan()), "atan({}): {} vs {}", f0, r, f0.atan());
        }
    }

    #[test]
    fn test_atan_specials() {
        let r = BigFloat::inf(53, false).atan(&BINARY64).unwrap().to_f64();
        assert_eq!(r, std::f64::consts::FRAC_PI_2);
        let r = BigFloat::inf(53, true).atan(&BINARY64).unwrap().to_f64();
        assert_eq!(r, -std::f64::consts::FRAC_PI_2);
        let r = BigFloat::zero(53, true).atan(&BINARY64).unwrap();
        assert!(r.is_zero() && r.sign());
        assert!(BigFloat::nan(53, false).atan(&BINARY64).unwrap().is_nan());
    }

    #[test]
    fn test_asin_acos_values() {
        for i in [-99, -80, -50, -25, 0, 10, 33, 71, 99] {
            let f0 = (i as f64) / 100.;
            let v = BigFloat::from(f0);
            let r = v.asin(&BINARY64).unwrap().to_f64();
            assert!(close(r, f0.asin()), "asin({}): {} vs {}", f0, r, f0.asin());
            let r = v.acos(&BINARY64).unwrap().to_f64();
            assert!(close(r, f0.acos()), "acos({}): {} vs {}", f0, r, f0.acos());
        }
    }

    #[test]
    fn test_asin_acos_edges() {
        let one = BigFloat::from(1.0f64);
        assert_eq!(one.asin(&BINARY64).unwrap().to_f64(), std::f64::consts::FRAC_PI_2);
        let r = one.acos(&BINARY64).unwrap();
        assert!(r.is_zero() && !r.sign());
        assert_eq!(
            one.neg().acos(&BINARY64).unwrap().to_f64(),
            std::f64::consts::PI
        );
        assert!(BigFloat::from(1.5f64).asin(&BINARY64).unwrap().is_nan());
        assert!(BigFloat::from(-1.5f64).acos(&BINARY64).unwrap().is_nan());
        assert!(BigFloat::inf(53, false).asin(&BINARY64).unwrap().is_nan());
    }

    #[test]
    fn test_atan2_special_table() {
        fn check(y: f64, x: f64) {
            let r = BigFloat::from(y)
                .atan2(&BigFloat::from(x), &BINARY64)
                .unwrap()
                .to_f64();
            let expected = y.atan2(x);
            assert_eq!(r, expected, "atan2({}, {})", y, x);
            assert_eq!(r.is_sign_negative(), expected.is_sign_negative());
        }
        // Every row where one operand is zero or infinite produces an exact
        // constant, matching the host atan2 bit for bit.
        for y in [0.0, -0.0, 1.0, -1.0, f64::INFINITY, f64::NEG_INFINITY] {
            for x in [0.0, -0.0, 2.0, -2.0, f64::INFINITY, f64::NEG_INFINITY] {
                if y.is_finite() && y != 0.0 && x.is_finite() && x != 0.0 {
                    continue;
                }
                check(y, x);
            }
        }
    }

    #[test]
    fn test_atan2_quadrants() {
        for (y, x) in [(1.0f64, 2.0f64), (1.0, -2.0), (-1.0, 2.0), (-1.0, -2.0), (3.5, 0.25)] {
            let r = BigFloat::from(y)
                .atan2(&BigFloat::from(x), &BINARY64)
                .unwrap()
                .to_f64();
            let expected = y.atan2(x);
            assert!(close(r, expected), "atan2({}, {}): {} vs {}", y, x, r, expected);
        }
    }
}
