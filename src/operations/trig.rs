//! The circular functions and their reciprocals.

use crate::bigint::BigInt;
use crate::error::Result;
use crate::float::BigFloat;
use crate::format::BinaryFormat;
use crate::operations::widen;
use crate::round::round_inexact_result;

impl BigFloat {
    // sin(x) = x - x^3/3! + x^5/5! - ..., for arguments below one.
    fn sin_taylor(x: &Self) -> Self {
        let w = x.precision();
        let mut neg = false;
        let mut top = x.clone();
        let mut bottom = BigInt::one();
        let mut sum = Self::zero(w, false);
        let x2 = x * x;
        let mut prev = Self::one(w, true);
        for i in 1..(w + 32) {
            if prev == sum {
                break;
            }
            prev = sum.clone();
            let elem = &top / &Self::from_bigint_lossy(&bottom, w);
            sum = if neg { &sum - &elem } else { &sum + &elem };

            top = &top * &x2;
            bottom.inplace_mul(&BigInt::from_u64((i * 2) * (i * 2 + 1)));
            neg ^= true;
        }
        sum
    }

    // cos(x) = 1 - x^2/2! + x^4/4! - ..., for arguments below one.
    fn cos_taylor(x: &Self) -> Self {
        let w = x.precision();
        let mut neg = false;
        let mut top = Self::one(w, false);
        let mut bottom = BigInt::one();
        let mut sum = Self::zero(w, false);
        let x2 = x * x;
        let mut prev = Self::one(w, true);
        for i in 1..(w + 32) {
            if prev == sum {
                break;
            }
            prev = sum.clone();
            let elem = &top / &Self::from_bigint_lossy(&bottom, w);
            sum = if neg { &sum - &elem } else { &sum + &elem };

            top = &top * &x2;
            bottom.inplace_mul(&BigInt::from_u64((i * 2 - 1) * (i * 2)));
            neg ^= true;
        }
        sum
    }

    // Shrinks the argument with sin(3x) = 3 sin(x) - 4 sin(x)^3.
    fn sin_step_reduction(x: &Self, steps: usize) -> Self {
        if steps == 0 {
            return Self::sin_taylor(x);
        }
        let three = Self::from_u64(3, x.precision());
        let third = x / &three;
        let s = Self::sin_step_reduction(&third, steps - 1);
        let cube = &(&s * &s) * &s;
        &(&s * &three) - &cube.scaled(2)
    }

    // Shrinks the argument with cos(2x) = 2 cos(x)^2 - 1.
    fn cos_step_reduction(x: &Self, steps: usize) -> Self {
        if steps == 0 {
            return Self::cos_taylor(x);
        }
        let one = Self::one(x.precision(), false);
        let half = x.scaled(-1);
        let c = Self::cos_step_reduction(&half, steps - 1);
        &(&c * &c).scaled(1) - &one
    }

    // Reduces |x| modulo 2*pi into [-pi, pi]. The multiple discarded by the
    // reduction scales with the argument's exponent, so pi is taken with
    // that many extra bits to keep the residue accurate at `w` bits.
    fn reduce_by_two_pi(val: &Self, w: u64) -> Self {
        let wr = w + val.natural_exponent().max(0) as u64 + 8;
        let two_pi = Self::pi_inner(wr).scaled(1);
        Self::rem_unbounded(&val.widened(wr), &two_pi).widened(w)
    }

    // Folds a normal argument into [0, pi/2] and runs the step reduction.
    pub(crate) fn sin_inner(x: &Self) -> Self {
        let w = x.precision();
        let mut neg = x.sign();
        let mut val = x.abs();

        if val.natural_exponent() >= 0 {
            let pi = Self::pi_inner(w);
            let pi_half = pi.scaled(-1);
            if val > pi {
                val = Self::reduce_by_two_pi(&val, w);
                if val.is_negative() {
                    // sin is odd.
                    val = val.abs();
                    neg ^= true;
                }
            }
            if val > pi_half {
                val = &pi - &val;
            }
        }

        let steps = (64 - w.leading_zeros()) as usize * 4;
        let res = Self::sin_step_reduction(&val, steps);
        if neg {
            res.neg()
        } else {
            res
        }
    }

    pub(crate) fn cos_inner(x: &Self) -> Self {
        let w = x.precision();
        let mut neg = false;
        let mut val = x.abs();

        if val.natural_exponent() >= 0 {
            let pi = Self::pi_inner(w);
            let pi_half = pi.scaled(-1);
            if val > pi {
                // cos is even, so the residue's sign does not matter.
                val = Self::reduce_by_two_pi(&val, w).abs();
            }
            if val > pi_half {
                val = &pi - &val;
                neg ^= true;
            }
        }

        let steps = ((64 - w.leading_zeros()) as usize * 8) / 10;
        let res = Self::cos_step_reduction(&val, steps);
        if neg {
            res.neg()
        } else {
            res
        }
    }

    /// Computes the sine (radians), rounded into `fmt`. `sin(±0) = ±0`
    /// exactly; infinities produce NaN.
    pub fn sin(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign()));
        }
        let raw = Self::sin_inner(&self.widened(widen(fmt, 12)));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the cosine (radians), rounded into `fmt`. `cos(±0) = 1`
    /// exactly; infinities produce NaN.
    pub fn cos(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::one(p, false));
        }
        let raw = Self::cos_inner(&self.widened(widen(fmt, 14)));
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the tangent (radians), rounded into `fmt`. `tan(±0) = ±0`
    /// exactly; infinities produce NaN.
    pub fn tan(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign()));
        }
        let x = self.widened(widen(fmt, 14));
        let raw = &Self::sin_inner(&x) / &Self::cos_inner(&x);
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the secant `1/cos`, rounded into `fmt`.
    pub fn sec(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::one(p, false));
        }
        let x = self.widened(widen(fmt, 14));
        let one = Self::one(x.precision(), false);
        let raw = &one / &Self::cos_inner(&x);
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the cosecant `1/sin`, rounded into `fmt`. `csc(±0) = ±Inf`.
    pub fn csc(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::inf(p, self.sign()));
        }
        let x = self.widened(widen(fmt, 12));
        let one = Self::one(x.precision(), false);
        let raw = &one / &Self::sin_inner(&x);
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the cotangent `cos/sin`, rounded into `fmt`.
    /// `cot(±0) = ±Inf`.
    pub fn cot(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_nan() || self.is_inf() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::inf(p, self.sign()));
        }
        let x = self.widened(widen(fmt, 14));
        let raw = &Self::cos_inner(&x) / &Self::sin_inner(&x);
        Ok(round_inexact_result(raw, fmt)?.0)
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
    fn test_sin_integers() {
        for i in -100..100 {
            let f0 = i as f64;
            let r = BigFloat::from(f0).sin(&BINARY64).unwrap().to_f64();
            assert_eq!(r, f0.sin(), "sin({})", f0);
        }
    }

    #[test]
    fn test_sin_fractions() {
        for i in -300..300 {
            let f0 = (i as f64) / 100.;
            let r = BigFloat::from(f0).sin(&BINARY64).unwrap().to_f64();
            assert_eq!(r, f0.sin(), "sin({})", f0);
        }
    }

    #[test]
    fn test_cos_values() {
        for i in -100..100 {
            let f0 = i as f64;
            let r = BigFloat::from(f0).cos(&BINARY64).unwrap().to_f64();
            assert_eq!(r, f0.cos(), "cos({})", f0);
        }
        for i in -100..100 {
            let f0 = (i as f64) / 100.;
            let r = BigFloat::from(f0).cos(&BINARY64).unwrap().to_f64();
            assert_eq!(r, f0.cos(), "cos({})", f0);
        }
    }

    #[test]
    fn test_trig_specials() {
        let inf = BigFloat::inf(53, false);
        let nan = BigFloat::nan(53, false);
        assert!(inf.sin(&BINARY64).unwrap().is_nan());
        assert!(inf.cos(&BINARY64).unwrap().is_nan());
        assert!(inf.tan(&BINARY64).unwrap().is_nan());
        assert!(nan.sin(&BINARY64).unwrap().is_nan());

        let nzero = BigFloat::zero(53, true);
        let r = nzero.sin(&BINARY64).unwrap();
        assert!(r.is_zero() && r.sign());
        assert_eq!(nzero.cos(&BINARY64).unwrap().to_f64(), 1.0);
        let r = nzero.tan(&BINARY64).unwrap();
        assert!(r.is_zero() && r.sign());
        let r = nzero.csc(&BINARY64).unwrap();
        assert!(r.is_inf() && r.sign());
        let r = nzero.cot(&BINARY64).unwrap();
        assert!(r.is_inf() && r.sign());
        assert_eq!(BigFloat::zero(53, false).sec(&BINARY64).unwrap().to_f64(), 1.0);
    }

    #[test]
    fn test_tan_values() {
        for i in [-290, -145, -31, 5, 17, 80, 110, 230, 290] {
            let f0 = (i as f64) / 100.;
            let r = BigFloat::from(f0).tan(&BINARY64).unwrap().to_f64();
            assert!(close(r, f0.tan()), "tan({}): {} vs {}", f0, r, f0.tan());
        }
    }

    #[test]
    fn test_reciprocal_trig_values() {
        for i in [-260, -120, -45, 35, 75, 130, 280] {
            let f0 = (i as f64) / 100.;
            let v = BigFloat::from(f0);
            let r = v.sec(&BINARY64).unwrap().to_f64();
            assert!(close(r, 1.0 / f0.cos()), "sec({})", f0);
            let r = v.csc(&BINARY64).unwrap().to_f64();
            assert!(close(r, 1.0 / f0.sin()), "csc({})", f0);
            let r = v.cot(&BINARY64).unwrap().to_f64();
            assert!(close(r, 1.0 / f0.tan()), "cot({})", f0);
        }
    }

    #[test]
    fn test_sin_large_argument() {
        let r = BigFloat::from(95051.0f64).sin(&BINARY64).unwrap().to_f64();
        assert_eq!(r, 95051.0f64.sin());
        let r = BigFloat::from(9.021f64).sin(&BINARY64).unwrap().to_f64();
        assert_eq!(r, 9.021f64.sin());
    }

    #[test]
    fn test_trig_huge_argument_reduction() {
        // Arguments whose exponent dwarfs the working precision: the
        // residue mod 2*pi survives only if pi carries extra bits scaled
        // to the exponent. Expected values are correctly rounded.
        let cases = [
            (1e22f64, -0.8522008497671888f64),
            ((1u64 << 60) as f64, -0.8306492176372546),
            (1e300, -0.8178819121159085),
        ];
        for (x, expected) in cases {
            let r = BigFloat::from(x).sin(&BINARY64).unwrap().to_f64();
            assert_eq!(r, expected, "sin({})", x);
        }
        let r = BigFloat::from(1e300f64).cos(&BINARY64).unwrap().to_f64();
        assert_eq!(r, -0.5753861119575491);
    }
}
