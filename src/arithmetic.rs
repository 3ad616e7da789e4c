//! The algebraic operations: addition, subtraction, multiplication,
//! division, remainder, and the min/max selectors.
//!
//! Each operation resolves the IEEE special-value table first, computes the
//! finite case on the unbounded significand with at most one captured loss,
//! and hands the pair to the rounding pipeline. The operator traits run the
//! same machinery with round-to-nearest and no exponent range, which is what
//! the internal algorithms want for intermediate terms.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::bigint::{BigInt, LossFraction};
use crate::error::Result;
use crate::float::{BigFloat, Category};
use crate::format::{BinaryFormat, RoundingMode};
use crate::round::{round_result, ENGINE_EMAX, ENGINE_EMIN};

// Scale exponents stay far from i64 overflow even for degenerate formats;
// anything past the engine range is over/underflow regardless.
fn clamp_exp(e: i128) -> i64 {
    e.clamp(2 * ENGINE_EMIN as i128, 2 * ENGINE_EMAX as i128) as i64
}

impl BigFloat {
    /// Returns `self + rhs`, rounded into `fmt`.
    pub fn add(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let w = self.precision.max(rhs.precision).max(fmt.precision());
        let (val, loss) = Self::add_sub_value(self, rhs, false, w, fmt.rounding_mode());
        Ok(round_result(val, loss, fmt)?.0)
    }

    /// Returns `self - rhs`, rounded into `fmt`.
    pub fn sub(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let w = self.precision.max(rhs.precision).max(fmt.precision());
        let (val, loss) = Self::add_sub_value(self, rhs, true, w, fmt.rounding_mode());
        Ok(round_result(val, loss, fmt)?.0)
    }

    /// Returns `self * rhs`, rounded into `fmt`.
    pub fn mul(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let (val, loss) = Self::mul_value(self, rhs);
        Ok(round_result(val, loss, fmt)?.0)
    }

    /// Returns `self / rhs`, rounded into `fmt`.
    pub fn div(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let w = self.precision.max(rhs.precision).max(fmt.precision());
        let (val, loss) = Self::div_value(self, rhs, w);
        Ok(round_result(val, loss, fmt)?.0)
    }

    /// Returns the IEEE 754 remainder: `self - rhs * n` where `n` is
    /// `self / rhs` rounded to the nearest integer, ties to even. The
    /// magnitude never exceeds `|rhs| / 2`; a zero result keeps the sign of
    /// `self`. Always exact, so it never triggers
    /// `RoundingMode::ExactRequired`.
    ///
    /// `x rem 0` and `inf rem y` are NaN; `x rem inf` is `x`.
    pub fn rem(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let val = Self::rem_value(self, rhs);
        Ok(round_result(val, LossFraction::ExactlyZero, fmt)?.0)
    }

    /// IEEE maxNum: the larger operand, where a single NaN loses to the
    /// number and equal magnitudes prefer the positive sign.
    pub fn max(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let sel = match self.ieee_cmp(rhs) {
            Some(Ordering::Less) => rhs,
            Some(Ordering::Greater) => self,
            Some(Ordering::Equal) => {
                if self.sign() {
                    rhs
                } else {
                    self
                }
            }
            None => {
                if self.is_nan() && rhs.is_nan() {
                    self
                } else if self.is_nan() {
                    rhs
                } else {
                    self
                }
            }
        };
        Ok(round_result(sel.clone(), LossFraction::ExactlyZero, fmt)?.0)
    }

    /// IEEE minNum. See [`BigFloat::max`].
    pub fn min(&self, rhs: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let sel = match self.ieee_cmp(rhs) {
            Some(Ordering::Less) => self,
            Some(Ordering::Greater) => rhs,
            Some(Ordering::Equal) => {
                if self.sign() {
                    self
                } else {
                    rhs
                }
            }
            None => {
                if self.is_nan() && rhs.is_nan() {
                    self
                } else if self.is_nan() {
                    rhs
                } else {
                    self
                }
            }
        };
        Ok(round_result(sel.clone(), LossFraction::ExactlyZero, fmt)?.0)
    }

    // Resolves categories and computes a sum or difference at working
    // precision `w`. The rounding mode only decides the sign of an exact
    // cancellation.
    fn add_sub_value(a: &Self, b: &Self, subtract: bool, w: u64, rm: RoundingMode) -> (Self, LossFraction) {
        use Category::*;
        let b_sign = b.sign ^ subtract;
        let exact = LossFraction::ExactlyZero;
        match (a.category, b.category) {
            (NaN, _) => (Self::nan(w, a.sign), exact),
            (_, NaN) => (Self::nan(w, b_sign), exact),
            (Infinity, Infinity) => {
                if a.sign == b_sign {
                    (Self::inf(w, a.sign), exact)
                } else {
                    // inf - inf has no useful value.
                    (Self::nan(w, false), exact)
                }
            }
            (Infinity, _) => (Self::inf(w, a.sign), exact),
            (_, Infinity) => (Self::inf(w, b_sign), exact),
            (Zero, Zero) => {
                let sign = if a.sign == b_sign {
                    a.sign
                } else {
                    rm == RoundingMode::TowardNegative
                };
                (Self::zero(w, sign), exact)
            }
            (Zero, Normal) => {
                let mut res = b.clone();
                res.sign = b_sign;
                (res, exact)
            }
            (Normal, Zero) => (a.clone(), exact),
            (Normal, Normal) => {
                let (x, _) = a.round_to_precision(w, RoundingMode::NearestTiesToEven);
                let (mut y, _) = b.round_to_precision(w, RoundingMode::NearestTiesToEven);
                y.sign = b_sign;
                Self::add_or_sub_normals(x, y, w, rm)
            }
        }
    }

    // Magnitude addition or subtraction of two w-bit aligned normals.
    fn add_or_sub_normals(mut x: Self, mut y: Self, w: u64, rm: RoundingMode) -> (Self, LossFraction) {
        if x.cmp_abs(&y) == Ordering::Less {
            core::mem::swap(&mut x, &mut y);
        }
        // |x| >= |y| and both significands are w bits, so the scale gap is
        // never negative.
        let gap = x.exp as i128 - y.exp as i128;
        let sticky_cap = w as i128 + 2;
        if x.sign == y.sign {
            let loss;
            if gap > sticky_cap {
                // The smaller operand is entirely below the result grid.
                loss = LossFraction::LessThanHalf;
                y.mantissa = BigInt::zero();
            } else {
                loss = y.mantissa.get_loss_kind_for_bit(gap as usize);
                y.mantissa.shift_right(gap as usize);
            }
            x.mantissa.inplace_add(&y.mantissa);
            (x, loss)
        } else {
            // One headroom bit so the borrow out of the sticky fraction
            // stays representable.
            x.mantissa.shift_left(1);
            x.exp -= 1;
            let mut loss = LossFraction::ExactlyZero;
            if gap == 0 {
                y.mantissa.shift_left(1);
            } else if gap - 1 > sticky_cap {
                loss = LossFraction::LessThanHalf;
                y.mantissa = BigInt::zero();
            } else {
                loss = y.mantissa.get_loss_kind_for_bit((gap - 1) as usize);
                y.mantissa.shift_right((gap - 1) as usize);
            }
            if !loss.is_exactly_zero() {
                // True subtrahend is y + f with 0 < f < 1 on this grid:
                // borrow one and keep 1 - f as the loss.
                y.mantissa.inplace_add(&BigInt::one());
                loss = loss.invert();
            }
            x.mantissa.inplace_sub(&y.mantissa);
            if x.mantissa.is_zero() && loss.is_exactly_zero() {
                let sign = rm == RoundingMode::TowardNegative;
                return (Self::zero(w, sign), loss);
            }
            (x, loss)
        }
    }

    fn mul_value(a: &Self, b: &Self) -> (Self, LossFraction) {
        use Category::*;
        let w = a.precision.max(b.precision);
        let sign = a.sign ^ b.sign;
        let exact = LossFraction::ExactlyZero;
        match (a.category, b.category) {
            (NaN, _) => (Self::nan(w, a.sign), exact),
            (_, NaN) => (Self::nan(w, b.sign), exact),
            (Zero, Infinity) | (Infinity, Zero) => (Self::nan(w, false), exact),
            (Infinity, _) | (_, Infinity) => (Self::inf(w, sign), exact),
            (Zero, _) | (_, Zero) => (Self::zero(w, sign), exact),
            (Normal, Normal) => {
                let exp = clamp_exp(a.exp as i128 + b.exp as i128);
                let mantissa = &a.mantissa * &b.mantissa;
                (Self::raw(sign, exp, mantissa, w, Normal), exact)
            }
        }
    }

    fn div_value(a: &Self, b: &Self, w: u64) -> (Self, LossFraction) {
        use Category::*;
        let sign = a.sign ^ b.sign;
        let exact = LossFraction::ExactlyZero;
        match (a.category, b.category) {
            (NaN, _) => (Self::nan(w, a.sign), exact),
            (_, NaN) => (Self::nan(w, b.sign), exact),
            (Zero, Zero) | (Infinity, Infinity) => (Self::nan(w, false), exact),
            (Infinity, _) => (Self::inf(w, sign), exact),
            (_, Infinity) => (Self::zero(w, sign), exact),
            (Zero, _) => (Self::zero(w, sign), exact),
            (_, Zero) => (Self::inf(w, sign), exact),
            (Normal, Normal) => {
                // Scale the dividend so the quotient keeps w + 2 bits, then
                // classify the remainder against half an ulp.
                let s = (b.precision + w + 2).saturating_sub(a.precision) as usize;
                let mut q = a.mantissa.clone();
                q.shift_left(s);
                let r = q.inplace_div(&b.mantissa);
                let loss = if r.is_zero() {
                    LossFraction::ExactlyZero
                } else {
                    let mut r2 = r;
                    r2.shift_left(1);
                    match r2.cmp(&b.mantissa) {
                        Ordering::Less => LossFraction::LessThanHalf,
                        Ordering::Equal => LossFraction::ExactlyHalf,
                        Ordering::Greater => LossFraction::MoreThanHalf,
                    }
                };
                let exp = clamp_exp(a.exp as i128 - b.exp as i128 - s as i128);
                (Self::raw(sign, exp, q, w, Normal), loss)
            }
        }
    }

    fn rem_value(a: &Self, b: &Self) -> Self {
        use Category::*;
        let w = a.precision.max(b.precision);
        match (a.category, b.category) {
            (NaN, _) => Self::nan(w, a.sign),
            (_, NaN) => Self::nan(w, b.sign),
            (Infinity, _) | (_, Zero) => Self::nan(w, false),
            (_, Infinity) | (Zero, _) => a.clone(),
            (Normal, Normal) => {
                if a.cmp_abs(b) == Ordering::Less {
                    // The nearest multiple is 0 or +-b. Past the midpoint
                    // the magnitudes are within a factor of two, so the
                    // fold b - |a| is an exact subtraction on a small grid.
                    let mut twice = a.clone();
                    twice.mul_pow2(1);
                    if twice.cmp_abs(b) != Ordering::Greater {
                        // A midpoint stays put: the quotient zero is even.
                        return a.clone();
                    }
                    let grid = a.exp.min(b.exp);
                    let mut am = a.mantissa.clone();
                    am.shift_left((a.exp - grid) as usize);
                    let mut mag = b.mantissa.clone();
                    mag.shift_left((b.exp - grid) as usize);
                    mag.inplace_sub(&am);
                    let mut res = Self::raw(!a.sign, grid, mag, w, Normal);
                    res.normalize(RoundingMode::NearestTiesToEven, LossFraction::ExactlyZero);
                    return res;
                }
                // |a| mod |b| on the common grid of the two scales. The
                // dividend's scale excess can be astronomically large, so
                // it is reduced as 2^k mod m instead of materialized.
                // Reducing modulo 2|b| first keeps the parity of the
                // truncated quotient, which decides the midpoint fold.
                let mut bm = b.mantissa.clone();
                let mut grid = b.exp;
                if b.exp > a.exp {
                    // |a| >= |b| bounds this shift by the precisions.
                    bm.shift_left((b.exp - a.exp) as usize);
                    grid = a.exp;
                }
                let up = (a.exp as i128 - grid as i128) as u64;
                let mut b2 = bm.clone();
                b2.shift_left(1);
                let mut r = a.mantissa.rem(&b2);
                r.inplace_mul(&BigInt::mod_pow2(up, &b2));
                let mut r = r.rem(&b2);
                let quotient_odd = r >= bm;
                if quotient_odd {
                    r.inplace_sub(&bm);
                }
                // Fold onto the nearest multiple, ties to the even quotient.
                let mut twice = r.clone();
                twice.shift_left(1);
                let flip = match twice.cmp(&bm) {
                    Ordering::Greater => true,
                    Ordering::Equal => quotient_odd,
                    Ordering::Less => false,
                };
                let (sign, mag) = if flip {
                    let mut m = bm;
                    m.inplace_sub(&r);
                    (!a.sign, m)
                } else {
                    (a.sign, r)
                };
                if mag.is_zero() {
                    return Self::zero(w, a.sign);
                }
                let mut res = Self::raw(sign, grid, mag, w, Normal);
                res.normalize(RoundingMode::NearestTiesToEven, LossFraction::ExactlyZero);
                res
            }
        }
    }

    // Unbounded round-to-nearest arithmetic at the operands' precision, for
    // intermediate terms inside the numeric algorithms.

    pub(crate) fn add_unbounded(a: &Self, b: &Self) -> Self {
        let w = a.precision.max(b.precision);
        let (mut val, loss) = Self::add_sub_value(a, b, false, w, RoundingMode::NearestTiesToEven);
        val.normalize(RoundingMode::NearestTiesToEven, loss);
        val
    }

    pub(crate) fn sub_unbounded(a: &Self, b: &Self) -> Self {
        let w = a.precision.max(b.precision);
        let (mut val, loss) = Self::add_sub_value(a, b, true, w, RoundingMode::NearestTiesToEven);
        val.normalize(RoundingMode::NearestTiesToEven, loss);
        val
    }

    pub(crate) fn mul_unbounded(a: &Self, b: &Self) -> Self {
        let (mut val, loss) = Self::mul_value(a, b);
        val.normalize(RoundingMode::NearestTiesToEven, loss);
        val
    }

    pub(crate) fn div_unbounded(a: &Self, b: &Self) -> Self {
        let w = a.precision.max(b.precision);
        let (mut val, loss) = Self::div_value(a, b, w);
        val.normalize(RoundingMode::NearestTiesToEven, loss);
        val
    }

    pub(crate) fn rem_unbounded(a: &Self, b: &Self) -> Self {
        Self::rem_value(a, b)
    }
}

// The operators compute with round-to-nearest and an unbounded exponent at
// the wider of the two operand precisions. Range-aware arithmetic goes
// through the named methods with a format.

impl Add for &BigFloat {
    type Output = BigFloat;
    fn add(self, rhs: &BigFloat) -> BigFloat {
        BigFloat::add_unbounded(self, rhs)
    }
}

impl Sub for &BigFloat {
    type Output = BigFloat;
    fn sub(self, rhs: &BigFloat) -> BigFloat {
        BigFloat::sub_unbounded(self, rhs)
    }
}

impl Mul for &BigFloat {
    type Output = BigFloat;
    fn mul(self, rhs: &BigFloat) -> BigFloat {
        BigFloat::mul_unbounded(self, rhs)
    }
}

impl Div for &BigFloat {
    type Output = BigFloat;
    fn div(self, rhs: &BigFloat) -> BigFloat {
        BigFloat::div_unbounded(self, rhs)
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;
    fn neg(self) -> BigFloat {
        BigFloat::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{BINARY32, BINARY64};

    fn u(v: u64) -> BigFloat {
        BigFloat::from_u64(v, 64)
    }
    fn i(v: i64) -> BigFloat {
        BigFloat::from_i64(v, 64)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert!(u(1).add(&u(2), &BINARY64).unwrap().ieee_eq(&u(3)));
        assert!(u(10).sub(&u(7), &BINARY64).unwrap().ieee_eq(&u(3)));
        assert!(u(3).mul(&u(5), &BINARY64).unwrap().ieee_eq(&u(15)));
        // 15 / 4 == 15 * 2^-2, exactly representable.
        let mut expected = u(15);
        expected.mul_pow2(-2);
        assert!(u(15).div(&u(4), &BINARY64).unwrap().ieee_eq(&expected));
    }

    #[test]
    fn test_operator_impls() {
        let a = u(6);
        let b = u(4);
        assert!((&a + &b).ieee_eq(&u(10)));
        assert!((&a - &b).ieee_eq(&u(2)));
        assert!((&a * &b).ieee_eq(&u(24)));
        assert!((&a / &b).ieee_eq(&{
            let mut h = u(3);
            h.mul_pow2(-1);
            h
        }));
        assert!((-&a).ieee_eq(&i(-6)));
    }

    #[test]
    fn test_cancellation_sign() {
        let one = u(1);
        let z = one.sub(&one, &BINARY64).unwrap();
        assert!(z.is_zero() && !z.sign());
        let z = one
            .sub(&one, &BINARY64.with_rounding_mode(RoundingMode::TowardNegative))
            .unwrap();
        assert!(z.is_zero() && z.sign());

        // Signed zero addition.
        let pz = BigFloat::zero(53, false);
        let nz = BigFloat::zero(53, true);
        assert!(!pz.add(&nz, &BINARY64).unwrap().sign());
        assert!(pz
            .add(&nz, &BINARY64.with_rounding_mode(RoundingMode::TowardNegative))
            .unwrap()
            .sign());
        assert!(nz.add(&nz, &BINARY64).unwrap().sign());
    }

    #[test]
    fn test_special_values() {
        let inf = BigFloat::inf(53, false);
        let ninf = BigFloat::inf(53, true);
        let nan = BigFloat::nan(53, false);
        let zero = BigFloat::zero(53, false);
        let one = u(1);

        assert!(inf.add(&ninf, &BINARY64).unwrap().is_nan());
        assert!(inf.add(&inf, &BINARY64).unwrap().is_inf());
        assert!(inf.sub(&inf, &BINARY64).unwrap().is_nan());
        assert!(nan.add(&one, &BINARY64).unwrap().is_nan());
        assert!(zero.mul(&inf, &BINARY64).unwrap().is_nan());
        assert!(inf.mul(&ninf, &BINARY64).unwrap().is_inf());
        assert!(inf.mul(&ninf, &BINARY64).unwrap().sign());
        assert!(zero.div(&zero, &BINARY64).unwrap().is_nan());
        assert!(inf.div(&inf, &BINARY64).unwrap().is_nan());
        assert!(one.div(&zero, &BINARY64).unwrap().is_inf());
        assert!(one.div(&inf, &BINARY64).unwrap().is_zero());
        let r = i(-1).div(&zero, &BINARY64).unwrap();
        assert!(r.is_inf() && r.sign());
    }

    #[test]
    fn test_sticky_alignment() {
        // 1 + 2^-100 in binary64: the addend is entirely sticky.
        let one = u(1);
        let mut tiny = u(1);
        tiny.mul_pow2(-100);

        let r = one.add(&tiny, &BINARY64).unwrap();
        assert!(r.ieee_eq(&one));
        let one53 = BigFloat::from_u64(1, 53);
        let r = one
            .add(&tiny, &BINARY64.with_rounding_mode(RoundingMode::TowardPositive))
            .unwrap();
        assert!(r.ieee_eq(&one53.next_up(-1022, 1023).unwrap()));
        // And on the subtraction side, 1 - 2^-100 rounds back to 1.
        let r = one.sub(&tiny, &BINARY64).unwrap();
        assert!(r.ieee_eq(&one));
        let r = one
            .sub(&tiny, &BINARY64.with_rounding_mode(RoundingMode::TowardZero))
            .unwrap();
        assert!(r.ieee_eq(&one53.next_down(-1022, 1023).unwrap()));
    }

    #[test]
    fn test_mixed_precision_operands() {
        let narrow = BigFloat::from_u64(3, 8);
        let wide = BigFloat::from_u64(1 << 40, 60);
        let r = narrow.add(&wide, &BINARY64).unwrap();
        assert!(r.ieee_eq(&BigFloat::from_u64((1 << 40) + 3, 64)));
    }

    #[test]
    fn test_exact_required_arithmetic() {
        let exact_fmt = BINARY64.with_rounding_mode(RoundingMode::ExactRequired);
        assert!(u(1).add(&u(2), &exact_fmt).is_ok());
        assert!(u(1).div(&u(4), &exact_fmt).is_ok());
        assert_eq!(
            u(1).div(&u(3), &exact_fmt),
            Err(crate::error::Error::RoundingRequired)
        );
        let mut tiny = u(1);
        tiny.mul_pow2(-100);
        assert_eq!(
            u(1).add(&tiny, &exact_fmt),
            Err(crate::error::Error::RoundingRequired)
        );
    }

    #[test]
    fn test_overflow_and_underflow() {
        let max = BigFloat::max_value(&BINARY32);
        let r = max.add(&max, &BINARY32).unwrap();
        assert!(r.is_inf());
        let mv = BigFloat::min_value(&BINARY32);
        let half = mv.div(&u(2), &BINARY32).unwrap();
        assert!(half.is_zero());
        // Subnormal result of a division between normal values.
        let mn = BigFloat::min_normal(&BINARY32);
        let sub = mn.div(&u(2), &BINARY32).unwrap();
        assert!(!sub.is_zero());
        assert!(sub.ieee_lt(&mn));
    }

    #[test]
    fn test_remainder() {
        assert!(u(100).rem(&u(7), &BINARY64).unwrap().ieee_eq(&u(2)));
        let r = i(-100).rem(&u(7), &BINARY64).unwrap();
        assert!(r.ieee_eq(&i(-2)));
        assert!(u(7).rem(&u(100), &BINARY64).unwrap().ieee_eq(&u(7)));
        // The quotient rounds to nearest, so the result can oppose the
        // dividend's sign: 5 = 2*3 - 1.
        assert!(u(5).rem(&u(3), &BINARY64).unwrap().ieee_eq(&i(-1)));
        assert!(i(-5).rem(&u(3), &BINARY64).unwrap().ieee_eq(&u(1)));
        assert!(u(5).rem(&u(6), &BINARY64).unwrap().ieee_eq(&i(-1)));
        // Midpoints tie to the even quotient.
        assert!(u(6).rem(&u(4), &BINARY64).unwrap().ieee_eq(&i(-2)));
        assert!(u(10).rem(&u(4), &BINARY64).unwrap().ieee_eq(&u(2)));
        assert!(u(3).rem(&u(6), &BINARY64).unwrap().ieee_eq(&u(3)));
        // Exact multiple gives a zero with the dividend's sign.
        let z = i(-21).rem(&u(7), &BINARY64).unwrap();
        assert!(z.is_zero() && z.sign());

        // A huge scale gap exercises the modular reduction: 2^1000 mod 3.
        let mut big = u(1);
        big.mul_pow2(1000);
        assert!(big.rem(&u(3), &BINARY64).unwrap().ieee_eq(&u(1)));

        // Specials.
        let inf = BigFloat::inf(53, false);
        assert!(inf.rem(&u(3), &BINARY64).unwrap().is_nan());
        assert!(u(3).rem(&BigFloat::zero(53, false), &BINARY64).unwrap().is_nan());
        assert!(u(3).rem(&inf, &BINARY64).unwrap().ieee_eq(&u(3)));
    }

    #[test]
    fn test_min_max() {
        // Called through the type so `Ord::max`/`Ord::min` on the owned
        // values cannot shadow the format-directed selectors.
        let nan = BigFloat::nan(53, false);
        let five = u(5);
        assert!(BigFloat::max(&five, &nan, &BINARY64).unwrap().ieee_eq(&five));
        assert!(BigFloat::max(&nan, &five, &BINARY64).unwrap().ieee_eq(&five));
        assert!(BigFloat::min(&nan, &nan, &BINARY64).unwrap().is_nan());
        assert!(BigFloat::max(&u(2), &five, &BINARY64).unwrap().ieee_eq(&five));
        assert!(BigFloat::min(&i(-2), &five, &BINARY64).unwrap().ieee_eq(&i(-2)));

        let pz = BigFloat::zero(53, false);
        let nz = BigFloat::zero(53, true);
        assert!(!BigFloat::max(&pz, &nz, &BINARY64).unwrap().sign());
        assert!(BigFloat::min(&nz, &pz, &BINARY64).unwrap().sign());
    }
}
