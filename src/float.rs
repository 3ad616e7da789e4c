//! `BigFloat`, the arbitrary-precision binary floating point value type.
//!
//! A value is stored as an unbounded significand and an unbounded scale:
//! `value = mantissa * 2^exp`, where `exp` is the exponent of the least
//! significant mantissa bit. Normal values keep the significand aligned so
//! that its highest set bit sits exactly at `precision`; the natural IEEE
//! exponent is then `exp + precision - 1`. Exponent-range enforcement
//! (overflow, subnormals) is not part of the value type. It happens in the
//! rounding pipeline, which lets intermediate results live at any magnitude.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::bigint::{BigInt, LossFraction};
use crate::error::{Error, Result};
use crate::format::{BinaryFormat, RoundingMode};

/// The class of a floating point value, part of the IEEE 754 type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    NaN,
    Infinity,
    Zero,
    Normal,
}

/// An arbitrary-precision binary floating point number.
///
/// Each value carries its own precision. The sign is stored for every
/// category, which gives signed zeros and signed infinities; NaN carries a
/// sign bit but no payload.
#[derive(Debug, Clone)]
pub struct BigFloat {
    // The sign bit. True means negative.
    pub(crate) sign: bool,
    // The exponent of the least significant mantissa bit.
    pub(crate) exp: i64,
    // The significand. For Normal values the highest set bit is at
    // `precision` (1-based) once normalized.
    pub(crate) mantissa: BigInt,
    // Number of significand bits, counting the implicit leading bit.
    pub(crate) precision: u64,
    pub(crate) category: Category,
}

impl BigFloat {
    pub(crate) fn raw(
        sign: bool,
        exp: i64,
        mantissa: BigInt,
        precision: u64,
        category: Category,
    ) -> Self {
        debug_assert!(precision >= 2, "precision below the supported minimum");
        BigFloat {
            sign,
            exp,
            mantissa,
            precision,
            category,
        }
    }

    /// Returns zero with the given sign.
    pub fn zero(precision: u64, sign: bool) -> Self {
        Self::raw(sign, 0, BigInt::zero(), precision, Category::Zero)
    }

    /// Returns infinity with the given sign.
    pub fn inf(precision: u64, sign: bool) -> Self {
        Self::raw(sign, 0, BigInt::zero(), precision, Category::Infinity)
    }

    /// Returns NaN. The sign is carried but has no arithmetic meaning.
    pub fn nan(precision: u64, sign: bool) -> Self {
        Self::raw(sign, 0, BigInt::zero(), precision, Category::NaN)
    }

    /// Returns the value one with the given sign.
    pub fn one(precision: u64, sign: bool) -> Self {
        let mut one = Self::raw(sign, 0, BigInt::one(), precision, Category::Normal);
        one.align();
        one
    }

    /// Constructs the value `val` at the given precision, rounding to
    /// nearest if `val` needs more bits than the precision holds.
    pub fn from_u64(val: u64, precision: u64) -> Self {
        let mut res = Self::raw(
            false,
            0,
            BigInt::from_u64(val),
            precision,
            Category::Normal,
        );
        res.normalize(RoundingMode::NearestTiesToEven, LossFraction::ExactlyZero);
        res
    }

    pub fn from_i64(val: i64, precision: u64) -> Self {
        if val < 0 {
            return Self::from_u64(val.unsigned_abs(), precision).neg();
        }
        Self::from_u64(val as u64, precision)
    }

    /// The largest finite value of the format: `(2^p - 1) * 2^(emax-p+1)`.
    pub fn max_value(fmt: &BinaryFormat) -> Self {
        let p = fmt.precision();
        Self::raw(
            false,
            fmt.max_exponent() - (p as i64 - 1),
            BigInt::all1s(p as usize),
            p,
            Category::Normal,
        )
    }

    /// The smallest positive normal value of the format: `2^emin`.
    pub fn min_normal(fmt: &BinaryFormat) -> Self {
        let p = fmt.precision();
        Self::raw(
            false,
            fmt.min_exponent() - (p as i64 - 1),
            BigInt::one_hot(p as usize - 1),
            p,
            Category::Normal,
        )
    }

    /// The smallest positive nonzero value of the format, the bottom of the
    /// subnormal range: `2^(emin-(p-1))`.
    pub fn min_value(fmt: &BinaryFormat) -> Self {
        let p = fmt.precision();
        Self::raw(
            false,
            fmt.min_exponent() - 2 * (p as i64 - 1),
            BigInt::one_hot(p as usize - 1),
            p,
            Category::Normal,
        )
    }

    /// Builds a value from its IEEE interchange fields: a full explicit
    /// significand in `[0, 2^p)` and an exponent in
    /// `[min_exponent - 1, max_exponent + 1]`. The value denoted is
    /// `significand * 2^(exponent - (p-1))`.
    ///
    /// `exponent == max_exponent + 1` encodes the non-finite values: an
    /// infinity when the significand is zero and NaN otherwise (payload
    /// bits are discarded). `exponent == min_exponent - 1` is accepted as an
    /// alias for `min_exponent`, so zeros and subnormals can be spelled the
    /// way the interchange encoding spells them.
    pub fn from_parts(
        sign: bool,
        significand: BigInt,
        exponent: i64,
        fmt: &BinaryFormat,
    ) -> Result<Self> {
        let p = fmt.precision();
        if exponent < fmt.min_exponent() - 1 || exponent > fmt.max_exponent() + 1 {
            return Err(Error::ValueOutOfRange("exponent not in exponent range"));
        }
        if significand.msb_index() as u64 > p {
            return Err(Error::ValueOutOfRange("significand not in precision range"));
        }
        if exponent == fmt.max_exponent() + 1 {
            if significand.is_zero() {
                return Ok(Self::inf(p, sign));
            }
            return Ok(Self::nan(p, sign));
        }
        if significand.is_zero() {
            return Ok(Self::zero(p, sign));
        }
        let exponent = exponent.max(fmt.min_exponent());
        let mut res = Self::raw(
            sign,
            exponent - (p as i64 - 1),
            significand,
            p,
            Category::Normal,
        );
        // Every encodable field combination is exactly representable, so
        // alignment never loses bits.
        res.align();
        Ok(res)
    }

    pub fn is_nan(&self) -> bool {
        self.category == Category::NaN
    }
    pub fn is_inf(&self) -> bool {
        self.category == Category::Infinity
    }
    pub fn is_zero(&self) -> bool {
        self.category == Category::Zero
    }
    pub fn is_normal(&self) -> bool {
        self.category == Category::Normal
    }
    pub fn is_finite(&self) -> bool {
        matches!(self.category, Category::Zero | Category::Normal)
    }

    /// The raw sign bit. True for every negative value, including -0.0 and
    /// NaN values created with a negative sign.
    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn is_negative(&self) -> bool {
        self.sign && !self.is_nan()
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The natural exponent: the power of two of the leading significand
    /// bit. Only meaningful for Normal values.
    pub(crate) fn natural_exponent(&self) -> i64 {
        debug_assert!(self.is_normal());
        self.exp + self.precision as i64 - 1
    }

    /// Returns the value with the sign flipped. Exact; no format involved.
    pub fn neg(&self) -> Self {
        let mut res = self.clone();
        res.sign = !res.sign;
        res
    }

    /// Returns the value with a positive sign. Exact; no format involved.
    pub fn abs(&self) -> Self {
        let mut res = self.clone();
        res.sign = false;
        res
    }

    /// The sign of the value as `±1` at the same precision. NaN stays NaN
    /// and zeros keep their signed-zero identity.
    pub fn signum(&self) -> Self {
        match self.category {
            Category::NaN | Category::Zero => self.clone(),
            _ => Self::one(self.precision, self.sign),
        }
    }

    /// Multiplies the value by `2^k`. Exact.
    pub(crate) fn mul_pow2(&mut self, k: i64) {
        if self.is_normal() {
            self.exp += k;
        }
    }

    /// Folds the loss from a lower truncation into the loss at a higher one.
    pub(crate) fn combine_loss_fraction(msb: LossFraction, lsb: LossFraction) -> LossFraction {
        if !lsb.is_exactly_zero() {
            if msb.is_exactly_zero() {
                return LossFraction::LessThanHalf;
            } else if msb.is_exactly_half() {
                return LossFraction::MoreThanHalf;
            }
        }
        msb
    }

    fn round_away_from_zero(&self, rm: RoundingMode, loss: LossFraction) -> bool {
        debug_assert!(!loss.is_exactly_zero());
        match rm {
            RoundingMode::NearestTiesToEven => {
                loss.is_mt_half() || (loss.is_exactly_half() && self.mantissa.is_odd())
            }
            RoundingMode::TowardZero => false,
            RoundingMode::AwayFromZero => true,
            RoundingMode::TowardPositive => !self.sign,
            RoundingMode::TowardNegative => self.sign,
            RoundingMode::ExactRequired => {
                self.round_away_from_zero(RoundingMode::NearestTiesToEven, loss)
            }
        }
    }

    /// Shifts the significand so the leading bit lands at `precision`,
    /// adjusting `exp` to keep the value unchanged. Must only be called when
    /// no bits can fall off the bottom.
    pub(crate) fn align(&mut self) {
        debug_assert!(self.is_normal() && !self.mantissa.is_zero());
        let p = self.precision as i64;
        let msb = self.mantissa.msb_index() as i64;
        if msb > p {
            debug_assert!(self
                .mantissa
                .get_loss_kind_for_bit((msb - p) as usize)
                .is_exactly_zero());
            self.mantissa.shift_right((msb - p) as usize);
            self.exp += msb - p;
        } else if msb < p {
            self.mantissa.shift_left((p - msb) as usize);
            self.exp -= p - msb;
        }
    }

    /// Brings the significand back to `precision` bits, rounding per `rm`.
    /// `loss` carries inexactness that the caller already discarded below
    /// the current least significant bit.
    ///
    /// Returns the relation of the stored magnitude to the exact magnitude:
    /// `Less` when the stored value rounded down, `Greater` when it rounded
    /// away from zero, `Equal` when nothing was lost.
    pub(crate) fn normalize(&mut self, rm: RoundingMode, loss: LossFraction) -> Ordering {
        if self.category != Category::Normal {
            return Ordering::Equal;
        }
        let mut loss = loss;
        let p = self.precision as i64;
        let msb = self.mantissa.msb_index() as i64;
        if msb > p {
            let bits = (msb - p) as usize;
            loss = Self::combine_loss_fraction(self.mantissa.get_loss_kind_for_bit(bits), loss);
            self.mantissa.shift_right(bits);
            self.exp += bits as i64;
        }
        if self.mantissa.is_zero() && loss.is_exactly_zero() {
            self.category = Category::Zero;
            self.exp = 0;
            return Ordering::Equal;
        }
        let mut ternary = Ordering::Equal;
        if !loss.is_exactly_zero() {
            if self.round_away_from_zero(rm, loss) {
                self.mantissa.inplace_add(&BigInt::one());
                if self.mantissa.msb_index() as i64 > p {
                    // Carry out of the top bit. The low bit is zero here.
                    self.mantissa.shift_right(1);
                    self.exp += 1;
                }
                ternary = Ordering::Greater;
            } else {
                ternary = Ordering::Less;
            }
        }
        if self.mantissa.is_zero() {
            // The whole significand was shifted out and rounded down.
            self.category = Category::Zero;
            self.exp = 0;
            return ternary;
        }
        let msb = self.mantissa.msb_index() as i64;
        if msb < p {
            self.mantissa.shift_left((p - msb) as usize);
            self.exp -= p - msb;
        }
        ternary
    }

    /// Re-rounds the value to a different precision with an unbounded
    /// exponent, returning the rounded value and the magnitude ternary.
    pub(crate) fn round_to_precision(
        &self,
        precision: u64,
        rm: RoundingMode,
    ) -> (Self, Ordering) {
        let mut res = self.clone();
        res.precision = precision;
        let ternary = res.normalize(rm, LossFraction::ExactlyZero);
        (res, ternary)
    }

    // --- comparison ---

    /// Compares magnitudes. Callers must filter NaN first.
    pub(crate) fn cmp_abs(&self, other: &Self) -> Ordering {
        use Category::*;
        match (self.category, other.category) {
            (Zero, Zero) => Ordering::Equal,
            (Zero, _) => Ordering::Less,
            (_, Zero) => Ordering::Greater,
            (Infinity, Infinity) => Ordering::Equal,
            (Infinity, _) => Ordering::Greater,
            (_, Infinity) => Ordering::Less,
            (Normal, Normal) => {
                let ne = self.natural_exponent().cmp(&other.natural_exponent());
                if ne != Ordering::Equal {
                    return ne;
                }
                if self.precision == other.precision {
                    return self.mantissa.cmp(&other.mantissa);
                }
                // Widen the narrower significand so both sit on one grid.
                let mut a = self.mantissa.clone();
                let mut b = other.mantissa.clone();
                if self.precision < other.precision {
                    a.shift_left((other.precision - self.precision) as usize);
                } else {
                    b.shift_left((self.precision - other.precision) as usize);
                }
                a.cmp(&b)
            }
            (NaN, _) | (_, NaN) => unreachable!("NaN must be filtered before cmp_abs"),
        }
    }

    /// IEEE 754 comparison. Returns `None` when either operand is NaN;
    /// zeros compare equal regardless of sign; values of different
    /// precisions compare by value.
    pub fn ieee_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(match (self.sign, other.sign) {
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
            (true, false) => {
                if self.is_zero() && other.is_zero() {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.is_zero() && other.is_zero() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
        })
    }

    pub fn ieee_eq(&self, other: &Self) -> bool {
        self.ieee_cmp(other) == Some(Ordering::Equal)
    }

    /// True when the operands are unordered or unequal. This is the IEEE
    /// negation of `ieee_eq`, so it is true when either operand is NaN.
    pub fn ieee_ne(&self, other: &Self) -> bool {
        !self.ieee_eq(other)
    }

    pub fn ieee_lt(&self, other: &Self) -> bool {
        self.ieee_cmp(other) == Some(Ordering::Less)
    }

    pub fn ieee_le(&self, other: &Self) -> bool {
        matches!(
            self.ieee_cmp(other),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )
    }

    pub fn ieee_gt(&self, other: &Self) -> bool {
        self.ieee_cmp(other) == Some(Ordering::Greater)
    }

    pub fn ieee_ge(&self, other: &Self) -> bool {
        matches!(
            self.ieee_cmp(other),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )
    }

    // --- neighbors ---

    /// Errors unless the value is exactly representable at its precision
    /// within the given normal exponent range (subnormals included).
    fn check_in_range(&self, min_exponent: i64, max_exponent: i64) -> Result<()> {
        if !self.is_normal() {
            return Ok(());
        }
        let nat = self.natural_exponent();
        if nat > max_exponent {
            return Err(Error::ValueOutOfRange(
                "value not representable in the provided exponent range",
            ));
        }
        if nat < min_exponent {
            let shift = min_exponent - nat;
            if shift >= self.precision as i64
                || !self
                    .mantissa
                    .get_loss_kind_for_bit(shift as usize)
                    .is_exactly_zero()
            {
                return Err(Error::ValueOutOfRange(
                    "value not representable in the provided exponent range",
                ));
            }
        }
        Ok(())
    }

    // Drops to the subnormal grid of the range when the value sits below
    // min_exponent. Lossless per check_in_range.
    fn grid_parts(&self, min_exponent: i64) -> (BigInt, i64) {
        let mut m = self.mantissa.clone();
        let mut e = self.exp;
        let nat = self.natural_exponent();
        if nat < min_exponent {
            let shift = (min_exponent - nat) as usize;
            m.shift_right(shift);
            e += shift as i64;
        }
        (m, e)
    }

    fn succ_magnitude(&self, min_exponent: i64, max_exponent: i64) -> Self {
        let p = self.precision;
        let (mut m, mut e) = self.grid_parts(min_exponent);
        m.inplace_add(&BigInt::one());
        if m.msb_index() as u64 > p {
            m.shift_right(1);
            e += 1;
            if e + p as i64 - 1 > max_exponent {
                return Self::inf(p, self.sign);
            }
        }
        let mut res = Self::raw(self.sign, e, m, p, Category::Normal);
        res.align();
        res
    }

    fn pred_magnitude(&self, min_exponent: i64) -> Self {
        let p = self.precision;
        let (mut m, mut e) = self.grid_parts(min_exponent);
        let nat = e + m.msb_index() as i64 - 1;
        if m == BigInt::one_hot(p as usize - 1) && nat > min_exponent {
            // Crossing into the binade below, where the grid is finer.
            m.shift_left(1);
            e -= 1;
        }
        m.inplace_sub(&BigInt::one());
        if m.is_zero() {
            return Self::zero(p, self.sign);
        }
        let mut res = Self::raw(self.sign, e, m, p, Category::Normal);
        res.align();
        res
    }

    /// The adjacent value toward positive infinity on the grid of this
    /// value's precision and the given exponent range.
    ///
    /// NaN and positive infinity return themselves; zeros of either sign
    /// step to the smallest positive subnormal; negative infinity steps to
    /// the most negative finite value; the largest finite value steps to
    /// positive infinity. Errors when the value itself is not representable
    /// in the range.
    pub fn next_up(&self, min_exponent: i64, max_exponent: i64) -> Result<Self> {
        self.check_in_range(min_exponent, max_exponent)?;
        let p = self.precision;
        match self.category {
            Category::NaN => Ok(self.clone()),
            Category::Infinity => {
                if self.sign {
                    Ok(Self::raw(
                        true,
                        max_exponent - (p as i64 - 1),
                        BigInt::all1s(p as usize),
                        p,
                        Category::Normal,
                    ))
                } else {
                    Ok(self.clone())
                }
            }
            Category::Zero => {
                // Both zeros step up to the smallest positive value.
                let lsb = min_exponent - 2 * (p as i64 - 1);
                Ok(Self::raw(
                    false,
                    lsb,
                    BigInt::one_hot(p as usize - 1),
                    p,
                    Category::Normal,
                ))
            }
            Category::Normal => {
                if self.sign {
                    Ok(self.pred_magnitude(min_exponent))
                } else {
                    Ok(self.succ_magnitude(min_exponent, max_exponent))
                }
            }
        }
    }

    /// The adjacent value toward negative infinity. `next_down(x)` is
    /// `-next_up(-x)`.
    pub fn next_down(&self, min_exponent: i64, max_exponent: i64) -> Result<Self> {
        Ok(self.neg().next_up(min_exponent, max_exponent)?.neg())
    }

    /// The adjacent value in the direction of `direction`. Equal values
    /// (including `-0.0` vs `0.0`) return `direction` itself; a NaN on
    /// either side propagates.
    pub fn next_after(
        &self,
        direction: &Self,
        min_exponent: i64,
        max_exponent: i64,
    ) -> Result<Self> {
        match self.ieee_cmp(direction) {
            Some(Ordering::Equal) => Ok(direction.clone()),
            Some(Ordering::Less) => self.next_up(min_exponent, max_exponent),
            Some(Ordering::Greater) => self.next_down(min_exponent, max_exponent),
            None => {
                if direction.is_nan() {
                    Ok(direction.clone())
                } else {
                    Ok(self.clone())
                }
            }
        }
    }
}

// The derived ordering traits implement the total order over values:
// NaN sorts above everything (sign and payload ignored), -0.0 sorts below
// 0.0, and among equal values the lower precision sorts lower — NaNs
// included. This gives `Eq`/`Hash` semantics usable in maps; IEEE
// semantics live in the `ieee_*` methods.
impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => return self.precision.cmp(&other.precision),
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        let ord = match (self.sign, other.sign) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        };
        ord.then_with(|| self.precision.cmp(&other.precision))
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigFloat {}

impl Hash for BigFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.category as u8);
        if self.is_nan() {
            // NaNs of one precision are equal regardless of sign.
            self.precision.hash(state);
            return;
        }
        self.sign.hash(state);
        self.exp.hash(state);
        self.mantissa.hash(state);
        self.precision.hash(state);
    }
}
