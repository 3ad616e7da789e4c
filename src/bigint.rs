//! The scaled-significand engine: arbitrary-precision unsigned integers,
//! stored as little-endian 64-bit limbs. The engine only carries the
//! operations that floating point significand manipulation and base
//! conversion need.

use core::cmp::Ordering;
use core::ops::{Add, Mul, Sub};

use smallvec::SmallVec;

/// Describes the fraction that a truncating operation discarded, relative to
/// half of the least significant kept bit: the three-valued rounding
/// indicator (exact / below half / at half / above half) that drives every
/// rounding decision in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossFraction {
    ExactlyZero,
    LessThanHalf,
    ExactlyHalf,
    MoreThanHalf,
}

impl LossFraction {
    pub fn is_exactly_zero(&self) -> bool {
        matches!(self, LossFraction::ExactlyZero)
    }
    pub fn is_lt_half(&self) -> bool {
        matches!(self, LossFraction::LessThanHalf)
    }
    pub fn is_exactly_half(&self) -> bool {
        matches!(self, LossFraction::ExactlyHalf)
    }
    pub fn is_mt_half(&self) -> bool {
        matches!(self, LossFraction::MoreThanHalf)
    }

    /// The loss as seen from the other side of a subtraction borrow.
    pub fn invert(&self) -> LossFraction {
        match self {
            LossFraction::ExactlyZero => LossFraction::ExactlyZero,
            LossFraction::LessThanHalf => LossFraction::MoreThanHalf,
            LossFraction::ExactlyHalf => LossFraction::ExactlyHalf,
            LossFraction::MoreThanHalf => LossFraction::LessThanHalf,
        }
    }
}

/// An unsigned arbitrary-precision integer.
///
/// The limb vector is kept canonical: no most-significant zero limbs, and
/// zero is the empty vector. The inline capacity covers two limbs, which is
/// enough for every IEEE interchange format up to binary128 without a heap
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    parts: SmallVec<[u64; 2]>,
}

impl BigInt {
    pub fn zero() -> Self {
        BigInt {
            parts: SmallVec::new(),
        }
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    pub fn from_u64(val: u64) -> Self {
        let mut parts = SmallVec::new();
        if val != 0 {
            parts.push(val);
        }
        BigInt { parts }
    }

    pub fn from_u128(val: u128) -> Self {
        let mut res = Self::from_u64((val >> 64) as u64);
        res.shift_left(64);
        res.inplace_add(&Self::from_u64(val as u64));
        res
    }

    /// Returns the number 2^bit.
    pub fn one_hot(bit: usize) -> Self {
        let mut res = Self::one();
        res.shift_left(bit);
        res
    }

    /// Returns a mask of `bits` consecutive 1s.
    pub fn all1s(bits: usize) -> Self {
        let mut res = Self::one_hot(bits);
        res.inplace_sub(&Self::one());
        res
    }

    pub fn is_zero(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn is_odd(&self) -> bool {
        self.parts.first().is_some_and(|p| p & 1 == 1)
    }

    /// Returns the lowest 64 bits.
    pub fn as_u64(&self) -> u64 {
        self.parts.first().copied().unwrap_or(0)
    }

    /// Returns the lowest 128 bits.
    pub fn as_u128(&self) -> u128 {
        let lo = self.as_u64() as u128;
        let hi = self.parts.get(1).copied().unwrap_or(0) as u128;
        (hi << 64) | lo
    }

    /// The 1-based index of the highest set bit, or zero for the number zero.
    pub fn msb_index(&self) -> usize {
        match self.parts.last() {
            None => 0,
            Some(top) => {
                (self.parts.len() - 1) * 64 + (64 - top.leading_zeros() as usize)
            }
        }
    }

    fn canonicalize(&mut self) {
        while self.parts.last() == Some(&0) {
            self.parts.pop();
        }
    }

    pub fn shift_left(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limbs = bits / 64;
        let rem = bits % 64;
        if rem != 0 {
            let mut carry = 0u64;
            for part in self.parts.iter_mut() {
                let next = *part >> (64 - rem);
                *part = (*part << rem) | carry;
                carry = next;
            }
            if carry != 0 {
                self.parts.push(carry);
            }
        }
        for _ in 0..limbs {
            self.parts.insert(0, 0);
        }
    }

    pub fn shift_right(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limbs = bits / 64;
        let rem = bits % 64;
        if limbs >= self.parts.len() {
            self.parts.clear();
            return;
        }
        self.parts.drain(0..limbs);
        if rem != 0 {
            let len = self.parts.len();
            for i in 0..len {
                let high = if i + 1 < len {
                    self.parts[i + 1] << (64 - rem)
                } else {
                    0
                };
                self.parts[i] = (self.parts[i] >> rem) | high;
            }
        }
        self.canonicalize();
    }

    /// Classifies the bits below position `bit` — the bits that a
    /// `shift_right(bit)` would discard — against half of bit `bit`.
    pub fn get_loss_kind_for_bit(&self, bit: usize) -> LossFraction {
        if bit == 0 || self.is_zero() {
            return LossFraction::ExactlyZero;
        }
        let half_bit = bit - 1;
        let half_set = self.bit_at(half_bit);
        let mut below = false;
        for i in 0..(half_bit / 64).min(self.parts.len()) {
            if self.parts.get(i).copied().unwrap_or(0) != 0 {
                below = true;
                break;
            }
        }
        if !below && half_bit % 64 != 0 {
            let mask = (1u64 << (half_bit % 64)) - 1;
            below = self.parts.get(half_bit / 64).copied().unwrap_or(0) & mask != 0;
        }
        match (half_set, below) {
            (false, false) => LossFraction::ExactlyZero,
            (false, true) => LossFraction::LessThanHalf,
            (true, false) => LossFraction::ExactlyHalf,
            (true, true) => LossFraction::MoreThanHalf,
        }
    }

    fn bit_at(&self, bit: usize) -> bool {
        self.parts
            .get(bit / 64)
            .is_some_and(|p| p >> (bit % 64) & 1 == 1)
    }

    pub fn inplace_add(&mut self, other: &BigInt) {
        while self.parts.len() < other.parts.len() {
            self.parts.push(0);
        }
        let mut carry = false;
        for (i, part) in self.parts.iter_mut().enumerate() {
            let rhs = other.parts.get(i).copied().unwrap_or(0);
            let (sum, c1) = part.overflowing_add(rhs);
            let (sum, c2) = sum.overflowing_add(carry as u64);
            *part = sum;
            carry = c1 | c2;
        }
        if carry {
            self.parts.push(1);
        }
    }

    /// Subtracts `other` from `self`. The caller must ensure `self >= other`.
    pub fn inplace_sub(&mut self, other: &BigInt) {
        debug_assert!(*self >= *other, "subtraction underflow");
        let mut borrow = false;
        for (i, part) in self.parts.iter_mut().enumerate() {
            let rhs = other.parts.get(i).copied().unwrap_or(0);
            let (diff, b1) = part.overflowing_sub(rhs);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            *part = diff;
            borrow = b1 | b2;
        }
        debug_assert!(!borrow);
        self.canonicalize();
    }

    /// Schoolbook multiplication with 128-bit accumulation. The significands
    /// this crate manipulates are a handful of limbs, where this beats the
    /// constant factors of the sub-quadratic algorithms.
    pub fn inplace_mul(&mut self, other: &BigInt) {
        if self.is_zero() || other.is_zero() {
            self.parts.clear();
            return;
        }
        let a = &self.parts;
        let b = &other.parts;
        let mut out: SmallVec<[u64; 2]> = SmallVec::new();
        out.resize(a.len() + b.len(), 0);
        for (i, &ai) in a.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &bj) in b.iter().enumerate() {
                let cur = out[i + j] as u128 + ai as u128 * bj as u128 + carry;
                out[i + j] = cur as u64;
                carry = cur >> 64;
            }
            let mut k = i + b.len();
            while carry != 0 {
                let cur = out[k] as u128 + carry;
                out[k] = cur as u64;
                carry = cur >> 64;
                k += 1;
            }
        }
        self.parts = out;
        self.canonicalize();
    }

    /// Divides `self` by `divisor` in place and returns the remainder.
    pub fn inplace_div(&mut self, divisor: &BigInt) -> BigInt {
        assert!(!divisor.is_zero(), "division by zero");
        if (*self).cmp(divisor) == Ordering::Less {
            let rem = self.clone();
            self.parts.clear();
            return rem;
        }
        // Fast path for a single-limb divisor.
        if divisor.parts.len() == 1 {
            let d = divisor.parts[0] as u128;
            let mut rem = 0u128;
            for part in self.parts.iter_mut().rev() {
                let cur = (rem << 64) | *part as u128;
                *part = (cur / d) as u64;
                rem = cur % d;
            }
            self.canonicalize();
            return BigInt::from_u64(rem as u64);
        }
        // Binary long division, from the most significant bit down.
        let bits = self.msb_index();
        let mut quotient: SmallVec<[u64; 2]> = SmallVec::new();
        quotient.resize(self.parts.len(), 0);
        let mut rem = BigInt::zero();
        for bit in (0..bits).rev() {
            rem.shift_left(1);
            if self.bit_at(bit) {
                rem.inplace_add(&BigInt::one());
            }
            if rem.cmp(divisor) != Ordering::Less {
                rem.inplace_sub(divisor);
                quotient[bit / 64] |= 1 << (bit % 64);
            }
        }
        self.parts = quotient;
        self.canonicalize();
        rem
    }

    /// Returns `self` modulo `m`.
    pub fn rem(&self, m: &BigInt) -> BigInt {
        let mut q = self.clone();
        q.inplace_div(m)
    }

    /// Computes 2^k modulo `m` by square-and-multiply, so callers can reduce
    /// enormous power-of-two scales without materializing them.
    pub fn mod_pow2(k: u64, m: &BigInt) -> BigInt {
        debug_assert!(!m.is_zero());
        let mut result = BigInt::one().rem(m);
        let mut base = BigInt::from_u64(2).rem(m);
        let mut k = k;
        while k > 0 {
            if k & 1 == 1 {
                result.inplace_mul(&base);
                result = result.rem(m);
            }
            let sq = base.clone();
            base.inplace_mul(&sq);
            base = base.rem(m);
            k >>= 1;
        }
        result
    }

    /// Returns `self` raised to the power `exp`.
    pub fn powi(&self, mut exp: u64) -> BigInt {
        let mut result = BigInt::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result.inplace_mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                let sq = base.clone();
                base.inplace_mul(&sq);
            }
        }
        result
    }

    /// Prints the number in base 10.
    pub fn as_decimal(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let ten = BigInt::from_u64(10);
        let mut val = self.clone();
        let mut buff = Vec::new();
        while !val.is_zero() {
            let rem = val.inplace_div(&ten);
            buff.push(char::from_digit(rem.as_u64() as u32, 10).unwrap());
        }
        buff.iter().rev().collect()
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.parts.len() != other.parts.len() {
            return self.parts.len().cmp(&other.parts.len());
        }
        for (a, b) in self.parts.iter().rev().zip(other.parts.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for BigInt {
    type Output = BigInt;
    fn add(mut self, rhs: BigInt) -> BigInt {
        self.inplace_add(&rhs);
        self
    }
}

impl Sub for BigInt {
    type Output = BigInt;
    fn sub(mut self, rhs: BigInt) -> BigInt {
        self.inplace_sub(&rhs);
        self
    }
}

impl Mul for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: &BigInt) -> BigInt {
        let mut res = self.clone();
        res.inplace_mul(rhs);
        res
    }
}

#[test]
fn test_shifts_and_msb() {
    let mut x = BigInt::from_u64(0b1011);
    assert_eq!(x.msb_index(), 4);
    x.shift_left(100);
    assert_eq!(x.msb_index(), 104);
    x.shift_right(100);
    assert_eq!(x, BigInt::from_u64(0b1011));
    x.shift_right(4);
    assert!(x.is_zero());
    assert_eq!(x.msb_index(), 0);
}

#[test]
fn test_loss_kind() {
    let x = BigInt::from_u64(0b10000000);
    assert!(x.get_loss_kind_for_bit(3).is_exactly_zero());
    let x = BigInt::from_u64(0b10000111);
    assert!(x.get_loss_kind_for_bit(3).is_mt_half());
    let x = BigInt::from_u64(0b10000100);
    assert!(x.get_loss_kind_for_bit(3).is_exactly_half());
    let x = BigInt::from_u64(0b10000001);
    assert!(x.get_loss_kind_for_bit(3).is_lt_half());
    // Across a limb boundary.
    let mut x = BigInt::one_hot(70);
    x.inplace_add(&BigInt::one());
    assert!(x.get_loss_kind_for_bit(70).is_lt_half());
}

#[test]
fn test_add_sub_mul() {
    let a = BigInt::from_u128(u128::MAX);
    let b = BigInt::one();
    let c = a.clone() + b.clone();
    assert_eq!(c.msb_index(), 129);
    let d = c - b;
    assert_eq!(d, a);

    let mut x = BigInt::from_u64(u64::MAX);
    x.inplace_mul(&BigInt::from_u64(u64::MAX));
    let expected = BigInt::from_u128(u64::MAX as u128 * u64::MAX as u128);
    assert_eq!(x, expected);
}

#[test]
fn test_division() {
    let v = 0x1234_5678_9abc_def0_1122_3344_5566_7788u128;
    let mut x = BigInt::from_u128(v);
    let rem = x.inplace_div(&BigInt::from_u64(0x9999));
    assert_eq!(x.as_u128(), v / 0x9999);
    assert_eq!(rem.as_u64(), (v % 0x9999) as u64);

    // Multi-limb divisor.
    let big = BigInt::from_u64(3).powi(100);
    let div = BigInt::from_u64(7).powi(30);
    let mut q = big.clone();
    let r = q.inplace_div(&div);
    let mut back = q;
    back.inplace_mul(&div);
    back.inplace_add(&r);
    assert_eq!(back, big);
}

#[test]
fn test_mod_pow2() {
    let m = BigInt::from_u64(1_000_003);
    for k in [0u64, 1, 5, 63, 64, 65, 1000, 100_000] {
        let direct = BigInt::one_hot(k as usize).rem(&m);
        assert_eq!(BigInt::mod_pow2(k, &m), direct);
    }
}

#[test]
fn test_decimal_printing() {
    let mut num = BigInt::one();
    for i in 1..41u64 {
        num.inplace_mul(&BigInt::from_u64(i));
    }
    assert_eq!(
        num.as_decimal(),
        "815915283247897734345611269596115894272000000000"
    );
    assert_eq!(BigInt::zero().as_decimal(), "0");
}

#[test]
fn test_powi() {
    let x = BigInt::from_u64(10).powi(20);
    assert_eq!(x.as_u128(), 100_000_000_000_000_000_000u128);
    assert_eq!(BigInt::from_u64(5).powi(0), BigInt::one());
}
