//! Roots and powers: sqrt, cbrt, root(n), powi, pow.

use crate::bigint::LossFraction;
use crate::error::Result;
use crate::float::BigFloat;
use crate::format::BinaryFormat;
use crate::operations::widen;
use crate::round::{round_inexact_result, round_result};

// Exactness probes re-raise a rounded candidate to the original power, which
// needs n * precision bits. Skip the probe past this budget and report the
// result as inexact.
const EXACTNESS_PROBE_BITS: u128 = 1 << 20;

impl BigFloat {
    // Newton-Raphson square root at the operand's precision. The input must
    // be a positive normal value.
    pub(crate) fn sqrt_inner(&self) -> Self {
        debug_assert!(self.is_normal() && !self.sign());
        let two = Self::from_u64(2, self.precision());

        // Start the search at max(2, x).
        let mut x = if *self < two { two } else { self.clone() };
        let mut prev = x.clone();
        loop {
            x = (&x + &(self / &x)).scaled(-1);
            // Stop when the iteration stalls or regresses.
            if prev < x || x == prev {
                return x;
            }
            prev = x.clone();
        }
    }

    // The value raised to a positive power, carried out at a precision that
    // keeps every intermediate product exact.
    fn powi_exact(&self, n: u64, bits: u64) -> Self {
        let mut elem = Self::from_u64(1, bits);
        let mut val = self.widened(bits);
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                elem = &elem * &val;
            }
            n >>= 1;
            if n > 0 {
                val = &val * &val;
            }
        }
        elem
    }

    // Rounds the candidate to the target precision and checks whether its
    // n-th power reproduces the operand exactly.
    fn exact_root(&self, candidate: &Self, n: u64, fmt: &BinaryFormat) -> Option<Self> {
        let p = fmt.precision();
        let bits = (n as u128) * (p as u128) + 2;
        if bits > EXACTNESS_PROBE_BITS {
            return None;
        }
        let rounded = candidate.widened(p);
        let probe = rounded.powi_exact(n, bits as u64);
        if probe.ieee_eq(&self.abs()) {
            Some(rounded)
        } else {
            None
        }
    }

    /// Computes the square root, rounded into `fmt`.
    ///
    /// `sqrt(±0) = ±0`, `sqrt(+Inf) = +Inf`; negative operands and NaN
    /// produce NaN.
    pub fn sqrt(&self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign()));
        }
        if self.is_nan() || self.is_negative() {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_inf() {
            return Ok(Self::inf(p, false));
        }

        let w = (2 * p + 16).max(widen(fmt, 2));
        let raw = self.widened(w).sqrt_inner();
        if let Some(exact) = self.exact_root(&raw, 2, fmt) {
            return Ok(round_result(exact, LossFraction::ExactlyZero, fmt)?.0);
        }
        Ok(round_inexact_result(raw, fmt)?.0)
    }

    /// Computes the cube root, rounded into `fmt`. An odd function:
    /// `cbrt(±0) = ±0` and `cbrt(±Inf) = ±Inf`.
    pub fn cbrt(&self, fmt: &BinaryFormat) -> Result<Self> {
        self.root(3, fmt)
    }

    /// Computes the n-th root, rounded into `fmt`.
    ///
    /// For even `n` a negative operand produces NaN; for odd `n` the root
    /// carries the operand's sign. `root(x, 0)` is NaN.
    pub fn root(&self, n: u64, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if n == 0 || self.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        if n == 1 {
            return self.round(fmt);
        }
        let odd = n & 1 == 1;
        if self.is_negative() && !odd {
            return Ok(Self::nan(p, self.sign()));
        }
        if self.is_zero() {
            return Ok(Self::zero(p, self.sign() && odd));
        }
        if self.is_inf() {
            return Ok(Self::inf(p, self.sign() && odd));
        }

        let w = widen(fmt, 10);
        let mag = self.abs().widened(w);
        let raw = if n == 2 {
            mag.sqrt_inner()
        } else {
            // x^(1/n) = e^(log(x) / n)
            let nf = Self::from_u64(n, w);
            Self::exp_inner(&(&Self::log_inner(&mag) / &nf))
        };
        let sign = self.sign() && odd;
        if let Some(exact) = self.exact_root(&raw, n, fmt) {
            let signed = if sign { exact.neg() } else { exact };
            return Ok(round_result(signed, LossFraction::ExactlyZero, fmt)?.0);
        }
        let signed = if sign { raw.neg() } else { raw };
        Ok(round_inexact_result(signed, fmt)?.0)
    }

    /// Raises the value to an integer power, rounded into `fmt`.
    ///
    /// `x^0 = 1` for every x, NaN included. Negative powers of zero produce
    /// a signed infinity and negative powers of infinity a signed zero, with
    /// the sign determined by the parity of `n`.
    pub fn powi(&self, n: i64, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if n == 0 {
            return Ok(Self::one(p, false));
        }
        if n == 1 {
            return self.round(fmt);
        }
        if self.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        let odd = n & 1 == 1;
        let sign = self.sign() && odd;
        if self.is_zero() {
            return Ok(if n < 0 {
                Self::inf(p, sign)
            } else {
                Self::zero(p, sign)
            });
        }
        if self.is_inf() {
            return Ok(if n < 0 {
                Self::zero(p, sign)
            } else {
                Self::inf(p, sign)
            });
        }

        let mag = n.unsigned_abs();
        let exact_bits = (mag as u128) * (self.precision() as u128) + 2;
        let pos = if exact_bits <= EXACTNESS_PROBE_BITS {
            self.powi_exact(mag, exact_bits as u64)
        } else {
            // Binary exponentiation with enough guard bits to absorb the
            // rounding of each intermediate product.
            let log = 64 - mag.leading_zeros() as u64;
            let w = widen(fmt, 2) + 2 * log;
            let mut elem = Self::from_u64(1, w);
            let mut val = self.widened(w);
            let mut k = mag;
            while k > 0 {
                if k & 1 == 1 {
                    elem = &elem * &val;
                }
                k >>= 1;
                if k > 0 {
                    val = &val * &val;
                }
            }
            elem
        };
        if n > 0 {
            if exact_bits <= EXACTNESS_PROBE_BITS {
                return Ok(round_result(pos, LossFraction::ExactlyZero, fmt)?.0);
            }
            return Ok(round_inexact_result(pos, fmt)?.0);
        }
        // The reciprocal's divider classifies the remainder, so exactness
        // of 1/x^|n| falls out of the division itself.
        let one = Self::from_u64(1, pos.precision());
        one.div(&pos, fmt)
    }

    /// Raises the value to the power `n`, rounded into `fmt`.
    ///
    /// Follows the IEEE 754 `pow` special-value table: `x^0 = 1`; NaN in
    /// either operand (with a nonzero power) produces NaN; `(±1)^±Inf` is
    /// `1` (unlike C99 `pow(1, x)`, a NaN exponent still wins); a negative
    /// base with a non-integral power is NaN.
    pub fn pow(&self, n: &Self, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        if n.is_zero() {
            return Ok(Self::one(p, false));
        }
        if self.is_nan() || n.is_nan() {
            return Ok(Self::nan(p, self.sign()));
        }
        let one = Self::one(self.precision(), false);
        if n.is_inf() {
            // A base of magnitude one absorbs any infinite exponent;
            // otherwise the magnitude decides.
            let mag = self.abs();
            let big = mag.cmp_abs(&one);
            return Ok(match big {
                core::cmp::Ordering::Equal => Self::one(p, false),
                core::cmp::Ordering::Greater => {
                    if n.sign() {
                        Self::zero(p, false)
                    } else {
                        Self::inf(p, false)
                    }
                }
                core::cmp::Ordering::Less => {
                    if n.sign() {
                        Self::inf(p, false)
                    } else {
                        Self::zero(p, false)
                    }
                }
            });
        }
        let n_integral = n.is_integral();
        let n_odd = n_integral && {
            let (_, magnitude) = n.to_bigint();
            magnitude.is_odd()
        };
        if self.is_zero() {
            let sign = self.sign() && n_odd;
            return Ok(if n.sign() {
                Self::inf(p, sign)
            } else {
                Self::zero(p, sign)
            });
        }
        if self.is_inf() {
            let sign = self.sign() && n_odd;
            return Ok(if n.sign() {
                Self::zero(p, sign)
            } else {
                Self::inf(p, sign)
            });
        }
        if self.is_negative() && !n_integral {
            return Ok(Self::nan(p, true));
        }
        // Small integral powers go through the integer path, which detects
        // exact results.
        if n_integral {
            if let Ok(small) = n.to_i64_exact() {
                return self.powi(small, fmt);
            }
        }

        let w = widen(fmt, 10);
        let mag = self.abs().widened(w);
        let raw = Self::exp_inner(&(&n.widened(w) * &Self::log_inner(&mag)));
        let signed = if self.sign() && n_odd { raw.neg() } else { raw };
        Ok(round_inexact_result(signed, fmt)?.0)
    }
}
