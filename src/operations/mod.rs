//! Transcendental and algebraic function families. Each public method
//! evaluates at a widened internal precision with an unbounded exponent and
//! hands the result to the rounding pipeline with the caller's format.

mod constants;
mod exp;
mod hyperbolic;
mod invtrig;
mod pow;
mod trig;

use crate::float::BigFloat;
use crate::format::BinaryFormat;

// Extra working bits for the iterative algorithms: `factor` chunks of
// log2(precision), plus a fixed pad for the short precisions.
pub(crate) fn widen(fmt: &BinaryFormat, factor: u64) -> u64 {
    let p = fmt.precision();
    let log = 64 - p.leading_zeros() as u64;
    p + log * factor + 8
}

// A round-to-nearest format with a huge exponent range, for the few internal
// steps that need a format (remainder-based range reduction).
pub(crate) fn working_format(precision: u64) -> BinaryFormat {
    BinaryFormat::raw(precision, -(1 << 56), 1 << 56)
}

impl BigFloat {
    // The value scaled by 2^k. Exact.
    pub(crate) fn scaled(&self, k: i64) -> Self {
        let mut res = self.clone();
        res.mul_pow2(k);
        res
    }

    // The operand brought to the internal working precision.
    pub(crate) fn widened(&self, precision: u64) -> Self {
        use crate::format::RoundingMode;
        self.round_to_precision(precision, RoundingMode::NearestTiesToEven).0
    }

    // A positive big integer rounded to nearest at the working precision.
    // Infallible under round-to-nearest with the huge working range.
    pub(crate) fn from_bigint_lossy(val: &crate::bigint::BigInt, precision: u64) -> Self {
        Self::try_from_bigint(false, val, &working_format(precision))
            .unwrap_or_else(|_| Self::nan(precision, false))
    }
}
