//! The format-directed rounding pipeline.
//!
//! Values are computed with an unbounded exponent and only then pushed
//! through this module, which enforces a format's exponent range: results
//! above the range clamp to infinity or the largest finite value depending
//! on the rounding direction, and results below it are renormalized onto
//! the coarser subnormal grid, possibly flushing to a signed zero.
//!
//! The range in force is ambient process state behind a mutex, installed
//! for the duration of one rounding and restored on every exit path by an
//! RAII guard. The installed range is widened from the format's range by
//! one exponent above and `precision - 2` below, which is exactly the room
//! subnormal significands occupy.

use core::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

use crate::bigint::LossFraction;
use crate::error::{Error, Result};
use crate::float::BigFloat;
use crate::format::{BinaryFormat, RoundingMode};

/// Hard bounds on the exponents the engine manipulates. A format whose
/// widened range would fall outside these cannot be used.
pub(crate) const ENGINE_EMIN: i64 = -((1 << 62) - 1);
pub(crate) const ENGINE_EMAX: i64 = (1 << 62) - 1;

#[derive(Debug, Clone, Copy)]
struct ExponentRange {
    min: i64,
    max: i64,
}

lazy_static! {
    static ref AMBIENT_RANGE: Mutex<ExponentRange> = Mutex::new(ExponentRange {
        min: ENGINE_EMIN,
        max: ENGINE_EMAX,
    });
}

/// Holds the ambient-range lock with a format's widened range installed.
/// Dropping the guard restores the previous range.
struct RangeGuard {
    slot: MutexGuard<'static, ExponentRange>,
    saved: ExponentRange,
}

impl RangeGuard {
    fn install(fmt: &BinaryFormat) -> Result<RangeGuard> {
        let min = fmt
            .min_exponent()
            .checked_sub(fmt.precision() as i64)
            .and_then(|v| v.checked_add(2));
        let max = fmt.max_exponent().checked_add(1);
        match (min, max) {
            (Some(min), Some(max)) if min >= ENGINE_EMIN && max <= ENGINE_EMAX => {
                let mut slot = AMBIENT_RANGE.lock().unwrap_or_else(|e| e.into_inner());
                let saved = *slot;
                *slot = ExponentRange { min, max };
                Ok(RangeGuard { slot, saved })
            }
            _ => Err(Error::InvalidConfiguration(format!(
                "the exponent range of {} cannot be widened for subnormal arithmetic",
                fmt
            ))),
        }
    }

    fn range(&self) -> ExponentRange {
        *self.slot
    }
}

impl Drop for RangeGuard {
    fn drop(&mut self) {
        *self.slot = self.saved;
    }
}

/// Rounds `value` into `fmt`: first to the format's precision with an
/// unbounded exponent, then onto the format's exponent range. `loss`
/// carries inexactness the caller already discarded below the least
/// significant bit of `value`.
///
/// Returns the rounded value and whether it differs from the exact result.
/// Under `RoundingMode::ExactRequired` an inexact result is an error.
pub(crate) fn round_result(
    mut value: BigFloat,
    loss: LossFraction,
    fmt: &BinaryFormat,
) -> Result<(BigFloat, bool)> {
    let guard = RangeGuard::install(fmt)?;
    let rm = fmt.rounding_mode();
    let p = fmt.precision();
    value.precision = p;
    let mut ternary = value.normalize(rm, loss);
    if value.is_normal() {
        let range = guard.range();
        // Map the widened ambient range back to the format's normal range.
        let emax = range.max - 1;
        let emin = range.min + p as i64 - 2;
        let nat = value.natural_exponent();
        if nat > emax {
            value = overflow_value(&value, rm, fmt);
            ternary = if value.is_inf() {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        } else if nat < emin {
            ternary = subnormalize(&mut value, ternary, emin, rm);
        }
    }
    drop(guard);
    let inexact = ternary != Ordering::Equal;
    if inexact && rm == RoundingMode::ExactRequired {
        return Err(Error::RoundingRequired);
    }
    Ok((value, inexact))
}

/// Rounds a result that is inexact by construction, such as the value of a
/// transcendental function at a nonzero finite point.
pub(crate) fn round_inexact_result(
    value: BigFloat,
    fmt: &BinaryFormat,
) -> Result<(BigFloat, bool)> {
    if fmt.rounding_mode() == RoundingMode::ExactRequired {
        return Err(Error::RoundingRequired);
    }
    let (res, _) = round_result(value, LossFraction::ExactlyZero, fmt)?;
    Ok((res, true))
}

/// The value a too-large magnitude rounds to: infinity for the modes that
/// round away from the overflow, the largest finite value for the modes
/// that round back toward zero.
fn overflow_value(value: &BigFloat, rm: RoundingMode, fmt: &BinaryFormat) -> BigFloat {
    let round_away = match rm {
        RoundingMode::NearestTiesToEven
        | RoundingMode::AwayFromZero
        | RoundingMode::ExactRequired => true,
        RoundingMode::TowardZero => false,
        RoundingMode::TowardPositive => !value.sign(),
        RoundingMode::TowardNegative => value.sign(),
    };
    if round_away {
        BigFloat::inf(fmt.precision(), value.sign())
    } else {
        let mut res = BigFloat::max_value(fmt);
        res.sign = value.sign();
        res
    }
}

/// Renormalizes a value below the normal range onto the subnormal grid,
/// whose least significant bit sits at `emin - (p-1)` regardless of the
/// value's magnitude. May flush to a signed zero.
fn subnormalize(
    value: &mut BigFloat,
    ternary: Ordering,
    emin: i64,
    rm: RoundingMode,
) -> Ordering {
    let shift = (emin - value.natural_exponent()) as usize;
    let mut loss = value.mantissa.get_loss_kind_for_bit(shift);
    // A half-ulp remainder here is a true midpoint only if the earlier
    // precision rounding was exact. Otherwise the exact value sits on a
    // known side of the midpoint, and rounding to even would round twice.
    if loss.is_exactly_half() && ternary != Ordering::Equal {
        loss = if ternary == Ordering::Less {
            LossFraction::MoreThanHalf
        } else {
            LossFraction::LessThanHalf
        };
    }
    value.mantissa.shift_right(shift);
    value.exp += shift as i64;
    let shifted = value.normalize(rm, loss);
    if shifted == Ordering::Equal {
        ternary
    } else {
        shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{BINARY32, BINARY64};

    fn round32(value: BigFloat, rm: RoundingMode) -> (BigFloat, bool) {
        round_result(value, LossFraction::ExactlyZero, &BINARY32.with_rounding_mode(rm)).unwrap()
    }

    #[test]
    fn test_overflow_clamping() {
        use RoundingMode::*;
        let mut huge = BigFloat::max_value(&BINARY32);
        huge.mul_pow2(1);

        let (r, inexact) = round32(huge.clone(), NearestTiesToEven);
        assert!(r.is_inf() && !r.sign() && inexact);
        let (r, _) = round32(huge.clone(), AwayFromZero);
        assert!(r.is_inf());
        let (r, _) = round32(huge.clone(), TowardZero);
        assert!(r.ieee_eq(&BigFloat::max_value(&BINARY32)));
        let (r, _) = round32(huge.clone(), TowardNegative);
        assert!(r.ieee_eq(&BigFloat::max_value(&BINARY32)));
        let (r, _) = round32(huge.clone(), TowardPositive);
        assert!(r.is_inf());

        let neg = huge.neg();
        let (r, _) = round32(neg.clone(), TowardNegative);
        assert!(r.is_inf() && r.sign());
        let (r, _) = round32(neg.clone(), TowardPositive);
        assert!(r.ieee_eq(&BigFloat::max_value(&BINARY32).neg()));
        let (r, _) = round32(neg, TowardZero);
        assert!(r.ieee_eq(&BigFloat::max_value(&BINARY32).neg()));
    }

    #[test]
    fn test_subnormal_flush_to_zero() {
        use RoundingMode::*;
        // Half of the smallest subnormal: a midpoint between zero and
        // min_value, which ties to the even endpoint, zero.
        let mut half = BigFloat::min_value(&BINARY32);
        half.mul_pow2(-1);

        let (r, inexact) = round32(half.clone(), NearestTiesToEven);
        assert!(r.is_zero() && !r.sign() && inexact);
        let (r, _) = round32(half.clone(), AwayFromZero);
        assert!(r.ieee_eq(&BigFloat::min_value(&BINARY32)));
        let (r, _) = round32(half.clone(), TowardZero);
        assert!(r.is_zero());

        // The flushed zero keeps the sign of the value.
        let (r, _) = round32(half.neg(), NearestTiesToEven);
        assert!(r.is_zero() && r.sign());
        let (r, _) = round32(half.neg(), TowardNegative);
        assert!(r.ieee_eq(&BigFloat::min_value(&BINARY32).neg()));
    }

    #[test]
    fn test_subnormal_rounding_grid() {
        // min_normal / 2 is exactly on the subnormal grid.
        let mut v = BigFloat::min_normal(&BINARY32);
        v.mul_pow2(-1);
        let (r, inexact) = round32(v, RoundingMode::NearestTiesToEven);
        assert!(!inexact);
        assert!(r.ieee_eq(&{
            let mut e = BigFloat::min_normal(&BINARY32);
            e.mul_pow2(-1);
            e
        }));
    }

    #[test]
    fn test_no_double_rounding_at_subnormal_midpoint() {
        // 2^-150 + 2^-200 is just above the zero/min_value midpoint. The
        // precision rounding stage truncates it to exactly 2^-150; if the
        // range stage then treated that as a midpoint, ties-to-even would
        // flush to zero. The ternary correction must round it up instead.
        use crate::bigint::BigInt;
        use crate::float::Category;
        let mut mantissa = BigInt::one_hot(50);
        mantissa.inplace_add(&BigInt::one());
        mantissa.shift_left(13);
        let value = BigFloat::raw(false, -213, mantissa, 64, Category::Normal);

        let (r, inexact) = round32(value, RoundingMode::NearestTiesToEven);
        assert!(inexact);
        assert!(r.ieee_eq(&BigFloat::min_value(&BINARY32)));
    }

    #[test]
    fn test_exact_required() {
        let fmt = BinaryFormat::with_precision(2, RoundingMode::ExactRequired).unwrap();
        assert_eq!(
            round_result(BigFloat::from_u64(100, 64), LossFraction::ExactlyZero, &fmt),
            Err(Error::RoundingRequired)
        );
        // 96 is 3 * 2^5 and fits two significand bits exactly.
        let (r, inexact) =
            round_result(BigFloat::from_u64(96, 64), LossFraction::ExactlyZero, &fmt).unwrap();
        assert!(!inexact);
        assert!(r.ieee_eq(&BigFloat::from_u64(96, 64)));

        assert_eq!(
            round_inexact_result(BigFloat::from_u64(96, 64), &fmt),
            Err(Error::RoundingRequired)
        );
        let (_, inexact) = round_inexact_result(BigFloat::from_u64(96, 64), &BINARY64).unwrap();
        assert!(inexact);
    }

    #[test]
    fn test_unwidenable_range() {
        let fmt = BinaryFormat::with_exponent_range(
            1 << 20,
            ENGINE_EMIN + 10,
            0,
            RoundingMode::NearestTiesToEven,
        )
        .unwrap();
        assert!(matches!(
            round_result(BigFloat::from_u64(1, 24), LossFraction::ExactlyZero, &fmt),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
