//! The error taxonomy of the crate.

use thiserror::Error;

/// Errors reported by `BigFloat` and `BinaryFormat` operations.
///
/// All of these are synchronous, typed failures raised at the point of
/// detection. None of them are retried internally: `RoundingRequired` is a
/// deliberate signal of the `ExactRequired` rounding mode, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A format or a raw precision/exponent-range argument violates a
    /// structural invariant (precision < 2, bad exponent width, min >= max,
    /// or a range the engine cannot represent once widened for subnormal
    /// emulation).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation running under `RoundingMode::ExactRequired` produced an
    /// inexact result.
    #[error("rounding necessary")]
    RoundingRequired,

    /// Text input did not parse as a floating point literal.
    #[error("invalid number format: {0}")]
    NumberFormat(String),

    /// An exact narrowing conversion was requested for a value that is NaN,
    /// infinite, fractional, or outside the target range, or a
    /// significand/exponent constructor argument was out of range.
    #[error("value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// NaN payload inspection and similar intentionally-unimplemented
    /// features.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
