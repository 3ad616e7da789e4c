//! Arbitrary-precision IEEE 754-2008 binary floating point arithmetic.
//!
//! [`BigFloat`] is an immutable value with its own significand width, and
//! every operation takes a [`BinaryFormat`] describing the precision,
//! exponent range, and rounding mode of the result. Overflow, subnormal
//! rounding, and signed-zero/NaN/infinity propagation follow IEEE 754-2008,
//! whether the precision is 2 bits or a million.
//!
//! ```
//! use bigfloat::{BigFloat, BinaryFormat, RoundingMode, BINARY64};
//!
//! let a = BigFloat::parse("0.1", &BINARY64)?;
//! let b = BigFloat::parse("0.2", &BINARY64)?;
//! assert_eq!(a.add(&b, &BINARY64)?.to_f64(), 0.1 + 0.2);
//!
//! // Ties-to-even at two bits of precision: 5 is rounded to 4.
//! let tiny = BinaryFormat::with_precision(2, RoundingMode::NearestTiesToEven)?;
//! assert_eq!(BigFloat::try_from_u64(5, &tiny)?.to_f64(), 4.0);
//! # Ok::<(), bigfloat::Error>(())
//! ```

mod arithmetic;
mod bigint;
mod cast;
mod error;
mod float;
mod format;
mod operations;
mod round;
mod string;
mod utils;

pub use self::bigint::BigInt;
pub use self::error::{Error, Result};
pub use self::float::{BigFloat, Category};
pub use self::format::{
    BinaryFormat, RoundingMode, BINARY128, BINARY16, BINARY32, BINARY64,
};
