//! `BinaryFormat` describes the shape of a rounding target: significand
//! precision, normal exponent range, and rounding mode.

use crate::error::{Error, Result};

/// The supported rounding-direction attributes.
/// See IEEE 754-2008 Section 4.3.
///
/// `ExactRequired` demands that the operation fail with
/// [`Error::RoundingRequired`](crate::Error::RoundingRequired) rather than
/// return a rounded value. Half-up/half-down tie-breaking modes are not part
/// of binary IEEE arithmetic and are unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    NearestTiesToEven,
    TowardZero,
    TowardPositive,
    TowardNegative,
    AwayFromZero,
    ExactRequired,
}

impl RoundingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::NearestTiesToEven => "NearestTiesToEven",
            RoundingMode::TowardZero => "TowardZero",
            RoundingMode::TowardPositive => "TowardPositive",
            RoundingMode::TowardNegative => "TowardNegative",
            RoundingMode::AwayFromZero => "AwayFromZero",
            RoundingMode::ExactRequired => "ExactRequired",
        }
    }
}

/// An immutable description of precision, normal exponent range, and
/// rounding mode. Every `BigFloat`-producing operation takes one of these
/// and pushes its result through the rounding pipeline it describes.
///
/// The exponent range is the range of the *normal* IEEE exponent: for
/// binary64, `[-1022, 1023]`. Subnormal values occupy exponents below
/// `min_exponent` with reduced precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryFormat {
    precision: u64,
    min_exponent: i64,
    max_exponent: i64,
    rounding_mode: RoundingMode,
}

// IEEE 754-2008 Table 3.5 — binary interchange format parameters.

/// IEEE binary16: 11 significand bits, 5 exponent bits.
pub const BINARY16: BinaryFormat = BinaryFormat::raw(11, -14, 15);
/// IEEE binary32: 24 significand bits, 8 exponent bits.
pub const BINARY32: BinaryFormat = BinaryFormat::raw(24, -126, 127);
/// IEEE binary64: 53 significand bits, 11 exponent bits.
pub const BINARY64: BinaryFormat = BinaryFormat::raw(53, -1022, 1023);
/// IEEE binary128: 113 significand bits, 15 exponent bits.
pub const BINARY128: BinaryFormat = BinaryFormat::raw(113, -16382, 16383);

/// The exponent width used when a caller supplies only precision and
/// rounding mode.
const DEFAULT_EXPONENT_BITS: u32 = 30;

impl BinaryFormat {
    pub(crate) const fn raw(precision: u64, min_exponent: i64, max_exponent: i64) -> Self {
        BinaryFormat {
            precision,
            min_exponent,
            max_exponent,
            rounding_mode: RoundingMode::NearestTiesToEven,
        }
    }

    /// Creates a format with the exponent range derived from a field width:
    /// `max_exponent = 2^(bits-1) - 1` and `min_exponent = -max_exponent + 1`,
    /// the IEEE interchange encoding rule.
    pub fn new(
        precision: u64,
        exponent_bits: u32,
        rounding_mode: RoundingMode,
    ) -> Result<Self> {
        if !(2..=63).contains(&exponent_bits) {
            return Err(Error::InvalidConfiguration(format!(
                "exponent width {} is not expressible (expected 2..=63)",
                exponent_bits
            )));
        }
        let max_exponent = (1i64 << (exponent_bits - 1)) - 1;
        Self::with_exponent_range(precision, -max_exponent + 1, max_exponent, rounding_mode)
    }

    /// Creates a format with the default 30-bit exponent width.
    pub fn with_precision(precision: u64, rounding_mode: RoundingMode) -> Result<Self> {
        Self::new(precision, DEFAULT_EXPONENT_BITS, rounding_mode)
    }

    /// Creates a format from an explicit exponent range.
    pub fn with_exponent_range(
        precision: u64,
        min_exponent: i64,
        max_exponent: i64,
        rounding_mode: RoundingMode,
    ) -> Result<Self> {
        if precision < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "precision {} is below the minimum of 2",
                precision
            )));
        }
        if min_exponent >= max_exponent {
            return Err(Error::InvalidConfiguration(format!(
                "empty exponent range [{}, {}]",
                min_exponent, max_exponent
            )));
        }
        Ok(BinaryFormat {
            precision,
            min_exponent,
            max_exponent,
            rounding_mode,
        })
    }

    /// Returns the same format with a different rounding mode.
    pub fn with_rounding_mode(&self, rounding_mode: RoundingMode) -> Self {
        BinaryFormat {
            rounding_mode,
            ..*self
        }
    }

    /// The number of significand bits, counting the implicit leading bit.
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// The smallest normal exponent.
    pub fn min_exponent(&self) -> i64 {
        self.min_exponent
    }

    /// The largest normal exponent.
    pub fn max_exponent(&self) -> i64 {
        self.max_exponent
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }
}

impl core::fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "(precision:{} exponent:[{}, {}] rm:{})",
            self.precision,
            self.min_exponent,
            self.max_exponent,
            self.rounding_mode.as_str()
        )
    }
}

#[test]
fn test_exponent_width_derivation() {
    use RoundingMode::NearestTiesToEven as even;
    assert_eq!(BinaryFormat::new(11, 5, even).unwrap(), BINARY16);
    assert_eq!(BinaryFormat::new(24, 8, even).unwrap(), BINARY32);
    assert_eq!(BinaryFormat::new(53, 11, even).unwrap(), BINARY64);
    assert_eq!(BinaryFormat::new(113, 15, even).unwrap(), BINARY128);

    let wide = BinaryFormat::with_precision(24, even).unwrap();
    assert_eq!(wide.max_exponent(), (1 << 29) - 1);
    assert_eq!(wide.min_exponent(), -((1 << 29) - 1) + 1);
}

#[test]
fn test_invalid_configurations() {
    use RoundingMode::NearestTiesToEven as even;
    assert!(matches!(
        BinaryFormat::new(1, 8, even),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BinaryFormat::new(24, 64, even),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BinaryFormat::new(24, 0, even),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BinaryFormat::with_exponent_range(24, 10, 10, even),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_with_rounding_mode_preserves_range() {
    let fmt = BINARY64.with_rounding_mode(RoundingMode::TowardZero);
    assert_eq!(fmt.precision(), 53);
    assert_eq!(fmt.min_exponent(), -1022);
    assert_eq!(fmt.max_exponent(), 1023);
    assert_eq!(fmt.rounding_mode(), RoundingMode::TowardZero);
    assert_ne!(fmt, BINARY64);
}
