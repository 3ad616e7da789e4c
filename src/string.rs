//! Text conversion: a correctly-rounded parser for decimal and hex-float
//! literals, and scientific-notation printing with enough digits to round
//! trip.

use core::cmp::Ordering;
use core::fmt;

use crate::bigint::{BigInt, LossFraction};
use crate::error::{Error, Result};
use crate::float::{BigFloat, Category};
use crate::format::BinaryFormat;
use crate::round::round_result;

// The number of decimal digits that uniquely identify a p-bit significand:
// ceil(p * log10(2)) plus a digit of slack. 59/196 approximates log10(2)
// from below.
fn decimal_accuracy(precision: u64) -> usize {
    (2 + (precision as usize * 59) / 196).max(2)
}

// Digits and fraction-digit count of a literal like "12.345", in any radix.
fn scan_digits(text: &str, radix: u32) -> Option<(BigInt, i128)> {
    let mut int_part = BigInt::zero();
    let mut frac_digits: i128 = 0;
    let mut seen_dot = false;
    let mut any = false;
    for ch in text.chars() {
        if ch == '.' {
            if seen_dot {
                return None;
            }
            seen_dot = true;
            continue;
        }
        let d = ch.to_digit(radix)? as u64;
        int_part.inplace_mul(&BigInt::from_u64(radix as u64));
        int_part.inplace_add(&BigInt::from_u64(d));
        if seen_dot {
            frac_digits += 1;
        }
        any = true;
    }
    if !any {
        return None;
    }
    Some((int_part, frac_digits))
}

// A signed decimal exponent, capped far beyond any usable range so that
// absurd literals saturate instead of overflowing.
fn scan_exponent(text: &str) -> Option<i128> {
    let (neg, digits) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };
    if digits.is_empty() {
        return None;
    }
    let mut val: i128 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        val = (val * 10 + (b - b'0') as i128).min(1 << 100);
    }
    Some(if neg { -val } else { val })
}

impl BigFloat {
    /// Parses a floating point literal and rounds it into `fmt`.
    ///
    /// Accepted forms, after an optional sign: `NaN`, `Inf`, `Infinity`
    /// (case-insensitive); hex floats like `0x1.8p-2` with a power-of-two
    /// exponent; and decimal literals like `12.25e-3`. The whole input must
    /// match, and only ASCII is accepted.
    pub fn parse(text: &str, fmt: &BinaryFormat) -> Result<Self> {
        Self::parse_impl(text, fmt)
            .ok_or_else(|| Error::NumberFormat(text.to_string()))?
    }

    // None for a malformed literal, Some(Err) for rounding failures.
    fn parse_impl(text: &str, fmt: &BinaryFormat) -> Option<Result<Self>> {
        if !text.is_ascii() {
            return None;
        }
        let mut body = text;
        let mut sign = false;
        if let Some(rest) = body.strip_prefix('+') {
            body = rest;
        } else if let Some(rest) = body.strip_prefix('-') {
            body = rest;
            sign = true;
        }
        let lower = body.to_ascii_lowercase();
        if lower == "nan" {
            return Some(Ok(Self::nan(fmt.precision(), sign)));
        }
        if lower == "inf" || lower == "infinity" {
            return Some(Ok(Self::inf(fmt.precision(), sign)));
        }
        if let Some(hex) = lower.strip_prefix("0x") {
            return Self::parse_hex(hex, sign, fmt);
        }
        Self::parse_decimal(&lower, sign, fmt)
    }

    fn parse_decimal(body: &str, sign: bool, fmt: &BinaryFormat) -> Option<Result<Self>> {
        let (mantissa_text, exp_text) = match body.split_once('e') {
            Some((m, e)) => (m, Some(e)),
            None => (body, None),
        };
        let (int_part, frac_digits) = scan_digits(mantissa_text, 10)?;
        let exp10 = match exp_text {
            Some(e) => scan_exponent(e)?,
            None => 0,
        };
        if int_part.is_zero() {
            return Some(Ok(Self::zero(fmt.precision(), sign)));
        }
        let scale = exp10 - frac_digits;
        let ndigits = int_part.as_decimal().len() as i128;
        // The value lies in [10^(scale+ndigits-1), 10^(scale+ndigits)).
        // Certain overflow and underflow skip the bignum powers entirely.
        let k_hi = scale + ndigits - 1;
        let k_lo = scale + ndigits;
        let p = fmt.precision() as i128;
        if k_hi >= 0 && 3 * k_hi > fmt.max_exponent() as i128 + 2 {
            return Some(Self::saturated(sign, true, fmt));
        }
        if k_lo <= 0 && 3 * k_lo < fmt.min_exponent() as i128 - p - 2 {
            return Some(Self::saturated(sign, false, fmt));
        }
        if scale >= 0 {
            let mut m = int_part;
            m.inplace_mul(&BigInt::from_u64(10).powi(scale as u64));
            let w = (fmt.precision()).max(m.msb_index() as u64);
            let val = Self::raw(sign, 0, m, w, Category::Normal);
            return Some(round_result(val, LossFraction::ExactlyZero, fmt).map(|(v, _)| v));
        }
        // value = I / 10^k = (I << s) / 5^k * 2^(-s-k): divide with enough
        // quotient bits and classify the remainder for correct rounding.
        let k = (-scale) as u64;
        let divisor = BigInt::from_u64(5).powi(k);
        let s = divisor.msb_index() + fmt.precision() as usize + 2;
        let mut q = int_part;
        q.shift_left(s);
        let r = q.inplace_div(&divisor);
        let loss = if r.is_zero() {
            LossFraction::ExactlyZero
        } else {
            let mut r2 = r;
            r2.shift_left(1);
            match r2.cmp(&divisor) {
                Ordering::Less => LossFraction::LessThanHalf,
                Ordering::Equal => LossFraction::ExactlyHalf,
                Ordering::Greater => LossFraction::MoreThanHalf,
            }
        };
        let w = q.msb_index() as u64;
        let exp = -(s as i64) - k as i64;
        let val = Self::raw(sign, exp, q, w, Category::Normal);
        Some(round_result(val, loss, fmt).map(|(v, _)| v))
    }

    fn parse_hex(body: &str, sign: bool, fmt: &BinaryFormat) -> Option<Result<Self>> {
        let (mantissa_text, exp_text) = match body.split_once('p') {
            Some((m, e)) => (m, Some(e)),
            None => (body, None),
        };
        let (int_part, frac_digits) = scan_digits(mantissa_text, 16)?;
        let exp2 = match exp_text {
            Some(e) => scan_exponent(e)?,
            None => 0,
        };
        if int_part.is_zero() {
            return Some(Ok(Self::zero(fmt.precision(), sign)));
        }
        let shift = exp2 - 4 * frac_digits;
        let nat = int_part.msb_index() as i128 - 1 + shift;
        if nat > fmt.max_exponent() as i128 + 1 {
            return Some(Self::saturated(sign, true, fmt));
        }
        if nat < fmt.min_exponent() as i128 - fmt.precision() as i128 - 1 {
            return Some(Self::saturated(sign, false, fmt));
        }
        let w = (fmt.precision()).max(int_part.msb_index() as u64);
        let val = Self::raw(sign, shift as i64, int_part, w, Category::Normal);
        Some(round_result(val, LossFraction::ExactlyZero, fmt).map(|(v, _)| v))
    }

    // A stand-in for a literal whose magnitude is certainly outside the
    // format's range: one ulp past the boundary with sticky loss rounds to
    // the same result every real digit expansion would.
    fn saturated(sign: bool, above: bool, fmt: &BinaryFormat) -> Result<Self> {
        let p = fmt.precision();
        let nat = if above {
            fmt.max_exponent() + 2
        } else {
            fmt.min_exponent() - p as i64 - 2
        };
        let val = Self::raw(
            sign,
            nat - (p as i64 - 1),
            BigInt::one_hot(p as usize - 1),
            p,
            Category::Normal,
        );
        Ok(round_result(val, LossFraction::LessThanHalf, fmt)?.0)
    }

    // The first `n` decimal digits of the magnitude, correctly rounded to
    // nearest-even, and the power-of-ten exponent of the leading digit.
    fn decimal_parts(&self, n: usize) -> (String, i128) {
        debug_assert!(self.is_normal());
        let mut scaled = self.mantissa.clone();
        let mut dec_shift: i128 = 0;
        if self.exp >= 0 {
            scaled.shift_left(self.exp as usize);
        } else {
            let k = (-self.exp) as u64;
            scaled.inplace_mul(&BigInt::from_u64(5).powi(k));
            dec_shift = k as i128;
        }
        let all = scaled.as_decimal();
        let mut e10 = all.len() as i128 - 1 - dec_shift;
        if all.len() <= n {
            let mut digits = all;
            while digits.len() < n {
                digits.push('0');
            }
            return (digits, e10);
        }
        let cut = all.len() - n;
        let divisor = BigInt::from_u64(10).powi(cut as u64);
        let mut half = BigInt::from_u64(5);
        half.inplace_mul(&BigInt::from_u64(10).powi(cut as u64 - 1));
        let r = scaled.inplace_div(&divisor);
        let round_up = match r.cmp(&half) {
            Ordering::Greater => true,
            Ordering::Equal => scaled.is_odd(),
            Ordering::Less => false,
        };
        if round_up {
            scaled.inplace_add(&BigInt::one());
        }
        let digits = scaled.as_decimal();
        if digits.len() > n {
            // Rounded up through a power of ten.
            e10 += 1;
            (digits[..n].to_string(), e10)
        } else {
            (digits, e10)
        }
    }
}

impl fmt::Display for BigFloat {
    /// Scientific notation with a round-trip digit count, or the literals
    /// `NaN`, `Infinity`, and `-Infinity`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.sign() && !self.is_nan() { "-" } else { "" };
        match self.category() {
            Category::NaN => write!(f, "NaN"),
            Category::Infinity => write!(f, "{}Infinity", sign),
            Category::Zero => {
                let n = decimal_accuracy(self.precision());
                write!(f, "{}0.{}e+00", sign, "0".repeat(n - 1))
            }
            Category::Normal => {
                let n = decimal_accuracy(self.precision());
                let (digits, e10) = self.decimal_parts(n);
                write!(f, "{}{}.{}e{:+03}", sign, &digits[..1], &digits[1..], e10)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{RoundingMode, BINARY32, BINARY64};

    #[test]
    fn test_parse_matches_host_parser() {
        for text in [
            "0", "1", "-1.5", "2.5e-3", "12345.6789", "1e10", "0.1", "-0.125",
            "9007199254740993", "3.14159265358979",
        ] {
            let parsed = BigFloat::parse(text, &BINARY64).unwrap();
            let host: f64 = text.parse().unwrap();
            assert_eq!(parsed.to_f64(), host, "{}", text);
        }
    }

    #[test]
    fn test_parse_binary32_tenth() {
        let v = BigFloat::parse("0.1", &BINARY32).unwrap();
        assert_eq!(v.to_f64(), 0.10000000149011612);
    }

    #[test]
    fn test_parse_hex_literals() {
        let cases = [
            ("0x1.8p1", 3.0),
            ("0xff", 255.0),
            ("-0x1p-1", -0.5),
            ("0x0.8", 0.5),
            ("0X10P-4", 1.0),
        ];
        for (text, expected) in cases {
            let v = BigFloat::parse(text, &BINARY64).unwrap();
            assert_eq!(v.to_f64(), expected, "{}", text);
        }
    }

    #[test]
    fn test_parse_keywords() {
        assert!(BigFloat::parse("NaN", &BINARY64).unwrap().is_nan());
        assert!(BigFloat::parse("nan", &BINARY64).unwrap().is_nan());
        let v = BigFloat::parse("Infinity", &BINARY64).unwrap();
        assert!(v.is_inf() && !v.sign());
        let v = BigFloat::parse("-inf", &BINARY64).unwrap();
        assert!(v.is_inf() && v.sign());
        let v = BigFloat::parse("-0", &BINARY64).unwrap();
        assert!(v.is_zero() && v.sign());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in [
            "", "-", "abc", "1.2.3", "1e", "e5", "0x", "12f", "1 ", " 1", "1e+",
            "0x1.8q1", "över",
        ] {
            assert!(
                matches!(BigFloat::parse(text, &BINARY64), Err(Error::NumberFormat(_))),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_extreme_exponents() {
        use RoundingMode::*;
        let v = BigFloat::parse("1e999999999999999999999", &BINARY64).unwrap();
        assert!(v.is_inf() && !v.sign());
        let v = BigFloat::parse("-1e999999999999999999999", &BINARY64).unwrap();
        assert!(v.is_inf() && v.sign());
        let v = BigFloat::parse(
            "1e999999999999999999999",
            &BINARY64.with_rounding_mode(TowardZero),
        )
        .unwrap();
        assert!(v.ieee_eq(&BigFloat::max_value(&BINARY64)));

        let v = BigFloat::parse("1e-999999999999999999999", &BINARY64).unwrap();
        assert!(v.is_zero() && !v.sign());
        let v = BigFloat::parse(
            "-1e-999999999999999999999",
            &BINARY64.with_rounding_mode(AwayFromZero),
        )
        .unwrap();
        assert!(v.ieee_eq(&BigFloat::min_value(&BINARY64).neg()));
    }

    #[test]
    fn test_parse_exact_required() {
        let fmt = BINARY64.with_rounding_mode(RoundingMode::ExactRequired);
        assert!(BigFloat::parse("0.5", &fmt).is_ok());
        assert!(BigFloat::parse("3", &fmt).is_ok());
        assert_eq!(BigFloat::parse("0.1", &fmt), Err(Error::RoundingRequired));
    }

    #[test]
    fn test_display_fixed_cases() {
        assert_eq!(BigFloat::from(2.5f64).to_string(), "2.5000000000000000e+00");
        assert_eq!(BigFloat::from_u64(1, 24).to_string(), "1.00000000e+00");
        assert_eq!(BigFloat::from(-0.0f64).to_string(), "-0.0000000000000000e+00");
        assert_eq!(BigFloat::inf(53, true).to_string(), "-Infinity");
        assert_eq!(BigFloat::nan(53, true).to_string(), "NaN");
        assert_eq!(
            BigFloat::from(0.001953125f64).to_string(),
            "1.9531250000000000e-03"
        );
    }

    #[test]
    fn test_display_parse_round_trip() {
        let values = [
            0.1f64,
            1.0 / 3.0,
            -123456.789,
            1e-40,
            f64::MAX,
            5e-324,
            6.02214076e23,
        ];
        for val in values {
            let v = BigFloat::from(val);
            let back = BigFloat::parse(&v.to_string(), &BINARY64).unwrap();
            assert!(back.ieee_eq(&v), "{}", val);
        }
        // And for a narrower format on its own grid.
        let v = BigFloat::try_from_f32(0.1f32, &BINARY32).unwrap();
        let back = BigFloat::parse(&v.to_string(), &BINARY32).unwrap();
        assert!(back.ieee_eq(&v));
    }
}
