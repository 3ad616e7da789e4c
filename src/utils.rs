//! Test helpers shared by the unit tests and benchmarks.

/// Interesting values that the tests use to catch edge cases.
#[allow(dead_code)]
pub fn get_special_test_values() -> [f64; 20] {
    [
        -f64::NAN,
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::EPSILON,
        -f64::EPSILON,
        0.000000000000000000000000000000000000001,
        f64::MIN,
        f64::MAX,
        std::f64::consts::PI,
        std::f64::consts::LN_2,
        std::f64::consts::SQRT_2,
        std::f64::consts::E,
        0.0,
        -0.0,
        10.,
        -10.,
        -0.00001,
        0.1,
        355. / 113.,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float::BigFloat;
    use crate::format::BINARY64;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Rust `%` is fmod; fold it onto the nearest-quotient grid of the IEEE
    // remainder. `None` marks a midpoint, where the quotient parity is not
    // recoverable from the fold alone.
    fn host_remainder(a: f64, b: f64) -> Option<f64> {
        use core::cmp::Ordering;
        if a.is_nan() || b.is_nan() || a.is_infinite() || b == 0.0 {
            return Some(f64::NAN);
        }
        if b.is_infinite() {
            return Some(a);
        }
        let y = b.abs();
        let r = a % y;
        // Both comparisons are exact: doubling a magnitude below f64::MAX/2
        // and halving a normal value lose no bits.
        let beyond_half = if y <= f64::MAX / 2.0 {
            match (2.0 * r.abs()).partial_cmp(&y) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => return None,
                _ => false,
            }
        } else {
            match r.abs().partial_cmp(&(y / 2.0)) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => return None,
                _ => false,
            }
        };
        Some(if !beyond_half {
            r
        } else if r.is_sign_negative() {
            r + y
        } else {
            r - y
        })
    }

    fn check_pair(v0: f64, v1: f64) {
        let f0 = BigFloat::from(v0);
        let f1 = BigFloat::from(v1);

        let check = |mine: BigFloat, host: f64, op: &str| {
            let r = mine.to_f64();
            assert_eq!(r.is_nan(), host.is_nan(), "{}({}, {})", op, v0, v1);
            if !host.is_nan() {
                assert_eq!(r, host, "{}({}, {})", op, v0, v1);
                assert_eq!(
                    r.is_sign_negative(),
                    host.is_sign_negative(),
                    "{}({}, {}) sign",
                    op,
                    v0,
                    v1
                );
            }
        };
        check(f0.add(&f1, &BINARY64).unwrap(), v0 + v1, "add");
        check(f0.sub(&f1, &BINARY64).unwrap(), v0 - v1, "sub");
        check(f0.mul(&f1, &BINARY64).unwrap(), v0 * v1, "mul");
        check(f0.div(&f1, &BINARY64).unwrap(), v0 / v1, "div");
        if let Some(host_rem) = host_remainder(v0, v1) {
            check(f0.rem(&f1, &BINARY64).unwrap(), host_rem, "rem");
        }
        // The host min/max may return either zero when the signs differ.
        // The selectors are called through the type so `Ord::min`/`Ord::max`
        // on the owned values cannot shadow them.
        if !(v0 == 0.0 && v1 == 0.0) {
            check(BigFloat::min(&f0, &f1, &BINARY64).unwrap(), v0.min(v1), "min");
            check(BigFloat::max(&f0, &f1, &BINARY64).unwrap(), v0.max(v1), "max");
        }
    }

    #[test]
    fn test_arithmetic_special_value_grid() {
        for v0 in get_special_test_values() {
            for v1 in get_special_test_values() {
                check_pair(v0, v1);
            }
        }
    }

    #[test]
    fn test_arithmetic_random_bit_patterns() {
        // Raw bit patterns cover NaNs, infinities, and subnormals.
        let mut rng = StdRng::seed_from_u64(0x1337);
        for _ in 0..2000 {
            let v0 = f64::from_bits(rng.gen::<u64>());
            let v1 = f64::from_bits(rng.gen::<u64>());
            check_pair(v0, v1);
        }
    }

    #[test]
    fn test_comparison_matches_host() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut values: Vec<f64> = get_special_test_values().to_vec();
        for _ in 0..200 {
            values.push(f64::from_bits(rng.gen::<u64>()));
        }
        for &v0 in &values {
            for &v1 in &values {
                let f0 = BigFloat::from(v0);
                let f1 = BigFloat::from(v1);
                assert_eq!(f0.ieee_lt(&f1), v0 < v1, "{} < {}", v0, v1);
                assert_eq!(f0.ieee_le(&f1), v0 <= v1, "{} <= {}", v0, v1);
                assert_eq!(f0.ieee_eq(&f1), v0 == v1, "{} == {}", v0, v1);
                assert_eq!(f0.ieee_ne(&f1), v0 != v1, "{} != {}", v0, v1);
            }
        }
    }
}
