use num_integer::Integer;
use num_rational::Ratio;

/// Fallback denominator cap applied when a caller passes a non-positive one.
const DEFAULT_MAX_DENOMINATOR: i64 = 1_000_000;

/// Finds the closest rational approximation of `x` whose denominator does not
/// exceed `max_denominator`.
///
/// The approximation walks the continued-fraction convergents of `x` and
/// reverts to the previous convergent once the denominator cap is crossed.
/// Non-finite inputs collapse to `0/1`, and any intermediate overflow stops
/// the walk at the last representable convergent.
///
/// # Arguments
///
/// * `x` - The value to approximate.
/// * `max_denominator` - Upper bound on the denominator of the result; values
///   `<= 0` fall back to 1 000 000.
///
/// # Return
///
/// Returns the reduced fraction as a `Ratio<i64>`.
pub fn limit_denominator(x: f64, max_denominator: i64) -> Ratio<i64> {
    if !x.is_finite() {
        return Ratio::new(0, 1);
    }
    let max_den = if max_denominator <= 0 {
        DEFAULT_MAX_DENOMINATOR
    } else {
        max_denominator
    };

    let sign: i64 = if x < 0.0 { -1 } else { 1 };
    let x = x.abs();
    if x == x.floor() {
        return Ratio::new(sign.saturating_mul(x as i64), 1);
    }

    let (mut p0, mut q0, mut p1, mut q1): (i64, i64, i64, i64) = (0, 1, 1, 0);
    let mut n = x;
    while q1 <= max_den {
        let a = n.floor() as i64;
        let next_p = p1.checked_mul(a).and_then(|v| v.checked_add(p0));
        let next_q = q1.checked_mul(a).and_then(|v| v.checked_add(q0));
        let (Some(next_p), Some(next_q)) = (next_p, next_q) else {
            break;
        };
        (p0, q0, p1, q1) = (p1, q1, next_p, next_q);

        if q1 > max_den {
            break;
        }
        if (p1 as f64 / q1 as f64 - x).abs() < 1e-15 {
            break;
        }
        if n == a as f64 {
            break;
        }
        n = 1.0 / (n - a as f64);
        if !n.is_finite() {
            break;
        }
    }

    if q1 > max_den {
        (p1, q1) = (p0, q0);
    }
    if q1 == 0 {
        q1 = 1;
    }
    Ratio::new(sign * p1, q1)
}

/// Greatest common divisor of a slice, 1 for an empty slice.
pub fn gcd_slice(values: &[i64]) -> i64 {
    let gcd = values.iter().fold(0i64, |acc, v| acc.gcd(v));
    if gcd == 0 {
        1
    } else {
        gcd
    }
}

/// Least common multiple of a slice, 1 for an empty slice.
///
/// # Return
///
/// Returns `None` when the accumulated multiple overflows `i64`.
pub fn lcm_slice(values: &[i64]) -> Option<i64> {
    let mut acc: i64 = 1;
    for &v in values {
        if v == 0 {
            return Some(0);
        }
        let g = acc.gcd(&v);
        acc = (acc / g).checked_mul(v.abs())?;
    }
    Some(acc)
}
