use itertools::Itertools;

/// Rounds `value` to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Rounds every value of a slice to a fixed number of decimal digits.
pub fn round_slice(values: &[f64], digits: u32) -> Vec<f64> {
    values.iter().map(|v| round_to(*v, digits)).collect()
}

/// Replaces the `n`-th (1-based) occurrence of `pattern` in `haystack`.
///
/// The string is returned unchanged when there are fewer than `n` occurrences
/// or when `n` is zero.
pub fn replace_nth(haystack: &str, pattern: &str, replacement: &str, n: usize) -> String {
    if n == 0 || pattern.is_empty() {
        return haystack.to_string();
    }
    let mut result = String::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut seen = 0;
    while let Some(idx) = rest.find(pattern) {
        seen += 1;
        if seen == n {
            result.push_str(&rest[..idx]);
            result.push_str(replacement);
            result.push_str(&rest[idx + pattern.len()..]);
            return result;
        }
        result.push_str(&rest[..idx + pattern.len()]);
        rest = &rest[idx + pattern.len()..];
    }
    result.push_str(rest);
    result
}

/// Deduplicates a label sequence, keeping first-appearance order.
pub fn unique_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    labels.into_iter().unique().collect()
}

/// Symmetric difference of two label sets.
///
/// Labels present only on the left come first (in left order), followed by
/// labels present only on the right (in right order). Inputs are expected to
/// be deduplicated already.
pub fn symmetric_difference<'a>(left: &[&'a str], right: &[&'a str]) -> Vec<&'a str> {
    let mut diff: Vec<&str> = left
        .iter()
        .filter(|label| !right.contains(label))
        .copied()
        .collect();
    diff.extend(right.iter().filter(|label| !left.contains(label)).copied());
    diff
}
