//! Numeric helpers shared by the analyzers
//!
//! Every ratio in the pipeline goes through `safe_divide`/`safe_percent` so a
//! zero denominator always yields 0 instead of NaN or infinity.

/// `numerator / denominator`, or 0 when the denominator is zero or not finite
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero
///
/// Scales before dividing so exact shares such as 30% stay exact.
pub fn safe_percent(part: i64, whole: i64) -> f64 {
    safe_divide(part as f64 * 100.0, whole as f64)
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    safe_divide(values.iter().sum(), values.len() as f64)
}

/// Ordinary least-squares slope of `values` against their index `0..n-1`
///
/// slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²); 0 for fewer than two points.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);

    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    safe_divide(n * sum_xy - sum_x * sum_y, n * sum_xx - sum_x * sum_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divide_zero() {
        assert_eq!(safe_divide(10.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, f64::NAN), 0.0);
        assert_eq!(safe_divide(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_safe_percent() {
        assert_eq!(safe_percent(50, 200), 25.0);
        assert_eq!(safe_percent(50, 0), 0.0);
        assert_eq!(safe_percent(-50, 100), -50.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[100.0, 105.0]), 102.5);
    }

    #[test]
    fn test_ols_slope() {
        assert_eq!(ols_slope(&[100.0, 116.0]), 16.0);
        assert_eq!(ols_slope(&[5.0]), 0.0);
        assert_eq!(ols_slope(&[]), 0.0);
        // Perfect line y = 2x + 1
        assert!((ols_slope(&[1.0, 3.0, 5.0, 7.0]) - 2.0).abs() < 1e-9);
        // Flat series
        assert_eq!(ols_slope(&[40.0, 40.0, 40.0]), 0.0);
    }
}
