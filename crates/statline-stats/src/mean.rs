/// Arithmetic mean of a set of values.
///
/// Returns `None` if `values` is empty.
///
/// # Examples
///
/// ```
/// use statline_stats::mean::arithmetic_mean;
///
/// assert_eq!(arithmetic_mean([1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(arithmetic_mean(std::iter::empty()), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn arithmetic_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Geometric mean of a set of values, computed in log space.
///
/// The result is `exp(mean(ln(x + epsilon)))`. The `epsilon` offset keeps
/// `ln` finite when a value is exactly zero; it should be small relative to
/// the values being averaged.
///
/// Returns `None` if `values` is empty.
///
/// # Examples
///
/// ```
/// use statline_stats::mean::geometric_mean;
///
/// let g = geometric_mean([2.0, 8.0], 1e-10).unwrap();
/// assert!((g - 4.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn geometric_mean<I>(values: I, epsilon: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    arithmetic_mean(values.into_iter().map(|v| (v + epsilon).ln())).map(f64::exp)
}
