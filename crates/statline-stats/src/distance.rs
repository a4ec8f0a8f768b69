/// Euclidean distance between two vectors.
///
/// # Returns
///
/// * `Some(distance)` - if both vectors have the same dimensionality
/// * `None` - if the vectors differ in length
///
/// # Examples
///
/// ```
/// use statline_stats::distance::euclidean;
///
/// assert_eq!(euclidean(&[1.0, 1.0], &[1.0, 1.0]), Some(0.0));
/// assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), Some(5.0));
/// assert_eq!(euclidean(&[0.0], &[0.0, 1.0]), None);
/// ```
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let sum = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>();
    Some(sum.sqrt())
}
