//! Rescaling of normalized vectors into strictly positive space
//!
//! The centroid update takes logarithms, so points are moved from `[0, 1]`
//! into `[SCALED_MIN, SCALED_MAX]` by a second min-max pass over the points
//! being clustered.

use statline_analysis::normalization::NormalizedVector;
use statline_model::TRACKED_LEN;
use statline_stats::range::MinMaxRange;

/// Lower bound of a scaled coordinate.
pub const SCALED_MIN: f64 = 1.0;

/// Upper bound of a scaled coordinate.
pub const SCALED_MAX: f64 = 10.0;

/// A point in the scaled clustering space, in tracked-stat order.
pub type Point = [f64; TRACKED_LEN];

/// Rescales each coordinate over `vectors` into `[SCALED_MIN, SCALED_MAX]`.
///
/// A coordinate with no spread maps to `SCALED_MIN`.
#[must_use]
pub fn scale<'a, I>(vectors: I) -> Vec<Point>
where
    I: IntoIterator<Item = &'a NormalizedVector>,
    I::IntoIter: Clone,
{
    let vectors = vectors.into_iter();
    let ranges: [Option<MinMaxRange>; TRACKED_LEN] = std::array::from_fn(|i| {
        MinMaxRange::from_values(vectors.clone().map(|v| v.as_slice()[i]))
    });
    vectors
        .map(|vector| {
            std::array::from_fn(|i| {
                let value = vector.as_slice()[i];
                ranges[i].map_or(SCALED_MIN, |range| {
                    range.rescale(value, SCALED_MIN, SCALED_MAX)
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(fill: f64, first: f64) -> NormalizedVector {
        let mut values = [fill; TRACKED_LEN];
        values[0] = first;
        NormalizedVector::new(values)
    }

    #[test]
    fn test_scale_spans_range() {
        let vectors = [vector(0.5, 0.2), vector(0.5, 0.6), vector(0.5, 1.0)];
        let points = scale(&vectors);
        assert_eq!(points.len(), 3);
        assert!((points[0][0] - 1.0).abs() < 1e-12);
        assert!((points[1][0] - 5.5).abs() < 1e-12);
        assert!((points[2][0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_coordinate_maps_to_min() {
        let vectors = [vector(0.5, 0.0), vector(0.5, 1.0)];
        let points = scale(&vectors);
        for point in &points {
            assert!(point[1..].iter().all(|&v| v == SCALED_MIN));
        }
    }

    #[test]
    fn test_empty() {
        assert!(scale(std::iter::empty::<&NormalizedVector>()).is_empty());
    }
}
