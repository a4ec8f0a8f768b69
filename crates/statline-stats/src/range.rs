/// Minimum and maximum of a population of values.
///
/// A range is the basis of min-max scaling: each value is mapped to its
/// relative position between the smallest and largest value observed in the
/// same population. A range whose minimum equals its maximum is *degenerate*;
/// it carries no spread to scale against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxRange {
    /// The minimum value in the population.
    pub min: f64,
    /// The maximum value in the population.
    pub max: f64,
}

impl MinMaxRange {
    /// Computes the range of a population.
    ///
    /// # Returns
    ///
    /// * `Some(MinMaxRange)` - if the population contains at least one value
    /// * `None` - if the population is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use statline_stats::range::MinMaxRange;
    /// let range = MinMaxRange::from_values([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(range.min, 1.0);
    /// assert_eq!(range.max, 5.0);
    ///
    /// assert!(MinMaxRange::from_values(std::iter::empty()).is_none());
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let range = iter.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, v| Self {
                min: f64::min(acc.min, v),
                max: f64::max(acc.max, v),
            },
        );
        Some(range)
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if every value in the population was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Maps `value` to its position within the range.
    ///
    /// Values inside the range map to `[0, 1]`, with `min` at 0 and `max` at 1.
    /// A degenerate range maps every value to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statline_stats::range::MinMaxRange;
    /// let range = MinMaxRange { min: 10.0, max: 20.0 };
    /// assert_eq!(range.normalize(15.0), 0.5);
    ///
    /// let flat = MinMaxRange { min: 3.0, max: 3.0 };
    /// assert_eq!(flat.normalize(3.0), 0.0);
    /// ```
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / self.span()
        }
    }

    /// Maps `value` linearly from this range onto `[lo, hi]`.
    ///
    /// A degenerate range maps every value to `lo`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statline_stats::range::MinMaxRange;
    /// let range = MinMaxRange { min: 0.0, max: 1.0 };
    /// assert_eq!(range.rescale(0.0, 1.0, 10.0), 1.0);
    /// assert_eq!(range.rescale(1.0, 1.0, 10.0), 10.0);
    /// ```
    #[must_use]
    pub fn rescale(&self, value: f64, lo: f64, hi: f64) -> f64 {
        self.normalize(value) * (hi - lo) + lo
    }
}
