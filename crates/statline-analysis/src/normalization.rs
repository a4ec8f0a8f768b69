//! Season-relative min-max normalization
//!
//! Every season is normalized on its own: for each tracked stat, the minimum
//! and maximum across that season's records define a [`MinMaxRange`], and each
//! record's value is mapped into `[0, 1]` within it. A normalized vector
//! therefore expresses performance relative to the league context of its
//! season rather than absolute volume, which is what makes vectors from
//! different seasons comparable.
//!
//! A stat that takes a single value across the whole season (including a
//! season with one record) normalizes to 0 for every record.
//!
//! # Example
//!
//! ```
//! use statline_analysis::normalization::SeasonBounds;
//! use statline_model::{SeasonRecord, Stat, StatLine};
//!
//! let record = |points: f64| {
//!     let mut stats = StatLine::new();
//!     stats[Stat::Points] = points;
//!     SeasonRecord {
//!         player: String::new(),
//!         season: "2023_24".to_owned(),
//!         position: String::new(),
//!         age: 0,
//!         team: String::new(),
//!         player_id: String::new(),
//!         games_played: 82,
//!         games_started: 0,
//!         stats,
//!     }
//! };
//! let records = [record(10.0), record(20.0), record(30.0)];
//!
//! let bounds = SeasonBounds::from_records(&records).unwrap();
//! let vector = bounds.normalize(&records[1]);
//! assert_eq!(vector.get(Stat::Points), Some(0.5));
//! // Minutes never vary, so they carry no signal.
//! assert_eq!(vector.get(Stat::Minutes), Some(0.0));
//! ```

use std::collections::BTreeMap;

use statline_model::{SeasonRecord, Stat, TRACKED_LEN};
use statline_stats::range::MinMaxRange;

/// A record's tracked stats scaled within its season, in [`Stat::TRACKED`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedVector([f64; TRACKED_LEN]);

impl NormalizedVector {
    #[must_use]
    pub fn new(values: [f64; TRACKED_LEN]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the coordinate of a tracked stat, or `None` for an untracked one.
    #[must_use]
    pub fn get(&self, stat: Stat) -> Option<f64> {
        let idx = Stat::TRACKED.iter().position(|s| *s == stat)?;
        Some(self.0[idx])
    }

    /// Returns `true` if the coordinates sum to a finite value.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().sum::<f64>().is_finite()
    }
}

/// Per-stat bounds of one season's population.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonBounds([MinMaxRange; TRACKED_LEN]);

impl SeasonBounds {
    /// Computes the bounds of a season from its records.
    ///
    /// Returns `None` if `records` is empty.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SeasonRecord>,
    {
        let values = records
            .into_iter()
            .map(SeasonRecord::tracked_values)
            .collect::<Vec<_>>();
        let first = MinMaxRange::from_values(values.iter().map(|v| v[0]))?;
        let mut ranges = [first; TRACKED_LEN];
        for (i, range) in ranges.iter_mut().enumerate().skip(1) {
            *range = MinMaxRange::from_values(values.iter().map(|v| v[i]))?;
        }
        Some(Self(ranges))
    }

    /// Returns the range of a tracked stat, or `None` for an untracked one.
    #[must_use]
    pub fn range(&self, stat: Stat) -> Option<&MinMaxRange> {
        let idx = Stat::TRACKED.iter().position(|s| *s == stat)?;
        Some(&self.0[idx])
    }

    /// Normalizes a record of this season.
    #[must_use]
    pub fn normalize(&self, record: &SeasonRecord) -> NormalizedVector {
        let values = record.tracked_values();
        let mut out = [0.0; TRACKED_LEN];
        for ((o, v), range) in out.iter_mut().zip(values).zip(&self.0) {
            *o = range.normalize(v);
        }
        NormalizedVector(out)
    }
}

/// Normalizes every record within its own season.
///
/// # Returns
///
/// The bounds of every season present, and one vector per record in the same
/// order as `records`.
#[must_use]
pub fn normalize_by_season(
    records: &[SeasonRecord],
) -> (BTreeMap<String, SeasonBounds>, Vec<NormalizedVector>) {
    let mut by_season = BTreeMap::<&str, Vec<&SeasonRecord>>::new();
    for record in records {
        by_season.entry(record.season.as_str()).or_default().push(record);
    }

    let bounds = by_season
        .into_iter()
        .filter_map(|(season, members)| {
            let bounds = SeasonBounds::from_records(members)?;
            Some((season.to_owned(), bounds))
        })
        .collect::<BTreeMap<_, _>>();

    let vectors = records
        .iter()
        .map(|record| bounds[&record.season].normalize(record))
        .collect();

    (bounds, vectors)
}

#[cfg(test)]
mod tests {
    use statline_model::StatLine;

    use super::*;

    fn record(season: &str, fill: f64) -> SeasonRecord {
        let stats = Stat::ALL.into_iter().map(|s| (s, fill)).collect::<StatLine>();
        SeasonRecord {
            player: format!("P{fill}"),
            season: season.to_owned(),
            position: "G".to_owned(),
            age: 25,
            team: "AAA".to_owned(),
            player_id: String::new(),
            games_played: 50,
            games_started: 10,
            stats,
        }
    }

    #[test]
    fn test_min_maps_to_zero_and_max_to_one() {
        let records = [
            record("2023_24", 2.0),
            record("2023_24", 8.0),
            record("2023_24", 5.0),
        ];
        let (_, vectors) = normalize_by_season(&records);
        assert!(vectors[0].as_slice().iter().all(|v| *v == 0.0));
        assert!(vectors[1].as_slice().iter().all(|v| *v == 1.0));
        assert!(vectors[2].as_slice().iter().all(|v| *v == 0.5));
    }

    #[test]
    fn test_seasons_are_normalized_independently() {
        let records = [
            record("2022_23", 5.0),
            record("2022_23", 10.0),
            record("2023_24", 5.0),
            record("2023_24", 6.0),
        ];
        let (bounds, vectors) = normalize_by_season(&records);
        assert_eq!(bounds.len(), 2);
        // The same raw value lands at opposite ends of different seasons.
        assert_eq!(vectors[0].get(Stat::Points), Some(0.0));
        assert_eq!(vectors[3].get(Stat::Points), Some(1.0));
        assert_eq!(
            bounds["2022_23"].range(Stat::Points),
            Some(&MinMaxRange {
                min: 5.0,
                max: 10.0
            })
        );
    }

    #[test]
    fn test_single_record_season_is_all_zero() {
        let records = [record("2001_02", 17.0)];
        let (_, vectors) = normalize_by_season(&records);
        assert_eq!(vectors[0], NormalizedVector::new([0.0; TRACKED_LEN]));
    }

    #[test]
    fn test_constant_stat_is_zero() {
        let mut a = record("2023_24", 3.0);
        let mut b = record("2023_24", 9.0);
        a.stats[Stat::Blocks] = 1.5;
        b.stats[Stat::Blocks] = 1.5;
        let (_, vectors) = normalize_by_season(&[a, b]);
        assert_eq!(vectors[0].get(Stat::Blocks), Some(0.0));
        assert_eq!(vectors[1].get(Stat::Blocks), Some(0.0));
        assert_eq!(vectors[1].get(Stat::Points), Some(1.0));
    }

    #[test]
    fn test_untracked_stat_has_no_coordinate() {
        let records = [record("2023_24", 1.0)];
        let (bounds, vectors) = normalize_by_season(&records);
        assert_eq!(vectors[0].get(Stat::FieldGoalPct), None);
        assert!(bounds["2023_24"].range(Stat::TotalRebounds).is_none());
    }

    #[test]
    fn test_empty_input() {
        let (bounds, vectors) = normalize_by_season(&[]);
        assert!(bounds.is_empty());
        assert!(vectors.is_empty());
    }
}
