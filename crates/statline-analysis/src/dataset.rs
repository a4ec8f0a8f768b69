use std::collections::BTreeMap;

use statline_model::SeasonRecord;

use crate::normalization::{self, NormalizedVector, SeasonBounds};

/// Aggregated season records together with their season-normalized vectors.
///
/// The dataset owns the season bounds and the vectors derived from them.
/// It is immutable once built; a changed population means building a new one.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SeasonRecord>,
    vectors: Vec<NormalizedVector>,
    bounds: BTreeMap<String, SeasonBounds>,
}

impl Dataset {
    /// Normalizes `records` season by season.
    #[must_use]
    pub fn new(records: Vec<SeasonRecord>) -> Self {
        let (bounds, vectors) = normalization::normalize_by_season(&records);
        Self {
            records,
            vectors,
            bounds,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[SeasonRecord] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, idx: usize) -> &SeasonRecord {
        &self.records[idx]
    }

    #[must_use]
    pub fn vector(&self, idx: usize) -> &NormalizedVector {
        &self.vectors[idx]
    }

    /// Iterates over every record with its vector, in dataset order.
    pub fn entries(&self) -> impl Iterator<Item = (&SeasonRecord, &NormalizedVector)> {
        self.records.iter().zip(&self.vectors)
    }

    /// Iterates over the records of one season with their dataset index.
    ///
    /// Yielded items borrow from the dataset only, not from `season`.
    pub fn season_entries<'a, 's>(
        &'a self,
        season: &'s str,
    ) -> impl Iterator<Item = (usize, &'a SeasonRecord, &'a NormalizedVector)> + use<'a, 's> {
        self.entries()
            .enumerate()
            .filter(move |(_, (record, _))| record.season == season)
            .map(|(idx, (record, vector))| (idx, record, vector))
    }

    #[must_use]
    pub fn bounds(&self, season: &str) -> Option<&SeasonBounds> {
        self.bounds.get(season)
    }

    #[must_use]
    pub fn has_season(&self, season: &str) -> bool {
        self.bounds.contains_key(season)
    }

    /// Distinct season labels, latest first.
    #[must_use]
    pub fn seasons(&self) -> Vec<&str> {
        self.bounds.keys().rev().map(String::as_str).collect()
    }

    /// Finds a player's record in a season.
    ///
    /// An exact, case-sensitive name match wins; otherwise the first
    /// case-insensitive match is returned. The season must match exactly.
    #[must_use]
    pub fn resolve(&self, player: &str, season: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.is(player, season))
            .or_else(|| {
                let lower = player.to_lowercase();
                self.records
                    .iter()
                    .position(|r| r.season == season && r.player.to_lowercase() == lower)
            })
    }
}

#[cfg(test)]
mod tests {
    use statline_model::StatLine;

    use super::*;

    fn record(player: &str, season: &str) -> SeasonRecord {
        SeasonRecord {
            player: player.to_owned(),
            season: season.to_owned(),
            position: "C".to_owned(),
            age: 30,
            team: "AAA".to_owned(),
            player_id: String::new(),
            games_played: 60,
            games_started: 60,
            stats: StatLine::new(),
        }
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let dataset = Dataset::new(vec![
            record("JOHN SMITH", "2023_24"),
            record("John Smith", "2023_24"),
        ]);
        assert_eq!(dataset.resolve("John Smith", "2023_24"), Some(1));
        assert_eq!(dataset.resolve("john smith", "2023_24"), Some(0));
        assert_eq!(dataset.resolve("John Smith", "2022_23"), None);
        assert_eq!(dataset.resolve("Jon Smith", "2023_24"), None);
    }

    #[test]
    fn test_seasons_latest_first() {
        let dataset = Dataset::new(vec![
            record("A", "2021_22"),
            record("B", "2023_24"),
            record("C", "2022_23"),
            record("D", "2023_24"),
        ]);
        assert_eq!(dataset.seasons(), ["2023_24", "2022_23", "2021_22"]);
        assert!(dataset.has_season("2022_23"));
        assert!(!dataset.has_season("1999_00"));
        let indices = dataset
            .season_entries("2023_24")
            .map(|(idx, _, _)| idx)
            .collect::<Vec<_>>();
        assert_eq!(indices, [1, 3]);
    }
}
