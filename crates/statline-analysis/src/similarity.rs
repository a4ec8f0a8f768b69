//! Nearest-neighbor search over season-normalized vectors
//!
//! [`SimilarityEngine::find_similar`] ranks every other record of the dataset
//! by Euclidean distance to the query's vector. The scan is not limited to the
//! query's season: vectors are season-relative, so a player from another era
//! (or the query player in another season) is a legitimate match.
//!
//! Distances are converted to a similarity score as `1 - distance / 4`, where
//! 4 is the diagonal of the 16-dimensional unit hypercube. The score is not
//! clamped.

use statline_model::SeasonRecord;
use statline_stats::distance;
use tracing::{debug, warn};

use crate::{dataset::Dataset, error::AnalysisError};

/// Distance at which the similarity score reaches zero.
pub const SCORE_SCALE: f64 = 4.0;

/// Converts a distance into a similarity score.
///
/// # Examples
///
/// ```
/// use statline_analysis::similarity::similarity_score;
///
/// assert_eq!(similarity_score(0.0), 1.0);
/// assert_eq!(similarity_score(2.0), 0.5);
/// assert_eq!(similarity_score(5.0), -0.25);
/// ```
#[must_use]
pub fn similarity_score(distance: f64) -> f64 {
    1.0 - distance / SCORE_SCALE
}

/// A candidate ranked against the query.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityResult<'a> {
    pub record: &'a SeasonRecord,
    pub distance: f64,
    pub score: f64,
}

/// The resolved query record and its nearest candidates, closest first.
#[derive(Debug, Clone)]
pub struct SimilarityReport<'a> {
    pub query: &'a SeasonRecord,
    pub results: Vec<SimilarityResult<'a>>,
}

/// Similarity search over a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine<'a> {
    dataset: &'a Dataset,
}

impl<'a> SimilarityEngine<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Finds the `k` records closest to `player` in `season`.
    ///
    /// Every record sharing the resolved query's name and season is excluded.
    /// Ties keep dataset order. Fewer than `k` results are returned when fewer
    /// candidates exist.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NoData`] if the dataset is empty
    /// - [`AnalysisError::SeasonNotFound`] if no record belongs to `season`
    /// - [`AnalysisError::PlayerNotFound`] if the player cannot be resolved
    /// - [`AnalysisError::NoCandidates`] if no candidate yields a valid distance
    pub fn find_similar(
        &self,
        player: &str,
        season: &str,
        k: usize,
    ) -> Result<SimilarityReport<'a>, AnalysisError> {
        let dataset = self.dataset;
        if dataset.is_empty() {
            return Err(AnalysisError::no_data("dataset is empty"));
        }
        if !dataset.has_season(season) {
            return Err(AnalysisError::SeasonNotFound {
                season: season.to_owned(),
            });
        }
        let query_idx =
            dataset
                .resolve(player, season)
                .ok_or_else(|| AnalysisError::PlayerNotFound {
                    player: player.to_owned(),
                    season: season.to_owned(),
                })?;
        let query = dataset.record(query_idx);
        let query_vector = dataset.vector(query_idx);
        debug!(player = %query.player, season = %query.season, "resolved query player");

        let mut results = vec![];
        for (record, vector) in dataset.entries() {
            if record.is(&query.player, &query.season) {
                continue;
            }
            let Some(distance) = distance::euclidean(query_vector.as_slice(), vector.as_slice())
            else {
                warn!(
                    player = %record.player,
                    season = %record.season,
                    "skipping candidate with mismatched vector dimensionality"
                );
                continue;
            };
            if !distance.is_finite() {
                warn!(
                    player = %record.player,
                    season = %record.season,
                    distance,
                    "skipping candidate with invalid distance"
                );
                continue;
            }
            results.push(SimilarityResult {
                record,
                distance,
                score: similarity_score(distance),
            });
        }

        if results.is_empty() {
            return Err(AnalysisError::NoCandidates {
                player: query.player.clone(),
            });
        }

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(k);
        debug!(count = results.len(), "found similar players");

        Ok(SimilarityReport { query, results })
    }
}

#[cfg(test)]
mod tests {
    use statline_model::{Stat, StatLine};

    use super::*;
    use crate::error::ErrorKind;

    fn record(player: &str, season: &str, fill: f64) -> SeasonRecord {
        SeasonRecord {
            player: player.to_owned(),
            season: season.to_owned(),
            position: "F".to_owned(),
            age: 24,
            team: "AAA".to_owned(),
            player_id: String::new(),
            games_played: 70,
            games_started: 70,
            stats: Stat::ALL.into_iter().map(|s| (s, fill)).collect::<StatLine>(),
        }
    }

    fn names<'a>(report: &SimilarityReport<'a>) -> Vec<(&'a str, &'a str)> {
        report
            .results
            .iter()
            .map(|r| (r.record.player.as_str(), r.record.season.as_str()))
            .collect()
    }

    #[test]
    fn test_ranks_by_distance_and_excludes_query() {
        let dataset = Dataset::new(vec![
            record("Low", "2023_24", 0.0),
            record("Mid", "2023_24", 5.0),
            record("High", "2023_24", 10.0),
            record("Near", "2023_24", 6.0),
        ]);
        let report = SimilarityEngine::new(&dataset)
            .find_similar("Mid", "2023_24", 10)
            .unwrap();
        assert_eq!(report.query.player, "Mid");
        assert_eq!(
            names(&report),
            [
                ("Near", "2023_24"),
                ("Low", "2023_24"),
                ("High", "2023_24")
            ]
        );
        assert!(
            report
                .results
                .windows(2)
                .all(|w| w[0].distance <= w[1].distance)
        );
    }

    #[test]
    fn test_same_player_other_season_is_eligible() {
        let dataset = Dataset::new(vec![
            record("Ann", "2022_23", 2.0),
            record("Bob", "2022_23", 8.0),
            record("Ann", "2023_24", 2.0),
            record("Bob", "2023_24", 8.0),
        ]);
        let report = SimilarityEngine::new(&dataset)
            .find_similar("Ann", "2023_24", 1)
            .unwrap();
        assert_eq!(names(&report), [("Ann", "2022_23")]);
        assert_eq!(report.results[0].distance, 0.0);
        assert_eq!(report.results[0].score, 1.0);
    }

    #[test]
    fn test_case_insensitive_query_does_not_return_itself() {
        let dataset = Dataset::new(vec![
            record("Ann Lee", "2023_24", 1.0),
            record("Bob Ray", "2023_24", 3.0),
        ]);
        let report = SimilarityEngine::new(&dataset)
            .find_similar("ann lee", "2023_24", 5)
            .unwrap();
        assert_eq!(report.query.player, "Ann Lee");
        assert_eq!(names(&report), [("Bob Ray", "2023_24")]);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let dataset = Dataset::new(vec![
            record("Q", "2023_24", 0.0),
            record("A", "2023_24", 4.0),
            record("B", "2023_24", 4.0),
            record("C", "2023_24", 8.0),
        ]);
        let report = SimilarityEngine::new(&dataset)
            .find_similar("Q", "2023_24", 2)
            .unwrap();
        assert_eq!(names(&report), [("A", "2023_24"), ("B", "2023_24")]);
    }

    #[test]
    fn test_errors() {
        let empty = Dataset::new(vec![]);
        let err = SimilarityEngine::new(&empty)
            .find_similar("Ann", "2023_24", 5)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoData { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let dataset = Dataset::new(vec![record("Ann", "2023_24", 1.0)]);
        let engine = SimilarityEngine::new(&dataset);
        assert!(matches!(
            engine.find_similar("Ann", "1990_91", 5),
            Err(AnalysisError::SeasonNotFound { .. })
        ));
        assert!(matches!(
            engine.find_similar("Bob", "2023_24", 5),
            Err(AnalysisError::PlayerNotFound { .. })
        ));
        // The query is the only record, so nothing is left to compare.
        assert!(matches!(
            engine.find_similar("Ann", "2023_24", 5),
            Err(AnalysisError::NoCandidates { .. })
        ));
    }

    #[test]
    fn test_identical_stats_have_zero_distance() {
        let dataset = Dataset::new(vec![
            record("Twin A", "2024_25", 7.0),
            record("Twin B", "2024_25", 7.0),
            record("Other", "2024_25", 2.0),
        ]);
        assert_eq!(dataset.vector(0), dataset.vector(1));

        let report = SimilarityEngine::new(&dataset)
            .find_similar("Twin A", "2024_25", 1)
            .unwrap();
        assert_eq!(report.results[0].record.player, "Twin B");
        assert_eq!(report.results[0].distance, 0.0);
        assert_eq!(report.results[0].score, 1.0);
    }

    #[test]
    fn test_skips_candidates_with_invalid_distance() {
        // The season span overflows, so the maximum normalizes to inf / inf.
        let dataset = Dataset::new(vec![
            record("Huge", "2023_24", 1e308),
            record("Tiny", "2023_24", -1e308),
            record("Zero", "2023_24", 0.0),
        ]);
        assert!(!dataset.vector(0).is_finite());
        let engine = SimilarityEngine::new(&dataset);

        let report = engine.find_similar("Zero", "2023_24", 5).unwrap();
        assert_eq!(names(&report), [("Tiny", "2023_24")]);
        assert!(report.results[0].distance.is_finite());

        // Every distance from a non-finite query vector is invalid.
        let err = engine.find_similar("Huge", "2023_24", 5).unwrap_err();
        assert!(matches!(err, AnalysisError::NoCandidates { ref player } if player == "Huge"));
    }

    #[test]
    fn test_zero_k_returns_no_results() {
        let dataset = Dataset::new(vec![
            record("Ann", "2023_24", 1.0),
            record("Bob", "2023_24", 3.0),
        ]);
        let report = SimilarityEngine::new(&dataset)
            .find_similar("Ann", "2023_24", 0)
            .unwrap();
        assert!(report.results.is_empty());
    }
}
