//! Serializable output shapes for roster listings and similarity queries

use serde::{Deserialize, Serialize};
use statline_model::{SeasonRecord, Stat};

use crate::{
    dataset::Dataset,
    error::AnalysisError,
    similarity::{SimilarityEngine, SimilarityReport, SimilarityResult},
};

/// Season queried when none is given.
pub const DEFAULT_SEASON: &str = "2023_24";

/// Number of similar players returned when no count is given.
pub const DEFAULT_NUM_SIMILAR: usize = 5;

/// A season record with every stat spelled out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: String,
    pub season: String,
    pub position: String,
    pub age: u32,
    pub team: String,
    pub games_played: u32,
    pub games_started: u32,
    pub minutes_per_game: f64,
    pub points_per_game: f64,
    pub field_goals_per_game: f64,
    pub field_goal_attempts_per_game: f64,
    pub field_goal_percentage: f64,
    pub three_pointers_per_game: f64,
    pub three_point_attempts_per_game: f64,
    pub three_point_percentage: f64,
    pub two_pointers_per_game: f64,
    pub two_point_attempts_per_game: f64,
    pub two_point_percentage: f64,
    pub effective_field_goal_percentage: f64,
    pub free_throws_per_game: f64,
    pub free_throw_attempts_per_game: f64,
    pub free_throw_percentage: f64,
    pub offensive_rebounds_per_game: f64,
    pub defensive_rebounds_per_game: f64,
    pub total_rebounds_per_game: f64,
    pub assists_per_game: f64,
    pub steals_per_game: f64,
    pub blocks_per_game: f64,
    pub turnovers_per_game: f64,
    pub personal_fouls_per_game: f64,
    pub player_id: String,
}

impl From<&SeasonRecord> for PlayerStats {
    fn from(record: &SeasonRecord) -> Self {
        let s = &record.stats;
        Self {
            player: record.player.clone(),
            season: record.season.clone(),
            position: record.position.clone(),
            age: record.age,
            team: record.team.clone(),
            games_played: record.games_played,
            games_started: record.games_started,
            minutes_per_game: s[Stat::Minutes],
            points_per_game: s[Stat::Points],
            field_goals_per_game: s[Stat::FieldGoals],
            field_goal_attempts_per_game: s[Stat::FieldGoalAttempts],
            field_goal_percentage: s[Stat::FieldGoalPct],
            three_pointers_per_game: s[Stat::ThreePointers],
            three_point_attempts_per_game: s[Stat::ThreePointAttempts],
            three_point_percentage: s[Stat::ThreePointPct],
            two_pointers_per_game: s[Stat::TwoPointers],
            two_point_attempts_per_game: s[Stat::TwoPointAttempts],
            two_point_percentage: s[Stat::TwoPointPct],
            effective_field_goal_percentage: s[Stat::EffectiveFieldGoalPct],
            free_throws_per_game: s[Stat::FreeThrows],
            free_throw_attempts_per_game: s[Stat::FreeThrowAttempts],
            free_throw_percentage: s[Stat::FreeThrowPct],
            offensive_rebounds_per_game: s[Stat::OffensiveRebounds],
            defensive_rebounds_per_game: s[Stat::DefensiveRebounds],
            total_rebounds_per_game: s[Stat::TotalRebounds],
            assists_per_game: s[Stat::Assists],
            steals_per_game: s[Stat::Steals],
            blocks_per_game: s[Stat::Blocks],
            turnovers_per_game: s[Stat::Turnovers],
            personal_fouls_per_game: s[Stat::PersonalFouls],
            player_id: record.player_id.clone(),
        }
    }
}

/// One ranked candidate of a similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPlayer {
    pub player: String,
    pub season: String,
    pub position: String,
    pub age: u32,
    pub similarity_score: f64,
    pub stats: PlayerStats,
}

impl From<&SimilarityResult<'_>> for SimilarPlayer {
    fn from(result: &SimilarityResult<'_>) -> Self {
        let record = result.record;
        Self {
            player: record.player.clone(),
            season: record.season.clone(),
            position: record.position.clone(),
            age: record.age,
            similarity_score: result.score,
            stats: PlayerStats::from(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPlayersResponse {
    pub query_player: PlayerStats,
    pub similar_players: Vec<SimilarPlayer>,
}

impl From<&SimilarityReport<'_>> for SimilarPlayersResponse {
    fn from(report: &SimilarityReport<'_>) -> Self {
        Self {
            query_player: PlayerStats::from(report.query),
            similar_players: report.results.iter().map(SimilarPlayer::from).collect(),
        }
    }
}

/// A similarity request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityQuery {
    pub player_name: String,
    #[serde(default = "default_season")]
    pub season: String,
    #[serde(default = "default_num_similar")]
    pub num_similar: usize,
}

fn default_season() -> String {
    DEFAULT_SEASON.to_owned()
}

fn default_num_similar() -> usize {
    DEFAULT_NUM_SIMILAR
}

impl SimilarityQuery {
    /// Creates a query for `player_name` with the default season and count.
    #[must_use]
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            season: default_season(),
            num_similar: DEFAULT_NUM_SIMILAR,
        }
    }

    pub fn run(&self, dataset: &Dataset) -> Result<SimilarPlayersResponse, AnalysisError> {
        let report = SimilarityEngine::new(dataset).find_similar(
            &self.player_name,
            &self.season,
            self.num_similar,
        )?;
        Ok(SimilarPlayersResponse::from(&report))
    }
}

/// Lists every record, or only those of `season`, in dataset order.
///
/// # Errors
///
/// Returns [`AnalysisError::SeasonNotFound`] if `season` is given but absent.
pub fn roster(dataset: &Dataset, season: Option<&str>) -> Result<Vec<PlayerStats>, AnalysisError> {
    match season {
        Some(season) => {
            if !dataset.has_season(season) {
                return Err(AnalysisError::SeasonNotFound {
                    season: season.to_owned(),
                });
            }
            Ok(dataset
                .season_entries(season)
                .map(|(_, record, _)| PlayerStats::from(record))
                .collect())
        }
        None => Ok(dataset.records().iter().map(PlayerStats::from).collect()),
    }
}

#[cfg(test)]
mod tests {
    use statline_model::{Aggregator, RawRecord, StatLine};

    use super::*;
    use crate::error::ErrorKind;

    fn record(player: &str, season: &str, points: f64) -> SeasonRecord {
        let mut stats = StatLine::new();
        for stat in Stat::TRACKED {
            stats[stat] = points / 2.0;
        }
        stats[Stat::Points] = points;
        stats[Stat::FieldGoalPct] = 0.5;
        SeasonRecord {
            player: player.to_owned(),
            season: season.to_owned(),
            position: "SF".to_owned(),
            age: 27,
            team: "BOS".to_owned(),
            player_id: format!("{}01", player.to_lowercase()),
            games_played: 70,
            games_started: 65,
            stats,
        }
    }

    #[test]
    fn test_player_stats_field_names() {
        let stats = PlayerStats::from(&record("Ann", "2023_24", 20.0));
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["player"], "Ann");
        assert_eq!(value["points_per_game"], 20.0);
        assert_eq!(value["minutes_per_game"], 10.0);
        assert_eq!(value["field_goal_percentage"], 0.5);
        assert_eq!(value["games_started"], 65);
        assert_eq!(value["player_id"], "ann01");
        assert_eq!(value.as_object().unwrap().len(), 31);
    }

    #[test]
    fn test_query_defaults() {
        let query: SimilarityQuery =
            serde_json::from_str(r#"{ "player_name": "Ann" }"#).unwrap();
        assert_eq!(query, SimilarityQuery::new("Ann"));
        assert_eq!(query.season, "2023_24");
        assert_eq!(query.num_similar, 5);
    }

    #[test]
    fn test_query_returns_all_candidates_sorted() {
        let mut records = (0..50)
            .map(|i| record(&format!("P{i:02}"), "2023_24", f64::from(i)))
            .collect::<Vec<_>>();
        records.push(record("Query", "2023_24", 25.0));
        let dataset = Dataset::new(records);

        let query = SimilarityQuery {
            player_name: "Query".to_owned(),
            season: "2023_24".to_owned(),
            num_similar: 1000,
        };
        let response = query.run(&dataset).unwrap();
        assert_eq!(response.query_player.player, "Query");
        assert_eq!(response.similar_players.len(), 50);
        assert!(
            response
                .similar_players
                .windows(2)
                .all(|w| w[0].similarity_score >= w[1].similarity_score)
        );
        assert_eq!(response.similar_players[0].player, "P25");
        assert!((response.similar_players[0].similarity_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_low_participation_is_not_queryable() {
        let row = |player: &str, games: u32, points: f64| {
            RawRecord::new()
                .with("Player", player)
                .with("Season", "2023_24")
                .with("Pos", "PG")
                .with("Age", 24)
                .with("G", games)
                .with("PTS", points)
        };
        let rows = [row("Ann", 60, 20.0), row("Bob", 50, 10.0), row("Cal", 8, 30.0)];
        let dataset = Dataset::new(Aggregator::default().aggregate(&rows).records);

        let err = SimilarityQuery::new("Cal").run(&dataset).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let response = SimilarityQuery::new("Ann").run(&dataset).unwrap();
        let names = response
            .similar_players
            .iter()
            .map(|p| p.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Bob"]);
    }

    #[test]
    fn test_roster() {
        let dataset = Dataset::new(vec![
            record("Ann", "2022_23", 10.0),
            record("Bob", "2023_24", 12.0),
            record("Cal", "2023_24", 14.0),
        ]);
        assert_eq!(roster(&dataset, None).unwrap().len(), 3);

        let season = roster(&dataset, Some("2023_24")).unwrap();
        let names = season.iter().map(|p| p.player.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Bob", "Cal"]);

        assert!(matches!(
            roster(&dataset, Some("1999_00")),
            Err(AnalysisError::SeasonNotFound { .. })
        ));
    }
}
