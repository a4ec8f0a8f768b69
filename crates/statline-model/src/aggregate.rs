//! Consolidation of per-team rows into season records
//!
//! A player traded mid-season appears in the source once per team. The
//! [`Aggregator`] groups rows by [`AggregationKey`], sums the counting totals
//! (games played and started), averages every per-game stat over the
//! contributing rows, and finally drops records that fall below the
//! participation threshold. The threshold is checked against the *summed*
//! games, so two short stints can together qualify a player.
//!
//! # Example
//!
//! ```
//! use statline_model::{Aggregator, RawRecord};
//!
//! let row = |team: &str, games: u32, pts: f64| {
//!     RawRecord::new()
//!         .with("Player", "Jane Doe")
//!         .with("Season", "2023_24")
//!         .with("Pos", "SG")
//!         .with("Age", 25)
//!         .with("Team", team)
//!         .with("G", games)
//!         .with("PTS", pts)
//! };
//! let rows = [row("AAA", 6, 10.0), row("BBB", 8, 20.0)];
//!
//! let aggregation = Aggregator::default().aggregate(&rows);
//! let record = &aggregation.records[0];
//! assert_eq!(record.games_played, 14);
//! assert_eq!(record.points_per_game(), 15.0);
//! assert_eq!(record.team, "AAA");
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    parse::{self, Parsed},
    raw::{RawRecord, keys},
    record::{ParseWarning, SeasonRecord},
    stat::{Stat, StatLine},
};

/// Records with this many games or fewer are excluded from analysis.
pub const MIN_GAMES: u32 = 10;

/// Grouping key for consolidating rows.
///
/// Position and age are part of the key: the same name in the same season
/// with a different position or age stays a separate record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    pub season: String,
    pub player: String,
    pub position: String,
    pub age: u32,
}

/// Output of [`Aggregator::aggregate`].
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One record per key that passed the participation filter, sorted by key.
    pub records: Vec<SeasonRecord>,
    /// Every field that fell back to a default value.
    pub warnings: Vec<ParseWarning>,
    /// Rows discarded because they had no player name or season.
    pub skipped_rows: usize,
    /// Records discarded by the participation filter.
    pub below_min_games: usize,
}

/// Collapses raw rows into one [`SeasonRecord`] per [`AggregationKey`].
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    min_games: u32,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MIN_GAMES)
    }
}

#[derive(Debug)]
struct Accumulator {
    team: String,
    player_id: String,
    games_played: u32,
    games_started: u32,
    sums: StatLine,
    rows: u32,
}

/// Reads the fields of a single row, collecting a warning for every default.
struct RowReader<'a> {
    row: &'a RawRecord,
    player: String,
    season: String,
    warnings: &'a mut Vec<ParseWarning>,
}

impl RowReader<'_> {
    fn take<T>(&mut self, field: &str, parsed: Parsed<T>) -> T {
        let (value, reason) = parsed.into_parts();
        if let Some(reason) = reason {
            let warning = ParseWarning {
                player: self.player.clone(),
                season: self.season.clone(),
                field: field.to_owned(),
                reason,
            };
            warn!("{warning}");
            self.warnings.push(warning);
        }
        value
    }

    fn text(&mut self, field: &str) -> String {
        let parsed = parse::parse_text(self.row.get(field));
        self.take(field, parsed)
    }

    fn count(&mut self, field: &str) -> u32 {
        let parsed = parse::parse_count(self.row.get(field));
        self.take(field, parsed)
    }

    fn float(&mut self, field: &str) -> f64 {
        let parsed = parse::parse_float(self.row.get(field));
        self.take(field, parsed)
    }

    fn stats(&mut self) -> StatLine {
        let mut line = StatLine::new();
        for stat in Stat::ALL {
            if stat == Stat::TotalRebounds {
                continue;
            }
            line[stat] = self.float(stat.abbrev());
        }
        line[Stat::TotalRebounds] = if self.row.contains_key(Stat::TotalRebounds.abbrev()) {
            self.float(Stat::TotalRebounds.abbrev())
        } else {
            line[Stat::OffensiveRebounds] + line[Stat::DefensiveRebounds]
        };
        line
    }
}

impl Aggregator {
    /// Creates an aggregator keeping records with more than `min_games` games.
    #[must_use]
    pub const fn new(min_games: u32) -> Self {
        Self { min_games }
    }

    #[must_use]
    pub const fn min_games(&self) -> u32 {
        self.min_games
    }

    /// Consolidates `rows` into season records.
    ///
    /// The result does not depend on the order of rows except for the
    /// representative team and player id, which come from the first row of
    /// each group.
    pub fn aggregate<'a, I>(&self, rows: I) -> Aggregation
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut aggregation = Aggregation::default();
        let mut groups = BTreeMap::<AggregationKey, Accumulator>::new();

        for row in rows {
            let player = parse::parse_text(row.get(keys::PLAYER)).into_parts().0;
            let season = parse::parse_text(row.get(keys::SEASON)).into_parts().0;
            if player.is_empty() || season.is_empty() {
                warn!(%player, %season, "skipping row without player name or season");
                aggregation.skipped_rows += 1;
                continue;
            }

            let mut reader = RowReader {
                row,
                player,
                season,
                warnings: &mut aggregation.warnings,
            };
            let position = reader.text(keys::POSITION);
            let age = reader.count(keys::AGE);
            let team = reader.text(keys::TEAM);
            let player_id = reader.text(keys::PLAYER_ID);
            let games_played = reader.count(keys::GAMES);
            let games_started = reader.count(keys::GAMES_STARTED);
            let stats = reader.stats();

            let key = AggregationKey {
                season: reader.season,
                player: reader.player,
                position,
                age,
            };
            let acc = groups.entry(key).or_insert_with(|| Accumulator {
                team,
                player_id,
                games_played: 0,
                games_started: 0,
                sums: StatLine::new(),
                rows: 0,
            });
            acc.games_played = acc.games_played.saturating_add(games_played);
            acc.games_started = acc.games_started.saturating_add(games_started);
            acc.sums.accumulate(&stats);
            acc.rows += 1;
        }

        for (key, acc) in groups {
            if acc.games_played <= self.min_games {
                debug!(
                    player = %key.player,
                    season = %key.season,
                    games = acc.games_played,
                    "dropping record below participation threshold"
                );
                aggregation.below_min_games += 1;
                continue;
            }
            aggregation.records.push(SeasonRecord {
                player: key.player,
                season: key.season,
                position: key.position,
                age: key.age,
                team: acc.team,
                player_id: acc.player_id,
                games_played: acc.games_played,
                games_started: acc.games_started,
                stats: acc.sums.divided_by(f64::from(acc.rows)),
            });
        }

        aggregation
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::parse::DefaultReason;

    fn row(player: &str, team: &str, games: u32, pts: f64) -> RawRecord {
        let mut row = RawRecord::new()
            .with("Player", player)
            .with("Season", "2023_24")
            .with("Pos", "PF")
            .with("Age", 28)
            .with("Team", team)
            .with("G", games)
            .with("GS", games / 2)
            .with("Player-additional", format!("{}01", player.to_lowercase()));
        for stat in Stat::ALL {
            row.insert(stat.abbrev(), 1.0);
        }
        row.insert("PTS", pts);
        row
    }

    #[test]
    fn test_sums_counts_and_averages_stats() {
        let rows = [row("Ann", "AAA", 20, 12.0), row("Ann", "BBB", 30, 18.0)];
        let aggregation = Aggregator::default().aggregate(&rows);
        assert_eq!(aggregation.records.len(), 1);
        let record = &aggregation.records[0];
        assert_eq!(record.games_played, 50);
        assert_eq!(record.games_started, 25);
        assert_eq!(record.points_per_game(), 15.0);
        assert_eq!(record.stats[Stat::Assists], 1.0);
        assert_eq!(record.team, "AAA");
        assert_eq!(record.player_id, "ann01");
        assert!(aggregation.warnings.is_empty());
    }

    #[test]
    fn test_participation_filter_uses_summed_games() {
        let rows = [
            row("Ann", "AAA", 6, 10.0),
            row("Ann", "BBB", 5, 10.0),
            row("Bob", "AAA", 10, 10.0),
            row("Cal", "AAA", 8, 10.0),
        ];
        let aggregation = Aggregator::default().aggregate(&rows);
        let players = aggregation
            .records
            .iter()
            .map(|r| r.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(players, ["Ann"]);
        assert_eq!(aggregation.below_min_games, 2);
    }

    #[test]
    fn test_position_and_age_split_groups() {
        let mut other = row("Ann", "BBB", 30, 20.0);
        other.insert("Pos", "C");
        let mut older = row("Ann", "CCC", 30, 20.0);
        older.insert("Age", 29);
        let rows = [row("Ann", "AAA", 30, 10.0), other, older];
        let aggregation = Aggregator::default().aggregate(&rows);
        assert_eq!(aggregation.records.len(), 3);
    }

    #[test]
    fn test_order_independent() {
        let rows = vec![
            row("Cal", "AAA", 40, 3.0),
            row("Ann", "AAA", 20, 10.0),
            row("Bob", "AAA", 30, 7.0),
            row("Ann", "BBB", 20, 20.0),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();

        let aggregator = Aggregator::default();
        let a = aggregator.aggregate(&rows);
        let b = aggregator.aggregate(&reversed);
        let again = aggregator.aggregate(&rows);

        assert_eq!(a.records, again.records);
        assert_eq!(a.records.len(), b.records.len());
        for (x, y) in a.records.iter().zip(&b.records) {
            assert_eq!(x.player, y.player);
            assert_eq!(x.player_id, y.player_id);
            assert_eq!(x.games_played, y.games_played);
            assert_eq!(x.stats, y.stats);
        }

        // Team comes from the first row of a group, so it follows input order.
        let team = |aggregation: &Aggregation, player: &str| {
            aggregation
                .records
                .iter()
                .find(|r| r.player == player)
                .map(|r| r.team.clone())
        };
        assert_eq!(team(&a, "Ann").as_deref(), Some("AAA"));
        assert_eq!(team(&b, "Ann").as_deref(), Some("BBB"));
        assert_eq!(team(&a, "Bob"), team(&b, "Bob"));
    }

    #[test]
    fn test_player_id_from_first_row() {
        let mut traded = row("Ann", "BBB", 20, 20.0);
        traded.insert("Player-additional", "ann02");
        let rows = [row("Ann", "AAA", 20, 10.0), traded];
        let forward = Aggregator::default().aggregate(&rows);
        let mut reversed = rows.to_vec();
        reversed.reverse();
        let backward = Aggregator::default().aggregate(&reversed);

        assert_eq!(forward.records[0].player_id, "ann01");
        assert_eq!(backward.records[0].player_id, "ann02");
        assert_eq!(forward.records[0].stats, backward.records[0].stats);
    }

    #[test]
    fn test_malformed_fields_default_with_warning() {
        let mut bad = row("Ann", "AAA", 30, 10.0);
        bad.insert("PTS", "");
        bad.insert("AST", Value::Null);
        bad.insert("Age", "unknown");
        bad.remove("STL");
        let aggregation = Aggregator::default().aggregate(&[bad]);
        let record = &aggregation.records[0];
        assert_eq!(record.points_per_game(), 0.0);
        assert_eq!(record.stats[Stat::Assists], 0.0);
        assert_eq!(record.stats[Stat::Steals], 0.0);
        assert_eq!(record.age, 0);

        let reasons = aggregation
            .warnings
            .iter()
            .map(|w| (w.field.as_str(), w.reason.clone()))
            .collect::<Vec<_>>();
        assert!(reasons.contains(&("PTS", DefaultReason::Blank)));
        assert!(reasons.contains(&("AST", DefaultReason::Null)));
        assert!(reasons.contains(&("STL", DefaultReason::Missing)));
        assert!(reasons.contains(&("Age", DefaultReason::Malformed("\"unknown\"".to_owned()))));
    }

    #[test]
    fn test_total_rebounds_derived_when_absent() {
        let mut r = row("Ann", "AAA", 30, 10.0);
        r.remove("TRB");
        r.insert("ORB", 2.0);
        r.insert("DRB", json!("5.5"));
        let aggregation = Aggregator::default().aggregate(&[r]);
        assert_eq!(aggregation.records[0].stats[Stat::TotalRebounds], 7.5);
        assert!(aggregation.warnings.iter().all(|w| w.field != "TRB"));
    }

    #[test]
    fn test_rows_without_identity_are_skipped() {
        let mut anonymous = row("Ann", "AAA", 30, 10.0);
        anonymous.insert("Player", "");
        let mut seasonless = row("Bob", "AAA", 30, 10.0);
        seasonless.remove("Season");
        let aggregation = Aggregator::default().aggregate(&[anonymous, seasonless]);
        assert!(aggregation.records.is_empty());
        assert_eq!(aggregation.skipped_rows, 2);
    }
}
