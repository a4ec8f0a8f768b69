use crate::{
    parse::DefaultReason,
    stat::{Stat, StatLine, TRACKED_LEN},
};

/// One individual's statistics for one season, after multi-team rows have
/// been consolidated.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    pub player: String,
    pub season: String,
    pub position: String,
    pub age: u32,
    /// Team of the first contributing row. Descriptive only.
    pub team: String,
    /// Stable external identifier of the player.
    pub player_id: String,
    /// Total across all teams in the season.
    pub games_played: u32,
    /// Total across all teams in the season.
    pub games_started: u32,
    /// Per-game stats, averaged across contributing team rows.
    pub stats: StatLine,
}

impl SeasonRecord {
    /// Values of the tracked stats, in [`Stat::TRACKED`] order.
    #[must_use]
    pub fn tracked_values(&self) -> [f64; TRACKED_LEN] {
        self.stats.tracked()
    }

    #[must_use]
    pub fn points_per_game(&self) -> f64 {
        self.stats[Stat::Points]
    }

    /// Returns `true` if this record belongs to `player` in `season`.
    #[must_use]
    pub fn is(&self, player: &str, season: &str) -> bool {
        self.player == player && self.season == season
    }
}

/// A field that fell back to its default while reading a raw record.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{player} ({season}): {field} defaulted, {reason}")]
pub struct ParseWarning {
    pub player: String,
    pub season: String,
    pub field: String,
    pub reason: DefaultReason,
}
