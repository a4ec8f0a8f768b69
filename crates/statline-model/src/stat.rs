use std::ops::{Index, IndexMut};

/// Number of stats that make up a normalized feature vector.
pub const TRACKED_LEN: usize = 16;

/// Per-game numeric statistics carried by a season record.
///
/// Games played and games started are counting totals and live on the record
/// itself; every stat here is averaged across teams during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stat {
    Minutes,
    Points,
    FieldGoals,
    FieldGoalAttempts,
    FieldGoalPct,
    ThreePointers,
    ThreePointAttempts,
    ThreePointPct,
    TwoPointers,
    TwoPointAttempts,
    TwoPointPct,
    EffectiveFieldGoalPct,
    FreeThrows,
    FreeThrowAttempts,
    FreeThrowPct,
    OffensiveRebounds,
    DefensiveRebounds,
    TotalRebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    PersonalFouls,
}

impl Stat {
    pub const LEN: usize = 23;

    pub const ALL: [Self; Self::LEN] = [
        Self::Minutes,
        Self::Points,
        Self::FieldGoals,
        Self::FieldGoalAttempts,
        Self::FieldGoalPct,
        Self::ThreePointers,
        Self::ThreePointAttempts,
        Self::ThreePointPct,
        Self::TwoPointers,
        Self::TwoPointAttempts,
        Self::TwoPointPct,
        Self::EffectiveFieldGoalPct,
        Self::FreeThrows,
        Self::FreeThrowAttempts,
        Self::FreeThrowPct,
        Self::OffensiveRebounds,
        Self::DefensiveRebounds,
        Self::TotalRebounds,
        Self::Assists,
        Self::Steals,
        Self::Blocks,
        Self::Turnovers,
        Self::PersonalFouls,
    ];

    /// The volume stats compared by similarity search and clustering, in
    /// feature-vector order.
    pub const TRACKED: [Self; TRACKED_LEN] = [
        Self::Points,
        Self::Minutes,
        Self::FieldGoals,
        Self::FieldGoalAttempts,
        Self::ThreePointers,
        Self::ThreePointAttempts,
        Self::TwoPointers,
        Self::TwoPointAttempts,
        Self::FreeThrows,
        Self::FreeThrowAttempts,
        Self::OffensiveRebounds,
        Self::DefensiveRebounds,
        Self::Assists,
        Self::Steals,
        Self::Turnovers,
        Self::Blocks,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column abbreviation used by record sources.
    #[must_use]
    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::Minutes => "MP",
            Self::Points => "PTS",
            Self::FieldGoals => "FG",
            Self::FieldGoalAttempts => "FGA",
            Self::FieldGoalPct => "FG%",
            Self::ThreePointers => "FG3",
            Self::ThreePointAttempts => "FG3A",
            Self::ThreePointPct => "FG3%",
            Self::TwoPointers => "FG2",
            Self::TwoPointAttempts => "FG2A",
            Self::TwoPointPct => "FG2%",
            Self::EffectiveFieldGoalPct => "eFG%",
            Self::FreeThrows => "FT",
            Self::FreeThrowAttempts => "FTA",
            Self::FreeThrowPct => "FT%",
            Self::OffensiveRebounds => "ORB",
            Self::DefensiveRebounds => "DRB",
            Self::TotalRebounds => "TRB",
            Self::Assists => "AST",
            Self::Steals => "STL",
            Self::Blocks => "BLK",
            Self::Turnovers => "TOV",
            Self::PersonalFouls => "PF",
        }
    }

    /// Looks up a stat by its column abbreviation.
    #[must_use]
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.abbrev() == abbrev)
    }

    /// Returns `true` if this stat is part of the normalized feature vector.
    #[must_use]
    pub fn is_tracked(self) -> bool {
        Self::TRACKED.contains(&self)
    }
}

/// One value per [`Stat`], indexed by stat.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatLine([f64; Stat::LEN]);

impl StatLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of the tracked stats, in [`Stat::TRACKED`] order.
    #[must_use]
    pub fn tracked(&self) -> [f64; TRACKED_LEN] {
        Stat::TRACKED.map(|stat| self[stat])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.into_iter().map(|stat| (stat, self[stat]))
    }

    /// Adds `other` to `self` stat by stat.
    pub fn accumulate(&mut self, other: &StatLine) {
        for (lhs, rhs) in self.0.iter_mut().zip(other.0) {
            *lhs += rhs;
        }
    }

    /// Divides every stat by `divisor`.
    #[must_use]
    pub fn divided_by(mut self, divisor: f64) -> Self {
        for v in &mut self.0 {
            *v /= divisor;
        }
        self
    }
}

impl Index<Stat> for StatLine {
    type Output = f64;

    fn index(&self, stat: Stat) -> &f64 {
        &self.0[stat.index()]
    }
}

impl IndexMut<Stat> for StatLine {
    fn index_mut(&mut self, stat: Stat) -> &mut f64 {
        &mut self.0[stat.index()]
    }
}

impl FromIterator<(Stat, f64)> for StatLine {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Stat, f64)>,
    {
        let mut line = Self::new();
        for (stat, value) in iter {
            line[stat] = value;
        }
        line
    }
}
