use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column names of the descriptive and counting fields of a raw record.
///
/// Per-game stat columns are named by [`Stat::abbrev`](crate::Stat::abbrev).
pub mod keys {
    pub const PLAYER: &str = "Player";
    pub const SEASON: &str = "Season";
    pub const POSITION: &str = "Pos";
    pub const AGE: &str = "Age";
    pub const TEAM: &str = "Team";
    pub const GAMES: &str = "G";
    pub const GAMES_STARTED: &str = "GS";
    pub const PLAYER_ID: &str = "Player-additional";
}

/// One source row: a single player's line for one team in one season.
///
/// Values are kept exactly as the source delivered them (numbers, strings,
/// nulls); conversion happens during aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the value of a text column if it holds a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Builder-style [`Self::insert`], handy for assembling fixtures.
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K> FromIterator<(K, Value)> for RawRecord
where
    K: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
    {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
