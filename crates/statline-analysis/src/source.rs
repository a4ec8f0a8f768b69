//! Record sources
//!
//! A [`RecordSource`] delivers raw rows and the list of seasons it holds.
//! Rows are consumed by the [`Aggregator`](statline_model::Aggregator) and never
//! retained by the analysis layer.
//!
//! # JSON directory layout
//!
//! [`JsonDirSource`] reads a directory containing one file per season:
//!
//! ```text
//! data/
//! ├─ 2022_23.json
//! └─ 2023_24.json    [ { "Player": "…", "Team": "…", "G": 71, "PTS": 25.7, … }, … ]
//! ```
//!
//! The file stem is the season label. Array elements that are not objects are
//! skipped with a warning. Rows may use basketball-reference
//! column names (`3P`, `3PA`, …); they are renamed to the `FG3`/`FG2` form on
//! load.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde_json::Value;
use statline_model::{RawRecord, Stat, keys, parse};
use tracing::{debug, info, warn};

use crate::error::SourceError;

/// Provider of raw season rows.
pub trait RecordSource {
    /// Returns every row, or only the rows of `season` when given.
    fn records(&self, season: Option<&str>) -> Result<Vec<RawRecord>, SourceError>;

    /// Returns the distinct season labels present, latest first.
    fn seasons(&self) -> Result<Vec<String>, SourceError>;
}

impl<S> RecordSource for &S
where
    S: RecordSource + ?Sized,
{
    fn records(&self, season: Option<&str>) -> Result<Vec<RawRecord>, SourceError> {
        (**self).records(season)
    }

    fn seasons(&self) -> Result<Vec<String>, SourceError> {
        (**self).seasons()
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: RawRecord) {
        self.rows.push(row);
    }
}

impl RecordSource for MemorySource {
    fn records(&self, season: Option<&str>) -> Result<Vec<RawRecord>, SourceError> {
        let rows = match season {
            Some(season) => self
                .rows
                .iter()
                .filter(|row| row.get_str(keys::SEASON) == Some(season))
                .cloned()
                .collect(),
            None => self.rows.clone(),
        };
        Ok(rows)
    }

    fn seasons(&self) -> Result<Vec<String>, SourceError> {
        let seasons = self
            .rows
            .iter()
            .filter_map(|row| row.get_str(keys::SEASON))
            .filter(|season| !season.is_empty())
            .collect::<BTreeSet<_>>();
        Ok(seasons.into_iter().rev().map(str::to_owned).collect())
    }
}

/// Column renames from basketball-reference exports.
const COLUMN_RENAMES: [(&str, Stat); 6] = [
    ("3P", Stat::ThreePointers),
    ("3PA", Stat::ThreePointAttempts),
    ("3P%", Stat::ThreePointPct),
    ("2P", Stat::TwoPointers),
    ("2PA", Stat::TwoPointAttempts),
    ("2P%", Stat::TwoPointPct),
];

/// Rank column of exports; carries no information about the player.
const RANK_COLUMN: &str = "Rk";

/// Rows stored as one JSON array per season in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    #[must_use]
    pub fn new<P>(dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists `(season, path)` for every `*.json` file, sorted by file name.
    fn season_files(&self) -> Result<Vec<(String, PathBuf)>, SourceError> {
        let io_err = |source: io::Error| SourceError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut files = vec![];
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(season) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            files.push((season.to_owned(), path));
        }
        files.sort();
        Ok(files)
    }

    fn load_file(season: &str, path: &Path) -> Result<Vec<RawRecord>, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Io {
            path: path.to_owned(),
            source,
        })?;
        let values: Vec<Value> = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| SourceError::Parse {
                path: path.to_owned(),
                source,
            },
        )?;
        let mut rows = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let map = match value {
                Value::Object(map) => map,
                other => {
                    warn!(
                        path = %path.display(),
                        index,
                        value = %other,
                        "skipping row that is not an object"
                    );
                    continue;
                }
            };
            let mut row = RawRecord::from(map);
            clean_row(&mut row, season);
            rows.push(row);
        }
        debug!(season, rows = rows.len(), path = %path.display(), "loaded season file");
        Ok(rows)
    }
}

/// Brings an exported row into the shape the aggregator expects.
fn clean_row(row: &mut RawRecord, season: &str) {
    row.remove(RANK_COLUMN);
    for (from, stat) in COLUMN_RENAMES {
        if let Some(value) = row.remove(from) {
            row.insert(stat.abbrev(), value);
        }
    }
    if !row.contains_key(Stat::EffectiveFieldGoalPct.abbrev()) {
        let value = |stat: Stat| *parse::parse_float(row.get(stat.abbrev())).value();
        let fg = value(Stat::FieldGoals);
        let fg3 = value(Stat::ThreePointers);
        let fga = value(Stat::FieldGoalAttempts);
        let efg = if fga > 0.0 {
            (fg + 0.5 * fg3) / fga
        } else {
            0.0
        };
        row.insert(Stat::EffectiveFieldGoalPct.abbrev(), efg);
    }
    row.insert(keys::SEASON, Value::from(season));
}

impl RecordSource for JsonDirSource {
    fn records(&self, season: Option<&str>) -> Result<Vec<RawRecord>, SourceError> {
        let mut rows = vec![];
        for (file_season, path) in self.season_files()? {
            if season.is_some_and(|s| s != file_season) {
                continue;
            }
            rows.extend(Self::load_file(&file_season, &path)?);
        }
        info!(rows = rows.len(), dir = %self.dir.display(), "loaded records");
        Ok(rows)
    }

    fn seasons(&self) -> Result<Vec<String>, SourceError> {
        let mut seasons = self
            .season_files()?
            .into_iter()
            .map(|(season, _)| season)
            .collect::<Vec<_>>();
        seasons.sort_by(|a, b| b.cmp(a));
        seasons.dedup();
        Ok(seasons)
    }
}
