//! Serializable clustering results and the clustering query

use rand::Rng as _;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};
use statline_analysis::{
    dataset::Dataset,
    error::AnalysisError,
    report::{DEFAULT_SEASON, PlayerStats},
};
use statline_model::{Stat, TRACKED_LEN};
use tracing::info;

use crate::{
    engine::{self, ClusteringParams, DEFAULT_MAX_ITERATIONS, SeasonPartition},
    scale::Point,
    seed::ClusterSeed,
};

/// Number of clusters requested when none is given.
pub const DEFAULT_NUM_CLUSTERS: usize = 8;

/// Smallest number of clusters a query may request.
pub const MIN_NUM_CLUSTERS: usize = 2;

/// Largest number of clusters a query may request.
pub const MAX_NUM_CLUSTERS: usize = 20;

/// A cluster centroid, serialized as a map from stat abbreviation to value
/// in tracked-stat order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid(Point);

impl Centroid {
    #[must_use]
    pub fn new(values: Point) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> Option<f64> {
        let idx = Stat::TRACKED.iter().position(|s| *s == stat)?;
        Some(self.0[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::TRACKED.into_iter().zip(self.0)
    }
}

impl Serialize for Centroid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(TRACKED_LEN))?;
        for (stat, value) in self.iter() {
            map.serialize_entry(stat.abbrev(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCluster {
    pub cluster_id: usize,
    /// Members, highest scorers first.
    pub players: Vec<PlayerStats>,
    pub centroid: Centroid,
}

/// Non-empty clusters of a season, largest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResult {
    pub clusters: Vec<PlayerCluster>,
    pub season: String,
    /// Number of clusters requested; empty clusters are not listed.
    pub num_clusters: usize,
}

impl ClusteringResult {
    #[must_use]
    pub fn from_partition(partition: &SeasonPartition<'_>, num_clusters: usize) -> Self {
        let mut clusters = partition
            .clusters()
            .map(|(cluster_id, mut members, centroid)| {
                members.sort_by(|a, b| b.points_per_game().total_cmp(&a.points_per_game()));
                PlayerCluster {
                    cluster_id,
                    players: members.into_iter().map(PlayerStats::from).collect(),
                    centroid: Centroid::new(*centroid),
                }
            })
            .collect::<Vec<_>>();
        clusters.sort_by(|a, b| b.players.len().cmp(&a.players.len()));
        Self {
            clusters,
            season: partition.season.clone(),
            num_clusters,
        }
    }

    /// Looks up a cluster by its id.
    pub fn cluster(&self, cluster_id: usize) -> Result<&PlayerCluster, AnalysisError> {
        self.clusters
            .iter()
            .find(|c| c.cluster_id == cluster_id)
            .ok_or(AnalysisError::ClusterNotFound { cluster_id })
    }
}

/// A clustering request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterQuery {
    #[serde(default = "default_season")]
    pub season: String,
    #[serde(default = "default_num_clusters")]
    pub num_clusters: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Random seed when omitted.
    #[serde(default)]
    pub seed: Option<ClusterSeed>,
}

fn default_season() -> String {
    DEFAULT_SEASON.to_owned()
}

fn default_num_clusters() -> usize {
    DEFAULT_NUM_CLUSTERS
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for ClusterQuery {
    fn default() -> Self {
        Self {
            season: default_season(),
            num_clusters: DEFAULT_NUM_CLUSTERS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

impl ClusterQuery {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(MIN_NUM_CLUSTERS..=MAX_NUM_CLUSTERS).contains(&self.num_clusters) {
            return Err(AnalysisError::invalid_input(format!(
                "number of clusters must be between {MIN_NUM_CLUSTERS} and {MAX_NUM_CLUSTERS}, got {}",
                self.num_clusters
            )));
        }
        Ok(())
    }

    pub fn run(&self, dataset: &Dataset) -> Result<ClusteringResult, AnalysisError> {
        self.validate()?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!(season = %self.season, %seed, "running clustering query");
        let params = ClusteringParams {
            max_iterations: self.max_iterations,
            ..ClusteringParams::new(self.num_clusters)
        };
        let partition = engine::cluster(dataset, &self.season, &params, &mut seed.rng())?;
        Ok(ClusteringResult::from_partition(&partition, self.num_clusters))
    }
}
