//! Grouping of a season's players into statistical archetypes
//!
//! This crate partitions the eligible records of one season into clusters of
//! similar statistical profiles, using the season-normalized vectors built by
//! `statline-analysis`.
//!
//! # How Clustering Works
//!
//! 1. **Select** - Keep the season's records with more than 10 games and a
//!    finite normalized vector
//! 2. **Scale** - Map each coordinate into `[1, 10]` over the selected records
//!    ([`scale`])
//! 3. **Seed** - Pick initial centroids uniformly without replacement using a
//!    [`seed::ClusterSeed`]
//! 4. **Iterate** - Alternate assignment and geometric-mean update until the
//!    centroids stop moving ([`engine::ClusterRun`])
//! 5. **Report** - Drop empty clusters, sort members by scoring and clusters by
//!    size ([`report::ClusteringResult`])
//!
//! # Reproducibility
//!
//! Every run is driven by a 128-bit seed. A query without a seed draws one from
//! the thread-local generator and logs it; passing that seed back reproduces
//! the partition exactly.
//!
//! # Example
//!
//! ```
//! use statline_analysis::dataset::Dataset;
//! use statline_cluster::{report::ClusterQuery, seed::ClusterSeed};
//! use statline_model::{SeasonRecord, Stat, StatLine};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let records = (0..12)
//!     .map(|i| {
//!         let mut stats = StatLine::new();
//!         stats[Stat::Points] = f64::from(i);
//!         SeasonRecord {
//!             player: format!("P{i}"),
//!             season: "2023_24".into(),
//!             position: "G".into(),
//!             age: 25,
//!             team: "NYK".into(),
//!             player_id: String::new(),
//!             games_played: 60,
//!             games_started: 0,
//!             stats,
//!         }
//!     })
//!     .collect();
//! let dataset = Dataset::new(records);
//!
//! let query = ClusterQuery {
//!     num_clusters: 3,
//!     seed: Some("0123456789abcdef0123456789abcdef".parse::<ClusterSeed>()?),
//!     ..ClusterQuery::default()
//! };
//! let result = query.run(&dataset)?;
//! let total = result.clusters.iter().map(|c| c.players.len()).sum::<usize>();
//! assert_eq!(total, 12);
//! # Ok(())
//! # }
//! ```
//!
//! # Current Limitations
//!
//! - **Single season only**: records from different seasons are never
//!   clustered together
//! - **No re-seeding**: a cluster that loses all its members keeps its last
//!   centroid and is omitted from the result

pub mod engine;
pub mod report;
pub mod scale;
pub mod seed;
