//! Season-relative normalization and similarity search over player seasons
//!
//! This crate turns aggregated [`SeasonRecord`](statline_model::SeasonRecord)s
//! into comparable feature vectors and answers "who played most like this
//! player" queries.
//!
//! # Overview
//!
//! ## Loading Workflow
//!
//! 1. **Read Rows** ([`source::RecordSource`]): fetch raw rows from memory or a
//!    directory of per-season JSON files
//! 2. **Aggregate** ([`statline_model::Aggregator`]): consolidate multi-team
//!    rows and drop low-participation seasons
//! 3. **Normalize** ([`dataset::Dataset`]): min-max scale the 16 tracked stats
//!    within each season
//! 4. **Cache** ([`cache::DatasetCache`]): keep the dataset until it is
//!    explicitly invalidated
//!
//! ## Query Workflow
//!
//! 1. **Search** ([`similarity::SimilarityEngine`]): rank all other records by
//!    Euclidean distance to the query vector
//! 2. **Format** ([`report`]): convert the ranking into serializable responses
//!
//! Clustering lives in the `statline-cluster` crate and reuses the same
//! [`dataset::Dataset`].
//!
//! # Examples
//!
//! ```
//! use statline_analysis::{
//!     cache::DatasetCache, report::SimilarityQuery, source::MemorySource,
//! };
//! use statline_model::RawRecord;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let row = |player: &str, points: f64| {
//!     RawRecord::new()
//!         .with("Player", player)
//!         .with("Season", "2023_24")
//!         .with("G", 70)
//!         .with("PTS", points)
//! };
//! let source = MemorySource::new(vec![row("Ann", 25.0), row("Bob", 24.0), row("Cal", 5.0)]);
//!
//! let mut cache = DatasetCache::new(source);
//! let dataset = cache.dataset()?;
//!
//! let mut query = SimilarityQuery::new("Ann");
//! query.num_similar = 1;
//! let response = query.run(&dataset)?;
//! assert_eq!(response.similar_players[0].player, "Bob");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod dataset;
pub mod error;
pub mod normalization;
pub mod report;
pub mod similarity;
pub mod source;
