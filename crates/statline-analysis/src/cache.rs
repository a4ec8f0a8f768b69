//! Lazily loaded, explicitly invalidated dataset cache
//!
//! Loading a dataset reads every row from the source, aggregates and
//! normalizes them. [`DatasetCache`] does this once, on first access, and
//! hands out shared read-only handles afterwards. Changes in the underlying
//! source are not observed until [`DatasetCache::invalidate`] or
//! [`DatasetCache::reload`] is called.

use std::sync::Arc;

use statline_model::Aggregator;
use tracing::info;

use crate::{dataset::Dataset, error::SourceError, source::RecordSource};

/// Owns a record source and the dataset built from it.
#[derive(Debug)]
pub struct DatasetCache<S> {
    source: S,
    aggregator: Aggregator,
    dataset: Option<Arc<Dataset>>,
}

impl<S> DatasetCache<S>
where
    S: RecordSource,
{
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_aggregator(source, Aggregator::default())
    }

    #[must_use]
    pub fn with_aggregator(source: S, aggregator: Aggregator) -> Self {
        Self {
            source,
            aggregator,
            dataset: None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// Returns the cached dataset, loading it on first access.
    ///
    /// A failed load leaves the cache empty, so the next call retries.
    pub fn dataset(&mut self) -> Result<Arc<Dataset>, SourceError> {
        if let Some(dataset) = &self.dataset {
            return Ok(Arc::clone(dataset));
        }
        self.reload()
    }

    /// Drops the cached dataset; the next access reloads from the source.
    pub fn invalidate(&mut self) {
        self.dataset = None;
    }

    /// Rebuilds the dataset from the source unconditionally.
    ///
    /// The cached dataset is replaced only on success; a failed read keeps it.
    pub fn reload(&mut self) -> Result<Arc<Dataset>, SourceError> {
        let rows = self.source.records(None)?;
        let aggregation = self.aggregator.aggregate(&rows);
        info!(
            rows = rows.len(),
            records = aggregation.records.len(),
            warnings = aggregation.warnings.len(),
            skipped = aggregation.skipped_rows,
            below_min_games = aggregation.below_min_games,
            "aggregated records"
        );
        let dataset = Arc::new(Dataset::new(aggregation.records));
        info!(seasons = ?dataset.seasons(), "dataset ready");
        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Season labels reported by the source, latest first.
    pub fn seasons(&self) -> Result<Vec<String>, SourceError> {
        self.source.seasons()
    }
}
