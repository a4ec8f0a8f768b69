use std::{io, path::PathBuf};

/// Failure to read rows from a [`RecordSource`](crate::source::RecordSource).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SourceError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised by similarity search, clustering and result lookup.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("player '{player}' not found in season {season}")]
    PlayerNotFound { player: String, season: String },
    #[display("no records found for season {season}")]
    SeasonNotFound { season: String },
    #[display("cluster {cluster_id} not found")]
    ClusterNotFound { cluster_id: usize },
    #[display("no data available: {reason}")]
    NoData { reason: String },
    #[display("could not calculate distances for any player similar to {player}")]
    NoCandidates { player: String },
    #[display("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[display("{_0}")]
    Source(SourceError),
}

/// How an [`AnalysisError`] should be surfaced to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to act on: unknown player, season or cluster, or no data.
    NotFound,
    /// The request itself was out of range.
    InvalidInput,
    /// Any other failure.
    Internal,
}

impl AnalysisError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlayerNotFound { .. }
            | Self::SeasonNotFound { .. }
            | Self::ClusterNotFound { .. }
            | Self::NoData { .. }
            | Self::NoCandidates { .. } => ErrorKind::NotFound,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Source(_) => ErrorKind::Internal,
        }
    }

    pub fn no_data(reason: impl Into<String>) -> Self {
        Self::NoData {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<SourceError> for AnalysisError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}
