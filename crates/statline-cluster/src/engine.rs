//! Seeded clustering of one season's records
//!
//! # Algorithm
//!
//! 1. **Select** the season's records with more than [`MIN_GAMES`] games and a
//!    finite normalized vector
//! 2. **Scale** their vectors into `[1, 10]` ([`crate::scale`])
//! 3. **Initialize** centroids from `num_clusters` distinct points chosen
//!    uniformly at random
//! 4. **Assign** each point to its nearest centroid (lowest index on ties)
//! 5. **Update** each non-empty cluster's centroid to the geometric mean of its
//!    members; empty clusters keep their centroid
//! 6. **Repeat** 4-5 until no centroid coordinate moves by `tolerance` or more,
//!    or `max_iterations` is reached
//!
//! The geometric mean (rather than the arithmetic mean of textbook k-means)
//! pulls centroids towards the lower values of their members.

use rand::Rng;
use statline_analysis::{dataset::Dataset, error::AnalysisError};
use statline_model::{MIN_GAMES, SeasonRecord};
use statline_stats::{distance, mean};
use tracing::{debug, info};

use crate::scale::{self, Point};

/// Default bound on assignment/update rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Largest coordinate movement still counted as converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;

/// Offset keeping `ln` finite in the geometric-mean update.
pub const GEOMETRIC_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringParams {
    pub num_clusters: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl ClusteringParams {
    #[must_use]
    pub fn new(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
        }
    }

    /// Checks the parameters against the number of points to cluster.
    pub fn validate(&self, num_points: usize) -> Result<(), AnalysisError> {
        if self.num_clusters == 0 {
            return Err(AnalysisError::invalid_input(
                "number of clusters must be at least 1",
            ));
        }
        if self.num_clusters > num_points {
            return Err(AnalysisError::invalid_input(format!(
                "cannot form {} clusters from {num_points} eligible records",
                self.num_clusters
            )));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::invalid_input(
                "max iterations must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(AnalysisError::invalid_input(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Phase of a [`ClusterRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RunState {
    #[display("initialized")]
    Initialized,
    #[display("assigning")]
    Assigning,
    #[display("updating")]
    Updating,
    #[display("converged")]
    Converged,
    #[display("max iterations reached")]
    MaxIterationsReached,
}

impl RunState {
    /// Both terminal states yield a valid partition.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::MaxIterationsReached)
    }
}

/// One clustering run over a fixed set of points.
///
/// The run is advanced with [`step`](Self::step) one phase at a time, or driven
/// to a terminal state with [`run`](Self::run).
#[derive(Debug, Clone)]
pub struct ClusterRun {
    points: Vec<Point>,
    centroids: Vec<Point>,
    assignments: Vec<usize>,
    state: RunState,
    iterations: usize,
    max_iterations: usize,
    tolerance: f64,
}

impl ClusterRun {
    /// Picks initial centroids from `points` without replacement.
    pub fn new<R>(
        points: Vec<Point>,
        params: &ClusteringParams,
        rng: &mut R,
    ) -> Result<Self, AnalysisError>
    where
        R: Rng + ?Sized,
    {
        params.validate(points.len())?;
        let centroids = rand::seq::index::sample(rng, points.len(), params.num_clusters)
            .iter()
            .map(|idx| points[idx])
            .collect();
        let assignments = vec![0; points.len()];
        Ok(Self {
            points,
            centroids,
            assignments,
            state: RunState::Initialized,
            iterations: 0,
            max_iterations: params.max_iterations,
            tolerance: params.tolerance,
        })
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of completed assignment/update rounds.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Cluster index of each point, in input order.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Advances the run by one phase and returns the new state.
    ///
    /// Terminal states are left unchanged.
    pub fn step(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Initialized => RunState::Assigning,
            RunState::Assigning => {
                self.assign();
                RunState::Updating
            }
            RunState::Updating => {
                let shift = self.update();
                self.iterations += 1;
                let converged = shift < self.tolerance;
                debug!(iteration = self.iterations, shift, converged, "clustering iteration");
                if converged {
                    RunState::Converged
                } else if self.iterations >= self.max_iterations {
                    RunState::MaxIterationsReached
                } else {
                    RunState::Assigning
                }
            }
            state @ (RunState::Converged | RunState::MaxIterationsReached) => state,
        };
        self.state
    }

    /// Steps until a terminal state is reached.
    #[must_use]
    pub fn run(mut self) -> Self {
        while !self.state.is_terminal() {
            self.step();
        }
        self
    }

    fn assign(&mut self) {
        for (point, assignment) in self.points.iter().zip(&mut self.assignments) {
            let mut best = (0, f64::INFINITY);
            for (idx, centroid) in self.centroids.iter().enumerate() {
                let d = distance::euclidean(point, centroid).unwrap_or(f64::INFINITY);
                if d < best.1 {
                    best = (idx, d);
                }
            }
            *assignment = best.0;
        }
    }

    /// Recomputes non-empty centroids and returns the largest coordinate shift.
    fn update(&mut self) -> f64 {
        let mut shift = 0.0_f64;
        for (idx, centroid) in self.centroids.iter_mut().enumerate() {
            let members = self
                .points
                .iter()
                .zip(&self.assignments)
                .filter(|(_, a)| **a == idx)
                .map(|(p, _)| p)
                .collect::<Vec<_>>();
            if members.is_empty() {
                continue;
            }
            for (dim, coord) in centroid.iter_mut().enumerate() {
                let Some(updated) =
                    mean::geometric_mean(members.iter().map(|p| p[dim]), GEOMETRIC_EPSILON)
                else {
                    continue;
                };
                shift = shift.max((updated - *coord).abs());
                *coord = updated;
            }
        }
        shift
    }
}

/// A finished clustering of one season.
#[derive(Debug, Clone)]
pub struct SeasonPartition<'a> {
    pub season: String,
    /// Clustered records, in dataset order.
    pub records: Vec<&'a SeasonRecord>,
    /// Cluster index of each record.
    pub assignments: Vec<usize>,
    /// Final centroid of every cluster, including empty ones.
    pub centroids: Vec<Point>,
    pub outcome: RunState,
    pub iterations: usize,
}

impl<'a> SeasonPartition<'a> {
    /// Iterates over non-empty clusters in index order, with their members in
    /// dataset order.
    pub fn clusters(&self) -> impl Iterator<Item = (usize, Vec<&'a SeasonRecord>, &Point)> + '_ {
        self.centroids
            .iter()
            .enumerate()
            .filter_map(|(idx, centroid)| {
                let members = self
                    .records
                    .iter()
                    .zip(&self.assignments)
                    .filter(|(_, a)| **a == idx)
                    .map(|(r, _)| *r)
                    .collect::<Vec<_>>();
                (!members.is_empty()).then_some((idx, members, centroid))
            })
    }
}

/// Clusters the eligible records of `season`.
///
/// # Errors
///
/// - [`AnalysisError::NoData`] if the dataset is empty or the season has no
///   eligible record
/// - [`AnalysisError::SeasonNotFound`] if no record belongs to `season`
/// - [`AnalysisError::InvalidInput`] if `params` do not fit the eligible records
pub fn cluster<'a, R>(
    dataset: &'a Dataset,
    season: &str,
    params: &ClusteringParams,
    rng: &mut R,
) -> Result<SeasonPartition<'a>, AnalysisError>
where
    R: Rng + ?Sized,
{
    if dataset.is_empty() {
        return Err(AnalysisError::no_data("dataset is empty"));
    }
    if !dataset.has_season(season) {
        return Err(AnalysisError::SeasonNotFound {
            season: season.to_owned(),
        });
    }

    let (records, vectors): (Vec<_>, Vec<_>) = dataset
        .season_entries(season)
        .filter(|(_, record, vector)| record.games_played > MIN_GAMES && vector.is_finite())
        .map(|(_, record, vector)| (record, vector))
        .unzip();
    if records.is_empty() {
        return Err(AnalysisError::no_data(format!(
            "no eligible records for season {season}"
        )));
    }
    info!(
        season,
        records = records.len(),
        num_clusters = params.num_clusters,
        "clustering season"
    );

    let points = scale::scale(vectors.iter().copied());
    let run = ClusterRun::new(points, params, rng)?.run();
    info!(
        season,
        outcome = %run.state(),
        iterations = run.iterations(),
        "clustering finished"
    );

    Ok(SeasonPartition {
        season: season.to_owned(),
        records,
        assignments: run.assignments,
        centroids: run.centroids,
        outcome: run.state,
        iterations: run.iterations,
    })
}
