//! Numeric primitives for the Statline project.
//!
//! This crate provides the small set of numerical tools the analysis and
//! clustering crates are built on:
//!
//! - **Ranges**: Min-max bounds of a population, with normalization and rescaling
//! - **Distances**: Euclidean distance between feature vectors
//! - **Means**: Arithmetic and geometric means
//!
//! # Modules
//!
//! - [`range`]: Min-max ranges for normalizing values into a bounded interval
//! - [`distance`]: Distance metrics over feature vectors
//! - [`mean`]: Central tendency measures used for centroid updates
//!
//! # Examples
//!
//! ## Normalizing values against a population
//!
//! ```
//! use statline_stats::range::MinMaxRange;
//!
//! let range = MinMaxRange::from_values([2.0, 4.0, 6.0]).unwrap();
//! assert_eq!(range.normalize(2.0), 0.0);
//! assert_eq!(range.normalize(4.0), 0.5);
//! assert_eq!(range.normalize(6.0), 1.0);
//! ```
//!
//! ## Measuring distance between vectors
//!
//! ```
//! use statline_stats::distance::euclidean;
//!
//! let d = euclidean(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
//! assert_eq!(d, 5.0);
//! ```
//!
//! ## Computing a geometric mean
//!
//! ```
//! use statline_stats::mean::geometric_mean;
//!
//! let g = geometric_mean([1.0, 4.0], 0.0).unwrap();
//! assert!((g - 2.0).abs() < 1e-12);
//! ```

pub mod distance;
pub mod mean;
pub mod range;
