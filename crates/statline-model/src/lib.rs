//! Season record model for the Statline project.
//!
//! Raw rows arrive from a record source as loosely-typed mappings from stat
//! abbreviation to value ([`RawRecord`]). The [`Aggregator`] parses them with
//! the safe-convert rules of [`parse`] and collapses multi-team rows into one
//! [`SeasonRecord`] per individual and season.
//!
//! ```text
//! RawRecord (one per player, team, season)
//!     ↓ Aggregator (sum games, mean stats, participation filter)
//! SeasonRecord (one per player, season)
//! ```

pub use self::{aggregate::*, raw::*, record::*, stat::*};

pub mod aggregate;
pub mod parse;
pub mod raw;
pub mod record;
pub mod stat;
