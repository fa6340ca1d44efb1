//! Route planning and fare computation for a subway network.
//!
//! Lines are chains of directed sections between stations. A query builds a
//! weighted graph from those sections, finds the shortest path under the
//! chosen [`CostMetric`](routing::CostMetric) and prices it through the
//! [`FareCalculator`](fare::FareCalculator) pipeline.

pub mod error;
pub mod fare;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Unique identifier of a station
pub type StationId = u64;
/// Unique identifier of a line
pub type LineId = u64;
/// Section length in kilometres
pub type Distance = u32;
/// Travel time in minutes
pub type Duration = u32;
/// Monetary amount in the smallest currency unit
pub type Amount = u32;
/// Rider age in years
pub type Age = u32;
