//! Data model of a subway network
//!
//! Stations, lines and the directed sections that connect them.

pub mod line;
pub mod station;

pub use line::{Line, LineInfo, Section};
pub use station::Station;
