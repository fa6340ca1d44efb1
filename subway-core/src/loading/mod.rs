//! This module is responsible for loading a subway network from a CSV feed
//! (`stations.csv`, `lines.csv`, `sections.csv`).

mod builder;
mod config;
mod parser;
pub mod raw_types;

pub use builder::{load_network, load_network_from_readers};
pub use config::NetworkConfig;
pub use parser::{deserialize_feed, deserialize_feed_file};
