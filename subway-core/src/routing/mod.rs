//! Shortest path search over the subway network

mod dijkstra;
pub mod finder;
pub mod graph;
pub mod path;
pub mod subway_map;

pub use finder::{find_path, path_exists, shortest_paths_from};
pub use graph::{CostMetric, SectionEdge, SubwayGraph};
pub use path::Path;
pub use subway_map::{Journey, SubwayMap};
