//! Shortest path queries over a built [`SubwayGraph`]

use petgraph::graph::NodeIndex;

use super::dijkstra::dijkstra_tree;
use super::{Path, SubwayGraph};
use crate::{Error, StationId};

/// Finds the cheapest path from `source` to `target` under the graph's metric.
///
/// Asking for a path from a station to itself yields a single-station path
/// with zero distance and duration.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if either station is not part of the
/// graph and [`Error::PathNotFound`] if `target` cannot be reached.
pub fn find_path(graph: &SubwayGraph, source: StationId, target: StationId) -> Result<Path, Error> {
    let start = resolve(graph, source, "Source")?;
    let end = resolve(graph, target, "Target")?;

    let tree = dijkstra_tree(graph, start, Some(end));
    let path = tree.path_to(graph, end)?.ok_or(Error::PathNotFound {
        from: source,
        to: target,
    })?;

    log::debug!(
        "Found path {source} -> {target}: {} sections, {} km, {} min",
        path.section_count(),
        path.distance(),
        path.duration()
    );

    Ok(path)
}

/// Whether any route connects `source` to `target`.
/// Stations unknown to the graph are never connected.
pub fn path_exists(graph: &SubwayGraph, source: StationId, target: StationId) -> bool {
    match (graph.node(source), graph.node(target)) {
        (Some(start), Some(end)) => dijkstra_tree(graph, start, Some(end)).reaches(end),
        _ => false,
    }
}

/// Shortest paths from `source` to each of `targets`, computed with a single
/// search. Results are returned in the order of `targets`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `source` is not part of the graph.
/// Unknown or unreachable targets are reported per entry.
pub fn shortest_paths_from(
    graph: &SubwayGraph,
    source: StationId,
    targets: &[StationId],
) -> Result<Vec<Result<Path, Error>>, Error> {
    let start = resolve(graph, source, "Source")?;
    let tree = dijkstra_tree(graph, start, None);

    let paths = targets
        .iter()
        .map(|&target| {
            let end = resolve(graph, target, "Target")?;
            tree.path_to(graph, end)?.ok_or(Error::PathNotFound {
                from: source,
                to: target,
            })
        })
        .collect();

    Ok(paths)
}

fn resolve(graph: &SubwayGraph, station: StationId, role: &str) -> Result<NodeIndex, Error> {
    graph.node(station).ok_or_else(|| {
        Error::InvalidArgument(format!("{role} station {station} is not part of the network"))
    })
}
