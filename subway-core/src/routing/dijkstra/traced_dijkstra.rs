use std::collections::BinaryHeap;
use std::sync::Arc;

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::State;
use crate::routing::{Path, SubwayGraph};
use crate::{Distance, Duration, Error};

/// Costs and predecessor edges discovered from a single start station
pub(crate) struct ShortestPathTree {
    start: NodeIndex,
    costs: HashMap<NodeIndex, u64>,
    /// Previous node and the edge used to reach each node
    predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
}

/// Dijkstra's algorithm over the subway graph, weighted by the graph's metric.
/// Stops as soon as `target` is settled, explores the whole reachable
/// network otherwise.
pub(crate) fn dijkstra_tree(
    graph: &SubwayGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
) -> ShortestPathTree {
    let metric = graph.metric();
    let estimated_nodes = graph.graph.node_count();
    let mut costs: HashMap<NodeIndex, u64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4 + 1);

    heap.push(State {
        cost: 0,
        node: start,
    });
    costs.insert(start, 0);

    while let Some(State { cost, node }) = heap.pop() {
        if target == Some(node) {
            break;
        }

        // Stale heap entry
        if costs.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + u64::from(metric.weight(edge.weight()));

            match costs.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, (node, edge.id()));
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, (node, edge.id()));
                    }
                }
            }
        }
    }

    ShortestPathTree {
        start,
        costs,
        predecessors,
    }
}

impl ShortestPathTree {
    pub(crate) fn reaches(&self, node: NodeIndex) -> bool {
        self.costs.contains_key(&node)
    }

    /// Rebuilds the path from the start station to `target`.
    /// Returns `Ok(None)` when `target` was not reached.
    pub(crate) fn path_to(
        &self,
        graph: &SubwayGraph,
        target: NodeIndex,
    ) -> Result<Option<Path>, Error> {
        if !self.reaches(target) {
            return Ok(None);
        }

        // Follow predecessors backward from target to start
        let mut hops = Vec::new();
        let mut current = target;
        while current != self.start {
            let Some(&(previous, edge)) = self.predecessors.get(&current) else {
                return Ok(None);
            };
            hops.push((current, edge));
            current = previous;
        }
        hops.reverse();

        let mut stations = Vec::with_capacity(hops.len() + 1);
        let mut lines = Vec::with_capacity(hops.len());
        let mut distance: Distance = 0;
        let mut duration: Duration = 0;

        stations.push(graph.graph[self.start].clone());
        for (node, edge) in hops {
            let section = &graph.graph[edge];
            stations.push(graph.graph[node].clone());
            lines.push(Arc::clone(&section.line));
            distance = distance.checked_add(section.distance).ok_or_else(|| {
                Error::InvalidData(format!(
                    "Distance of the path to {} overflows",
                    graph.graph[target].id()
                ))
            })?;
            duration = duration.checked_add(section.duration).ok_or_else(|| {
                Error::InvalidData(format!(
                    "Duration of the path to {} overflows",
                    graph.graph[target].id()
                ))
            })?;
        }

        Path::new(stations, distance, duration, lines).map(Some)
    }
}
