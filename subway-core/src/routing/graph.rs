//! Weighted directed graph assembled from line sections

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::model::{LineInfo, Section, Station};
use crate::{Distance, Duration, Error, StationId};

/// Quantity minimised by the shortest path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostMetric {
    Distance,
    Duration,
}

impl CostMetric {
    /// Weight of an edge under this metric
    pub fn weight(self, edge: &SectionEdge) -> u32 {
        match self {
            CostMetric::Distance => edge.distance,
            CostMetric::Duration => edge.duration,
        }
    }
}

impl FromStr for CostMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("distance") {
            Ok(CostMetric::Distance)
        } else if s.eq_ignore_ascii_case("duration") {
            Ok(CostMetric::Duration)
        } else {
            Err(Error::UnsupportedCostMetric(s.to_string()))
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostMetric::Distance => f.write_str("DISTANCE"),
            CostMetric::Duration => f.write_str("DURATION"),
        }
    }
}

/// Graph edge carrying everything needed to rebuild a path
#[derive(Debug, Clone)]
pub struct SectionEdge {
    pub line: Arc<LineInfo>,
    pub distance: Distance,
    pub duration: Duration,
}

/// Subway network as a directed graph of stations
///
/// The graph is immutable once built and can be shared between threads
/// for concurrent queries.
#[derive(Debug, Clone)]
pub struct SubwayGraph {
    pub(crate) graph: DiGraph<Station, SectionEdge>,
    index: HashMap<StationId, NodeIndex>,
    metric: CostMetric,
}

impl SubwayGraph {
    /// Builds the graph from a flat collection of sections.
    ///
    /// Every section becomes one directed edge from its up station to its
    /// down station. Travelling both ways requires the reverse section to be
    /// supplied as well.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when no sections are given, when a
    /// section has a zero distance or duration, or when a section starts and
    /// ends at the same station.
    pub fn build<I>(sections: I, metric: CostMetric) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Borrow<Section>,
    {
        let mut graph = DiGraph::new();
        let mut index: HashMap<StationId, NodeIndex> = HashMap::new();

        for section in sections {
            let section = section.borrow();
            validate_section(section)?;

            let up = add_station(&mut graph, &mut index, section.up_station());
            let down = add_station(&mut graph, &mut index, section.down_station());

            graph.add_edge(
                up,
                down,
                SectionEdge {
                    line: Arc::clone(section.line()),
                    distance: section.distance(),
                    duration: section.duration(),
                },
            );
        }

        if graph.edge_count() == 0 {
            return Err(Error::InvalidArgument(
                "No sections provided to build the subway graph".to_string(),
            ));
        }

        log::debug!(
            "Built subway graph with {} stations and {} sections weighted by {metric}",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            index,
            metric,
        })
    }

    pub fn metric(&self) -> CostMetric {
        self.metric
    }

    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn section_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.index.contains_key(&station)
    }

    pub fn station(&self, station: StationId) -> Option<&Station> {
        self.node(station).map(|node| &self.graph[node])
    }

    pub(crate) fn node(&self, station: StationId) -> Option<NodeIndex> {
        self.index.get(&station).copied()
    }
}

fn add_station(
    graph: &mut DiGraph<Station, SectionEdge>,
    index: &mut HashMap<StationId, NodeIndex>,
    station: &Station,
) -> NodeIndex {
    *index
        .entry(station.id())
        .or_insert_with(|| graph.add_node(station.clone()))
}

fn validate_section(section: &Section) -> Result<(), Error> {
    let describe = || {
        format!(
            "section {} -> {} on line '{}'",
            section.up_station().id(),
            section.down_station().id(),
            section.line().name
        )
    };

    if section.distance() == 0 {
        return Err(Error::InvalidArgument(format!(
            "Distance of {} must be positive",
            describe()
        )));
    }
    if section.duration() == 0 {
        return Err(Error::InvalidArgument(format!(
            "Duration of {} must be positive",
            describe()
        )));
    }
    if section.up_station() == section.down_station() {
        return Err(Error::InvalidArgument(format!(
            "The {} connects a station to itself",
            describe()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    fn station(id: StationId) -> Station {
        Station::new(id, format!("Station {id}"))
    }

    #[test]
    fn stations_are_added_once() {
        let mut line = Line::new(1, "Line 1", 0);
        line.add_section(station(1), station(2), 3, 5);
        line.add_section(station(2), station(3), 4, 6);

        let graph = SubwayGraph::build(line.bidirectional_sections(), CostMetric::Distance)
            .expect("valid sections");

        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.section_count(), 4);
        assert!(graph.contains(2));
        assert!(!graph.contains(4));
        assert_eq!(graph.station(3).map(Station::name), Some("Station 3"));
    }

    #[test]
    fn empty_sections_are_rejected() {
        let result = SubwayGraph::build(Vec::<Section>::new(), CostMetric::Duration);

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn non_positive_lengths_are_rejected() {
        let mut zero_distance = Line::new(1, "Line 1", 0);
        zero_distance.add_section(station(1), station(2), 0, 5);
        let mut zero_duration = Line::new(2, "Line 2", 0);
        zero_duration.add_section(station(1), station(2), 3, 0);

        for line in [zero_distance, zero_duration] {
            let result = SubwayGraph::build(line.sections(), CostMetric::Distance);
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut line = Line::new(1, "Loop", 0);
        line.add_section(station(1), station(1), 3, 5);

        let result = SubwayGraph::build(line.sections(), CostMetric::Distance);

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn metric_selects_edge_weight() {
        let edge = SectionEdge {
            line: Arc::new(LineInfo {
                id: 1,
                name: "Line 1".to_string(),
                extra_fare: 0,
            }),
            distance: 3,
            duration: 5,
        };

        assert_eq!(CostMetric::Distance.weight(&edge), 3);
        assert_eq!(CostMetric::Duration.weight(&edge), 5);
    }

    #[test]
    fn metric_parses_case_insensitively() {
        assert_eq!("DISTANCE".parse::<CostMetric>().ok(), Some(CostMetric::Distance));
        assert_eq!("duration".parse::<CostMetric>().ok(), Some(CostMetric::Duration));
        assert!(matches!(
            "FARE".parse::<CostMetric>(),
            Err(Error::UnsupportedCostMetric(value)) if value == "FARE"
        ));
    }

    #[test]
    fn metric_serializes_in_upper_case() {
        let json = serde_json::to_string(&CostMetric::Duration).expect("serializable");
        assert_eq!(json, "\"DURATION\"");

        let metric: CostMetric = serde_json::from_str("\"DISTANCE\"").expect("deserializable");
        assert_eq!(metric, CostMetric::Distance);
    }
}
