use itertools::Itertools;
use rayon::prelude::*;

use super::{CostMetric, Path, SubwayGraph, finder};
use crate::fare::{Fare, FareCalculator};
use crate::model::{Line, Station};
use crate::{Age, Error, StationId};

/// Path together with its price
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    pub path: Path,
    pub fare: Fare,
}

/// Subway network made of lines
///
/// Every query builds a fresh graph from the lines, so a map can be shared
/// between threads and queried concurrently.
#[derive(Debug, Clone, Default)]
pub struct SubwayMap {
    lines: Vec<Line>,
}

impl SubwayMap {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All stations served by any line, ordered by id
    pub fn stations(&self) -> Vec<&Station> {
        self.lines
            .iter()
            .flat_map(Line::stations)
            .unique()
            .sorted_by_key(|station| station.id())
            .collect()
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.lines
            .iter()
            .flat_map(Line::sections)
            .flat_map(|section| [section.up_station(), section.down_station()])
            .find(|station| station.id() == id)
    }

    /// Builds the graph of the whole network weighted by `metric`
    ///
    /// # Errors
    ///
    /// See [`SubwayGraph::build`].
    pub fn graph(&self, metric: CostMetric) -> Result<SubwayGraph, Error> {
        SubwayGraph::build(self.lines.iter().flat_map(Line::sections), metric)
    }

    /// # Errors
    ///
    /// Fails when the network cannot be built or as [`finder::find_path`] does.
    pub fn find_path(
        &self,
        source: StationId,
        target: StationId,
        metric: CostMetric,
    ) -> Result<Path, Error> {
        finder::find_path(&self.graph(metric)?, source, target)
    }

    pub fn path_exists(&self, source: StationId, target: StationId) -> bool {
        self.graph(CostMetric::Distance)
            .is_ok_and(|graph| finder::path_exists(&graph, source, target))
    }

    /// Shortest paths from one station to many, in the order of `targets`
    ///
    /// # Errors
    ///
    /// Fails when the network cannot be built or `source` is unknown.
    pub fn find_paths_one_to_many(
        &self,
        source: StationId,
        targets: &[StationId],
        metric: CostMetric,
    ) -> Result<Vec<Result<Path, Error>>, Error> {
        finder::shortest_paths_from(&self.graph(metric)?, source, targets)
    }

    /// Shortest paths between every pair of `stations`, one row per source.
    /// Rows are computed in parallel over a single shared graph.
    ///
    /// # Errors
    ///
    /// Fails when the network cannot be built. Unknown stations are reported
    /// per entry.
    pub fn path_matrix(
        &self,
        stations: &[StationId],
        metric: CostMetric,
    ) -> Result<Vec<Vec<Result<Path, Error>>>, Error> {
        let graph = self.graph(metric)?;

        let matrix = stations
            .par_iter()
            .map(
                |&source| match finder::shortest_paths_from(&graph, source, stations) {
                    Ok(row) => row,
                    Err(e) => {
                        log::warn!("Routing failed for station {source}: {e}");
                        stations
                            .iter()
                            .map(|_| {
                                Err(Error::InvalidArgument(format!(
                                    "Source station {source} is not part of the network"
                                )))
                            })
                            .collect()
                    }
                },
            )
            .collect();

        Ok(matrix)
    }

    /// Finds the path and prices it for a rider of the given age
    ///
    /// # Errors
    ///
    /// Fails as [`SubwayMap::find_path`] does.
    pub fn journey(
        &self,
        source: StationId,
        target: StationId,
        metric: CostMetric,
        age: Option<Age>,
        calculator: &FareCalculator,
    ) -> Result<Journey, Error> {
        let path = self.find_path(source, target, metric)?;
        let fare = calculator.fare_for_path(&path, age);

        Ok(Journey { path, fare })
    }
}
