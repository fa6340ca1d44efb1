use std::sync::Arc;

use itertools::Itertools;

use crate::model::{LineInfo, Station};
use crate::{Distance, Duration, Error};

/// Route between two stations
///
/// Holds the visited stations in travel order and, for every section
/// travelled, the line it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    stations: Vec<Station>,
    distance: Distance,
    duration: Duration,
    lines: Vec<Arc<LineInfo>>,
}

impl Path {
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `stations` is empty or does not
    /// hold exactly one more entry than `lines`.
    pub fn new(
        stations: Vec<Station>,
        distance: Distance,
        duration: Duration,
        lines: Vec<Arc<LineInfo>>,
    ) -> Result<Self, Error> {
        if stations.is_empty() {
            return Err(Error::InvalidArgument(
                "A path must contain at least one station".to_string(),
            ));
        }
        if stations.len() != lines.len() + 1 {
            return Err(Error::InvalidArgument(format!(
                "A path through {} stations must travel {} sections, got {}",
                stations.len(),
                stations.len() - 1,
                lines.len()
            )));
        }

        Ok(Self {
            stations,
            distance,
            duration,
            lines,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Line of every travelled section, in travel order
    pub fn lines(&self) -> &[Arc<LineInfo>] {
        &self.lines
    }

    pub fn source(&self) -> &Station {
        &self.stations[0]
    }

    pub fn target(&self) -> &Station {
        &self.stations[self.stations.len() - 1]
    }

    pub fn section_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines in travel order with consecutive repetitions collapsed
    pub fn distinct_lines(&self) -> Vec<&Arc<LineInfo>> {
        self.lines
            .iter()
            .dedup_by(|a, b| a.id == b.id)
            .collect()
    }

    /// Number of changes from one line to another along the path
    pub fn transfer_count(&self) -> usize {
        self.distinct_lines().len().saturating_sub(1)
    }
}
