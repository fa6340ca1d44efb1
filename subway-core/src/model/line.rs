use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Station;
use crate::{Amount, Distance, Duration, LineId};

/// Line header shared by the line and every section it owns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineInfo {
    pub id: LineId,
    pub name: String,
    /// Surcharge added to the fare of any path riding this line
    pub extra_fare: Amount,
}

/// Directed connection between two adjacent stations of a line
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    line: Arc<LineInfo>,
    up_station: Station,
    down_station: Station,
    distance: Distance,
    duration: Duration,
}

impl Section {
    pub fn new(
        line: Arc<LineInfo>,
        up_station: Station,
        down_station: Station,
        distance: Distance,
        duration: Duration,
    ) -> Self {
        Self {
            line,
            up_station,
            down_station,
            distance,
            duration,
        }
    }

    pub fn line(&self) -> &Arc<LineInfo> {
        &self.line
    }

    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Same section travelled in the opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            line: Arc::clone(&self.line),
            up_station: self.down_station.clone(),
            down_station: self.up_station.clone(),
            distance: self.distance,
            duration: self.duration,
        }
    }
}

/// Subway line: a named chain of sections with an extra fare
#[derive(Debug, Clone)]
pub struct Line {
    info: Arc<LineInfo>,
    sections: Vec<Section>,
}

impl Line {
    pub fn new(id: LineId, name: impl Into<String>, extra_fare: Amount) -> Self {
        Self {
            info: Arc::new(LineInfo {
                id,
                name: name.into(),
                extra_fare,
            }),
            sections: Vec::new(),
        }
    }

    /// Appends a section running from `up_station` to `down_station`
    pub fn add_section(
        &mut self,
        up_station: Station,
        down_station: Station,
        distance: Distance,
        duration: Duration,
    ) {
        self.sections.push(Section::new(
            Arc::clone(&self.info),
            up_station,
            down_station,
            distance,
            duration,
        ));
    }

    /// Appends the reverse of every section currently on the line
    pub fn add_reverse_sections(&mut self) {
        let reversed: Vec<Section> = self.sections.iter().map(Section::reversed).collect();
        self.sections.extend(reversed);
    }

    pub fn info(&self) -> &Arc<LineInfo> {
        &self.info
    }

    pub fn id(&self) -> LineId {
        self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn extra_fare(&self) -> Amount {
        self.info.extra_fare
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Stations served by the line in section order, without repetitions
    pub fn stations(&self) -> Vec<&Station> {
        self.sections
            .iter()
            .flat_map(|section| [section.up_station(), section.down_station()])
            .unique()
            .collect()
    }

    /// Every section followed by its reverse, for networks travelled both ways
    pub fn bidirectional_sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections
            .iter()
            .flat_map(|section| [section.clone(), section.reversed()])
    }
}
