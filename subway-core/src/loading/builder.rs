use std::io::Read;

use hashbrown::HashMap;
use log::{info, warn};

use super::config::NetworkConfig;
use super::parser::{deserialize_feed, deserialize_feed_file};
use super::raw_types::{FeedLine, FeedSection, FeedStation};
use crate::model::{Line, Station};
use crate::{Error, LineId, StationId};

const STATIONS_FILE: &str = "stations.csv";
const LINES_FILE: &str = "lines.csv";
const SECTIONS_FILE: &str = "sections.csv";

/// Loads the lines of a network from the CSV feed described by `config`
///
/// # Errors
///
/// Returns an error if the feed directory or one of its files is missing,
/// or if sections reference unknown lines or stations.
pub fn load_network(config: &NetworkConfig) -> Result<Vec<Line>, Error> {
    validate_config(config)?;

    info!("Loading subway network from {}", config.data_dir.display());

    let stations: Vec<FeedStation> = deserialize_feed_file(&config.data_dir.join(STATIONS_FILE))?;
    let lines: Vec<FeedLine> = deserialize_feed_file(&config.data_dir.join(LINES_FILE))?;
    let sections: Vec<FeedSection> = deserialize_feed_file(&config.data_dir.join(SECTIONS_FILE))?;

    build_lines(stations, lines, sections, config.bidirectional)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.data_dir.is_dir() {
        return Err(Error::InvalidData(format!(
            "Network directory not found: {}",
            config.data_dir.display()
        )));
    }

    for file in [STATIONS_FILE, LINES_FILE, SECTIONS_FILE] {
        let path = config.data_dir.join(file);
        if !path.is_file() {
            return Err(Error::InvalidData(format!(
                "Feed file not found: {}",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Same as [`load_network`] over arbitrary readers
///
/// # Errors
///
/// Returns an error if sections reference unknown lines or stations.
pub fn load_network_from_readers<S, L, C>(
    stations: S,
    lines: L,
    sections: C,
    bidirectional: bool,
) -> Result<Vec<Line>, Error>
where
    S: Read,
    L: Read,
    C: Read,
{
    build_lines(
        deserialize_feed(stations, STATIONS_FILE),
        deserialize_feed(lines, LINES_FILE),
        deserialize_feed(sections, SECTIONS_FILE),
        bidirectional,
    )
}

fn build_lines(
    feed_stations: Vec<FeedStation>,
    feed_lines: Vec<FeedLine>,
    feed_sections: Vec<FeedSection>,
    bidirectional: bool,
) -> Result<Vec<Line>, Error> {
    let mut stations: HashMap<StationId, Station> = HashMap::with_capacity(feed_stations.len());
    for feed_station in feed_stations {
        if stations.contains_key(&feed_station.station_id) {
            warn!(
                "Duplicate station {} ignored, keeping the first definition",
                feed_station.station_id
            );
            continue;
        }
        stations.insert(
            feed_station.station_id,
            Station::new(feed_station.station_id, feed_station.station_name),
        );
    }

    let mut lines: Vec<Line> = Vec::with_capacity(feed_lines.len());
    let mut line_positions: HashMap<LineId, usize> = HashMap::with_capacity(feed_lines.len());
    for feed_line in feed_lines {
        if line_positions.contains_key(&feed_line.line_id) {
            return Err(Error::InvalidData(format!(
                "Line {} is defined more than once",
                feed_line.line_id
            )));
        }
        line_positions.insert(feed_line.line_id, lines.len());
        lines.push(Line::new(
            feed_line.line_id,
            feed_line.line_name,
            feed_line.extra_fare,
        ));
    }

    let section_count = feed_sections.len();
    for feed_section in feed_sections {
        let position = *line_positions.get(&feed_section.line_id).ok_or_else(|| {
            Error::InvalidData(format!(
                "Section {} -> {} references unknown line {}",
                feed_section.up_station_id, feed_section.down_station_id, feed_section.line_id
            ))
        })?;
        let up = lookup_station(&stations, feed_section.up_station_id)?;
        let down = lookup_station(&stations, feed_section.down_station_id)?;

        lines[position].add_section(up, down, feed_section.distance, feed_section.duration);
    }

    if bidirectional {
        lines.iter_mut().for_each(Line::add_reverse_sections);
    }

    info!(
        "Loaded {} lines, {} stations and {section_count} sections{}",
        lines.len(),
        stations.len(),
        if bidirectional { " (both directions)" } else { "" }
    );

    Ok(lines)
}

fn lookup_station(stations: &HashMap<StationId, Station>, id: StationId) -> Result<Station, Error> {
    stations
        .get(&id)
        .cloned()
        .ok_or_else(|| Error::InvalidData(format!("Section references unknown station {id}")))
}
