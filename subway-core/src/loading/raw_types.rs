use serde::Deserialize;

use crate::{Amount, Distance, Duration, LineId, StationId};

#[derive(Debug, Clone, Deserialize)]
pub struct FeedStation {
    pub station_id: StationId,
    pub station_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedLine {
    pub line_id: LineId,
    pub line_name: String,
    #[serde(default)]
    pub extra_fare: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSection {
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
    pub duration: Duration,
}
