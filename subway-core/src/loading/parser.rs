use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;

use crate::Error;

/// Reads every well-formed record of a feed file, skipping malformed rows
pub fn deserialize_feed<R, T>(reader: R, file_name: &str) -> Vec<T>
where
    R: Read,
    T: for<'de> serde::Deserialize<'de>,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .enumerate()
        .filter_map(|(row, record)| match record {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed row {} in {file_name}: {e}", row + 1);
                None
            }
        })
        .collect()
}

pub fn deserialize_feed_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(deserialize_feed(file, &path.display().to_string()))
}
