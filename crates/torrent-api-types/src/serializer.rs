//! Conversion of torrent snapshots into nested JSON records.

use serde_json::Value;

use crate::mapping::{Mappable, MappingError, Record, map_all, map_object};
use crate::model::Torrent;

/// Daemon field names of the nested collections, which are also their output keys.
pub const COLLECTION_FIELDS: [&str; 4] = ["files", "peers", "trackers", "trackerStats"];

/// Converts a single torrent, including its files, peers, trackers and tracker stats.
pub fn torrent_to_record(torrent: &Torrent) -> Result<Record, MappingError> {
    let mut record = map_object(torrent, Torrent::MAPPING)?;
    let [files, peers, trackers, tracker_stats] = COLLECTION_FIELDS;
    record.insert(files.into(), Value::Array(map_all(&torrent.files)?));
    record.insert(peers.into(), Value::Array(map_all(&torrent.peers)?));
    record.insert(trackers.into(), Value::Array(map_all(&torrent.trackers)?));
    record.insert(
        tracker_stats.into(),
        Value::Array(map_all(&torrent.tracker_stats)?),
    );
    Ok(record)
}

/// Converts a list of torrents, preserving order.
pub fn torrents_to_records(torrents: &[Torrent]) -> Result<Vec<Record>, MappingError> {
    torrents.iter().map(torrent_to_record).collect()
}
