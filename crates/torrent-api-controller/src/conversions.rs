//! Type conversion wrapper between transmission_rpc types and torrent_api_types.
//!
//! The wrapper exists to satisfy the orphan rule since both the source and target types are
//! defined outside this crate. Fields the daemon left out become their zero value.

use transmission_rpc::types::{Id, Torrent as RpcTorrent};

use torrent_api_types::{File, Peer, Torrent, Tracker, TrackerStats};

/// Wrapper for converting `RpcTorrent` to `Torrent`.
#[derive(Debug)]
pub(crate) struct RpcTorrentWrapper(pub(crate) RpcTorrent);

impl From<RpcTorrentWrapper> for Torrent {
    fn from(wrapper: RpcTorrentWrapper) -> Self {
        let value = wrapper.0;
        let files = value
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|file| File {
                name: file.name,
                size: file.length as i64,
                completed: file.bytes_completed as i64,
            })
            .collect();
        let peers = value
            .peers
            .unwrap_or_default()
            .into_iter()
            .map(|peer| Peer {
                address: peer.address.to_string(),
                port: peer.port as u16,
                client_name: peer.client_name,
                client_choked: peer.client_is_choked,
                client_interested: peer.client_is_interested,
                downloading: peer.is_downloading_from,
                encrypted: peer.is_encrypted,
                incoming: peer.is_incoming,
                uploading: peer.is_uploading_to,
                utp: peer.is_utp,
                peer_choked: peer.peer_is_choked,
                peer_interested: peer.peer_is_interested,
                progress: peer.progress as f64,
                download_rate: peer.rate_to_client as i64,
                upload_rate: peer.rate_to_peer as i64,
            })
            .collect();
        let trackers = value
            .trackers
            .unwrap_or_default()
            .into_iter()
            .map(|tracker| Tracker {
                id: tracker.id as i64,
                tier: tracker.tier as i64,
                scrape: tracker.scrape,
                announce: tracker.announce,
            })
            .collect();
        let tracker_stats = value
            .tracker_stats
            .unwrap_or_default()
            .into_iter()
            .map(|stat| TrackerStats {
                id: match stat.id {
                    Id::Id(id) => id,
                    Id::Hash(_) => 0,
                },
                tier: stat.tier as i64,
                host: stat.host,
                leecher_count: stat.leecher_count as i64,
                seeder_count: stat.seeder_count as i64,
                last_scrape_result: stat.last_scrape_result,
                last_announce_result: stat.last_announce_result,
                last_announce_succeeded: stat.last_announce_succeeded,
            })
            .collect();

        Self {
            id: value.id.unwrap_or_default() as i64,
            eta: value.eta.unwrap_or_default() as i64,
            size: value.size_when_done.unwrap_or_default() as i64,
            name: value.name.unwrap_or_default(),
            hash: value.hash_string.unwrap_or_default(),
            status: value.status.map_or(0, |status| status as i64),
            finished: value.is_finished.unwrap_or_default(),
            upload_rate: value.rate_upload.unwrap_or_default() as i64,
            download_rate: value.rate_download.unwrap_or_default() as i64,
            percent_done: value.percent_done.unwrap_or_default() as f64,
            peers_connected: value.peers_connected.unwrap_or_default() as i64,
            start_date: value.start_date.map_or(0, |date| date.timestamp()),
            upload_ratio: value.upload_ratio.unwrap_or_default() as f64,
            download_dir: value.download_dir.unwrap_or_default(),
            downloaded_ever: value.downloaded_ever.unwrap_or_default() as i64,
            uploaded_ever: value.uploaded_ever.unwrap_or_default() as i64,
            files,
            peers,
            trackers,
            tracker_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testutil::{make_rpc_torrent, rpc_torrent_from};

    #[test]
    fn torrent_fields_are_renamed() {
        let torrent: Torrent = RpcTorrentWrapper(make_rpc_torrent(7, "debian", "deadbeef")).into();

        assert_eq!(torrent.id, 7);
        assert_eq!(torrent.name, "debian");
        assert_eq!(torrent.hash, "deadbeef");
        assert_eq!(torrent.status, 4);
        assert_eq!(torrent.size, 1000);
        assert_eq!(torrent.percent_done, 0.5);
        assert_eq!(torrent.start_date, 1_700_000_000);
        assert_eq!(torrent.download_dir, "/downloads");
        assert_eq!(torrent.files.len(), 1);
        assert_eq!(torrent.files[0].size, 1000);
        assert_eq!(torrent.files[0].completed, 500);
        assert_eq!(torrent.trackers[0].announce, "udp://tracker.example/announce");
        assert_eq!(torrent.trackers[0].tier, 0);
        assert_eq!(torrent.tracker_stats[0].seeder_count, 12);
        assert!(torrent.tracker_stats[0].last_announce_succeeded);
    }

    #[test]
    fn peer_flags_are_kept() {
        let torrent: Torrent = RpcTorrentWrapper(make_rpc_torrent(1, "ubuntu", "abc")).into();
        let peer = &torrent.peers[0];

        assert_eq!(peer.address, "10.0.0.2");
        assert_eq!(peer.port, 51413);
        assert_eq!(peer.client_name, "Transmission 4.0.5");
        assert!(peer.encrypted);
        assert!(peer.utp);
        assert!(!peer.incoming);
        assert_eq!(peer.download_rate, 100);
        assert_eq!(peer.upload_rate, 20);
    }

    #[test]
    fn missing_fields_become_defaults() {
        let torrent: Torrent =
            RpcTorrentWrapper(rpc_torrent_from(json!({"id": 3, "hashString": "abc"}))).into();

        assert_eq!(torrent.id, 3);
        assert_eq!(torrent.hash, "abc");
        assert_eq!(torrent.status, 0);
        assert!(torrent.name.is_empty());
        assert!(torrent.files.is_empty());
        assert!(torrent.peers.is_empty());
        assert!(torrent.trackers.is_empty());
        assert!(torrent.tracker_stats.is_empty());
    }
}
