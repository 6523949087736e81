//! Shared test utilities and fixtures.

use serde_json::{Value, json};
use transmission_rpc::types::Torrent as RpcTorrent;

/// Decodes a torrent the way the RPC client decodes a `torrent-get` reply.
pub(crate) fn rpc_torrent_from(value: Value) -> RpcTorrent {
    serde_json::from_value(value).expect("fixture should decode as a torrent")
}

pub(crate) fn make_rpc_torrent(id: i64, name: &str, hash: &str) -> RpcTorrent {
    rpc_torrent_from(json!({
        "id": id,
        "eta": -1,
        "sizeWhenDone": 1000,
        "name": name,
        "hashString": hash,
        "status": 4,
        "isFinished": false,
        "rateUpload": 0,
        "rateDownload": 2048,
        "percentDone": 0.5,
        "peersConnected": 1,
        "startDate": 1_700_000_000,
        "uploadRatio": 0.0,
        "downloadDir": "/downloads",
        "downloadedEver": 500,
        "uploadedEver": 0,
        "files": [{
            "name": format!("{name}.iso"),
            "length": 1000,
            "bytesCompleted": 500,
            "beginPiece": 0,
            "endPiece": 3
        }],
        "peers": [{
            "address": "10.0.0.2",
            "port": 51413,
            "clientName": "Transmission 4.0.5",
            "clientIsChoked": false,
            "clientIsInterested": true,
            "flagStr": "TDEI",
            "isDownloadingFrom": true,
            "isEncrypted": true,
            "isIncoming": false,
            "isUploadingTo": false,
            "isUTP": true,
            "peerIsChoked": true,
            "peerIsInterested": false,
            "progress": 0.25,
            "rateToClient": 100,
            "rateToPeer": 20,
            "bytesToClient": 4096,
            "bytesToPeer": 0
        }],
        "trackers": [{
            "id": 0,
            "tier": 0,
            "announce": "udp://tracker.example/announce",
            "scrape": "udp://tracker.example/scrape",
            "sitename": "example"
        }],
        "trackerStats": [{
            "id": 0,
            "tier": 0,
            "announce": "udp://tracker.example/announce",
            "announceState": 1,
            "downloadCount": 7,
            "hasAnnounced": true,
            "hasScraped": true,
            "host": "udp://tracker.example:80",
            "isBackup": false,
            "lastAnnouncePeerCount": 30,
            "lastAnnounceResult": "Success",
            "lastAnnounceStartTime": 1_700_000_000,
            "lastAnnounceSucceeded": true,
            "lastAnnounceTime": 1_700_000_001,
            "lastAnnounceTimedOut": false,
            "lastScrapeResult": "",
            "lastScrapeStartTime": 1_700_000_000,
            "lastScrapeSucceeded": true,
            "lastScrapeTime": 1_700_000_001,
            "lastScrapeTimedOut": false,
            "leecherCount": 4,
            "nextAnnounceTime": 1_700_001_800,
            "nextScrapeTime": 1_700_001_800,
            "scrape": "udp://tracker.example/scrape",
            "scrapeState": 1,
            "seederCount": 12,
            "sitename": "example"
        }]
    }))
}

/// The short form the daemon returns from `torrent-add`.
pub(crate) fn make_added(id: i64, name: &str, hash: &str) -> RpcTorrent {
    rpc_torrent_from(json!({"id": id, "name": name, "hashString": hash}))
}
