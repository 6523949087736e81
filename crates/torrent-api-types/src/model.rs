//! Torrent snapshot types and their field mappings.
//!
//! The accessor names are the keys clients of the REST API see, so they are part of the public
//! contract and must not be renamed casually.

use serde_json::Value;

use crate::mapping::{FieldMapping, Mappable};

/// A torrent as reported by the daemon at the time of the request.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Torrent {
    pub id: i64,
    pub eta: i64,
    pub size: i64,
    pub name: String,
    pub hash: String,
    pub status: i64,
    pub finished: bool,
    pub upload_rate: i64,
    pub download_rate: i64,
    pub percent_done: f64,
    pub peers_connected: i64,
    pub start_date: i64,
    pub upload_ratio: f64,
    pub download_dir: String,
    pub downloaded_ever: i64,
    pub uploaded_ever: i64,
    pub files: Vec<File>,
    pub peers: Vec<Peer>,
    pub trackers: Vec<Tracker>,
    pub tracker_stats: Vec<TrackerStats>,
}

impl Mappable for Torrent {
    // Nested collections are handled by the serializer.
    const MAPPING: FieldMapping = &[
        ("id", "id"),
        ("eta", "eta"),
        ("sizeWhenDone", "size"),
        ("name", "name"),
        ("hashString", "hash"),
        ("status", "status"),
        ("isFinished", "finished"),
        ("rateUpload", "uploadRate"),
        ("rateDownload", "downloadRate"),
        ("percentDone", "percentDone"),
        ("peersConnected", "peersConnected"),
        ("startDate", "startDate"),
        ("uploadRatio", "uploadRatio"),
        ("downloadDir", "downloadDir"),
        ("downloadedEver", "downloadedEver"),
        ("uploadedEver", "uploadedEver"),
    ];

    fn get(&self, accessor: &str) -> Option<Value> {
        let value = match accessor {
            "id" => self.id.into(),
            "eta" => self.eta.into(),
            "size" => self.size.into(),
            "name" => self.name.clone().into(),
            "hash" => self.hash.clone().into(),
            "status" => self.status.into(),
            "uploadRate" => self.upload_rate.into(),
            "downloadRate" => self.download_rate.into(),
            "percentDone" => self.percent_done.into(),
            "peersConnected" => self.peers_connected.into(),
            "startDate" => self.start_date.into(),
            "uploadRatio" => self.upload_ratio.into(),
            "downloadDir" => self.download_dir.clone().into(),
            "downloadedEver" => self.downloaded_ever.into(),
            "uploadedEver" => self.uploaded_ever.into(),
            _ => return None,
        };
        Some(value)
    }

    fn is(&self, accessor: &str) -> Option<bool> {
        match accessor {
            "finished" => Some(self.finished),
            _ => None,
        }
    }
}

/// A file inside a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct File {
    pub name: String,
    pub size: i64,
    pub completed: i64,
}

impl Mappable for File {
    const MAPPING: FieldMapping = &[
        ("name", "name"),
        ("length", "size"),
        ("bytesCompleted", "completed"),
    ];

    fn get(&self, accessor: &str) -> Option<Value> {
        match accessor {
            "name" => Some(self.name.clone().into()),
            "size" => Some(self.size.into()),
            "completed" => Some(self.completed.into()),
            _ => None,
        }
    }
}

/// A peer connected for a torrent.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,
    pub port: u16,
    pub client_name: String,
    pub client_choked: bool,
    pub client_interested: bool,
    pub downloading: bool,
    pub encrypted: bool,
    pub incoming: bool,
    pub uploading: bool,
    pub utp: bool,
    pub peer_choked: bool,
    pub peer_interested: bool,
    pub progress: f64,
    pub download_rate: i64,
    pub upload_rate: i64,
}

impl Mappable for Peer {
    const MAPPING: FieldMapping = &[
        ("address", "address"),
        ("port", "port"),
        ("clientName", "clientName"),
        ("clientIsChoked", "clientChoked"),
        ("clientIsInterested", "clientInterested"),
        ("isDownloadingFrom", "downloading"),
        ("isEncrypted", "encrypted"),
        ("isIncoming", "incoming"),
        ("isUploadingTo", "uploading"),
        ("isUTP", "utp"),
        ("peerIsChoked", "peerChoked"),
        ("peerIsInterested", "peerInterested"),
        ("progress", "progress"),
        ("rateToClient", "downloadRate"),
        ("rateToPeer", "uploadRate"),
    ];

    fn get(&self, accessor: &str) -> Option<Value> {
        let value = match accessor {
            "address" => self.address.clone().into(),
            "port" => self.port.into(),
            "clientName" => self.client_name.clone().into(),
            "progress" => self.progress.into(),
            "downloadRate" => self.download_rate.into(),
            "uploadRate" => self.upload_rate.into(),
            _ => return None,
        };
        Some(value)
    }

    fn is(&self, accessor: &str) -> Option<bool> {
        let flag = match accessor {
            "clientChoked" => self.client_choked,
            "clientInterested" => self.client_interested,
            "downloading" => self.downloading,
            "encrypted" => self.encrypted,
            "incoming" => self.incoming,
            "uploading" => self.uploading,
            "utp" => self.utp,
            "peerChoked" => self.peer_choked,
            "peerInterested" => self.peer_interested,
            _ => return None,
        };
        Some(flag)
    }
}

/// A tracker configured for a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Tracker {
    pub id: i64,
    pub tier: i64,
    pub scrape: String,
    pub announce: String,
}

impl Mappable for Tracker {
    const MAPPING: FieldMapping = &[
        ("id", "id"),
        ("tier", "tier"),
        ("scrape", "scrape"),
        ("announce", "announce"),
    ];

    fn get(&self, accessor: &str) -> Option<Value> {
        match accessor {
            "id" => Some(self.id.into()),
            "tier" => Some(self.tier.into()),
            "scrape" => Some(self.scrape.clone().into()),
            "announce" => Some(self.announce.clone().into()),
            _ => None,
        }
    }
}

/// Announce and scrape statistics for one tracker of a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct TrackerStats {
    pub id: i64,
    pub tier: i64,
    pub host: String,
    pub leecher_count: i64,
    pub seeder_count: i64,
    pub last_scrape_result: String,
    pub last_announce_result: String,
    pub last_announce_succeeded: bool,
}

impl Mappable for TrackerStats {
    const MAPPING: FieldMapping = &[
        ("id", "id"),
        ("tier", "tier"),
        ("host", "host"),
        ("leecherCount", "leecherCount"),
        ("seederCount", "seederCount"),
        ("lastScrapeResult", "lastScrapeResult"),
        ("lastAnnounceResult", "lastAnnounceResult"),
        ("lastAnnounceSucceeded", "lastAnnounceSucceeded"),
    ];

    fn get(&self, accessor: &str) -> Option<Value> {
        let value = match accessor {
            "id" => self.id.into(),
            "tier" => self.tier.into(),
            "host" => self.host.clone().into(),
            "leecherCount" => self.leecher_count.into(),
            "seederCount" => self.seeder_count.into(),
            "lastScrapeResult" => self.last_scrape_result.clone().into(),
            "lastAnnounceResult" => self.last_announce_result.clone().into(),
            _ => return None,
        };
        Some(value)
    }

    fn is(&self, accessor: &str) -> Option<bool> {
        match accessor {
            "lastAnnounceSucceeded" => Some(self.last_announce_succeeded),
            _ => None,
        }
    }
}
