//! Internal trait abstracting Transmission RPC operations.
//!
//! This module provides the [`TransmissionOps`] trait which abstracts the underlying
//! transmission client, enabling mocking in tests.

use async_trait::async_trait;
use transmission_rpc::types::{
    Id, Torrent as RpcTorrent, TorrentAddArgs, TorrentAddedOrDuplicate, TorrentGetField,
};

use torrent_api_types::TorrentIdentifier;

use crate::rpc::{RpcClient, RpcError, TorrentAction, check};

/// Internal trait that abstracts the transmission client operations.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait TransmissionOps: Send + Sync {
    /// `torrent-get` with every mapped field. `None` fetches all torrents.
    async fn torrent_get(
        &self,
        ids: Option<Vec<TorrentIdentifier>>,
    ) -> Result<Vec<RpcTorrent>, RpcError>;
    /// `torrent-add`. Returns the added torrent, or the existing one for duplicates.
    async fn torrent_add(&self, filename: &str) -> Result<Option<RpcTorrent>, RpcError>;
    async fn torrent_remove(
        &self,
        ids: Vec<TorrentIdentifier>,
        delete_local_data: bool,
    ) -> Result<(), RpcError>;
    async fn torrent_action(
        &self,
        action: TorrentAction,
        ids: Vec<TorrentIdentifier>,
    ) -> Result<(), RpcError>;
}

/// Fields backing the torrent mapping and its nested collections.
fn request_fields() -> Vec<TorrentGetField> {
    vec![
        TorrentGetField::Id,
        TorrentGetField::Eta,
        TorrentGetField::SizeWhenDone,
        TorrentGetField::Name,
        TorrentGetField::HashString,
        TorrentGetField::Status,
        TorrentGetField::IsFinished,
        TorrentGetField::RateUpload,
        TorrentGetField::RateDownload,
        TorrentGetField::PercentDone,
        TorrentGetField::PeersConnected,
        TorrentGetField::StartDate,
        TorrentGetField::UploadRatio,
        TorrentGetField::DownloadDir,
        TorrentGetField::DownloadedEver,
        TorrentGetField::UploadedEver,
        TorrentGetField::Files,
        TorrentGetField::Peers,
        TorrentGetField::Trackers,
        TorrentGetField::TrackerStats,
    ]
}

fn rpc_ids(ids: Vec<TorrentIdentifier>) -> Vec<Id> {
    ids.into_iter()
        .map(|identifier| match identifier {
            TorrentIdentifier::Id(id) => Id::Id(id),
            TorrentIdentifier::Hash(hash) => Id::Hash(hash),
        })
        .collect()
}

#[async_trait]
impl TransmissionOps for RpcClient {
    async fn torrent_get(
        &self,
        ids: Option<Vec<TorrentIdentifier>>,
    ) -> Result<Vec<RpcTorrent>, RpcError> {
        let mut client = self.lock().await;
        let response = self
            .bounded(
                "torrent-get",
                client.torrent_get(Some(request_fields()), ids.map(rpc_ids)),
            )
            .await?;
        check("torrent-get", response.result)?;
        Ok(response.arguments.torrents)
    }

    async fn torrent_add(&self, filename: &str) -> Result<Option<RpcTorrent>, RpcError> {
        let add = TorrentAddArgs {
            filename: Some(filename.to_string()),
            ..TorrentAddArgs::default()
        };
        let mut client = self.lock().await;
        let response = self
            .bounded("torrent-add", client.torrent_add(add))
            .await?;
        check("torrent-add", response.result)?;
        let torrent = match response.arguments {
            TorrentAddedOrDuplicate::TorrentAdded(torrent)
            | TorrentAddedOrDuplicate::TorrentDuplicate(torrent) => Some(torrent),
            #[allow(unreachable_patterns)]
            _ => None,
        };
        Ok(torrent)
    }

    async fn torrent_remove(
        &self,
        ids: Vec<TorrentIdentifier>,
        delete_local_data: bool,
    ) -> Result<(), RpcError> {
        let mut client = self.lock().await;
        let response = self
            .bounded(
                "torrent-remove",
                client.torrent_remove(rpc_ids(ids), delete_local_data),
            )
            .await?;
        check("torrent-remove", response.result)
    }

    async fn torrent_action(
        &self,
        action: TorrentAction,
        ids: Vec<TorrentIdentifier>,
    ) -> Result<(), RpcError> {
        let mut client = self.lock().await;
        let response = self
            .bounded(
                action.method(),
                client.torrent_action(action.to_rpc(), rpc_ids(ids)),
            )
            .await?;
        check(action.method(), response.result)
    }
}
