//! Error types for the media bridge and the metadata normalizer.
//!
//! None of these reach the user: the bridge logs them and carries on.

use crate::bridge::MediaCommand;

#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    #[error("session bus unavailable: {0}")]
    TransportUnavailable(#[source] zbus::Error),
    #[error("failed to list bus names: {0}")]
    ListNames(#[source] zbus::Error),
    #[error("failed to subscribe to {player}: {source}")]
    SubscriptionFailure {
        player: String,
        #[source]
        source: zbus::Error,
    },
    #[error("failed to read {property} from {player}: {source}")]
    PropertyRead {
        player: String,
        property: &'static str,
        #[source]
        source: zbus::Error,
    },
    #[error("{command:?} on {player} failed: {source}")]
    CommandFailure {
        player: String,
        command: MediaCommand,
        #[source]
        source: zbus::Error,
    },
    #[error("bridge executor is gone")]
    Executor(#[from] futures::task::SpawnError),
}

/// Why a metadata snapshot produced no publishable record.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataIncomplete {
    #[error("player reported no metadata")]
    Empty,
    #[error("metadata has no title")]
    MissingTitle,
}
