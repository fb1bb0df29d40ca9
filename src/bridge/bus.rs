//! The seam between the bridge and the session bus.

use futures::future::AbortHandle;
use zvariant::OwnedValue;

use crate::error::BridgeError;
use crate::metadata::RawMetadata;

use super::{EventSender, MediaCommand};

pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";
pub const PLAYER_IFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Identifies one subscription generation. Events carry it so that
/// notifications from a replaced player can be told apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// The currently followed player: bus name plus generation.
///
/// Two handles for the same name are different players if their tokens differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerHandle {
    bus_name: String,
    token: SubscriptionToken,
}

impl PlayerHandle {
    pub(crate) fn new(bus_name: String, generation: u64) -> Self {
        Self {
            bus_name,
            token: SubscriptionToken(generation),
        }
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    pub fn token(&self) -> SubscriptionToken {
        self.token
    }
}

/// A live property-change subscription. Dropping it unsubscribes.
pub struct Subscription {
    abort: Option<AbortHandle>,
}

impl Subscription {
    /// A subscription whose forwarding task is stopped through `abort`.
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort: Some(abort) }
    }

    /// A subscription with no task behind it.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self { abort: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

/// Session bus operations the bridge needs.
///
/// Implementations forward signals into the bridge's event channel rather
/// than calling back into it.
pub trait MediaBus {
    /// All names currently registered on the bus.
    async fn list_names(&self) -> Result<Vec<String>, BridgeError>;

    /// Start forwarding `NameOwnerChanged` into `events`.
    async fn watch_name_owners(&self, events: EventSender) -> Result<(), BridgeError>;

    /// Start forwarding `PropertiesChanged` of `handle`'s player object into
    /// `events`, tagged with the handle's token.
    async fn subscribe(
        &self,
        handle: &PlayerHandle,
        events: EventSender,
    ) -> Result<Subscription, BridgeError>;

    /// Read and decode the player's `Metadata` property.
    async fn read_metadata(&self, handle: &PlayerHandle) -> Result<RawMetadata, BridgeError>;

    /// Read one property of the player interface as a raw value.
    async fn read_property(
        &self,
        handle: &PlayerHandle,
        property: &'static str,
    ) -> Result<OwnedValue, BridgeError>;

    /// Invoke a transport method on the player.
    async fn call(&self, handle: &PlayerHandle, command: MediaCommand) -> Result<(), BridgeError>;
}
