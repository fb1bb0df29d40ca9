//! `MediaBus` over a real zbus session connection.

use std::cell::RefCell;

use futures::StreamExt;
use futures::executor::LocalSpawner;
use futures::future::{AbortHandle, Abortable};
use futures::task::LocalSpawnExt;
use tracing::trace;
use zbus::Connection;
use zbus::fdo::{DBusProxy, PropertiesProxy};
use zbus::names::InterfaceName;
use zvariant::OwnedValue;

use crate::error::BridgeError;
use crate::metadata::{self, RawMetadata};

use super::bus::{MPRIS_PATH, MediaBus, PLAYER_IFACE, PlayerHandle, Subscription, SubscriptionToken};
use super::{BridgeEvent, EventSender, MediaCommand};

/// One proxy for the followed player, keyed by the handle it was built for.
pub(super) struct ProxyCache<P> {
    slot: RefCell<Option<(SubscriptionToken, P)>>,
}

impl<P: Clone> ProxyCache<P> {
    pub(super) fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// The cached proxy, if it belongs to `token`.
    pub(super) fn get(&self, token: SubscriptionToken) -> Option<P> {
        self.slot
            .borrow()
            .as_ref()
            .filter(|(cached, _)| *cached == token)
            .map(|(_, proxy)| proxy.clone())
    }

    /// Replace whatever was cached with `proxy` for `token`.
    pub(super) fn store(&self, token: SubscriptionToken, proxy: P) {
        *self.slot.borrow_mut() = Some((token, proxy));
    }
}

pub struct DbusBus {
    connection: Connection,
    dbus: DBusProxy<'static>,
    spawner: LocalSpawner,
    properties: ProxyCache<PropertiesProxy<'static>>,
}

impl DbusBus {
    /// Connect to the session bus. Signal forwarding tasks run on `spawner`.
    pub async fn connect(spawner: LocalSpawner) -> Result<Self, BridgeError> {
        let connection = Connection::session()
            .await
            .map_err(BridgeError::TransportUnavailable)?;
        let dbus = DBusProxy::new(&connection)
            .await
            .map_err(BridgeError::TransportUnavailable)?;
        Ok(Self {
            connection,
            dbus,
            spawner,
            properties: ProxyCache::new(),
        })
    }

    /// The player's properties proxy, built on first use per handle.
    async fn properties(&self, handle: &PlayerHandle) -> zbus::Result<PropertiesProxy<'static>> {
        if let Some(proxy) = self.properties.get(handle.token()) {
            return Ok(proxy);
        }
        let proxy = PropertiesProxy::builder(&self.connection)
            .destination(handle.bus_name().to_string())?
            .path(MPRIS_PATH)?
            .build()
            .await?;
        self.properties.store(handle.token(), proxy.clone());
        Ok(proxy)
    }

    fn spawn_forwarder<F>(&self, pump: F) -> Result<AbortHandle, BridgeError>
    where
        F: Future<Output = ()> + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        self.spawner.spawn_local(async move {
            // Err only means the subscription was cancelled.
            let _ = Abortable::new(pump, registration).await;
        })?;
        Ok(abort)
    }
}

impl MediaBus for DbusBus {
    async fn list_names(&self) -> Result<Vec<String>, BridgeError> {
        let names = self
            .dbus
            .list_names()
            .await
            .map_err(|e| BridgeError::ListNames(e.into()))?;
        Ok(names.iter().map(|n| n.as_str().to_string()).collect())
    }

    async fn watch_name_owners(&self, events: EventSender) -> Result<(), BridgeError> {
        let mut changes = self
            .dbus
            .receive_name_owner_changed()
            .await
            .map_err(|source| BridgeError::SubscriptionFailure {
                player: "org.freedesktop.DBus".to_string(),
                source,
            })?;

        self.spawn_forwarder(async move {
            while let Some(signal) = changes.next().await {
                let Ok(args) = signal.args() else {
                    continue;
                };
                let event = BridgeEvent::NameOwnerChanged {
                    name: args.name().to_string(),
                    old_owner: Option::as_ref(args.old_owner()).map(|o| o.to_string()),
                    new_owner: Option::as_ref(args.new_owner()).map(|o| o.to_string()),
                };
                if events.unbounded_send(event).is_err() {
                    break;
                }
            }
        })?;
        Ok(())
    }

    async fn subscribe(
        &self,
        handle: &PlayerHandle,
        events: EventSender,
    ) -> Result<Subscription, BridgeError> {
        let failure = |source: zbus::Error| BridgeError::SubscriptionFailure {
            player: handle.bus_name().to_string(),
            source,
        };
        let props = self.properties(handle).await.map_err(failure)?;
        let mut changes = props.receive_properties_changed().await.map_err(failure)?;

        let token = handle.token();
        let abort = self.spawn_forwarder(async move {
            while let Some(signal) = changes.next().await {
                let Ok(args) = signal.args() else {
                    continue;
                };
                let interface = args.interface_name().as_str().to_string();
                trace!(%interface, "properties changed");
                if events
                    .unbounded_send(BridgeEvent::PropertiesChanged { token, interface })
                    .is_err()
                {
                    break;
                }
            }
        })?;
        Ok(Subscription::new(abort))
    }

    async fn read_metadata(&self, handle: &PlayerHandle) -> Result<RawMetadata, BridgeError> {
        let value = self.read_property(handle, "Metadata").await?;
        metadata::decode_metadata(value).map_err(|e| BridgeError::PropertyRead {
            player: handle.bus_name().to_string(),
            property: "Metadata",
            source: zbus::Error::Variant(e),
        })
    }

    async fn read_property(
        &self,
        handle: &PlayerHandle,
        property: &'static str,
    ) -> Result<OwnedValue, BridgeError> {
        let failure = |source: zbus::Error| BridgeError::PropertyRead {
            player: handle.bus_name().to_string(),
            property,
            source,
        };
        let props = self.properties(handle).await.map_err(failure)?;
        props
            .get(InterfaceName::from_static_str_unchecked(PLAYER_IFACE), property)
            .await
            .map_err(|e| failure(e.into()))
    }

    async fn call(&self, handle: &PlayerHandle, command: MediaCommand) -> Result<(), BridgeError> {
        self.connection
            .call_method(
                Some(handle.bus_name()),
                MPRIS_PATH,
                Some(PLAYER_IFACE),
                command.method_name(),
                &(),
            )
            .await
            .map(|_| ())
            .map_err(|source| BridgeError::CommandFailure {
                player: handle.bus_name().to_string(),
                command,
                source,
            })
    }
}
