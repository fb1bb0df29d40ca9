//! The bridge proper: follows one player and publishes its track.
//!
//! All state lives in `Bridge` and is only touched by the single event loop
//! in `run`, so nothing here needs a lock. Signals reach the loop through the
//! event channel; a handle's token decides whether a signal is still relevant.

use std::sync::mpsc::Sender;
use std::time::Duration;

use async_io::Timer;
use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use tracing::{debug, info, trace, warn};

use crate::config::BridgeSettings;
use crate::metadata;
use crate::track::{TrackRecord, format_time};

use super::bus::{MediaBus, PLAYER_IFACE, PlayerHandle, Subscription, SubscriptionToken};
use super::policy::{Candidates, SelectionPolicy, is_player_name};
use super::{BridgeEvent, EventSender, MediaCommand};

struct ActivePlayer {
    handle: PlayerHandle,
    // Held only so that replacing the player unsubscribes.
    _subscription: Subscription,
}

pub struct Bridge<B> {
    bus: Option<B>,
    policy: SelectionPolicy,
    candidates: Candidates,
    current: Option<ActivePlayer>,
    generation: u64,
    settle_delay: Duration,
    events: EventSender,
    updates: Sender<TrackRecord>,
}

impl<B: MediaBus> Bridge<B> {
    /// `bus` is `None` when the session bus could not be reached; the bridge
    /// then stays idle and every command is a no-op.
    pub fn new(
        bus: Option<B>,
        settings: &BridgeSettings,
        events: EventSender,
        updates: Sender<TrackRecord>,
    ) -> Self {
        Self {
            bus,
            policy: SelectionPolicy::new(&settings.preferred_player),
            candidates: Candidates::default(),
            current: None,
            generation: 0,
            settle_delay: Duration::from_millis(settings.initial_refresh_delay_ms),
            events,
            updates,
        }
    }

    /// The player currently followed, if any.
    pub fn current(&self) -> Option<&PlayerHandle> {
        self.current.as_ref().map(|c| &c.handle)
    }

    /// Start watching the bus, discover players and pick one.
    pub async fn initialize(&mut self) {
        let Some(bus) = &self.bus else {
            info!("no session bus; media controls stay idle");
            return;
        };

        // Watch before listing so no arrival falls between the two.
        if let Err(err) = bus.watch_name_owners(self.events.clone()).await {
            warn!(error = %err, "player arrivals and departures will go unnoticed");
        }

        let players = self.discover_players().await;
        if players.is_empty() {
            info!("no media players yet; waiting for one to start");
        }
        self.reselect().await;
    }

    /// List bus names and remember the MPRIS players among them, in discovery order.
    pub async fn discover_players(&mut self) -> Vec<String> {
        let Some(bus) = &self.bus else {
            return Vec::new();
        };

        let names = match bus.list_names().await {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "player discovery failed");
                return Vec::new();
            }
        };

        let players: Vec<String> = names.into_iter().filter(|n| is_player_name(n)).collect();
        for name in &players {
            self.candidates.insert(name);
        }
        debug!(?players, "discovered media players");
        players
    }

    /// Process events until shutdown.
    pub async fn run(&mut self, mut events: UnboundedReceiver<BridgeEvent>) {
        while let Some(event) = events.next().await {
            if !self.handle_event(event).await {
                break;
            }
        }
        debug!("media bridge stopped");
    }

    /// Handle one event. Returns false once the bridge should stop.
    pub async fn handle_event(&mut self, event: BridgeEvent) -> bool {
        match event {
            BridgeEvent::NameOwnerChanged {
                name,
                old_owner,
                new_owner,
            } => {
                self.on_name_owner_changed(&name, old_owner.as_deref(), new_owner.as_deref())
                    .await
            }
            BridgeEvent::PropertiesChanged { token, interface } => {
                self.on_properties_changed(token, &interface).await
            }
            BridgeEvent::Command(command) => self.command(command).await,
            BridgeEvent::Shutdown => return false,
        }
        true
    }

    pub async fn on_name_owner_changed(
        &mut self,
        name: &str,
        old_owner: Option<&str>,
        new_owner: Option<&str>,
    ) {
        if !is_player_name(name) {
            return;
        }

        let is_current = self.current().is_some_and(|h| h.bus_name() == name);

        if new_owner.is_some() {
            let added = self.candidates.insert(name);
            if is_current && old_owner.is_some() {
                info!(player = name, "player restarted; resubscribing");
                self.activate(name.to_string()).await;
            } else if self.current.is_none() {
                info!(player = name, "media player started");
                self.reselect().await;
            } else if added {
                debug!(player = name, "media player started; keeping current one");
            }
        } else {
            self.candidates.remove(name);
            if is_current {
                info!(player = name, "followed media player stopped");
                self.reselect().await;
            } else {
                debug!(player = name, "media player stopped");
            }
        }
    }

    async fn on_properties_changed(&mut self, token: SubscriptionToken, interface: &str) {
        let Some(handle) = self.current().cloned() else {
            return;
        };
        if handle.token() != token {
            trace!(?token, "ignoring change from a replaced player");
            return;
        }
        if interface != PLAYER_IFACE {
            return;
        }
        self.refresh_metadata(&handle).await;
    }

    /// Drop the current player and pick again from the live candidates.
    async fn reselect(&mut self) {
        self.current = None;
        let Some(name) = self
            .policy
            .select(self.candidates.as_slice())
            .map(str::to_string)
        else {
            info!("no media player to follow");
            return;
        };
        self.activate(name).await;
    }

    /// Follow `name` under a fresh handle, replacing whatever was followed before.
    async fn activate(&mut self, name: String) {
        // Unsubscribe from the old handle before anything else.
        self.current = None;
        let Some(bus) = &self.bus else {
            return;
        };

        self.generation += 1;
        let handle = PlayerHandle::new(name, self.generation);
        match bus.subscribe(&handle, self.events.clone()).await {
            Ok(subscription) => {
                info!(player = handle.bus_name(), "following media player");
                self.current = Some(ActivePlayer {
                    handle: handle.clone(),
                    _subscription: subscription,
                });
            }
            Err(err) => {
                warn!(error = %err, "could not follow media player");
                return;
            }
        }

        if !self.settle_delay.is_zero() {
            Timer::after(self.settle_delay).await;
        }
        self.refresh_metadata(&handle).await;
    }

    /// Read the player's properties and publish a record if they describe a track.
    ///
    /// Idle players (no metadata, no title) leave the last published record alone.
    /// Runs to completion inside one event, so `handle` stays current throughout.
    pub async fn refresh_metadata(&self, handle: &PlayerHandle) {
        let Some(bus) = &self.bus else {
            return;
        };

        let raw = match bus.read_metadata(handle).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "metadata refresh failed");
                return;
            }
        };
        let status = match bus.read_property(handle, "PlaybackStatus").await {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "metadata refresh failed");
                return;
            }
        };
        let position = bus
            .read_property(handle, "Position")
            .await
            .inspect_err(|err| debug!(error = %err, "position unavailable; using 0"))
            .ok();

        match metadata::normalize(&raw, Some(&status), position.as_ref()) {
            Ok(record) => self.publish(record),
            Err(reason) => debug!(player = handle.bus_name(), %reason, "nothing to publish"),
        }
    }

    fn publish(&self, record: TrackRecord) {
        debug!(
            title = %record.title,
            artist = %record.artist,
            playing = record.playing,
            progress = %format!(
                "{} / {}",
                format_time(record.position_micros),
                format_time(record.length_micros)
            ),
            "track update"
        );
        if self.updates.send(record).is_err() {
            debug!("presentation side is gone; dropping track update");
        }
    }

    /// Send a transport command to the current player. Never fails from the
    /// caller's point of view.
    pub async fn command(&self, command: MediaCommand) {
        let (Some(bus), Some(handle)) = (&self.bus, self.current()) else {
            debug!(?command, "no media player to control");
            return;
        };
        match bus.call(handle, command).await {
            Ok(()) => debug!(?command, player = handle.bus_name(), "media command sent"),
            Err(err) => warn!(error = %err, "media command failed"),
        }
    }
}
