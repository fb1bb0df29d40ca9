//! Media bridge: follows one MPRIS player on the session bus.
//!
//! The bridge runs on its own thread with a single-threaded executor. The
//! presentation side receives `TrackRecord`s over a std channel and sends
//! transport commands through `BridgeHandle`.

mod bus;
mod dbus;
mod policy;
mod session;

pub use bus::SubscriptionToken;

use std::sync::mpsc::Sender;
use std::thread;

use futures::channel::mpsc::{UnboundedSender, unbounded};
use futures::executor::LocalPool;
use tracing::{error, warn};

use crate::config::BridgeSettings;
use crate::track::TrackRecord;
use dbus::DbusBus;
use session::Bridge;

/// Sending half of the bridge's event channel.
pub type EventSender = UnboundedSender<BridgeEvent>;

/// Transport commands a player can be asked to perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MediaCommand {
    PlayPause,
    Next,
    Previous,
}

impl MediaCommand {
    /// Name of the MPRIS method implementing this command.
    pub fn method_name(self) -> &'static str {
        match self {
            Self::PlayPause => "PlayPause",
            Self::Next => "Next",
            Self::Previous => "Previous",
        }
    }
}

/// Everything the bridge loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeEvent {
    NameOwnerChanged {
        name: String,
        old_owner: Option<String>,
        new_owner: Option<String>,
    },
    PropertiesChanged {
        token: SubscriptionToken,
        interface: String,
    },
    Command(MediaCommand),
    Shutdown,
}

/// Handle used by the presentation side to drive the bridge.
#[derive(Clone)]
pub struct BridgeHandle {
    tx: EventSender,
}

impl BridgeHandle {
    pub fn play_pause(&self) {
        self.send(BridgeEvent::Command(MediaCommand::PlayPause));
    }

    pub fn next(&self) {
        self.send(BridgeEvent::Command(MediaCommand::Next));
    }

    pub fn previous(&self) {
        self.send(BridgeEvent::Command(MediaCommand::Previous));
    }

    /// Ask the bridge loop to stop. Safe to call more than once.
    pub fn shutdown(&self) {
        self.send(BridgeEvent::Shutdown);
    }

    fn send(&self, event: BridgeEvent) {
        // A stopped bridge just drops commands.
        let _ = self.tx.unbounded_send(event);
    }
}

/// Start the bridge thread. Track updates are delivered on `updates`.
///
/// Never fails: without a session bus the bridge idles and commands are ignored.
pub fn spawn_bridge(settings: BridgeSettings, updates: Sender<TrackRecord>) -> BridgeHandle {
    let (tx, rx) = unbounded();
    let events = tx.clone();

    let spawned = thread::Builder::new()
        .name("islet-bridge".to_string())
        .spawn(move || {
            let mut pool = LocalPool::new();
            let spawner = pool.spawner();
            pool.run_until(async move {
                let bus = match DbusBus::connect(spawner).await {
                    Ok(bus) => Some(bus),
                    Err(err) => {
                        warn!(error = %err, "media bridge running without a session bus");
                        None
                    }
                };
                let mut bridge = Bridge::new(bus, &settings, events, updates);
                bridge.initialize().await;
                bridge.run(rx).await;
            });
        });
    if let Err(err) = spawned {
        error!(error = %err, "failed to start media bridge thread");
    }

    BridgeHandle { tx }
}
