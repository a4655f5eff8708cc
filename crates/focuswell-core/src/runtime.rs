//! Single-task driver for a [`Session`].
//!
//! User intents and both engines' tick sources are multiplexed with
//! `tokio::select!` on one task, so every state mutation runs to completion
//! before the next one starts. Tickers are re-synchronised with the engines'
//! running flags after every handled input; a paused engine has no armed
//! ticker and cannot observe another tick.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::events::Event;
use crate::scheduler::Ticker;
use crate::session::{Session, Snapshot};
use crate::settings::Mode;

/// Inbound operations from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    ToggleFocus,
    StartFocus,
    PauseFocus,
    ResetFocus,
    SwitchMode { mode: Mode },
    UpdateDuration { mode: Mode, raw: String },
    ToggleHealth,
    RequestNotificationPermission,
    /// Publish a fresh snapshot without changing anything.
    Refresh,
    Shutdown,
}

/// An intent on its way to the runtime, optionally carrying a reply slot
/// that receives the snapshot taken right after the intent was applied.
#[derive(Debug)]
pub struct Request {
    pub intent: Intent,
    reply: Option<oneshot::Sender<Snapshot>>,
}

impl Request {
    /// A request whose sender waits for the resulting snapshot.
    pub fn with_reply(intent: Intent) -> (Self, oneshot::Receiver<Snapshot>) {
        let (tx, rx) = oneshot::channel();
        let request = Self {
            intent,
            reply: Some(tx),
        };
        (request, rx)
    }
}

impl From<Intent> for Request {
    fn from(intent: Intent) -> Self {
        Self {
            intent,
            reply: None,
        }
    }
}

pub struct Runtime {
    session: Session,
    focus_ticker: Ticker,
    health_ticker: Ticker,
    snapshots: watch::Sender<Snapshot>,
    events: Option<mpsc::UnboundedSender<Event>>,
}

impl Runtime {
    /// Wrap `session`; the returned receiver always holds the latest snapshot.
    pub fn new(session: Session) -> (Self, watch::Receiver<Snapshot>) {
        let (snapshots, rx) = watch::channel(session.snapshot());
        let runtime = Self {
            session,
            focus_ticker: Ticker::new("focus"),
            health_ticker: Ticker::new("health"),
            snapshots,
            events: None,
        };
        (runtime, rx)
    }

    /// Also forward every produced event to `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<Event>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `Intent::Shutdown` arrives or every request sender is dropped.
    /// Both tickers are released before the session is handed back.
    pub async fn run(mut self, mut requests: mpsc::UnboundedReceiver<Request>) -> Session {
        info!("session started");
        loop {
            self.focus_ticker.sync(self.session.focus().is_running());
            self.health_ticker.sync(self.session.health().is_running());

            tokio::select! {
                request = requests.recv() => match request {
                    Some(Request { intent: Intent::Shutdown, .. }) | None => break,
                    Some(Request { intent, reply }) => {
                        self.apply(intent);
                        if let Some(reply) = reply {
                            let _ = reply.send(self.snapshots.borrow().clone());
                        }
                    }
                },
                _ = self.focus_ticker.tick() => {
                    let event = self.session.tick_focus();
                    self.publish(event);
                }
                _ = self.health_ticker.tick() => {
                    let event = self.session.tick_health();
                    self.publish(event);
                }
            }
        }

        self.focus_ticker.disarm();
        self.health_ticker.disarm();
        info!(hydration_total = self.session.hydration_total(), "session ended");
        self.session
    }

    /// Apply one intent synchronously and publish the result.
    pub fn apply(&mut self, intent: Intent) {
        debug!(?intent, "intent");
        let event = match intent {
            Intent::ToggleFocus => self.session.toggle_focus(),
            Intent::StartFocus => self.session.start_focus(),
            Intent::PauseFocus => self.session.pause_focus(),
            Intent::ResetFocus => Some(self.session.reset_focus()),
            Intent::SwitchMode { mode } => self.session.switch_mode(mode),
            Intent::UpdateDuration { mode, raw } => Some(self.session.update_duration(mode, &raw)),
            Intent::ToggleHealth => Some(self.session.toggle_health()),
            Intent::RequestNotificationPermission => {
                Some(self.session.request_notification_permission())
            }
            Intent::Refresh | Intent::Shutdown => None,
        };
        self.publish(event);
    }

    fn publish(&self, event: Option<Event>) {
        if let (Some(event), Some(tx)) = (event, self.events.as_ref()) {
            let _ = tx.send(event);
        }
        self.snapshots.send_replace(self.session.snapshot());
    }
}
