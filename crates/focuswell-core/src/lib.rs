//! # focuswell Core Library
//!
//! Core logic for the focuswell productivity widget: a focus/break interval
//! timer paired with an independent hydration/stretch reminder.
//!
//! ## Architecture
//!
//! - **Engines**: tick-driven state machines with no internal threads; the
//!   caller invokes `tick()` once per second while an engine runs
//! - **Session**: owns both engines, the duration settings and the alert
//!   dispatcher; every user intent is a method on it
//! - **Alerts**: best-effort speech and notification channels behind host
//!   traits, fed by completion events
//! - **Runtime**: a single-task loop multiplexing intents and per-engine
//!   tickers, publishing snapshots to the presentation layer
//!
//! ## Key Components
//!
//! - [`FocusCycle`]: focus/break state machine
//! - [`HealthCycle`]: self-restarting four-hour reminder
//! - [`AlertDispatcher`]: speech + notification relay
//! - [`Session`]: the whole widget state
//! - [`Runtime`]: async driver
//! - [`Config`]: startup configuration

pub mod alerts;
pub mod error;
pub mod events;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod storage;
pub mod timer;

pub use alerts::{AlertDispatcher, NotificationHost, Notice, Permission, SpeechHost, Utterance, Voice};
pub use error::{AlertError, ConfigError, CoreError};
pub use events::{Completion, CycleKind, Event};
pub use runtime::{Intent, Request, Runtime};
pub use scheduler::Ticker;
pub use session::{Session, Snapshot};
pub use settings::{parse_minutes, DurationSettings, Mode};
pub use storage::Config;
pub use timer::{format_remaining, FocusCycle, HealthCycle};
