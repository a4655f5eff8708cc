//! A single interactive session: both engines, the duration settings, and
//! the alert dispatcher, owned together.
//!
//! Every inbound operation of the presentation layer is a method here.
//! Completion events coming out of a tick are handed to the dispatcher
//! before the event is returned to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::AlertDispatcher;
use crate::events::Event;
use crate::settings::{DurationSettings, Mode};
use crate::timer::{format_remaining, FocusCycle, HealthCycle};

#[derive(Debug)]
pub struct Session {
    settings: DurationSettings,
    focus: FocusCycle,
    health: HealthCycle,
    alerts: AlertDispatcher,
}

impl Session {
    /// Focus mode and idle, health reminder running, nothing accumulated.
    pub fn new(settings: DurationSettings, alerts: AlertDispatcher) -> Self {
        Self {
            focus: FocusCycle::new(&settings),
            health: HealthCycle::new(),
            settings,
            alerts,
        }
    }

    /// Replace the focus engine state, e.g. to resume from a snapshot.
    pub fn with_focus(mut self, focus: FocusCycle) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_health(mut self, health: HealthCycle) -> Self {
        self.health = health;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &DurationSettings {
        &self.settings
    }

    pub fn focus(&self) -> &FocusCycle {
        &self.focus
    }

    pub fn health(&self) -> &HealthCycle {
        &self.health
    }

    pub fn alerts(&self) -> &AlertDispatcher {
        &self.alerts
    }

    pub fn hydration_total(&self) -> u64 {
        self.health.hydration_total()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            focus: FocusView {
                mode: self.focus.mode(),
                remaining_secs: self.focus.remaining_secs(),
                total_secs: self.focus.total_secs(),
                is_running: self.focus.is_running(),
                progress: self.focus.progress(),
                display: format_remaining(self.focus.remaining_secs()),
            },
            health: HealthView {
                remaining_secs: self.health.remaining_secs(),
                is_running: self.health.is_running(),
                progress: self.health.progress(),
                display: format_remaining(self.health.remaining_secs()),
            },
            hydration_total: self.health.hydration_total(),
            notifications_enabled: self.alerts.notifications_enabled(),
            focus_minutes: self.settings.minutes(Mode::Focus),
            break_minutes: self.settings.minutes(Mode::Break),
            at: Utc::now(),
        }
    }

    // ── Focus cycle ──────────────────────────────────────────────────

    pub fn toggle_focus(&mut self) -> Option<Event> {
        self.focus.toggle()
    }

    pub fn start_focus(&mut self) -> Option<Event> {
        self.focus.start()
    }

    pub fn pause_focus(&mut self) -> Option<Event> {
        self.focus.pause()
    }

    pub fn reset_focus(&mut self) -> Event {
        self.focus.reset(&self.settings)
    }

    pub fn switch_mode(&mut self, target: Mode) -> Option<Event> {
        self.focus.switch_mode(target, &self.settings)
    }

    /// Parse and store a duration edit, reseeding the live countdown when the
    /// edited mode is current and idle.
    pub fn update_duration(&mut self, mode: Mode, raw: &str) -> Event {
        let minutes = self.settings.update_from_input(mode, raw);
        let reseeded = self.focus.apply_duration_change(mode, &self.settings);
        tracing::debug!(%mode, minutes, reseeded, "duration updated");
        Event::DurationUpdated {
            mode,
            minutes,
            reseeded,
            at: Utc::now(),
        }
    }

    pub fn tick_focus(&mut self) -> Option<Event> {
        let event = self.focus.tick(&self.settings)?;
        self.dispatch(&event);
        Some(event)
    }

    // ── Health cycle ─────────────────────────────────────────────────

    pub fn toggle_health(&mut self) -> Event {
        self.health.toggle_active()
    }

    pub fn tick_health(&mut self) -> Option<Event> {
        let event = self.health.tick()?;
        self.dispatch(&event);
        Some(event)
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub fn request_notification_permission(&mut self) -> Event {
        let enabled = self.alerts.request_notification_permission();
        Event::NotificationsChanged {
            enabled,
            at: Utc::now(),
        }
    }

    fn dispatch(&self, event: &Event) {
        if let Some(completion) = event.completion() {
            self.alerts.dispatch(completion);
        }
    }
}

/// Read-only view of the focus engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusView {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub is_running: bool,
    /// 0.0 .. 1.0 elapsed share of the current phase.
    pub progress: f64,
    pub display: String,
}

/// Read-only view of the health engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthView {
    pub remaining_secs: u64,
    pub is_running: bool,
    pub progress: f64,
    pub display: String,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub focus: FocusView,
    pub health: HealthView,
    pub hydration_total: u64,
    pub notifications_enabled: bool,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub at: DateTime<Utc>,
}
