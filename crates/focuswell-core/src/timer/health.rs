//! Fixed-period hydration/stretch reminder.
//!
//! Unlike the focus cycle this countdown restarts itself on expiry and keeps
//! running indefinitely once started.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::format::progress_ratio;
use crate::events::{Completion, Event};

/// Reminder period: four hours.
pub const HEALTH_PERIOD_SECS: u64 = 4 * 60 * 60;
/// Intake units credited per reminder.
pub const HYDRATION_PER_REMINDER: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCycle {
    remaining_secs: u64,
    is_running: bool,
    /// Running total of credited intake. Only ever grows.
    hydration_total: u64,
}

impl HealthCycle {
    /// Full window, already running.
    pub fn new() -> Self {
        Self {
            remaining_secs: HEALTH_PERIOD_SECS,
            is_running: true,
            hydration_total: 0,
        }
    }

    /// Restore from explicit state; `remaining_secs` is clamped to the period.
    pub fn from_parts(remaining_secs: u64, is_running: bool, hydration_total: u64) -> Self {
        Self {
            remaining_secs: remaining_secs.min(HEALTH_PERIOD_SECS),
            is_running,
            hydration_total,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn hydration_total(&self) -> u64 {
        self.hydration_total
    }

    pub fn progress(&self) -> f64 {
        progress_ratio(HEALTH_PERIOD_SECS, self.remaining_secs)
    }

    pub fn toggle_active(&mut self) -> Event {
        self.is_running = !self.is_running;
        debug!(is_running = self.is_running, "health cycle toggled");
        Event::HealthToggled {
            is_running: self.is_running,
            at: Utc::now(),
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        Some(self.toggle_active())
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        Some(self.toggle_active())
    }

    /// Advance one second. Returns `Some(Event::HealthCompleted)` on expiry.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.on_expiry());
        }
        None
    }

    fn on_expiry(&mut self) -> Event {
        let completion = Completion::health();
        self.remaining_secs = HEALTH_PERIOD_SECS;
        self.hydration_total = self.hydration_total.saturating_add(HYDRATION_PER_REMINDER);
        info!(hydration_total = self.hydration_total, "health reminder due");
        Event::HealthCompleted {
            hydration_total: self.hydration_total,
            completion,
        }
    }
}

impl Default for HealthCycle {
    fn default() -> Self {
        Self::new()
    }
}
