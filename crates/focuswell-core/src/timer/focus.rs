//! Focus/break cycle engine.
//!
//! A tick-driven state machine with two phases. It owns no thread and no
//! timer handle; the caller invokes `tick()` once per second while
//! `is_running()` is true.
//!
//! ## State Transitions
//!
//! ```text
//! (focus, idle) <-> (focus, running) --expiry--> (break, idle)
//! (break, idle) <-> (break, running) --expiry--> (focus, idle)
//! ```
//!
//! Expiry never auto-starts the next phase.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::format::progress_ratio;
use crate::events::{Completion, Event};
use crate::settings::{DurationSettings, Mode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCycle {
    mode: Mode,
    remaining_secs: u64,
    /// Length the current phase was seeded with. Edits made while running
    /// do not touch it until the next reseed.
    total_secs: u64,
    is_running: bool,
}

impl FocusCycle {
    /// Idle, in focus mode, seeded from `settings`.
    pub fn new(settings: &DurationSettings) -> Self {
        Self::seeded(Mode::Focus, settings)
    }

    /// Restore an engine from explicit state. `remaining_secs` is clamped to
    /// the configured length of `mode`.
    pub fn from_parts(
        mode: Mode,
        remaining_secs: u64,
        is_running: bool,
        settings: &DurationSettings,
    ) -> Self {
        let total_secs = settings.seconds(mode);
        Self {
            mode,
            remaining_secs: remaining_secs.min(total_secs),
            total_secs,
            is_running,
        }
    }

    fn seeded(mode: Mode, settings: &DurationSettings) -> Self {
        let total_secs = settings.seconds(mode);
        Self {
            mode,
            remaining_secs: total_secs,
            total_secs,
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// 0.0 .. 1.0 elapsed share of the current phase.
    pub fn progress(&self) -> f64 {
        progress_ratio(self.total_secs, self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Has no effect when already running or when the counter is at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.remaining_secs == 0 {
            return None;
        }
        self.is_running = true;
        debug!(mode = %self.mode, remaining_secs = self.remaining_secs, "focus cycle started");
        Some(Event::FocusStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Idempotent: pausing an idle engine returns `None` and changes nothing.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        debug!(mode = %self.mode, remaining_secs = self.remaining_secs, "focus cycle paused");
        Some(Event::FocusPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self, settings: &DurationSettings) -> Event {
        self.is_running = false;
        self.reseed(settings);
        debug!(mode = %self.mode, remaining_secs = self.remaining_secs, "focus cycle reset");
        Event::FocusReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Explicit phase selection, bypassing the natural alternation.
    ///
    /// Always stops and reseeds, unless the engine already sits idle at the
    /// full duration of `target`, in which case nothing changes.
    pub fn switch_mode(&mut self, target: Mode, settings: &DurationSettings) -> Option<Event> {
        let full = settings.seconds(target);
        if self.mode == target
            && !self.is_running
            && self.remaining_secs == full
            && self.total_secs == full
        {
            return None;
        }
        let from = self.mode;
        self.is_running = false;
        self.mode = target;
        self.reseed(settings);
        debug!(%from, to = %target, "focus cycle mode switched");
        Some(Event::ModeSwitched {
            from,
            to: target,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `Some(Event::FocusCompleted)` when the
    /// phase runs out.
    pub fn tick(&mut self, settings: &DurationSettings) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.on_expiry(settings));
        }
        None
    }

    /// Reseed the live counter after `edited` changed in `settings`, but only
    /// when `edited` is the current phase and the engine is idle.
    /// Returns whether the counter changed.
    pub fn apply_duration_change(&mut self, edited: Mode, settings: &DurationSettings) -> bool {
        if edited != self.mode || self.is_running {
            return false;
        }
        self.reseed(settings);
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_expiry(&mut self, settings: &DurationSettings) -> Event {
        self.is_running = false;
        let finished = self.mode;
        let completion = Completion::focus_cycle(finished);
        self.mode = finished.other();
        self.reseed(settings);
        info!(%finished, next = %self.mode, "focus cycle phase completed");
        Event::FocusCompleted {
            finished,
            next: self.mode,
            completion,
        }
    }

    fn reseed(&mut self, settings: &DurationSettings) {
        self.total_secs = settings.seconds(self.mode);
        self.remaining_secs = self.total_secs;
    }
}
