use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Mode;

pub const FOCUS_COMPLETE_TITLE: &str = "Focus session complete";
pub const FOCUS_COMPLETE_MESSAGE: &str = "Nice work, time for a short break.";
pub const BREAK_COMPLETE_TITLE: &str = "Break is over";
pub const BREAK_COMPLETE_MESSAGE: &str = "Back to it, focus resumed.";
pub const HEALTH_TITLE: &str = "Health reminder";
pub const HEALTH_MESSAGE: &str = "Drink a glass of water and take a moment to stretch.";

/// Which countdown produced a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    Focus,
    Health,
}

/// Signal emitted when a countdown reaches zero.
///
/// Carries everything the alert dispatcher needs; engines never talk to
/// host capabilities themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub source: CycleKind,
    pub title: String,
    pub body: String,
    pub spoken: String,
    pub at: DateTime<Utc>,
}

impl Completion {
    /// Completion of a focus-cycle phase. `finished` is the phase that just ran out.
    pub fn focus_cycle(finished: Mode) -> Self {
        let (title, message) = match finished {
            Mode::Focus => (FOCUS_COMPLETE_TITLE, FOCUS_COMPLETE_MESSAGE),
            Mode::Break => (BREAK_COMPLETE_TITLE, BREAK_COMPLETE_MESSAGE),
        };
        Self {
            source: CycleKind::Focus,
            title: title.into(),
            body: message.into(),
            spoken: message.into(),
            at: Utc::now(),
        }
    }

    pub fn health() -> Self {
        Self {
            source: CycleKind::Health,
            title: HEALTH_TITLE.into(),
            body: HEALTH_MESSAGE.into(),
            spoken: HEALTH_MESSAGE.into(),
            at: Utc::now(),
        }
    }
}

/// Every state change in a session produces an Event.
/// The presentation layer prints or renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    FocusStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    FocusPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    FocusReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A focus-cycle phase ran out and the cycle flipped to `next`.
    FocusCompleted {
        finished: Mode,
        next: Mode,
        completion: Completion,
    },
    DurationUpdated {
        mode: Mode,
        minutes: u32,
        /// Whether the live countdown was reseeded by this edit.
        reseeded: bool,
        at: DateTime<Utc>,
    },
    HealthToggled {
        is_running: bool,
        at: DateTime<Utc>,
    },
    HealthCompleted {
        hydration_total: u64,
        completion: Completion,
    },
    NotificationsChanged {
        enabled: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The completion payload, if this event is one.
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            Event::FocusCompleted { completion, .. } | Event::HealthCompleted { completion, .. } => {
                Some(completion)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_completion_message_depends_on_finished_phase() {
        let after_focus = Completion::focus_cycle(Mode::Focus);
        assert!(after_focus.spoken.contains("time for a short break"));
        let after_break = Completion::focus_cycle(Mode::Break);
        assert!(after_break.spoken.contains("focus resumed"));
        assert_eq!(after_break.source, CycleKind::Focus);
    }

    #[test]
    fn event_serializes_with_snake_case_tag() {
        let event = Event::HealthToggled {
            is_running: false,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "health_toggled");
    }

    #[test]
    fn completion_accessor() {
        let event = Event::HealthCompleted {
            hydration_total: 500,
            completion: Completion::health(),
        };
        assert_eq!(event.completion().unwrap().source, CycleKind::Health);
        let event = Event::HealthToggled {
            is_running: true,
            at: Utc::now(),
        };
        assert!(event.completion().is_none());
    }
}
