//! Alert dispatch for completion events.
//!
//! Two independent, best-effort channels:
//! - speech: attempted whenever a [`SpeechHost`] is installed
//! - notification: attempted only while notifications are enabled and the
//!   [`NotificationHost`] reports permission as granted at dispatch time
//!
//! Host failures are logged and dropped; they never reach the engines.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AlertError;
use crate::events::Completion;

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;
pub const DEFAULT_ICON: &str = "alarm-clock";

/// Host-owned notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

/// A speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance<'a> {
    pub text: &'a str,
    pub locale: &'a str,
    pub rate: f32,
}

/// A system notification request.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub icon: &'a str,
}

/// Speech synthesis capability of the host.
pub trait SpeechHost {
    /// Fire-and-forget. Returning does not mean the utterance was heard.
    fn speak(&self, utterance: &Utterance<'_>) -> Result<(), AlertError>;
}

/// System notification capability of the host.
pub trait NotificationHost {
    /// Current permission as the host sees it.
    fn permission(&self) -> Permission;

    /// Ask the host (and possibly the user) for permission.
    fn request_permission(&mut self) -> Permission;

    fn notify(&self, notice: &Notice<'_>) -> Result<(), AlertError>;
}

/// Fixed voice parameters for every utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub locale: String,
    pub rate: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.into(),
            rate: DEFAULT_SPEECH_RATE,
        }
    }
}

/// Which channels were actually handed the completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub spoken: bool,
    pub notified: bool,
}

pub struct AlertDispatcher {
    speech: Option<Box<dyn SpeechHost>>,
    notifier: Option<Box<dyn NotificationHost>>,
    notifications_enabled: bool,
    voice: Voice,
    icon: String,
}

impl AlertDispatcher {
    /// A dispatcher with no host capabilities; every dispatch is a no-op.
    pub fn new() -> Self {
        Self {
            speech: None,
            notifier: None,
            notifications_enabled: false,
            voice: Voice::default(),
            icon: DEFAULT_ICON.into(),
        }
    }

    pub fn with_speech(mut self, host: Box<dyn SpeechHost>) -> Self {
        self.speech = Some(host);
        self
    }

    pub fn with_notifier(mut self, host: Box<dyn NotificationHost>) -> Self {
        self.notifier = Some(host);
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// The core's view of notification permission. May be stale if the
    /// user revoked permission outside the application.
    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Ask the host for permission and mirror whether it was granted.
    /// Without a notification host the flag stays off.
    pub fn request_notification_permission(&mut self) -> bool {
        let permission = match self.notifier.as_mut() {
            Some(host) => host.request_permission(),
            None => {
                debug!("notification permission requested but host has no notification support");
                return false;
            }
        };
        self.notifications_enabled = permission == Permission::Granted;
        info!(?permission, enabled = self.notifications_enabled, "notification permission");
        self.notifications_enabled
    }

    pub fn dispatch(&self, completion: &Completion) -> DispatchReport {
        DispatchReport {
            spoken: self.speak(completion),
            notified: self.notify(completion),
        }
    }

    fn speak(&self, completion: &Completion) -> bool {
        let Some(host) = self.speech.as_ref() else {
            debug!("speech skipped: no speech host");
            return false;
        };
        let utterance = Utterance {
            text: &completion.spoken,
            locale: &self.voice.locale,
            rate: self.voice.rate,
        };
        if let Err(e) = host.speak(&utterance) {
            warn!(error = %e, source = ?completion.source, "speech failed");
        }
        true
    }

    fn notify(&self, completion: &Completion) -> bool {
        if !self.notifications_enabled {
            return false;
        }
        let Some(host) = self.notifier.as_ref() else {
            return false;
        };
        if host.permission() != Permission::Granted {
            debug!("notification skipped: host permission no longer granted");
            return false;
        }
        let notice = Notice {
            title: &completion.title,
            body: &completion.body,
            icon: &self.icon,
        };
        if let Err(e) = host.notify(&notice) {
            warn!(error = %e, source = ?completion.source, "notification failed");
        }
        true
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("speech", &self.speech.is_some())
            .field("notifier", &self.notifier.is_some())
            .field("notifications_enabled", &self.notifications_enabled)
            .field("voice", &self.voice)
            .field("icon", &self.icon)
            .finish()
    }
}
