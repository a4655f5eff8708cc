//! Desktop implementations of the alert host traits.

use std::process::{Command, Stdio};

use focuswell_core::{AlertError, NotificationHost, Notice, Permission, SpeechHost, Utterance};
use notify_rust::Notification;

const APP_NAME: &str = "focuswell";

/// Desktop notifications through the platform notification daemon.
///
/// Desktop daemons have no permission prompt, so a request is always granted.
pub struct DesktopNotifier {
    permission: Permission,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            permission: Permission::Default,
        }
    }

    fn notification(notice: &Notice<'_>) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(notice.title)
            .body(notice.body)
            .icon(notice.icon)
            .appname(APP_NAME);
        notification
    }
}

impl NotificationHost for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission = Permission::Granted;
        self.permission
    }

    /// `show()` blocks on the notification daemon, so it runs on its own
    /// thread and the runtime task never waits for it.
    fn notify(&self, notice: &Notice<'_>) -> Result<(), AlertError> {
        let notification = Self::notification(notice);
        std::thread::Builder::new()
            .name("focuswell-notify".into())
            .spawn(move || {
                if let Err(e) = notification.show() {
                    tracing::warn!(error = %e, "notification failed");
                }
            })
            .map(|_| ())
            .map_err(|e| AlertError::NotificationFailed(e.to_string()))
    }
}

/// Speech through whichever system synthesiser command is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechCommand {
    /// speech-dispatcher
    SpdSay,
    /// macOS
    Say,
    Espeak,
}

impl SpeechCommand {
    const CANDIDATES: [SpeechCommand; 3] = [Self::SpdSay, Self::Say, Self::Espeak];

    fn program(self) -> &'static str {
        match self {
            Self::SpdSay => "spd-say",
            Self::Say => "say",
            Self::Espeak => "espeak",
        }
    }

    /// First candidate found on PATH.
    pub fn detect() -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        Self::CANDIDATES.into_iter().find(|candidate| {
            std::env::split_paths(&path).any(|dir| dir.join(candidate.program()).is_file())
        })
    }

    fn args(self, utterance: &Utterance<'_>) -> Vec<String> {
        // Synthesisers measure speed differently; 1.0 is each tool's normal rate.
        match self {
            Self::SpdSay => {
                let rate = ((utterance.rate - 1.0) * 100.0).clamp(-100.0, 100.0) as i32;
                let lang = utterance.locale.split('-').next().unwrap_or("en");
                vec![
                    "-l".into(),
                    lang.into(),
                    "-r".into(),
                    rate.to_string(),
                    utterance.text.into(),
                ]
            }
            Self::Say => {
                let wpm = (175.0 * utterance.rate).round().max(1.0) as u32;
                vec!["-r".into(), wpm.to_string(), utterance.text.into()]
            }
            Self::Espeak => {
                let wpm = (175.0 * utterance.rate).round().max(1.0) as u32;
                vec![
                    "-v".into(),
                    utterance.locale.to_ascii_lowercase(),
                    "-s".into(),
                    wpm.to_string(),
                    utterance.text.into(),
                ]
            }
        }
    }
}

impl SpeechHost for SpeechCommand {
    fn speak(&self, utterance: &Utterance<'_>) -> Result<(), AlertError> {
        let mut child = Command::new(self.program())
            .args(self.args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AlertError::SpeechFailed(format!("{}: {e}", self.program())))?;
        // Reap in the background; nobody waits for the utterance to finish.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}
