//! Line commands typed into a running session.

use focuswell_core::{Intent, Mode};

pub const HELP: &str = "\
commands:
  start | pause | toggle     focus timer
  reset                      restart the current phase
  focus | break              select a phase
  set <focus|break> <min>    change a duration
  health                     pause/resume the health reminder
  notify                     enable desktop notifications
  status                     print the current state
  help                       this text
  quit                       end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Intent(Intent),
    Status,
    Help,
    Empty,
}

/// Parse one line. Errors carry a message for the user.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Empty);
    };

    let intent = match head.to_ascii_lowercase().as_str() {
        "start" => Intent::StartFocus,
        "pause" => Intent::PauseFocus,
        "toggle" | "t" => Intent::ToggleFocus,
        "reset" | "r" => Intent::ResetFocus,
        "focus" | "work" => Intent::SwitchMode { mode: Mode::Focus },
        "break" | "rest" => Intent::SwitchMode { mode: Mode::Break },
        "set" => {
            let mode: Mode = words
                .next()
                .ok_or("usage: set <focus|break> <minutes>")?
                .parse()?;
            // The raw text goes through unchanged; the session clamps it.
            let raw = words.collect::<Vec<_>>().join(" ");
            Intent::UpdateDuration { mode, raw }
        }
        "health" | "h" => Intent::ToggleHealth,
        "notify" => Intent::RequestNotificationPermission,
        "status" | "s" => return Ok(Input::Status),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => Intent::Shutdown,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Input::Intent(intent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_focus_controls() {
        assert_eq!(parse_line("start"), Ok(Input::Intent(Intent::StartFocus)));
        assert_eq!(parse_line(" PAUSE "), Ok(Input::Intent(Intent::PauseFocus)));
        assert_eq!(parse_line("t"), Ok(Input::Intent(Intent::ToggleFocus)));
        assert_eq!(
            parse_line("break"),
            Ok(Input::Intent(Intent::SwitchMode { mode: Mode::Break }))
        );
    }

    #[test]
    fn set_keeps_raw_value() {
        assert_eq!(
            parse_line("set focus -3"),
            Ok(Input::Intent(Intent::UpdateDuration {
                mode: Mode::Focus,
                raw: "-3".into()
            }))
        );
        assert_eq!(
            parse_line("set break"),
            Ok(Input::Intent(Intent::UpdateDuration {
                mode: Mode::Break,
                raw: String::new()
            }))
        );
        assert!(parse_line("set").is_err());
        assert!(parse_line("set nap 5").is_err());
    }

    #[test]
    fn meta_commands() {
        assert_eq!(parse_line(""), Ok(Input::Empty));
        assert_eq!(parse_line("status"), Ok(Input::Status));
        assert_eq!(parse_line("help"), Ok(Input::Help));
        assert_eq!(parse_line("quit"), Ok(Input::Intent(Intent::Shutdown)));
        assert!(parse_line("dance").is_err());
    }
}
