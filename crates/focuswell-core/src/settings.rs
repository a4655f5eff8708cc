//! User-editable focus/break durations.

use serde::{Deserialize, Serialize};

/// Default focus length in minutes.
pub const DEFAULT_FOCUS_MIN: u32 = 25;
/// Default break length in minutes.
pub const DEFAULT_BREAK_MIN: u32 = 5;
/// Floor applied to every duration edit.
pub const MIN_DURATION_MIN: u32 = 1;

/// Phase of the focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    /// The phase the cycle alternates into after this one expires.
    pub fn other(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "work" => Ok(Mode::Focus),
            "break" | "rest" => Ok(Mode::Break),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Minutes configured for each mode. Both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSettings {
    focus_min: u32,
    break_min: u32,
}

impl DurationSettings {
    /// Build settings, clamping each value to at least one minute.
    pub fn new(focus_min: u32, break_min: u32) -> Self {
        Self {
            focus_min: focus_min.max(MIN_DURATION_MIN),
            break_min: break_min.max(MIN_DURATION_MIN),
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_min,
            Mode::Break => self.break_min,
        }
    }

    /// Configured length of `mode` in seconds.
    pub fn seconds(&self, mode: Mode) -> u64 {
        u64::from(self.minutes(mode)).saturating_mul(60)
    }

    /// Store a new value for `mode`, clamped to the minimum. Returns the stored value.
    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) -> u32 {
        let minutes = minutes.max(MIN_DURATION_MIN);
        match mode {
            Mode::Focus => self.focus_min = minutes,
            Mode::Break => self.break_min = minutes,
        }
        minutes
    }

    /// Parse raw form input and store it. Returns the stored value.
    pub fn update_from_input(&mut self, mode: Mode, raw: &str) -> u32 {
        self.set_minutes(mode, parse_minutes(raw))
    }
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MIN, DEFAULT_BREAK_MIN)
    }
}

/// Lenient integer parse for duration fields.
///
/// Takes the leading integer of the trimmed input (`"12abc"` is 12, `"3.7"` is 3).
/// Anything unparseable or not positive becomes 1; oversized values saturate.
pub fn parse_minutes(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() || negative {
        return MIN_DURATION_MIN;
    }

    let value = digits
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')));
    value.max(MIN_DURATION_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_25_and_5() {
        let s = DurationSettings::default();
        assert_eq!(s.minutes(Mode::Focus), 25);
        assert_eq!(s.minutes(Mode::Break), 5);
        assert_eq!(s.seconds(Mode::Break), 300);
    }

    #[test]
    fn parse_minutes_clamps_invalid_input() {
        assert_eq!(parse_minutes("-3"), 1);
        assert_eq!(parse_minutes("0"), 1);
        assert_eq!(parse_minutes(""), 1);
        assert_eq!(parse_minutes("abc"), 1);
        assert_eq!(parse_minutes("-"), 1);
    }

    #[test]
    fn parse_minutes_takes_leading_integer() {
        assert_eq!(parse_minutes("30"), 30);
        assert_eq!(parse_minutes("  45 "), 45);
        assert_eq!(parse_minutes("12abc"), 12);
        assert_eq!(parse_minutes("3.7"), 3);
        assert_eq!(parse_minutes("+8"), 8);
    }

    #[test]
    fn parse_minutes_saturates() {
        assert_eq!(parse_minutes("99999999999999"), u32::MAX);
    }

    #[test]
    fn update_from_input_stores_clamped_value() {
        let mut s = DurationSettings::default();
        assert_eq!(s.update_from_input(Mode::Focus, "-3"), 1);
        assert_eq!(s.minutes(Mode::Focus), 1);
        assert_eq!(s.minutes(Mode::Break), 5);
    }

    #[test]
    fn mode_parses_and_alternates() {
        assert_eq!("Focus".parse::<Mode>().unwrap(), Mode::Focus);
        assert_eq!("break".parse::<Mode>().unwrap(), Mode::Break);
        assert!("nap".parse::<Mode>().is_err());
        assert_eq!(Mode::Focus.other(), Mode::Break);
        assert_eq!(Mode::Break.other(), Mode::Focus);
    }

    #[test]
    fn new_clamps_zero() {
        let s = DurationSettings::new(0, 0);
        assert_eq!(s.minutes(Mode::Focus), 1);
        assert_eq!(s.minutes(Mode::Break), 1);
    }
}
