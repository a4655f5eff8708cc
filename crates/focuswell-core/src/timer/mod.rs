mod focus;
mod format;
mod health;

pub use focus::FocusCycle;
pub use format::{format_remaining, progress_ratio};
pub use health::{HealthCycle, HEALTH_PERIOD_SECS, HYDRATION_PER_REMINDER};
