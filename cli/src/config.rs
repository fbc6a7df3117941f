use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;

/// Samples kept in the power history.
pub const HISTORY_CAPACITY: usize = 60;
/// Total power above which an alert is raised every tick.
pub const DEFAULT_ALERT_WATTS: f32 = 200.0;
pub const DEFAULT_REFRESH_MS: u64 = 1000;
pub const MIN_REFRESH_MS: u64 = 250;
pub const MAX_REFRESH_MS: u64 = 10_000;

/// Window over which CPU utilization is measured when estimating CPU power.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(200);

pub const GPU_RETRY_ATTEMPTS: u32 = 3;
pub const GPU_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Watts per full battery used as the discharge proxy (`percent / 100 * 50`).
pub const BATTERY_PROXY_WATTS: f32 = 50.0;

pub const ALERT_TITLE: &str = "High power draw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(LogLevel::Off),
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Effective runtime settings: compiled-in defaults plus command-line
/// overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub refresh_ms: u64,
    pub alert_watts: f32,
    pub notifications: bool,
    pub history_capacity: usize,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH_MS,
            alert_watts: DEFAULT_ALERT_WATTS,
            notifications: true,
            history_capacity: HISTORY_CAPACITY,
            log_level: LogLevel::Warn,
        }
    }
}

impl Settings {
    pub fn merge_with_args(
        &mut self,
        refresh_ms: Option<u64>,
        alert_watts: Option<f32>,
        no_notify: bool,
        log_level: Option<LogLevel>,
    ) {
        if let Some(ms) = refresh_ms {
            self.refresh_ms = ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
        }
        if let Some(watts) = alert_watts.filter(|w| w.is_finite() && *w > 0.0) {
            self.alert_watts = watts;
        }
        if no_notify {
            self.notifications = false;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("pwrwatch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.refresh_ms, 1000);
        assert_eq!(settings.alert_watts, 200.0);
        assert_eq!(settings.history_capacity, 60);
        assert!(settings.notifications);
        assert_eq!(settings.tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_refresh_is_clamped() {
        let mut settings = Settings::default();
        settings.merge_with_args(Some(10), None, false, None);
        assert_eq!(settings.refresh_ms, MIN_REFRESH_MS);

        settings.merge_with_args(Some(60_000), None, false, None);
        assert_eq!(settings.refresh_ms, MAX_REFRESH_MS);
    }

    #[test]
    fn test_merge_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_args(None, Some(150.0), true, Some(LogLevel::Debug));
        assert_eq!(settings.alert_watts, 150.0);
        assert!(!settings.notifications);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.refresh_ms, DEFAULT_REFRESH_MS);
    }

    #[test]
    fn test_invalid_alert_ignored() {
        let mut settings = Settings::default();
        settings.merge_with_args(None, Some(-5.0), false, None);
        assert_eq!(settings.alert_watts, DEFAULT_ALERT_WATTS);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str("loud"), None);
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
    }

    #[test]
    fn test_settings_toml() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("refresh_ms = 1000"));
        assert!(toml.contains("log_level = \"warn\""));
    }
}
