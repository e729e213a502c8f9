use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and sizing knobs of a single notification widget.
///
/// All durations are stored in milliseconds so the TOML file stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Window after an accepted click during which further clicks are ignored.
    pub debounce_ms: u64,
    /// How long the bell handler stays locked after accepting a toggle.
    pub toggle_guard_ms: u64,
    /// Delay before the first entry receives focus once the dropdown opens.
    pub focus_delay_ms: u64,
    /// How long a clicked notification stays in the in-flight set.
    pub processing_release_ms: u64,
    /// Delay before navigating to a clicked notification's document.
    pub navigation_delay_ms: u64,
    /// Maximum number of unread records requested and rendered.
    pub fetch_limit: usize,
    /// Viewport width in pixels below which a resize closes the dropdown.
    pub mobile_breakpoint: u32,
    /// Lifetime of the alert shown for a new notice, in seconds.
    pub alert_seconds: u64,
}

impl WidgetConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn toggle_guard(&self) -> Duration {
        Duration::from_millis(self.toggle_guard_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn processing_release(&self) -> Duration {
        Duration::from_millis(self.processing_release_ms)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_secs(self.alert_seconds)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            toggle_guard_ms: 100,
            focus_delay_ms: 100,
            processing_release_ms: 1000,
            navigation_delay_ms: 100,
            fetch_limit: 20,
            mobile_breakpoint: 768,
            alert_seconds: 5,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the host platform site, e.g. `https://erp.example.com`.
    pub site_url: String,
    /// The user whose unread notifications are shown.
    pub principal: String,
    /// Dotted path of the whitelisted method that marks a record as read.
    pub mark_read_method: String,
    /// Name of the push event carrying notification updates.
    pub realtime_event: String,
    /// Containers that get a widget mounted on start-up.
    pub containers: Vec<String>,
    /// Behaviour of every mounted widget.
    pub widget: WidgetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:8000".to_string(),
            principal: "Administrator".to_string(),
            mark_read_method: "belltower.api.notification.mark_notification_as_read".to_string(),
            realtime_event: "new_notification".to_string(),
            containers: vec!["#navbar-notifications".to_string()],
            widget: WidgetConfig::default(),
        }
    }
}
