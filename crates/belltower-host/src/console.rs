//! Router and alerts for a headless host: both report through the log.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use belltower_bridge::{
    host::{Alerts, NavigationError, Router},
    record::DocumentTarget,
};

/// Router that only remembers and logs where it was sent.
#[derive(Debug, Default)]
pub struct LogRouter {
    location: Mutex<Option<String>>,
}

impl LogRouter {
    /// Path of the last route or location change.
    pub fn location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_location(&self, path: String) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = Some(path);
    }
}

impl Router for LogRouter {
    fn route(&self, target: &DocumentTarget) -> Result<(), NavigationError> {
        log::info!(
            "Opening {} {}",
            target.document_type,
            target.document_name
        );
        self.set_location(target.url_path());
        Ok(())
    }

    fn assign_location(&self, path: &str) {
        log::info!("Changing location to {path}");
        self.set_location(path.to_string());
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl Alerts for LogAlerts {
    fn show_transient(&self, message: &str, duration: Duration) {
        log::info!("{message} (shown for {}s)", duration.as_secs());
    }
}
