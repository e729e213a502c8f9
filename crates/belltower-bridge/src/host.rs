use std::time::Duration;

use crate::record::DocumentTarget;

/// Errors reported by the host's in-app router.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// No view is registered for the document type.
    #[error("no route for document type {0:?}")]
    UnknownRoute(String),
    /// The router is not ready to accept route changes.
    #[error("router is unavailable")]
    Unavailable,
}

/// Page navigation primitives of the host.
pub trait Router: Send + Sync {
    /// In-app route change to the document's form view.
    fn route(&self, target: &DocumentTarget) -> Result<(), NavigationError>;

    /// Hard location change, used when [`Router::route`] fails.
    fn assign_location(&self, path: &str);
}

/// Ephemeral, non-blocking user notifications.
pub trait Alerts: Send + Sync {
    fn show_transient(&self, message: &str, duration: Duration);
}
