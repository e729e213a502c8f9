//! Shared vocabulary between the notification widget and its host platform.
//!
//! This crate defines the data the host hands to the widget and the seams the
//! widget calls back through:
//! - Notification records, document targets and mark-as-read responses.
//! - Real-time push messages and the channel they arrive on.
//! - UI events dispatched from the page's shared document/window surface.
//! - The gateway, router and alert traits every host must provide.
//!
//! Every registration against a shared dispatcher returns a [`HandlerId`],
//! which is the only key accepted for removing it again.

pub mod config;
pub mod event;
pub mod gateway;
pub mod host;
pub mod realtime;
pub mod record;

use std::borrow::Borrow;
use std::fmt;

/// Identifies the page region one notification widget is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerSelector(String);

impl ContainerSelector {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerSelector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl Borrow<str> for ContainerSelector {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerSelector {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

impl From<String> for ContainerSelector {
    fn from(selector: String) -> Self {
        Self(selector)
    }
}

/// Opaque key returned by a dispatcher when a handler is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}
