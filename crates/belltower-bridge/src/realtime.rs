use std::sync::Arc;

use serde::Deserialize;

use crate::HandlerId;

/// A message delivered by the host's push channel.
///
/// The variant only decides whether an alert is shown; every message,
/// including ones that fail to decode, triggers a list refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeMessage {
    /// A notification record was just created for the user.
    NewNotice {
        #[serde(default)]
        notification_log: Option<String>,
        #[serde(default)]
        for_user: Option<String>,
        #[serde(default)]
        subject: Option<String>,
        #[serde(default)]
        document_type: Option<String>,
        #[serde(default)]
        document_name: Option<String>,
        #[serde(default)]
        timestamp: Option<String>,
    },
    /// A notification record was marked as read, possibly from another tab.
    NotificationRead {
        #[serde(default)]
        log_name: Option<String>,
        #[serde(default)]
        user: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Other,
}

impl RealtimeMessage {
    /// Decodes a raw push payload. Undecodable payloads become [`Self::Other`].
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|error| {
            log::warn!("Could not decode realtime message ({error}), treating it as untyped");
            Self::Other
        })
    }

    /// Text of the transient alert, only for new notices.
    pub fn alert_text(&self) -> Option<String> {
        match self {
            Self::NewNotice { subject, .. } => Some(match subject.as_deref().map(str::trim) {
                Some(subject) if !subject.is_empty() => format!("New notification: {subject}"),
                _ => "You have a new notification".to_string(),
            }),
            _ => None,
        }
    }
}

/// Callback invoked for every message published on a subscribed channel.
pub type RealtimeHandler = Arc<dyn Fn(&RealtimeMessage) + Send + Sync>;

/// Server-initiated push delivery provided by the host.
pub trait RealtimeChannel: Send + Sync {
    /// Registers `handler` for `channel` and returns the key to remove it with.
    fn subscribe(&self, channel: &str, handler: RealtimeHandler) -> HandlerId;

    /// Removes a registration. Returns `false` when nothing matched.
    fn unsubscribe(&self, channel: &str, id: HandlerId) -> bool;
}
