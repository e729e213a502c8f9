use futures_util::future::BoxFuture;

use crate::record::{MarkReadResponse, NotificationRecord};

/// Errors that can occur while talking to the host platform.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The configured site URL could not be parsed or extended.
    #[error("invalid site url: {0}")]
    InvalidUrl(String),
    /// The request never produced a response (connection, timeout, TLS...).
    #[error("request failed: {0}")]
    Request(String),
    /// The host answered with a non-success HTTP status.
    #[error("host responded with status {0}")]
    Status(u16),
    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request/response access to the host's notification records.
pub trait NotificationGateway: Send + Sync {
    /// Unread records of `principal`, newest first, at most `limit` of them.
    fn fetch_unread<'a>(
        &'a self,
        principal: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<NotificationRecord>, GatewayError>>;

    /// Marks one record as read.
    fn mark_as_read<'a>(&'a self, id: &'a str)
    -> BoxFuture<'a, Result<MarkReadResponse, GatewayError>>;
}
