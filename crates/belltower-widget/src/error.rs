use belltower_bridge::gateway::GatewayError;

/// Errors returned by operations on a single widget.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// The widget was destroyed; it no longer reacts to anything.
    #[error("notification widget has been destroyed")]
    Destroyed,
    /// The unread list could not be fetched. The rendered list is left as is.
    #[error("failed to fetch notifications: {0}")]
    Fetch(#[from] GatewayError),
}

/// Errors returned by the process-wide registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("notification registry has not been installed")]
    NotInstalled,
    #[error("notification registry is already installed")]
    AlreadyInstalled,
    #[error("notification widgets can only be mounted inside a tokio runtime")]
    NoRuntime,
}
