//! Notification bell widget.
//!
//! A widget is bound to one page container and drives itself once mounted:
//! it fetches the unread list, listens for UI events on the shared page
//! surface, reacts to real-time pushes, and marks clicked notifications as
//! read before navigating to their document. The [`registry`] keeps at most
//! one live widget per container.
//!
//! Everything the widget touches outside itself comes in through
//! [`HostServices`]. All deferred work runs on the ambient tokio runtime, so
//! widgets must be mounted from inside one.

pub mod error;
pub mod formatting;
pub mod navigation;
pub mod registry;
mod services;
pub mod view;
mod widget;

pub use crate::error::{RegistryError, WidgetError};
pub use crate::services::HostServices;
pub use crate::widget::{NotificationWidget, Phase};
