//! UI events delivered through the page's shared document/window surface.
//!
//! Handlers of every widget instance share one surface, so each event
//! carries enough of its target to let a handler tell whether it happened
//! inside its own container.

use std::sync::Arc;

use crate::{ContainerSelector, HandlerId, record::DocumentTarget};

/// Global object an event handler is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    Document,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(ClickTarget),
    KeyDown(KeyPress),
    /// The viewport was resized to `width` pixels.
    Resize { width: u32 },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

/// Where a click landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    /// Container the clicked element lives in, `None` when outside every widget.
    pub container: Option<ContainerSelector>,
    pub element: Element,
}

impl ClickTarget {
    pub fn bell(container: impl Into<ContainerSelector>) -> Self {
        Self {
            container: Some(container.into()),
            element: Element::Bell,
        }
    }

    pub fn item(container: impl Into<ContainerSelector>, data: ItemData) -> Self {
        Self {
            container: Some(container.into()),
            element: Element::Item(data),
        }
    }

    pub fn placeholder(container: impl Into<ContainerSelector>) -> Self {
        Self {
            container: Some(container.into()),
            element: Element::Placeholder,
        }
    }

    pub fn outside() -> Self {
        Self {
            container: None,
            element: Element::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// The toggle button of the dropdown.
    Bell,
    /// A rendered notification entry.
    Item(ItemData),
    /// The "no notifications" entry.
    Placeholder,
    Other,
}

/// Data attributes attached to a rendered notification entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemData {
    pub name: Option<String>,
    pub document_type: Option<String>,
    pub document_name: Option<String>,
}

impl ItemData {
    pub fn new(
        name: impl Into<String>,
        document_type: impl Into<String>,
        document_name: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            document_type: Some(document_type.into()),
            document_name: Some(document_name.into()),
        }
    }

    /// Record identifier and target document, or `None` if any part is missing.
    pub fn target(&self) -> Option<(String, DocumentTarget)> {
        let name = self.name.as_deref().filter(|name| !name.is_empty())?;
        let target =
            DocumentTarget::from_parts(self.document_type.as_deref(), self.document_name.as_deref())?;
        Some((name.to_string(), target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Container holding the focused element, if any.
    pub container: Option<ContainerSelector>,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, container: None }
    }

    pub fn within(key: Key, container: impl Into<ContainerSelector>) -> Self {
        Self {
            key,
            container: Some(container.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Space,
    Tab,
    Escape,
    Other,
}

pub type UiHandler = Arc<dyn Fn(&UiEvent) + Send + Sync>;

/// The page's shared event dispatch and focus surface.
pub trait EventSurface: Send + Sync {
    /// Attaches `handler` to `kind` events of `source`.
    fn bind(&self, source: EventSource, kind: EventKind, handler: UiHandler) -> HandlerId;

    /// Detaches a handler previously returned by [`EventSurface::bind`].
    fn unbind(&self, source: EventSource, kind: EventKind, id: HandlerId) -> bool;

    /// Moves keyboard focus to the `index`-th notification entry of `container`.
    fn focus_entry(&self, container: &ContainerSelector, index: usize);

    /// Whether keyboard focus currently sits inside the dropdown of `container`.
    fn focus_within(&self, container: &ContainerSelector) -> bool;
}
