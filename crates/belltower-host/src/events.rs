use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use belltower_bridge::{
    ContainerSelector, HandlerId,
    event::{EventKind, EventSource, EventSurface, UiEvent, UiHandler},
};

struct Registration {
    id: HandlerId,
    source: EventSource,
    kind: EventKind,
    handler: UiHandler,
}

/// Shared document/window event surface of a page.
///
/// Every widget on the page binds its handlers here; an event is delivered to
/// all handlers bound to its source and kind, and each handler decides for
/// itself whether the event concerns it.
#[derive(Default)]
pub struct EventHub {
    next_id: AtomicU64,
    registrations: Mutex<Vec<Registration>>,
    focus: Mutex<Option<(ContainerSelector, usize)>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn registrations(&self) -> MutexGuard<'_, Vec<Registration>> {
        self.registrations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn focus(&self) -> MutexGuard<'_, Option<(ContainerSelector, usize)>> {
        self.focus.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers `event` to every handler bound to `source` for its kind and
    /// returns how many ran. The hub's lock is released before any handler is
    /// called.
    pub fn dispatch(&self, source: EventSource, event: &UiEvent) -> usize {
        let kind = event.kind();
        let handlers: Vec<UiHandler> = self
            .registrations()
            .iter()
            .filter(|registration| registration.source == source && registration.kind == kind)
            .map(|registration| registration.handler.clone())
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn handler_count(&self) -> usize {
        self.registrations().len()
    }

    /// Container and entry index holding keyboard focus, if a widget entry has it.
    pub fn focused(&self) -> Option<(ContainerSelector, usize)> {
        self.focus().clone()
    }

    /// Moves focus away from every widget entry.
    pub fn clear_focus(&self) {
        *self.focus() = None;
    }
}

impl EventSurface for EventHub {
    fn bind(&self, source: EventSource, kind: EventKind, handler: UiHandler) -> HandlerId {
        let id = HandlerId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.registrations().push(Registration {
            id,
            source,
            kind,
            handler,
        });
        id
    }

    fn unbind(&self, source: EventSource, kind: EventKind, id: HandlerId) -> bool {
        let mut registrations = self.registrations();
        let before = registrations.len();
        registrations.retain(|registration| {
            !(registration.id == id && registration.source == source && registration.kind == kind)
        });
        registrations.len() != before
    }

    fn focus_entry(&self, container: &ContainerSelector, index: usize) {
        *self.focus() = Some((container.clone(), index));
    }

    fn focus_within(&self, container: &ContainerSelector) -> bool {
        self.focus()
            .as_ref()
            .is_some_and(|(focused, _)| focused == container)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use belltower_bridge::event::ClickTarget;

    use super::*;

    #[test]
    fn dispatch_matches_source_and_kind() {
        let hub = EventHub::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        hub.bind(
            EventSource::Document,
            EventKind::Click,
            Arc::new(move |_: &UiEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let click = UiEvent::Click(ClickTarget::outside());
        assert_eq!(hub.dispatch(EventSource::Document, &click), 1);
        assert_eq!(hub.dispatch(EventSource::Window, &click), 0);
        assert_eq!(
            hub.dispatch(EventSource::Document, &UiEvent::Resize { width: 100 }),
            0
        );
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unbind_needs_the_same_source_and_kind() {
        let hub = EventHub::new();
        let id = hub.bind(EventSource::Window, EventKind::Resize, Arc::new(|_| {}));

        assert!(!hub.unbind(EventSource::Document, EventKind::Resize, id));
        assert!(hub.unbind(EventSource::Window, EventKind::Resize, id));
        assert_eq!(hub.handler_count(), 0);
    }

    #[test]
    fn tracks_focus() {
        let hub = EventHub::new();
        let container = ContainerSelector::from("#bell");

        hub.focus_entry(&container, 2);
        assert!(hub.focus_within(&container));
        assert_eq!(hub.focused(), Some((container.clone(), 2)));

        hub.clear_focus();
        assert!(!hub.focus_within(&container));
    }
}
