//! The notification widget and its lifecycle.
//!
//! A widget moves `Uninitialized -> Active -> Destroyed`. While active it owns
//! every handler it registered on the shared page surface and the push
//! channel, recorded as explicit bindings so `destroy` can revoke exactly
//! those. Callbacks only hold a weak reference and do nothing once the widget
//! has left the `Active` phase.

mod input;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use belltower_bridge::{
    ContainerSelector, HandlerId,
    event::{EventKind, EventSource, UiEvent, UiHandler},
    realtime::{RealtimeHandler, RealtimeMessage},
};
use tokio::time::Instant;

use crate::{HostServices, WidgetError, view::ListView};

/// Lifecycle phase of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
    /// Terminal. Every handler and subscription has been revoked.
    Destroyed,
}

/// A handler this widget registered on the shared page surface.
#[derive(Debug, Clone, Copy)]
struct Binding {
    source: EventSource,
    kind: EventKind,
    id: HandlerId,
}

const BINDINGS: [(EventSource, EventKind); 3] = [
    (EventSource::Document, EventKind::Click),
    (EventSource::Document, EventKind::KeyDown),
    (EventSource::Window, EventKind::Resize),
];

struct WidgetState {
    phase: Phase,
    view: ListView,
    /// Set while a bell toggle is being handled.
    click_in_progress: bool,
    /// Records currently going through mark-as-read and navigation.
    processing: HashSet<String>,
    last_click: Option<Instant>,
    bindings: Vec<Binding>,
    subscription: Option<HandlerId>,
}

impl WidgetState {
    fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            view: ListView::default(),
            click_in_progress: false,
            processing: HashSet::new(),
            last_click: None,
            bindings: Vec::new(),
            subscription: None,
        }
    }

    fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    fn within_debounce(&self, now: Instant, window: Duration) -> bool {
        self.last_click
            .is_some_and(|last| now.saturating_duration_since(last) < window)
    }
}

struct WidgetInner {
    container: ContainerSelector,
    services: HostServices,
    state: Mutex<WidgetState>,
}

impl WidgetInner {
    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a notification widget bound to one container.
///
/// Clones share the same instance.
#[derive(Clone)]
pub struct NotificationWidget {
    inner: Arc<WidgetInner>,
}

impl std::fmt::Debug for NotificationWidget {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificationWidget")
            .field("container", &self.inner.container)
            .field("phase", &self.phase())
            .finish()
    }
}

impl NotificationWidget {
    /// Creates a widget for `container`, wires its handlers and starts the
    /// initial fetch.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn mount(container: impl Into<ContainerSelector>, services: HostServices) -> Self {
        let widget = Self::attach(container.into(), services);
        widget.spawn_refresh();
        widget
    }

    /// Wires the handlers and activates the widget without scheduling
    /// anything on the runtime.
    pub(crate) fn attach(container: ContainerSelector, services: HostServices) -> Self {
        let widget = Self {
            inner: Arc::new(WidgetInner {
                container,
                services,
                state: Mutex::new(WidgetState::new()),
            }),
        };

        let services = &widget.inner.services;
        let bindings: Vec<Binding> = BINDINGS
            .into_iter()
            .map(|(source, kind)| Binding {
                source,
                kind,
                id: services.events.bind(source, kind, widget.ui_handler()),
            })
            .collect();
        let subscription = services
            .realtime
            .subscribe(&services.realtime_event, widget.realtime_handler());

        {
            let mut state = widget.inner.state();
            state.bindings = bindings;
            state.subscription = Some(subscription);
            state.phase = Phase::Active;
        }

        log::debug!("Mounted notification widget on {}", widget.inner.container);
        widget
    }

    /// Returns the handle only if the widget is still alive and active.
    fn upgrade(weak: &Weak<WidgetInner>) -> Option<Self> {
        let widget = Self {
            inner: weak.upgrade()?,
        };
        widget.is_active().then_some(widget)
    }

    fn ui_handler(&self) -> UiHandler {
        let weak = Arc::downgrade(&self.inner);
        Arc::new(move |event: &UiEvent| {
            if let Some(widget) = Self::upgrade(&weak) {
                widget.handle_ui_event(event);
            }
        })
    }

    fn realtime_handler(&self) -> RealtimeHandler {
        let weak = Arc::downgrade(&self.inner);
        Arc::new(move |message: &RealtimeMessage| {
            if let Some(widget) = Self::upgrade(&weak) {
                widget.handle_realtime(message);
            }
        })
    }

    pub fn container(&self) -> &ContainerSelector {
        &self.inner.container
    }

    pub fn phase(&self) -> Phase {
        self.inner.state().phase
    }

    pub fn is_active(&self) -> bool {
        self.inner.state().is_active()
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.inner.state().view.dropdown_open
    }

    /// Snapshot of what the widget currently renders.
    pub fn view(&self) -> ListView {
        self.inner.state().view.clone()
    }

    /// Whether `id` is currently going through mark-as-read and navigation.
    pub fn is_processing(&self, id: &str) -> bool {
        self.inner.state().processing.contains(id)
    }

    /// Whether both handles point at the same widget instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Revokes every binding and the push subscription, then stays
    /// `Destroyed` for good. Returns `false` if it was already destroyed.
    pub fn destroy(&self) -> bool {
        let (bindings, subscription) = {
            let mut state = self.inner.state();
            if state.phase == Phase::Destroyed {
                return false;
            }
            state.phase = Phase::Destroyed;
            state.view.close();
            state.processing.clear();
            state.click_in_progress = false;
            (std::mem::take(&mut state.bindings), state.subscription.take())
        };

        let services = &self.inner.services;
        for binding in bindings {
            if !services.events.unbind(binding.source, binding.kind, binding.id) {
                log::warn!(
                    "Handler {} for {:?} {:?} was already gone",
                    binding.id,
                    binding.source,
                    binding.kind
                );
            }
        }
        if let Some(id) = subscription {
            services.realtime.unsubscribe(&services.realtime_event, id);
        }

        log::debug!("Destroyed notification widget on {}", self.inner.container);
        true
    }

    /// Fetches the unread list and re-renders it.
    ///
    /// On failure the rendered list stays untouched. If the widget gets
    /// destroyed while the fetch is in flight the result is discarded.
    pub async fn refresh(&self) -> Result<(), WidgetError> {
        if !self.is_active() {
            return Err(WidgetError::Destroyed);
        }

        let services = &self.inner.services;
        let limit = services.config.fetch_limit;
        let records = match services.gateway.fetch_unread(&services.principal, limit).await {
            Ok(records) => records,
            Err(error) => {
                log::warn!(
                    "Failed to fetch notifications for {}: {error}",
                    self.inner.container
                );
                return Err(error.into());
            }
        };

        let now = chrono::Local::now().naive_local();
        let mut state = self.inner.state();
        if !state.is_active() {
            log::debug!(
                "Discarding notifications fetched for destroyed widget on {}",
                self.inner.container
            );
            return Err(WidgetError::Destroyed);
        }
        state.view.render(&records, limit, now);
        Ok(())
    }

    pub(crate) fn spawn_refresh(&self) {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            if let Some(widget) = Self::upgrade(&weak) {
                // failures are already logged inside `refresh`
                let _ = widget.refresh().await;
            }
        });
    }

    /// Runs `callback` after `delay` unless the widget is gone or destroyed by then.
    fn defer<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce(&Self) + Send + 'static,
    {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(widget) = Self::upgrade(&weak) {
                callback(&widget);
            }
        });
    }

    fn handle_realtime(&self, message: &RealtimeMessage) {
        log::debug!("Realtime update for {}: {message:?}", self.inner.container);

        if let Some(text) = message.alert_text() {
            let services = &self.inner.services;
            services
                .alerts
                .show_transient(&text, services.config.alert_duration());
        }
        self.spawn_refresh();
    }
}
