//! Instance registry: at most one live widget per container.
//!
//! [`Registry`] can be used on its own. The free functions operate on a
//! process-wide registry that must be [`install`]ed explicitly before use and
//! is emptied, never dropped, by [`destroy_all`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use belltower_bridge::ContainerSelector;
use futures_util::future::join_all;

use crate::{HostServices, NotificationWidget, RegistryError, WidgetError};

/// A widget whose refresh failed during [`Registry::refresh_all`].
#[derive(Debug)]
pub struct RefreshFailure {
    pub container: ContainerSelector,
    pub error: WidgetError,
}

pub struct Registry {
    services: HostServices,
    widgets: Mutex<HashMap<ContainerSelector, NotificationWidget>>,
}

impl Registry {
    pub fn new(services: HostServices) -> Self {
        Self {
            services,
            widgets: Mutex::new(HashMap::new()),
        }
    }

    fn widgets(&self) -> MutexGuard<'_, HashMap<ContainerSelector, NotificationWidget>> {
        self.widgets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Destroys the widget registered for `container`, if any, and mounts a
    /// fresh one in its place.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime. The registry itself is
    /// already updated by then.
    pub fn create_or_replace(&self, container: impl Into<ContainerSelector>) -> NotificationWidget {
        let container = container.into();
        let widget = {
            let mut widgets = self.widgets();

            if let Some(previous) = widgets.remove(&container) {
                log::debug!("Replacing notification widget on {container}");
                previous.destroy();
            }

            let widget = NotificationWidget::attach(container.clone(), self.services.clone());
            widgets.insert(container, widget.clone());
            widget
        };

        widget.spawn_refresh();
        widget
    }

    pub fn get(&self, container: &str) -> Option<NotificationWidget> {
        self.widgets().get(container).cloned()
    }

    pub fn len(&self) -> usize {
        self.widgets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets().is_empty()
    }

    /// Refreshes every registered widget concurrently. One widget failing
    /// does not stop the others; failures are logged and returned.
    pub async fn refresh_all(&self) -> Vec<RefreshFailure> {
        let widgets: Vec<NotificationWidget> = self.widgets().values().cloned().collect();

        let results = join_all(widgets.iter().map(|widget| async move {
            (widget.container().clone(), widget.refresh().await)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|(container, result)| result.err().map(|error| (container, error)))
            .map(|(container, error)| {
                log::warn!("Refreshing notification widget on {container} failed: {error}");
                RefreshFailure { container, error }
            })
            .collect()
    }

    /// Destroys and unregisters every widget. Returns how many there were.
    pub fn destroy_all(&self) -> usize {
        let widgets: Vec<NotificationWidget> =
            self.widgets().drain().map(|(_, widget)| widget).collect();

        for widget in &widgets {
            widget.destroy();
        }
        if !widgets.is_empty() {
            log::debug!("Destroyed {} notification widget(s)", widgets.len());
        }
        widgets.len()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Installs the process-wide registry. Can only succeed once.
pub fn install(services: HostServices) -> Result<&'static Registry, RegistryError> {
    let mut fresh = false;
    let registry = REGISTRY.get_or_init(|| {
        fresh = true;
        Registry::new(services)
    });

    if fresh {
        Ok(registry)
    } else {
        Err(RegistryError::AlreadyInstalled)
    }
}

pub fn installed() -> Option<&'static Registry> {
    REGISTRY.get()
}

/// See [`Registry::create_or_replace`]. Fails instead of panicking when
/// called outside a tokio runtime.
pub fn create_or_replace(
    container: impl Into<ContainerSelector>,
) -> Result<NotificationWidget, RegistryError> {
    let registry = installed().ok_or(RegistryError::NotInstalled)?;
    if tokio::runtime::Handle::try_current().is_err() {
        return Err(RegistryError::NoRuntime);
    }
    Ok(registry.create_or_replace(container))
}

pub fn get(container: &str) -> Option<NotificationWidget> {
    installed()?.get(container)
}

/// See [`Registry::refresh_all`]. Does nothing before [`install`].
pub async fn refresh_all() -> Vec<RefreshFailure> {
    match installed() {
        Some(registry) => registry.refresh_all().await,
        None => Vec::new(),
    }
}

/// See [`Registry::destroy_all`]. Does nothing before [`install`].
pub fn destroy_all() -> usize {
    installed().map_or(0, Registry::destroy_all)
}
