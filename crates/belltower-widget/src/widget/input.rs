//! Reactions to clicks, key presses and resizes on the shared page surface.

use std::sync::Arc;
use std::time::Duration;

use belltower_bridge::{
    event::{ClickTarget, Element, ItemData, Key, KeyPress, UiEvent},
    record::DocumentTarget,
};
use tokio::time::Instant;

use super::NotificationWidget;
use crate::{
    navigation,
    view::{FocusStep, ListEntry, cycle_focus},
};

impl NotificationWidget {
    pub(super) fn handle_ui_event(&self, event: &UiEvent) {
        match event {
            UiEvent::Click(target) => self.handle_click(target),
            UiEvent::KeyDown(press) => self.handle_key(press),
            UiEvent::Resize { width } => {
                if *width < self.inner.services.config.mobile_breakpoint {
                    self.close_dropdown();
                }
            }
        }
    }

    fn handle_click(&self, target: &ClickTarget) {
        if target.container.as_ref() != Some(&self.inner.container) {
            self.close_dropdown();
            return;
        }

        match &target.element {
            Element::Bell => {
                self.toggle();
            }
            Element::Item(data) => self.activate_item(data),
            Element::Placeholder | Element::Other => {}
        }
    }

    /// Opens or closes the dropdown, as a click on the bell does.
    ///
    /// Returns `false` when the toggle was swallowed: the widget is not
    /// active, the previous toggle is still being handled, or the last
    /// accepted click falls inside the debounce window.
    pub fn toggle(&self) -> bool {
        let config = &self.inner.services.config;
        let now = Instant::now();

        let opened = {
            let mut state = self.inner.state();
            if !state.is_active() {
                return false;
            }
            if state.click_in_progress || state.within_debounce(now, config.debounce()) {
                log::trace!("Ignoring bell click on {}", self.inner.container);
                return false;
            }
            state.click_in_progress = true;
            state.last_click = Some(now);

            if state.view.dropdown_open {
                state.view.close();
                false
            } else {
                state.view.close();
                state.view.open();
                true
            }
        };

        self.defer(config.toggle_guard(), |widget| {
            widget.inner.state().click_in_progress = false;
        });
        if opened {
            self.defer(config.focus_delay(), |widget| widget.focus_first_entry());
        }
        true
    }

    /// Closes the dropdown. Returns `false` if it was already closed or the
    /// widget is not active.
    pub fn close_dropdown(&self) -> bool {
        let mut state = self.inner.state();
        state.is_active() && state.view.close()
    }

    fn focus_first_entry(&self) {
        {
            let mut state = self.inner.state();
            if !state.view.dropdown_open
                || !matches!(state.view.entries.first(), Some(ListEntry::Notice(_)))
            {
                return;
            }
            state.view.focused = Some(0);
        }
        self.inner
            .services
            .events
            .focus_entry(&self.inner.container, 0);
    }

    fn activate_item(&self, data: &ItemData) {
        let config = &self.inner.services.config;
        let now = Instant::now();

        let (id, target) = {
            let mut state = self.inner.state();
            if !state.is_active() {
                return;
            }

            let repeated = data.name.as_deref().is_some_and(|id| {
                state.within_debounce(now, config.debounce()) && state.processing.contains(id)
            });
            if repeated {
                log::trace!("Ignoring repeated click on {data:?}");
                return;
            }

            let Some((id, target)) = data.target() else {
                log::debug!("Ignoring notification entry with incomplete data: {data:?}");
                return;
            };

            if !state.processing.insert(id.clone()) {
                log::debug!("Notification {id} is already being processed");
                return;
            }
            state.last_click = Some(now);
            state.view.close();
            (id, target)
        };

        self.spawn_mark_read(id.clone(), target);
        self.defer(config.processing_release(), move |widget| {
            widget.inner.state().processing.remove(&id);
        });
    }

    /// Marks the record as read, then refreshes and navigates whatever the
    /// outcome of the call was. The refresh is not awaited before navigating.
    fn spawn_mark_read(&self, id: String, target: DocumentTarget) {
        let weak = Arc::downgrade(&self.inner);
        let gateway = self.inner.services.gateway.clone();

        tokio::spawn(async move {
            match gateway.mark_as_read(&id).await {
                Ok(response) if response.is_success() => {
                    log::debug!("Marked notification {id} as read");
                }
                Ok(response) => log::warn!(
                    "Host refused to mark notification {id} as read: {}",
                    response.message.as_deref().unwrap_or(&response.status)
                ),
                Err(error) => log::warn!("Failed to mark notification {id} as read: {error}"),
            }

            let Some(widget) = Self::upgrade(&weak) else {
                log::debug!("Widget went away before notification {id} could be opened");
                return;
            };
            widget.spawn_refresh();
            widget.defer(widget.inner.services.config.navigation_delay(), move |widget| {
                navigation::open_document(widget.inner.services.router.as_ref(), &target);
            });
        });
    }

    fn handle_key(&self, press: &KeyPress) {
        if press.key == Key::Escape {
            self.close_dropdown();
            return;
        }
        if press
            .container
            .as_ref()
            .is_some_and(|container| container != &self.inner.container)
        {
            return;
        }

        let mut state = self.inner.state();
        if !state.view.dropdown_open {
            return;
        }

        match press.key {
            Key::ArrowDown | Key::ArrowUp => {
                let step = if press.key == Key::ArrowDown {
                    FocusStep::Next
                } else {
                    FocusStep::Previous
                };
                let focused = cycle_focus(state.view.focused, state.view.notice_count(), step);
                state.view.focused = focused;
                drop(state);

                if let Some(index) = focused {
                    self.inner
                        .services
                        .events
                        .focus_entry(&self.inner.container, index);
                }
            }
            Key::Enter | Key::Space => {
                let Some(data) = state.view.focused_notice().map(|notice| notice.item_data()) else {
                    return;
                };
                drop(state);
                self.activate_item(&data);
            }
            Key::Tab => {
                drop(state);
                self.defer(Duration::ZERO, |widget| {
                    let services = &widget.inner.services;
                    if !services.events.focus_within(&widget.inner.container) {
                        widget.close_dropdown();
                    }
                });
            }
            Key::Escape | Key::Other => {}
        }
    }
}
