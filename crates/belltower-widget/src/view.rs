//! Render model of the bell badge and the dropdown list.

use belltower_bridge::{event::ItemData, record::NotificationRecord};
use chrono::NaiveDateTime;

use crate::formatting::relative_time;

/// Text of the entry rendered when there is nothing unread.
pub const PLACEHOLDER_TEXT: &str = "No new notifications";

/// One rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeEntry {
    pub id: String,
    pub subject: String,
    pub document_type: Option<String>,
    pub document_name: Option<String>,
    /// Human-relative age, e.g. `5 minutes ago`.
    pub age: String,
}

impl NoticeEntry {
    fn from_record(record: &NotificationRecord, now: NaiveDateTime) -> Self {
        Self {
            id: record.id.clone(),
            subject: record.subject.clone().unwrap_or_default(),
            document_type: record.document_type.clone(),
            document_name: record.document_name.clone(),
            age: relative_time(record.creation, now),
        }
    }

    /// The data attributes a click on this entry carries.
    pub fn item_data(&self) -> ItemData {
        ItemData {
            name: Some(self.id.clone()),
            document_type: self.document_type.clone(),
            document_name: self.document_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Notice(NoticeEntry),
    Placeholder,
}

/// Direction of a keyboard focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    Next,
    Previous,
}

/// Moves focus one step among `len` entries, wrapping at both ends.
///
/// Without a current focus, `Next` lands on the first entry and `Previous`
/// on the last.
pub fn cycle_focus(current: Option<usize>, len: usize, step: FocusStep) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match (current, step) {
        (None, FocusStep::Next) => 0,
        (None, FocusStep::Previous) => len - 1,
        (Some(index), FocusStep::Next) => (index + 1) % len,
        (Some(index), FocusStep::Previous) => (index + len - 1) % len,
    })
}

/// Everything a host needs to draw one widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Unread count shown on the bell; `None` hides the badge.
    pub badge: Option<usize>,
    pub entries: Vec<ListEntry>,
    pub dropdown_open: bool,
    /// Index of the focused notice entry.
    pub focused: Option<usize>,
}

impl ListView {
    pub fn badge_label(&self) -> Option<String> {
        self.badge.map(|count| count.to_string())
    }

    pub fn notices(&self) -> impl Iterator<Item = &NoticeEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ListEntry::Notice(notice) => Some(notice),
            ListEntry::Placeholder => None,
        })
    }

    pub fn notice_count(&self) -> usize {
        self.notices().count()
    }

    pub fn focused_notice(&self) -> Option<&NoticeEntry> {
        self.notices().nth(self.focused?)
    }

    /// Replaces the badge and every entry with the given records.
    pub(crate) fn render(&mut self, records: &[NotificationRecord], limit: usize, now: NaiveDateTime) {
        let records = &records[..records.len().min(limit)];

        if records.is_empty() {
            self.badge = None;
            self.entries = vec![ListEntry::Placeholder];
        } else {
            self.badge = Some(records.len());
            self.entries = records
                .iter()
                .map(|record| ListEntry::Notice(NoticeEntry::from_record(record, now)))
                .collect();
        }

        if self.focused.is_some_and(|index| index >= self.notice_count()) {
            self.focused = None;
        }
    }

    pub(crate) fn open(&mut self) {
        self.dropdown_open = true;
    }

    /// Returns whether the dropdown was open.
    pub(crate) fn close(&mut self) -> bool {
        let was_open = self.dropdown_open;
        self.dropdown_open = false;
        self.focused = None;
        was_open
    }
}
