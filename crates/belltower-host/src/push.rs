use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use belltower_bridge::{
    HandlerId,
    realtime::{RealtimeChannel, RealtimeHandler, RealtimeMessage},
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// In-process fan-out of real-time messages to subscribed handlers.
#[derive(Default)]
pub struct PushHub {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<String, Vec<(HandlerId, RealtimeHandler)>>>,
}

impl PushHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, HashMap<String, Vec<(HandlerId, RealtimeHandler)>>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.subscribers().get(channel).map_or(0, Vec::len)
    }

    /// Delivers `message` to every handler of `channel` and returns how many
    /// ran. Handlers are called without holding the hub's lock, so they may
    /// subscribe or unsubscribe themselves.
    pub fn publish(&self, channel: &str, message: &RealtimeMessage) -> usize {
        let handlers: Vec<RealtimeHandler> = self
            .subscribers()
            .get(channel)
            .map(|entries| entries.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();

        for handler in &handlers {
            handler(message);
        }
        handlers.len()
    }

    /// Publishes every non-blank line of `reader` as a JSON message on
    /// `channel` until the reader is exhausted. Returns the number of
    /// messages published.
    pub async fn pump_lines<R>(&self, channel: &str, reader: R) -> std::io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut published = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let message = RealtimeMessage::from_json(line);
            let delivered = self.publish(channel, &message);
            log::debug!("Published {message:?} on {channel} to {delivered} handler(s)");
            published += 1;
        }

        Ok(published)
    }
}

impl RealtimeChannel for PushHub {
    fn subscribe(&self, channel: &str, handler: RealtimeHandler) -> HandlerId {
        let id = HandlerId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.subscribers()
            .entry(channel.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    fn unsubscribe(&self, channel: &str, id: HandlerId) -> bool {
        let mut subscribers = self.subscribers();
        let Some(entries) = subscribers.get_mut(channel) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            subscribers.remove(channel);
        }
        removed
    }
}
