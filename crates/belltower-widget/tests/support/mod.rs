#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use belltower_bridge::{
    config::WidgetConfig,
    event::{ClickTarget, EventSource, ItemData, Key, KeyPress, UiEvent},
    gateway::{GatewayError, NotificationGateway},
    host::{Alerts, NavigationError, Router},
    realtime::RealtimeMessage,
    record::{DocumentTarget, MarkReadResponse, NotificationRecord},
};
use belltower_host::{events::EventHub, push::PushHub};
use belltower_widget::HostServices;
use chrono::NaiveDate;
use futures_util::{FutureExt, future::BoxFuture};

pub const CHANNEL: &str = "new_notification";

pub fn record(id: &str) -> NotificationRecord {
    NotificationRecord {
        id: id.to_string(),
        subject: Some(format!("Subject {id}")),
        document_type: Some("Sales Invoice".to_string()),
        document_name: Some(format!("SINV-{id}")),
        creation: NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    }
}

pub fn item(id: &str) -> ItemData {
    ItemData::new(id, "Sales Invoice", format!("SINV-{id}"))
}

/// Which answer the fake host gives to mark-as-read.
#[derive(Debug, Clone)]
pub enum MarkOutcome {
    Success,
    Refused,
    Unreachable,
}

pub struct FakeGateway {
    pub records: Mutex<Vec<NotificationRecord>>,
    pub fetch_delay: Mutex<Duration>,
    pub mark_delay: Duration,
    pub mark_outcome: Mutex<MarkOutcome>,
    pub failing_fetches: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub marked: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new(records: Vec<NotificationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fetch_delay: Mutex::new(Duration::ZERO),
            mark_delay: Duration::from_millis(500),
            mark_outcome: Mutex::new(MarkOutcome::Success),
            failing_fetches: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            marked: Mutex::new(Vec::new()),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }

    pub fn set_records(&self, records: Vec<NotificationRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_next_fetches(&self, count: usize) {
        self.failing_fetches.store(count, Ordering::SeqCst);
    }
}

impl NotificationGateway for FakeGateway {
    fn fetch_unread<'a>(
        &'a self,
        _principal: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<NotificationRecord>, GatewayError>> {
        async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.fetch_delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let failing = self
                .failing_fetches
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if failing {
                return Err(GatewayError::Request("host offline".to_string()));
            }

            let records: Vec<NotificationRecord> =
                self.records.lock().unwrap().iter().take(limit).cloned().collect();
            Ok(records)
        }
        .boxed()
    }

    fn mark_as_read<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<MarkReadResponse, GatewayError>> {
        async move {
            self.marked.lock().unwrap().push(id.to_string());
            tokio::time::sleep(self.mark_delay).await;

            let outcome = self.mark_outcome.lock().unwrap().clone();
            match outcome {
                MarkOutcome::Success => Ok(MarkReadResponse::success()),
                MarkOutcome::Refused => Ok(MarkReadResponse {
                    status: "error".to_string(),
                    message: Some("not permitted".to_string()),
                }),
                MarkOutcome::Unreachable => Err(GatewayError::Status(502)),
            }
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct FakeRouter {
    pub fail: bool,
    pub routes: Mutex<Vec<DocumentTarget>>,
    pub locations: Mutex<Vec<String>>,
}

impl FakeRouter {
    pub fn routes(&self) -> Vec<DocumentTarget> {
        self.routes.lock().unwrap().clone()
    }

    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().unwrap().clone()
    }
}

impl Router for FakeRouter {
    fn route(&self, target: &DocumentTarget) -> Result<(), NavigationError> {
        if self.fail {
            return Err(NavigationError::UnknownRoute(target.document_type.clone()));
        }
        self.routes.lock().unwrap().push(target.clone());
        Ok(())
    }

    fn assign_location(&self, path: &str) {
        self.locations.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct FakeAlerts {
    pub shown: Mutex<Vec<(String, Duration)>>,
}

impl FakeAlerts {
    pub fn shown(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }
}

impl Alerts for FakeAlerts {
    fn show_transient(&self, message: &str, duration: Duration) {
        self.shown
            .lock()
            .unwrap()
            .push((message.to_string(), duration));
    }
}

/// A page with fake host collaborators and real hubs.
pub struct Page {
    pub gateway: Arc<FakeGateway>,
    pub router: Arc<FakeRouter>,
    pub alerts: Arc<FakeAlerts>,
    pub events: Arc<EventHub>,
    pub push: Arc<PushHub>,
    pub services: HostServices,
}

impl Page {
    pub fn new(records: Vec<NotificationRecord>) -> Self {
        Self::with(FakeGateway::new(records), FakeRouter::default())
    }

    pub fn with(gateway: FakeGateway, router: FakeRouter) -> Self {
        let gateway = Arc::new(gateway);
        let router = Arc::new(router);
        let alerts = Arc::new(FakeAlerts::default());
        let events = Arc::new(EventHub::new());
        let push = Arc::new(PushHub::new());

        let services = HostServices {
            principal: "jane@example.com".to_string(),
            realtime_event: CHANNEL.to_string(),
            config: WidgetConfig::default(),
            gateway: gateway.clone(),
            realtime: push.clone(),
            events: events.clone(),
            router: router.clone(),
            alerts: alerts.clone(),
        };

        Self {
            gateway,
            router,
            alerts,
            events,
            push,
            services,
        }
    }

    pub fn click(&self, target: ClickTarget) {
        self.events
            .dispatch(EventSource::Document, &UiEvent::Click(target));
    }

    pub fn key(&self, key: Key) {
        self.events
            .dispatch(EventSource::Document, &UiEvent::KeyDown(KeyPress::new(key)));
    }

    pub fn resize(&self, width: u32) {
        self.events
            .dispatch(EventSource::Window, &UiEvent::Resize { width });
    }

    pub fn push(&self, raw: &str) {
        self.push.publish(CHANNEL, &RealtimeMessage::from_json(raw));
    }
}

/// Lets spawned tasks and timers run for `millis` of paused virtual time.
pub async fn settle(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
