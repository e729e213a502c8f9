use std::sync::Arc;

use belltower_bridge::{
    config::WidgetConfig,
    event::EventSurface,
    gateway::NotificationGateway,
    host::{Alerts, Router},
    realtime::RealtimeChannel,
};

/// Host collaborators and settings shared by every widget.
///
/// Cheap to clone; each mounted widget keeps its own copy.
#[derive(Clone)]
pub struct HostServices {
    /// The user whose notifications are listed.
    pub principal: String,
    /// Push event the widgets subscribe to.
    pub realtime_event: String,
    pub config: WidgetConfig,
    pub gateway: Arc<dyn NotificationGateway>,
    pub realtime: Arc<dyn RealtimeChannel>,
    pub events: Arc<dyn EventSurface>,
    pub router: Arc<dyn Router>,
    pub alerts: Arc<dyn Alerts>,
}
