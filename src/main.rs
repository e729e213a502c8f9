use std::sync::Arc;

use belltower_bridge::ContainerSelector;
use belltower_host::{
    config::load_config,
    console::{LogAlerts, LogRouter},
    events::EventHub,
    gateway::HttpGateway,
    push::PushHub,
};
use belltower_widget::{HostServices, registry};

/// Mounts the configured widgets and feeds them real-time messages read as
/// JSON lines from stdin until it closes.
async fn host_page() -> anyhow::Result<()> {
    let config = load_config().await?;

    let push = Arc::new(PushHub::new());
    let services = HostServices {
        principal: config.principal.clone(),
        realtime_event: config.realtime_event.clone(),
        config: config.widget.clone(),
        gateway: Arc::new(HttpGateway::new(reqwest::Client::new(), &config)?),
        realtime: push.clone(),
        events: Arc::new(EventHub::new()),
        router: Arc::new(LogRouter::default()),
        alerts: Arc::new(LogAlerts),
    };
    registry::install(services)?;

    for container in &config.containers {
        let widget = registry::create_or_replace(ContainerSelector::new(container.as_str()))?;
        log::info!("Notification widget ready on {}", widget.container());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let published = push.pump_lines(&config.realtime_event, stdin).await?;
    log::info!("Realtime input closed after {published} message(s)");

    for failure in registry::refresh_all().await {
        log::error!("Final refresh of {} failed: {}", failure.container, failure.error);
    }
    for container in &config.containers {
        if let Some(widget) = registry::get(container) {
            let view = widget.view();
            log::info!(
                "{container}: {} unread notification(s)",
                view.badge.unwrap_or_default()
            );
        }
    }

    registry::destroy_all();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(host_page())
}
