// --- File: crates/services/groupslot_backend/src/app_state.rs ---
use axum::{routing::get, Router};
use chrono::Duration;
use groupslot_availability::handlers::AvailabilityState;
use groupslot_common::services::DeliverySink;
use groupslot_common::GroupslotError;
use groupslot_config::AppConfig;
use groupslot_db::MemoryStore;
use groupslot_notify::handlers::MeetingState;
use groupslot_notify::{LoggingDeliverySink, NotificationScanner, WebhookDeliverySink};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Everything the server shares across routes and the background scanner.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<dyn DeliverySink>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, GroupslotError> {
        let sink = delivery_sink(&config)?;
        Ok(Self {
            config,
            store: Arc::new(MemoryStore::new()),
            sink,
        })
    }

    /// The API router with every feature nested under `/api`.
    pub fn router(&self) -> Result<Router, GroupslotError> {
        let availability = AvailabilityState::new(&self.config, self.store.clone())?;
        let meetings = MeetingState::new(&self.config.notifications, self.store.clone())?;

        let api = Router::new()
            .route("/", get(|| async { "Welcome to the groupslot API!" }))
            .merge(groupslot_availability::routes(Arc::new(availability)))
            .merge(groupslot_notify::routes(Arc::new(meetings)));

        Ok(Router::new()
            .nest("/api", api)
            .layer(TraceLayer::new_for_http()))
    }

    /// A scanner whose look-ahead equals the scan period.
    pub fn scanner(&self) -> NotificationScanner {
        let seconds = i64::try_from(self.config.notifications.scan_interval_seconds).unwrap_or(i64::MAX);
        let lookahead = Duration::try_seconds(seconds).unwrap_or(Duration::zero());
        NotificationScanner::new(self.store.clone(), self.sink.clone(), lookahead)
    }

    pub fn scan_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.config.notifications.scan_interval_seconds)
    }
}

fn delivery_sink(config: &AppConfig) -> Result<Arc<dyn DeliverySink>, GroupslotError> {
    let notifications = &config.notifications;
    match notifications.webhook_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            let timeout = std::time::Duration::from_secs(notifications.webhook_timeout_seconds);
            let sink = WebhookDeliverySink::new(url, timeout).map_err(|err| {
                GroupslotError::Config(format!("cannot build webhook client: {}", err))
            })?;
            info!(url, timeout_secs = timeout.as_secs(), "Delivering reminders via webhook");
            Ok(Arc::new(sink))
        }
        _ => {
            info!("No webhook configured, reminders are logged only");
            Ok(Arc::new(LoggingDeliverySink))
        }
    }
}
