// --- File: crates/groupslot_notify/src/scanner.rs ---
//! The due-notification scanner.
//!
//! A scan selects every pending reminder whose trigger time falls before
//! `now + lookahead`, delivers it to each member of the meeting and marks the
//! record sent. Records are dispatched on their own tasks, so a slow or failing
//! recipient never holds up another record.
//!
//! Delivery is best effort. A failed delivery is logged and the record is still
//! marked sent once every recipient has been attempted. A crash between
//! delivery and the status update leaves the record pending, and the next scan
//! delivers it again.

use chrono::{DateTime, Duration, Utc};
use groupslot_common::models::Notification;
use groupslot_common::services::{DeliverySink, NotificationStore};
use groupslot_common::GroupslotError;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::meetings::reminder_message;

const MIN_SCAN_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);

pub struct NotificationScanner {
    store: Arc<dyn NotificationStore>,
    sink: Arc<dyn DeliverySink>,
    lookahead: Duration,
}

impl NotificationScanner {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        sink: Arc<dyn DeliverySink>,
        lookahead: Duration,
    ) -> Self {
        Self {
            store,
            sink,
            lookahead,
        }
    }

    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    /// Runs one scan and returns the number of records moved to sent.
    ///
    /// Records another scan already marked are not counted. Only the initial
    /// query can fail the scan; per-record failures are logged.
    pub async fn scan_due_notifications(&self, now: DateTime<Utc>) -> Result<usize, GroupslotError> {
        let until = now + self.lookahead;
        let due = self.store.find_due(until).await?;
        if due.is_empty() {
            debug!(%until, "No reminders due");
            return Ok(0);
        }
        info!(count = due.len(), %until, "Dispatching due reminders");

        let mut tasks = JoinSet::new();
        for notification in due {
            let store = Arc::clone(&self.store);
            let sink = Arc::clone(&self.sink);
            tasks.spawn(dispatch(store, sink, notification));
        }

        let mut transitioned = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(true)) => transitioned += 1,
                Ok(Ok(false)) => {}
                Ok(Err(err)) => error!("Failed to mark reminder as sent: {}", err),
                Err(err) => error!("Reminder dispatch task failed: {}", err),
            }
        }
        info!(transitioned, "Reminder scan finished");
        Ok(transitioned)
    }
}

async fn dispatch(
    store: Arc<dyn NotificationStore>,
    sink: Arc<dyn DeliverySink>,
    notification: Notification,
) -> Result<bool, GroupslotError> {
    let lead_minutes = (notification.start_time - notification.notification_time).num_minutes();
    let message = reminder_message(&notification.group_name, lead_minutes);

    let mut delivered = 0;
    for member in &notification.members {
        match sink.deliver(member, &message).await {
            Ok(()) => delivered += 1,
            Err(err) => warn!(
                notification_id = %notification.id,
                recipient = %member,
                "Reminder delivery failed: {}",
                err
            ),
        }
    }

    let transitioned = store.mark_sent(&notification.id).await?;
    if transitioned {
        info!(
            notification_id = %notification.id,
            group_id = %notification.group_id,
            delivered,
            recipients = notification.members.len(),
            "Reminder sent"
        );
    } else {
        debug!(notification_id = %notification.id, "Reminder was already marked sent");
    }
    Ok(transitioned)
}

/// A running periodic scanner. Dropping the handle also stops it.
pub struct ScannerHandle {
    handle: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
}

impl ScannerHandle {
    /// Stops the scanner after the scan in progress, if any, completes.
    pub async fn shutdown(self) {
        // The task may already have exited; nothing to signal then.
        let _ = self.shutdown_tx.send(());
        if let Err(err) = self.handle.await {
            warn!("Reminder scanner task ended abnormally: {}", err);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Scans every `period`, starting immediately.
///
/// Missed ticks are skipped rather than replayed. Periods below one second are
/// raised to one second.
pub fn spawn_periodic(scanner: Arc<NotificationScanner>, period: std::time::Duration) -> ScannerHandle {
    let period = period.max(MIN_SCAN_PERIOD);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(period_secs = period.as_secs(), "Reminder scanner started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(err) = scanner.scan_due_notifications(Utc::now()).await {
                        error!("Reminder scan failed: {}", err);
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Reminder scanner shutting down");
                    break;
                }
            }
        }
    });

    ScannerHandle {
        handle,
        shutdown_tx,
    }
}
