#[cfg(test)]
mod tests {
    use crate::scanner::{spawn_periodic, NotificationScanner};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use groupslot_common::models::{Notification, NotificationMessage, NotificationStatus};
    use groupslot_common::services::{BoxFuture, DeliverySink, NotificationStore};
    use groupslot_common::{store_error, GroupslotError};
    use groupslot_db::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 15, hour, minute, second).unwrap()
    }

    fn reminder(id: &str, notification_time: DateTime<Utc>, members: &[&str]) -> Notification {
        let start_time = notification_time + Duration::minutes(30);
        Notification {
            id: id.to_string(),
            group_id: "g1".to_string(),
            group_name: "Book club".to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            start_time,
            end_time: start_time + Duration::hours(1),
            notification_time,
            status: NotificationStatus::Pending,
            created_by: "alice@example.com".to_string(),
            created_at: at(0, 0, 0),
        }
    }

    /// Records deliveries; fails for the listed recipients.
    #[derive(Default)]
    struct RecordingSink {
        failing: Vec<String>,
        delivered: Mutex<Vec<(String, NotificationMessage)>>,
    }

    impl RecordingSink {
        fn failing_for(recipients: &[&str]) -> Self {
            Self {
                failing: recipients.iter().map(|r| r.to_string()).collect(),
                ..Self::default()
            }
        }

        fn recipients(&self) -> Vec<String> {
            let mut recipients: Vec<String> = self
                .delivered
                .lock()
                .unwrap()
                .iter()
                .map(|(r, _)| r.clone())
                .collect();
            recipients.sort();
            recipients
        }
    }

    impl DeliverySink for RecordingSink {
        fn deliver<'a>(
            &'a self,
            recipient: &'a str,
            message: &'a NotificationMessage,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                if self.failing.iter().any(|r| r == recipient) {
                    return Err(GroupslotError::Delivery {
                        recipient: recipient.to_string(),
                        message: "mailbox full".to_string(),
                    });
                }
                self.delivered
                    .lock()
                    .unwrap()
                    .push((recipient.to_string(), message.clone()));
                Ok(())
            })
        }
    }

    fn scanner(store: Arc<dyn NotificationStore>, sink: Arc<RecordingSink>) -> NotificationScanner {
        NotificationScanner::new(store, sink, Duration::minutes(5))
    }

    #[tokio::test]
    async fn test_due_window_includes_exact_lookahead() {
        let store = Arc::new(MemoryStore::new());
        let now = at(10, 0, 0);
        store.insert(reminder("overdue", at(9, 0, 0), &["a@x.io"])).await.unwrap();
        store.insert(reminder("edge", at(10, 5, 0), &["b@x.io"])).await.unwrap();
        store.insert(reminder("later", at(10, 5, 1), &["c@x.io"])).await.unwrap();

        let sink = Arc::new(RecordingSink::default());
        let sent = scanner(store.clone(), sink.clone())
            .scan_due_notifications(now)
            .await
            .unwrap();

        assert_eq!(sent, 2);
        assert_eq!(sink.recipients(), vec!["a@x.io", "b@x.io"]);
        let later = store.get("later").await.unwrap().unwrap();
        assert_eq!(later.status, NotificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_second_scan_is_a_no_op() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(reminder("r1", at(10, 0, 0), &["a@x.io", "b@x.io"]))
            .await
            .unwrap();
        let sink = Arc::new(RecordingSink::default());
        let scanner = scanner(store.clone(), sink.clone());

        assert_eq!(scanner.scan_due_notifications(at(10, 0, 0)).await.unwrap(), 1);
        assert_eq!(scanner.scan_due_notifications(at(10, 1, 0)).await.unwrap(), 0);
        assert_eq!(sink.delivered.lock().unwrap().len(), 2);
        assert_eq!(store.count_notifications(NotificationStatus::Sent).await, 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_marks_sent() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(reminder("r1", at(10, 0, 0), &["broken@x.io", "ok@x.io"]))
            .await
            .unwrap();
        store.insert(reminder("r2", at(10, 2, 0), &["other@x.io"])).await.unwrap();

        let sink = Arc::new(RecordingSink::failing_for(&["broken@x.io"]));
        let sent = scanner(store.clone(), sink.clone())
            .scan_due_notifications(at(10, 0, 0))
            .await
            .unwrap();

        assert_eq!(sent, 2);
        assert_eq!(sink.recipients(), vec!["ok@x.io", "other@x.io"]);
        assert_eq!(store.count_notifications(NotificationStatus::Pending).await, 0);
    }

    #[tokio::test]
    async fn test_message_carries_lead_and_group_name() {
        let store = Arc::new(MemoryStore::new());
        store.insert(reminder("r1", at(10, 0, 0), &["a@x.io"])).await.unwrap();
        let sink = Arc::new(RecordingSink::default());
        scanner(store, sink.clone())
            .scan_due_notifications(at(10, 0, 0))
            .await
            .unwrap();

        let delivered = sink.delivered.lock().unwrap();
        let (_, message) = &delivered[0];
        assert_eq!(message.title, "Upcoming Meeting");
        assert_eq!(
            message.body,
            "You have a meeting in 30 minutes with your group \"Book club\""
        );
    }

    /// Simulates a concurrent scan that marks every record between this scan's
    /// query and its status update.
    struct RacingStore {
        inner: Arc<MemoryStore>,
    }

    impl NotificationStore for RacingStore {
        fn insert(&self, notification: Notification) -> BoxFuture<'_, String> {
            self.inner.insert(notification)
        }

        fn get(&self, id: &str) -> BoxFuture<'_, Option<Notification>> {
            self.inner.get(id)
        }

        fn find_due(&self, until: DateTime<Utc>) -> BoxFuture<'_, Vec<Notification>> {
            Box::pin(async move {
                let due = self.inner.find_due(until).await?;
                for record in &due {
                    self.inner.mark_sent(&record.id).await?;
                }
                Ok(due)
            })
        }

        fn mark_sent(&self, id: &str) -> BoxFuture<'_, bool> {
            self.inner.mark_sent(id)
        }
    }

    #[tokio::test]
    async fn test_already_sent_record_is_not_counted() {
        let inner = Arc::new(MemoryStore::new());
        inner.insert(reminder("r1", at(10, 0, 0), &["a@x.io"])).await.unwrap();
        let store = Arc::new(RacingStore { inner: inner.clone() });
        let sink = Arc::new(RecordingSink::default());

        let sent = scanner(store, sink.clone())
            .scan_due_notifications(at(10, 0, 0))
            .await
            .unwrap();
        assert_eq!(sent, 0);
        // The duplicate delivery is tolerated
        assert_eq!(sink.recipients(), vec!["a@x.io"]);
        assert_eq!(inner.count_notifications(NotificationStatus::Sent).await, 1);
    }

    struct UnreachableStore;

    impl NotificationStore for UnreachableStore {
        fn insert(&self, _notification: Notification) -> BoxFuture<'_, String> {
            Box::pin(async { Err(store_error("unreachable")) })
        }

        fn get(&self, _id: &str) -> BoxFuture<'_, Option<Notification>> {
            Box::pin(async { Err(store_error("unreachable")) })
        }

        fn find_due(&self, _until: DateTime<Utc>) -> BoxFuture<'_, Vec<Notification>> {
            Box::pin(async { Err(store_error("unreachable")) })
        }

        fn mark_sent(&self, _id: &str) -> BoxFuture<'_, bool> {
            Box::pin(async { Err(store_error("unreachable")) })
        }
    }

    #[tokio::test]
    async fn test_query_failure_fails_the_scan() {
        let sink = Arc::new(RecordingSink::default());
        let err = scanner(Arc::new(UnreachableStore), sink)
            .scan_due_notifications(at(10, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, GroupslotError::Store(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_scanner_runs_and_stops() {
        let store = Arc::new(MemoryStore::new());
        let due = Utc::now() - Duration::minutes(1);
        store.insert(reminder("r1", due, &["a@x.io"])).await.unwrap();
        let sink = Arc::new(RecordingSink::default());

        let handle = spawn_periodic(
            Arc::new(scanner(store.clone(), sink.clone())),
            std::time::Duration::from_secs(300),
        );
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;

        assert_eq!(store.count_notifications(NotificationStatus::Sent).await, 1);
        assert_eq!(sink.recipients(), vec!["a@x.io"]);
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }
}
