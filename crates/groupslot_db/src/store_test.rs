#[cfg(test)]
mod tests {
    use crate::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use groupslot_common::models::{Group, Notification, NotificationStatus, UserProfile};
    use groupslot_common::services::{GroupDirectory, NotificationStore};
    use groupslot_common::GroupslotError;

    fn notification(id: &str, minutes_from_base: i64, status: NotificationStatus) -> Notification {
        let base = Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap();
        let start = base + Duration::minutes(minutes_from_base + 30);
        Notification {
            id: id.to_string(),
            group_id: "g1".to_string(),
            group_name: "Book club".to_string(),
            members: vec!["a@example.com".to_string()],
            start_time: start,
            end_time: start + Duration::hours(1),
            notification_time: start - Duration::minutes(30),
            status,
            created_by: "a@example.com".to_string(),
            created_at: base,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_rejects_duplicates() {
        let store = MemoryStore::new();
        let id = store
            .insert(notification("", 0, NotificationStatus::Pending))
            .await
            .unwrap();
        assert!(!id.is_empty());

        store
            .insert(notification("fixed", 0, NotificationStatus::Pending))
            .await
            .unwrap();
        let dup = store
            .insert(notification("fixed", 5, NotificationStatus::Pending))
            .await;
        assert!(matches!(dup, Err(GroupslotError::Store(_))));
    }

    #[tokio::test]
    async fn test_find_due_filters_status_and_time() {
        let store = MemoryStore::new();
        store.insert(notification("late", 10, NotificationStatus::Pending)).await.unwrap();
        store.insert(notification("early", 0, NotificationStatus::Pending)).await.unwrap();
        store.insert(notification("done", 0, NotificationStatus::Sent)).await.unwrap();

        let base = Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap();
        let due = store.find_due(base).await.unwrap();
        let ids: Vec<&str> = due.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["early"]);

        let due = store.find_due(base + Duration::minutes(10)).await.unwrap();
        let ids: Vec<&str> = due.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_mark_sent_is_idempotent() {
        let store = MemoryStore::new();
        store.insert(notification("n1", 0, NotificationStatus::Pending)).await.unwrap();

        assert!(store.mark_sent("n1").await.unwrap());
        assert!(!store.mark_sent("n1").await.unwrap());
        assert_eq!(store.count_notifications(NotificationStatus::Sent).await, 1);
        assert!(store.mark_sent("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_groups_for_member_and_timezone() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for (id, members) in [("g1", vec!["a", "b"]), ("g2", vec!["b"]), ("g3", vec!["c"])] {
            store
                .put_group(Group {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    members: members.into_iter().map(String::from).collect(),
                    created_by: "b".to_string(),
                    invite_token: "t".to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }
        let ids: Vec<String> = store
            .groups_for_member("b")
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["g1".to_string(), "g2".to_string()]);

        store
            .put_user(UserProfile {
                email: "a".to_string(),
                name: None,
                image: None,
                timezone: Some("Asia/Tokyo".to_string()),
                created_at: now,
                last_login: now,
            })
            .await
            .unwrap();
        assert_eq!(
            store.member_timezone("a").await.unwrap().as_deref(),
            Some("Asia/Tokyo")
        );
        assert_eq!(store.member_timezone("b").await.unwrap(), None);
        assert!(store.delete_group("g3").await.unwrap());
        assert!(!store.delete_group("g3").await.unwrap());
    }
}
