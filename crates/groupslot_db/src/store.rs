//! `MemoryStore`: one map per collection.

use chrono::{DateTime, Utc};
use groupslot_common::models::{
    CalendarSnapshot, Group, Notification, NotificationStatus, UserProfile,
};
use groupslot_common::services::{
    BoxFuture, CalendarSnapshotStore, GroupDirectory, NotificationStore,
};
use groupslot_common::GroupslotError;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserProfile>>,
    groups: RwLock<HashMap<String, Group>>,
    snapshots: RwLock<HashMap<String, CalendarSnapshot>>,
    notifications: RwLock<HashMap<String, Notification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications in the given status.
    pub async fn count_notifications(&self, status: NotificationStatus) -> usize {
        self.notifications
            .read()
            .await
            .values()
            .filter(|n| n.status == status)
            .count()
    }
}

impl GroupDirectory for MemoryStore {
    fn get_group(&self, group_id: &str) -> BoxFuture<'_, Option<Group>> {
        let group_id = group_id.to_string();
        Box::pin(async move { Ok(self.groups.read().await.get(&group_id).cloned()) })
    }

    fn put_group(&self, group: Group) -> BoxFuture<'_, Group> {
        Box::pin(async move {
            let mut group = group;
            if group.id.is_empty() {
                group.id = Uuid::new_v4().to_string();
            }
            self.groups
                .write()
                .await
                .insert(group.id.clone(), group.clone());
            Ok(group)
        })
    }

    fn delete_group(&self, group_id: &str) -> BoxFuture<'_, bool> {
        let group_id = group_id.to_string();
        Box::pin(async move { Ok(self.groups.write().await.remove(&group_id).is_some()) })
    }

    fn groups_for_member(&self, member: &str) -> BoxFuture<'_, Vec<Group>> {
        let member = member.to_string();
        Box::pin(async move {
            let mut groups: Vec<Group> = self
                .groups
                .read()
                .await
                .values()
                .filter(|g| g.has_member(&member))
                .cloned()
                .collect();
            groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(groups)
        })
    }

    fn get_user(&self, email: &str) -> BoxFuture<'_, Option<UserProfile>> {
        let email = email.to_string();
        Box::pin(async move { Ok(self.users.read().await.get(&email).cloned()) })
    }

    fn put_user(&self, user: UserProfile) -> BoxFuture<'_, UserProfile> {
        Box::pin(async move {
            self.users
                .write()
                .await
                .insert(user.email.clone(), user.clone());
            Ok(user)
        })
    }

    fn member_timezone(&self, member: &str) -> BoxFuture<'_, Option<String>> {
        let member = member.to_string();
        Box::pin(async move {
            Ok(self
                .users
                .read()
                .await
                .get(&member)
                .and_then(|u| u.timezone.clone()))
        })
    }
}

impl CalendarSnapshotStore for MemoryStore {
    fn get_snapshot(&self, member: &str) -> BoxFuture<'_, Option<CalendarSnapshot>> {
        let member = member.to_string();
        Box::pin(async move { Ok(self.snapshots.read().await.get(&member).cloned()) })
    }

    fn put_snapshot(&self, snapshot: CalendarSnapshot) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            debug!(
                member = %snapshot.member_id,
                events = snapshot.events.len(),
                "Replacing calendar snapshot"
            );
            self.snapshots
                .write()
                .await
                .insert(snapshot.member_id.clone(), snapshot);
            Ok(())
        })
    }
}

impl NotificationStore for MemoryStore {
    fn insert(&self, notification: Notification) -> BoxFuture<'_, String> {
        Box::pin(async move {
            let mut notification = notification;
            if notification.id.is_empty() {
                notification.id = Uuid::new_v4().to_string();
            }
            let mut notifications = self.notifications.write().await;
            if notifications.contains_key(&notification.id) {
                return Err(GroupslotError::from(DbError::DuplicateId {
                    collection: "notifications",
                    id: notification.id,
                }));
            }
            let id = notification.id.clone();
            notifications.insert(id.clone(), notification);
            Ok(id)
        })
    }

    fn get(&self, id: &str) -> BoxFuture<'_, Option<Notification>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.notifications.read().await.get(&id).cloned()) })
    }

    fn find_due(&self, until: DateTime<Utc>) -> BoxFuture<'_, Vec<Notification>> {
        Box::pin(async move {
            let mut due: Vec<Notification> = self
                .notifications
                .read()
                .await
                .values()
                .filter(|n| n.status == NotificationStatus::Pending && n.notification_time <= until)
                .cloned()
                .collect();
            due.sort_by(|a, b| {
                a.notification_time
                    .cmp(&b.notification_time)
                    .then(a.id.cmp(&b.id))
            });
            Ok(due)
        })
    }

    fn mark_sent(&self, id: &str) -> BoxFuture<'_, bool> {
        let id = id.to_string();
        Box::pin(async move {
            let mut notifications = self.notifications.write().await;
            let Some(record) = notifications.get_mut(&id) else {
                return Err(GroupslotError::from(DbError::Missing {
                    collection: "notifications",
                    id,
                }));
            };
            if record.status == NotificationStatus::Sent {
                return Ok(false);
            }
            record.status = NotificationStatus::Sent;
            Ok(true)
        })
    }
}
