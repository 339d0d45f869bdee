// --- File: crates/groupslot_common/src/services.rs ---
//! Collaborator abstractions.
//!
//! The document store and the outbound delivery transport are external to the
//! scheduling core. These traits are the seams the core talks through; the
//! backend wires concrete implementations and tests use in-memory ones.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

use crate::error::GroupslotError;
use crate::models::{CalendarSnapshot, Group, Notification, NotificationMessage, UserProfile};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E = GroupslotError> =
    Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Users and groups.
pub trait GroupDirectory: Send + Sync {
    /// Fetch a group; `None` when it does not exist.
    fn get_group(&self, group_id: &str) -> BoxFuture<'_, Option<Group>>;

    /// Insert or replace a group.
    fn put_group(&self, group: Group) -> BoxFuture<'_, Group>;

    /// Remove a group; `false` when it did not exist.
    fn delete_group(&self, group_id: &str) -> BoxFuture<'_, bool>;

    /// All groups whose member list contains `member`.
    fn groups_for_member(&self, member: &str) -> BoxFuture<'_, Vec<Group>>;

    fn get_user(&self, email: &str) -> BoxFuture<'_, Option<UserProfile>>;

    fn put_user(&self, user: UserProfile) -> BoxFuture<'_, UserProfile>;

    /// The member's IANA zone id, if one is on record.
    fn member_timezone(&self, member: &str) -> BoxFuture<'_, Option<String>>;
}

/// Per-member busy calendar snapshots.
pub trait CalendarSnapshotStore: Send + Sync {
    /// The member's stored snapshot; `None` when the member never synced.
    fn get_snapshot(&self, member: &str) -> BoxFuture<'_, Option<CalendarSnapshot>>;

    fn put_snapshot(&self, snapshot: CalendarSnapshot) -> BoxFuture<'_, ()>;
}

/// Meeting reminders.
pub trait NotificationStore: Send + Sync {
    /// Persist a new record and return its id.
    fn insert(&self, notification: Notification) -> BoxFuture<'_, String>;

    fn get(&self, id: &str) -> BoxFuture<'_, Option<Notification>>;

    /// Pending records with `notification_time <= until`, ordered by
    /// notification time.
    fn find_due(&self, until: DateTime<Utc>) -> BoxFuture<'_, Vec<Notification>>;

    /// Transition a record to sent. Returns `true` if this call performed the
    /// transition and `false` if the record was already sent.
    fn mark_sent(&self, id: &str) -> BoxFuture<'_, bool>;
}

/// Outbound delivery transport (email, push, webhook).
pub trait DeliverySink: Send + Sync {
    fn deliver<'a>(
        &'a self,
        recipient: &'a str,
        message: &'a NotificationMessage,
    ) -> BoxFuture<'a, ()>;
}
