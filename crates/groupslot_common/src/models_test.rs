#[cfg(test)]
mod tests {
    use crate::models::{EventTime, NotificationStatus, StoredEvent};
    use chrono::NaiveDate;

    #[test]
    fn test_event_time_parses_timestamp_and_date() {
        let timed: EventTime = "2025-05-15T10:00:00+02:00".parse().unwrap();
        assert!(matches!(timed, EventTime::DateTime(_)));

        let all_day: EventTime = "2025-05-15".parse().unwrap();
        assert_eq!(
            all_day,
            EventTime::AllDay(NaiveDate::from_ymd_opt(2025, 5, 15).unwrap())
        );

        assert!("next tuesday".parse::<EventTime>().is_err());
    }

    #[test]
    fn test_stored_event_from_json() {
        let json = r#"{
            "id": "evt-1",
            "summary": "Standup",
            "start": "2025-05-15T09:00:00Z",
            "end": "2025-05-15T09:15:00Z"
        }"#;
        let event: StoredEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.start.to_string(), "2025-05-15T09:00:00+00:00");
        assert!(event.shared_with_groups.is_empty());

        let shared = r#"{
            "start": "2025-05-15",
            "end": "2025-05-16",
            "sharedWithGroups": ["g1"]
        }"#;
        let event: StoredEvent = serde_json::from_str(shared).unwrap();
        assert!(event.is_shared_with("g1"));
        assert!(!event.is_shared_with("g2"));

        let bad = r#"{"start": "soon", "end": "2025-05-15"}"#;
        assert!(serde_json::from_str::<StoredEvent>(bad).is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&NotificationStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<NotificationStatus>("\"sent\"").unwrap(),
            NotificationStatus::Sent
        );
    }
}
