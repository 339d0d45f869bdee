#[cfg(test)]
mod tests {
    use crate::{load_config_from, AppConfig};
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("groupslot-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.scheduling.default_duration_minutes, 60);
        assert_eq!(config.scheduling.work_start_hour, 9);
        assert_eq!(config.scheduling.work_end_hour, 17);
        assert_eq!(config.scheduling.horizon_days, 7);
        assert_eq!(config.scheduling.reference_timezone, "UTC");
        assert_eq!(config.notifications.scan_interval_seconds, 300);
        assert_eq!(config.notifications.reminder_lead_minutes, 30);
        assert!(config.notifications.webhook_url.is_none());
        assert_eq!(config.notifications.webhook_timeout_seconds, 10);
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let dir = std::env::temp_dir().join("groupslot-config-does-not-exist");
        let config = load_config_from(&dir).expect("optional files");
        assert_eq!(config.scheduling, AppConfig::default().scheduling);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = scratch_dir("partial");
        fs::write(
            dir.join("default.toml"),
            "[scheduling]\nwork_start_hour = 8\nreference_timezone = \"Europe/Zurich\"\n",
        )
        .unwrap();

        let config = load_config_from(&dir).expect("valid file");
        assert_eq!(config.scheduling.work_start_hour, 8);
        assert_eq!(config.scheduling.work_end_hour, 17);
        assert_eq!(config.scheduling.reference_timezone, "Europe/Zurich");
        assert_eq!(config.server.port, 8080);

        fs::remove_dir_all(dir).ok();
    }
}
