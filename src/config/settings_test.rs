use crate::config::settings::Settings;

#[test]
fn test_default_settings_load() {
    let settings = Settings::new().expect("default settings should load");

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert!(settings.sweeper.enabled);
    assert_eq!(settings.sweeper.interval_secs, 60);
    assert_eq!(settings.notification.timeout_secs, 10);
    assert_eq!(settings.database.max_connections, Some(20));
    assert_eq!(settings.database.max_lifetime, Some(1800));
    assert!(settings.metrics.enabled);
    assert_eq!(settings.metrics.listen_addr, "0.0.0.0:9464");
}
