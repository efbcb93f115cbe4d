use task_manager_rs::config::{Config, StorageKind};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.port, 8055);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.storage_backend, StorageKind::Memory);
    assert_eq!(config.bind_address(), "0.0.0.0:8055");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_remote_requires_url() {
    let mut config = Config::new(StorageKind::Remote);
    assert!(config.validate().is_err());

    config.remote_url = Some("http://localhost:4001".to_string());
    assert!(config.validate().is_ok());

    config.remote_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_file_requires_path() {
    let mut config = Config::new(StorageKind::File);
    assert!(config.validate().is_ok());

    config.data_file = " ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_storage_kind_parsing() {
    assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
    assert_eq!("JSON".parse::<StorageKind>().unwrap(), StorageKind::File);
    assert_eq!("sqlite".parse::<StorageKind>().unwrap(), StorageKind::Sqlite);
    assert_eq!("http".parse::<StorageKind>().unwrap(), StorageKind::Remote);
    assert!("redis".parse::<StorageKind>().is_err());
}
