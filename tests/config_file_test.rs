use std::env;
use std::fs;
use std::sync::Mutex;
use task_manager_rs::config::{Config, StorageKind};

// Mutex to ensure environment variable tests don't run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: [&str; 9] = [
    "TASK_MANAGER_CONFIG",
    "TASK_MANAGER_HOST",
    "TASK_MANAGER_PORT",
    "TASK_MANAGER_STORAGE_BACKEND",
    "TASK_MANAGER_DATA_FILE",
    "TASK_MANAGER_DATABASE_PATH",
    "TASK_MANAGER_REMOTE_URL",
    "TASK_MANAGER_REMOTE_TIMEOUT_SECS",
    "TASK_MANAGER_SHUTDOWN_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_load_config_from_yaml() {
    let yaml_content = r#"
host: "127.0.0.1"
port: 9000
storage_backend: "sqlite"
database_path: "data/tasks.db"
shutdown_timeout_secs: 45
"#;

    let filename = "test_tm_yaml_1.yaml";
    fs::write(filename, yaml_content).unwrap();

    let config = Config::from_file("test_tm_yaml_1").unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.storage_backend, StorageKind::Sqlite);
    assert_eq!(config.database_path, "data/tasks.db");
    assert_eq!(config.shutdown_timeout_secs, 45);
    // Unset keys keep their defaults
    assert_eq!(config.data_file, "tasks.json");

    fs::remove_file(filename).unwrap();
}

#[test]
fn test_load_config_from_toml() {
    let toml_content = r#"
port = 8100
storage_backend = "remote"
remote_url = "http://localhost:4001"
remote_timeout_secs = 3
"#;

    let filename = "test_tm_toml_2.toml";
    fs::write(filename, toml_content).unwrap();

    let config = Config::from_file("test_tm_toml_2").unwrap();

    assert_eq!(config.port, 8100);
    assert_eq!(config.storage_backend, StorageKind::Remote);
    assert_eq!(config.remote_url.as_deref(), Some("http://localhost:4001"));
    assert_eq!(config.remote_timeout_secs, 3);

    fs::remove_file(filename).unwrap();
}

#[test]
fn test_config_validation_fails_for_remote_without_url() {
    let yaml_content = r#"
storage_backend: "remote"
"#;

    let filename = "test_tm_invalid_3.yaml";
    fs::write(filename, yaml_content).unwrap();

    let result = Config::from_file("test_tm_invalid_3");
    assert!(result.is_err());

    fs::remove_file(filename).unwrap();
}

#[test]
fn test_load_config_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TASK_MANAGER_HOST", "localhost");
    env::set_var("TASK_MANAGER_PORT", "8081");
    env::set_var("TASK_MANAGER_STORAGE_BACKEND", "file");
    env::set_var("TASK_MANAGER_DATA_FILE", "/tmp/tasks.json");
    env::set_var("TASK_MANAGER_SHUTDOWN_TIMEOUT_SECS", "5");

    let config = Config::from_env().unwrap().unwrap();

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 8081);
    assert_eq!(config.storage_backend, StorageKind::File);
    assert_eq!(config.data_file, "/tmp/tasks.json");
    assert_eq!(config.shutdown_timeout_secs, 5);

    clear_env();
}

#[test]
fn test_load_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let config = Config::load().unwrap();

    assert_eq!(config.port, 8055);
    assert_eq!(config.storage_backend, StorageKind::Memory);
    assert!(config.remote_url.is_none());
}

#[test]
fn test_config_env_var_names_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let yaml_content = r#"
port: 7000
storage_backend: "memory"
"#;

    let filename = "test_tm_override_5.yaml";
    fs::write(filename, yaml_content).unwrap();

    env::set_var("TASK_MANAGER_CONFIG", "test_tm_override_5");

    let config = Config::load().unwrap();
    assert_eq!(config.port, 7000);

    clear_env();
    fs::remove_file(filename).unwrap();
}

#[test]
fn test_invalid_values_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TASK_MANAGER_STORAGE_BACKEND", "invalid_backend");
    assert!(Config::from_env().is_err());
    clear_env();

    env::set_var("TASK_MANAGER_PORT", "not-a-port");
    assert!(Config::from_env().is_err());
    clear_env();
}

#[test]
fn test_no_env_vars_yields_none() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    assert!(Config::from_env().unwrap().is_none());
}

#[test]
fn test_load_rejects_invalid_env_instead_of_defaulting() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    // Remote backend without a URL must not silently become the memory backend
    env::set_var("TASK_MANAGER_STORAGE_BACKEND", "remote");
    assert!(Config::load().is_err());
    clear_env();

    env::set_var("TASK_MANAGER_STORAGE_BACKEND", "sqllite");
    assert!(Config::load().is_err());
    clear_env();

    env::set_var("TASK_MANAGER_PORT", "0");
    assert!(Config::load().is_err());
    clear_env();
}
