use serial_test::serial;
use user_api_core::config::PROFILE_ENV;
use user_api_core::{AppConfig, ConfigError, ConfigValue, SeedSettings, ServerSettings, UserApi};

#[test]
fn test_empty_config() {
    let config = AppConfig::empty();
    assert!(matches!(
        config.get::<String>("server.host"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_set_and_get() {
    let mut config = AppConfig::empty();
    config.set("server.host", ConfigValue::String("127.0.0.1".into()));
    assert_eq!(config.get::<String>("server.host").unwrap(), "127.0.0.1");
    assert!(config.contains_key("server.host"));
}

#[test]
fn test_get_or_default() {
    let config = AppConfig::empty();
    assert_eq!(config.get_or("server.port", 8080u16), 8080);
}

#[test]
fn test_type_conversions() {
    let mut config = AppConfig::empty();
    config.set("int_val", ConfigValue::Integer(42));
    config.set("str_int", ConfigValue::String("8081".into()));
    config.set("bool_str", ConfigValue::String("no".into()));
    config.set("null_val", ConfigValue::Null);

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert_eq!(config.get::<u16>("str_int").unwrap(), 8081);
    assert!(!config.get::<bool>("bool_str").unwrap());
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert!(config.get::<Option<String>>("null_val").unwrap().is_none());
}

#[test]
fn test_type_mismatch() {
    let mut config = AppConfig::empty();
    config.set("server.port", ConfigValue::Integer(70_000));
    let err = config.get::<u16>("server.port").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { expected: "u16", .. }));
    assert_eq!(
        err.to_string(),
        "Config type mismatch for 'server.port': expected u16"
    );
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
users:
  seed: false
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(config.get::<String>("server.host").unwrap(), "127.0.0.1");
    assert_eq!(config.get::<i64>("server.port").unwrap(), 8080);
    assert!(!config.get::<bool>("users.seed").unwrap());
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_invalid_yaml_is_load_error() {
    let err = AppConfig::from_yaml_str("server: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_server_settings_defaults() {
    let settings = ServerSettings::from_config(&AppConfig::empty()).unwrap();
    assert_eq!(settings, ServerSettings::default());
    assert_eq!(settings.addr(), "0.0.0.0:3000");
}

#[test]
fn test_server_settings_from_yaml() {
    let config = AppConfig::from_yaml_str("server:\n  host: localhost\n  port: 4000\n", "test").unwrap();
    let settings = ServerSettings::from_config(&config).unwrap();
    assert_eq!(settings.addr(), "localhost:4000");
}

#[test]
fn test_server_settings_bad_port() {
    let config = AppConfig::from_yaml_str("server:\n  port: not-a-port\n", "test").unwrap();
    assert!(ServerSettings::from_config(&config).is_err());
}

#[test]
fn test_seed_settings() {
    assert!(SeedSettings::from_config(&AppConfig::empty()).unwrap().enabled);
    let config = AppConfig::from_yaml_str("users:\n  seed: false\n", "test").unwrap();
    assert!(!SeedSettings::from_config(&config).unwrap().enabled);
}

#[tokio::test]
async fn test_unseeded_api_starts_empty() {
    let config = AppConfig::from_yaml_str("users:\n  seed: false\n", "test").unwrap();
    let api = UserApi::from_config(&config).unwrap();
    assert_eq!(api.registry().count().await, 0);

    let seeded = UserApi::from_config(&AppConfig::empty()).unwrap();
    assert_eq!(seeded.registry().count().await, 6);
}

#[test]
#[serial]
fn test_load_profile_overrides_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "server:\n  host: 0.0.0.0\n  port: 3000\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "server:\n  port: 3100\n",
    )
    .unwrap();

    std::env::remove_var(PROFILE_ENV);
    std::env::remove_var("SERVER_PORT");
    let config = AppConfig::load_from_dir(dir.path(), "staging").unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 3100);
    assert_eq!(config.get::<String>("server.host").unwrap(), "0.0.0.0");
}

#[test]
#[serial]
fn test_env_overrides_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), "server:\n  port: 3000\n").unwrap();

    std::env::remove_var(PROFILE_ENV);
    std::env::set_var("SERVER_PORT", "9090");
    let config = AppConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var("SERVER_PORT");

    assert_eq!(ServerSettings::from_config(&config).unwrap().port, 9090);
}

#[test]
#[serial]
fn test_profile_env_var_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application-ci.yaml"), "users:\n  seed: false\n").unwrap();

    std::env::set_var(PROFILE_ENV, "ci");
    let config = AppConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var(PROFILE_ENV);

    assert_eq!(config.profile(), "ci");
    assert!(!SeedSettings::from_config(&config).unwrap().enabled);
}

#[test]
#[serial]
fn test_dotenv_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "USERS_SEED=false\n").unwrap();

    std::env::remove_var(PROFILE_ENV);
    std::env::remove_var("USERS_SEED");
    let config = AppConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var("USERS_SEED");

    assert!(!config.get::<bool>("users.seed").unwrap());
}

#[test]
#[serial]
fn test_missing_files_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var(PROFILE_ENV);
    let config = AppConfig::load_from_dir(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
}
