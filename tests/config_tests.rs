//! Configuration loading from YAML strings and files

use std::io::Write;
use suitcut::config::AppConfig;
use suitcut::server::AppContext;

#[test]
fn test_full_document() {
    let yaml = r#"
server:
  host: 0.0.0.0
  port: 8088
events:
  capacity: 64
seed:
  enabled: false
offline:
  enabled: true
  cache_name: suitcut-cache-v3
  assets:
    - /
    - /index.html
"#;

    let config = AppConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.server.bind_address(), "0.0.0.0:8088");
    assert_eq!(config.events.capacity, 64);
    assert!(!config.seed.enabled);
    assert!(config.offline.enabled);
    assert_eq!(config.offline.cache_name, "suitcut-cache-v3");
    assert_eq!(config.offline.assets, vec!["/", "/index.html"]);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  port: 4100\nevents:\n  capacity: 8").unwrap();

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.server.port, 4100);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.events.capacity, 8);
    assert!(config.seed.enabled);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    assert!(AppConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_cli_overrides_file_values() {
    let config = AppConfig::from_yaml_str("server:\n  host: 10.0.0.1\n  port: 4100\n")
        .unwrap()
        .with_listener(None, Some(5000));
    assert_eq!(config.server.bind_address(), "10.0.0.1:5000");
}

#[tokio::test]
async fn test_offline_cache_with_unknown_asset_fails_startup() {
    let config = AppConfig::from_yaml_str(
        "offline:\n  enabled: true\n  assets:\n    - /\n    - /missing.css\n",
    )
    .unwrap();
    assert!(AppContext::from_config(&config).await.is_err());
}
