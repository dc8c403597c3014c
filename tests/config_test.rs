//! Tests for server configuration loading.

use std::io::Write;
use strictly_sticks::{ServerConfig, WinCondition};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Create temp file");
    file.write_all(content.as_bytes()).expect("Write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.rows(), &vec![1, 2, 3, 4]);
    assert_eq!(*config.win_condition(), WinCondition::LastStickWins);
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 8080
rows = [3, 5, 7]
win_condition = "last_stick_loses"
"#,
    );

    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.rows(), &vec![3, 5, 7]);
    assert_eq!(*config.win_condition(), WinCondition::LastStickLoses);
}

#[test]
fn test_partial_file_uses_defaults() {
    let file = write_config("port = 4000\n");
    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.port(), 4000);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.rows(), &vec![1, 2, 3, 4]);
}

#[test]
fn test_invalid_rows_rejected() {
    for rows in ["rows = []", "rows = [1, 0]", "rows = [40]"] {
        let file = write_config(rows);
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Invalid rows"), "{}: {}", rows, err);
    }
}

#[test]
fn test_malformed_file_rejected() {
    let file = write_config("port = \"not a number\"");
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert!(ServerConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_overrides() {
    let config = ServerConfig::default()
        .with_overrides(Some("localhost".to_string()), Some(9000), Some(vec![2, 2]))
        .unwrap();
    assert_eq!(config.host(), "localhost");
    assert_eq!(*config.port(), 9000);
    assert_eq!(config.rows(), &vec![2, 2]);

    assert!(
        ServerConfig::default()
            .with_overrides(None, None, Some(vec![]))
            .is_err()
    );
}
