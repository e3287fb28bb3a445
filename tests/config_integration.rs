use std::io::Write;

use remote_cursor::config::Config;
use remote_cursor::cursor::StrategyKind;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
strategy = "lightweight"

[predictor]
interpolation_delay_ms = 60
buffer_size = 8

[smoother]
prediction = false

[replay]
fps = 120

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.strategy, StrategyKind::Lightweight);
    assert_eq!(config.predictor.interpolation_delay_ms, 60);
    assert_eq!(config.predictor.buffer_size, 8);
    assert_eq!(config.predictor.max_speed_px_per_sec, 5000.0);
    assert!(!config.smoother.prediction);
    assert_eq!(config.replay.fps, 120);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Config::load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[replay]\nfps = 0").unwrap();
    assert!(Config::load(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_default_config_round_trips_through_toml() {
    let config = Config::default_config().unwrap();
    let text = toml::to_string(&config).unwrap();
    let parsed = Config::from_toml(&text).unwrap();
    assert_eq!(parsed.predictor, config.predictor);
    assert_eq!(parsed.strategy, config.strategy);
}
