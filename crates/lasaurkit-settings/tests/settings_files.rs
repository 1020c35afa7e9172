use lasaurkit_settings::{LaserSettings, SettingsError};
use std::fs;

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser.json");

    let settings = LaserSettings {
        num_digits: 3,
        raster_offset: 25.0,
        ..Default::default()
    };
    settings.save_to_file(&path).unwrap();

    let loaded = LaserSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser.toml");

    let settings = LaserSettings {
        kerf: 0.25,
        raster_linechars: 80,
        ..Default::default()
    };
    settings.save_to_file(&path).unwrap();

    let loaded = LaserSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser.toml");
    fs::write(&path, "max_seek_speed = 6000\n").unwrap();

    let loaded = LaserSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded.max_seek_speed, 6000);
    assert_eq!(loaded.raster_feedrate, LaserSettings::default().raster_feedrate);
}

#[test]
fn test_load_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser.json");
    fs::write(&path, r#"{"kerf": 0}"#).unwrap();

    let err = LaserSettings::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser.yaml");
    fs::write(&path, "kerf: 0.1").unwrap();

    let err = LaserSettings::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LaserSettings::load_from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}
