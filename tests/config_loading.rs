//! Loading configuration files from disk.

use arcane::{ArcaneConfig, ArcaneError, DungeonFinder, DuplicatePolicy};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "generation": {{ "seed": 99 }}, "matchmaking": {{ "duplicate_policy": "allow" }} }}"#
    )
    .unwrap();

    let config = ArcaneConfig::from_file(file.path()).unwrap();
    assert_eq!(config.generation.seed, 99);
    assert_eq!(config.generation.stat_count, 2);
    assert_eq!(config.matchmaking.duplicate_policy, DuplicatePolicy::Allow);
    assert_eq!(config.matchmaking.group_capacity, 4);
    assert_eq!(config.combat.log_capacity, 6);

    let finder = DungeonFinder::from_config(&config.matchmaking);
    assert_eq!(finder.policy(), DuplicatePolicy::Allow);
}

#[test]
fn test_saved_config_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arcane.json");

    let mut config = ArcaneConfig::default();
    config.combat.swing_variance = (0.9, 1.1);
    config.matchmaking.group_capacity = 6;
    std::fs::write(&path, config.save_to_json().unwrap()).unwrap();

    assert_eq!(ArcaneConfig::from_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_files_are_rejected() {
    let mut bad_capacity = NamedTempFile::new().unwrap();
    write!(bad_capacity, r#"{{ "matchmaking": {{ "group_capacity": 0 }} }}"#).unwrap();
    assert!(matches!(
        ArcaneConfig::from_file(bad_capacity.path()),
        Err(ArcaneError::Configuration(_))
    ));

    let mut bad_log = NamedTempFile::new().unwrap();
    write!(bad_log, r#"{{ "combat": {{ "log_capacity": 0 }} }}"#).unwrap();
    assert!(ArcaneConfig::from_file(bad_log.path()).is_err());

    let missing = tempfile::tempdir().unwrap().path().join("absent.json");
    assert!(matches!(
        ArcaneConfig::from_file(missing),
        Err(ArcaneError::Io(_))
    ));
}
