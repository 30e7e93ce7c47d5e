//! Integration tests for headless duel execution
//!
//! These tests verify that:
//! - Headless duels run to completion
//! - Duel results are accessible programmatically
//! - Seeded RNG produces deterministic results

use spellduel::headless::{run_headless_duel, HeadlessDuelConfig};

/// Helper to create a basic duel config
fn create_config(seed: Option<u64>) -> HeadlessDuelConfig {
    HeadlessDuelConfig {
        random_seed: seed,
        max_duration_secs: 120.0,
        ..Default::default()
    }
}

#[test]
fn test_seeded_duel_defeats_opponent() {
    let result = run_headless_duel(&create_config(Some(42))).unwrap();

    assert!(result.opponent_defeated);
    assert_eq!(result.opponent_final_health, 0);
    assert_eq!(result.player_final_health, 100);
    assert!(result.skills_used > 0);
    assert!(result.match_time > 0.0 && result.match_time < 120.0);
    assert_eq!(result.random_seed, Some(42));
}

#[test]
fn test_same_seed_same_duel() {
    let first = run_headless_duel(&create_config(Some(7))).unwrap();
    let second = run_headless_duel(&create_config(Some(7))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_timeout_ends_duel() {
    let config = HeadlessDuelConfig {
        random_seed: Some(3),
        max_duration_secs: 1.0,
        ..Default::default()
    };
    let result = run_headless_duel(&config).unwrap();
    assert!(!result.opponent_defeated);
    assert!(result.opponent_final_health > 0);
}

#[test]
fn test_invalid_config_is_reported() {
    let config = HeadlessDuelConfig {
        tick_ms: 0.0,
        ..Default::default()
    };
    assert!(run_headless_duel(&config).is_err());
}

#[test]
fn test_duel_log_written_to_output_path() {
    let path = std::env::temp_dir().join(format!("spellduel_log_{}.json", std::process::id()));
    let config = HeadlessDuelConfig {
        random_seed: Some(11),
        output_path: Some(path.display().to_string()),
        ..create_config(Some(11))
    };
    let result = run_headless_duel(&config).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["metadata"]["opponent_defeated"], result.opponent_defeated);
    assert_eq!(json["metadata"]["random_seed"], 11);
    assert!(json["entries"].as_array().is_some_and(|e| !e.is_empty()));

    let _ = std::fs::remove_file(&path);
}
