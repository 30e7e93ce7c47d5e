//! Integration tests for the bundled duel configuration

use std::path::Path;

use spellduel::combat::{AnimationType, CastTiming, GameConfig, SkillKeymap};
use spellduel::keybindings::Keybindings;

fn bundled_config() -> GameConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/duel.ron");
    GameConfig::load_from_file(&path).unwrap()
}

#[test]
fn test_bundled_config_matches_defaults() {
    assert_eq!(bundled_config(), GameConfig::default());
}

#[test]
fn test_bundled_config_covers_every_animation() {
    let config = bundled_config();
    for animation in AnimationType::all() {
        assert!(
            config.skills.iter().any(|s| s.animation_type == animation),
            "no skill plays {:?}",
            animation
        );
    }
}

#[test]
fn test_bundled_keys_leave_app_actions_free() {
    let keymap = SkillKeymap::build(&bundled_config().skills).unwrap();
    assert!(Keybindings::default().check_conflicts(&keymap).is_ok());
}

#[test]
fn test_explicit_cast_time_parses() {
    let text = r#"(
        player: (name: "P", max_health: 50, position: (0.0, 0.0)),
        opponent: (name: "O", max_health: 80, position: (0.0, 0.0)),
        skills: [
            (name: "Zap", damage: 5, cooldown: 1000.0, key_binding: "z",
             animation_type: Lightning, skill_type: Offensive, target_type: Single,
             cast_time: Some(750.0)),
        ],
    )"#;
    let config: GameConfig = ron::from_str(text).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.cast_timing, CastTiming::default());
    assert_eq!(config.heal_amount, 25);
    assert_eq!(config.skills[0].cast_time, Some(750.0));
    assert!(config.skills[0].description.is_empty());
}

#[test]
fn test_unreadable_config_reports_path() {
    let err = GameConfig::load_from_file(Path::new("missing/duel.ron")).unwrap_err();
    assert!(err.contains("missing/duel.ron"), "{}", err);
}
