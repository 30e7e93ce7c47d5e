//! Data-Driven Duel Configuration
//!
//! Skills, fighters and cast-time tuning are defined in
//! `assets/config/duel.ron`. The same values are compiled in as
//! `GameConfig::default()` so tests and the headless runner work without
//! the asset directory.
//!
//! ## Usage
//! ```ignore
//! let config = load_game_config()?;
//! let game = FightingGame::new(config)?;
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::constants::*;
use super::skill::{AnimationType, SkillType, TargetType};

/// Default location of the duel configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/duel.ron";

/// Global cast-time tuning used when a skill has no explicit cast time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastTiming {
    /// Cast time as a fraction of cooldown
    pub cast_time_multiplier: f32,
    /// Lower bound for derived cast times (ms)
    pub min_cast_time: f32,
    /// Upper bound for derived cast times (ms)
    pub max_cast_time: f32,
}

impl Default for CastTiming {
    fn default() -> Self {
        Self {
            cast_time_multiplier: CAST_TIME_MULTIPLIER,
            min_cast_time: MIN_CAST_TIME_MS,
            max_cast_time: MAX_CAST_TIME_MS,
        }
    }
}

impl CastTiming {
    /// `clamp(cooldown * multiplier, min, max)`
    pub fn derive_cast_time(&self, cooldown: f32) -> f32 {
        (cooldown * self.cast_time_multiplier).clamp(self.min_cast_time, self.max_cast_time)
    }
}

/// Starting state of one fighter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterConfig {
    pub name: String,
    pub max_health: u32,
    /// Spawn position (x, y) on the playfield
    pub position: (f32, f32),
}

/// Definition of one skill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub name: String,
    #[serde(default)]
    pub damage: u32,
    /// Cooldown in milliseconds
    pub cooldown: f32,
    /// Key identifier, matched case-insensitively ("a", "q", ...)
    pub key_binding: String,
    pub animation_type: AnimationType,
    pub skill_type: SkillType,
    pub target_type: TargetType,
    #[serde(default)]
    pub description: String,
    /// Explicit cast time in milliseconds (None = derived from cooldown)
    #[serde(default)]
    pub cast_time: Option<f32>,
}

fn default_heal_amount() -> u32 {
    HEAL_AMOUNT
}

/// Root structure of the duel.ron file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub cast_timing: CastTiming,
    /// Health restored by defensive heal skills
    #[serde(default = "default_heal_amount")]
    pub heal_amount: u32,
    pub player: FighterConfig,
    pub opponent: FighterConfig,
    /// Ordered skill list; a skill's index is its `SkillId`
    pub skills: Vec<SkillConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cast_timing: CastTiming::default(),
            heal_amount: HEAL_AMOUNT,
            player: FighterConfig {
                name: "Player".to_string(),
                max_health: DEFAULT_MAX_HEALTH,
                position: PLAYER_POSITION,
            },
            opponent: FighterConfig {
                name: "Opponent".to_string(),
                max_health: DEFAULT_MAX_HEALTH,
                position: OPPONENT_POSITION,
            },
            skills: default_skills(),
        }
    }
}

fn default_skills() -> Vec<SkillConfig> {
    vec![
        SkillConfig {
            name: "Fireball".to_string(),
            damage: 15,
            cooldown: 2000.0,
            key_binding: "a".to_string(),
            animation_type: AnimationType::Fireball,
            skill_type: SkillType::Offensive,
            target_type: TargetType::Single,
            description: "Launches a fiery projectile at the enemy".to_string(),
            cast_time: None,
        },
        SkillConfig {
            name: "Lightning".to_string(),
            damage: 20,
            cooldown: 3500.0,
            key_binding: "s".to_string(),
            animation_type: AnimationType::Lightning,
            skill_type: SkillType::Offensive,
            target_type: TargetType::Single,
            description: "Strikes the enemy with lightning from your staff".to_string(),
            cast_time: None,
        },
        SkillConfig {
            name: "Ice Spike".to_string(),
            damage: 12,
            cooldown: 1500.0,
            key_binding: "d".to_string(),
            animation_type: AnimationType::IceSpike,
            skill_type: SkillType::Offensive,
            target_type: TargetType::Single,
            description: "Conjures a sharp ice spike to pierce the enemy".to_string(),
            cast_time: None,
        },
        SkillConfig {
            name: "Meteor".to_string(),
            damage: 35,
            cooldown: 8000.0,
            key_binding: "f".to_string(),
            animation_type: AnimationType::Meteor,
            skill_type: SkillType::Offensive,
            target_type: TargetType::Aoe,
            description: "Summons a devastating meteor from the sky".to_string(),
            cast_time: None,
        },
        SkillConfig {
            name: "Shield".to_string(),
            damage: 0,
            cooldown: 4000.0,
            key_binding: "q".to_string(),
            animation_type: AnimationType::Shield,
            skill_type: SkillType::Defensive,
            target_type: TargetType::Single,
            description: "Creates a magical barrier to protect yourself".to_string(),
            cast_time: None,
        },
        SkillConfig {
            name: "Heal".to_string(),
            damage: 0,
            cooldown: 6000.0,
            key_binding: "w".to_string(),
            animation_type: AnimationType::Heal,
            skill_type: SkillType::Defensive,
            target_type: TargetType::Single,
            description: "Restores your health with healing magic".to_string(),
            cast_time: None,
        },
    ]
}

impl GameConfig {
    /// Load and validate a configuration from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let config: GameConfig = ron::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Check every value the duel core relies on.
    pub fn validate(&self) -> Result<(), String> {
        let timing = &self.cast_timing;
        if !timing.cast_time_multiplier.is_finite() || timing.cast_time_multiplier < 0.0 {
            return Err("cast_time_multiplier must be a non-negative number".to_string());
        }
        if !timing.min_cast_time.is_finite() || timing.min_cast_time <= 0.0 {
            return Err("min_cast_time must be positive".to_string());
        }
        if !timing.max_cast_time.is_finite() || timing.min_cast_time > timing.max_cast_time {
            return Err(format!(
                "min_cast_time ({}) must not exceed max_cast_time ({})",
                timing.min_cast_time, timing.max_cast_time
            ));
        }

        for fighter in [&self.player, &self.opponent] {
            if fighter.max_health == 0 {
                return Err(format!("{} must have positive max_health", fighter.name));
            }
        }

        if self.skills.is_empty() {
            return Err("at least one skill must be defined".to_string());
        }

        for skill in &self.skills {
            if skill.name.trim().is_empty() {
                return Err("every skill needs a name".to_string());
            }
            if !skill.cooldown.is_finite() || skill.cooldown < 0.0 {
                return Err(format!(
                    "{}: cooldown must be non-negative, got {}",
                    skill.name, skill.cooldown
                ));
            }
            if let Some(cast_time) = skill.cast_time {
                if !cast_time.is_finite() || cast_time <= 0.0 {
                    return Err(format!(
                        "{}: cast_time must be positive, got {}",
                        skill.name, cast_time
                    ));
                }
            }
        }

        SkillKeymap::build(&self.skills)?;
        Ok(())
    }
}

/// Lookup from key identifier to skill index, built once from configuration.
#[derive(Clone, Debug, Default)]
pub struct SkillKeymap {
    keys: HashMap<String, usize>,
}

impl SkillKeymap {
    /// Fails on an empty binding or on two skills sharing a key.
    pub fn build(skills: &[SkillConfig]) -> Result<Self, String> {
        let mut keys = HashMap::with_capacity(skills.len());
        for (index, skill) in skills.iter().enumerate() {
            let key = skill.key_binding.trim().to_lowercase();
            if key.is_empty() {
                return Err(format!("{} has no key binding", skill.name));
            }
            if let Some(previous) = keys.insert(key.clone(), index) {
                return Err(format!(
                    "key '{}' is bound to both {} and {}",
                    key, skills[previous].name, skill.name
                ));
            }
        }
        Ok(Self { keys })
    }

    /// Skill index for a key identifier (case-insensitive).
    pub fn get(&self, key: &str) -> Option<usize> {
        self.keys.get(&key.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Load the configuration from `assets/config/duel.ron`.
pub fn load_game_config() -> Result<GameConfig, String> {
    let config = GameConfig::load_from_file(Path::new(DEFAULT_CONFIG_PATH))?;
    info!(
        "Loaded {} skill definitions from {}",
        config.skills.len(),
        DEFAULT_CONFIG_PATH
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_derive_cast_time_clamps() {
        let timing = CastTiming::default();
        assert_eq!(timing.derive_cast_time(500.0), 200.0);
        assert_eq!(timing.derive_cast_time(8000.0), 800.0);
        assert_eq!(timing.derive_cast_time(60_000.0), 2000.0);
    }

    #[test]
    fn test_duplicate_key_binding_rejected() {
        let mut config = GameConfig::default();
        config.skills[1].key_binding = "A".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Fireball") && err.contains("Lightning"), "{}", err);
    }

    #[test]
    fn test_empty_key_binding_rejected() {
        let mut config = GameConfig::default();
        config.skills[2].key_binding = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_health_rejected() {
        let mut config = GameConfig::default();
        config.opponent.max_health = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let mut config = GameConfig::default();
        config.skills[0].cooldown = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_explicit_cast_time_rejected() {
        let mut config = GameConfig::default();
        config.skills[0].cast_time = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_cast_bounds_rejected() {
        let mut config = GameConfig::default();
        config.cast_timing.min_cast_time = 3000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_skills_rejected() {
        let mut config = GameConfig::default();
        config.skills.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keymap_lookup_is_case_insensitive() {
        let keymap = SkillKeymap::build(&GameConfig::default().skills).unwrap();
        assert_eq!(keymap.get("a"), Some(0));
        assert_eq!(keymap.get("W"), Some(5));
        assert_eq!(keymap.get("x"), None);
        assert_eq!(keymap.len(), 6);
    }
}
