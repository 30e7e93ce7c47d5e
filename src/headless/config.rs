//! JSON configuration parsing for headless mode
//!
//! A headless duel needs very little: which duel configuration to load, a
//! seed for the bot, and when to give up.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::GameConfig;

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessDuelConfig {
    /// RON duel configuration to load (built-in defaults when absent)
    #[serde(default)]
    pub game_config: Option<String>,
    /// Random seed for deterministic duel reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum duel duration in seconds (default: 300)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulated frame length in milliseconds (default: one 60 Hz frame)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f32,
    /// Custom output path for the duel log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_max_duration() -> f32 {
    300.0
}

fn default_tick_ms() -> f32 {
    1000.0 / 60.0
}

impl Default for HeadlessDuelConfig {
    fn default() -> Self {
        Self {
            game_config: None,
            random_seed: None,
            max_duration_secs: default_max_duration(),
            tick_ms: default_tick_ms(),
            output_path: None,
        }
    }
}

impl HeadlessDuelConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessDuelConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }
        // Virtual time clamps frames above 250ms, which would desync the clock.
        if !self.tick_ms.is_finite() || self.tick_ms <= 0.0 || self.tick_ms > 250.0 {
            return Err(format!(
                "tick_ms must be in (0, 250], got {}",
                self.tick_ms
            ));
        }
        Ok(())
    }

    /// The duel configuration this run uses.
    pub fn load_game_config(&self) -> Result<GameConfig, String> {
        match &self.game_config {
            Some(path) => GameConfig::load_from_file(Path::new(path)),
            None => Ok(GameConfig::default()),
        }
    }
}
