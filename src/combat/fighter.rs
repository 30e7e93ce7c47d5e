//! Fighter - health pool and position for one side of the duel.

use super::config::FighterConfig;

/// One participant in the duel.
///
/// Health is unsigned, so a negative damage or heal amount cannot be expressed.
/// `current_health` stays within `0..=max_health` after any sequence of calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    /// Display name ("Player", "Opponent")
    pub name: String,
    /// Maximum health points (always positive)
    pub max_health: u32,
    /// Horizontal position on the playfield (presentation only)
    pub x: f32,
    /// Vertical position on the playfield (presentation only)
    pub y: f32,
    current_health: u32,
    is_alive: bool,
}

impl Fighter {
    pub fn new(name: impl Into<String>, max_health: u32, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            max_health,
            x,
            y,
            current_health: max_health,
            is_alive: max_health > 0,
        }
    }

    /// Build a fresh fighter at full health from its configuration.
    pub fn from_config(config: &FighterConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.max_health,
            config.position.0,
            config.position.1,
        )
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// Subtract `amount` from current health, flooring at zero.
    /// Returns whether the fighter is still alive.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_health = self.current_health.saturating_sub(amount);
        self.is_alive = self.current_health > 0;
        self.is_alive
    }

    /// Restore up to `amount` health, capped at `max_health`.
    /// A defeated fighter stays defeated.
    pub fn heal(&mut self, amount: u32) {
        if !self.is_alive {
            return;
        }
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Current health as a fraction of max health, in `[0, 1]`.
    pub fn health_percentage(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }
}
