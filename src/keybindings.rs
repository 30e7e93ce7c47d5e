//! Keybindings for app-level actions
//!
//! Skill keys come from the duel configuration; this module covers the
//! actions that sit outside the duel itself (cancel every cast, restart)
//! and translates Bevy key codes to the identifiers skills are bound to.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::SkillKeymap;

/// Actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Abort every cast in flight
    CancelCasts,
    /// Start a fresh duel
    Reset,
}

impl GameAction {
    pub fn description(&self) -> &'static str {
        match self {
            GameAction::CancelCasts => "Cancel Casts",
            GameAction::Reset => "Restart Duel",
        }
    }

    pub fn all() -> [GameAction; 2] {
        [GameAction::CancelCasts, GameAction::Reset]
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub primary: KeyCode,
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    fn keys(&self) -> impl Iterator<Item = KeyCode> {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

#[derive(Debug, Clone, Resource)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(
            GameAction::CancelCasts,
            KeyBinding::with_secondary(KeyCode::Escape, KeyCode::Backspace),
        );
        bindings.insert(GameAction::Reset, KeyBinding::new(KeyCode::KeyR));
        Self { bindings }
    }

    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| binding.keys().any(|key| keyboard.just_pressed(key)))
    }

    /// Fails when a skill key shadows an app action.
    pub fn check_conflicts(&self, keymap: &SkillKeymap) -> Result<(), String> {
        for (action, binding) in &self.bindings {
            for key in binding.keys() {
                let Some(identifier) = key_identifier(key) else {
                    continue;
                };
                if keymap.get(identifier).is_some() {
                    return Err(format!(
                        "skill key '{}' conflicts with {}",
                        identifier,
                        action.description()
                    ));
                }
            }
        }
        Ok(())
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: GameAction) -> String {
        match self.get(action) {
            Some(binding) => {
                let primary = key_name(binding.primary);
                match binding.secondary {
                    Some(secondary) => format!("{} / {}", primary, key_name(secondary)),
                    None => primary,
                }
            }
            None => "Unbound".to_string(),
        }
    }
}

/// Skill key identifier for a physical key ("a" for `KeyA`, "1" for `Digit1`).
pub fn key_identifier(key: KeyCode) -> Option<&'static str> {
    let id = match key {
        KeyCode::KeyA => "a",
        KeyCode::KeyB => "b",
        KeyCode::KeyC => "c",
        KeyCode::KeyD => "d",
        KeyCode::KeyE => "e",
        KeyCode::KeyF => "f",
        KeyCode::KeyG => "g",
        KeyCode::KeyH => "h",
        KeyCode::KeyI => "i",
        KeyCode::KeyJ => "j",
        KeyCode::KeyK => "k",
        KeyCode::KeyL => "l",
        KeyCode::KeyM => "m",
        KeyCode::KeyN => "n",
        KeyCode::KeyO => "o",
        KeyCode::KeyP => "p",
        KeyCode::KeyQ => "q",
        KeyCode::KeyR => "r",
        KeyCode::KeyS => "s",
        KeyCode::KeyT => "t",
        KeyCode::KeyU => "u",
        KeyCode::KeyV => "v",
        KeyCode::KeyW => "w",
        KeyCode::KeyX => "x",
        KeyCode::KeyY => "y",
        KeyCode::KeyZ => "z",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::Digit0 => "0",
        KeyCode::Space => "space",
        _ => return None,
    };
    Some(id)
}

/// Human-readable name for a key
pub fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::Escape => "ESC".to_string(),
        KeyCode::Backspace => "BACKSPACE".to_string(),
        _ => key_identifier(key).map_or_else(|| "???".to_string(), str::to_uppercase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::GameConfig;

    #[test]
    fn test_key_identifiers() {
        assert_eq!(key_identifier(KeyCode::KeyA), Some("a"));
        assert_eq!(key_identifier(KeyCode::Digit7), Some("7"));
        assert_eq!(key_identifier(KeyCode::Escape), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::KeyR), "R");
        assert_eq!(key_name(KeyCode::Escape), "ESC");
        assert_eq!(key_name(KeyCode::Digit3), "3");
        assert_eq!(key_name(KeyCode::Space), "SPACE");
        assert_eq!(key_name(KeyCode::F1), "???");
    }

    #[test]
    fn test_default_actions() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyR);
        assert!(bindings.action_just_pressed(GameAction::Reset, &keyboard));
        assert!(!bindings.action_just_pressed(GameAction::CancelCasts, &keyboard));
        assert_eq!(bindings.binding_display(GameAction::Reset), "R");
    }

    #[test]
    fn test_default_skills_do_not_conflict() {
        let keymap = SkillKeymap::build(&GameConfig::default().skills).unwrap();
        assert!(Keybindings::default().check_conflicts(&keymap).is_ok());
    }

    #[test]
    fn test_skill_on_reset_key_conflicts() {
        let mut config = GameConfig::default();
        config.skills[0].key_binding = "r".to_string();
        let keymap = SkillKeymap::build(&config.skills).unwrap();
        let err = Keybindings::default().check_conflicts(&keymap).unwrap_err();
        assert!(err.contains("Restart Duel"), "{}", err);
    }

    #[test]
    fn test_secondary_cancel_key() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Backspace);
        assert!(bindings.action_just_pressed(GameAction::CancelCasts, &keyboard));
        assert!(!bindings.action_just_pressed(GameAction::Reset, &keyboard));
        assert_eq!(
            bindings.binding_display(GameAction::CancelCasts),
            "ESC / BACKSPACE"
        );
    }
}
