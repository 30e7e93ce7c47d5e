//! Spellduel - Wizard Duel Prototype
//!
//! A player wizard duels a stationary opponent with six skills. Each skill
//! is cast by press-and-hold, resolves after its cast time, and then cools
//! down.
//!
//! This library exposes the core duel modules for testing and reuse.

pub mod camera;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod keybindings;
pub mod states;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{DuelEventType, DuelLog};
pub use combat::{FightingGame, GameConfig, GameState, InputSource, SkillInput};
pub use headless::{DuelResult, HeadlessDuelConfig};
