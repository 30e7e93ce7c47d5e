//! Duel core
//!
//! Implements the wizard duel mechanics:
//! - Fighters with clamped health
//! - Skills with cooldown and cast-time state
//! - Concurrent casting tracked against a wall clock
//! - The `FightingGame` coordinator and its input reconciliation
//! - Duel logging
//!
//! Nothing in here touches the renderer. The presentation layer owns a
//! `FightingGame` resource and drives it through its command surface.

pub mod casting;
pub mod clock;
pub mod config;
pub mod constants;
pub mod fighter;
pub mod game;
pub mod input;
pub mod log;
pub mod skill;

pub use casting::{CastingManager, CastingSpell};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_game_config, CastTiming, FighterConfig, GameConfig, SkillConfig, SkillKeymap};
pub use fighter::Fighter;
pub use game::{FightingGame, GameState};
pub use input::{InputSource, SkillInput};
pub use log::{DuelEventType, DuelLog, DuelLogEntry};
pub use skill::{AnimationType, Skill, SkillId, SkillType, TargetType};
