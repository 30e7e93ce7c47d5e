//! Duel Constants
//!
//! Centralized location for the tuning numbers used by the duel core.
//! Anything a designer may want to tweak per build lives in
//! `assets/config/duel.ron` instead; these are the built-in fallbacks.

// ============================================================================
// Cast Timing
// ============================================================================

/// Default cast time as a fraction of a skill's cooldown (1/10 of the cooldown).
pub const CAST_TIME_MULTIPLIER: f32 = 0.1;

/// Shortest derived cast time, in milliseconds.
pub const MIN_CAST_TIME_MS: f32 = 200.0;

/// Longest derived cast time, in milliseconds.
pub const MAX_CAST_TIME_MS: f32 = 2000.0;

// ============================================================================
// Skill Effects
// ============================================================================

/// Health restored to the player by a defensive heal skill.
pub const HEAL_AMOUNT: u32 = 25;

// ============================================================================
// Fighters
// ============================================================================

/// Starting (and maximum) health for both fighters.
pub const DEFAULT_MAX_HEALTH: u32 = 100;

/// Player spawn position on the 400x800 playfield.
pub const PLAYER_POSITION: (f32, f32) = (200.0, 600.0);

/// Opponent spawn position on the 400x800 playfield.
pub const OPPONENT_POSITION: (f32, f32) = (200.0, 200.0);

// ============================================================================
// Match Flow
// ============================================================================

/// Seconds the win screen stays up before the duel resets itself.
pub const GAME_OVER_RESET_DELAY_SECS: f32 = 2.0;
