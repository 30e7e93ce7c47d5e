//! Skill System - cooldown and cast-time state machine
//!
//! A skill moves through these states:
//!
//! ```text
//!            start_casting()                complete_cast()
//!   Idle ─────────────────────▶ Casting ─────────────────────▶ OnCooldown
//!    ▲                            │                               │
//!    │        cancel_cast()       │        update(delta) → 0      │
//!    └────────────────────────────┘◀──────────────────────────────┘
//! ```
//!
//! `use_skill()` is the single gate that commits a cooldown, whether it is
//! reached through an instant use or at the end of a cast.

use serde::{Deserialize, Serialize};

use super::config::{CastTiming, SkillConfig};

/// Position of a skill in the game's ordered skill list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub usize);

impl SkillId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which visual the presentation layer plays when the skill resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationType {
    Fireball,
    Lightning,
    IceSpike,
    Meteor,
    Shield,
    Heal,
}

impl AnimationType {
    pub fn all() -> [AnimationType; 6] {
        [
            AnimationType::Fireball,
            AnimationType::Lightning,
            AnimationType::IceSpike,
            AnimationType::Meteor,
            AnimationType::Shield,
            AnimationType::Heal,
        ]
    }

    /// Short label used by the HUD button icon
    pub fn icon(&self) -> &'static str {
        match self {
            AnimationType::Fireball => "🔥",
            AnimationType::Lightning => "⚡",
            AnimationType::IceSpike => "❄",
            AnimationType::Meteor => "☄",
            AnimationType::Shield => "🛡",
            AnimationType::Heal => "✚",
        }
    }
}

/// Whether a skill hits the opponent or supports the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Offensive,
    Defensive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Single,
    Aoe,
}

/// A castable skill with its live cooldown and cast timers (milliseconds).
#[derive(Clone, Debug)]
pub struct Skill {
    pub name: String,
    pub damage: u32,
    /// Cooldown committed by `use_skill()`
    pub cooldown: f32,
    /// Time a cast must run before it can resolve
    pub cast_time: f32,
    /// Lowercase key identifier ("a", "s", ...)
    pub key_binding: String,
    pub animation_type: AnimationType,
    pub skill_type: SkillType,
    pub target_type: TargetType,
    pub description: String,
    id: SkillId,
    current_cooldown: f32,
    current_cast_time: f32,
    is_casting: bool,
}

impl Skill {
    /// Build an idle skill from configuration. The cast time comes from the
    /// config when given, otherwise it is derived from the cooldown.
    pub fn from_config(id: SkillId, config: &SkillConfig, timing: &CastTiming) -> Self {
        let cast_time = config
            .cast_time
            .unwrap_or_else(|| timing.derive_cast_time(config.cooldown));

        Self {
            name: config.name.clone(),
            damage: config.damage,
            cooldown: config.cooldown.max(0.0),
            cast_time,
            key_binding: config.key_binding.to_lowercase(),
            animation_type: config.animation_type,
            skill_type: config.skill_type,
            target_type: config.target_type,
            description: config.description.clone(),
            id,
            current_cooldown: 0.0,
            current_cast_time: 0.0,
            is_casting: false,
        }
    }

    pub fn id(&self) -> SkillId {
        self.id
    }

    pub fn current_cooldown(&self) -> f32 {
        self.current_cooldown
    }

    pub fn current_cast_time(&self) -> f32 {
        self.current_cast_time
    }

    pub fn is_casting(&self) -> bool {
        self.is_casting
    }

    // === Casting ===

    /// A new cast may begin whenever the skill is off cooldown.
    pub fn can_start_casting(&self) -> bool {
        self.current_cooldown <= 0.0
    }

    pub fn start_casting(&mut self) -> bool {
        if !self.can_start_casting() {
            return false;
        }
        self.is_casting = true;
        self.current_cast_time = 0.0;
        true
    }

    /// Advance the cast timer. Once the full cast time has elapsed the cast
    /// completes on its own and this returns `true`.
    pub fn update_cast_time(&mut self, delta_time: f32) -> bool {
        if !self.is_casting {
            return false;
        }
        self.current_cast_time = (self.current_cast_time + delta_time.max(0.0)).min(self.cast_time);
        if self.current_cast_time >= self.cast_time {
            self.complete_cast();
            return true;
        }
        false
    }

    /// Set the cast timer from an externally measured elapsed time, clamped to
    /// the cast time. Unlike `update_cast_time` this never completes the cast.
    pub fn set_cast_elapsed(&mut self, elapsed: f32) {
        if !self.is_casting {
            return;
        }
        self.current_cast_time = elapsed.clamp(0.0, self.cast_time);
    }

    pub fn complete_cast(&mut self) {
        self.clear_cast();
        self.use_skill();
    }

    /// Finish the cast regardless of how far it got. The caller is expected to
    /// have checked that the hold lasted long enough.
    pub fn complete_cast_on_release(&mut self) -> bool {
        self.clear_cast();
        self.use_skill()
    }

    /// Abort the cast; no cooldown is committed.
    pub fn cancel_cast(&mut self) {
        self.clear_cast();
    }

    fn clear_cast(&mut self) {
        self.is_casting = false;
        self.current_cast_time = 0.0;
    }

    /// Cast progress in `[0, 1]`, zero while not casting.
    pub fn cast_progress(&self) -> f32 {
        if !self.is_casting {
            return 0.0;
        }
        if self.cast_time <= 0.0 {
            return 1.0;
        }
        (self.current_cast_time / self.cast_time).clamp(0.0, 1.0)
    }

    // === Cooldown ===

    pub fn can_use(&self) -> bool {
        self.current_cooldown <= 0.0 && !self.is_casting
    }

    /// Commit the cooldown. Returns `false` and changes nothing when the skill
    /// is cooling down or mid-cast.
    pub fn use_skill(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.current_cooldown = self.cooldown;
        true
    }

    /// Tick the cooldown toward zero. Returns `true` on the tick the skill
    /// becomes ready again.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if self.current_cooldown <= 0.0 {
            return false;
        }
        self.current_cooldown = (self.current_cooldown - delta_time.max(0.0)).max(0.0);
        self.current_cooldown == 0.0
    }

    pub fn cooldown_percentage(&self) -> f32 {
        if self.cooldown > 0.0 {
            self.current_cooldown / self.cooldown
        } else {
            0.0
        }
    }

    /// Back to idle: no cooldown, no cast in flight.
    pub fn reset(&mut self) {
        self.current_cooldown = 0.0;
        self.clear_cast();
    }
}
