//! Fighting Game - the duel coordinator
//!
//! Owns both fighters, the ordered skill list and the casting manager, and
//! applies resolved skills to the fighters. The presentation layer polls the
//! query surface every frame; input handlers drive the command surface.
//!
//! ## Game state
//!
//! `Fighting` → `GameOver` once the opponent is defeated. `GameOver` is
//! terminal until `reset()`; commands issued while it holds are rejected.
//!
//! ## Rejected commands
//!
//! Every command returns `bool`. An invalid index, a skill on cooldown or a
//! duplicate cast is a `false`, never a panic.

use bevy::prelude::*;
use serde::Serialize;

use super::casting::{CastingManager, CastingSpell};
use super::clock::{Clock, SystemClock};
use super::config::{GameConfig, SkillKeymap};
use super::fighter::Fighter;
use super::log::{DuelEventType, DuelLog};
use super::skill::{AnimationType, Skill, SkillId, SkillType};

/// Coarse lifecycle phase of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GameState {
    #[default]
    Fighting,
    GameOver,
}

#[derive(Resource)]
pub struct FightingGame {
    config: GameConfig,
    player: Fighter,
    opponent: Fighter,
    skills: Vec<Skill>,
    keymap: SkillKeymap,
    casting: CastingManager,
    game_state: GameState,
    last_used_skill: Option<SkillId>,
    log: DuelLog,
    clock: Box<dyn Clock>,
}

impl FightingGame {
    /// Build a duel driven by the real-time clock.
    pub fn new(config: GameConfig) -> Result<Self, String> {
        Self::with_clock(config, SystemClock::new())
    }

    /// Build a duel that samples cast progress from `clock`.
    pub fn with_clock(config: GameConfig, clock: impl Clock + 'static) -> Result<Self, String> {
        config.validate()?;
        let keymap = SkillKeymap::build(&config.skills)?;

        let mut game = Self {
            player: Fighter::from_config(&config.player),
            opponent: Fighter::from_config(&config.opponent),
            skills: Self::build_skills(&config),
            keymap,
            casting: CastingManager::new(),
            game_state: GameState::Fighting,
            last_used_skill: None,
            log: DuelLog::default(),
            clock: Box::new(clock),
            config,
        };
        game.log_duel_start("Duel started");
        Ok(game)
    }

    fn build_skills(config: &GameConfig) -> Vec<Skill> {
        config
            .skills
            .iter()
            .enumerate()
            .map(|(i, skill)| Skill::from_config(SkillId(i), skill, &config.cast_timing))
            .collect()
    }

    fn log_duel_start(&mut self, what: &str) {
        let message = format!(
            "{}: {} vs {} with {} skills",
            what,
            self.player.name,
            self.opponent.name,
            self.skills.len()
        );
        info!("{}", message);
        self.log.log(DuelEventType::MatchEvent, message);
    }

    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Use a skill immediately, with no cast delay.
    pub fn use_skill(&mut self, index: usize) -> bool {
        if self.game_state != GameState::Fighting {
            return false;
        }
        let Some(skill) = self.skills.get_mut(index) else {
            return false;
        };
        if !skill.use_skill() {
            return false;
        }
        self.resolve_skill(SkillId(index));
        true
    }

    pub fn use_skill_by_key(&mut self, key: &str) -> bool {
        match self.keymap.get(key) {
            Some(index) => self.use_skill(index),
            None => false,
        }
    }

    /// Begin casting a skill at the current clock time.
    pub fn start_casting_skill(&mut self, index: usize) -> bool {
        if self.game_state != GameState::Fighting {
            return false;
        }
        let now = self.now();
        let Some(skill) = self.skills.get_mut(index) else {
            return false;
        };
        if !self.casting.start_casting(skill, now) {
            return false;
        }

        debug!("Cast started: {} ({:.0}ms)", skill.name, skill.cast_time);
        let message = format!(
            "{} begins casting {} ({:.0}ms)",
            self.player.name, skill.name, skill.cast_time
        );
        self.log.log(DuelEventType::CastStarted, message);
        true
    }

    pub fn start_casting_skill_by_key(&mut self, key: &str) -> bool {
        match self.keymap.get(key) {
            Some(index) => self.start_casting_skill(index),
            None => false,
        }
    }

    /// Resolve a held cast on release. Progress is re-sampled first so a
    /// release that lands between frames is judged on the current time.
    /// Short holds cancel the cast and return `false`.
    pub fn complete_casting_on_release(&mut self, index: usize) -> bool {
        let id = SkillId(index);
        if !self.casting.is_casting(id) {
            return false;
        }

        let now = self.now();
        self.casting.update_casting(&mut self.skills, 0.0, now);
        let progress = self.casting.casting_progress(id);
        let Some(skill) = self.skills.get_mut(index) else {
            return false;
        };
        if !self.casting.complete_casting_on_release(skill) {
            let message = format!(
                "{} released early ({:.0}%)",
                skill.name,
                progress * 100.0
            );
            self.log.log(DuelEventType::CastCanceled, message);
            return false;
        }

        let message = format!("{} cast completed", skill.name);
        self.log.log(DuelEventType::CastCompleted, message);
        self.resolve_skill(id);
        true
    }

    /// Cancel one skill's cast. Returns `false` if it was not casting.
    pub fn cancel_skill_cast(&mut self, index: usize) -> bool {
        let Some(skill) = self.skills.get_mut(index) else {
            return false;
        };
        if !self.casting.cancel_casting(skill) {
            return false;
        }
        let message = format!("{} cast canceled", skill.name);
        self.log.log(DuelEventType::CastCanceled, message);
        true
    }

    /// Cancel every cast in flight.
    pub fn cancel_current_cast(&mut self) {
        if !self.casting.has_active_casts() {
            return;
        }
        let names: Vec<String> = self
            .casting
            .casting_spells()
            .filter_map(|spell| self.skills.get(spell.skill.index()))
            .map(|skill| skill.name.clone())
            .collect();
        self.casting.cancel_all_casting(&mut self.skills);
        for name in names {
            self.log
                .log(DuelEventType::CastCanceled, format!("{} cast canceled", name));
        }
    }

    /// Advance one frame: cooldowns decay, cast progress is recomputed from
    /// the clock, and any casts reported complete are resolved.
    pub fn update(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        self.log.advance(delta_time);

        for skill in self.skills.iter_mut() {
            if skill.update(delta_time) {
                self.log
                    .log(DuelEventType::SkillReady, format!("{} is ready", skill.name));
            }
        }

        let now = self.now();
        let completed = self.casting.update_casting(&mut self.skills, delta_time, now);
        if completed.is_empty() {
            return;
        }
        self.casting.cleanup_completed(&completed);
        for id in completed {
            let resolved = self
                .skills
                .get_mut(id.index())
                .is_some_and(|skill| skill.complete_cast_on_release());
            if resolved {
                self.resolve_skill(id);
            }
        }
    }

    /// Start a fresh duel from the stored configuration.
    pub fn reset(&mut self) {
        self.casting.reset(&mut self.skills);
        self.player = Fighter::from_config(&self.config.player);
        self.opponent = Fighter::from_config(&self.config.opponent);
        self.skills = Self::build_skills(&self.config);
        self.game_state = GameState::Fighting;
        self.last_used_skill = None;
        self.log.clear();
        self.log_duel_start("Duel reset");
    }

    // ========================================================================
    // Effects
    // ========================================================================

    fn resolve_skill(&mut self, id: SkillId) {
        self.last_used_skill = Some(id);
        if let Some(skill) = self.skills.get(id.index()) {
            let message = format!("{} uses {}", self.player.name, skill.name);
            self.log.log(DuelEventType::SkillUsed, message);
        }
        self.apply_skill_effect(id);
    }

    /// Offensive skills damage the opponent; the defensive heal restores the
    /// player. Other defensive skills have no combat effect.
    fn apply_skill_effect(&mut self, id: SkillId) {
        let Some(skill) = self.skills.get(id.index()) else {
            return;
        };

        match skill.skill_type {
            SkillType::Offensive => {
                self.opponent.take_damage(skill.damage);
                if skill.damage > 0 {
                    let message = format!(
                        "{} hits {} for {} ({}/{})",
                        skill.name,
                        self.opponent.name,
                        skill.damage,
                        self.opponent.current_health(),
                        self.opponent.max_health
                    );
                    self.log.log(DuelEventType::Damage, message);
                }
            }
            SkillType::Defensive if skill.animation_type == AnimationType::Heal => {
                let before = self.player.current_health();
                self.player.heal(self.config.heal_amount);
                let healed = self.player.current_health() - before;
                let message = format!(
                    "{} heals {} for {} ({}/{})",
                    skill.name,
                    self.player.name,
                    healed,
                    self.player.current_health(),
                    self.player.max_health
                );
                self.log.log(DuelEventType::Healing, message);
            }
            SkillType::Defensive => {}
        }

        if !self.opponent.is_alive() && self.game_state == GameState::Fighting {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.game_state = GameState::GameOver;
        self.casting.cancel_all_casting(&mut self.skills);
        let message = format!("{} has been defeated!", self.opponent.name);
        info!("{}", message);
        self.log.log(DuelEventType::Defeat, message);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn player(&self) -> &Fighter {
        &self.player
    }

    pub fn opponent(&self) -> &Fighter {
        &self.opponent
    }

    pub fn player_health(&self) -> u32 {
        self.player.current_health()
    }

    pub fn opponent_health(&self) -> u32 {
        self.opponent.current_health()
    }

    pub fn player_health_percentage(&self) -> f32 {
        self.player.health_percentage()
    }

    pub fn opponent_health_percentage(&self) -> f32 {
        self.opponent.health_percentage()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    pub fn skill_index_for_key(&self, key: &str) -> Option<usize> {
        self.keymap.get(key)
    }

    pub fn keymap(&self) -> &SkillKeymap {
        &self.keymap
    }

    pub fn cooldown_percentage(&self, index: usize) -> f32 {
        self.skills
            .get(index)
            .map_or(0.0, Skill::cooldown_percentage)
    }

    /// Live cast progress in `[0, 1]`; the casting manager is authoritative.
    pub fn cast_progress(&self, index: usize) -> f32 {
        self.casting.casting_progress(SkillId(index))
    }

    pub fn is_casting(&self, index: usize) -> bool {
        self.casting.is_casting(SkillId(index))
    }

    pub fn casting_spells(&self) -> impl Iterator<Item = &CastingSpell> {
        self.casting.casting_spells()
    }

    pub fn has_active_casts(&self) -> bool {
        self.casting.has_active_casts()
    }

    pub fn active_cast_count(&self) -> usize {
        self.casting.active_cast_count()
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Most recently resolved skill, without consuming it.
    pub fn last_used_skill(&self) -> Option<&Skill> {
        self.last_used_skill
            .and_then(|id| self.skills.get(id.index()))
    }

    /// Consume the most recently resolved skill (once per resolution).
    pub fn take_last_used_skill(&mut self) -> Option<SkillId> {
        self.last_used_skill.take()
    }

    pub fn clear_last_used_skill(&mut self) {
        self.last_used_skill = None;
    }

    pub fn log(&self) -> &DuelLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
