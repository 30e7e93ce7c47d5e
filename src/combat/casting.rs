//! Casting Manager
//!
//! Tracks every skill that is currently casting, at most one entry per skill,
//! and computes live progress for all of them from wall-clock time. Several
//! skills may cast at once (one per hand or key).
//!
//! The manager only stores `SkillId` keys; the owning `FightingGame` passes
//! the `Skill` in whenever the skill itself must change.
//!
//! Progress is time-driven, completion is input-driven: `update_casting`
//! never resolves a cast on its own. Callers finish casts through
//! `complete_casting_on_release` once they decide the hold is over.

use smallvec::SmallVec;
use std::collections::BTreeMap;

use super::skill::{AnimationType, Skill, SkillId};

/// One in-flight cast.
#[derive(Clone, Debug, PartialEq)]
pub struct CastingSpell {
    pub skill: SkillId,
    /// Visual tag for the casting ring / hand effect
    pub animation_type: AnimationType,
    /// Clock time (ms) at which the cast began
    pub start_time: f64,
    /// Cast time (ms) captured when the cast began
    pub cast_time: f32,
    /// Fraction of the cast time elapsed, in `[0, 1]`
    pub progress: f32,
}

impl CastingSpell {
    fn progress_at(&self, now: f64) -> f32 {
        if self.cast_time <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start_time).max(0.0);
        (elapsed / self.cast_time as f64).min(1.0) as f32
    }
}

#[derive(Debug, Default)]
pub struct CastingManager {
    // Ordered by skill id so iteration (and anything rendered from it) is stable.
    casting_spells: BTreeMap<SkillId, CastingSpell>,
}

impl CastingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin casting `skill` at clock time `now`. Fails when the skill already
    /// has an entry, is cooling down, or refuses to start.
    pub fn start_casting(&mut self, skill: &mut Skill, now: f64) -> bool {
        if self.casting_spells.contains_key(&skill.id())
            || !skill.can_start_casting()
            || skill.is_casting()
        {
            return false;
        }

        if !skill.start_casting() {
            return false;
        }

        self.casting_spells.insert(
            skill.id(),
            CastingSpell {
                skill: skill.id(),
                animation_type: skill.animation_type,
                start_time: now,
                cast_time: skill.cast_time,
                progress: 0.0,
            },
        );
        true
    }

    /// Recompute progress for every active cast and mirror it into the
    /// skill's own cast timer. `skills` is the full list the ids index into.
    ///
    /// Returns the casts this policy resolved on its own. Completion is
    /// driven by input, so the list is always empty.
    pub fn update_casting(
        &mut self,
        skills: &mut [Skill],
        _delta_time: f32,
        now: f64,
    ) -> SmallVec<[SkillId; 4]> {
        for spell in self.casting_spells.values_mut() {
            spell.progress = spell.progress_at(now).max(spell.progress);
            if let Some(skill) = skills.get_mut(spell.skill.index()) {
                skill.set_cast_elapsed(spell.progress * spell.cast_time);
            }
        }
        SmallVec::new()
    }

    /// Cancel the cast of `skill`. Returns `false` if it was not casting here.
    pub fn cancel_casting(&mut self, skill: &mut Skill) -> bool {
        if self.casting_spells.remove(&skill.id()).is_none() {
            return false;
        }
        skill.cancel_cast();
        true
    }

    /// Cancel every active cast. `skills` is the full list the ids index into.
    pub fn cancel_all_casting(&mut self, skills: &mut [Skill]) {
        for id in std::mem::take(&mut self.casting_spells).into_keys() {
            if let Some(skill) = skills.get_mut(id.index()) {
                skill.cancel_cast();
            }
        }
    }

    /// Drop entries for casts that were resolved elsewhere.
    pub fn cleanup_completed(&mut self, completed: &[SkillId]) {
        for id in completed {
            self.casting_spells.remove(id);
        }
    }

    /// Resolve a held cast on release. A full-progress cast completes and
    /// commits the cooldown; anything short of that is treated as a cancel.
    pub fn complete_casting_on_release(&mut self, skill: &mut Skill) -> bool {
        let Some(spell) = self.casting_spells.get(&skill.id()) else {
            return false;
        };

        if spell.progress >= 1.0 {
            let success = skill.complete_cast_on_release();
            if success {
                self.casting_spells.remove(&skill.id());
            }
            success
        } else {
            self.cancel_casting(skill);
            false
        }
    }

    // === Queries ===

    pub fn casting_progress(&self, id: SkillId) -> f32 {
        self.casting_spells
            .get(&id)
            .map_or(0.0, |spell| spell.progress)
    }

    pub fn is_casting(&self, id: SkillId) -> bool {
        self.casting_spells.contains_key(&id)
    }

    pub fn casting_spells(&self) -> impl Iterator<Item = &CastingSpell> {
        self.casting_spells.values()
    }

    pub fn has_active_casts(&self) -> bool {
        !self.casting_spells.is_empty()
    }

    pub fn active_cast_count(&self) -> usize {
        self.casting_spells.len()
    }

    /// Cancel all active casts (game reset).
    pub fn reset(&mut self, skills: &mut [Skill]) {
        self.cancel_all_casting(skills);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::config::GameConfig;

    fn skills() -> Vec<Skill> {
        let config = GameConfig::default();
        config
            .skills
            .iter()
            .enumerate()
            .map(|(i, c)| Skill::from_config(SkillId(i), c, &config.cast_timing))
            .collect()
    }

    /// Shield: cooldown 4000ms, derived cast time 400ms
    const SHIELD: usize = 4;

    #[test]
    fn test_start_casting_records_entry() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        assert!(manager.start_casting(&mut skills[SHIELD], 1000.0));
        assert!(skills[SHIELD].is_casting());
        assert!(manager.is_casting(SkillId(SHIELD)));
        let spell = manager.casting_spells().next().unwrap();
        assert_eq!(spell.start_time, 1000.0);
        assert_eq!(spell.cast_time, 400.0);
        assert_eq!(spell.progress, 0.0);
        assert_eq!(spell.animation_type, AnimationType::Shield);
    }

    #[test]
    fn test_second_start_for_same_skill_fails() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        assert!(manager.start_casting(&mut skills[0], 0.0));
        assert!(!manager.start_casting(&mut skills[0], 10.0));
        assert_eq!(manager.active_cast_count(), 1);
        assert_eq!(manager.casting_spells().next().unwrap().start_time, 0.0);
    }

    #[test]
    fn test_cannot_start_on_cooldown() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        skills[0].use_skill();
        assert!(!manager.start_casting(&mut skills[0], 0.0));
        assert!(!manager.has_active_casts());
    }

    #[test]
    fn test_progress_follows_wall_clock_and_clamps() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[SHIELD], 0.0);

        manager.update_casting(&mut skills, 16.0, 200.0);
        assert_eq!(manager.casting_progress(SkillId(SHIELD)), 0.5);

        manager.update_casting(&mut skills, 16.0, 500.0);
        assert_eq!(manager.casting_progress(SkillId(SHIELD)), 1.0);
    }

    #[test]
    fn test_update_mirrors_progress_into_skill_timer() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[SHIELD], 0.0);

        manager.update_casting(&mut skills, 16.0, 100.0);
        assert_eq!(skills[SHIELD].current_cast_time(), 100.0);
        assert_eq!(skills[SHIELD].cast_progress(), 0.25);

        manager.update_casting(&mut skills, 16.0, 1000.0);
        assert_eq!(skills[SHIELD].current_cast_time(), 400.0);
        assert!(skills[SHIELD].is_casting());
        assert_eq!(skills[SHIELD].current_cooldown(), 0.0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[SHIELD], 100.0);
        let mut last = 0.0;
        for now in [150.0, 180.0, 170.0, 300.0, 900.0, 450.0] {
            manager.update_casting(&mut skills, 16.0, now);
            let progress = manager.casting_progress(SkillId(SHIELD));
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
    }

    #[test]
    fn test_update_never_auto_completes() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[0], 0.0);
        let completed = manager.update_casting(&mut skills, 16.0, 10_000.0);
        assert!(completed.is_empty());
        assert!(manager.is_casting(SkillId(0)));
        assert_eq!(skills[0].current_cooldown(), 0.0);
    }

    #[test]
    fn test_concurrent_casts_of_different_skills() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        assert!(manager.start_casting(&mut skills[0], 0.0));
        assert!(manager.start_casting(&mut skills[3], 50.0));
        manager.update_casting(&mut skills, 16.0, 250.0);
        assert_eq!(manager.active_cast_count(), 2);
        assert_eq!(manager.casting_progress(SkillId(0)), 1.0);
        assert_eq!(manager.casting_progress(SkillId(3)), 0.25);
    }

    #[test]
    fn test_release_after_full_progress_completes() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[SHIELD], 0.0);
        manager.update_casting(&mut skills, 16.0, 400.0);
        assert!(manager.complete_casting_on_release(&mut skills[SHIELD]));
        assert!(!manager.is_casting(SkillId(SHIELD)));
        assert!(!skills[SHIELD].is_casting());
        assert_eq!(skills[SHIELD].current_cooldown(), 4000.0);
    }

    #[test]
    fn test_early_release_cancels() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[SHIELD], 0.0);
        manager.update_casting(&mut skills, 16.0, 399.0);
        assert!(!manager.complete_casting_on_release(&mut skills[SHIELD]));
        assert!(!manager.is_casting(SkillId(SHIELD)));
        assert!(!skills[SHIELD].is_casting());
        assert!(skills[SHIELD].can_use());
    }

    #[test]
    fn test_release_without_entry_fails() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        assert!(!manager.complete_casting_on_release(&mut skills[0]));
    }

    #[test]
    fn test_cancel_and_cancel_all() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[0], 0.0);
        manager.start_casting(&mut skills[1], 0.0);
        manager.start_casting(&mut skills[2], 0.0);

        assert!(manager.cancel_casting(&mut skills[1]));
        assert!(!manager.cancel_casting(&mut skills[1]));
        assert!(!skills[1].is_casting());
        assert_eq!(manager.active_cast_count(), 2);

        manager.cancel_all_casting(&mut skills);
        assert!(!manager.has_active_casts());
        assert!(skills.iter().all(|s| !s.is_casting() && s.can_use()));
    }

    #[test]
    fn test_cleanup_completed_removes_entries() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[0], 0.0);
        manager.start_casting(&mut skills[1], 0.0);
        manager.cleanup_completed(&[SkillId(0)]);
        assert!(!manager.is_casting(SkillId(0)));
        assert!(manager.is_casting(SkillId(1)));
    }

    #[test]
    fn test_reset_cancels_everything() {
        let mut skills = skills();
        let mut manager = CastingManager::new();
        manager.start_casting(&mut skills[4], 0.0);
        manager.reset(&mut skills);
        assert_eq!(manager.active_cast_count(), 0);
        assert!(!skills[4].is_casting());
    }
}
