//! Skill input reconciliation
//!
//! Keyboard and mouse both drive casts by press-and-hold, but they finish
//! differently:
//!
//! - **Keyboard**: the cast resolves by itself once the full cast time has
//!   elapsed while the key is still down. Letting go earlier cancels it.
//! - **Mouse**: the cast resolves on release, and only if progress reached
//!   100%. Moving the pointer off the button cancels it.
//!
//! `SkillInput` remembers which source started each cast so the right rule
//! is applied. At most one hold exists per skill.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::game::FightingGame;

/// Device that started a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Hold {
    skill: usize,
    source: InputSource,
}

#[derive(Resource, Debug, Default)]
pub struct SkillInput {
    holds: SmallVec<[Hold; 4]>,
}

impl SkillInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press a skill: starts its cast and records the hold.
    pub fn press(&mut self, game: &mut FightingGame, source: InputSource, index: usize) -> bool {
        self.prune(game);
        if self.is_holding(index) {
            return false;
        }
        if !game.start_casting_skill(index) {
            return false;
        }
        self.holds.push(Hold {
            skill: index,
            source,
        });
        true
    }

    pub fn press_key(&mut self, game: &mut FightingGame, key: &str) -> bool {
        match game.skill_index_for_key(key) {
            Some(index) => self.press(game, InputSource::Keyboard, index),
            None => false,
        }
    }

    /// Release a held skill. Returns `true` only when the cast resolved.
    ///
    /// A release that comes before the full cast time cancels the cast
    /// without committing a cooldown, for either source.
    pub fn release(&mut self, game: &mut FightingGame, source: InputSource, index: usize) -> bool {
        let Some(pos) = self
            .holds
            .iter()
            .position(|hold| hold.skill == index && hold.source == source)
        else {
            return false;
        };
        self.holds.remove(pos);

        if !game.is_casting(index) {
            return false;
        }
        game.complete_casting_on_release(index)
    }

    pub fn release_key(&mut self, game: &mut FightingGame, key: &str) -> bool {
        match game.skill_index_for_key(key) {
            Some(index) => self.release(game, InputSource::Keyboard, index),
            None => false,
        }
    }

    /// The pointer left a skill button mid-hold: cancel that cast.
    pub fn leave(&mut self, game: &mut FightingGame, index: usize) -> bool {
        let Some(pos) = self
            .holds
            .iter()
            .position(|hold| hold.skill == index && hold.source == InputSource::Mouse)
        else {
            return false;
        };
        self.holds.remove(pos);
        game.cancel_skill_cast(index)
    }

    /// Advance the duel by one frame, then resolve keyboard holds that have
    /// reached full progress. Returns the skills resolved this way.
    pub fn tick(&mut self, game: &mut FightingGame, delta_time: f32) -> SmallVec<[usize; 4]> {
        game.update(delta_time);
        self.prune(game);

        let mut resolved = SmallVec::new();
        let ready: SmallVec<[usize; 4]> = self
            .holds
            .iter()
            .filter(|hold| hold.source == InputSource::Keyboard)
            .filter(|hold| game.cast_progress(hold.skill) >= 1.0)
            .map(|hold| hold.skill)
            .collect();

        for index in ready {
            self.holds.retain(|hold| hold.skill != index);
            if game.complete_casting_on_release(index) {
                resolved.push(index);
            }
        }

        // A resolving skill can end the duel and cancel the remaining casts.
        self.prune(game);
        resolved
    }

    /// Drop every hold and cancel every cast.
    pub fn cancel_all(&mut self, game: &mut FightingGame) {
        self.holds.clear();
        game.cancel_current_cast();
    }

    pub fn is_holding(&self, index: usize) -> bool {
        self.holds.iter().any(|hold| hold.skill == index)
    }

    /// Source of the hold on `index`, if any.
    pub fn hold_source(&self, index: usize) -> Option<InputSource> {
        self.holds
            .iter()
            .find(|hold| hold.skill == index)
            .map(|hold| hold.source)
    }

    pub fn hold_count(&self) -> usize {
        self.holds.len()
    }

    /// Forget holds whose cast is gone (game over, reset, Escape).
    fn prune(&mut self, game: &FightingGame) {
        self.holds.retain(|hold| game.is_casting(hold.skill));
    }
}
