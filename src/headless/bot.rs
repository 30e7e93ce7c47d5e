//! Scripted duelist for headless runs
//!
//! The bot plays through the same `SkillInput` surface as a human: it holds
//! a skill with a random input source, lets keyboard holds resolve on their
//! own, releases mouse holds at full progress, and now and then gives up on
//! a hold halfway through to exercise cancellation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::combat::{FightingGame, InputSource, SkillInput};

/// Chance that a new hold is abandoned before it completes
const ABORT_CHANCE: f64 = 0.1;

/// Seedable RNG so a headless duel can be replayed exactly.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BotHold {
    skill: usize,
    source: InputSource,
    /// Progress at which the bot lets go early
    abort_at: Option<f32>,
}

#[derive(Resource, Debug, Default)]
pub struct DuelBot {
    hold: Option<BotHold>,
}

impl DuelBot {
    pub fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    /// One frame of bot input, applied before the duel advances.
    pub fn act(&mut self, game: &mut FightingGame, input: &mut SkillInput, rng: &mut GameRng) {
        if let Some(hold) = self.hold {
            self.continue_hold(hold, game, input);
            return;
        }

        let usable: Vec<usize> = game
            .skills()
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.can_use())
            .map(|(index, _)| index)
            .collect();
        if usable.is_empty() {
            return;
        }

        let skill = usable[rng.pick(usable.len())];
        let source = if rng.chance(0.5) {
            InputSource::Keyboard
        } else {
            InputSource::Mouse
        };
        let abort_at = rng
            .chance(ABORT_CHANCE)
            .then(|| rng.random_range(0.2, 0.8));

        if input.press(game, source, skill) {
            self.hold = Some(BotHold {
                skill,
                source,
                abort_at,
            });
        }
    }

    fn continue_hold(&mut self, hold: BotHold, game: &mut FightingGame, input: &mut SkillInput) {
        // Keyboard holds resolve during the advance phase; the hold is gone
        // from `SkillInput` once that happens.
        if !input.is_holding(hold.skill) {
            self.hold = None;
            return;
        }

        let progress = game.cast_progress(hold.skill);
        if hold.abort_at.is_some_and(|abort_at| progress >= abort_at) {
            match hold.source {
                InputSource::Keyboard => {
                    input.release(game, InputSource::Keyboard, hold.skill);
                }
                InputSource::Mouse => {
                    input.leave(game, hold.skill);
                }
            }
            self.hold = None;
            return;
        }

        if hold.source == InputSource::Mouse && progress >= 1.0 {
            input.release(game, InputSource::Mouse, hold.skill);
            self.hold = None;
        }
    }
}

/// Drive the bot from the ECS.
pub fn bot_act(
    mut bot: ResMut<DuelBot>,
    mut game: ResMut<FightingGame>,
    mut input: ResMut<SkillInput>,
    mut rng: ResMut<GameRng>,
) {
    bot.act(&mut game, &mut input, &mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{GameConfig, ManualClock};

    fn setup() -> (FightingGame, SkillInput, ManualClock) {
        let clock = ManualClock::new();
        let game = FightingGame::with_clock(GameConfig::default(), clock.clone()).unwrap();
        (game, SkillInput::new(), clock)
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = GameRng::from_seed(42);
        let mut b = GameRng::from_seed(42);
        for _ in 0..20 {
            assert_eq!(a.pick(6), b.pick(6));
        }
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn test_bot_starts_a_hold() {
        let (mut game, mut input, _) = setup();
        let mut bot = DuelBot::default();
        let mut rng = GameRng::from_seed(1);
        bot.act(&mut game, &mut input, &mut rng);
        assert!(bot.is_holding());
        assert_eq!(game.active_cast_count(), 1);
        assert_eq!(input.hold_count(), 1);
    }

    #[test]
    fn test_bot_defeats_opponent() {
        let (mut game, mut input, clock) = setup();
        let mut bot = DuelBot::default();
        let mut rng = GameRng::from_seed(9);

        for _ in 0..60 * 120 {
            bot.act(&mut game, &mut input, &mut rng);
            clock.advance(1000.0 / 60.0);
            input.tick(&mut game, 1000.0 / 60.0);
            if !game.opponent().is_alive() {
                break;
            }
        }
        assert!(!game.opponent().is_alive());
    }
}
