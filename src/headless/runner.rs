//! Headless duel execution
//!
//! Runs a bot-driven duel without any graphical output, suitable for
//! automated testing. Frames have a fixed length and the duel clock is
//! advanced from virtual time, so a seeded run is fully reproducible.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::combat::log::{DuelEventType, DuelMetadata, FighterMetadata};
use crate::combat::{Fighter, FightingGame, GameState, ManualClock, SkillInput};
use crate::states::{add_duel_systems, configure_duel_system_ordering, DuelSystemSet};

use super::bot::{bot_act, DuelBot, GameRng};
use super::config::HeadlessDuelConfig;

/// Result of a completed headless duel
///
/// This struct provides programmatic access to duel results for testing and analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelResult {
    /// Whether the opponent was defeated before the timeout
    pub opponent_defeated: bool,
    /// Total duel duration in seconds
    pub match_time: f32,
    /// Skills that resolved (instant or completed casts)
    pub skills_used: usize,
    /// Casts abandoned before completion
    pub casts_canceled: usize,
    pub player_final_health: u32,
    pub opponent_final_health: u32,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Resource to track headless duel state
#[derive(Resource)]
pub struct HeadlessDuelState {
    /// Maximum duel duration before giving up
    pub max_duration: f32,
    /// Elapsed duel time
    pub elapsed_time: f32,
    /// Custom output path for the duel log
    pub output_path: Option<String>,
    /// Random seed for deterministic simulation (if provided)
    pub random_seed: Option<u64>,
    /// Duel result (populated when the duel completes)
    pub result: Option<DuelResult>,
}

/// Handle on the clock the headless `FightingGame` samples.
#[derive(Resource, Clone)]
pub struct HeadlessClock(pub ManualClock);

/// Build a ready-to-update headless duel app.
pub fn build_headless_app(config: &HeadlessDuelConfig) -> Result<App, String> {
    config.validate()?;
    let game_config = config.load_game_config()?;

    let clock = ManualClock::new();
    let game = FightingGame::with_clock(game_config, clock.clone())?;

    let rng = match config.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => {
            info!("Using non-deterministic RNG (no seed provided)");
            GameRng::from_entropy()
        }
    };

    let mut app = App::new();
    // Minimal plugins - no window, no rendering
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            config.tick_ms / 1000.0,
        )))
        .insert_resource(game)
        .insert_resource(HeadlessClock(clock))
        .insert_resource(rng)
        .insert_resource(HeadlessDuelState {
            max_duration: config.max_duration_secs,
            elapsed_time: 0.0,
            output_path: config.output_path.clone(),
            random_seed: config.random_seed,
            result: None,
        })
        .init_resource::<SkillInput>()
        .init_resource::<DuelBot>();

    configure_duel_system_ordering(&mut app);
    add_duel_systems(&mut app, || true);

    app.add_systems(
        Update,
        (advance_headless_clock, bot_act)
            .chain()
            .in_set(DuelSystemSet::Input),
    )
    .add_systems(
        Update,
        (headless_track_time, headless_check_duel_end)
            .chain()
            .after(DuelSystemSet::Sync),
    );

    Ok(app)
}

/// Keep the duel clock in lockstep with virtual time.
fn advance_headless_clock(time: Res<Time>, clock: Res<HeadlessClock>) {
    clock.0.advance(time.delta_secs_f64() * 1000.0);
}

fn headless_track_time(time: Res<Time>, mut headless_state: ResMut<HeadlessDuelState>) {
    headless_state.elapsed_time += time.delta_secs();
}

/// Check if the duel has ended (opponent defeated, or timeout)
fn headless_check_duel_end(game: Res<FightingGame>, mut headless_state: ResMut<HeadlessDuelState>) {
    if headless_state.result.is_some() {
        return;
    }

    let defeated = game.game_state() == GameState::GameOver;
    if !defeated && headless_state.elapsed_time < headless_state.max_duration {
        return;
    }

    if defeated {
        info!("Duel ended! {} defeated", game.opponent().name);
    } else {
        info!(
            "Duel timed out after {:.1}s with {} at {} health",
            headless_state.elapsed_time,
            game.opponent().name,
            game.opponent_health()
        );
    }

    let result = build_duel_result(&game, headless_state.random_seed);
    save_headless_duel_log(&game, &result, headless_state.output_path.as_deref());
    headless_state.result = Some(result);
}

/// Build the DuelResult from the current game state
fn build_duel_result(game: &FightingGame, random_seed: Option<u64>) -> DuelResult {
    DuelResult {
        opponent_defeated: !game.opponent().is_alive(),
        match_time: game.log().match_time,
        skills_used: game.log().count(DuelEventType::SkillUsed),
        casts_canceled: game.log().count(DuelEventType::CastCanceled),
        player_final_health: game.player_health(),
        opponent_final_health: game.opponent_health(),
        random_seed,
    }
}

fn fighter_metadata(fighter: &Fighter) -> FighterMetadata {
    FighterMetadata {
        name: fighter.name.clone(),
        max_health: fighter.max_health,
        final_health: fighter.current_health(),
    }
}

/// Save the duel log to a file (only when an output path was given)
fn save_headless_duel_log(game: &FightingGame, result: &DuelResult, output_path: Option<&str>) {
    let Some(output_path) = output_path else {
        return;
    };

    let metadata = DuelMetadata {
        player: fighter_metadata(game.player()),
        opponent: fighter_metadata(game.opponent()),
        opponent_defeated: result.opponent_defeated,
        random_seed: result.random_seed,
    };

    match game.log().save_to_file(&metadata, Some(output_path)) {
        Ok(filename) => info!("Duel log saved to: {}", filename),
        Err(e) => warn!("Failed to save duel log: {}", e),
    }
}

/// Run a headless duel to completion with the given configuration
pub fn run_headless_duel(config: &HeadlessDuelConfig) -> Result<DuelResult, String> {
    let mut app = build_headless_app(config)?;
    app.finish();
    app.cleanup();

    loop {
        app.update();
        let state = app.world().resource::<HeadlessDuelState>();
        if let Some(result) = &state.result {
            return Ok(result.clone());
        }
    }
}
