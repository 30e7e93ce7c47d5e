//! Duel screen flow and frame scheduling
//!
//! Every frame runs in a fixed order:
//!
//! 1. `DuelSystemSet::Input` - keyboard, mouse and app actions are applied
//! 2. `DuelSystemSet::Advance` - cooldowns decay, cast progress is sampled,
//!    keyboard holds that reached full progress resolve
//! 3. `DuelSystemSet::Sync` - the screen state follows the duel state
//!
//! Both the windowed app and the headless runner use the same ordering.

use bevy::prelude::*;

use crate::combat::constants::GAME_OVER_RESET_DELAY_SECS;
use crate::combat::{FightingGame, GameState, SkillInput};
use crate::keybindings::{key_identifier, GameAction, Keybindings};

/// Screens of the windowed app.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameScreen {
    /// Duel in progress
    #[default]
    Fighting,
    /// Opponent defeated; the duel restarts after a short delay
    GameOver,
}

/// System set labels for per-frame duel ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DuelSystemSet {
    /// Phase 1: input-driven commands
    Input,
    /// Phase 2: time-driven decay and cast resolution
    Advance,
    /// Phase 3: screen state follows the duel
    Sync,
}

/// Countdown to the automatic restart after a win.
#[derive(Resource)]
pub struct GameOverTimer(pub Timer);

/// Configures the ordering between duel system phases.
pub fn configure_duel_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            DuelSystemSet::Input,
            DuelSystemSet::Advance,
            DuelSystemSet::Sync,
        )
            .chain(),
    );
}

/// Adds the systems every duel needs, windowed or headless.
///
/// # Example
/// ```ignore
/// // For graphical mode
/// add_duel_systems(&mut app, in_state(GameScreen::Fighting));
///
/// // For headless mode (always run)
/// add_duel_systems(&mut app, || true);
/// ```
pub fn add_duel_systems<M>(app: &mut App, run_condition: impl Condition<M>) {
    app.add_systems(
        Update,
        advance_duel
            .in_set(DuelSystemSet::Advance)
            .run_if(run_condition),
    );
}

/// Windowed duel: expects `FightingGame` to be inserted by the caller.
pub struct DuelPlugin;

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        configure_duel_system_ordering(app);
        add_duel_systems(app, resource_exists::<FightingGame>);

        app.init_state::<GameScreen>()
            .init_resource::<SkillInput>()
            .init_resource::<Keybindings>()
            .add_systems(
                Update,
                (handle_game_actions, handle_skill_keys)
                    .chain()
                    .in_set(DuelSystemSet::Input)
                    .run_if(resource_exists::<FightingGame>),
            )
            .add_systems(
                Update,
                sync_game_screen
                    .in_set(DuelSystemSet::Sync)
                    .run_if(resource_exists::<FightingGame>),
            )
            .add_systems(OnEnter(GameScreen::GameOver), start_game_over_timer)
            .add_systems(OnExit(GameScreen::GameOver), clear_game_over_timer)
            .add_systems(
                Update,
                tick_game_over_timer
                    .in_set(DuelSystemSet::Sync)
                    .after(sync_game_screen)
                    .run_if(in_state(GameScreen::GameOver)),
            );
    }
}

/// Advance the duel by the frame's delta.
pub fn advance_duel(time: Res<Time>, mut game: ResMut<FightingGame>, mut input: ResMut<SkillInput>) {
    let delta_ms = time.delta_secs() * 1000.0;
    let resolved = input.tick(&mut game, delta_ms);
    for index in resolved {
        if let Some(skill) = game.skill(index) {
            debug!("{} resolved from keyboard hold", skill.name);
        }
    }
}

fn handle_game_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut game: ResMut<FightingGame>,
    mut input: ResMut<SkillInput>,
) {
    if keybindings.action_just_pressed(GameAction::CancelCasts, &keyboard) {
        input.cancel_all(&mut game);
    }
    if keybindings.action_just_pressed(GameAction::Reset, &keyboard) {
        input.cancel_all(&mut game);
        game.reset();
    }
}

/// Translate key presses and releases into skill holds.
fn handle_skill_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut game: ResMut<FightingGame>,
    mut input: ResMut<SkillInput>,
) {
    for key in keyboard.get_just_pressed() {
        let bound_to_action = GameAction::all().into_iter().any(|action| {
            keybindings
                .get(action)
                .is_some_and(|b| b.primary == *key || b.secondary == Some(*key))
        });
        if bound_to_action {
            continue;
        }
        if let Some(identifier) = key_identifier(*key) {
            input.press_key(&mut game, identifier);
        }
    }

    for key in keyboard.get_just_released() {
        if let Some(identifier) = key_identifier(*key) {
            input.release_key(&mut game, identifier);
        }
    }
}

fn sync_game_screen(
    game: Res<FightingGame>,
    screen: Res<State<GameScreen>>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    let wanted = match game.game_state() {
        GameState::Fighting => GameScreen::Fighting,
        GameState::GameOver => GameScreen::GameOver,
    };
    if *screen.get() != wanted {
        info!("Screen: {:?} -> {:?}", screen.get(), wanted);
        next_screen.set(wanted);
    }
}

fn start_game_over_timer(mut commands: Commands) {
    commands.insert_resource(GameOverTimer(Timer::from_seconds(
        GAME_OVER_RESET_DELAY_SECS,
        TimerMode::Once,
    )));
}

fn clear_game_over_timer(mut commands: Commands) {
    commands.remove_resource::<GameOverTimer>();
}

fn tick_game_over_timer(
    time: Res<Time>,
    timer: Option<ResMut<GameOverTimer>>,
    mut game: ResMut<FightingGame>,
    mut input: ResMut<SkillInput>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.0.tick(time.delta()).just_finished() {
        input.cancel_all(&mut game);
        game.reset();
    }
}
