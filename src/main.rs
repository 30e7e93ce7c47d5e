//! Spellduel - Wizard Duel Prototype
//!
//! Opens the duel window, or runs a bot-driven duel headlessly when
//! `--headless` is given.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::Path;
use std::process::ExitCode;

use spellduel::camera::CameraPlugin;
use spellduel::cli::{parse_args, Args};
use spellduel::combat::{load_game_config, FightingGame, GameConfig};
use spellduel::headless::{run_headless_duel, HeadlessDuelConfig};
use spellduel::keybindings::Keybindings;
use spellduel::states::DuelPlugin;
use spellduel::ui::UiPlugin;

fn main() -> ExitCode {
    let args = parse_args();
    let outcome = match &args.headless {
        Some(path) => run_headless(path, &args),
        None => run_windowed(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_headless(path: &Path, args: &Args) -> Result<(), String> {
    let mut config = HeadlessDuelConfig::load_from_file(path)?;
    if let Some(game_config) = &args.config {
        config.game_config = Some(game_config.display().to_string());
    }
    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }

    println!("Starting headless duel...");
    println!("  Seed: {:?}", config.random_seed);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let result = run_headless_duel(&config)?;

    println!(
        "Duel complete in {:.1}s: opponent {} ({} hp left), {} skills used, {} casts canceled",
        result.match_time,
        if result.opponent_defeated { "defeated" } else { "survived" },
        result.opponent_final_health,
        result.skills_used,
        result.casts_canceled,
    );
    if let Some(output) = &config.output_path {
        println!("Log saved to: {}", output);
    }
    Ok(())
}

fn run_windowed(args: &Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => load_game_config()?,
    };
    let game = FightingGame::new(config)?;

    let keybindings = Keybindings::default();
    keybindings.check_conflicts(game.keymap())?;

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Spellduel".to_string(),
                resolution: (400.0, 800.0).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(game)
        .insert_resource(keybindings)
        // Our game plugins
        .add_plugins((EguiPlugin, CameraPlugin, DuelPlugin, UiPlugin))
        .run();

    Ok(())
}
