//! UI System
//!
//! egui overlay drawn on top of the playfield:
//! - Opponent and player health bars
//! - Fighters and their active casting rings
//! - Skill buttons with cooldown sweep and cast progress, clickable by
//!   press-and-hold
//! - Last-used skill banner and the win message

use bevy::prelude::*;

use crate::combat::FightingGame;
use crate::states::DuelSystemSet;

pub mod hud;

/// Plugin for UI management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<hud::HudState>().add_systems(
            Update,
            hud::render_duel_hud
                .in_set(DuelSystemSet::Input)
                .run_if(resource_exists::<FightingGame>),
        );
    }
}

/// Common colors used throughout the UI
pub mod colors {
    use bevy_egui::egui::Color32;

    /// Player color (blue-ish)
    pub const PLAYER: Color32 = Color32::from_rgb(51, 102, 204);
    /// Opponent color (red-ish)
    pub const OPPONENT: Color32 = Color32::from_rgb(204, 51, 51);
    /// Health bar color
    pub const HEALTH: Color32 = Color32::from_rgb(0, 200, 0);
    /// Health bar color below half
    pub const HEALTH_MID: Color32 = Color32::from_rgb(255, 200, 0);
    /// Health bar low color
    pub const HEALTH_LOW: Color32 = Color32::from_rgb(200, 0, 0);
    /// Bar background
    pub const BAR_BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
    /// Cooldown overlay
    pub const COOLDOWN: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 170);
    /// Cast progress fill
    pub const CAST: Color32 = Color32::from_rgb(255, 180, 60);
    /// Panel background
    pub const PANEL: Color32 = Color32::from_rgb(20, 20, 30);
    /// Title / banner text
    pub const GOLD: Color32 = Color32::from_rgb(230, 204, 153);
}

/// Font sizes used throughout the UI
pub mod fonts {
    /// Large title text
    pub const TITLE: f32 = 48.0;
    /// Section headers
    pub const HEADER: f32 = 24.0;
    /// Normal body text
    pub const BODY: f32 = 16.0;
    /// Small labels and annotations
    pub const SMALL: f32 = 12.0;
}
