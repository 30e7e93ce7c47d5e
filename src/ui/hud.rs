//! HUD Rendering
//!
//! Health bars, skill buttons, casting rings and banners. Skill buttons are
//! also the mouse input surface: pressing one starts a cast, releasing it
//! over the button confirms, dragging off cancels.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::{colors, fonts};
use crate::combat::{AnimationType, Fighter, FightingGame, InputSource, Skill, SkillInput};
use crate::keybindings::{GameAction, Keybindings};
use crate::states::GameOverTimer;

const SKILL_BUTTON_SIZE: egui::Vec2 = egui::vec2(120.0, 64.0);
const FIGHTER_RADIUS: f32 = 28.0;
const BANNER_SECS: f32 = 1.5;

/// Per-frame HUD memory that egui does not keep for us.
#[derive(Resource, Debug, Default)]
pub struct HudState {
    /// Skill button currently held down with the mouse
    pub mouse_hold: Option<usize>,
    /// Last resolved skill and how long its banner stays up
    pub banner: Option<(String, f32)>,
}

/// Primary pointer button state for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    /// Went down this frame
    pub pressed: bool,
    /// Currently down
    pub down: bool,
}

pub fn render_duel_hud(
    mut contexts: EguiContexts,
    mut game: ResMut<FightingGame>,
    mut input: ResMut<SkillInput>,
    mut hud: ResMut<HudState>,
    game_over: Option<Res<GameOverTimer>>,
    keybindings: Res<Keybindings>,
    time: Res<Time>,
) {
    // Use try_ctx_mut to gracefully handle window close
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    update_banner(&mut game, &mut hud, time.delta_secs());

    egui::TopBottomPanel::top("opponent_panel")
        .frame(egui::Frame::none().fill(colors::PANEL).inner_margin(egui::Margin::same(10.0)))
        .show(ctx, |ui| {
            render_fighter_bar(ui, game.opponent(), colors::OPPONENT);
        });

    let mut pointer_over = vec![false; game.skills().len()];
    egui::TopBottomPanel::bottom("skill_panel")
        .frame(egui::Frame::none().fill(colors::PANEL).inner_margin(egui::Margin::same(10.0)))
        .show(ctx, |ui| {
            render_fighter_bar(ui, game.player(), colors::PLAYER);
            ui.add_space(8.0);

            egui::Grid::new("skill_grid")
                .num_columns(3)
                .spacing(egui::vec2(8.0, 8.0))
                .show(ui, |ui| {
                    for (index, skill) in game.skills().iter().enumerate() {
                        let response = render_skill_button(
                            ui,
                            skill,
                            game.cooldown_percentage(index),
                            game.cast_progress(index),
                            game.is_casting(index),
                        );
                        pointer_over[index] = response.contains_pointer();
                        if (index + 1) % 3 == 0 {
                            ui.end_row();
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(action_hints(&keybindings))
                    .size(fonts::SMALL)
                    .color(egui::Color32::from_rgb(160, 160, 160)),
            );
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            render_playfield(ui, &game);
            if let Some((text, _)) = &hud.banner {
                render_banner(ui, text);
            }
            if let Some(timer) = &game_over {
                render_win_text(ui, timer.0.remaining_secs());
            }
        });

    let pointer = ctx.input(|i| PointerState {
        pressed: i.pointer.primary_pressed(),
        down: i.pointer.primary_down(),
    });
    apply_mouse_input(pointer, &pointer_over, &mut game, &mut input, &mut hud);
}

/// Footer line listing the app-level key bindings, e.g. "R: Restart Duel".
pub fn action_hints(keybindings: &Keybindings) -> String {
    GameAction::all()
        .iter()
        .map(|action| {
            format!(
                "{}: {}",
                keybindings.binding_display(*action),
                action.description()
            )
        })
        .collect::<Vec<_>>()
        .join("   ")
}

/// Consume the last-used skill into the banner and age the current banner.
fn update_banner(game: &mut FightingGame, hud: &mut HudState, delta_secs: f32) {
    if let Some(id) = game.take_last_used_skill() {
        if let Some(skill) = game.skill(id.index()) {
            let text = format!("{} {}!", skill.animation_type.icon(), skill.name);
            hud.banner = Some((text, BANNER_SECS));
        }
        return;
    }

    if let Some((_, remaining)) = hud.banner.as_mut() {
        *remaining -= delta_secs;
        if *remaining <= 0.0 {
            hud.banner = None;
        }
    }
}

/// Turn raw pointer state into skill holds.
///
/// A hold starts only on the frame the button goes down over a skill, so
/// dragging onto a button with the mouse already down does nothing.
pub fn apply_mouse_input(
    pointer: PointerState,
    pointer_over: &[bool],
    game: &mut FightingGame,
    input: &mut SkillInput,
    hud: &mut HudState,
) {
    match hud.mouse_hold {
        Some(index) if !pointer.down => {
            input.release(game, InputSource::Mouse, index);
            hud.mouse_hold = None;
        }
        Some(index) if !pointer_over.get(index).copied().unwrap_or(false) => {
            input.leave(game, index);
            hud.mouse_hold = None;
        }
        Some(index) => {
            // Escape or a finished duel can drop the cast under us.
            if !input.is_holding(index) {
                hud.mouse_hold = None;
            }
        }
        None if pointer.pressed => {
            if let Some(index) = pointer_over.iter().position(|over| *over) {
                if input.press(game, InputSource::Mouse, index) {
                    hud.mouse_hold = Some(index);
                }
            }
        }
        None => {}
    }
}

fn health_color(percentage: f32) -> egui::Color32 {
    if percentage > 0.5 {
        colors::HEALTH
    } else if percentage > 0.25 {
        colors::HEALTH_MID
    } else {
        colors::HEALTH_LOW
    }
}

/// Visual tint for each skill's effects.
pub fn animation_color(animation: AnimationType) -> egui::Color32 {
    match animation {
        AnimationType::Fireball => egui::Color32::from_rgb(255, 120, 40),
        AnimationType::Lightning => egui::Color32::from_rgb(240, 240, 90),
        AnimationType::IceSpike => egui::Color32::from_rgb(120, 200, 255),
        AnimationType::Meteor => egui::Color32::from_rgb(200, 70, 30),
        AnimationType::Shield => egui::Color32::from_rgb(140, 160, 255),
        AnimationType::Heal => egui::Color32::from_rgb(100, 255, 140),
    }
}

fn render_fighter_bar(ui: &mut egui::Ui, fighter: &Fighter, name_color: egui::Color32) {
    let percentage = fighter.health_percentage();

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&fighter.name)
                .size(fonts::BODY)
                .color(name_color)
                .strong(),
        );
        ui.label(
            egui::RichText::new(format!("{}/{}", fighter.current_health(), fighter.max_health))
                .size(fonts::SMALL)
                .color(egui::Color32::from_rgb(200, 200, 200)),
        );
    });

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 14.0),
        egui::Sense::hover(),
    );
    ui.painter().rect_filled(rect, 3.0, colors::BAR_BACKGROUND);
    ui.painter().rect_filled(
        egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * percentage, rect.height())),
        3.0,
        health_color(percentage),
    );
    ui.painter().rect_stroke(
        rect,
        3.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200)),
    );
}

fn render_skill_button(
    ui: &mut egui::Ui,
    skill: &Skill,
    cooldown: f32,
    cast_progress: f32,
    casting: bool,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(SKILL_BUTTON_SIZE, egui::Sense::click_and_drag());
    let painter = ui.painter();
    let tint = animation_color(skill.animation_type);

    let fill = if casting {
        egui::Color32::from_rgb(70, 60, 40)
    } else if response.contains_pointer() {
        egui::Color32::from_rgb(60, 80, 120)
    } else {
        egui::Color32::from_rgb(40, 40, 50)
    };
    painter.rect_filled(rect, 4.0, fill);

    // Cooldown sweep drains from the top
    if cooldown > 0.0 {
        let height = rect.height() * cooldown;
        painter.rect_filled(
            egui::Rect::from_min_size(
                egui::pos2(rect.min.x, rect.max.y - height),
                egui::vec2(rect.width(), height),
            ),
            4.0,
            colors::COOLDOWN,
        );
    }

    painter.text(
        rect.center_top() + egui::vec2(0.0, 6.0),
        egui::Align2::CENTER_TOP,
        format!("{} {}", skill.animation_type.icon(), skill.name),
        egui::FontId::proportional(fonts::BODY),
        tint,
    );
    painter.text(
        rect.left_bottom() + egui::vec2(6.0, -6.0),
        egui::Align2::LEFT_BOTTOM,
        skill.key_binding.to_uppercase(),
        egui::FontId::monospace(fonts::SMALL),
        egui::Color32::from_rgb(200, 200, 200),
    );
    if cooldown > 0.0 {
        painter.text(
            rect.right_bottom() + egui::vec2(-6.0, -6.0),
            egui::Align2::RIGHT_BOTTOM,
            format!("{:.1}s", skill.current_cooldown() / 1000.0),
            egui::FontId::proportional(fonts::SMALL),
            egui::Color32::WHITE,
        );
    }

    if casting {
        let bar = egui::Rect::from_min_size(
            rect.left_bottom() + egui::vec2(0.0, -4.0),
            egui::vec2(rect.width() * cast_progress, 4.0),
        );
        painter.rect_filled(bar, 0.0, colors::CAST);
    }

    painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.0, tint.gamma_multiply(0.6)));
    response.on_hover_text(skill.description.as_str())
}

/// Fighters at their configured positions plus one ring per active cast.
fn render_playfield(ui: &mut egui::Ui, game: &FightingGame) {
    let origin = ui.max_rect().min;
    let painter = ui.painter();

    for (fighter, color) in [
        (game.opponent(), colors::OPPONENT),
        (game.player(), colors::PLAYER),
    ] {
        let center = origin + egui::vec2(fighter.x, fighter.y);
        let fill = if fighter.is_alive() {
            color
        } else {
            color.gamma_multiply(0.3)
        };
        painter.circle_filled(center, FIGHTER_RADIUS, fill);
    }

    let player = game.player();
    let center = origin + egui::vec2(player.x, player.y);
    for (ring, spell) in game.casting_spells().enumerate() {
        let radius = FIGHTER_RADIUS + 8.0 + ring as f32 * 7.0;
        let color = animation_color(spell.animation_type);
        painter.circle_stroke(center, radius, egui::Stroke::new(1.0, color.gamma_multiply(0.3)));
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(3.0, color.gamma_multiply(spell.progress.max(0.15))),
        );
    }
}

fn render_banner(ui: &mut egui::Ui, text: &str) {
    let rect = ui.max_rect();
    ui.painter().text(
        rect.center() + egui::vec2(0.0, -40.0),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(fonts::HEADER),
        colors::GOLD,
    );
}

fn render_win_text(ui: &mut egui::Ui, remaining_secs: f32) {
    let rect = ui.max_rect();
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "YOU WIN!",
        egui::FontId::proportional(fonts::TITLE),
        colors::GOLD,
    );
    ui.painter().text(
        rect.center() + egui::vec2(0.0, 40.0),
        egui::Align2::CENTER_CENTER,
        format!("New duel in {:.1}s", remaining_secs),
        egui::FontId::proportional(fonts::BODY),
        egui::Color32::from_rgb(200, 200, 200),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{GameConfig, ManualClock};

    const FIREBALL: usize = 0;

    fn setup() -> (FightingGame, SkillInput, HudState, ManualClock) {
        let clock = ManualClock::new();
        let game = FightingGame::with_clock(GameConfig::default(), clock.clone()).unwrap();
        (game, SkillInput::new(), HudState::default(), clock)
    }

    fn over(index: usize) -> Vec<bool> {
        (0..6).map(|i| i == index).collect()
    }

    const DOWN: PointerState = PointerState {
        pressed: true,
        down: true,
    };
    const HELD: PointerState = PointerState {
        pressed: false,
        down: true,
    };
    const UP: PointerState = PointerState {
        pressed: false,
        down: false,
    };

    #[test]
    fn test_action_hints_list_every_binding() {
        assert_eq!(
            action_hints(&Keybindings::default()),
            "ESC / BACKSPACE: Cancel Casts   R: Restart Duel"
        );
    }

    #[test]
    fn test_press_hold_release_casts() {
        let (mut game, mut input, mut hud, clock) = setup();
        apply_mouse_input(DOWN, &over(FIREBALL), &mut game, &mut input, &mut hud);
        assert_eq!(hud.mouse_hold, Some(FIREBALL));
        assert!(game.is_casting(FIREBALL));

        clock.advance(250.0);
        input.tick(&mut game, 250.0);
        apply_mouse_input(HELD, &over(FIREBALL), &mut game, &mut input, &mut hud);
        apply_mouse_input(UP, &over(FIREBALL), &mut game, &mut input, &mut hud);

        assert_eq!(hud.mouse_hold, None);
        assert_eq!(game.opponent_health(), 85);
    }

    #[test]
    fn test_drag_off_button_cancels() {
        let (mut game, mut input, mut hud, clock) = setup();
        apply_mouse_input(DOWN, &over(FIREBALL), &mut game, &mut input, &mut hud);
        clock.advance(250.0);
        input.tick(&mut game, 250.0);

        apply_mouse_input(HELD, &[false; 6], &mut game, &mut input, &mut hud);
        assert_eq!(hud.mouse_hold, None);
        assert!(!game.is_casting(FIREBALL));

        // Dragging back on while still down does not restart the cast.
        apply_mouse_input(HELD, &over(FIREBALL), &mut game, &mut input, &mut hud);
        assert!(!game.is_casting(FIREBALL));
        assert_eq!(game.opponent_health(), 100);
    }

    #[test]
    fn test_press_on_empty_space_does_nothing() {
        let (mut game, mut input, mut hud, _) = setup();
        apply_mouse_input(DOWN, &[false; 6], &mut game, &mut input, &mut hud);
        assert_eq!(hud.mouse_hold, None);
        assert!(!game.has_active_casts());
    }

    #[test]
    fn test_hold_dropped_after_cancel_all() {
        let (mut game, mut input, mut hud, _) = setup();
        apply_mouse_input(DOWN, &over(FIREBALL), &mut game, &mut input, &mut hud);
        input.cancel_all(&mut game);
        apply_mouse_input(HELD, &over(FIREBALL), &mut game, &mut input, &mut hud);
        assert_eq!(hud.mouse_hold, None);
    }

    #[test]
    fn test_banner_consumes_last_used_skill() {
        let (mut game, _, mut hud, _) = setup();
        game.use_skill(FIREBALL);
        update_banner(&mut game, &mut hud, 0.0);
        assert!(hud.banner.as_ref().is_some_and(|(text, _)| text.contains("Fireball")));
        assert!(game.last_used_skill().is_none());

        update_banner(&mut game, &mut hud, BANNER_SECS);
        assert!(hud.banner.is_none());
    }
}
