//! Dimmed overlay shown over the frozen track once a round ends.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::round::{CurrentRound, Outcome, RoundSnapshot};

const WIN_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 204, 64);
const LOSS_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 50, 47);
/// 70% black over the frozen track.
pub const BACKDROP_ALPHA: u8 = 179;
pub const HEADLINE_SIZE: f32 = 36.0;

/// Second line under the headline. `level` is the level after any advance.
pub fn sub_line(outcome: Outcome, level: u32) -> Option<String> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Won => Some(format!("Next Level: {level} \u{2014} Press 'R' to play!")),
        Outcome::Lost => Some("Press 'R' to try again.".to_string()),
    }
}

fn overlay_lines(snapshot: &RoundSnapshot) -> Option<(&'static str, String)> {
    let headline = snapshot.outcome.headline()?;
    let sub = sub_line(snapshot.outcome, snapshot.level)?;
    Some((headline, sub))
}

pub fn game_over_ui(mut contexts: EguiContexts, current: Res<CurrentRound>) {
    let Some((headline, sub)) = overlay_lines(&current.0) else {
        return;
    };
    let color = if current.0.outcome == Outcome::Won {
        WIN_COLOR
    } else {
        LOSS_COLOR
    };
    let ctx = contexts.ctx_mut();

    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("game_over_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(BACKDROP_ALPHA),
            );
            ui.allocate_rect(screen_rect, egui::Sense::hover());
        });

    egui::Area::new(egui::Id::new("game_over_text"))
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(headline).size(HEADLINE_SIZE).strong().color(color));
                ui.add_space(8.0);
                ui.label(egui::RichText::new(sub).size(16.0).color(egui::Color32::WHITE));
            });
        });
}
