//! Header line with level and instructions, the round timer, and the
//! restart hint once a round is over.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::round::{CurrentRound, RoundSnapshot};

pub fn header_text(level: u32) -> String {
    format!(
        "Level {level} \u{2014} Move with Arrow Keys. Don't move on RED. Reach the finish line!"
    )
}

pub fn restart_hint(snapshot: &RoundSnapshot) -> Option<&'static str> {
    snapshot
        .outcome
        .is_over()
        .then_some("Press 'R' to restart.")
}

pub fn hud_ui(mut contexts: EguiContexts, current: Res<CurrentRound>) {
    let snapshot = current.0;
    let ctx = contexts.ctx_mut();

    egui::Area::new(egui::Id::new("round_hud"))
        .fixed_pos(egui::pos2(20.0, 4.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(header_text(snapshot.level)).size(14.0));
            ui.label(egui::RichText::new(snapshot.elapsed_label()).size(14.0));
            if let Some(hint) = restart_hint(&snapshot) {
                ui.label(egui::RichText::new(hint).size(14.0));
            }
        });
}
