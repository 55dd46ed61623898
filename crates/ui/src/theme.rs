use bevy_egui::{egui, EguiContexts};

/// Light panels that sit on the pale track instead of egui's dark default.
pub fn apply_track_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();

    let panel = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 0);
    style.visuals.panel_fill = panel;
    style.visuals.window_fill = egui::Color32::WHITE;
    style.visuals.override_text_color = Some(egui::Color32::BLACK);

    // egui 0.31+ uses CornerRadius with u8 values
    style.visuals.window_corner_radius = egui::CornerRadius::same(8);

    ctx.set_style(style);
}
