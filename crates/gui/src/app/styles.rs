//! Application style configuration

use eframe::egui;
use shared::InteractionMode;

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();

    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    for widgets in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widgets.corner_radius = egui::CornerRadius::same(3);
    }

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    style.visuals.panel_fill = egui::Color32::from_rgb(32, 32, 40);
    style.visuals.window_fill = egui::Color32::from_rgb(38, 38, 48);

    // Selected toggle buttons pick up the highlight-material green
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(40, 110, 60);

    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    use egui::{FontId, TextStyle};
    for (text_style, font) in [
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (TextStyle::Small, FontId::proportional(font_size * 0.85)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.3)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
    ] {
        style.text_styles.insert(text_style, font);
    }
}

/// Accent color used for a mode in the toolbar and status bar
pub fn mode_color(mode: InteractionMode) -> egui::Color32 {
    match mode {
        InteractionMode::Action => egui::Color32::from_rgb(180, 180, 190),
        InteractionMode::Position => egui::Color32::from_rgb(110, 170, 255),
        InteractionMode::Scale => egui::Color32::from_rgb(255, 190, 90),
        InteractionMode::Rotation => egui::Color32::from_rgb(120, 220, 140),
    }
}
