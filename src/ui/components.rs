//! Reusable UI components

use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;

/// Avatar placeholder: a coder once a name is typed, a question mark before.
pub fn avatar_glyph(username: &str) -> &'static str {
    if username.is_empty() {
        icons::QUESTION
    } else {
        icons::USER_CIRCLE
    }
}

pub fn username_hint(role: &str) -> String {
    format!("Enter {role}'s GitHub username")
}

/// One contender card. Returns true if Enter was pressed in the field.
pub fn contender_card(ui: &mut egui::Ui, username: &mut String, role: &str, locked: bool) -> bool {
    let mut submitted = false;
    theme::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.allocate_ui_with_layout(
            egui::vec2(ui.available_width(), theme::AVATAR_HEIGHT),
            egui::Layout::centered_and_justified(egui::Direction::TopDown),
            |ui| {
                let color = if username.is_empty() { theme::TEXT_DIM } else { theme::ACCENT_LIGHT };
                ui.label(
                    egui::RichText::new(avatar_glyph(username))
                        .size(theme::FONT_AVATAR)
                        .color(color),
                );
            },
        );
        ui.add_space(theme::SPACING_LG);

        let edit = ui.add_enabled(
            !locked,
            egui::TextEdit::singleline(username)
                .hint_text(username_hint(role))
                .font(egui::FontId::proportional(18.0))
                .min_size(egui::vec2(0.0, theme::INPUT_HEIGHT))
                .margin(egui::Margin::symmetric(12, 10))
                .desired_width(f32::INFINITY),
        );
        submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    });
    submitted
}
