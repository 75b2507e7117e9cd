//! View rendering (header, contenders, action, progress, result, settings)

use super::App;
use crate::constants::*;
use crate::theme;
use crate::types::{ResponseMode, RoastState};
use crate::ui::components;
use crate::ui::markup;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("GitHub Roast Battle 🔥")
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::ACCENT_HOT),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let gear = ui.add(theme::button(icons::GEAR)).on_hover_text("Connection settings");
                if gear.clicked() {
                    self.show_settings = !self.show_settings;
                    self.endpoint_draft = self.endpoint.clone();
                }
                ui.label(egui::RichText::new(icons::GITHUB_LOGO).size(32.0).color(theme::TEXT_PRIMARY));
            });
        });
    }

    /// The two username cards. Returns true if Enter was pressed in either field.
    pub(crate) fn render_contenders(&mut self, ui: &mut egui::Ui, loading: bool) -> bool {
        let mut submitted = false;
        ui.columns(2, |cols| {
            submitted |= components::contender_card(&mut cols[0], &mut self.user1, "The Challenger", loading);
            submitted |= components::contender_card(&mut cols[1], &mut self.user2, "The Opponent", loading);
        });
        submitted
    }

    /// Returns true when the button was clicked.
    pub(crate) fn render_action(&mut self, ui: &mut egui::Ui, loading: bool) -> bool {
        let label = if loading {
            "Roasting in Progress...".to_string()
        } else {
            format!("{}  Initialize Roast Sequence", icons::SPARKLE)
        };
        let size = egui::vec2(ui.available_width(), theme::ACTION_HEIGHT);
        let response = ui.add_enabled(!loading, theme::button_action(label, !loading).min_size(size));
        if loading {
            // Spinner over the left side of the disabled button
            let spinner_rect = egui::Rect::from_center_size(
                response.rect.left_center() + egui::vec2(theme::SPACING_XXL, 0.0),
                egui::vec2(24.0, 24.0),
            );
            ui.put(spinner_rect, egui::Spinner::new().size(24.0).color(theme::TEXT_PRIMARY));
        }
        response.clicked()
    }

    pub(crate) fn render_progress(&self, ui: &mut egui::Ui, snapshot: &RoastState) {
        ui.add_space(theme::SPACING_XXL);
        theme::progress_bar(ui, snapshot.progress / PROGRESS_DONE);
        ui.add_space(theme::SPACING_XL);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(snapshot.phrase())
                    .monospace()
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_MUTED),
            );
        });
    }

    pub(crate) fn render_result(&self, ui: &mut egui::Ui) {
        ui.add_space(theme::SPACING_XXL);
        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            markup::render(ui, &self.rendered);
        });
    }

    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        let mut apply = false;
        egui::Window::new("Connection")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(theme::SETTINGS_WIDTH)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-theme::SPACING_XL, 64.0))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Service endpoint").color(theme::TEXT_MUTED));
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.endpoint_draft)
                        .hint_text(DEFAULT_ENDPOINT)
                        .desired_width(f32::INFINITY),
                );
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    apply = true;
                }
                ui.label(
                    egui::RichText::new(format!("Requests go to <endpoint>/{COMPARE_PATH}"))
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_DIM),
                );

                ui.add_space(theme::SPACING_LG);
                ui.label(egui::RichText::new("Response format").color(theme::TEXT_MUTED));
                let mut mode = self.response_mode;
                ui.horizontal(|ui| {
                    for option in [ResponseMode::Json, ResponseMode::Stream] {
                        ui.selectable_value(&mut mode, option, option.label());
                    }
                });
                self.set_response_mode(mode);

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui.add(theme::button(format!("{}  Apply", icons::CHECK))).clicked() {
                        apply = true;
                    }
                    if ui.add(theme::button(format!("{}  Reset", icons::ARROW_COUNTER_CLOCKWISE))).clicked() {
                        self.endpoint_draft = DEFAULT_ENDPOINT.to_string();
                        apply = true;
                    }
                });
            });

        if apply {
            let draft = self.endpoint_draft.clone();
            self.set_endpoint(&draft);
        }
        if !open {
            self.show_settings = false;
        }
    }
}
