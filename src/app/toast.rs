//! Transient error notice, top-right of the window
//!
//! A toast lives in `App::toast` only while it is on screen: `show` returns
//! false once the visible + fade time has elapsed and the owner drops it.
//! Hovering restarts the timer.

use crate::constants::*;
use crate::theme;
use eframe::egui;
use std::time::{Duration, Instant};

pub struct Toast {
    message: String,
    started: Instant,
    visible: Duration,
    fade: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_timing(message, TOAST_VISIBLE, TOAST_FADE)
    }

    pub fn with_timing(message: impl Into<String>, visible: Duration, fade: Duration) -> Self {
        Self {
            message: message.into(),
            started: Instant::now(),
            visible,
            fade,
        }
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Opacity at `now`: 1.0 while visible, then linear fade to 0.0
    pub fn alpha_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed <= self.visible {
            return 1.0;
        }
        if self.fade.is_zero() {
            return 0.0;
        }
        let into_fade = (elapsed - self.visible).as_secs_f32() / self.fade.as_secs_f32();
        (1.0 - into_fade).clamp(0.0, 1.0)
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.visible + self.fade
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// Draw for this frame. Returns false when the toast should be dropped.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let now = Instant::now();
        if self.expired_at(now) {
            return false;
        }
        let alpha = self.alpha_at(now);
        let fade = |c: egui::Color32, a: f32| {
            egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (a * alpha) as u8)
        };

        let margin = theme::SPACING_XL;
        let pos = egui::pos2(ctx.screen_rect().right() - margin, ctx.screen_rect().top() + margin);

        let response = egui::Area::new(egui::Id::new("error_toast"))
            .fixed_pos(pos)
            .pivot(egui::Align2::RIGHT_TOP)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fade(theme::TOAST_BG, 235.0))
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fade(theme::STATUS_ERROR, 255.0)))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::symmetric(16, 12))
                    .show(ui, |ui| {
                        ui.set_max_width(theme::TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                                    .size(22.0)
                                    .color(fade(egui::Color32::WHITE, 255.0)),
                            );
                            ui.vertical(|ui| {
                                ui.label(
                                    egui::RichText::new("Oops! Something went wrong")
                                        .strong()
                                        .color(fade(egui::Color32::WHITE, 255.0)),
                                );
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(&self.message)
                                            .size(theme::FONT_LABEL)
                                            .color(fade(theme::TEXT_SECONDARY, 255.0)),
                                    )
                                    .wrap(),
                                );
                            });
                        });
                    });
            });

        if response.response.hovered() {
            self.restart();
        }
        ctx.request_repaint();
        true
    }
}
