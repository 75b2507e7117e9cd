//! Centralized theme constants for GitHub Roast Battle
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x11, 0x18, 0x27); // gray-900
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37); // gray-800
pub const BG_INPUT: Color32 = Color32::from_rgb(0x2a, 0x33, 0x44); // gray-700 @ 50%
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x37, 0x41, 0x51); // gray-700
pub const BG_HOVER: Color32 = Color32::from_rgb(0x2e, 0x1a, 0x47); // faint purple hover

// =============================================================================
// COLORS - Accent (Pink -> Purple)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xa8, 0x55, 0xf7); // purple-500
pub const ACCENT_HOT: Color32 = Color32::from_rgb(0xec, 0x48, 0x99); // pink-500
pub const ACCENT_LIGHT: Color32 = Color32::from_rgb(0xd8, 0xb4, 0xfe); // purple-300
pub const ACCENT_BORDER: Color32 = Color32::from_rgba_premultiplied(0x1a, 0x0d, 0x25, 0x33); // purple-500 @ 20%

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb); // gray-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf); // gray-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80); // gray-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x2b, 0x25, 0x3d);

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400
pub const TOAST_BG: Color32 = Color32::from_rgb(0xef, 0x44, 0x44); // red-500

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x37, 0x41, 0x51); // gray-700
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0xdb, 0x27, 0x77); // pink-600
pub const BTN_DISABLED: Color32 = Color32::from_rgb(0x5b, 0x21, 0x4a);
pub const BTN_DISABLED_TEXT: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 32.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_RESULT: f32 = 16.0;
pub const FONT_ACTION: f32 = 22.0;
pub const FONT_AVATAR: f32 = 96.0;

// =============================================================================
// SIZES
// =============================================================================
pub const CONTENT_MAX_WIDTH: f32 = 1000.0;
pub const AVATAR_HEIGHT: f32 = 160.0;
pub const INPUT_HEIGHT: f32 = 44.0;
pub const ACTION_HEIGHT: f32 = 64.0;
pub const PROGRESS_HEIGHT: f32 = 8.0;
pub const TOAST_WIDTH: f32 = 340.0;
pub const SETTINGS_WIDTH: f32 = 380.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 12.0;
pub const RADIUS_CARD: f32 = 16.0;

// =============================================================================
// STROKES
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;
pub const SPACING_XXL: f32 = 32.0;

// =============================================================================
// APPLY VISUALS
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT_LIGHT,
        selection: egui::style::Selection {
            bg_fill: Color32::from_rgb(0x6b, 0x21, 0xa8), // purple-800
            stroke: egui::Stroke::new(STROKE_DEFAULT, ACCENT_LIGHT),
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: BG_INPUT,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: Color32::from_rgb(0x4b, 0x2a, 0x6e),
                bg_stroke: egui::Stroke::new(STROKE_MEDIUM, ACCENT),
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: Color32::from_rgb(0x58, 0x1c, 0x87),
                bg_stroke: egui::Stroke::new(STROKE_MEDIUM, ACCENT),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -1.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Card frame
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgba_unmultiplied(0x1f, 0x29, 0x37, 128))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, ACCENT_BORDER))
        .corner_radius(RADIUS_CARD)
        .inner_margin(egui::Margin::same(SPACING_XXL as i8))
}

// =============================================================================
// HELPER - Modal frame
// =============================================================================
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Big pink call-to-action
pub fn button_action(text: impl Into<String>, enabled: bool) -> egui::Button<'static> {
    let (fill, color) = if enabled {
        (BTN_ACCENT, TEXT_PRIMARY)
    } else {
        (BTN_DISABLED, BTN_DISABLED_TEXT)
    };
    egui::Button::new(egui::RichText::new(text.into()).size(FONT_ACTION).strong().color(color))
        .fill(fill)
        .corner_radius(RADIUS_LARGE)
}

/// Gradient-ish progress bar: pink fill over a gray rail
pub fn progress_bar(ui: &mut egui::Ui, fraction: f32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, PROGRESS_HEIGHT), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter();
    let radius = PROGRESS_HEIGHT / 2.0;
    painter.rect_filled(rect, radius, BG_SURFACE);

    let filled_w = rect.width() * fraction.clamp(0.0, 1.0);
    if filled_w > 0.0 {
        let filled = egui::Rect::from_min_size(rect.min, egui::vec2(filled_w, rect.height()));
        painter.rect_filled(filled, radius, ACCENT_HOT);
        // Purple tail on the right half of the filled section
        let tail = egui::Rect::from_min_max(
            egui::pos2(filled.center().x, filled.top()),
            filled.max,
        );
        painter.rect_filled(tail, radius, ACCENT);
    }
}
