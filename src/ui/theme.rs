use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const BG_PURE_BLACK: Color32 = Color32::from_rgb(0, 0, 0);
pub const BG_PANEL: Color32 = Color32::from_rgb(12, 10, 12);
pub const BG_WIDGET: Color32 = Color32::from_rgb(24, 20, 24);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(38, 30, 36);
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(52, 36, 44);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(190, 186, 188);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(118, 112, 116);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(232, 228, 230);

pub const ACCENT_TERRAIN: Color32 = Color32::from_rgb(223, 14, 58);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(46, 172, 35);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(172, 117, 35);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(70, 40, 52, 77);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.extreme_bg_color = BG_PURE_BLACK;
    visuals.faint_bg_color = BG_PANEL;
    visuals.slider_trailing_fill = true;
    visuals.selection.bg_fill = ACCENT_TERRAIN.gamma_multiply(0.5);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_TERRAIN);

    let widgets = &mut visuals.widgets;
    for (visual, fill, stroke) in [
        (&mut widgets.noninteractive, BG_WIDGET, TEXT_MUTED),
        (&mut widgets.inactive, BG_WIDGET, TEXT_PRIMARY),
        (&mut widgets.hovered, BG_WIDGET_HOVER, TEXT_BRIGHT),
        (&mut widgets.active, BG_WIDGET_ACTIVE, TEXT_BRIGHT),
        (&mut widgets.open, BG_WIDGET_ACTIVE, TEXT_BRIGHT),
    ] {
        visual.bg_fill = fill;
        visual.weak_bg_fill = fill;
        visual.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
        visual.fg_stroke = Stroke::new(1.0, stroke);
        visual.rounding = Rounding::same(4.0);
    }
    widgets.active.bg_stroke = Stroke::new(2.0, ACCENT_TERRAIN);

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 130.0;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
