//! Fixed dark slate theme for the operations wall display.

use eframe::egui;
use shared::domain::StockStatus;

pub struct Palette {
    pub app_background: egui::Color32,
    pub panel_background: egui::Color32,
    pub panel_stroke: egui::Color32,
    pub inset_background: egui::Color32,
    pub feed_background: egui::Color32,
    pub title_text: egui::Color32,
    pub body_text: egui::Color32,
    pub muted_text: egui::Color32,
    pub hint_text: egui::Color32,
    pub faint_text: egui::Color32,
    pub accent: egui::Color32,
    pub accent_strong: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub danger: egui::Color32,
    pub user_bubble: egui::Color32,
    pub user_bubble_stroke: egui::Color32,
    pub assistant_bubble: egui::Color32,
    pub assistant_bubble_stroke: egui::Color32,
}

pub fn palette() -> Palette {
    Palette {
        app_background: egui::Color32::from_rgb(2, 6, 23),
        panel_background: egui::Color32::from_rgb(15, 23, 42),
        panel_stroke: egui::Color32::from_rgb(30, 41, 59),
        inset_background: egui::Color32::from_rgb(8, 13, 31),
        feed_background: egui::Color32::BLACK,
        title_text: egui::Color32::from_rgb(241, 245, 249),
        body_text: egui::Color32::from_rgb(203, 213, 225),
        muted_text: egui::Color32::from_rgb(148, 163, 184),
        hint_text: egui::Color32::from_rgb(100, 116, 139),
        faint_text: egui::Color32::from_rgb(71, 85, 105),
        accent: egui::Color32::from_rgb(96, 165, 250),
        accent_strong: egui::Color32::from_rgb(37, 99, 235),
        success: egui::Color32::from_rgb(52, 211, 153),
        warning: egui::Color32::from_rgb(245, 158, 11),
        danger: egui::Color32::from_rgb(239, 68, 68),
        user_bubble: egui::Color32::from_rgb(37, 99, 235),
        user_bubble_stroke: egui::Color32::from_rgb(59, 130, 246),
        assistant_bubble: egui::Color32::from_rgb(30, 41, 59),
        assistant_bubble_stroke: egui::Color32::from_rgb(51, 65, 85),
    }
}

pub fn stock_status_color(palette: &Palette, status: StockStatus) -> egui::Color32 {
    match status {
        StockStatus::Critical => palette.danger,
        StockStatus::Low => palette.warning,
        StockStatus::Healthy => palette.success,
    }
}

pub fn apply(ctx: &egui::Context) {
    let palette = palette();
    let mut visuals = egui::Visuals::dark();

    visuals.override_text_color = None;
    visuals.window_fill = palette.panel_background;
    visuals.panel_fill = palette.app_background;
    visuals.extreme_bg_color = palette.app_background;
    visuals.faint_bg_color = palette.panel_stroke;
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent_strong;
    visuals.selection.stroke = egui::Stroke::new(1.0, palette.accent);

    visuals.widgets.noninteractive.bg_fill = palette.panel_background;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.panel_stroke);
    visuals.widgets.noninteractive.fg_stroke.color = palette.body_text;
    visuals.widgets.inactive.bg_fill = palette.panel_stroke;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, palette.panel_stroke);
    visuals.widgets.inactive.fg_stroke.color = palette.body_text;
    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(51, 65, 85);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, palette.hint_text);
    visuals.widgets.hovered.fg_stroke.color = palette.title_text;
    visuals.widgets.active.bg_fill = palette.accent_strong;
    visuals.widgets.active.fg_stroke.color = palette.title_text;

    visuals.window_stroke = egui::Stroke::new(1.0, palette.panel_stroke);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);

    ctx.set_visuals(visuals);
}
