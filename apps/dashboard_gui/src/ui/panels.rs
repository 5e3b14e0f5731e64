//! Reusable drawing helpers for the dashboard panels: section frames,
//! status chips, stock rows, chat bubbles, and the decision card.

use eframe::egui;
use shared::domain::{ChatMessage, ChatRole, StockItem, ASSISTANT_GREETING};
use shared::protocol::EntranceDecision;

use super::theme::{self, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionCardAction {
    CopyPlate,
    CopyAnalysis,
}

pub fn section_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.panel_background)
        .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(14, 12))
}

pub fn section_heading(ui: &mut egui::Ui, palette: &Palette, accent: egui::Color32, title: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 12.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 3.0, accent);
        ui.label(
            egui::RichText::new(title)
                .color(palette.title_text)
                .strong()
                .size(12.0),
        );
    });
}

pub fn status_chip(ui: &mut egui::Ui, palette: &Palette, dot: egui::Color32, label: &str) {
    egui::Frame::new()
        .fill(palette.panel_background)
        .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(12, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 4.0, dot);
                ui.label(
                    egui::RichText::new(label)
                        .color(palette.title_text)
                        .strong()
                        .size(12.0),
                );
            });
        });
}

pub fn stock_row(ui: &mut egui::Ui, palette: &Palette, item: &StockItem) {
    egui::Frame::new()
        .fill(palette.inset_background)
        .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(&item.label)
                            .color(palette.title_text)
                            .size(13.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("Threshold: {}", item.threshold))
                            .color(palette.hint_text)
                            .size(10.0),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let color = theme::stock_status_color(palette, item.status());
                    egui::Frame::new()
                        .fill(color.gamma_multiply(0.18))
                        .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.35)))
                        .corner_radius(egui::CornerRadius::same(10))
                        .inner_margin(egui::Margin::symmetric(10, 4))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(format!("{} Units", item.quantity))
                                    .color(color)
                                    .strong()
                                    .size(11.0),
                            );
                        });
                });
            });
        });
}

pub fn chat_bubble(ui: &mut egui::Ui, palette: &Palette, role: ChatRole, text: &str) {
    let max_width = ui.available_width() * 0.85;
    let (fill, stroke, color) = match role {
        ChatRole::User => (
            palette.user_bubble,
            palette.user_bubble_stroke,
            egui::Color32::WHITE,
        ),
        ChatRole::Assistant => (
            palette.assistant_bubble,
            palette.assistant_bubble_stroke,
            palette.body_text,
        ),
    };
    let bubble = |ui: &mut egui::Ui| {
        egui::Frame::new()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(egui::RichText::new(text).color(color).size(12.0));
            });
    };
    match role {
        ChatRole::User => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                bubble(ui)
            });
        }
        ChatRole::Assistant => {
            ui.with_layout(egui::Layout::left_to_right(egui::Align::Min), |ui| {
                bubble(ui)
            });
        }
    }
}

/// Greeting bubble first, then the log in insertion order.
pub fn conversation_view(ui: &mut egui::Ui, palette: &Palette, conversation: &[ChatMessage]) {
    chat_bubble(ui, palette, ChatRole::Assistant, ASSISTANT_GREETING);
    for message in conversation {
        ui.add_space(6.0);
        chat_bubble(ui, palette, message.role, &message.text);
    }
}

pub fn decision_card(
    ui: &mut egui::Ui,
    palette: &Palette,
    decision: &EntranceDecision,
) -> Option<DecisionCardAction> {
    let mut action = None;
    let (card_fill, card_stroke) = if decision.is_success() {
        (palette.panel_background, palette.panel_stroke)
    } else {
        (
            egui::Color32::from_rgb(32, 12, 18),
            egui::Color32::from_rgb(92, 30, 36),
        )
    };

    egui::Frame::new()
        .fill(card_fill)
        .stroke(egui::Stroke::new(1.0, card_stroke))
        .corner_radius(egui::CornerRadius::same(14))
        .inner_margin(egui::Margin::same(18))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                egui::Frame::new()
                    .fill(palette.accent)
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::symmetric(8, 3))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!("DETECTED: {}", decision.plate_text()))
                                .color(palette.app_background)
                                .strong()
                                .size(11.0),
                        );
                    });
                ui.label(
                    egui::RichText::new(decision.timestamp_text())
                        .color(palette.hint_text)
                        .size(11.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::Frame::new()
                        .fill(palette.success.gamma_multiply(0.12))
                        .stroke(egui::Stroke::new(1.0, palette.success.gamma_multiply(0.3)))
                        .corner_radius(egui::CornerRadius::same(12))
                        .inner_margin(egui::Margin::symmetric(12, 5))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new("VERIFIED BY AI")
                                    .color(palette.success)
                                    .strong()
                                    .size(11.0),
                            );
                        });
                    if let Some(ruling) = decision.decision.as_deref() {
                        egui::Frame::new()
                            .fill(palette.danger.gamma_multiply(0.12))
                            .stroke(egui::Stroke::new(1.0, palette.danger.gamma_multiply(0.3)))
                            .corner_radius(egui::CornerRadius::same(12))
                            .inner_margin(egui::Margin::symmetric(12, 5))
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(ruling)
                                        .color(palette.danger)
                                        .strong()
                                        .size(11.0),
                                );
                            });
                    }
                });
            });

            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Agent Decision Intelligence")
                    .color(palette.title_text)
                    .strong()
                    .size(22.0),
            );
            if !decision.message_text().is_empty() {
                ui.label(
                    egui::RichText::new(decision.message_text())
                        .color(palette.muted_text)
                        .size(12.5),
                );
            }

            ui.add_space(12.0);
            egui::Frame::new()
                .fill(palette.inset_background)
                .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
                .corner_radius(egui::CornerRadius::same(10))
                .inner_margin(egui::Margin::same(14))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(decision.analysis_text())
                            .color(palette.body_text)
                            .size(13.0),
                    );
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.small_button("Copy Plate").clicked() {
                    action = Some(DecisionCardAction::CopyPlate);
                }
                if ui.small_button("Copy Analysis").clicked() {
                    action = Some(DecisionCardAction::CopyAnalysis);
                }
            });

            if let Some(serde_json::Value::Object(facts)) = &decision.factual_data {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("ARRIVAL RECORD")
                        .color(palette.hint_text)
                        .strong()
                        .size(10.0),
                );
                ui.add_space(4.0);
                for (key, value) in facts {
                    let text = facts_value_text(value);
                    if text.is_empty() {
                        continue;
                    }
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{key}:"))
                                .color(palette.hint_text)
                                .size(11.5),
                        );
                        ui.label(egui::RichText::new(text).color(palette.body_text).size(11.5));
                    });
                }
            }

            ui.add_space(16.0);
            ui.columns(2, |columns| {
                fact_tile(&mut columns[0], palette, "ASSIGNED GATE", |ui| {
                    ui.label(
                        egui::RichText::new("GATE A-04")
                            .color(palette.accent)
                            .strong()
                            .monospace()
                            .size(18.0),
                    );
                });
                fact_tile(&mut columns[1], palette, "INSTRUCTIONS", |ui| {
                    ui.label(
                        egui::RichText::new("Proceed to Unloading Area")
                            .color(palette.title_text)
                            .strong()
                            .size(13.0),
                    );
                });
            });
        });

    action
}

fn fact_tile(
    ui: &mut egui::Ui,
    palette: &Palette,
    label: &str,
    content: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::new()
        .fill(palette.panel_stroke.gamma_multiply(0.45))
        .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(label)
                    .color(palette.hint_text)
                    .strong()
                    .size(10.0),
            );
            ui.add_space(2.0);
            content(ui);
        });
}

fn facts_value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn empty_decision_pane(ui: &mut egui::Ui, palette: &Palette) {
    let pane_height = ui.available_height();
    egui::Frame::new()
        .fill(palette.panel_background.gamma_multiply(0.5))
        .stroke(egui::Stroke::new(1.0, palette.panel_stroke))
        .corner_radius(egui::CornerRadius::same(14))
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_height((pane_height - 50.0).max(220.0));
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.34);
                ui.label(
                    egui::RichText::new("🚚")
                        .size(42.0)
                        .color(palette.faint_text),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("No vehicle data available")
                        .size(16.0)
                        .color(palette.hint_text),
                );
                ui.add_space(4.0);
                ui.scope(|ui| {
                    ui.set_max_width(340.0);
                    ui.label(
                        egui::RichText::new(
                            "Upload a vehicle image or capture a live feed to trigger the \
                             autonomous reasoning process.",
                        )
                        .size(12.0)
                        .color(palette.faint_text),
                    );
                });
            });
        });
}
