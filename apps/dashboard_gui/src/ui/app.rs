//! The dashboard shell: owns the UI state container, drains backend events
//! once per frame, and draws the three panes (camera + stock, assistant,
//! decision) around it.

use std::{
    collections::HashMap,
    fs,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
    time::{Duration, Instant, SystemTime},
};

use arboard::Clipboard;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use image::GenericImageView;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{
    describe_entrance_failure, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{self, DashboardState, ServiceIndicator};
use crate::ui::panels::{self, DecisionCardAction};
use crate::ui::theme::{self, Palette};

const HEALTH_PROBE_INTERVAL: Duration = Duration::from_secs(30);
const CAPTURE_PREVIEW_MAX_DIMENSION: f32 = 520.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn service_chip_label(indicator: ServiceIndicator) -> &'static str {
    match indicator {
        ServiceIndicator::Probing => "CONNECTING",
        ServiceIndicator::Online => "SYSTEM ONLINE",
        ServiceIndicator::Offline => "SERVICE OFFLINE",
    }
}

fn service_chip_color(palette: &Palette, indicator: ServiceIndicator) -> egui::Color32 {
    match indicator {
        ServiceIndicator::Probing => palette.warning,
        ServiceIndicator::Online => palette.success,
        ServiceIndicator::Offline => palette.danger,
    }
}

#[derive(Clone)]
enum CapturePreview {
    Image { texture: TextureHandle, size: egui::Vec2 },
    DecodeFailed,
}

#[derive(Debug, Clone, Eq)]
struct CapturePreviewCacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl PartialEq for CapturePreviewCacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.modified == other.modified
    }
}

impl Hash for CapturePreviewCacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.modified.hash(state);
    }
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: DashboardState,
    status: String,
    status_banner: Option<StatusBanner>,
    service_url: String,

    preview_cache: HashMap<CapturePreviewCacheKey, CapturePreview>,
    theme_applied: bool,
    next_health_probe: Instant,
    composer_wants_focus: bool,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: DashboardState::new(),
            status: "Backend worker starting...".to_string(),
            status_banner: None,
            service_url: settings.service_url,
            preview_cache: HashMap::new(),
            theme_applied: false,
            next_health_probe: Instant::now() + HEALTH_PROBE_INTERVAL,
            composer_wants_focus: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::WorkerReady => {
                    self.status = "Backend worker ready".to_string();
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::EntranceDecisionReady(decision) => {
                    self.status = if decision.is_success() {
                        format!("Entrance decision received for {}", decision.plate_text())
                    } else {
                        "Entrance scan settled without a plate read".to_string()
                    };
                    reducer::settle_entrance_success(&mut self.state, decision);
                }
                UiEvent::EntranceScanFailed(err) => {
                    reducer::settle_entrance_failure(&mut self.state);
                    self.status = describe_entrance_failure(err.message());
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message: self.status.clone(),
                    });
                }
                UiEvent::AssistantReplied(text) => {
                    reducer::settle_order_turn(&mut self.state, Some(text));
                }
                UiEvent::AssistantUnreachable(_) => {
                    // The fallback bubble is the whole user-facing story here.
                    reducer::settle_order_turn(&mut self.state, None);
                }
                UiEvent::HealthChecked {
                    online,
                    model_loaded,
                } => {
                    reducer::record_health(&mut self.state, online, model_loaded);
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
            }
        }
    }

    fn pick_capture_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Vehicle images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file()
        else {
            return;
        };
        self.begin_scan(path);
    }

    fn begin_scan(&mut self, path: PathBuf) {
        if !reducer::begin_entrance_scan(&mut self.state, path.clone()) {
            self.status = "A scan is already in progress; wait for it to settle".to_string();
            return;
        }
        self.status = format!("Analyzing {}...", display_file_name(&path));
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::ScanEntrance { image_path: path },
            &mut self.status,
        ) {
            reducer::settle_entrance_failure(&mut self.state);
        }
    }

    fn submit_composer(&mut self) {
        let Some(text) = reducer::take_submittable_draft(&mut self.state) else {
            return;
        };
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitOrder { text: text.clone() },
            &mut self.status,
        ) {
            reducer::abort_order_turn(&mut self.state, text);
        }
        self.composer_wants_focus = true;
    }

    fn copy_to_clipboard(&mut self, text: &str, label: &str) {
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
            Ok(()) => self.status = format!("Copied {label} to clipboard"),
            Err(err) => self.status = format!("Failed to copy {label}: {err}"),
        }
    }

    fn load_capture_preview(
        &mut self,
        ctx: &egui::Context,
        path: &Path,
    ) -> Option<CapturePreview> {
        let cache_key = capture_preview_cache_key(path);
        if let Some(cached) = self.preview_cache.get(&cache_key).cloned() {
            return Some(cached);
        }

        let Ok(bytes) = fs::read(path) else {
            self.preview_cache
                .insert(cache_key, CapturePreview::DecodeFailed);
            return Some(CapturePreview::DecodeFailed);
        };
        let Ok(decoded) = image::load_from_memory(&bytes) else {
            self.preview_cache
                .insert(cache_key, CapturePreview::DecodeFailed);
            return Some(CapturePreview::DecodeFailed);
        };

        let (orig_w, orig_h) = decoded.dimensions();
        let scale = (CAPTURE_PREVIEW_MAX_DIMENSION / (orig_w.max(orig_h) as f32)).min(1.0);
        let resized = if scale < 1.0 {
            decoded.resize(
                (orig_w as f32 * scale).max(1.0) as u32,
                (orig_h as f32 * scale).max(1.0) as u32,
                image::imageops::FilterType::Triangle,
            )
        } else {
            decoded
        };
        let rgba = resized.to_rgba8();
        let [w, h] = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], rgba.as_raw());
        let texture = ctx.load_texture(
            format!("capture-preview:{}", path.display()),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        let preview = CapturePreview::Image {
            texture,
            size: egui::vec2(w as f32, h as f32),
        };
        self.preview_cache.insert(cache_key, preview.clone());
        Some(preview)
    }

    fn show_header(&mut self, ctx: &egui::Context, palette: &Palette) {
        egui::TopBottomPanel::top("dashboard_header")
            .frame(
                egui::Frame::new()
                    .fill(palette.panel_background)
                    .inner_margin(egui::Margin::symmetric(18, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new("SmartWarehouse AI")
                                .color(palette.title_text)
                                .strong()
                                .size(19.0),
                        );
                        ui.label(
                            egui::RichText::new("Gate operations & order intake")
                                .color(palette.hint_text)
                                .size(11.0),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        panels::status_chip(
                            ui,
                            palette,
                            service_chip_color(palette, self.state.service),
                            service_chip_label(self.state.service),
                        );
                        let model_color = if self.state.model_loaded {
                            palette.success
                        } else {
                            palette.faint_text
                        };
                        panels::status_chip(ui, palette, model_color, "AI MODEL");
                        ui.label(
                            egui::RichText::new(Local::now().format("%H:%M:%S").to_string())
                                .color(palette.muted_text)
                                .monospace()
                                .size(13.0),
                        );
                    });
                });
            });
    }

    fn show_status_line(&mut self, ctx: &egui::Context, palette: &Palette) {
        egui::TopBottomPanel::bottom("dashboard_status")
            .frame(
                egui::Frame::new()
                    .fill(palette.panel_background)
                    .inner_margin(egui::Margin::symmetric(18, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status)
                            .color(palette.muted_text)
                            .size(11.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(&self.service_url)
                                .color(palette.faint_text)
                                .monospace()
                                .size(10.0),
                        );
                    });
                });
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    palette.danger.gamma_multiply(0.18),
                    egui::Stroke::new(1.0, palette.danger.gamma_multiply(0.5)),
                ),
            };
            egui::Frame::new()
                .fill(fill)
                .stroke(stroke)
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(&banner.message).color(palette.title_text),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_camera_pane(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        panels::section_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            panels::section_heading(ui, palette, palette.accent, "ENTRANCE CAMERA");
            ui.add_space(6.0);

            let feed_height = 200.0;
            egui::Frame::new()
                .fill(palette.feed_background)
                .corner_radius(egui::CornerRadius::same(10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.set_height(feed_height);
                    let preview = self
                        .state
                        .capture
                        .image_ref
                        .clone()
                        .and_then(|path| self.load_capture_preview(ui.ctx(), &path));
                    match preview {
                        Some(CapturePreview::Image { texture, size }) => {
                            let avail = ui.available_size();
                            let scale = (avail.x / size.x).min(feed_height / size.y).min(1.0);
                            ui.centered_and_justified(|ui| {
                                ui.add(
                                    egui::Image::new((texture.id(), size))
                                        .fit_to_exact_size(size * scale),
                                );
                            });
                        }
                        Some(CapturePreview::DecodeFailed) => {
                            ui.centered_and_justified(|ui| {
                                ui.label(
                                    egui::RichText::new("Preview unavailable for this file")
                                        .color(palette.hint_text)
                                        .size(12.0),
                                );
                            });
                        }
                        None => {
                            ui.centered_and_justified(|ui| {
                                ui.label(
                                    egui::RichText::new("NO FEED")
                                        .color(palette.faint_text)
                                        .monospace()
                                        .size(14.0),
                                );
                            });
                        }
                    }
                });

            ui.add_space(8.0);
            if self.state.capture.is_pending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Agent Reasoning...")
                            .color(palette.accent)
                            .size(12.0),
                    );
                });
            } else {
                let button = egui::Button::new(
                    egui::RichText::new("Upload Vehicle Image")
                        .color(egui::Color32::WHITE)
                        .strong(),
                )
                .fill(palette.accent_strong)
                .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(button).clicked() {
                    self.pick_capture_file();
                }
            }
        });
    }

    fn show_stock_pane(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        panels::section_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            panels::section_heading(ui, palette, palette.warning, "STOCK LEVELS");
            ui.add_space(6.0);
            for item in &self.state.stock {
                panels::stock_row(ui, palette, item);
                ui.add_space(6.0);
            }
        });
    }

    fn show_assistant_pane(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        panels::section_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            panels::section_heading(ui, palette, palette.success, "ORDER ASSISTANT");
            ui.add_space(6.0);

            let composer_height = 44.0;
            let log_height = (ui.available_height() - composer_height - 16.0).max(120.0);
            egui::ScrollArea::vertical()
                .id_salt("assistant_log")
                .max_height(log_height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    panels::conversation_view(ui, palette, &self.state.conversation);
                    if self.state.awaiting_assistant {
                        ui.add_space(6.0);
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(
                                egui::RichText::new("Assistant is responding...")
                                    .color(palette.hint_text)
                                    .size(11.0),
                            );
                        });
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let send_width = 64.0;
                let edit = egui::TextEdit::singleline(&mut self.state.draft)
                    .id_salt("order_composer")
                    .hint_text(
                        egui::RichText::new("Votre commande...")
                            .color(palette.faint_text),
                    )
                    .desired_width(ui.available_width() - send_width - 8.0);
                let response = ui.add(edit);
                if self.composer_wants_focus {
                    self.composer_wants_focus = false;
                    response.request_focus();
                }
                let enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let send_clicked = ui
                    .add_sized(
                        [send_width, response.rect.height()],
                        egui::Button::new(egui::RichText::new("Send").strong())
                            .fill(palette.accent_strong),
                    )
                    .clicked();
                if enter_pressed || send_clicked {
                    self.submit_composer();
                }
            });
        });
    }

    fn show_decision_pane(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        self.show_status_banner(ui, palette);
        match self.state.decision.clone() {
            Some(decision) => {
                if let Some(action) = panels::decision_card(ui, palette, &decision) {
                    match action {
                        DecisionCardAction::CopyPlate => {
                            self.copy_to_clipboard(decision.plate_text(), "plate");
                        }
                        DecisionCardAction::CopyAnalysis => {
                            self.copy_to_clipboard(decision.analysis_text(), "analysis");
                        }
                    }
                }
            }
            None => panels::empty_decision_pane(ui, palette),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }
        self.process_ui_events();

        if Instant::now() >= self.next_health_probe {
            self.next_health_probe = Instant::now() + HEALTH_PROBE_INTERVAL;
            dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth, &mut self.status);
        }

        let palette = theme::palette();
        self.show_header(ctx, &palette);
        self.show_status_line(ctx, &palette);

        egui::SidePanel::left("camera_and_stock")
            .frame(
                egui::Frame::new()
                    .fill(palette.app_background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .resizable(false)
            .exact_width(340.0)
            .show(ctx, |ui| {
                self.show_camera_pane(ui, &palette);
                ui.add_space(10.0);
                self.show_stock_pane(ui, &palette);
            });

        egui::SidePanel::right("assistant")
            .frame(
                egui::Frame::new()
                    .fill(palette.app_background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .resizable(false)
            .exact_width(360.0)
            .show(ctx, |ui| {
                self.show_assistant_pane(ui, &palette);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(palette.app_background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| {
                self.show_decision_pane(ui, &palette);
            });

        // The clock and the pending spinners need a periodic repaint even
        // when no input arrives.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn capture_preview_cache_key(path: &Path) -> CapturePreviewCacheKey {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
    CapturePreviewCacheKey {
        path: path.to_path_buf(),
        modified,
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("capture")
        .to_string()
}
