use super::state::{RenameDraft, UiState, ViewMode};
use super::DropVaultApp;
use chrono::Utc;
use dropvault::catalog::{FileRecord, RecordId, SortKey};
use dropvault::notify::Severity;
use dropvault::upload::TaskId;
use dropvault::utils::{format_time_ago, FileKind, FileSizeUtils};
use eframe::egui::{self, Align, Align2, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
const DANGER: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);

enum FileAction {
    Open(RecordId),
    BeginRename(RecordId),
    CommitRename,
    CancelRename,
    Delete(RecordId),
}

impl DropVaultApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            self.render_footer(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_drop_zone(ui);
                    ui.add_space(12.0);
                    self.render_uploads(ui);
                    if !self.store.catalog.is_empty() {
                        ui.add_space(12.0);
                        self.render_files(ui);
                    }
                    ui.add_space(20.0);
                });
        });

        self.render_toasts(ctx);
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("🔒 DropVault").color(ACCENT).strong());
            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                let dark = ui.visuals().dark_mode;
                if ui
                    .button(if dark { "☀" } else { "🌙" })
                    .on_hover_text("Toggle theme")
                    .clicked()
                {
                    ui.ctx().set_visuals(if dark {
                        egui::Visuals::light()
                    } else {
                        egui::Visuals::dark()
                    });
                }
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let stroke = if self.state.is_drag_over {
            egui::Stroke::new(2.0, ACCENT)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        egui::Frame::group(ui.style())
            .stroke(stroke)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(40.0).color(ACCENT));
                    ui.heading(self.state.drop_zone_title());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!(
                            "Drag and drop files here, or click to browse. Supports images, PDFs, documents up to {}.",
                            FileSizeUtils::format_size(self.validator.max_file_size())
                        ))
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        let button = egui::Button::new("📂 Browse Files")
                            .min_size(egui::vec2(160.0, 36.0));
                        if ui.add(button).clicked() {
                            self.browse_files();
                        }
                        if ui.button("📁 Add Folder").clicked() {
                            self.add_folder();
                        }
                    });
                });
            });
    }

    fn render_uploads(&mut self, ui: &mut egui::Ui) {
        if self.store.uploads.is_empty() {
            return;
        }

        let mut cancelled: Option<TaskId> = None;
        ui.group(|ui| {
            ui.label(UiState::upload_status_text(&self.store.uploads));
            for task in self.store.uploads.iter() {
                ui.horizontal(|ui| {
                    ui.label(task.file_name.as_str());
                    if ui.small_button("✖").on_hover_text("Cancel upload").clicked() {
                        cancelled = Some(task.id);
                    }
                });
                let bar = egui::ProgressBar::new(task.progress as f32 / 100.0)
                    .show_percentage()
                    .animate(false)
                    .fill(ACCENT);
                ui.add(bar);
                ui.add_space(4.0);
            }
        });

        if let Some(id) = cancelled {
            self.cancel_upload(id);
        }
    }

    fn render_files(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("My Files ({})", self.store.catalog.len()));
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    ui.selectable_value(&mut self.state.view_mode, ViewMode::List, "☰");
                    ui.selectable_value(&mut self.state.view_mode, ViewMode::Grid, "▦");
                    egui::ComboBox::from_id_source("sort_key")
                        .selected_text(self.state.sort_key.label())
                        .show_ui(ui, |ui| {
                            for key in SortKey::ALL {
                                ui.selectable_value(&mut self.state.sort_key, key, key.label());
                            }
                        });
                    ui.add(
                        egui::TextEdit::singleline(&mut self.state.search_term)
                            .hint_text("🔍 Search files...")
                            .desired_width(200.0),
                    );
                });
            });
            ui.separator();

            let view = self
                .store
                .catalog
                .query(&self.state.search_term, self.state.sort_key);

            if view.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(self.state.empty_view_message());
                    ui.add_space(24.0);
                });
                return;
            }

            let renaming = &mut self.state.renaming;
            match self.state.view_mode {
                ViewMode::Grid => {
                    ui.horizontal_wrapped(|ui| {
                        for record in &view {
                            ui.allocate_ui(egui::vec2(180.0, 130.0), |ui| {
                                egui::Frame::group(ui.style()).show(ui, |ui| {
                                    ui.set_width(160.0);
                                    ui.vertical_centered(|ui| {
                                        let kind = FileKind::from_media_type(record.media_type());
                                        ui.label(RichText::new(kind.icon()).size(32.0));
                                    });
                                    if let Some(a) = render_record(ui, record, renaming) {
                                        action = Some(a);
                                    }
                                });
                            });
                        }
                    });
                }
                ViewMode::List => {
                    for record in &view {
                        ui.horizontal(|ui| {
                            let kind = FileKind::from_media_type(record.media_type());
                            ui.label(RichText::new(kind.icon()).size(20.0));
                            ui.vertical(|ui| {
                                if let Some(a) = render_record(ui, record, renaming) {
                                    action = Some(a);
                                }
                            });
                        });
                        ui.separator();
                    }
                }
            }
        });

        match action {
            Some(FileAction::Open(id)) => self.open_file(id),
            Some(FileAction::BeginRename(id)) => {
                if let Some(record) = self.store.catalog.get(id) {
                    self.state.begin_rename(record);
                }
            }
            Some(FileAction::CommitRename) => self.commit_rename(),
            Some(FileAction::CancelRename) => self.state.cancel_rename(),
            Some(FileAction::Delete(id)) => self.delete_file(id),
            None => {}
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} files | {}",
                self.store.catalog.len(),
                FileSizeUtils::format_size(self.store.catalog.total_size())
            ));
            if self.store.is_busy() {
                ui.label(format!("| {} uploading", self.store.uploads.len()));
            }
        });

        if let Some(error) = &self.state.error_message {
            ui.vertical_centered(|ui| {
                ui.colored_label(DANGER, error.as_str());
            });
        }
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        let toasts = self.notifications.snapshot();
        if toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new("toasts")
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -48.0))
            .show(ctx, |ui| {
                for (index, toast) in toasts.iter().enumerate() {
                    let (icon, color) = match toast.severity {
                        Severity::Success => ("✅", SUCCESS),
                        Severity::Error => ("❌", DANGER),
                    };
                    let response = egui::Frame::popup(ui.style())
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(icon);
                                ui.colored_label(color, toast.message.as_str());
                            });
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(index);
                    }
                    ui.add_space(4.0);
                }
            });

        if let Some(index) = dismissed {
            self.notifications.dismiss(index);
        }
    }
}

fn render_record(
    ui: &mut egui::Ui,
    record: &FileRecord,
    renaming: &mut Option<RenameDraft>,
) -> Option<FileAction> {
    let mut action = None;

    match renaming.as_mut().filter(|d| d.id == record.id()) {
        Some(draft) => {
            let response = ui.add(egui::TextEdit::singleline(&mut draft.name).desired_width(150.0));
            if draft.focus_pending {
                response.request_focus();
                draft.focus_pending = false;
            }
            if response.lost_focus() {
                action = Some(if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    FileAction::CancelRename
                } else {
                    FileAction::CommitRename
                });
            }
        }
        None => {
            ui.label(RichText::new(record.name()).strong())
                .on_hover_text(record.media_type());
        }
    }

    ui.horizontal(|ui| {
        ui.small(FileSizeUtils::format_size(record.size()));
        ui.small(format_time_ago(record.uploaded_at(), Utc::now()));
    });

    ui.horizontal(|ui| {
        if ui.small_button("✏").on_hover_text("Rename").clicked() {
            action = Some(FileAction::BeginRename(record.id()));
        }
        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
            action = Some(FileAction::Delete(record.id()));
        }
        let open_label = if record.is_image() { "👁" } else { "⬇" };
        if ui.small_button(open_label).on_hover_text("Open").clicked() {
            action = Some(FileAction::Open(record.id()));
        }
    });

    action
}
