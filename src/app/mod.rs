mod state;
mod ui;

use anyhow::Context;
use dropvault::catalog::{ContentStore, RecordId};
use dropvault::intake::{collect_folder, CandidateFile, IntakeValidator};
use dropvault::notify::{NotificationLog, Notifier};
use dropvault::upload::{TaskId, UploadEvent, UploadSimulator};
use dropvault::{DropVaultConfig, Store};
use eframe::{egui, App};
use state::UiState;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use tokio::runtime::Runtime;

pub struct DropVaultApp {
    config: DropVaultConfig,
    store: Store,
    validator: IntakeValidator,
    simulator: UploadSimulator,
    events: std_mpsc::Receiver<UploadEvent>,
    notifications: NotificationLog,
    state: UiState,
    // keeps the upload timers alive for the lifetime of the window
    _runtime: Runtime,
}

impl DropVaultApp {
    pub fn new(config: DropVaultConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing DropVault");
        let runtime = Runtime::new().context("failed to start upload runtime")?;
        let (sender, receiver) = std_mpsc::channel();
        let simulator = UploadSimulator::new(runtime.handle().clone(), &config, sender);

        Ok(Self {
            validator: IntakeValidator::from_config(&config),
            store: Store::new(ContentStore::new()),
            simulator,
            events: receiver,
            notifications: NotificationLog::new(),
            state: UiState::default(),
            _runtime: runtime,
            config,
        })
    }

    pub fn submit(&mut self, batch: Vec<CandidateFile>) {
        if batch.is_empty() {
            return;
        }
        let started = self.store.submit(
            batch,
            &self.validator,
            &self.simulator,
            &self.notifications,
        );
        tracing::debug!(started = started.len(), "Submitted intake batch");
    }

    pub fn browse_files(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter(
                "Supported files",
                &["png", "jpg", "jpeg", "gif", "webp", "pdf", "txt", "zip", "doc", "docx"],
            )
            .add_filter("All files", &["*"])
            .pick_files()
        else {
            return;
        };

        let batch = self.candidates_from_paths(paths);
        self.submit(batch);
    }

    pub fn add_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            let batch = collect_folder(&folder);
            if batch.is_empty() {
                self.state.error_message = Some(format!("No files found in {}", folder.display()));
            }
            self.submit(batch);
        }
    }

    fn candidates_from_paths(&self, paths: Vec<PathBuf>) -> Vec<CandidateFile> {
        paths
            .into_iter()
            .filter_map(|path| match CandidateFile::from_path(&path) {
                Ok(file) => Some(file),
                Err(e) => {
                    self.notifications
                        .error(format!("Could not read \"{}\": {}", path.display(), e));
                    None
                }
            })
            .collect()
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.state.is_drag_over = hovering;

        if dropped.is_empty() {
            return;
        }

        let mut batch = Vec::new();
        for file in dropped {
            if let Some(path) = file.path {
                batch.extend(self.candidates_from_paths(vec![path]));
            } else if let Some(bytes) = file.bytes {
                batch.push(CandidateFile::from_bytes(file.name, bytes));
            }
        }
        self.submit(batch);
    }

    pub fn delete_file(&mut self, id: RecordId) {
        if self.state.renaming.as_ref().is_some_and(|d| d.id == id) {
            self.state.cancel_rename();
        }
        self.store.catalog.delete(id, &self.notifications);
    }

    pub fn commit_rename(&mut self) {
        if let Some(draft) = self.state.renaming.take() {
            self.store
                .catalog
                .rename(draft.id, &draft.name, &self.notifications);
        }
    }

    pub fn cancel_upload(&mut self, id: TaskId) {
        if !self.simulator.cancel(id) {
            tracing::debug!(%id, "Cancel requested for finished upload");
        }
    }

    /// Opens the file with the platform handler. In-memory drops are spilled
    /// to a scratch directory that is removed when the record is deleted.
    pub fn open_file(&mut self, id: RecordId) {
        let Some(record) = self.store.catalog.get(id) else {
            return;
        };

        let result = record
            .local_path()
            .and_then(|path| open::that(&path).map_err(Into::into));
        match result {
            Ok(()) => tracing::debug!(%id, "Opened file"),
            Err(e) => {
                tracing::warn!(%id, error = %e, "Failed to open file");
                self.notifications
                    .error(format!("Failed to open \"{}\"", record.name()));
            }
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let applied = self.store.drain(&self.events, &self.notifications);
        self.notifications.expire(self.config.notification_ttl());
        self.handle_dropped_files(ctx);

        if self.store.is_busy() || applied > 0 {
            ctx.request_repaint_after(self.config.tick_interval());
        }
        if !self.notifications.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

impl App for DropVaultApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

impl Drop for DropVaultApp {
    fn drop(&mut self) {
        let cancelled = self.simulator.cancel_all();
        if cancelled > 0 {
            tracing::info!(cancelled, "Stopped in-flight uploads on exit");
        }
    }
}
