use crate::catalog::{Catalog, ContentStore, RecordId};
use crate::intake::{CandidateFile, IntakeValidator};
use crate::notify::Notifier;
use crate::upload::{TaskId, UploadBoard, UploadEvent, UploadSimulator};
use std::sync::mpsc::Receiver;

/// Application-root state: the catalog plus the uploads still in flight.
///
/// The owner feeds simulator events through [`Store::apply`] from a single
/// thread, which keeps every catalog mutation a single uninterrupted step.
#[derive(Debug, Default)]
pub struct Store {
    pub catalog: Catalog,
    pub uploads: UploadBoard,
}

impl Store {
    pub fn new(content: ContentStore) -> Self {
        Self {
            catalog: Catalog::new(content),
            uploads: UploadBoard::new(),
        }
    }

    /// Validates `batch` and starts an upload for every accepted file.
    pub fn submit(
        &mut self,
        batch: Vec<CandidateFile>,
        validator: &IntakeValidator,
        simulator: &UploadSimulator,
        notifier: &dyn Notifier,
    ) -> Vec<TaskId> {
        validator
            .validate(batch, notifier)
            .into_iter()
            .map(|file| {
                let name = file.name.clone();
                let id = simulator.start(file);
                self.uploads.register(id, name);
                id
            })
            .collect()
    }

    /// Returns the id of the record created, if the event completed an upload.
    pub fn apply(&mut self, event: UploadEvent, notifier: &dyn Notifier) -> Option<RecordId> {
        match event {
            UploadEvent::Progress { id, progress } => {
                self.uploads.update(id, progress);
                None
            }
            UploadEvent::Completed { id, file } => {
                if self.uploads.remove(id).is_none() {
                    tracing::warn!(%id, name = %file.name, "Untracked upload completed");
                    return None;
                }
                Some(self.catalog.insert(file, notifier))
            }
            UploadEvent::Failed { id, error } => {
                if self.uploads.remove(id).is_some() {
                    tracing::warn!(%id, name = error.file_name(), "Upload failed");
                    notifier.error(error.to_string());
                }
                None
            }
        }
    }

    /// Applies every event already waiting on `receiver`.
    pub fn drain(&mut self, receiver: &Receiver<UploadEvent>, notifier: &dyn Notifier) -> usize {
        let mut applied = 0;
        while let Ok(event) = receiver.try_recv() {
            self.apply(event, notifier);
            applied += 1;
        }
        applied
    }

    pub fn is_busy(&self) -> bool {
        !self.uploads.is_empty()
    }
}
