use super::progress::{IncrementSource, ProgressCurve, RandomIncrements};
use super::types::{TaskId, UploadEvent};
use crate::config::DropVaultConfig;
use crate::error::UploadError;
use crate::intake::CandidateFile;
use derivative::Derivative;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

pub type SourceFactory = Arc<dyn Fn() -> Box<dyn IncrementSource> + Send + Sync>;

#[derive(Debug)]
struct Running {
    file_name: String,
    abort: AbortHandle,
}

type RunningMap = Arc<Mutex<HashMap<TaskId, Running>>>;

/// Drives one timer task per accepted file and reports through `events`.
///
/// Each task emits `Progress` in non-decreasing order and then exactly one
/// terminal event (`Completed` or `Failed`). A task removes itself from the
/// running set before sending its terminal event, and [`cancel`] does the
/// same under the same lock, so the two can never both fire.
///
/// [`cancel`]: UploadSimulator::cancel
#[derive(Derivative)]
#[derivative(Debug)]
pub struct UploadSimulator {
    runtime: Handle,
    events: Sender<UploadEvent>,
    interval: Duration,
    max_ticks: u32,
    next_id: AtomicU64,
    running: RunningMap,
    #[derivative(Debug = "ignore")]
    sources: SourceFactory,
}

impl UploadSimulator {
    pub fn new(runtime: Handle, config: &DropVaultConfig, events: Sender<UploadEvent>) -> Self {
        let max_increment = config.max_increment;
        Self {
            runtime,
            events,
            interval: config.tick_interval(),
            max_ticks: config.max_ticks,
            next_id: AtomicU64::new(0),
            running: Arc::new(Mutex::new(HashMap::new())),
            sources: Arc::new(move || {
                Box::new(RandomIncrements::new(max_increment)) as Box<dyn IncrementSource>
            }),
        }
    }

    /// Replaces the increment source used by subsequently started uploads.
    pub fn with_sources(mut self, sources: SourceFactory) -> Self {
        self.sources = sources;
        self
    }

    pub fn start(&self, file: CandidateFile) -> TaskId {
        let id = TaskId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let file_name = file.name.clone();
        let source = (self.sources)();

        tracing::info!(%id, name = %file_name, size = file.size, "Starting upload");

        // Held across spawn so the task cannot finish before it is tracked.
        let mut running = lock(&self.running);
        let handle = self.runtime.spawn(run_upload(
            id,
            file,
            source,
            self.interval,
            self.max_ticks,
            self.events.clone(),
            self.running.clone(),
        ));
        running.insert(
            id,
            Running {
                file_name,
                abort: handle.abort_handle(),
            },
        );
        id
    }

    /// Stops an in-flight upload. Returns `false` if it already finished.
    pub fn cancel(&self, id: TaskId) -> bool {
        let Some(task) = lock(&self.running).remove(&id) else {
            return false;
        };

        task.abort.abort();
        tracing::info!(%id, name = %task.file_name, "Cancelled upload");
        let _ = self.events.send(UploadEvent::Failed {
            id,
            error: UploadError::Cancelled {
                name: task.file_name,
            },
        });
        true
    }

    pub fn cancel_all(&self) -> usize {
        let ids: Vec<TaskId> = lock(&self.running).keys().copied().collect();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    pub fn is_running(&self, id: TaskId) -> bool {
        lock(&self.running).contains_key(&id)
    }

    pub fn in_flight(&self) -> usize {
        lock(&self.running).len()
    }
}

fn lock(running: &RunningMap) -> MutexGuard<'_, HashMap<TaskId, Running>> {
    running.lock().unwrap_or_else(|e| e.into_inner())
}

fn finish(running: &RunningMap, events: &Sender<UploadEvent>, event: UploadEvent) {
    if lock(running).remove(&event.task_id()).is_some() {
        let _ = events.send(event);
    }
}

async fn run_upload(
    id: TaskId,
    file: CandidateFile,
    mut source: Box<dyn IncrementSource>,
    interval: Duration,
    max_ticks: u32,
    events: Sender<UploadEvent>,
    running: RunningMap,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick resolves immediately
    ticker.tick().await;

    let mut curve = ProgressCurve::new();
    let mut ticks = 0u32;

    loop {
        ticker.tick().await;
        ticks += 1;

        let Some(step) = source.next_increment() else {
            tracing::warn!(%id, name = %file.name, ticks, "Upload interrupted");
            let error = UploadError::Interrupted { name: file.name };
            finish(&running, &events, UploadEvent::Failed { id, error });
            return;
        };

        let progress = curve.advance(step);
        let _ = events.send(UploadEvent::Progress { id, progress });

        if curve.is_complete() {
            tracing::info!(%id, name = %file.name, ticks, "Upload complete");
            finish(&running, &events, UploadEvent::Completed { id, file });
            return;
        }

        if ticks >= max_ticks {
            tracing::warn!(%id, name = %file.name, ticks, "Upload stalled");
            let error = UploadError::Stalled {
                name: file.name,
                ticks,
            };
            finish(&running, &events, UploadEvent::Failed { id, error });
            return;
        }
    }
}
