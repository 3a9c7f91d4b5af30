use crate::error::UploadError;
use crate::intake::CandidateFile;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

/// In-flight upload as shown to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub id: TaskId,
    pub file_name: String,
    pub progress: u8,
}

#[derive(Debug, Clone)]
pub enum UploadEvent {
    Progress { id: TaskId, progress: u8 },
    Completed { id: TaskId, file: CandidateFile },
    Failed { id: TaskId, error: UploadError },
}

impl UploadEvent {
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::Progress { id, .. } | Self::Completed { id, .. } | Self::Failed { id, .. } => *id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}
