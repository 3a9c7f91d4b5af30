use super::content::{ContentHandle, ContentSource};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One completed upload held by the catalog.
///
/// Only `name` changes after creation, and only through
/// [`Catalog::rename`](super::Catalog::rename). The content handles are
/// released when the record is dropped.
#[derive(Debug)]
pub struct FileRecord {
    pub(super) id: RecordId,
    pub(super) name: String,
    pub(super) size: u64,
    pub(super) media_type: String,
    pub(super) uploaded_at: DateTime<Utc>,
    pub(super) content: ContentHandle,
    pub(super) preview: Option<ContentHandle>,
}

impl FileRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn content(&self) -> Result<ContentSource> {
        self.content.source()
    }

    /// Path the platform handler can open, resolved under the current name.
    pub fn local_path(&self) -> Result<PathBuf> {
        self.content.local_path(&self.name)
    }

    pub fn preview(&self) -> Option<Result<ContentSource>> {
        self.preview.as_ref().map(ContentHandle::source)
    }
}
