use super::media_type::media_type_for;
use crate::catalog::ContentSource;
use crate::error::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A file offered for upload, before or after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub source: ContentSource,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
        source: ContentSource,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            source,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            media_type: media_type_for(&name).to_string(),
            name,
            size: metadata.len(),
            source: ContentSource::File(path.to_path_buf()),
        })
    }

    /// For drops that carry their payload instead of a path.
    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        Self {
            media_type: media_type_for(&name).to_string(),
            size: bytes.len() as u64,
            name,
            source: ContentSource::Memory(bytes),
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}
