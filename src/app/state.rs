use dropvault::catalog::{FileRecord, RecordId, SortKey};
use dropvault::upload::UploadBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone)]
pub struct RenameDraft {
    pub id: RecordId,
    pub name: String,
    pub focus_pending: bool,
}

#[derive(Debug, Default)]
pub struct UiState {
    pub search_term: String,
    pub sort_key: SortKey,
    pub view_mode: ViewMode,
    pub renaming: Option<RenameDraft>,
    pub is_drag_over: bool,
    pub error_message: Option<String>,
}

impl UiState {
    pub fn begin_rename(&mut self, record: &FileRecord) {
        self.renaming = Some(RenameDraft {
            id: record.id(),
            name: record.name().to_string(),
            focus_pending: true,
        });
    }

    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    pub fn empty_view_message(&self) -> &'static str {
        if self.search_term.is_empty() {
            "No files uploaded yet."
        } else {
            "No files found matching your search."
        }
    }

    pub fn drop_zone_title(&self) -> &'static str {
        if self.is_drag_over {
            "Drop your files here!"
        } else {
            "Upload Your Files"
        }
    }

    pub fn upload_status_text(uploads: &UploadBoard) -> String {
        match uploads.len() {
            0 => String::new(),
            1 => "Uploading 1 file".to_string(),
            n => format!(
                "Uploading {} files | {:.0}% overall",
                n,
                uploads.overall_fraction() * 100.0
            ),
        }
    }
}
