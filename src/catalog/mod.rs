mod content;
mod query;
mod record;

pub use content::{ContentHandle, ContentSource, ContentStore};
pub use query::SortKey;
pub use record::{FileRecord, RecordId};

use crate::intake::CandidateFile;
use crate::notify::Notifier;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    Unchanged,
    NotFound,
}

/// The authoritative list of uploaded files, newest insertion first.
///
/// Every mutation is a single synchronous step on `&mut self`, so a query
/// always sees either the whole previous state or the whole next one.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<FileRecord>,
    content: ContentStore,
}

impl Catalog {
    pub fn new(content: ContentStore) -> Self {
        Self {
            records: Vec::new(),
            content,
        }
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.content
    }

    pub fn insert(&mut self, file: CandidateFile, notifier: &dyn Notifier) -> RecordId {
        self.insert_at(file, Utc::now(), notifier)
    }

    pub(crate) fn insert_at(
        &mut self,
        file: CandidateFile,
        uploaded_at: DateTime<Utc>,
        notifier: &dyn Notifier,
    ) -> RecordId {
        let mut id = RecordId::generate();
        while self.get(id).is_some() {
            id = RecordId::generate();
        }

        let preview = file
            .is_image()
            .then(|| self.content.register(file.source.clone()));
        let content = self.content.register(file.source);

        tracing::info!(%id, name = %file.name, size = file.size, "Adding file to catalog");
        notifier.success(format!("\"{}\" uploaded successfully!", file.name));

        self.records.insert(
            0,
            FileRecord {
                id,
                name: file.name,
                size: file.size,
                media_type: file.media_type,
                uploaded_at,
                content,
                preview,
            },
        );
        id
    }

    /// Removes the record and releases its content. Returns `false` when the
    /// id is unknown, which is not an error.
    pub fn delete(&mut self, id: RecordId, notifier: &dyn Notifier) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            tracing::debug!(%id, "Delete ignored, no such record");
            return false;
        };

        let record = self.records.remove(index);
        tracing::info!(%id, name = %record.name, "Deleted file from catalog");
        drop(record);
        notifier.success("File deleted successfully".to_string());
        true
    }

    pub fn rename(
        &mut self,
        id: RecordId,
        new_name: &str,
        notifier: &dyn Notifier,
    ) -> RenameOutcome {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(%id, "Rename ignored, no such record");
            return RenameOutcome::NotFound;
        };

        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == record.name {
            return RenameOutcome::Unchanged;
        }

        tracing::info!(%id, from = %record.name, to = %new_name, "Renamed file");
        record.name = new_name.to_string();
        notifier.success("File renamed successfully".to_string());
        RenameOutcome::Renamed
    }

    /// Fresh filtered and sorted view; the catalog itself is untouched.
    pub fn query(&self, search_term: &str, sort: SortKey) -> Vec<&FileRecord> {
        query::build_view(&self.records, search_term, sort)
    }

    pub fn get(&self, id: RecordId) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationLog, Severity};
    use chrono::Duration;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn candidate(name: &str, size: u64, media_type: &str) -> CandidateFile {
        CandidateFile::new(
            name,
            size,
            media_type,
            ContentSource::Memory(Arc::from(vec![0u8; 4])),
        )
    }

    fn names(view: &[&FileRecord]) -> Vec<String> {
        view.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn insert_puts_newest_first() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        catalog.insert(candidate("b.txt", 1, "text/plain"), &log);
        catalog.insert(candidate("a.txt", 1, "text/plain"), &log);

        let order: Vec<_> = catalog.iter().map(|r| r.name()).collect();
        assert_eq!(order, vec!["a.txt", "b.txt"]);
        assert_eq!(
            log.messages(),
            vec![
                "\"b.txt\" uploaded successfully!",
                "\"a.txt\" uploaded successfully!"
            ]
        );
    }

    #[test]
    fn ids_are_unique() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        let ids: HashSet<_> = (0..64)
            .map(|i| catalog.insert(candidate(&format!("f{i}.txt"), i, "text/plain"), &log))
            .collect();
        assert_eq!(ids.len(), 64);
        assert_eq!(catalog.len(), 64);
    }

    #[test]
    fn only_images_get_previews() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        let photo = catalog.insert(candidate("cat.png", 10, "image/png"), &log);
        let doc = catalog.insert(candidate("cv.pdf", 10, "application/pdf"), &log);

        assert!(catalog.get(photo).unwrap().preview().is_some());
        assert!(catalog.get(doc).unwrap().preview().is_none());
        assert_eq!(catalog.content_store().live_handles(), 3);
    }

    #[test]
    fn delete_releases_handles_and_is_idempotent() {
        let log = NotificationLog::new();
        let store = ContentStore::new();
        let mut catalog = Catalog::new(store.clone());
        let keep = catalog.insert(candidate("keep.txt", 1, "text/plain"), &log);
        let gone = catalog.insert(candidate("gone.png", 1, "image/png"), &log);
        assert_eq!(store.live_handles(), 3);

        assert!(catalog.delete(gone, &log));
        assert_eq!(store.live_handles(), 1);
        assert!(!catalog.delete(gone, &log));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(keep).is_some());
        assert_eq!(log.count(Severity::Success), 3);
    }

    #[test]
    fn opened_memory_file_is_removed_on_delete() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        let id = catalog.insert(candidate("notes.txt", 4, "text/plain"), &log);
        catalog.rename(id, "../../notes.txt", &log);

        let path = catalog.get(id).unwrap().local_path().unwrap();
        assert!(path.exists());
        assert!(path.ends_with("notes.txt"));
        let scratch = path.parent().unwrap().file_name().unwrap();
        assert!(scratch.to_string_lossy().starts_with("dropvault"));

        assert!(catalog.delete(id, &log));
        assert!(!path.exists());
        assert_eq!(catalog.content_store().live_handles(), 0);
    }

    #[test]
    fn rename_trims_and_skips_noops() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        let id = catalog.insert(candidate("old.txt", 1, "text/plain"), &log);
        log.clear();

        assert_eq!(catalog.rename(id, "", &log), RenameOutcome::Unchanged);
        assert_eq!(catalog.rename(id, "   ", &log), RenameOutcome::Unchanged);
        assert_eq!(catalog.rename(id, "old.txt", &log), RenameOutcome::Unchanged);
        assert_eq!(catalog.rename(id, " old.txt ", &log), RenameOutcome::Unchanged);
        assert!(log.is_empty());

        assert_eq!(catalog.rename(id, "  new.txt ", &log), RenameOutcome::Renamed);
        assert_eq!(catalog.get(id).unwrap().name(), "new.txt");
        assert_eq!(log.messages(), vec!["File renamed successfully"]);

        assert_eq!(
            catalog.rename(RecordId::generate(), "x", &log),
            RenameOutcome::NotFound
        );
    }

    #[test]
    fn sorts_by_name_and_size() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        catalog.insert(candidate("b.txt", 10, "text/plain"), &log);
        catalog.insert(candidate("a.txt", 20, "text/plain"), &log);

        assert_eq!(names(&catalog.query("", SortKey::Name)), vec!["a.txt", "b.txt"]);
        assert_eq!(names(&catalog.query("", SortKey::Size)), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn sorts_by_date_and_type() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        let base = Utc::now();
        catalog.insert_at(candidate("old.zip", 1, "application/zip"), base, &log);
        catalog.insert_at(
            candidate("new.pdf", 1, "application/pdf"),
            base + Duration::seconds(5),
            &log,
        );
        catalog.insert_at(
            candidate("mid.png", 1, "image/png"),
            base + Duration::seconds(2),
            &log,
        );

        assert_eq!(
            names(&catalog.query("", SortKey::Date)),
            vec!["new.pdf", "mid.png", "old.zip"]
        );
        assert_eq!(
            names(&catalog.query("", SortKey::Type)),
            vec!["new.pdf", "old.zip", "mid.png"]
        );
        assert_eq!(
            names(&catalog.query("", SortKey::Unsorted)),
            vec!["mid.png", "new.pdf", "old.zip"]
        );
    }

    #[test]
    fn search_is_case_insensitive_and_pure() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        catalog.insert(candidate("Report.PDF", 1, "application/pdf"), &log);
        catalog.insert(candidate("photo.png", 1, "image/png"), &log);
        catalog.insert(candidate("draft report.txt", 1, "text/plain"), &log);

        assert_eq!(
            names(&catalog.query("REPORT", SortKey::Name)),
            vec!["draft report.txt", "Report.PDF"]
        );
        assert!(catalog.query("missing", SortKey::Name).is_empty());

        let first = names(&catalog.query("", SortKey::Name));
        let second = names(&catalog.query("", SortKey::Name));
        assert_eq!(first, second);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn total_size_sums_records() {
        let log = NotificationLog::new();
        let mut catalog = Catalog::default();
        catalog.insert(candidate("a", 3, "text/plain"), &log);
        catalog.insert(candidate("b", 4, "text/plain"), &log);
        assert_eq!(catalog.total_size(), 7);
    }
}
