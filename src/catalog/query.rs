use super::record::FileRecord;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Date,
    Type,
    /// Keeps catalog order (newest insertion first).
    Unsorted,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Size, SortKey::Date, SortKey::Type];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Sort by Name",
            Self::Size => "Sort by Size",
            Self::Date => "Sort by Date",
            Self::Type => "Sort by Type",
            Self::Unsorted => "Unsorted",
        }
    }

    fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        match self {
            Self::Name => compare_names(&a.name, &b.name),
            Self::Size => b.size.cmp(&a.size),
            Self::Date => b.uploaded_at.cmp(&a.uploaded_at),
            Self::Type => a.media_type.cmp(&b.media_type),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

/// Unknown keys map to [`SortKey::Unsorted`].
impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "name" => Self::Name,
            "size" => Self::Size,
            "date" => Self::Date,
            "type" => Self::Type,
            _ => Self::Unsorted,
        }
    }
}

// Case-folded first so "b.txt" and "B.txt" sit together; raw order breaks ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub(super) fn matches_search(record: &FileRecord, needle_lower: &str) -> bool {
    needle_lower.is_empty() || record.name.to_lowercase().contains(needle_lower)
}

/// Filters then stably sorts. The input order is the catalog order.
pub(super) fn build_view<'a, I>(records: I, search_term: &str, sort: SortKey) -> Vec<&'a FileRecord>
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    let needle = search_term.to_lowercase();
    let mut view: Vec<&FileRecord> = records
        .into_iter()
        .filter(|r| matches_search(r, &needle))
        .collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}
