#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Archive,
    Document,
    Other,
}

impl FileKind {
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            Self::Image
        } else if media_type.contains("pdf") {
            Self::Pdf
        } else if media_type.contains("zip") {
            Self::Archive
        } else if media_type.contains("word") {
            Self::Document
        } else {
            Self::Other
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Image => "🖼",
            Self::Pdf | Self::Document => "📄",
            Self::Archive => "🗜",
            Self::Other => "📁",
        }
    }
}
