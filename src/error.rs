use thiserror::Error;

/// Reasons a candidate file is turned away at intake. The Display text is
/// shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File \"{name}\" is too large. Maximum size is {}MB.", .max / (1024 * 1024))]
    FileTooLarge { name: String, size: u64, max: u64 },
    #[error("File type \"{media_type}\" is not supported.")]
    UnsupportedType { name: String, media_type: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Failed to upload \"{name}\": transfer interrupted")]
    Interrupted { name: String },
    #[error("Failed to upload \"{name}\": no completion after {ticks} ticks")]
    Stalled { name: String, ticks: u32 },
    #[error("Failed to upload \"{name}\": cancelled")]
    Cancelled { name: String },
}

impl UploadError {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Interrupted { name } | Self::Stalled { name, .. } | Self::Cancelled { name } => {
                name
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum DropVaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content handle {0} has been released")]
    Released(u64),
}

pub type Result<T> = std::result::Result<T, DropVaultError>;
