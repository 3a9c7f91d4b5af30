pub mod catalog;
pub mod config;
pub mod error;
pub mod intake;
pub mod notify;
pub mod store;
pub mod upload;
pub mod utils;

pub use catalog::{Catalog, FileRecord, RecordId, RenameOutcome, SortKey};
pub use config::DropVaultConfig;
pub use error::{DropVaultError, UploadError, ValidationError};
pub use intake::{CandidateFile, IntakeValidator};
pub use notify::{Notification, NotificationLog, Notifier, Severity};
pub use store::Store;
pub use upload::{TaskId, UploadEvent, UploadSimulator, UploadTask};
