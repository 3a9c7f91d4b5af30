pub mod file_kind;
pub mod file_size;
pub mod time_ago;

pub use file_kind::FileKind;
pub use file_size::FileSizeUtils;
pub use time_ago::format_time_ago;
