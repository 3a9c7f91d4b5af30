mod candidate;
mod folder;
mod media_type;
mod validator;

pub use candidate::CandidateFile;
pub use folder::collect_folder;
pub use media_type::{media_type_for, OCTET_STREAM};
pub use validator::IntakeValidator;
