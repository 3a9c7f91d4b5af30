mod board;
mod progress;
mod simulator;
mod types;

pub use board::UploadBoard;
pub use progress::{IncrementSource, ProgressCurve, RandomIncrements, ScriptedIncrements, COMPLETE};
pub use simulator::{SourceFactory, UploadSimulator};
pub use types::{TaskId, UploadEvent, UploadTask};
