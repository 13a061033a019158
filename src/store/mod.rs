pub mod codec;
pub mod lock;
pub mod tasks;

pub use codec::{LoadReport, SkippedRecord, TaskFile};
pub use tasks::TaskStore;
