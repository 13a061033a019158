pub mod create;
pub mod delete;
pub mod edit;
pub mod lifecycle;
pub mod list;
pub mod search;
pub mod show;

use mockable::DefaultClock;

use crate::config::Config;
use crate::error::Result;
use crate::store::TaskStore;

/// Open the configured task file with the system clock.
pub fn open_store(config: &Config) -> Result<TaskStore> {
    let (store, _report) = TaskStore::open(&config.data_file, DefaultClock)?;
    Ok(store)
}
