use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

/// Move a task to its next status: new -> in_progress -> done.
pub fn advance(store: &mut TaskStore, id: u64, format: Format) -> Result<()> {
    let task = store.advance_status(id)?;
    output::print_task(&task, store.today(), format)
}

pub fn rate(store: &mut TaskStore, id: u64, value: i64, format: Format) -> Result<()> {
    let task = store.rate(id, value)?;
    output::print_task(&task, store.today(), format)
}
