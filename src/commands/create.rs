use chrono::NaiveDate;

use crate::error::Result;
use crate::model::Priority;
use crate::output::{self, Format};
use crate::store::TaskStore;

pub fn run(
    store: &mut TaskStore,
    title: &str,
    description: &str,
    due: NaiveDate,
    priority: Priority,
    format: Format,
) -> Result<()> {
    let task = store.create(title, description, due, priority)?;
    output::print_task(&task, store.today(), format)?;
    Ok(())
}
