use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

pub fn run(store: &mut TaskStore, id: u64, description: &str, format: Format) -> Result<()> {
    let task = store.edit_description(id, description)?;
    output::print_task(&task, store.today(), format)
}
