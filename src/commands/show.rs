use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

pub fn run(store: &TaskStore, id: u64, format: Format) -> Result<()> {
    let task = store.find(id)?;
    output::print_task(task, store.today(), format)
}
