use crate::error::Result;
use crate::output::{self, Format};
use crate::query::{Search, SortOrder};
use crate::store::TaskStore;

pub fn run(store: &mut TaskStore, sort: SortOrder, search: &Search, format: Format) -> Result<()> {
    store.set_sort_order(sort);
    let tasks = store.search(search)?;
    output::print_tasks(&tasks, store.today(), format)
}
