use crate::error::Result;
use crate::model::{Priority, Status};
use crate::output::{self, Format};
use crate::query::{Filter, SortOrder};
use crate::store::TaskStore;

pub fn run(
    store: &mut TaskStore,
    sort: SortOrder,
    priority: Option<Priority>,
    status: Option<Status>,
    overdue: bool,
    format: Format,
) -> Result<()> {
    store.set_sort_order(sort);

    let filter = if overdue {
        Some(Filter::Overdue)
    } else if let Some(p) = priority {
        Some(Filter::Priority(p))
    } else {
        status.map(Filter::Status)
    };

    let tasks = match filter {
        Some(f) => store.filter(f),
        None => store.list(),
    };
    output::print_tasks(&tasks, store.today(), format)
}
