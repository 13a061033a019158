use crate::error::Result;
use crate::output::Format;
use crate::store::TaskStore;

pub fn run(store: &mut TaskStore, id: u64, format: Format) -> Result<()> {
    let task = store.delete(id)?;
    match format {
        Format::Json => println!("{}", serde_json::json!({ "deleted": task.id() })),
        _ => println!("Deleted task {}", task.id()),
    }
    Ok(())
}
