//! JSON task file: a pretty-printed array of task records.
//!
//! Records are validated one at a time on load so a single bad entry costs
//! only itself. Saves replace the whole file through a temp file and rename
//! while holding the sibling `.lock` file.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TaskerError};
use crate::model::{Status, Task};
use crate::store::lock::LockGuard;

/// A record dropped during load, with enough context to tell the user which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub title: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    /// Set when the whole file was unreadable and the store started empty.
    pub corrupt: Option<String>,
}

pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tasks.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Read and decode the file. A missing file is an empty task list.
    pub fn load(&self) -> Result<(Vec<Task>, LoadReport)> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file missing, starting empty");
                return Ok((Vec::new(), LoadReport::default()));
            }
            Err(e) => return Err(e.into()),
        };
        let source = self.path.display().to_string();
        let content = String::from_utf8(bytes)
            .map_err(|e| TaskerError::CorruptStore(source.clone(), format!("not valid UTF-8: {e}")))?;
        let (tasks, report) = decode(&content, &source)?;
        debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded task file"
        );
        Ok((tasks, report))
    }

    /// Replace the file with `tasks`. The previous content stays intact if any
    /// step fails.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let _lock = LockGuard::acquire(&self.lock_path())?;

        let json = encode(tasks)?;
        let tmp = self.temp_path();
        let written = write_synced(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = tasks.len(), "saved task file");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

pub fn encode(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Decode file content. Fails only when the content is not a record sequence;
/// individual bad records are skipped and reported.
pub fn decode(content: &str, source: &str) -> Result<(Vec<Task>, LoadReport)> {
    if content.trim().is_empty() {
        return Ok((Vec::new(), LoadReport::default()));
    }

    let records = match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(records)) => records,
        Ok(Value::Null) => Vec::new(),
        Ok(other) => {
            return Err(TaskerError::CorruptStore(
                source.to_string(),
                format!("expected an array of tasks, found {}", kind_of(&other)),
            ));
        }
        Err(e) => return Err(TaskerError::CorruptStore(source.to_string(), e.to_string())),
    };

    let mut tasks = Vec::with_capacity(records.len());
    let mut report = LoadReport::default();
    let mut seen = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let title = record
            .get("title")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        match decode_record(record, &seen) {
            Ok(task) => {
                seen.insert(task.id);
                tasks.push(task);
            }
            Err(reason) => {
                warn!(
                    index,
                    title = title.as_deref().unwrap_or("<untitled>"),
                    %reason,
                    "skipping invalid task record"
                );
                report.skipped.push(SkippedRecord { index, title, reason });
            }
        }
    }

    report.loaded = tasks.len();
    Ok((tasks, report))
}

fn decode_record(record: Value, seen: &HashSet<u64>) -> std::result::Result<Task, String> {
    if record.is_null() {
        return Err("empty record".into());
    }
    let task: Task = serde_json::from_value(record).map_err(|e| e.to_string())?;

    if task.id == u64::MAX {
        return Err(format!("id {} leaves no room for new ids", task.id));
    }
    if seen.contains(&task.id) {
        return Err(format!("duplicate id {}", task.id));
    }
    if task.title.trim().is_empty() {
        return Err("blank title".into());
    }
    if task.description.trim().is_empty() {
        return Err("blank description".into());
    }
    if let Some(rating) = task.rating {
        if !(1..=5).contains(&rating) {
            return Err(format!("rating {rating} is out of range"));
        }
        if task.status != Status::Done {
            return Err(format!("rating set on {} task", task.status));
        }
    }
    Ok(task)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
