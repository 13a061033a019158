use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;
use crate::model::{Task, date_format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

/// A task as shown to the user: the stored record plus derived flags.
#[derive(Debug, Serialize)]
pub struct TaskView<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub overdue: bool,
}

impl<'a> TaskView<'a> {
    pub fn new(task: &'a Task, today: NaiveDate) -> Self {
        Self {
            task,
            overdue: task.is_overdue(today),
        }
    }
}

pub fn print_task(task: &Task, today: NaiveDate, format: Format) -> Result<()> {
    let view = TaskView::new(task, today);
    match format {
        Format::Json => println!("{}", serde_json::to_string(&view)?),
        Format::Pretty => {
            let marker = if view.overdue {
                format!(" {}", "OVERDUE".red().bold())
            } else {
                String::new()
            };
            println!("[{}] {}{}", task.id(), task.title(), marker);
            println!("  priority: {} | status: {}", task.priority(), task.status());
            println!(
                "  created: {} | due: {}",
                date_format::format(task.create_date()),
                date_format::format(task.completion_date())
            );
            println!("  {}", task.description());
            if let Some(rating) = task.rating() {
                println!("  rating: {rating}/5");
            }
        }
        Format::Minimal => println!("{}", minimal_row(&view)),
    }
    Ok(())
}

fn minimal_row(view: &TaskView<'_>) -> String {
    let task = view.task;
    format!(
        "{:>4} {:16} {:8} {:12} {:10}{}",
        task.id(),
        truncate_title(task.title(), 16),
        task.priority(),
        task.status(),
        date_format::format(task.completion_date()),
        if view.overdue { " !" } else { "" }
    )
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

pub fn print_tasks(tasks: &[Task], today: NaiveDate, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let views: Vec<TaskView<'_>> = tasks.iter().map(|t| TaskView::new(t, today)).collect();
            println!("{}", serde_json::to_string(&views)?);
        }
        Format::Pretty => {
            if tasks.is_empty() {
                println!("No tasks.");
            }
            for task in tasks {
                print_task(task, today, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!(
                "{:>4} {:16} {:8} {:12} {:10}",
                "ID", "TITLE", "PRIORITY", "STATUS", "DUE"
            );
            println!("{}", "-".repeat(54));
            for task in tasks {
                println!("{}", minimal_row(&TaskView::new(task, today)));
            }
        }
    }
    Ok(())
}
