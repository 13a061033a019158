use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tasker::config::{self, Config};
use tasker::model::{Priority, Status, date_format};
use tasker::output::Format;
use tasker::query::{Search, SortOrder};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tasker", version, about = "Personal task tracker")]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Task file (default: $TASKER_FILE, then .tasker/tasks.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, short)]
        description: String,
        /// Completion date (DD.MM.YYYY)
        #[arg(long, value_parser = parse_date)]
        due: NaiveDate,
        /// Task priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,
    },
    /// Display a single task
    Show {
        /// Task ID to show
        id: u64,
    },
    /// List tasks, optionally filtered
    List {
        /// Sort order
        #[arg(long, value_enum, default_value = "priority")]
        sort: SortOrder,
        /// Only tasks with this priority
        #[arg(long, value_enum, conflicts_with_all = ["status", "overdue"])]
        priority: Option<Priority>,
        /// Only tasks with this status
        #[arg(long, value_enum, conflicts_with = "overdue")]
        status: Option<Status>,
        /// Only unfinished tasks past their completion date
        #[arg(long)]
        overdue: bool,
    },
    /// Search tasks
    Search {
        /// Sort order
        #[arg(long, value_enum, default_value = "priority")]
        sort: SortOrder,
        #[command(subcommand)]
        by: SearchBy,
    },
    /// Move a task to its next status (new -> in_progress -> done)
    Advance {
        /// Task ID to advance
        id: u64,
    },
    /// Replace the description of a new task
    Describe {
        /// Task ID to edit
        id: u64,
        /// New description
        description: String,
    },
    /// Delete a new task
    Delete {
        /// Task ID to delete
        id: u64,
    },
    /// Rate a finished task from 1 to 5
    Rate {
        /// Task ID to rate
        id: u64,
        /// Rating (1-5)
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

#[derive(Subcommand)]
enum SearchBy {
    /// Substring of title or description (case-insensitive)
    Text { query: String },
    /// Exact completion date
    Date {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Completion date between two dates, inclusive
    Range {
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
    },
    /// Completion date in a given month
    Month { month: u32, year: i32 },
    /// Exact priority
    Priority {
        #[arg(value_enum)]
        priority: Priority,
    },
}

impl From<SearchBy> for Search {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Text { query } => Search::Text(query),
            SearchBy::Date { date } => Search::CompletionDate(date),
            SearchBy::Range { start, end } => Search::DateRange { start, end },
            SearchBy::Month { month, year } => Search::Month { month, year },
            SearchBy::Priority { priority } => Search::Priority(priority),
        }
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    date_format::parse(input).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli, format: Format) -> tasker::error::Result<()> {
    let config = Config::resolve(cli.file);
    let mut store = tasker::commands::open_store(&config)?;

    match cli.command {
        Commands::Add {
            title,
            description,
            due,
            priority,
        } => tasker::commands::create::run(&mut store, &title, &description, due, priority, format),
        Commands::Show { id } => tasker::commands::show::run(&store, id, format),
        Commands::List {
            sort,
            priority,
            status,
            overdue,
        } => tasker::commands::list::run(&mut store, sort, priority, status, overdue, format),
        Commands::Search { sort, by } => {
            tasker::commands::search::run(&mut store, sort, &by.into(), format)
        }
        Commands::Advance { id } => tasker::commands::lifecycle::advance(&mut store, id, format),
        Commands::Describe { id, description } => {
            tasker::commands::edit::run(&mut store, id, &description, format)
        }
        Commands::Delete { id } => tasker::commands::delete::run(&mut store, id, format),
        Commands::Rate { id, value } => tasker::commands::lifecycle::rate(&mut store, id, value, format),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
